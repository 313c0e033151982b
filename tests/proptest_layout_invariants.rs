//! Property-based invariant tests for the card layout and text markup.
//!
//! 1. Font sizes always clamp into the configured range.
//! 2. Canvas height grows strictly with the number of lines.
//! 3. Canvas height grows strictly with the font size.
//! 4. Bold runs partition the line: re-bracing bold runs restores the input.
//! 5. Text without braces is a single plain run.
//! 6. Rendered runs are escaped exactly once.
//! 7. Card rendering never fails on arbitrary query strings.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use textcard::assets::NoAssets;
use textcard::config::{Config, LayoutConfig};
use textcard::escape::escape_attr;
use textcard::handle_query;
use textcard::layout::{canvas_height, compute_text_layout};
use textcard::markup::{parse_bold_runs, render_bold_line};
use textcard::{Align, RenderRequest};

// ── Helpers ─────────────────────────────────────────────────────────────

fn unescape(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn strip_tspans(input: &str) -> String {
    input
        .replace("<tspan font-weight=\"700\">", "")
        .replace("</tspan>", "")
}

fn line_strategy() -> impl Strategy<Value = String> {
    "[a-z {}<>&\"']{0,40}"
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Font size clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn font_size_clamps_into_range(size in any::<i64>()) {
        let clamped = RenderRequest::clamp_font_size(size, 10, 120);
        prop_assert!((10..=120).contains(&clamped));
        if (10..=120).contains(&size) {
            prop_assert_eq!(i64::from(clamped), size);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Height monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn height_grows_with_line_count(lines in 1usize..40, size in 10u32..=120) {
        let config = LayoutConfig::default();
        let size = size as f32;
        prop_assert!(
            canvas_height(lines + 1, size, &config) > canvas_height(lines, size, &config),
            "lines={} size={}", lines, size
        );
    }

    #[test]
    fn height_grows_with_font_size(lines in 1usize..40, size in 10u32..120) {
        let config = LayoutConfig::default();
        prop_assert!(
            canvas_height(lines, (size + 1) as f32, &config)
                > canvas_height(lines, size as f32, &config),
            "lines={} size={}", lines, size
        );
    }

    #[test]
    fn baselines_are_evenly_spaced(text in "[a-z|]{0,30}", size in 10u32..=120) {
        let config = LayoutConfig::default();
        let layout = compute_text_layout(&text, size, Align::Left, &config, 800.0);
        prop_assert_eq!(layout.lines.len(), text.split('|').count());
        for pair in layout.lines.windows(2) {
            let gap = pair[1].y - pair[0].y;
            prop_assert!((gap - layout.line_advance).abs() < 1e-3);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Bold run partition
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn runs_partition_the_line(line in line_strategy()) {
        let runs = parse_bold_runs(&line);
        let mut rebuilt = String::new();
        for run in &runs {
            prop_assert!(!run.text.is_empty());
            if run.bold {
                prop_assert!(
                    !run.text.contains('}'),
                    "bold run holds a closing brace: {:?}",
                    run
                );
                rebuilt.push('{');
                rebuilt.push_str(&run.text);
                rebuilt.push('}');
            } else {
                rebuilt.push_str(&run.text);
            }
        }
        prop_assert_eq!(rebuilt, line);
    }

    #[test]
    fn plain_text_is_a_single_run(line in "[a-z0-9 <>&]{1,40}") {
        let runs = parse_bold_runs(&line);
        prop_assert_eq!(runs.len(), 1);
        prop_assert!(!runs[0].bold);
        prop_assert_eq!(render_bold_line(&line), escape_attr(&line));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Escaping happens exactly once
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rendered_line_escapes_once(line in line_strategy()) {
        let rendered = strip_tspans(&render_bold_line(&line));
        prop_assert!(!rendered.contains('<'));
        prop_assert!(!rendered.contains('"'));
        prop_assert!(!rendered.contains("&amp;amp;"));
        let expected: String = parse_bold_runs(&line).iter().map(|r| r.text.as_str()).collect();
        prop_assert_eq!(unescape(&rendered), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Arbitrary queries never fail
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_queries_render(query in "[a-zA-Z0-9=&%+|{}<>#]{0,60}", seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let response = handle_query(&query, &Config::default(), &NoAssets, &mut rng);
        prop_assert_eq!(response.status_code, 200);
        prop_assert!(response.body.starts_with("<svg"));
        prop_assert!(response.body.ends_with("</svg>"));
    }
}
