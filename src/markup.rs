use crate::escape::escape_attr;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// One or more non-`}` characters between braces. `{}` and a dangling `{` never
// match, so both stay literal text.
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoldRun {
    pub text: String,
    pub bold: bool,
}

impl BoldRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Splits a line into alternating plain/bold runs.
///
/// Runs are tagged by their position in the full split sequence (text between
/// delimiters is even, delimited text is odd) and empty runs are dropped
/// afterwards, so `{b}` is a single bold run and `a{b}{c}d` keeps both bold runs.
pub fn parse_bold_runs(line: &str) -> Vec<BoldRun> {
    let mut runs = Vec::new();
    let mut cursor = 0;
    for caps in BOLD_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_run(&mut runs, &line[cursor..whole.start()], false);
        push_run(&mut runs, inner.as_str(), true);
        cursor = whole.end();
    }
    push_run(&mut runs, &line[cursor..], false);
    runs
}

fn push_run(runs: &mut Vec<BoldRun>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    runs.push(BoldRun {
        text: text.to_string(),
        bold,
    });
}

/// Escapes every run, then wraps bold runs. Escaping happens per run so the
/// generated `<tspan>` markup is never touched by it.
pub fn render_runs(runs: &[BoldRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let escaped = escape_attr(&run.text);
        if run.bold {
            out.push_str("<tspan font-weight=\"700\">");
            out.push_str(&escaped);
            out.push_str("</tspan>");
        } else {
            out.push_str(&escaped);
        }
    }
    out
}

pub fn render_bold_line(line: &str) -> String {
    render_runs(&parse_bold_runs(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(parse_bold_runs("hello world"), vec![BoldRun::plain("hello world")]);
    }

    #[test]
    fn splits_inline_bold() {
        assert_eq!(
            parse_bold_runs("a{b}c"),
            vec![BoldRun::plain("a"), BoldRun::bold("b"), BoldRun::plain("c")]
        );
    }

    #[test]
    fn leading_delimiter_is_bold() {
        assert_eq!(parse_bold_runs("{b}"), vec![BoldRun::bold("b")]);
    }

    #[test]
    fn adjacent_delimiters_stay_bold() {
        assert_eq!(
            parse_bold_runs("a{b}{c}d"),
            vec![
                BoldRun::plain("a"),
                BoldRun::bold("b"),
                BoldRun::bold("c"),
                BoldRun::plain("d"),
            ]
        );
    }

    #[test]
    fn unterminated_brace_is_literal() {
        assert_eq!(parse_bold_runs("a{b"), vec![BoldRun::plain("a{b")]);
        assert_eq!(
            parse_bold_runs("x{y}z{w"),
            vec![BoldRun::plain("x"), BoldRun::bold("y"), BoldRun::plain("z{w")]
        );
    }

    #[test]
    fn empty_braces_are_literal() {
        assert_eq!(parse_bold_runs("a{}b"), vec![BoldRun::plain("a{}b")]);
    }

    #[test]
    fn empty_line_has_no_runs() {
        assert!(parse_bold_runs("").is_empty());
        assert_eq!(render_bold_line(""), "");
    }

    #[test]
    fn renders_escaped_runs_inside_tspans() {
        assert_eq!(
            render_bold_line("Hello {<World>} & co"),
            "Hello <tspan font-weight=\"700\">&lt;World&gt;</tspan> &amp; co"
        );
    }

    #[test]
    fn runs_partition_the_line() {
        let line = "x{yy}z {q} end";
        let joined: String = parse_bold_runs(line)
            .iter()
            .map(|run| run.text.as_str())
            .collect();
        assert_eq!(joined, "xyyz q end");
    }
}
