use crate::config::LayoutConfig;
use crate::ir::Align;
use crate::markup::{BoldRun, parse_bold_runs};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasGeometry {
    pub width: f32,
    pub height: f32,
    /// Baseline of the first line.
    pub start_y: f32,
    pub block_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLayout {
    pub y: f32,
    pub runs: Vec<BoldRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayout {
    pub geometry: CanvasGeometry,
    pub font_size: f32,
    pub line_advance: f32,
    pub anchor: &'static str,
    pub x: f32,
    pub lines: Vec<LineLayout>,
}

/// Splits on `|`. An empty string is one empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('|').collect()
}

pub fn text_block_height(line_count: usize, font_size: f32, config: &LayoutConfig) -> f32 {
    let extra_lines = line_count.max(1) - 1;
    extra_lines as f32 * (config.line_height * font_size) + font_size
}

pub fn canvas_height(line_count: usize, font_size: f32, config: &LayoutConfig) -> f32 {
    (text_block_height(line_count, font_size, config) + config.padding_y * 2.0).round()
}

pub fn compute_geometry(
    line_count: usize,
    font_size: f32,
    config: &LayoutConfig,
    canvas_width: f32,
) -> CanvasGeometry {
    let block_height = text_block_height(line_count, font_size, config);
    let height = canvas_height(line_count, font_size, config);
    let start_y = (height / 2.0 - block_height / 2.0 + font_size * config.baseline_offset).round();
    CanvasGeometry {
        width: canvas_width,
        height,
        start_y,
        block_height,
    }
}

pub fn anchor_x(align: Align, config: &LayoutConfig, canvas_width: f32) -> f32 {
    match align {
        Align::Left => config.padding_x,
        Align::Center => canvas_width / 2.0,
        Align::Right => canvas_width - config.padding_x,
    }
}

pub fn compute_text_layout(
    text: &str,
    font_size: u32,
    align: Align,
    config: &LayoutConfig,
    canvas_width: f32,
) -> TextLayout {
    let raw_lines = split_lines(text);
    let font_size = font_size as f32;
    let geometry = compute_geometry(raw_lines.len(), font_size, config, canvas_width);
    let line_advance = config.line_height * font_size;
    let lines = raw_lines
        .iter()
        .enumerate()
        .map(|(idx, line)| LineLayout {
            y: geometry.start_y + idx as f32 * line_advance,
            runs: parse_bold_runs(line),
        })
        .collect();

    TextLayout {
        geometry,
        font_size,
        line_advance,
        anchor: align.text_anchor(),
        x: anchor_x(align, config, canvas_width),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_line() {
        assert_eq!(split_lines(""), vec![""]);
        let layout = compute_text_layout("", 16, Align::Left, &LayoutConfig::default(), 800.0);
        assert_eq!(layout.lines.len(), 1);
        assert!(layout.lines[0].runs.is_empty());
    }

    #[test]
    fn single_line_geometry() {
        let layout = compute_text_layout(
            "Hello {World}",
            20,
            Align::Center,
            &LayoutConfig::default(),
            800.0,
        );
        assert_eq!(layout.geometry.height, 140.0);
        assert_eq!(layout.geometry.block_height, 20.0);
        // round(70 - 10 + 16)
        assert_eq!(layout.geometry.start_y, 76.0);
        assert_eq!(layout.anchor, "middle");
        assert_eq!(layout.x, 400.0);
        assert_eq!(layout.lines[0].runs[1], BoldRun::bold("World"));
    }

    #[test]
    fn multi_line_positions() {
        let config = LayoutConfig::default();
        let layout = compute_text_layout("a|b|c", 10, Align::Right, &config, 800.0);
        // (3 - 1) * 16 + 10 = 42, + 120
        assert_eq!(layout.geometry.height, 162.0);
        assert_eq!(layout.geometry.start_y, (81.0_f32 - 21.0 + 8.0).round());
        assert_eq!(layout.lines[1].y - layout.lines[0].y, 16.0);
        assert_eq!(layout.lines[2].y - layout.lines[0].y, 32.0);
        assert_eq!(layout.anchor, "end");
        assert_eq!(layout.x, 760.0);
    }

    #[test]
    fn left_align_uses_padding() {
        let layout = compute_text_layout("x", 16, Align::Left, &LayoutConfig::default(), 1200.0);
        assert_eq!(layout.x, 40.0);
        assert_eq!(layout.anchor, "start");
    }

    #[test]
    fn height_grows_with_lines_and_size() {
        let config = LayoutConfig::default();
        assert!(canvas_height(2, 16.0, &config) > canvas_height(1, 16.0, &config));
        assert!(canvas_height(2, 17.0, &config) > canvas_height(2, 16.0, &config));
    }
}
