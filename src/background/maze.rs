//! Neon maze backdrop.
//!
//! The circuit topology is fixed on an 800x600 reference grid and stretched to
//! the canvas. Every polyline is drawn twice: a wide glowing purple pass and a
//! thin white core on top of it.

use crate::render::fmt_num;
use serde::Serialize;

const REFERENCE_WIDTH: f32 = 800.0;
const REFERENCE_HEIGHT: f32 = 600.0;

pub const OUTER_MIN_WIDTH: f32 = 3.0;
pub const CORE_MIN_WIDTH: f32 = 0.5;

const BASE_FILL: &str = "#000008";
const OUTER_STROKE: &str = "#cc77ff";
const CORE_STROKE: &str = "#ffffff";

const OUTER_WIDTHS: [f32; 32] = [
    7.0, 6.0, 8.0, 6.0, 5.0, 7.0, 6.0, 8.0, 7.0, 6.0, 5.0, 6.0, 7.0, 5.0, 4.0, 5.0, 6.0, 4.0, 5.0,
    6.0, 4.0, 5.0, 4.0, 3.0, 4.0, 3.0, 4.0, 5.0, 8.0, 6.0, 4.0, 3.0,
];

const CORE_WIDTHS: [f32; 32] = [
    2.0, 1.5, 2.0, 1.5, 1.0, 2.0, 1.5, 2.0, 2.0, 1.5, 1.0, 1.5, 2.0, 1.0, 1.0, 1.0, 1.5, 1.0, 1.0,
    1.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.5, 2.0, 1.5, 1.0, 1.0,
];

pub const MAZE_REFERENCE_PATHS: &[&[(f32, f32)]] = &[
    &[
        (40.0, 120.0),
        (180.0, 120.0),
        (180.0, 80.0),
        (280.0, 80.0),
        (280.0, 160.0),
        (200.0, 160.0),
        (200.0, 200.0),
        (120.0, 200.0),
        (120.0, 280.0),
    ],
    &[(280.0, 80.0), (380.0, 80.0), (380.0, 40.0)],
    &[
        (380.0, 120.0),
        (480.0, 120.0),
        (480.0, 200.0),
        (420.0, 200.0),
        (420.0, 280.0),
        (360.0, 280.0),
        (360.0, 240.0),
    ],
    &[
        (480.0, 120.0),
        (580.0, 120.0),
        (580.0, 80.0),
        (680.0, 80.0),
        (680.0, 160.0),
        (620.0, 160.0),
        (620.0, 240.0),
    ],
    &[(680.0, 80.0), (760.0, 80.0)],
    &[
        (120.0, 280.0),
        (240.0, 280.0),
        (240.0, 360.0),
        (160.0, 360.0),
        (160.0, 440.0),
        (280.0, 440.0),
        (280.0, 320.0),
        (360.0, 320.0),
    ],
    &[
        (360.0, 240.0),
        (360.0, 320.0),
        (420.0, 320.0),
        (420.0, 360.0),
        (500.0, 360.0),
        (500.0, 280.0),
        (580.0, 280.0),
        (580.0, 240.0),
    ],
    &[
        (580.0, 240.0),
        (620.0, 240.0),
        (620.0, 320.0),
        (680.0, 320.0),
        (680.0, 280.0),
        (760.0, 280.0),
    ],
    &[
        (160.0, 440.0),
        (160.0, 520.0),
        (240.0, 520.0),
        (240.0, 480.0),
        (320.0, 480.0),
        (320.0, 520.0),
        (400.0, 520.0),
        (400.0, 440.0),
    ],
    &[
        (400.0, 440.0),
        (480.0, 440.0),
        (480.0, 400.0),
        (560.0, 400.0),
        (560.0, 480.0),
        (640.0, 480.0),
        (640.0, 440.0),
        (720.0, 440.0),
        (720.0, 520.0),
    ],
    &[(200.0, 200.0), (200.0, 280.0)],
    &[(420.0, 280.0), (420.0, 200.0)],
    &[(500.0, 360.0), (500.0, 440.0), (400.0, 440.0)],
    &[(680.0, 320.0), (680.0, 400.0), (640.0, 400.0), (640.0, 440.0)],
    &[
        (240.0, 360.0),
        (320.0, 360.0),
        (320.0, 400.0),
        (280.0, 400.0),
        (280.0, 440.0),
    ],
    &[(360.0, 320.0), (360.0, 400.0), (320.0, 400.0)],
    &[(580.0, 280.0), (580.0, 320.0)],
    &[(500.0, 200.0), (540.0, 200.0), (540.0, 160.0), (580.0, 160.0)],
    &[(120.0, 200.0), (160.0, 200.0), (160.0, 240.0), (200.0, 240.0)],
    &[
        (40.0, 320.0),
        (80.0, 320.0),
        (80.0, 400.0),
        (120.0, 400.0),
        (120.0, 360.0),
    ],
    &[(240.0, 280.0), (280.0, 280.0)],
    &[(420.0, 360.0), (420.0, 400.0), (480.0, 400.0)],
    &[(620.0, 320.0), (620.0, 360.0), (580.0, 360.0)],
    &[(340.0, 240.0), (340.0, 280.0)],
    &[(460.0, 280.0), (460.0, 320.0)],
    &[(200.0, 240.0), (240.0, 240.0)],
    &[(320.0, 320.0), (340.0, 320.0)],
    // frame
    &[(20.0, 40.0), (20.0, 560.0)],
    &[(780.0, 100.0), (780.0, 500.0)],
    &[(40.0, 40.0), (760.0, 40.0)],
    &[(160.0, 560.0), (640.0, 560.0)],
];

const MAZE_DEFS: &str = concat!(
    "<defs>",
    "<filter id=\"neonGlow\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">",
    "<feGaussianBlur stdDeviation=\"3\" result=\"coloredBlur\"/>",
    "<feMerge><feMergeNode in=\"coloredBlur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>",
    "</filter>",
    "<filter id=\"strongGlow\" x=\"-100%\" y=\"-100%\" width=\"300%\" height=\"300%\">",
    "<feGaussianBlur stdDeviation=\"6\" result=\"bigBlur\"/>",
    "<feGaussianBlur stdDeviation=\"2\" result=\"smallBlur\"/>",
    "<feMerge><feMergeNode in=\"bigBlur\"/><feMergeNode in=\"smallBlur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>",
    "</filter>",
    "</defs>",
);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MazePath {
    pub points: Vec<(f32, f32)>,
    pub outer_width: f32,
    pub core_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MazeScene {
    pub width: f32,
    pub height: f32,
    pub paths: Vec<MazePath>,
}

pub fn compute_maze(width: f32, height: f32) -> MazeScene {
    let scale_x = width / REFERENCE_WIDTH;
    let scale_y = height / REFERENCE_HEIGHT;
    let stroke_scale = width.min(height) / REFERENCE_WIDTH;

    let paths = MAZE_REFERENCE_PATHS
        .iter()
        .enumerate()
        .map(|(idx, reference)| MazePath {
            points: reference
                .iter()
                .map(|(x, y)| (x * scale_x, y * scale_y))
                .collect(),
            outer_width: (OUTER_WIDTHS[idx % OUTER_WIDTHS.len()] * stroke_scale)
                .max(OUTER_MIN_WIDTH),
            core_width: (CORE_WIDTHS[idx % CORE_WIDTHS.len()] * stroke_scale).max(CORE_MIN_WIDTH),
        })
        .collect();

    MazeScene {
        width,
        height,
        paths,
    }
}

pub fn render_maze(scene: &MazeScene) -> String {
    let mut svg = format!(
        "<rect width=\"{}\" height=\"{}\" fill=\"{BASE_FILL}\" />",
        fmt_num(scene.width),
        fmt_num(scene.height)
    );
    svg.push_str(MAZE_DEFS);

    svg.push_str(&format!(
        "<g stroke=\"{OUTER_STROKE}\" fill=\"none\" filter=\"url(#strongGlow)\">"
    ));
    for path in &scene.paths {
        push_path(&mut svg, &path.points, path.outer_width);
    }
    svg.push_str("</g>");

    svg.push_str(&format!(
        "<g stroke=\"{CORE_STROKE}\" fill=\"none\" filter=\"url(#neonGlow)\" opacity=\"0.9\">"
    ));
    for path in &scene.paths {
        push_path(&mut svg, &path.points, path.core_width);
    }
    svg.push_str("</g>");
    svg
}

fn push_path(svg: &mut String, points: &[(f32, f32)], stroke_width: f32) {
    svg.push_str(&format!(
        "<path d=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\" />",
        polyline_data(points),
        fmt_num(stroke_width)
    ));
}

fn polyline_data(points: &[(f32, f32)]) -> String {
    let mut d = String::new();
    for (idx, (x, y)) in points.iter().enumerate() {
        if idx > 0 {
            d.push(' ');
        }
        d.push(if idx == 0 { 'M' } else { 'L' });
        d.push_str(&fmt_num(*x));
        d.push(' ');
        d.push_str(&fmt_num(*y));
    }
    d
}
