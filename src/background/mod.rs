use crate::ir::BackgroundStyle;
use crate::render::fmt_num;
use rand::Rng;
use serde::Serialize;

mod matrix;
mod maze;
mod stars;

pub use matrix::{
    GLYPH_SIZE, Glyph, GlyphStream, MatrixScene, column_pitch, compute_matrix, glyph_pool,
    render_matrix,
};
pub use maze::{
    CORE_MIN_WIDTH, MAZE_REFERENCE_PATHS, MazePath, MazeScene, OUTER_MIN_WIDTH, compute_maze,
    render_maze,
};
pub use stars::{
    AMBIENT_STAR_COUNT, BAND_CANDIDATES, BRIGHT_STAR_COUNT, GalaxyBand, Meteor, Star,
    StarfieldScene, compute_starfield, render_starfield,
};

/// A photo backdrop referenced by URL or data URI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBackdrop {
    pub href: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackgroundScene {
    Solid { width: f32, height: f32, fill: String },
    Maze(MazeScene),
    Stars(StarfieldScene),
    Matrix(MatrixScene),
    Image(ImageBackdrop),
}

pub fn compute_background<R: Rng + ?Sized>(
    style: BackgroundStyle,
    width: f32,
    height: f32,
    solid_fill: &str,
    rng: &mut R,
) -> BackgroundScene {
    match style {
        BackgroundStyle::Maze => BackgroundScene::Maze(compute_maze(width, height)),
        BackgroundStyle::Stars => BackgroundScene::Stars(compute_starfield(width, height, rng)),
        BackgroundStyle::Matrix => BackgroundScene::Matrix(compute_matrix(width, height, rng)),
        BackgroundStyle::Default => BackgroundScene::Solid {
            width,
            height,
            fill: solid_fill.to_string(),
        },
    }
}

pub fn render_background(scene: &BackgroundScene) -> String {
    match scene {
        BackgroundScene::Solid {
            width,
            height,
            fill,
        } => format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"{}\" />",
            fmt_num(*width),
            fmt_num(*height),
            fill
        ),
        BackgroundScene::Maze(maze) => render_maze(maze),
        BackgroundScene::Stars(stars) => render_starfield(stars),
        BackgroundScene::Matrix(matrix) => render_matrix(matrix),
        BackgroundScene::Image(image) => format!(
            "<image href=\"{}\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\"/>",
            crate::escape::escape_attr(&image.href),
            fmt_num(image.width),
            fmt_num(image.height)
        ),
    }
}

/// Style key, canvas size and random source in; SVG fragment out.
pub fn generate_background<R: Rng + ?Sized>(
    style: BackgroundStyle,
    width: f32,
    height: f32,
    rng: &mut R,
) -> String {
    render_background(&compute_background(style, width, height, "#000000", rng))
}

/// Uniform sample in `[0, 1)`.
pub(crate) fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..1.0)
}
