use crate::background::BackgroundScene;
use crate::render::RenderedCard;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump<'a> {
    pub width: f32,
    pub height: f32,
    pub start_y: f32,
    pub block_height: f32,
    pub font_size: f32,
    pub line_advance: f32,
    pub anchor: &'static str,
    pub x: f32,
    pub lines: Vec<LineDump>,
    pub background: BackgroundSummary,
    pub scene: &'a BackgroundScene,
}

#[derive(Debug, Serialize)]
pub struct LineDump {
    pub y: f32,
    pub text: String,
    pub bold_runs: usize,
}

/// Element counts per background, handy for eyeballing a render without the SVG.
#[derive(Debug, Serialize)]
pub struct BackgroundSummary {
    pub kind: &'static str,
    pub paths: usize,
    pub stars: usize,
    pub meteors: usize,
    pub streams: usize,
    pub glyphs: usize,
}

impl BackgroundSummary {
    pub fn from_scene(scene: &BackgroundScene) -> Self {
        let mut summary = BackgroundSummary {
            kind: "solid",
            paths: 0,
            stars: 0,
            meteors: 0,
            streams: 0,
            glyphs: 0,
        };
        match scene {
            BackgroundScene::Solid { .. } => {}
            BackgroundScene::Maze(maze) => {
                summary.kind = "maze";
                summary.paths = maze.paths.len();
            }
            BackgroundScene::Stars(stars) => {
                summary.kind = "stars";
                summary.stars =
                    stars.band_stars.len() + stars.ambient_stars.len() + stars.bright_stars.len();
                summary.meteors = stars.meteors.len();
            }
            BackgroundScene::Matrix(matrix) => {
                summary.kind = "matrix";
                summary.streams = matrix.streams.len();
                summary.glyphs = matrix.streams.iter().map(|s| s.glyphs.len()).sum();
            }
            BackgroundScene::Image(_) => summary.kind = "image",
        }
        summary
    }
}

impl<'a> LayoutDump<'a> {
    pub fn from_card(card: &'a RenderedCard) -> Self {
        let layout = &card.layout;
        let lines = layout
            .lines
            .iter()
            .map(|line| LineDump {
                y: line.y,
                text: line.runs.iter().map(|run| run.text.as_str()).collect(),
                bold_runs: line.runs.iter().filter(|run| run.bold).count(),
            })
            .collect();

        LayoutDump {
            width: card.width,
            height: card.height,
            start_y: layout.geometry.start_y,
            block_height: layout.geometry.block_height,
            font_size: layout.font_size,
            line_advance: layout.line_advance,
            anchor: layout.anchor,
            x: layout.x,
            lines,
            background: BackgroundSummary::from_scene(&card.background),
            scene: &card.background,
        }
    }
}

pub fn write_layout_dump(path: &Path, card: &RenderedCard) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_card(card);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
