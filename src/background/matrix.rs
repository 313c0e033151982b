use super::unit;
use crate::escape::escape_text;
use crate::render::fmt_num;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::Serialize;

pub const GLYPH_SIZE: f32 = 18.0;
const COLUMN_PITCH_RATIO: f32 = 0.9;
const SKIP_COLUMN_PROBABILITY: f32 = 0.1;
const MIN_STREAM_LENGTH: usize = 10;
const GLYPH_FILL: &str = "#00e030";

const KATAKANA: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノ";
const HANGUL: &str = "가나다라마바사아자차카타파하";
const SYMBOLS: &str = "-=/<>+*&%$#@!";

// Latin letters dominate the draw; digits are doubled.
static GLYPH_POOL: Lazy<Vec<char>> = Lazy::new(|| {
    let mut pool = Vec::new();
    for _ in 0..5 {
        pool.extend('A'..='Z');
    }
    for _ in 0..2 {
        pool.extend('0'..='9');
    }
    pool.extend(KATAKANA.chars());
    pool.extend(HANGUL.chars());
    pool.extend(SYMBOLS.chars());
    pool
});

pub fn glyph_pool() -> &'static [char] {
    &GLYPH_POOL
}

pub fn column_pitch() -> f32 {
    GLYPH_SIZE * COLUMN_PITCH_RATIO
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glyph {
    pub ch: char,
    /// Position within the stream; drives the opacity ramp.
    pub index: usize,
    pub y: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphStream {
    pub column: usize,
    pub x: f32,
    pub start_y: f32,
    pub length: usize,
    /// Only the glyphs that land on the canvas.
    pub glyphs: Vec<Glyph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixScene {
    pub width: f32,
    pub height: f32,
    pub columns: usize,
    pub streams: Vec<GlyphStream>,
}

pub fn compute_matrix<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> MatrixScene {
    let pitch = column_pitch();
    let columns = (width / pitch).floor().max(0.0) as usize;
    let pool = glyph_pool();
    let mut streams = Vec::new();

    for column in 0..columns {
        if unit(rng) < SKIP_COLUMN_PROBABILITY {
            continue;
        }
        let x = column as f32 * pitch + (unit(rng) - 0.5) * pitch;
        let start_y = unit(rng) * height * 1.5 - height * 0.5;
        let length =
            (unit(rng) * (height / GLYPH_SIZE * 0.8)).floor() as usize + MIN_STREAM_LENGTH;

        let mut glyphs = Vec::new();
        for index in 0..length {
            let y = start_y + index as f32 * GLYPH_SIZE;
            if y < 0.0 || y > height {
                continue;
            }
            let ch = pool[rng.gen_range(0..pool.len())];
            glyphs.push(Glyph {
                ch,
                index,
                y,
                opacity: stream_opacity(index, length),
            });
        }

        if !glyphs.is_empty() {
            streams.push(GlyphStream {
                column,
                x,
                start_y,
                length,
                glyphs,
            });
        }
    }

    MatrixScene {
        width,
        height,
        columns,
        streams,
    }
}

/// Ramp from 0.1 at the head of the stream towards 1.0 at its tail,
/// measured against the full stream length even when rows are clipped.
pub fn stream_opacity(index: usize, length: usize) -> f32 {
    0.1 + (index as f32 / length.max(1) as f32) * 0.9
}

pub fn render_matrix(scene: &MatrixScene) -> String {
    let mut svg = String::from(
        "<defs><filter id=\"matrixGlow\"><feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"1.0\" result=\"blur\" /></filter></defs>",
    );
    svg.push_str(&format!(
        "<rect width=\"{}\" height=\"{}\" fill=\"#000000\" />",
        fmt_num(scene.width),
        fmt_num(scene.height)
    ));

    for stream in &scene.streams {
        let x = fmt_num(stream.x);
        svg.push_str(&format!(
            "<text font-family=\"monospace\" font-size=\"{}px\" filter=\"url(#matrixGlow)\">",
            fmt_num(GLYPH_SIZE)
        ));
        for glyph in &stream.glyphs {
            let mut buf = [0u8; 4];
            svg.push_str(&format!(
                "<tspan x=\"{x}\" y=\"{}\" fill=\"{GLYPH_FILL}\" opacity=\"{}\">{}</tspan>",
                fmt_num(glyph.y),
                fmt_num(glyph.opacity),
                escape_text(glyph.ch.encode_utf8(&mut buf))
            ));
        }
        svg.push_str("</text>");
    }
    svg
}
