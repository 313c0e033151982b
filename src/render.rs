use crate::assets::{AssetSource, require_asset};
use crate::background::{BackgroundScene, ImageBackdrop, compute_background, render_background};
use crate::config::{BackgroundMode, Config, TextEmission};
use crate::error::{RenderError, RenderResult};
use crate::escape::escape_attr;
use crate::ir::RenderRequest;
use crate::layout::{TextLayout, compute_text_layout};
use crate::markup::render_runs;
use crate::theme::Theme;
use anyhow::Result;
use rand::Rng;
use std::path::Path;
use tracing::{debug_span, trace};

#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub svg: String,
    pub width: f32,
    pub height: f32,
    pub layout: TextLayout,
    pub background: BackgroundScene,
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub fn fmt_num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut out = format!("{value:.2}");
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}

fn validate(config: &Config) -> RenderResult<()> {
    let width = config.render.width;
    if !width.is_finite() || width <= 0.0 {
        return Err(RenderError::InvalidInput(format!(
            "canvas width must be positive, got {width}"
        )));
    }
    if config.layout.min_font_size > config.layout.max_font_size {
        return Err(RenderError::InvalidInput(format!(
            "font size range {}..{} is inverted",
            config.layout.min_font_size, config.layout.max_font_size
        )));
    }
    Ok(())
}

/// Lays out the text, builds the backdrop sized to it, and composes the card.
pub fn render_document<R: Rng + ?Sized>(
    request: &RenderRequest,
    config: &Config,
    assets: &dyn AssetSource,
    rng: &mut R,
) -> RenderResult<RenderedCard> {
    validate(config)?;
    let span = debug_span!(
        "render_card",
        bg = request.background.as_str(),
        font_size = request.font_size
    );
    let _guard = span.enter();

    let font_size = RenderRequest::clamp_font_size(
        i64::from(request.font_size),
        config.layout.min_font_size,
        config.layout.max_font_size,
    );
    let width = config.render.width;
    let layout = compute_text_layout(
        &request.text,
        font_size,
        request.align,
        &config.layout,
        width,
    );
    let height = layout.geometry.height;

    let background = match config.render.background_mode {
        BackgroundMode::Procedural => compute_background(
            request.background,
            width,
            height,
            &config.theme.solid_background,
            rng,
        ),
        BackgroundMode::Image => {
            let asset = require_asset(assets, request.background.as_str())?;
            BackgroundScene::Image(ImageBackdrop {
                href: asset.href(),
                width,
                height,
            })
        }
    };
    trace!(lines = layout.lines.len(), height, "computed card layout");

    let background_svg = render_background(&background);
    let text_svg = text_elements_svg(
        &layout,
        &request.text_color,
        &config.theme,
        config.layout.emission,
    );
    let svg = compose_svg(width, height, &request.text, &background_svg, &text_svg);

    Ok(RenderedCard {
        svg,
        width,
        height,
        layout,
        background,
    })
}

pub fn compose_svg(
    width: f32,
    height: f32,
    raw_text: &str,
    background_svg: &str,
    text_svg: &str,
) -> String {
    let svg = format!(
        "\n<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"{}\">\n<style>text {{ white-space: pre; }}</style>\n{background_svg}\n{text_svg}\n</svg>\n",
        fmt_num(width),
        fmt_num(height),
        escape_attr(raw_text)
    );
    svg.trim().to_string()
}

pub fn text_elements_svg(
    layout: &TextLayout,
    text_color: &str,
    theme: &Theme,
    emission: TextEmission,
) -> String {
    let fill = escape_attr(text_color);
    let x = fmt_num(layout.x);
    let stroke = format!(
        "paint-order=\"stroke\" stroke=\"{}\" stroke-width=\"{}px\" stroke-linejoin=\"{}\"",
        escape_attr(&theme.text_stroke),
        fmt_num(theme.text_stroke_width),
        escape_attr(&theme.text_stroke_linejoin)
    );
    let font = format!(
        "font-family=\"{}\" font-size=\"{}px\"",
        escape_attr(&theme.font_family),
        fmt_num(layout.font_size)
    );

    let mut svg = String::new();
    match emission {
        TextEmission::PerLine => {
            for line in &layout.lines {
                svg.push_str(&format!(
                    "<text x=\"{x}\" y=\"{}\" {font} fill=\"{fill}\" text-anchor=\"{}\" {stroke}>{}</text>",
                    fmt_num(line.y),
                    layout.anchor,
                    render_runs(&line.runs)
                ));
            }
        }
        TextEmission::Stacked => {
            svg.push_str(&format!(
                "<text y=\"{}\" {font} fill=\"{fill}\" text-anchor=\"{}\" {stroke}>",
                fmt_num(layout.geometry.start_y),
                layout.anchor
            ));
            for (idx, line) in layout.lines.iter().enumerate() {
                let dy = if idx == 0 {
                    "0".to_string()
                } else {
                    fmt_num(layout.line_advance)
                };
                svg.push_str(&format!(
                    "<tspan x=\"{x}\" dy=\"{dy}\">{}</tspan>",
                    render_runs(&line.runs)
                ));
            }
            svg.push_str("</text>");
        }
    }
    svg
}

/// Always-renderable card shown in place of a failed render.
pub fn error_svg(message: &str, theme: &Theme) -> String {
    format!(
        "<svg width=\"400\" height=\"200\" xmlns=\"http://www.w3.org/2000/svg\"><rect width=\"100%\" height=\"100%\" fill=\"{}\" /><text x=\"10\" y=\"50%\" font-family=\"{}\" font-size=\"16\" fill=\"{}\" dominant-baseline=\"middle\">Error: {}</text></svg>",
        theme.error_background,
        theme.error_font_family,
        theme.error_text_color,
        escape_attr(message)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}
