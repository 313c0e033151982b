use crate::assets::asset_source_from_config;
use crate::config::load_config;
use crate::handler::{RenderParams, RequestDefaults, respond};
use crate::ir::Align;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_document, write_output_svg};
use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "textcard", version, about = "Dynamic text-to-SVG card renderer")]
pub struct Args {
    /// Card text. '|' separates lines, {braces} mark bold spans
    #[arg(short = 't', long = "text")]
    pub text: Option<String>,

    /// Text fill color
    #[arg(long = "textColor")]
    pub text_color: Option<String>,

    /// Font size in pixels (clamped to the configured range)
    #[arg(short = 's', long = "fontSize")]
    pub font_size: Option<String>,

    #[arg(short = 'a', long = "align", value_enum)]
    pub align: Option<Align>,

    /// Background style: default, kuro, stars, matrix
    #[arg(short = 'b', long = "bg")]
    pub bg: Option<String>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Raw query string, e.g. 'text=Hi&bg=stars'. Overrides the flags above
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Seed for reproducible backgrounds
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print the HTTP response as JSON instead of the bare SVG
    #[arg(long = "emitResponse")]
    pub emit_response: bool,

    /// Write the computed layout and background scene as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

impl Args {
    fn params(&self) -> RenderParams {
        let flags = RenderParams {
            text: self.text.clone(),
            text_color: self.text_color.clone(),
            font_size: self.font_size.clone(),
            align: self.align.map(|align| align.as_str().to_string()),
            bg: self.bg.clone(),
        };
        match &self.query {
            Some(query) => flags.merge(RenderParams::parse(query)),
            None => flags,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    let assets = asset_source_from_config(&config.assets)?;
    let request = args.params().resolve(&RequestDefaults::from_config(&config));

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let result = render_document(&request, &config, assets.as_ref(), &mut rng);

    if let (Some(path), Ok(card)) = (args.dump_layout.as_deref(), &result) {
        write_layout_dump(path, card)?;
    }

    if args.emit_response {
        let response = respond(result, &config);
        let json = serde_json::to_string_pretty(&response)?;
        return write_output_svg(&json, args.output.as_deref());
    }

    let card = result?;
    write_output_svg(&card.svg, args.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_overrides_flags() {
        let args = Args::parse_from([
            "textcard",
            "--text",
            "flag text",
            "--align",
            "center",
            "--query",
            "text=query+text&bg=stars",
        ]);
        let params = args.params();
        assert_eq!(params.text.as_deref(), Some("query text"));
        assert_eq!(params.align.as_deref(), Some("center"));
        assert_eq!(params.bg.as_deref(), Some("stars"));
    }

    #[test]
    fn flags_resolve_against_defaults() {
        let args = Args::parse_from(["textcard", "--fontSize", "400", "--bg", "kuro"]);
        let request = args.params().resolve(&RequestDefaults::default());
        assert_eq!(request.font_size, 120);
        assert_eq!(request.background, crate::ir::BackgroundStyle::Maze);
        assert_eq!(request.align, Align::Left);
    }
}
