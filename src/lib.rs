pub mod assets;
pub mod background;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod escape;
pub mod handler;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod markup;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use error::{RenderError, RenderResult};
pub use handler::{HttpResponse, RenderParams, RequestDefaults, handle_asset, handle_query};
pub use ir::{Align, BackgroundStyle, RenderRequest};
pub use render::{RenderedCard, error_svg, render_document};

use rand::Rng;

/// Renders a card with procedural backgrounds only, returning the SVG and its
/// computed height in pixels.
pub fn render<R: Rng + ?Sized>(
    request: &RenderRequest,
    config: &Config,
    rng: &mut R,
) -> RenderResult<(String, u32)> {
    let card = render_document(request, config, &assets::NoAssets, rng)?;
    let height = card.height.round() as u32;
    Ok((card.svg, height))
}

/// Query-string entry point used by thin adapters: parse, render, and fall
/// back to the error card instead of failing.
pub fn render_query<R: Rng + ?Sized>(query: &str, config: &Config, rng: &mut R) -> String {
    handle_query(query, config, &assets::NoAssets, rng).body
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn render_returns_height() {
        let request = RenderRequest::new("Hello {World}").with_font_size(20);
        let (svg, height) =
            render(&request, &Config::default(), &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(height, 140);
        assert!(svg.contains("height=\"140\""));
    }

    #[test]
    fn query_entry_point_never_fails() {
        let mut config = Config::default();
        config.render.width = f32::NAN;
        let svg = render_query("text=x", &config, &mut StdRng::seed_from_u64(0));
        assert!(svg.contains("Error: "));
    }
}
