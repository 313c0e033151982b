use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use textcard::config::parse_config;
use textcard::theme::Theme;
use textcard::{Config, RenderParams, RequestDefaults, render};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRenderOptions {
    preset: Option<String>,
    width: Option<f32>,
    font_family: Option<String>,
    seed: Option<u64>,
}

fn build_config(options: &CardRenderOptions) -> Config {
    let mut config = match options.preset.as_deref() {
        Some("image") | Some("imageCard") => {
            // No asset source in the browser: backgrounds stay procedural.
            let mut config = Config::default();
            config.theme = Theme::image_card();
            config.render.width = 1200.0;
            config
        }
        _ => Config::default(),
    };
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(font_family) = &options.font_family {
        config.theme.font_family = font_family.clone();
    }
    config
}

#[wasm_bindgen]
pub fn render_text_card_svg(query: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<CardRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        CardRenderOptions::default()
    };

    let config = build_config(&options);
    let request = RenderParams::from_query(query, &RequestDefaults::from_config(&config));
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    render(&request, &config, &mut rng)
        .map(|(svg, _height)| svg)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Validates a full config document without rendering.
#[wasm_bindgen]
pub fn validate_text_card_config(config_json: &str) -> Result<(), JsValue> {
    parse_config(config_json)
        .map(|_| ())
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use textcard::{RenderParams, RequestDefaults, render};

    use crate::{CardRenderOptions, build_config};

    #[test]
    fn renders_query_with_options() {
        let options: CardRenderOptions =
            serde_json::from_str(r#"{"preset":"image","fontFamily":"serif","seed":3}"#).unwrap();
        let config = build_config(&options);
        let request = RenderParams::from_query(
            "text=Hello+%7BWorld%7D&bg=stars",
            &RequestDefaults::from_config(&config),
        );
        let (svg, height) = render(&request, &config, &mut StdRng::seed_from_u64(3))
            .expect("starfield card should render");

        assert!(svg.contains("<svg width=\"1200\""));
        assert!(svg.contains("font-family=\"serif\""));
        assert!(svg.contains("stroke-width=\"1px\""));
        assert_eq!(height, 136);
    }
}
