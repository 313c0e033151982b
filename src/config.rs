use crate::ir::{Align, BackgroundStyle};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SVG_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, s-maxage=31536000, immutable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextEmission {
    /// One `<text>` per line with an absolute `y`.
    #[default]
    PerLine,
    /// One `<text>` with a `<tspan dy>` per line.
    Stacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundMode {
    #[default]
    Procedural,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub padding_x: f32,
    pub padding_y: f32,
    pub line_height: f32,
    pub baseline_offset: f32,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub emission: TextEmission,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding_x: 40.0,
            padding_y: 60.0,
            line_height: 1.6,
            baseline_offset: 0.8,
            min_font_size: 10,
            max_font_size: 120,
            emission: TextEmission::PerLine,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub background_mode: BackgroundMode,
    pub cache_control: String,
    pub default_text: String,
    pub default_text_color: String,
    pub default_font_size: u32,
    pub default_align: Align,
    pub default_background: BackgroundStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            background_mode: BackgroundMode::Procedural,
            cache_control: SVG_CACHE_CONTROL.to_string(),
            default_text: "Dynamic {SVG} text card|Special Chars: < & >".to_string(),
            default_text_color: "#ffffff".to_string(),
            default_font_size: 16,
            default_align: Align::Left,
            default_background: BackgroundStyle::Default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory the library paths are resolved against when preloading.
    pub root: Option<PathBuf>,
    /// When set, assets are referenced by URL instead of being inlined.
    pub base_url: Option<String>,
    pub library: BTreeMap<String, String>,
    pub cache_control: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        let mut library = BTreeMap::new();
        library.insert("default".to_string(), "images/background.jpg".to_string());
        library.insert("stars".to_string(), "images/background.jpg".to_string());
        library.insert("matrix".to_string(), "images/matrix.jpg".to_string());
        Self {
            root: None,
            base_url: None,
            library,
            cache_control: ASSET_CACHE_CONTROL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub assets: AssetConfig,
}

impl Config {
    /// Preset matching the image-backed deployment: 1200px wide, photo
    /// backdrop, stacked tspans and a thin outline.
    pub fn image_card() -> Self {
        let mut config = Self::default();
        config.theme = Theme::image_card();
        config.render.width = 1200.0;
        config.render.background_mode = BackgroundMode::Image;
        config.layout.emission = TextEmission::Stacked;
        config
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    text_stroke: Option<String>,
    text_stroke_width: Option<NumberOrString>,
    text_stroke_linejoin: Option<String>,
    solid_background: Option<String>,
    error_background: Option<String>,
    error_text_color: Option<String>,
    error_font_family: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    padding_x: Option<f32>,
    padding_y: Option<f32>,
    line_height: Option<f32>,
    baseline_offset: Option<f32>,
    min_font_size: Option<u32>,
    max_font_size: Option<u32>,
    emission: Option<TextEmission>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    background_mode: Option<BackgroundMode>,
    cache_control: Option<String>,
    default_text: Option<String>,
    default_text_color: Option<String>,
    default_font_size: Option<u32>,
    default_align: Option<String>,
    default_background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AssetConfigFile {
    root: Option<PathBuf>,
    base_url: Option<String>,
    library: Option<BTreeMap<String, String>>,
    cache_control: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    preset: Option<String>,
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
    assets: Option<AssetConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let mut config = parse_config(&contents)?;
    if let (Some(root), Some(dir)) = (config.assets.root.as_ref(), path.parent()) {
        if root.is_relative() {
            config.assets.root = Some(dir.join(root));
        }
    }
    Ok(config)
}

/// Parses a config document. Strict JSON first, JSON5 for hand-written files.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config: {json_err} (json5: {json5_err})")
        })?,
    };
    Ok(apply_config_file(parsed))
}

fn apply_config_file(parsed: ConfigFile) -> Config {
    let mut config = match parsed.preset.as_deref() {
        Some("image") | Some("imageCard") => Config::image_card(),
        _ => Config::default(),
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "image" || theme_name == "thin" {
            config.theme = Theme::image_card();
        } else if theme_name == "default" || theme_name == "card" {
            config.theme = Theme::card_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.text_stroke {
            config.theme.text_stroke = v;
        }
        if let Some(v) = vars.text_stroke_width.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.text_stroke_width = v;
        }
        if let Some(v) = vars.text_stroke_linejoin {
            config.theme.text_stroke_linejoin = v;
        }
        if let Some(v) = vars.solid_background {
            config.theme.solid_background = v;
        }
        if let Some(v) = vars.error_background {
            config.theme.error_background = v;
        }
        if let Some(v) = vars.error_text_color {
            config.theme.error_text_color = v;
        }
        if let Some(v) = vars.error_font_family {
            config.theme.error_font_family = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.padding_x {
            config.layout.padding_x = v;
        }
        if let Some(v) = layout.padding_y {
            config.layout.padding_y = v;
        }
        if let Some(v) = layout.line_height {
            config.layout.line_height = v;
        }
        if let Some(v) = layout.baseline_offset {
            config.layout.baseline_offset = v;
        }
        if let Some(v) = layout.min_font_size {
            config.layout.min_font_size = v;
        }
        if let Some(v) = layout.max_font_size {
            config.layout.max_font_size = v;
        }
        if let Some(v) = layout.emission {
            config.layout.emission = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.background_mode {
            config.render.background_mode = v;
        }
        if let Some(v) = render.cache_control {
            config.render.cache_control = v;
        }
        if let Some(v) = render.default_text {
            config.render.default_text = v;
        }
        if let Some(v) = render.default_text_color {
            config.render.default_text_color = v;
        }
        if let Some(v) = render.default_font_size {
            config.render.default_font_size = v;
        }
        if let Some(v) = render.default_align {
            config.render.default_align = Align::from_token(&v);
        }
        if let Some(v) = render.default_background {
            config.render.default_background = BackgroundStyle::from_token(&v);
        }
    }

    if let Some(assets) = parsed.assets {
        if let Some(v) = assets.root {
            config.assets.root = Some(v);
        }
        if let Some(v) = assets.base_url {
            config.assets.base_url = Some(v);
        }
        if let Some(v) = assets.library {
            config.assets.library = v;
        }
        if let Some(v) = assets.cache_control {
            config.assets.cache_control = v;
        }
    }

    config
}
