use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    pub fn text_anchor(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    #[default]
    Default,
    #[serde(alias = "kuro")]
    Maze,
    Stars,
    Matrix,
}

impl BackgroundStyle {
    /// Unknown keys resolve to `Default`; they are never an error.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "kuro" | "maze" => Self::Maze,
            "stars" => Self::Stars,
            "matrix" => Self::Matrix,
            _ => Self::Default,
        }
    }

    /// Key used for asset lookups and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Maze => "kuro",
            Self::Stars => "stars",
            Self::Matrix => "matrix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    /// `|` separates lines, `{...}` marks bold runs.
    pub text: String,
    pub text_color: String,
    pub font_size: u32,
    pub align: Align,
    pub background: BackgroundStyle,
}

impl RenderRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_color: "#ffffff".to_string(),
            font_size: 16,
            align: Align::Left,
            background: BackgroundStyle::Default,
        }
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_background(mut self, background: BackgroundStyle) -> Self {
        self.background = background;
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    pub fn clamp_font_size(value: i64, min: u32, max: u32) -> u32 {
        value.clamp(i64::from(min), i64::from(max)) as u32
    }
}
