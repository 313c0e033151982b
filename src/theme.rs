use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub text_stroke: String,
    pub text_stroke_width: f32,
    pub text_stroke_linejoin: String,
    pub solid_background: String,
    pub error_background: String,
    pub error_text_color: String,
    pub error_font_family: String,
}

impl Theme {
    pub fn card_default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            text_stroke: "#000000".to_string(),
            text_stroke_width: 2.0,
            text_stroke_linejoin: "round".to_string(),
            solid_background: "#000000".to_string(),
            error_background: "#f8d7da".to_string(),
            error_text_color: "#721c24".to_string(),
            error_font_family: "monospace".to_string(),
        }
    }

    /// Thin outline used by the image-backed cards.
    pub fn image_card() -> Self {
        Self {
            text_stroke_width: 1.0,
            ..Self::card_default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::card_default()
    }
}
