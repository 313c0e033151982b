//! Platform-neutral request handling.
//!
//! Serverless adapters translate their native request into a query string and
//! copy [`HttpResponse`] back out; nothing here depends on a runtime.

use crate::assets::{AssetSource, FALLBACK_KEY};
use crate::config::{Config, RenderConfig};
use crate::error::RenderResult;
use crate::ir::{Align, BackgroundStyle, RenderRequest};
use crate::render::{RenderedCard, error_svg, render_document};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub text: String,
    pub text_color: String,
    pub font_size: u32,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub align: Align,
    pub background: BackgroundStyle,
}

impl RequestDefaults {
    pub fn from_config(config: &Config) -> Self {
        let render: &RenderConfig = &config.render;
        Self {
            text: render.default_text.clone(),
            text_color: render.default_text_color.clone(),
            font_size: render.default_font_size,
            min_font_size: config.layout.min_font_size,
            max_font_size: config.layout.max_font_size,
            align: render.default_align,
            background: render.default_background,
        }
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Raw, still-untrusted query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderParams {
    pub text: Option<String>,
    pub text_color: Option<String>,
    pub font_size: Option<String>,
    pub align: Option<String>,
    pub bg: Option<String>,
}

impl RenderParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "text" => params.text = Some(value),
                "textColor" => params.text_color = Some(value),
                "fontSize" => params.font_size = Some(value),
                "align" => params.align = Some(value),
                "bg" => params.bg = Some(value),
                _ => {}
            }
        }
        params
    }

    pub fn from_query(query: &str, defaults: &RequestDefaults) -> RenderRequest {
        Self::parse(query).resolve(defaults)
    }

    /// Layers `other` on top of `self`; whatever `other` sets wins.
    pub fn merge(self, other: RenderParams) -> RenderParams {
        RenderParams {
            text: other.text.or(self.text),
            text_color: other.text_color.or(self.text_color),
            font_size: other.font_size.or(self.font_size),
            align: other.align.or(self.align),
            bg: other.bg.or(self.bg),
        }
    }

    /// Fills gaps with defaults. Never fails: empty or garbled values fall
    /// back, the font size is clamped.
    pub fn resolve(self, defaults: &RequestDefaults) -> RenderRequest {
        let text = non_empty(self.text).unwrap_or_else(|| defaults.text.clone());
        let text_color = non_empty(self.text_color).unwrap_or_else(|| defaults.text_color.clone());

        let requested = self
            .font_size
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|size| *size != 0);
        if requested.is_none() && self.font_size.is_some() {
            debug!(font_size = ?self.font_size, "unusable fontSize, using default");
        }
        let font_size = RenderRequest::clamp_font_size(
            requested.unwrap_or(i64::from(defaults.font_size)),
            defaults.min_font_size,
            defaults.max_font_size,
        );

        let align = match non_empty(self.align) {
            Some(token) => {
                let align = Align::from_token(&token);
                if align.as_str() != token.trim() {
                    debug!(align = %token, "unknown align, using left");
                }
                align
            }
            None => defaults.align,
        };
        let background = match non_empty(self.bg) {
            Some(token) => {
                let style = BackgroundStyle::from_token(&token);
                if style == BackgroundStyle::Default && token.trim() != "default" {
                    debug!(bg = %token, "unknown background style, using default");
                }
                style
            }
            None => defaults.background,
        };

        RenderRequest {
            text,
            text_color,
            font_size,
            align,
            background,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Integer prefix of `input`: leading whitespace and an optional sign are
/// accepted, parsing stops at the first non-digit (`"24px"` is 24).
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl HttpResponse {
    fn new(status_code: u16, content_type: &str, body: String) -> Self {
        Self {
            status_code,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
            is_base64_encoded: false,
        }
    }

    fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Renders a card for a query string. Failures become the fallback card with a 500.
pub fn handle_query<R: Rng + ?Sized>(
    query: &str,
    config: &Config,
    assets: &dyn AssetSource,
    rng: &mut R,
) -> HttpResponse {
    let request = RenderParams::from_query(query, &RequestDefaults::from_config(config));
    handle_request(&request, config, assets, rng)
}

pub fn handle_request<R: Rng + ?Sized>(
    request: &RenderRequest,
    config: &Config,
    assets: &dyn AssetSource,
    rng: &mut R,
) -> HttpResponse {
    respond(render_document(request, config, assets, rng), config)
}

/// Shapes a render outcome into the response a serverless platform expects.
pub fn respond(result: RenderResult<RenderedCard>, config: &Config) -> HttpResponse {
    match result {
        Ok(card) => HttpResponse::new(200, SVG_CONTENT_TYPE, card.svg)
            .with_header("Cache-Control", &config.render.cache_control),
        Err(err) => {
            warn!(error = %err, "card render failed, serving fallback");
            HttpResponse::new(500, SVG_CONTENT_TYPE, error_svg(&err.to_string(), &config.theme))
        }
    }
}

/// Serves a raw background asset, Base64-encoded for serverless transports.
pub fn handle_asset(key: &str, config: &Config, assets: &dyn AssetSource) -> HttpResponse {
    let key = if key.is_empty() { FALLBACK_KEY } else { key };
    let Some(asset) = assets.lookup_or_default(key) else {
        warn!(key, "background asset missing");
        return HttpResponse::new(500, "text/plain", format!("background asset not found: {key}"));
    };
    match asset.base64_body() {
        Some(body) => {
            let mut response = HttpResponse::new(200, asset.mime_type, body)
                .with_header("Cache-Control", &config.assets.cache_control);
            response.is_base64_encoded = true;
            response
        }
        None => HttpResponse::new(302, "text/plain", String::new())
            .with_header("Location", &asset.href()),
    }
}
