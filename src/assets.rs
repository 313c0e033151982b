//! Background image assets.
//!
//! The renderer never touches the filesystem or network itself. Whoever hosts
//! it owns an [`AssetSource`] (usually built once at startup) and passes it in.

use crate::config::AssetConfig;
use crate::error::{RenderError, RenderResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub const FALLBACK_KEY: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetData {
    Url(String),
    Bytes(Arc<[u8]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub mime_type: &'static str,
    pub data: AssetData,
}

impl Asset {
    /// Value for an `<image href>`: URLs pass through, bytes become a data URI.
    pub fn href(&self) -> String {
        match &self.data {
            AssetData::Url(url) => url.clone(),
            AssetData::Bytes(bytes) => {
                format!("data:{};base64,{}", self.mime_type, STANDARD.encode(bytes))
            }
        }
    }

    pub fn base64_body(&self) -> Option<String> {
        match &self.data {
            AssetData::Bytes(bytes) => Some(STANDARD.encode(bytes)),
            AssetData::Url(_) => None,
        }
    }
}

pub trait AssetSource {
    fn lookup(&self, key: &str) -> Option<Asset>;

    /// Looks up `key`, falling back to the `"default"` entry.
    fn lookup_or_default(&self, key: &str) -> Option<Asset> {
        self.lookup(key).or_else(|| self.lookup(FALLBACK_KEY))
    }
}

/// Source for deployments that only render procedural backgrounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn lookup(&self, _key: &str) -> Option<Asset> {
        None
    }
}

/// Points the card at assets served next to it instead of inlining them.
#[derive(Debug, Clone)]
pub struct UrlAssetLibrary {
    pub base_url: String,
    pub entries: BTreeMap<String, String>,
}

impl UrlAssetLibrary {
    pub fn new(base_url: impl Into<String>, entries: BTreeMap<String, String>) -> Self {
        Self {
            base_url: base_url.into(),
            entries,
        }
    }

    pub fn from_config(config: &AssetConfig) -> Option<Self> {
        let base_url = config.base_url.as_ref()?;
        Some(Self::new(base_url.clone(), config.library.clone()))
    }
}

impl AssetSource for UrlAssetLibrary {
    fn lookup(&self, key: &str) -> Option<Asset> {
        let path = self.entries.get(key)?;
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Some(Asset {
            mime_type: mime_type_for(path),
            data: AssetData::Url(url),
        })
    }
}

/// Every library file read once up front; lookups are memory-only.
#[derive(Debug, Clone, Default)]
pub struct PreloadedAssets {
    entries: BTreeMap<String, Asset>,
}

impl PreloadedAssets {
    pub fn load(config: &AssetConfig) -> RenderResult<Self> {
        let root = config.root.as_deref().unwrap_or_else(|| Path::new("."));
        let mut entries = BTreeMap::new();
        for (key, rel) in &config.library {
            let path = root.join(rel);
            let bytes = std::fs::read(&path)?;
            info!(
                key = %key,
                path = %path.display(),
                bytes = bytes.len(),
                "preloaded background asset"
            );
            entries.insert(
                key.clone(),
                Asset {
                    mime_type: mime_type_for(rel),
                    data: AssetData::Bytes(Arc::from(bytes)),
                },
            );
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: impl Into<String>, mime_type: &'static str, bytes: Vec<u8>) {
        self.entries.insert(
            key.into(),
            Asset {
                mime_type,
                data: AssetData::Bytes(Arc::from(bytes)),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetSource for PreloadedAssets {
    fn lookup(&self, key: &str) -> Option<Asset> {
        self.entries.get(key).cloned()
    }
}

/// Builds the source a config describes: URL proxying when `baseUrl` is set,
/// preloaded files when a `root` is set, nothing otherwise.
pub fn asset_source_from_config(
    config: &AssetConfig,
) -> RenderResult<Box<dyn AssetSource + Send + Sync>> {
    if let Some(library) = UrlAssetLibrary::from_config(config) {
        return Ok(Box::new(library));
    }
    if config.root.is_some() {
        return Ok(Box::new(PreloadedAssets::load(config)?));
    }
    Ok(Box::new(NoAssets))
}

pub fn mime_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

pub(crate) fn require_asset(source: &dyn AssetSource, key: &str) -> RenderResult<Asset> {
    source
        .lookup_or_default(key)
        .ok_or_else(|| RenderError::AssetNotFound(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_types_by_extension() {
        assert_eq!(mime_type_for("images/background.jpg"), "image/jpeg");
        assert_eq!(mime_type_for("a/b.JPEG"), "image/jpeg");
        assert_eq!(mime_type_for("x.png"), "image/png");
        assert_eq!(mime_type_for("x.webp"), "application/octet-stream");
        assert_eq!(mime_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn url_library_joins_base() {
        let library = UrlAssetLibrary::from_config(&AssetConfig {
            base_url: Some("https://cards.example.net/".to_string()),
            ..AssetConfig::default()
        })
        .unwrap();
        let asset = library.lookup("matrix").unwrap();
        assert_eq!(asset.href(), "https://cards.example.net/images/matrix.jpg");
        assert_eq!(asset.mime_type, "image/jpeg");
        assert!(asset.base64_body().is_none());
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let mut assets = PreloadedAssets::default();
        assets.insert("default", "image/png", vec![1, 2, 3]);
        let asset = assets.lookup_or_default("kuro").unwrap();
        assert_eq!(asset.href(), "data:image/png;base64,AQID");
        assert_eq!(asset.base64_body().as_deref(), Some("AQID"));
    }

    #[test]
    fn missing_asset_is_an_error() {
        let err = require_asset(&NoAssets, "stars").unwrap_err();
        assert!(matches!(err, RenderError::AssetNotFound(key) if key == "stars"));
    }

    #[test]
    fn preload_reads_files_once() {
        let dir = std::env::temp_dir().join(format!("textcard-assets-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("images")).unwrap();
        std::fs::write(dir.join("images/bg.png"), [0x89, b'P', b'N', b'G']).unwrap();
        let mut library = BTreeMap::new();
        library.insert("default".to_string(), "images/bg.png".to_string());
        let config = AssetConfig {
            root: Some(dir.clone()),
            library,
            ..AssetConfig::default()
        };
        let assets = PreloadedAssets::load(&config).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(assets.len(), 1);
        let asset = assets.lookup("default").unwrap();
        assert_eq!(asset.mime_type, "image/png");
        assert!(asset.href().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn preload_reports_missing_files() {
        let mut library = BTreeMap::new();
        library.insert("default".to_string(), "does/not/exist.jpg".to_string());
        let config = AssetConfig {
            root: Some(std::env::temp_dir()),
            library,
            ..AssetConfig::default()
        };
        assert!(matches!(
            PreloadedAssets::load(&config),
            Err(RenderError::Io(_))
        ));
    }
}
