//! Rendering options.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::image::DEFAULT_IMAGE_PROXY_PREFIX;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for [`crate::transform_with`].
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```
/// use blockmark::Options;
///
/// let options = Options::from_json_str(r#"{ "image_proxy_prefix": "/img" }"#).unwrap();
/// assert_eq!(options.image_proxy_prefix, "/img");
/// assert!(options.rewrite_images);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Path prefix that absolute image URLs are rewritten onto.
    pub image_proxy_prefix: String,
    /// When false, image sources are emitted as found.
    pub rewrite_images: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            image_proxy_prefix: DEFAULT_IMAGE_PROXY_PREFIX.to_string(),
            rewrite_images: true,
        }
    }
}

impl Options {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.image_proxy_prefix, "/image");
        assert!(options.rewrite_images);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Options::from_json_str("{}").unwrap(), Options::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Options::from_json_str(r#"{ "image_prefix": "/x" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rewrite_images": false }}"#).unwrap();
        let options = Options::load(file.path()).unwrap();
        assert!(!options.rewrite_images);
        assert_eq!(options.image_proxy_prefix, "/image");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Options::load(Path::new("/nonexistent/blockmark.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/blockmark.json"));
    }
}
