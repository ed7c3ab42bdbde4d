//! ALFA Media Gate - Configuration

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::MediaResult;
use crate::flow::IMAGE_MIME_FILTER;

/// Media configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Image fetched by the download action
    pub image_url: String,
    /// Subfolder of the package pictures directory
    pub pictures_subfolder: String,
    /// Authority of the file provider sharing captured photos
    pub file_provider_authority: String,
    /// MIME filter for the gallery picker
    pub picker_mime: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            image_url: "https://static.dw.com/image/59891785_403.jpg".into(),
            pictures_subfolder: "Hello Camera".into(),
            file_provider_authority: "com.example.android.fileprovider".into(),
            picker_mime: IMAGE_MIME_FILTER.into(),
        }
    }
}

impl MediaConfig {
    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> MediaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> MediaResult<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&data)?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> MediaResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> MediaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = MediaConfig::from_json(r#"{ "image_url": "http://localhost/cat.png" }"#).unwrap();
        assert_eq!(config.image_url, "http://localhost/cat.png");
        assert_eq!(config.picker_mime, "image/*");
        assert_eq!(config.pictures_subfolder, "Hello Camera");
        assert_eq!(config.file_provider_authority, "com.example.android.fileprovider");

        let config = MediaConfig::from_json(r#"{ "file_provider_authority": "dev.alfa.media.files" }"#).unwrap();
        assert_eq!(config.file_provider_authority, "dev.alfa.media.files");
        assert!(config.to_json().unwrap().contains("\"file_provider_authority\": \"dev.alfa.media.files\""));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("media.json");
        let config = MediaConfig {
            pictures_subfolder: "Shots".into(),
            ..Default::default()
        };
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        assert_eq!(MediaConfig::load(&path).unwrap(), config);
        assert_eq!(MediaConfig::load_or_default(None).unwrap(), MediaConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            MediaConfig::from_json("{ not json"),
            Err(MediaError::ConfigError(_))
        ));
    }
}
