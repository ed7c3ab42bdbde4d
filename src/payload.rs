//! ALFA Media Gate - Activity Results
//!
//! Correlation tokens, result payloads and the images they resolve to.

use std::collections::HashMap;
use std::fmt;
use image::{DynamicImage, GenericImageView};

use crate::capability::MediaKind;

/// Result code reported by a successful activity
pub const RESULT_OK: i32 = -1;

/// Result code reported when the user backs out
pub const RESULT_CANCELED: i32 = 0;

/// Extra key holding the camera thumbnail
pub const EXTRA_THUMBNAIL: &str = "data";

/// Links an activity result back to the launch that started it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationToken {
    /// Fixed per-kind code, routes the result
    pub request_code: i32,
    /// Launch sequence, detects superseded launches
    pub sequence: u64,
}

impl CorrelationToken {
    pub fn new(kind: MediaKind, sequence: u64) -> Self {
        Self {
            request_code: kind.request_code(),
            sequence,
        }
    }

    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_request_code(self.request_code)
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.request_code, self.sequence)
    }
}

/// Reference to content owned by a content provider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri(String);

impl ContentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
    }

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed value stored in the result extras
#[derive(Debug, Clone)]
pub enum PayloadValue {
    Bitmap(DynamicImage),
    Text(String),
    Integer(i64),
}

impl PayloadValue {
    fn type_name(&self) -> &'static str {
        match self {
            PayloadValue::Bitmap(_) => "bitmap",
            PayloadValue::Text(_) => "text",
            PayloadValue::Integer(_) => "integer",
        }
    }
}

/// Data returned by an external activity
#[derive(Debug, Clone, Default)]
pub struct ResultPayload {
    /// Data URI (gallery selection)
    pub data: Option<ContentUri>,
    /// Extras bundle
    pub extras: HashMap<String, PayloadValue>,
}

impl ResultPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload of a capture activity carrying a thumbnail
    pub fn with_thumbnail(thumbnail: DynamicImage) -> Self {
        Self::new().with_extra(EXTRA_THUMBNAIL, PayloadValue::Bitmap(thumbnail))
    }

    /// Payload of a picker activity carrying the selected URI
    pub fn with_uri(uri: ContentUri) -> Self {
        Self {
            data: Some(uri),
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, key: &str, value: PayloadValue) -> Self {
        self.extras.insert(key.to_string(), value);
        self
    }

    /// Bitmap extra under `key`, with the found type on mismatch
    pub fn bitmap(&self, key: &str) -> Result<&DynamicImage, String> {
        match self.extras.get(key) {
            Some(PayloadValue::Bitmap(img)) => Ok(img),
            Some(other) => Err(format!("extra '{}' is {}, expected bitmap", key, other.type_name())),
            None => Err(format!("extra '{}' missing", key)),
        }
    }
}

/// Something the display collaborator can show
#[derive(Debug, Clone)]
pub enum DisplayImage {
    /// Decoded pixels (camera thumbnail, remote image)
    Bitmap(DynamicImage),
    /// Content reference resolved by the display (gallery)
    Uri(ContentUri),
}

impl DisplayImage {
    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            DisplayImage::Bitmap(img) => {
                let (w, h) = img.dimensions();
                format!("bitmap {}x{}", w, h)
            }
            DisplayImage::Uri(uri) => format!("uri {}", uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_extraction() {
        let payload = ResultPayload::with_thumbnail(DynamicImage::new_rgb8(4, 3));
        assert_eq!(payload.bitmap(EXTRA_THUMBNAIL).unwrap().dimensions(), (4, 3));

        let wrong = ResultPayload::new().with_extra(EXTRA_THUMBNAIL, PayloadValue::Text("x".into()));
        let err = wrong.bitmap(EXTRA_THUMBNAIL).unwrap_err();
        assert!(err.contains("text"));

        assert!(ResultPayload::new().bitmap(EXTRA_THUMBNAIL).unwrap_err().contains("missing"));
    }
    }
