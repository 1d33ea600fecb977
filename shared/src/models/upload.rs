//! Image upload DTOs

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Base64 image upload (`upload/image/base64`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    /// Raw base64, or a `data:` URL; the backend strips the prefix
    pub base64: String,
    /// Only the extension is kept by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ImageUpload {
    /// Encode raw image bytes
    pub fn from_bytes(bytes: &[u8], file_name: Option<&str>) -> Self {
        Self {
            base64: STANDARD.encode(bytes),
            file_name: file_name.map(str::to_string),
        }
    }

    /// Payload is empty once any data-URL prefix is removed
    pub fn is_empty(&self) -> bool {
        let data = match self.base64.split_once(',') {
            Some((_, rest)) => rest,
            None => &self.base64,
        };
        data.trim().is_empty()
    }
}

/// Stored file location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    /// Server-relative path such as `/uploads/<uuid>.png`
    pub file_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let upload = ImageUpload::from_bytes(b"png", Some("logo.png"));
        assert_eq!(upload.base64, "cG5n");
        assert_eq!(upload.file_name.as_deref(), Some("logo.png"));
        assert!(!upload.is_empty());
    }

    #[test]
    fn test_empty_data_url() {
        let upload = ImageUpload {
            base64: "data:image/png;base64,".into(),
            file_name: None,
        };
        assert!(upload.is_empty());
    }
}
