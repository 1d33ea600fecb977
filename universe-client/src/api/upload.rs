//! File upload

use shared::error::ErrorCode;
use shared::models::{ImageUpload, UploadedFile};

use super::Api;
use crate::{ClientError, ClientResult};

impl Api {
    /// `POST upload/image/base64`; returns the stored path (`/uploads/...`)
    pub async fn upload_image(&self, upload: &ImageUpload) -> ClientResult<UploadedFile> {
        if upload.is_empty() {
            return Err(ClientError::Rejected {
                status: 400,
                message: ErrorCode::EmptyFile.message().to_string(),
            });
        }
        let value = self
            .http
            .post("upload/image/base64", &Self::body(upload)?)
            .await?;
        Ok(Self::accept(value)?.into_flat()?)
    }
}
