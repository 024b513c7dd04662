// src/infrastructure/media/http_storage.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::media::{MediaStorage, StoredMedia},
};
use async_trait::async_trait;
use std::path::Path;

/// Uploads files to an external media service over HTTP multipart and
/// returns the durable URL the service assigns. The local temp file is
/// removed after the attempt, uploaded or not, so failed registrations do
/// not accumulate files on disk.
#[derive(Clone)]
pub struct HttpMediaStorage {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpMediaStorage {
    pub fn new(upload_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: upload_url.into(),
        }
    }

    async fn try_upload(&self, local_path: &Path) -> ApplicationResult<StoredMedia> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .error_for_status()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let url = body
            .get("url")
            .or_else(|| body.get("secure_url"))
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                ApplicationError::infrastructure("media service response carried no url")
            })?;

        Ok(StoredMedia {
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl MediaStorage for HttpMediaStorage {
    async fn upload(&self, local_path: &Path) -> ApplicationResult<StoredMedia> {
        let result = self.try_upload(local_path).await;

        if let Err(err) = tokio::fs::remove_file(local_path).await {
            tracing::debug!(error = %err, path = %local_path.display(), "temp file cleanup failed");
        }

        result
    }
}
