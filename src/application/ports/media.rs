// src/application/ports/media.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use std::path::Path;

/// A file that has been handed off to durable media storage.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub url: String,
}

/// External media storage the registration workflow uploads avatars and
/// cover images to. Implementations consume the local temp file.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(&self, local_path: &Path) -> ApplicationResult<StoredMedia>;
}
