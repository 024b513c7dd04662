// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    /// Where multipart uploads are spooled before the media-storage handoff.
    pub upload_dir: PathBuf,
}
