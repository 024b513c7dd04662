// tests/support/mocks/media.rs
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

use clipstream_core::application::ApplicationResult;
use clipstream_core::application::error::ApplicationError;
use clipstream_core::application::ports::media::{MediaStorage, StoredMedia};

/// Accepts every upload and records the paths it saw.
#[derive(Default)]
pub struct DummyMediaStorage {
    pub uploads: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStorage for DummyMediaStorage {
    async fn upload(&self, local_path: &Path) -> ApplicationResult<StoredMedia> {
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.uploads.lock().unwrap().push(file_name.clone());

        Ok(StoredMedia {
            url: format!("https://media.test/{file_name}"),
        })
    }
}

/// Rejects every upload.
#[derive(Default)]
pub struct FailingMediaStorage;

#[async_trait]
impl MediaStorage for FailingMediaStorage {
    async fn upload(&self, _local_path: &Path) -> ApplicationResult<StoredMedia> {
        Err(ApplicationError::infrastructure("media service is down"))
    }
}

/// Fails only for the given file names; everything else uploads fine.
pub struct SelectiveMediaStorage {
    pub reject_containing: &'static str,
}

#[async_trait]
impl MediaStorage for SelectiveMediaStorage {
    async fn upload(&self, local_path: &Path) -> ApplicationResult<StoredMedia> {
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if file_name.contains(self.reject_containing) {
            return Err(ApplicationError::infrastructure("media service rejected file"));
        }

        Ok(StoredMedia {
            url: format!("https://media.test/{file_name}"),
        })
    }
}
