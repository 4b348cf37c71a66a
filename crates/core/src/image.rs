//! Image input for the scan flow.
//!
//! An [`ImageRef`] is a picked local image whose bytes were sniffed and recognised as an
//! image. Nothing is uploaded and nothing is analysed.

use crate::{ScanError, ScanResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    path: PathBuf,
    media_type: String,
    size: u64,
}

impl ImageRef {
    /// Picks the image at `path`.
    ///
    /// # Errors
    ///
    /// - [`ScanError::ImageUnreadable`] if the file cannot be read
    /// - [`ScanError::NotAnImage`] if its content is not a known image format
    pub async fn pick(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        let buffer = tokio::fs::read(path)
            .await
            .map_err(|source| ScanError::ImageUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let kind = infer::get(&buffer)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .ok_or_else(|| ScanError::NotAnImage {
                path: path.to_path_buf(),
            })?;

        tracing::debug!("picked {} image {}", kind.mime_type(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            media_type: kind.mime_type().to_owned(),
            size: buffer.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
