//! Image sources for event photos.
//!
//! Picking an image is a single-shot asynchronous operation that yields the
//! picked bytes, or nothing when the user cancels. The caller places the
//! result in the form draft before saving.

use std::future::Future;
use std::path::PathBuf;

use log::debug;

use crate::error::CountdownResult;
use crate::form::EventDraft;

pub trait ImageSource {
    fn pick(&self) -> impl Future<Output = CountdownResult<Option<Vec<u8>>>> + Send;
}

/// Reads the image from a file chosen ahead of time. A missing file counts
/// as a cancelled pick.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileImageSource { path: path.into() }
    }
}

impl ImageSource for FileImageSource {
    async fn pick(&self) -> CountdownResult<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!("Picked {} bytes from {}", bytes.len(), self.path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl EventDraft {
    /// Pick an image into this draft. A cancelled pick keeps the current image.
    pub async fn pick_image<I: ImageSource>(&mut self, source: &I) -> CountdownResult<()> {
        if let Some(bytes) = source.pick().await? {
            self.image_data = Some(bytes);
        }
        Ok(())
    }
}
