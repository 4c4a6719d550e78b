use super::ImageSource;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::path::PathBuf;

/// Local filesystem image source
pub struct LocalImageSource {
    path: PathBuf,
}

impl LocalImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImageSource for LocalImageSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        if !self.path.is_file() {
            bail!("No such image file: {}", self.path.display());
        }

        Ok(tokio::fs::read(&self.path).await?)
    }
}
