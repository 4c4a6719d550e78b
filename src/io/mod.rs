mod http;
mod local;

pub use http::HttpImageSource;
pub use local::LocalImageSource;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for loading a source image payload into memory
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the complete raw image bytes
    async fn fetch(&self) -> Result<Vec<u8>>;
}
