use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::ImageSource;
use anyhow::{Result, bail};

/// HTTP image source downloading the payload from a remote URL
pub struct HttpImageSource {
    client: Client,
    url: String,
}

impl HttpImageSource {
    /// Create a new HTTP image source with a 30 second request timeout
    pub fn new(url: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let resp = self.client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            bail!(
                "Failed to download image from the provided link, status: {}",
                resp.status()
            );
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
