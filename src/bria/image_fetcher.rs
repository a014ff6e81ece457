use crate::{
    error::{ConceptifyError, Result},
    models::{FetchFailure, FetchOutcome, FetchReport, FetchedImage},
};
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;

/// Downloads generated images. The wrapped client carries the fetch timeout.
#[derive(Clone)]
pub struct ImageFetcher {
    client: Client,
    timeout: Duration,
}

impl ImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConceptifyError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::info!("📥 Starting image download from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            let err = ConceptifyError::from(e);
            log::warn!("Image download from {} failed: {}", url, err);
            err
        })?;

        let status = response.status();
        log::debug!("HTTP status code received: {}", status);
        if !status.is_success() {
            log::warn!("Image download from {} returned {}", url, status);
            return Err(ConceptifyError::HttpError {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        log::info!("✅ Image download successful. Image size: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    async fn fetch_indexed(&self, index: usize, url: String) -> FetchOutcome {
        match self.fetch(&url).await {
            Ok(bytes) => FetchOutcome::Fetched(FetchedImage { index, url, bytes }),
            Err(error) => FetchOutcome::Failed(FetchFailure { index, url, error }),
        }
    }

    /// One attempt per URL, one after another. A failed download does not stop
    /// the ones after it.
    pub async fn fetch_all(&self, urls: &[String]) -> FetchReport {
        let mut outcomes = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            outcomes.push(self.fetch_indexed(index, url.clone()).await);
        }
        FetchReport { outcomes }
    }

    /// Same contract as [`fetch_all`](Self::fetch_all) with the requests in flight together.
    pub async fn fetch_all_concurrent(&self, urls: &[String]) -> FetchReport {
        let outcomes = join_all(
            urls.iter()
                .enumerate()
                .map(|(index, url)| self.fetch_indexed(index, url.clone())),
        )
        .await;
        FetchReport { outcomes }
    }
}
