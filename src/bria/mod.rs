pub mod generation_client;
pub mod image_fetcher;

use crate::{
    config::Config,
    error::{ConceptifyError, Result},
};
use reqwest::Client;

pub use generation_client::GenerationClient;
pub use image_fetcher::ImageFetcher;

#[derive(Clone)]
pub struct BriaClient {
    generation_client: GenerationClient,
    image_fetcher: ImageFetcher,
    concurrent_fetch: bool,
}

impl BriaClient {
    pub fn new(config: &Config) -> Result<Self> {
        // No client-side timeout on generation; sync mode can take a while.
        let http = Client::builder()
            .build()
            .map_err(|e| ConceptifyError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            generation_client: GenerationClient::new(http, &config.bria),
            image_fetcher: ImageFetcher::new(config.fetch.timeout)?,
            concurrent_fetch: config.fetch.concurrent,
        })
    }

    pub fn generation(&self) -> &GenerationClient {
        &self.generation_client
    }

    pub fn images(&self) -> &ImageFetcher {
        &self.image_fetcher
    }

    pub fn fetches_concurrently(&self) -> bool {
        self.concurrent_fetch
    }
}
