use crate::{
    config::Config,
    error::{ConceptifyError, Result},
};
use uuid::Uuid;

/// Transient state for one interactive visit. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    credential: Option<String>,
    original_prompt: String,
    enhanced_prompt: Option<String>,
    pending_urls: Vec<String>,
    generated_images: Vec<String>,
    current_image: Option<String>,
}

impl SessionState {
    /// Builds the session with every field populated from environment-backed
    /// defaults. Call once per session, before any handler runs.
    pub fn initialize(config: &Config) -> Self {
        let credential = config
            .bria
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty());

        let session = Self {
            id: Uuid::new_v4(),
            credential,
            original_prompt: String::new(),
            enhanced_prompt: None,
            pending_urls: Vec::new(),
            generated_images: Vec::new(),
            current_image: None,
        };

        log::debug!(
            "Session {} initialized (API key present: {})",
            session.id,
            session.credential.is_some()
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn require_credential(&self) -> Result<&str> {
        self.credential().ok_or(ConceptifyError::AuthenticationMissing)
    }

    /// Blank input leaves the current credential in place.
    pub fn set_credential(&mut self, input: &str) {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            self.credential = Some(trimmed.to_string());
        }
    }

    pub fn original_prompt(&self) -> &str {
        &self.original_prompt
    }

    pub fn enhanced_prompt(&self) -> Option<&str> {
        self.enhanced_prompt.as_deref()
    }

    pub fn record_prompts(&mut self, original: impl Into<String>, enhanced: impl Into<String>) {
        self.original_prompt = original.into();
        self.enhanced_prompt = Some(enhanced.into());
    }

    pub fn pending_urls(&self) -> &[String] {
        &self.pending_urls
    }

    pub fn set_pending_urls(&mut self, urls: Vec<String>) {
        self.pending_urls = urls;
    }

    pub fn generated_images(&self) -> &[String] {
        &self.generated_images
    }

    /// Appends fetched references and selects the first of them.
    pub fn record_generated(&mut self, urls: Vec<String>) {
        if let Some(first) = urls.first() {
            self.current_image = Some(first.clone());
        }
        self.generated_images.extend(urls);
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    /// Selecting a reference that was never generated is ignored.
    pub fn select_image(&mut self, url: &str) -> bool {
        if self.generated_images.iter().any(|known| known == url) {
            self.current_image = Some(url.to_string());
            true
        } else {
            false
        }
    }
}
