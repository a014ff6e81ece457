use crate::{
    bria::BriaClient,
    config::Config,
    error::Result,
    logger,
    models::{FetchReport, FetchedImage, GenerationForm},
    session::SessionState,
};

/// Presentation surface the generation flow reports to.
pub trait Presenter {
    fn busy(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn image(&mut self, image: &FetchedImage);
}

#[derive(Debug)]
pub struct GenerationOutcome {
    pub urls: Vec<String>,
    pub report: FetchReport,
}

pub struct ConceptApp {
    client: BriaClient,
}

impl ConceptApp {
    pub fn new(client: BriaClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(BriaClient::new(config)?))
    }

    pub fn client(&self) -> &BriaClient {
        &self.client
    }

    /// Runs one generate action: validate, call the API, download every
    /// returned image, and record the results on the session.
    pub async fn generate(
        &self,
        session: &mut SessionState,
        form: &GenerationForm,
    ) -> Result<GenerationOutcome> {
        // URLs from an earlier action must not outlive a failed one.
        session.set_pending_urls(Vec::new());
        let api_key = session.require_credential()?.to_string();
        let request = form.to_request()?;
        session.record_prompts(form.prompt.trim(), request.prompt.clone());

        let _timer = logger::timer("concept generation");
        let shape = self.client.generation().send(&request, &api_key).await?;
        let urls = shape.fetch_targets(usize::from(request.num_results));
        log::info!("🖼️  API returned {} image URL(s) for session {}", urls.len(), session.id());
        session.set_pending_urls(urls.clone());

        let report = if self.client.fetches_concurrently() {
            self.client.images().fetch_all_concurrent(&urls).await
        } else {
            self.client.images().fetch_all(&urls).await
        };

        session.record_generated(report.images().map(|image| image.url.clone()).collect());
        Ok(GenerationOutcome { urls, report })
    }

    /// [`generate`](Self::generate) with every failure turned into a presenter
    /// message. Never fails the session.
    pub async fn handle_generate(
        &self,
        session: &mut SessionState,
        form: &GenerationForm,
        presenter: &mut dyn Presenter,
    ) -> Option<GenerationOutcome> {
        presenter.busy("🎓 Generating your concept diagram...");

        let outcome = match self.generate(session, form).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("❌ Generation failed: {}", e);
                presenter.error(&format!("Error generating images: {}", e));
                return None;
            }
        };

        for failure in outcome.report.failures() {
            log::warn!("Could not fetch image {} ({}): {}", failure.index + 1, failure.url, failure.error);
        }
        for image in outcome.report.images() {
            presenter.image(image);
        }
        for failure in outcome.report.failures() {
            presenter.warning(&format!("Could not display image {}: {}", failure.index + 1, failure.error));
        }

        if outcome.report.any_fetched() {
            presenter.success(&format!(
                "✨ {} of {} image(s) generated successfully!",
                outcome.report.fetched_count(),
                outcome.report.len()
            ));
        } else {
            presenter.error("None of the generated images could be downloaded.");
        }

        Some(outcome)
    }
}
