//! Entry point tying configuration, backend selection, and storage together.

use std::sync::Arc;

use tracing::{info, warn};

use reelgen_core::generation::{GenerationRequest, GenerationResult};
use reelgen_provider::api::ProviderJobs;
use reelgen_provider::auth::{resolve_credentials, CredentialState};
use reelgen_provider::poll::PollConfig;
use reelgen_provider::settings::ProviderSettings;
use reelgen_provider::ProviderApi;
use reelgen_store::ArtifactStore;

use crate::backend::{GenerationBackend, SampleBackend};
use crate::live::LiveBackend;

/// Video generation orchestrator.
///
/// Credentials are resolved on every call rather than at construction, so a
/// rotated token or a newly configured provider takes effect without a
/// restart. Each call yields exactly one [`GenerationResult`].
pub struct Generator {
    settings: ProviderSettings,
    store: ArtifactStore,
    poll_config: PollConfig,
    jobs_override: Option<Arc<dyn ProviderJobs>>,
}

impl Generator {
    pub fn new(settings: ProviderSettings, store: ArtifactStore) -> Self {
        Self {
            settings,
            store,
            poll_config: PollConfig::default(),
            jobs_override: None,
        }
    }

    /// Override the polling cadence.
    pub fn with_poll_config(mut self, poll_config: PollConfig) -> Self {
        self.poll_config = poll_config;
        self
    }

    /// Replace the provider client. Tests use this to script responses
    /// without a network.
    pub fn with_jobs_client(mut self, jobs: Arc<dyn ProviderJobs>) -> Self {
        self.jobs_override = Some(jobs);
        self
    }

    /// Generate a video for a prompt with default parameters.
    pub async fn generate(&self, prompt: &str, style_reference: Option<&str>) -> GenerationResult {
        self.generate_request(GenerationRequest::new(
            prompt,
            style_reference.map(str::to_string),
        ))
        .await
    }

    /// Generate a video for a fully specified request.
    ///
    /// Configuration problems, provider failures, and timeouts are all
    /// reported through the result's `error` field; this method never
    /// returns an `Err` and never panics.
    pub async fn generate_request(&self, request: GenerationRequest) -> GenerationResult {
        match resolve_credentials(&self.settings).await {
            CredentialState::Unconfigured => SampleBackend::new().generate(&request).await,
            CredentialState::Failed { reason } => {
                warn!(reason = %reason, "Provider credentials unusable");
                GenerationResult::failed(reason)
            }
            CredentialState::Ready(access) => {
                info!(
                    model = %access.model_id,
                    region = %access.region,
                    "Dispatching live generation"
                );
                let jobs = match &self.jobs_override {
                    Some(jobs) => Arc::clone(jobs),
                    None => Arc::new(ProviderApi::new(access)) as Arc<dyn ProviderJobs>,
                };
                LiveBackend::new(jobs, self.poll_config.clone(), self.store.clone())
                    .generate(&request)
                    .await
            }
        }
    }
}
