//! HTTP client for the provider's generation endpoints.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::auth::ProviderAccess;
use crate::wire::{
    self, FetchOperationRequest, OperationHandle, OperationSnapshot, StartJobReply,
    StartJobRequest,
};

/// Errors returned by provider API calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderApiError {
    /// The HTTP request itself failed (connection, TLS, timeout).
    #[error("Provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered 2xx but the body did not parse.
    #[error("Unrecognized provider response: {0}")]
    Malformed(String),
}

/// Job submission and polling operations against the provider.
///
/// The pipeline depends on this trait rather than the concrete client, so
/// tests can script responses without a network.
#[async_trait]
pub trait ProviderJobs: Send + Sync {
    /// Submit a generation job.
    async fn start_job(&self, request: &StartJobRequest) -> Result<StartJobReply, ProviderApiError>;

    /// Fetch the current state of a previously started operation.
    async fn fetch_operation(
        &self,
        handle: &OperationHandle,
    ) -> Result<OperationSnapshot, ProviderApiError>;
}

/// Client for the provider's model endpoints.
pub struct ProviderApi {
    client: reqwest::Client,
    access: ProviderAccess,
}

impl ProviderApi {
    pub fn new(access: ProviderAccess) -> Self {
        Self {
            client: reqwest::Client::new(),
            access,
        }
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, access: ProviderAccess) -> Self {
        Self { client, access }
    }

    /// URL for a model verb, e.g. `:start` or `:fetchOperation`.
    fn model_url(&self, verb: &str) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/models/{}:{verb}",
            self.access.endpoint, self.access.project_id, self.access.region, self.access.model_id
        )
    }

    /// POST a JSON body to a model verb and return the response text.
    async fn post_for_text<B: serde::Serialize>(
        &self,
        verb: &str,
        body: &B,
    ) -> Result<String, ProviderApiError> {
        let response = self
            .client
            .post(self.model_url(verb))
            .bearer_auth(&self.access.token)
            .json(body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Convert a non-success response into a `ProviderApiError::Api`.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ProviderApiError::Api {
            status: status.as_u16(),
            message: wire::provider_error_message(&body),
        })
    }
}

#[async_trait]
impl ProviderJobs for ProviderApi {
    async fn start_job(&self, request: &StartJobRequest) -> Result<StartJobReply, ProviderApiError> {
        let body = self.post_for_text("start", request).await?;

        let reply: StartJobReply = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, raw_body = %body, "Unparsable start-job response");
            ProviderApiError::Malformed(format!("Unparsable start-job response: {e}"))
        })?;

        match &reply {
            StartJobReply::Operation { operation_name } => {
                debug!(operation = %operation_name, "Job submitted");
            }
            StartJobReply::Immediate(_) => {
                debug!("Job completed synchronously at submission");
            }
        }
        Ok(reply)
    }

    async fn fetch_operation(
        &self,
        handle: &OperationHandle,
    ) -> Result<OperationSnapshot, ProviderApiError> {
        let body = self
            .post_for_text("fetchOperation", &FetchOperationRequest::new(handle))
            .await?;

        wire::parse_operation(&body).map_err(|e| {
            warn!(operation = %handle, error = %e, raw_body = %body, "Unparsable operation response");
            ProviderApiError::Malformed(format!("Unparsable operation response: {e}"))
        })
    }
}
