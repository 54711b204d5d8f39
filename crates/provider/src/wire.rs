//! Serde types for the provider's generation protocol.
//!
//! The provider exposes two POST endpoints: start-job and fetch-operation.
//! Both response shapes are modeled as explicit types rather than ad hoc
//! optional-field probing, so every branch the pipeline takes is exhaustive
//! and independently testable.

use std::fmt;

use serde::{Deserialize, Serialize};

use reelgen_core::generation::{ContentPolicy, GenerationRequest};

// ---------------------------------------------------------------------------
// Operation handle
// ---------------------------------------------------------------------------

/// Opaque identifier naming one remote job.
///
/// Minted once per submission and never reused. Its useful lifetime ends at
/// a terminal status or at the polling timeout; on timeout it is still
/// handed back to the caller, since the remote job itself keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle(String);

impl OperationHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Start-job request
// ---------------------------------------------------------------------------

/// Body for the start-job endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StartJobRequest {
    pub instances: Vec<JobInstance>,
    pub parameters: JobParameters,
}

/// One prompt instance within a start-job request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInstance {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_reference_uri: Option<String>,
}

/// Generation parameters forwarded with the job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobParameters {
    pub aspect_ratio: String,
    pub sample_count: u32,
    pub duration_seconds: u32,
    pub content_policy: ContentPolicy,
}

impl StartJobRequest {
    /// Build the provider payload from a generation request.
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            instances: vec![JobInstance {
                prompt: request.prompt.clone(),
                style_reference_uri: request.style_reference.clone(),
            }],
            parameters: JobParameters {
                aspect_ratio: request.config.aspect_ratio.clone(),
                sample_count: request.config.sample_count,
                duration_seconds: request.config.duration_seconds,
                content_policy: request.config.content_policy,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Start-job response
// ---------------------------------------------------------------------------

/// Successful response from the start-job endpoint.
///
/// The provider distinguishes the two cases by field presence, not a tag: a
/// queued job carries `operationName`; a (rare) synchronous completion
/// carries a full terminal operation body instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StartJobReply {
    /// The job was queued; poll the returned handle.
    Operation {
        #[serde(rename = "operationName")]
        operation_name: String,
    },
    /// The provider finished the job within the start call itself.
    Immediate(OperationSnapshot),
}

// ---------------------------------------------------------------------------
// Fetch-operation request/response
// ---------------------------------------------------------------------------

/// Body for the fetch-operation endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOperationRequest {
    pub operation_name: String,
}

impl FetchOperationRequest {
    pub fn new(handle: &OperationHandle) -> Self {
        Self {
            operation_name: handle.as_str().to_string(),
        }
    }
}

/// One observation of a long-running operation.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationSnapshot {
    /// `false` (or absent) while the job is still running.
    #[serde(default)]
    pub done: bool,
    /// Terminal provider-reported failure; only meaningful with `done: true`.
    #[serde(default)]
    pub error: Option<ProviderFault>,
    /// Terminal result body, present on success.
    #[serde(default)]
    pub response: Option<OperationResponse>,
}

/// Provider-reported failure detail.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderFault {
    #[serde(default)]
    pub message: String,
}

impl ProviderFault {
    /// Message to surface to callers, with a stable fallback when the
    /// provider sent an empty fault object.
    pub fn text(&self) -> String {
        if self.message.trim().is_empty() {
            "Operation failed with an unspecified provider error".to_string()
        } else {
            self.message.clone()
        }
    }
}

/// Terminal result body containing the generated videos.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationResponse {
    #[serde(default)]
    pub videos: Vec<VideoPayload>,
}

/// One generated video, delivered through exactly one of two channels.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPayload {
    /// Base64-encoded video bytes embedded in the response.
    #[serde(default)]
    pub inline_payload: Option<String>,
    /// Reference into the provider's own store.
    #[serde(default)]
    pub remote_uri: Option<String>,
}

/// Parse a fetch-operation response body into a typed snapshot.
///
/// Returns `Err` for malformed JSON. The poller logs malformed bodies and
/// keeps polling; they never terminate the job.
pub fn parse_operation(body: &str) -> Result<OperationSnapshot, serde_json::Error> {
    serde_json::from_str(body)
}

/// Extract the human-readable message from a provider error body.
///
/// Non-success responses usually carry `{"error": {"message": ...}}`; when
/// they do not, the raw body is surfaced verbatim.
pub fn provider_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ProviderFault,
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.trim().is_empty() => envelope.error.message,
        _ => body.to_string(),
    }
}
