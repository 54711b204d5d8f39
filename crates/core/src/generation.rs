//! Generation request/result types, defaults, and validation.
//!
//! The request side mirrors the provider's job parameters (aspect ratio,
//! sample count, duration, content policy). The result side is the one
//! record every `generate()` call produces, successful or not, serialized
//! camelCase so the admin layer consumes it unchanged.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Generation defaults and bounds
// ---------------------------------------------------------------------------

/// Default aspect ratio for generated videos.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Aspect ratios the provider accepts.
pub const VALID_ASPECT_RATIOS: &[&str] = &["16:9", "9:16", "1:1"];

/// Default number of samples requested per job.
pub const DEFAULT_SAMPLE_COUNT: u32 = 1;

/// Upper bound on samples per job.
pub const MAX_SAMPLE_COUNT: u32 = 4;

/// Default clip length in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 8;

/// Shortest clip the provider will render.
pub const MIN_DURATION_SECS: u32 = 2;

/// Longest clip the provider will render.
pub const MAX_DURATION_SECS: u32 = 16;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Content-policy setting forwarded to the provider with each job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentPolicy {
    /// Provider-default filtering.
    #[default]
    Restricted,
    /// Relaxed filtering.
    Permissive,
}

/// Tunable job parameters sent alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// One of [`VALID_ASPECT_RATIOS`].
    pub aspect_ratio: String,
    /// Number of candidate videos the provider should render.
    pub sample_count: u32,
    /// Clip length in seconds.
    pub duration_seconds: u32,
    /// Content filtering level.
    pub content_policy: ContentPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            duration_seconds: DEFAULT_DURATION_SECS,
            content_policy: ContentPolicy::default(),
        }
    }
}

/// A single video generation request. Immutable after creation; the
/// orchestrator answers each request with exactly one [`GenerationResult`].
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Prompt text describing the desired video.
    pub prompt: String,
    /// Optional style reference locator (provider-store URI).
    pub style_reference: Option<String>,
    /// Job parameters; defaults are applied by [`GenerationRequest::new`].
    pub config: GenerationConfig,
}

impl GenerationRequest {
    /// Create a request with the default [`GenerationConfig`].
    pub fn new(prompt: impl Into<String>, style_reference: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style_reference,
            config: GenerationConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Terminal record of one generation request.
///
/// Exactly one of these is produced per request; the orchestrator never
/// returns an `Err` and never panics across its public boundary. On success
/// `video_url` is set (a local `/videos/generated/...` path or a provider
/// remote URI). On failure `error` carries the provider's message verbatim;
/// a timeout additionally preserves `operation_id` so a caller could resume
/// polling out-of-band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl GenerationResult {
    /// Successful result pointing at a servable video location.
    pub fn succeeded(video_url: impl Into<String>) -> Self {
        Self {
            success: true,
            video_url: Some(video_url.into()),
            error: None,
            operation_id: None,
        }
    }

    /// Failed result carrying an error message for the caller to display.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            video_url: None,
            error: Some(error.into()),
            operation_id: None,
        }
    }

    /// Failed result for an operation that never finished inside the polling
    /// budget. Keeps the operation handle, since the remote job is still
    /// running.
    pub fn timed_out(error: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self {
            success: false,
            video_url: None,
            error: Some(error.into()),
            operation_id: Some(operation_id.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Validate that an aspect ratio is one the provider accepts.
pub fn validate_aspect_ratio(ratio: &str) -> Result<(), CoreError> {
    if VALID_ASPECT_RATIOS.contains(&ratio) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid aspect ratio '{ratio}'. Must be one of: {}",
            VALID_ASPECT_RATIOS.join(", ")
        )))
    }
}

/// Validate that the clip duration is within provider bounds.
pub fn validate_duration(duration_seconds: u32) -> Result<(), CoreError> {
    if (MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&duration_seconds) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid duration {duration_seconds}s. Must be between \
             {MIN_DURATION_SECS} and {MAX_DURATION_SECS} seconds"
        )))
    }
}

/// Validate that the sample count is within provider bounds.
pub fn validate_sample_count(sample_count: u32) -> Result<(), CoreError> {
    if (1..=MAX_SAMPLE_COUNT).contains(&sample_count) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid sample count {sample_count}. Must be between 1 and {MAX_SAMPLE_COUNT}"
        )))
    }
}

/// Validate a full request before submission.
///
/// Applied on the live path only; the sample fallback accepts any request,
/// so an unconfigured deployment always sees a successful result.
pub fn validate_request(request: &GenerationRequest) -> Result<(), CoreError> {
    if request.prompt.trim().is_empty() {
        return Err(CoreError::Validation(
            "Prompt must not be empty".to_string(),
        ));
    }
    validate_aspect_ratio(&request.config.aspect_ratio)?;
    validate_duration(request.config.duration_seconds)?;
    validate_sample_count(request.config.sample_count)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
