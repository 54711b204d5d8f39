//! Generation backend seam and the built-in sample fallback.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use reelgen_core::generation::{GenerationRequest, GenerationResult};
use reelgen_core::naming::SAMPLE_VIDEO_PATH;

/// Pause before the sample backend answers, approximating a short
/// generation round-trip.
pub const SAMPLE_DELAY: Duration = Duration::from_millis(1500);

/// One strategy for turning a generation request into a result.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produce the terminal result for a request. Failures are reported
    /// through the result, never as an `Err`.
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult;
}

/// Fallback backend serving a bundled sample clip.
///
/// Selected when no provider credentials are configured. It performs no
/// validation and no network access; every request succeeds with the same
/// sample path, after a short delay.
pub struct SampleBackend {
    sample_path: String,
    delay: Duration,
}

impl SampleBackend {
    pub fn new() -> Self {
        Self {
            sample_path: SAMPLE_VIDEO_PATH.to_string(),
            delay: SAMPLE_DELAY,
        }
    }

    /// Sample backend with a custom delay; used by tests.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            sample_path: SAMPLE_VIDEO_PATH.to_string(),
            delay,
        }
    }
}

impl Default for SampleBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for SampleBackend {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        info!(
            prompt = %request.prompt,
            "Provider credentials not configured; serving sample video"
        );
        tokio::time::sleep(self.delay).await;
        GenerationResult::succeeded(self.sample_path.clone())
    }
}
