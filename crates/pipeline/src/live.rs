//! Live generation against the remote provider.
//!
//! Validates the request, submits the job, polls the returned operation to
//! a terminal state, and turns the finished operation into a servable video
//! location. Every branch funnels into a [`GenerationResult`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use reelgen_core::generation::{validate_request, GenerationRequest, GenerationResult};
use reelgen_provider::api::ProviderJobs;
use reelgen_provider::decode::{decode_artifact, Artifact};
use reelgen_provider::poll::{poll_until_done, PollConfig, PollOutcome};
use reelgen_provider::wire::{OperationHandle, OperationResponse, StartJobReply, StartJobRequest};
use reelgen_store::ArtifactStore;

use crate::backend::GenerationBackend;

/// Backend that submits jobs to the provider and polls them to completion.
pub struct LiveBackend {
    jobs: Arc<dyn ProviderJobs>,
    poll_config: PollConfig,
    store: ArtifactStore,
}

impl LiveBackend {
    pub fn new(jobs: Arc<dyn ProviderJobs>, poll_config: PollConfig, store: ArtifactStore) -> Self {
        Self {
            jobs,
            poll_config,
            store,
        }
    }

    /// Drive a queued operation to a terminal result.
    async fn await_operation(&self, handle: OperationHandle) -> GenerationResult {
        match poll_until_done(self.jobs.as_ref(), &handle, &self.poll_config).await {
            PollOutcome::Completed(response) => self.persist(response.as_ref()).await,
            PollOutcome::Failed { message } => GenerationResult::failed(message),
            PollOutcome::TimedOut => GenerationResult::timed_out(
                format!(
                    "Video generation timed out after {} seconds; \
                     the operation may still be running",
                    self.poll_config.budget.as_secs()
                ),
                handle.as_str(),
            ),
        }
    }

    /// Turn a finished operation into a servable video location.
    ///
    /// Inline payloads are written to the artifact store; remote references
    /// pass through as-is.
    async fn persist(&self, response: Option<&OperationResponse>) -> GenerationResult {
        match decode_artifact(response) {
            Ok(Artifact::Inline(bytes)) => match self.store.save_video(&bytes).await {
                Ok(stored) => GenerationResult::succeeded(stored.public_path),
                Err(e) => {
                    error!(error = %e, "Failed to persist generated video");
                    GenerationResult::failed(format!("Failed to persist generated video: {e}"))
                }
            },
            Ok(Artifact::Remote(uri)) => {
                info!(uri = %uri, "Provider stored the generated video remotely");
                GenerationResult::succeeded(uri)
            }
            Err(e) => GenerationResult::failed(e.to_string()),
        }
    }
}

#[async_trait]
impl GenerationBackend for LiveBackend {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        if let Err(e) = validate_request(request) {
            return GenerationResult::failed(e.to_string());
        }

        let start = StartJobRequest::from_request(request);
        match self.jobs.start_job(&start).await {
            Ok(StartJobReply::Operation { operation_name }) => {
                info!(operation = %operation_name, "Generation job submitted");
                self.await_operation(OperationHandle::new(operation_name))
                    .await
            }
            Ok(StartJobReply::Immediate(snapshot)) if snapshot.done => {
                if let Some(fault) = snapshot.error {
                    return GenerationResult::failed(fault.text());
                }
                self.persist(snapshot.response.as_ref()).await
            }
            Ok(StartJobReply::Immediate(_)) => {
                // Neither an operation name nor a terminal body; there is
                // nothing to poll.
                GenerationResult::failed("Provider returned an unrecognized submission response")
            }
            Err(e) => {
                // Submission failures are terminal; only poll attempts retry.
                warn!(error = %e, "Job submission failed");
                GenerationResult::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use reelgen_provider::api::ProviderApiError;
    use reelgen_provider::wire::OperationSnapshot;

    /// Answers the single start-job call of a test with a scripted reply.
    struct FixedStart {
        reply: Mutex<Option<Result<StartJobReply, ProviderApiError>>>,
        starts: AtomicU32,
    }

    impl FixedStart {
        fn new(reply: Result<StartJobReply, ProviderApiError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                starts: AtomicU32::new(0),
            }
        }

        fn start_count(&self) -> u32 {
            self.starts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProviderJobs for FixedStart {
        async fn start_job(
            &self,
            _request: &StartJobRequest,
        ) -> Result<StartJobReply, ProviderApiError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            self.reply
                .lock()
                .unwrap()
                .take()
                .expect("start_job scripted for a single call")
        }

        async fn fetch_operation(
            &self,
            _handle: &OperationHandle,
        ) -> Result<OperationSnapshot, ProviderApiError> {
            panic!("fetch_operation not scripted for these tests");
        }
    }

    fn reply(json: &str) -> Result<StartJobReply, ProviderApiError> {
        Ok(serde_json::from_str(json).unwrap())
    }

    fn backend(jobs: FixedStart, dir: &tempfile::TempDir) -> (LiveBackend, Arc<FixedStart>) {
        let jobs = Arc::new(jobs);
        let config = PollConfig {
            interval: Duration::from_millis(1),
            budget: Duration::from_millis(50),
        };
        let live = LiveBackend::new(
            Arc::clone(&jobs) as Arc<dyn ProviderJobs>,
            config,
            ArtifactStore::new(dir.path()),
        );
        (live, jobs)
    }

    #[tokio::test]
    async fn invalid_request_fails_without_submission() {
        let dir = tempfile::tempdir().unwrap();
        let (live, jobs) = backend(
            FixedStart::new(reply(r#"{"operationName":"operations/x"}"#)),
            &dir,
        );

        let result = live.generate(&GenerationRequest::new("   ", None)).await;

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap_or("").contains("Prompt"));
        assert_eq!(jobs.start_count(), 0);
    }

    #[tokio::test]
    async fn submission_error_is_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let (live, jobs) = backend(
            FixedStart::new(Err(ProviderApiError::Api {
                status: 429,
                message: "Quota exceeded".to_string(),
            })),
            &dir,
        );

        let result = live.generate(&GenerationRequest::new("city at night", None)).await;

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap_or("").contains("Quota exceeded"));
        assert!(result.operation_id.is_none());
        assert_eq!(jobs.start_count(), 1);
    }

    #[tokio::test]
    async fn immediate_failure_reports_provider_fault() {
        let dir = tempfile::tempdir().unwrap();
        let (live, _) = backend(
            FixedStart::new(reply(r#"{"done":true,"error":{"message":"prompt rejected"}}"#)),
            &dir,
        );

        let result = live.generate(&GenerationRequest::new("city at night", None)).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("prompt rejected"));
    }

    #[tokio::test]
    async fn immediate_remote_result_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let (live, _) = backend(
            FixedStart::new(reply(
                r#"{"done":true,"response":{"videos":[{"remoteUri":"store://videos/sync.mp4"}]}}"#,
            )),
            &dir,
        );

        let result = live.generate(&GenerationRequest::new("city at night", None)).await;

        assert!(result.success);
        assert_eq!(result.video_url.as_deref(), Some("store://videos/sync.mp4"));
    }

    #[tokio::test]
    async fn non_terminal_immediate_reply_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (live, _) = backend(FixedStart::new(reply(r#"{"done":false}"#)), &dir);

        let result = live.generate(&GenerationRequest::new("city at night", None)).await;

        assert!(!result.success);
        assert!(result
            .error
            .as_deref()
            .unwrap_or("")
            .contains("unrecognized submission response"));
    }

    #[tokio::test]
    async fn completed_operation_without_video_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (live, _) = backend(
            FixedStart::new(reply(r#"{"done":true,"response":{"videos":[]}}"#)),
            &dir,
        );

        let result = live.generate(&GenerationRequest::new("city at night", None)).await;

        assert!(!result.success);
        assert!(result
            .error
            .as_deref()
            .unwrap_or("")
            .contains("No artifact in response"));
    }
}
