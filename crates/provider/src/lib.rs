//! Client for the remote video-generation provider.
//!
//! This crate covers the live half of generation:
//!
//! - [`settings`] reads provider configuration from the environment
//! - [`auth`] resolves settings into usable access or a clear refusal
//! - [`wire`] models the request and response bodies of the protocol
//! - [`api`] is the HTTP client behind the [`ProviderJobs`] trait
//! - [`poll`] drives a long-running operation to a terminal state
//! - [`decode`] extracts the generated video from a finished operation

pub mod api;
pub mod auth;
pub mod decode;
pub mod poll;
pub mod settings;
pub mod wire;

pub use api::{ProviderApi, ProviderApiError, ProviderJobs};
pub use auth::{resolve_credentials, CredentialState, ProviderAccess};
pub use decode::{decode_artifact, Artifact, DecodeError};
pub use poll::{poll_until_done, PollConfig, PollOutcome};
pub use settings::ProviderSettings;
pub use wire::{OperationHandle, StartJobReply, StartJobRequest};
