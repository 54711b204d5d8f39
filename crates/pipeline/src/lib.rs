//! Orchestration of video generation requests.
//!
//! [`Generator`] is the single entry point: it resolves provider
//! credentials per call, routes the request to the live provider backend or
//! the sample fallback, and always hands back one `GenerationResult`.

pub mod backend;
pub mod generator;
pub mod live;

pub use backend::{GenerationBackend, SampleBackend, SAMPLE_DELAY};
pub use generator::Generator;
pub use live::LiveBackend;
