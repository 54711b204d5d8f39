//! Core domain types for the reelgen video generation orchestrator.
//!
//! This crate is pure domain logic, with no network or filesystem access:
//!
//! - [`GenerationRequest`] / [`GenerationConfig`] describe what the caller
//!   asks for, with validation helpers and bounds constants in
//!   [`generation`].
//! - [`GenerationResult`] is the single terminal record every request
//!   produces, serialized camelCase for the JS-facing admin layer.
//! - [`naming`] holds generated-artifact filename and public path
//!   conventions.

pub mod error;
pub mod generation;
pub mod naming;

pub use error::CoreError;
pub use generation::{GenerationConfig, GenerationRequest, GenerationResult};
