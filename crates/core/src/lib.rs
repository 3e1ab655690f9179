//! `userhub-core`: shared building blocks for the user-management service.
//!
//! This crate contains **pure** primitives (no IO, no async): identifiers, the
//! error taxonomy shared by the pipeline and the handlers, and the bridge from
//! `validator` errors to named validation failures.

pub mod error;
pub mod id;
pub mod validation;

pub use error::{PipelineError, PipelineResult, StoreError};
pub use id::UserId;
pub use validation::{FieldName, ValidationFailure, failures_from, rules};
