//! # Covenant Core
//!
//! `covenant_core` provides the shared building blocks for the Covenant
//! policy authoring system: the error hierarchy, identifier types, the
//! clock abstraction, configuration, and logging helpers used by the
//! policy and CLI crates.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Covenant components
//! - **id**: Rule identifiers and store keys
//! - **utils**: Clock, configuration and logging utilities
//! - **macros**: Convenience macros for structured logging

pub mod error;
pub mod id;
pub mod macros;
pub mod utils;

#[doc(hidden)]
pub use log as __log;

// Re-export key types for convenience
pub use error::{ConfigError, Error, PolicyError, Result, StoreError};
pub use id::{PolicyKey, RuleId};
pub use utils::{Clock, CovenantConfig, FixedClock, LogLevel, SystemClock};
