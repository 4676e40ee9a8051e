//! Policy engine.
//!
//! This module provides structural validation of policies.

pub mod validator;

pub use validator::{ensure_valid, validate};
