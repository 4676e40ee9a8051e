//! Utility functions and types.

pub mod clock;
pub mod config;
pub mod logging;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CanonicalConfig, ConfigOverrides, CovenantConfig, LoggingConfig, StoreConfig};
pub use logging::LogLevel;
