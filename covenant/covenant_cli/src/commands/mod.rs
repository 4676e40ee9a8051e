//! CLI commands
//!
//! Each command returns the process exit code on success. Errors that stop
//! a command early are reported by `main` with [`exit_codes::ERROR`].

pub mod policy;
pub mod vocab;

/// Process exit codes
pub mod exit_codes {
    /// The command succeeded and every policy was valid
    pub const OK: i32 = 0;

    /// At least one policy had structural violations
    pub const VIOLATIONS: i32 = 1;

    /// The command could not run: bad input, I/O or configuration
    pub const ERROR: i32 = 2;
}
