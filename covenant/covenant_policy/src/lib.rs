//! # Covenant Policy
//!
//! `covenant_policy` models rights-expression policies, checks them for
//! structural completeness, renders them in canonical form and keeps
//! saved snapshots.
//!
//! Key concepts:
//!
//! 1. **Policy**: Either an ODRL policy (Agreement, Offer or Set, with
//!    permission, prohibition and obligation rules) or a generic policy
//!    (access, usage, retention or sharing, with typed comparison rules).
//!
//! 2. **Validation**: A walk over a policy that collects every unmet
//!    structural requirement as a [`Violation`]. Incomplete policies are
//!    normal while authoring, so violations are data, not errors.
//!
//! 3. **Canonical Document**: The export form of a policy, with empty
//!    collections removed. Documents can be read back into policies.
//!
//! 4. **Policy Store**: An append-only record of saved snapshots.

pub mod canonical;
pub mod engine;
pub mod model;
pub mod store;
pub mod vocab;

// Re-export key types and functions for convenience
pub use canonical::{canonicalize, canonicalize_with, PolicyDocument};
pub use engine::{ensure_valid, validate};
pub use model::{
    Constraint, GenericPolicy, GenericRule, Location, OdrlPolicy, OdrlRule, Policy, Violation,
    ViolationCode,
};
pub use store::{InMemoryPolicyStore, PolicyStore, StoredPolicy};
pub use vocab::{OdrlKind, Partition, PolicyFamily};
