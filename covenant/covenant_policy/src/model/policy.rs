//! The family-tagged policy type.

use covenant_core::id::PolicyKey;
use std::fmt;

use super::generic::GenericPolicy;
use super::odrl::OdrlPolicy;
use crate::vocab::{GenericKind, OdrlKind, PolicyFamily};

/// A policy of either family.
///
/// Family-specific fields are only reachable through the matching variant,
/// so code that handles a policy has to say which family it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// An ODRL 2.2 policy.
    Odrl(OdrlPolicy),

    /// A generic access/usage/retention/sharing policy.
    Generic(GenericPolicy),
}

impl Policy {
    /// Create an empty policy with the family's default kind.
    pub fn create(family: PolicyFamily) -> Self {
        match family {
            PolicyFamily::Odrl => Self::Odrl(OdrlPolicy::new(OdrlKind::default())),
            PolicyFamily::Generic => Self::Generic(GenericPolicy::new(GenericKind::default())),
        }
    }

    /// The family of this policy.
    pub fn family(&self) -> PolicyFamily {
        match self {
            Self::Odrl(_) => PolicyFamily::Odrl,
            Self::Generic(_) => PolicyFamily::Generic,
        }
    }

    /// The wire term of this policy's kind.
    pub fn kind_term(&self) -> &'static str {
        match self {
            Self::Odrl(policy) => policy.kind().as_str(),
            Self::Generic(policy) => policy.kind().as_str(),
        }
    }

    /// The key this policy names for itself, if it has one.
    ///
    /// ODRL policies use a non-blank uid; generic policies use their
    /// numeric id.
    pub fn own_key(&self) -> Option<PolicyKey> {
        match self {
            Self::Odrl(policy) if !policy.uid().trim().is_empty() => {
                Some(PolicyKey::new(policy.uid()))
            }
            Self::Odrl(_) => None,
            Self::Generic(policy) => policy.id().map(|id| PolicyKey::new(id.to_string())),
        }
    }

    pub fn as_odrl(&self) -> Option<&OdrlPolicy> {
        match self {
            Self::Odrl(policy) => Some(policy),
            Self::Generic(_) => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericPolicy> {
        match self {
            Self::Generic(policy) => Some(policy),
            Self::Odrl(_) => None,
        }
    }
}

impl From<OdrlPolicy> for Policy {
    fn from(policy: OdrlPolicy) -> Self {
        Self::Odrl(policy)
    }
}

impl From<GenericPolicy> for Policy {
    fn from(policy: GenericPolicy) -> Self {
        Self::Generic(policy)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Odrl(policy) => {
                let uid = if policy.uid().is_empty() {
                    "<no uid>"
                } else {
                    policy.uid()
                };
                write!(
                    f,
                    "{} {} ({} rules)",
                    policy.kind(),
                    uid,
                    policy.rule_count()
                )
            }
            Self::Generic(policy) => write!(
                f,
                "{} policy '{}' ({} rules)",
                policy.kind(),
                policy.name(),
                policy.rules().len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GenericField, OdrlField};

    #[test]
    fn test_create_uses_family_defaults() {
        let odrl = Policy::create(PolicyFamily::Odrl);
        assert_eq!(odrl.family(), PolicyFamily::Odrl);
        assert_eq!(odrl.kind_term(), "Agreement");

        let generic = Policy::create(PolicyFamily::Generic);
        assert_eq!(generic.family(), PolicyFamily::Generic);
        assert_eq!(generic.kind_term(), "access");
        assert!(generic.as_odrl().is_none());
    }

    #[test]
    fn test_own_key() {
        let odrl = OdrlPolicy::default();
        assert_eq!(Policy::from(odrl.clone()).own_key(), None);
        assert_eq!(
            Policy::from(odrl.with_field(OdrlField::Uid("  ".into()))).own_key(),
            None
        );
        assert_eq!(
            Policy::from(odrl.with_field(OdrlField::Uid("urn:p:1".into()))).own_key(),
            Some(PolicyKey::new("urn:p:1"))
        );

        let generic = GenericPolicy::default().with_field(GenericField::Id(Some(12)));
        assert_eq!(Policy::from(generic).own_key(), Some(PolicyKey::new("12")));
    }

    #[test]
    fn test_display() {
        let policy = Policy::from(
            OdrlPolicy::new(OdrlKind::Set).with_field(OdrlField::Uid("urn:p:2".into())),
        );
        assert_eq!(policy.to_string(), "Set urn:p:2 (0 rules)");

        let policy = Policy::from(
            GenericPolicy::new(GenericKind::Sharing).with_field(GenericField::Name("Partners".into())),
        );
        assert_eq!(policy.to_string(), "sharing policy 'Partners' (0 rules)");
    }
}
