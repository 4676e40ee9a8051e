//! Vocabulary tables.
//!
//! Closed enumerations for both policy families. Every table converts to
//! and from its wire term, so model values, canonical documents and the
//! command line all speak the same strings.

use covenant_core::error::PolicyError;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Define a closed vocabulary backed by string terms.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $term:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every value of this vocabulary, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Every wire term of this vocabulary, in declaration order.
            pub const TERMS: &'static [&'static str] = &[$($term),+];

            /// Human-readable name of this vocabulary.
            pub const VOCABULARY: &'static str = $label;

            /// The wire term for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $term),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = PolicyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($term => Ok($name::$variant),)+
                    other => Err(PolicyError::UnknownTerm {
                        vocabulary: $label,
                        term: other.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let term = String::deserialize(deserializer)?;
                term.parse().map_err(de::Error::custom)
            }
        }
    };
}

vocabulary! {
    /// Which family of policy kinds a policy belongs to.
    PolicyFamily, "policy family" {
        /// ODRL 2.2 profile.
        Odrl => "odrl",
        /// Generic access/usage/retention/sharing rules.
        Generic => "generic",
    }
}

vocabulary! {
    /// ODRL policy subclass.
    OdrlKind, "policy kind" {
        /// Both parties are bound.
        Agreement => "Agreement",
        /// Proposed by an assigner, no assignee yet.
        Offer => "Offer",
        /// A bare collection of rules.
        Set => "Set",
    }
}

vocabulary! {
    /// Legal effect of an ODRL rule, i.e. the partition it lives in.
    Partition, "rule partition" {
        /// The action is allowed.
        Permission => "permission",
        /// The action is forbidden.
        Prohibition => "prohibition",
        /// The action must be performed.
        Obligation => "obligation",
    }
}

vocabulary! {
    /// ODRL action verbs.
    Action, "action" {
        Use => "use",
        Modify => "modify",
        Distribute => "distribute",
        Reproduce => "reproduce",
        Display => "display",
        Execute => "execute",
        Print => "print",
        Play => "play",
        Present => "present",
        Read => "read",
        Sell => "sell",
        Give => "give",
        Lend => "lend",
        Move => "move",
        Duplicate => "duplicate",
        Delete => "delete",
        Install => "install",
        Uninstall => "uninstall",
        Extract => "extract",
        Derive => "derive",
        Index => "index",
        Annotate => "annotate",
        Aggregate => "aggregate",
        Anonymize => "anonymize",
        Archive => "archive",
        Attribute => "attribute",
        Compensate => "compensate",
        Concurrent => "concurrent",
        Ensure => "ensure",
        Include => "include",
        Inform => "inform",
        NextPolicy => "nextPolicy",
        ObtainConsent => "obtainConsent",
        ReviewPolicy => "reviewPolicy",
        TextToSpeech => "textToSpeech",
        Translate => "translate",
        Watermark => "watermark",
    }
}

vocabulary! {
    /// ODRL constraint relational operators.
    ConstraintOperator, "constraint operator" {
        Eq => "eq",
        Neq => "neq",
        Lt => "lt",
        Lteq => "lteq",
        Gt => "gt",
        Gteq => "gteq",
        IsA => "isA",
        HasPart => "hasPart",
        IsPartOf => "isPartOf",
        IsAllOf => "isAllOf",
        IsAnyOf => "isAnyOf",
        IsNoneOf => "isNoneOf",
    }
}

vocabulary! {
    /// ODRL constraint left operands.
    LeftOperand, "left operand" {
        DateTime => "dateTime",
        DelayPeriod => "delayPeriod",
        DeliveryChannel => "deliveryChannel",
        ElapsedTime => "elapsedTime",
        Event => "event",
        Industry => "industry",
        Language => "language",
        Media => "media",
        MeteredTime => "meteredTime",
        PayAmount => "payAmount",
        Percentage => "percentage",
        Product => "product",
        Purpose => "purpose",
        Recipient => "recipient",
        RelativePosition => "relativePosition",
        RelativeSize => "relativeSize",
        RelativeSpatial => "relativeSpatial",
        RelativeTime => "relativeTime",
        Resolution => "resolution",
        Spatial => "spatial",
        SystemDevice => "systemDevice",
        TimeInterval => "timeInterval",
        UnitOfCount => "unitOfCount",
        Version => "version",
        VirtualLocation => "virtualLocation",
    }
}

vocabulary! {
    /// Generic policy kinds.
    GenericKind, "generic policy kind" {
        Access => "access",
        Usage => "usage",
        Retention => "retention",
        Sharing => "sharing",
    }
}

vocabulary! {
    /// Generic rule types.
    RuleType, "rule type" {
        UsageCount => "usage_count",
        TimeLimit => "time_limit",
        Location => "location",
        Purpose => "purpose",
        UserRole => "user_role",
        DataClassification => "data_classification",
    }
}

vocabulary! {
    /// Generic rule comparison operators.
    ComparisonOperator, "comparison operator" {
        Equals => "equals",
        NotEquals => "not_equals",
        GreaterThan => "greater_than",
        LessThan => "less_than",
        Contains => "contains",
        NotContains => "not_contains",
    }
}

vocabulary! {
    /// Lifecycle status of a generic policy.
    PolicyStatus, "policy status" {
        Draft => "draft",
        Active => "active",
        Inactive => "inactive",
    }
}

vocabulary! {
    /// How a generic policy is meant to be enforced. Advisory only.
    EnforcementMode, "enforcement mode" {
        Strict => "strict",
        Warning => "warning",
        LogOnly => "log_only",
    }
}

impl Default for OdrlKind {
    fn default() -> Self {
        Self::Agreement
    }
}

impl OdrlKind {
    /// Whether policies of this kind must name an assigner.
    pub fn requires_assigner(&self) -> bool {
        matches!(self, Self::Agreement | Self::Offer)
    }

    /// Whether policies of this kind must name an assignee.
    pub fn requires_assignee(&self) -> bool {
        matches!(self, Self::Agreement)
    }
}

impl Default for GenericKind {
    fn default() -> Self {
        Self::Access
    }
}

impl Default for PolicyStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl Default for EnforcementMode {
    fn default() -> Self {
        Self::Strict
    }
}

/// Named vocabulary tables, as listed by the command line.
pub const TABLES: &[(&str, &[&str])] = &[
    ("policy-kinds", OdrlKind::TERMS),
    ("actions", Action::TERMS),
    ("operators", ConstraintOperator::TERMS),
    ("left-operands", LeftOperand::TERMS),
    ("generic-kinds", GenericKind::TERMS),
    ("rule-types", RuleType::TERMS),
    ("comparison-operators", ComparisonOperator::TERMS),
    ("statuses", PolicyStatus::TERMS),
    ("enforcement-modes", EnforcementMode::TERMS),
];

/// Look up a vocabulary table by name.
pub fn table(name: &str) -> Option<&'static [&'static str]> {
    TABLES
        .iter()
        .find(|(table, _)| *table == name)
        .map(|(_, terms)| *terms)
}
