use crate::ports::FactProvider;
use memberorder_types::container::{Container, LayoutKind, QualifiedName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace of the generated-migration base type ignored by default.
pub const DEFAULT_IGNORED_NAMESPACE: &str = "Microsoft.EntityFrameworkCore.Migrations";

/// Name of the generated-migration base type ignored by default.
pub const DEFAULT_IGNORED_TYPE: &str = "Migration";

/// Why a container is not analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exemption {
    TooFewMembers,
    IgnoredBaseType(QualifiedName),
    FixedLayout(LayoutKind),
}

impl fmt::Display for Exemption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exemption::TooFewMembers => f.write_str("fewer than two members"),
            Exemption::IgnoredBaseType(base) => write!(f, "base type {base} is ignored"),
            Exemption::FixedLayout(layout) => write!(f, "value type with {layout:?} layout"),
        }
    }
}

/// Containers whose order must not be touched.
///
/// The ignore-list is the only configurable input; the fixed-layout rule always applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionPolicy {
    pub ignored_base_types: Vec<QualifiedName>,
}

impl Default for ExemptionPolicy {
    fn default() -> Self {
        Self {
            ignored_base_types: vec![QualifiedName::new(
                DEFAULT_IGNORED_NAMESPACE,
                DEFAULT_IGNORED_TYPE,
            )],
        }
    }
}

impl ExemptionPolicy {
    pub fn new(ignored_base_types: Vec<QualifiedName>) -> Self {
        Self { ignored_base_types }
    }

    /// The first rule that exempts `container`, if any.
    pub fn exemption(&self, container: &Container, facts: &dyn FactProvider) -> Option<Exemption> {
        if container.members.len() < 2 {
            return Some(Exemption::TooFewMembers);
        }

        if let Some(base) = facts.base_type(container)
            && self.ignored_base_types.contains(&base)
        {
            return Some(Exemption::IgnoredBaseType(base));
        }

        if container.kind.is_value_type()
            && let Some(layout) = facts.layout(container)
            && layout.is_fixed()
        {
            return Some(Exemption::FixedLayout(layout));
        }

        None
    }

    pub fn is_exempt(&self, container: &Container, facts: &dyn FactProvider) -> bool {
        self.exemption(container, facts).is_some()
    }
}
