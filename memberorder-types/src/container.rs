use crate::member::Member;
use crate::syntax::TextRange;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl ContainerKind {
    /// Members of interface-like containers are implicitly public.
    pub fn is_interface_like(self) -> bool {
        matches!(self, ContainerKind::Interface)
    }

    pub fn is_value_type(self) -> bool {
        matches!(self, ContainerKind::Struct | ContainerKind::RecordStruct)
    }
}

/// A namespace-qualified type name, e.g. `Microsoft.EntityFrameworkCore.Migrations.Migration`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    #[serde(default)]
    pub namespace: String,
    pub type_name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }

    /// Splits at the last `.`; a name without dots lives in the global namespace.
    pub fn parse(full: &str) -> Self {
        match full.rsplit_once('.') {
            Some((ns, name)) => Self::new(ns, name),
            None => Self::new("", full),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.type_name)
        } else {
            write!(f, "{}.{}", self.namespace, self.type_name)
        }
    }
}

/// Memory layout requested by an explicit layout marker on the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Sequential,
    Explicit,
    Auto,
}

impl LayoutKind {
    /// Sequential and explicit layouts make declaration order observable in the binary layout.
    pub fn is_fixed(self) -> bool {
        matches!(self, LayoutKind::Sequential | LayoutKind::Explicit)
    }
}

/// Semantic facts the host resolved for a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<QualifiedName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutKind>,
}

/// One declared type body.
///
/// `span` covers exactly the text rendered by `members`, i.e. everything between the opening
/// and closing braces of the body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub kind: ContainerKind,

    #[serde(default)]
    pub facts: ResolvedFacts,

    pub span: TextRange,

    #[serde(default)]
    pub members: Vec<Member>,
}

impl Container {
    pub fn new(
        name: impl Into<String>,
        kind: ContainerKind,
        span: TextRange,
        members: Vec<Member>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            facts: ResolvedFacts::default(),
            span,
            members,
        }
    }

    pub fn with_facts(mut self, facts: ResolvedFacts) -> Self {
        self.facts = facts;
        self
    }

    /// Builds the replacement container holding `members`; everything else is kept.
    pub fn with_members(&self, members: Vec<Member>) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            facts: self.facts.clone(),
            span: self.span,
            members,
        }
    }

    pub fn members_source(&self) -> String {
        let mut out = String::new();
        for m in &self.members {
            m.write_to(&mut out);
        }
        out
    }
}
