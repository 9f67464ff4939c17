use memberorder_types::container::{Container, LayoutKind, QualifiedName};

/// Read-only access to semantic facts about a container.
///
/// The exemption policy never resolves symbols itself; the host supplies what it resolved.
pub trait FactProvider: Send + Sync {
    fn base_type(&self, container: &Container) -> Option<QualifiedName>;

    fn layout(&self, container: &Container) -> Option<LayoutKind>;
}

/// `FactProvider` reading the facts embedded in the host document.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedFacts;

impl FactProvider for EmbeddedFacts {
    fn base_type(&self, container: &Container) -> Option<QualifiedName> {
        container.facts.base_type.clone()
    }

    fn layout(&self, container: &Container) -> Option<LayoutKind> {
        container.facts.layout
    }
}
