use crate::syntax::{Token, Trivia};
use serde::{Deserialize, Serialize};

/// Syntactic kind of a member declaration, as reported by the host parser.
///
/// Field and constructor flavours (const, static readonly, ...) are not separate kinds here;
/// they are derived from modifiers during classification. Kinds this version does not know
/// deserialize as [`MemberKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    EventField,
    Constructor,
    Destructor,
    Delegate,
    Event,
    Property,
    Indexer,
    Method,
    ConversionOperator,
    Operator,
    Enum,
    Interface,
    Struct,
    RecordStruct,
    Record,
    Class,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Internal,
    Protected,
    Private,
    Static,
    Readonly,
    Const,
    Extern,
    Abstract,
    Virtual,
    Override,
    Sealed,
    New,
    Partial,
    Async,
    Unsafe,
    Volatile,
    Required,
    Fixed,
    Implicit,
    Explicit,
    #[serde(other)]
    Other,
}

/// Declared accessibility, ordered from most to least visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Internal,
    ProtectedInternal,
    Protected,
    PrivateProtected,
    Private,
}

/// Indices into [`Member::tokens`] of the tokens that identify a member.
///
/// Which mark is meaningful depends on the kind: ordinary declarations set `name`, indexers
/// set `keyword`, operators set `operator`, conversion operators set `target_type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenMarks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<usize>,
}

/// Attribute names that mark a native interop call.
pub const INTEROP_ATTRIBUTES: &[&str] = &[
    "DllImport",
    "DllImportAttribute",
    "System.Runtime.InteropServices.DllImport",
    "System.Runtime.InteropServices.DllImportAttribute",
];

/// One declaration inside a container.
///
/// The member's leading formatting run is the leading trivia of its first token; its trailing
/// run is the trailing trivia of its last token. The body is just more tokens and is never
/// inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,

    /// Resolved attribute names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,

    pub tokens: Vec<Token>,

    #[serde(default)]
    pub marks: TokenMarks,
}

impl Member {
    pub fn new(kind: MemberKind, tokens: Vec<Token>) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            tokens,
            marks: TokenMarks::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_marks(mut self, marks: TokenMarks) -> Self {
        self.marks = marks;
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// `const` members are implicitly static.
    pub fn is_static(&self) -> bool {
        self.has_modifier(Modifier::Static) || self.has_modifier(Modifier::Const)
    }

    pub fn has_interop_marker(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| INTEROP_ATTRIBUTES.contains(&a.as_str()))
    }

    /// Explicitly declared accessibility, if any.
    pub fn accessibility(&self) -> Option<Accessibility> {
        let public = self.has_modifier(Modifier::Public);
        let internal = self.has_modifier(Modifier::Internal);
        let protected = self.has_modifier(Modifier::Protected);
        let private = self.has_modifier(Modifier::Private);

        match (public, internal, protected, private) {
            (true, _, _, _) => Some(Accessibility::Public),
            (_, true, true, _) => Some(Accessibility::ProtectedInternal),
            (_, _, true, true) => Some(Accessibility::PrivateProtected),
            (_, true, _, _) => Some(Accessibility::Internal),
            (_, _, true, _) => Some(Accessibility::Protected),
            (_, _, _, true) => Some(Accessibility::Private),
            _ => None,
        }
    }

    pub fn token(&self, index: Option<usize>) -> Option<&Token> {
        index.and_then(|i| self.tokens.get(i))
    }

    pub fn leading(&self) -> &[Trivia] {
        self.tokens
            .first()
            .map(|t| t.leading.as_slice())
            .unwrap_or(&[])
    }

    pub fn trailing(&self) -> &[Trivia] {
        self.tokens
            .last()
            .map(|t| t.trailing.as_slice())
            .unwrap_or(&[])
    }

    /// Returns a copy with the leading run replaced. A member without tokens is returned as is.
    pub fn with_leading(&self, leading: Vec<Trivia>) -> Self {
        let mut out = self.clone();
        if let Some(first) = out.tokens.first_mut() {
            first.leading = leading;
        }
        out
    }

    /// Returns a copy with the trailing run replaced. A member without tokens is returned as is.
    pub fn with_trailing(&self, trailing: Vec<Trivia>) -> Self {
        let mut out = self.clone();
        if let Some(last) = out.tokens.last_mut() {
            last.trailing = trailing;
        }
        out
    }

    pub fn write_to(&self, out: &mut String) {
        for tok in &self.tokens {
            tok.write_to(out);
        }
    }

    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_internal_combines() {
        let m = Member::new(MemberKind::Method, vec![Token::new("M")])
            .with_modifiers(vec![Modifier::Protected, Modifier::Internal]);
        assert_eq!(m.accessibility(), Some(Accessibility::ProtectedInternal));
    }

    #[test]
    fn private_protected_combines() {
        let m = Member::new(MemberKind::Method, vec![Token::new("M")])
            .with_modifiers(vec![Modifier::Private, Modifier::Protected]);
        assert_eq!(m.accessibility(), Some(Accessibility::PrivateProtected));
    }

    #[test]
    fn no_modifier_means_no_explicit_accessibility() {
        let m = Member::new(MemberKind::Field, vec![Token::new("x")])
            .with_modifiers(vec![Modifier::Static]);
        assert_eq!(m.accessibility(), None);
        assert!(m.is_static());
    }

    #[test]
    fn const_is_static() {
        let m = Member::new(MemberKind::Field, vec![Token::new("X")])
            .with_modifiers(vec![Modifier::Const]);
        assert!(m.is_static());
    }

    #[test]
    fn dll_import_is_interop_marker() {
        let m = Member::new(MemberKind::Method, vec![Token::new("Beep")])
            .with_attributes(vec!["DllImport".to_string()]);
        assert!(m.has_interop_marker());

        let plain = Member::new(MemberKind::Method, vec![Token::new("Beep")])
            .with_attributes(vec!["Obsolete".to_string()]);
        assert!(!plain.has_interop_marker());
    }

    #[test]
    fn unknown_kind_deserializes_to_fallback() {
        let kind: MemberKind = serde_json::from_str("\"extension_block\"").expect("kind");
        assert_eq!(kind, MemberKind::Unknown);
    }
}
