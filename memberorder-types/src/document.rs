use crate::container::Container;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A parsed source file as delivered by the host: the original text plus every container
/// declared in it.
///
/// Nested containers appear twice: as a member of their parent and as their own entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Schema identifier; defaults to [`crate::schema::MEMBERORDER_DOCUMENT_V1`].
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Path of the source file, relative to the repository root.
    pub path: Utf8PathBuf,

    pub text: String,

    #[serde(default)]
    pub containers: Vec<Container>,
}

fn default_schema() -> String {
    crate::schema::MEMBERORDER_DOCUMENT_V1.to_string()
}

impl SourceDocument {
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self {
            schema: default_schema(),
            path: path.into(),
            text: text.into(),
            containers: Vec::new(),
        }
    }

    pub fn with_containers(mut self, containers: Vec<Container>) -> Self {
        self.containers = containers;
        self
    }

    /// 1-based line and column (in chars) for a byte offset.
    pub fn line_col(&self, offset: usize) -> Option<(u64, u64)> {
        line_col(&self.text, offset)
    }
}

/// 1-based line and column (in chars) for a byte offset into `text`.
pub fn line_col(text: &str, offset: usize) -> Option<(u64, u64)> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }
    let before = &text[..offset];
    let line = before.matches('\n').count() as u64 + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = text[line_start..offset].chars().count() as u64 + 1;
    Some((line, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        let text = "class A\n{\n    int x;\n}";
        assert_eq!(line_col(text, 0), Some((1, 1)));
        assert_eq!(line_col(text, text.find("int").unwrap()), Some((3, 5)));
    }

    #[test]
    fn line_col_rejects_out_of_range() {
        assert_eq!(line_col("abc", 4), None);
    }

    #[test]
    fn document_schema_defaults_when_absent() {
        let doc: SourceDocument =
            serde_json::from_str(r#"{ "path": "A.cs", "text": "" }"#).expect("parse");
        assert_eq!(doc.schema, crate::schema::MEMBERORDER_DOCUMENT_V1);
        assert!(doc.containers.is_empty());
    }
}
