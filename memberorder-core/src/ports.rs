//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use memberorder_types::document::SourceDocument;

/// Source of parsed documents.
pub trait DocumentSource {
    fn load_documents(&self) -> anyhow::Result<Vec<SourceDocument>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
