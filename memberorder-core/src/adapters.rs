//! Default filesystem-backed port implementations.

use crate::ports::{DocumentSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use memberorder_types::document::SourceDocument;
use tracing::debug;

/// File name suffix of host-exported documents.
pub const DOCUMENT_SUFFIX: &str = ".members.json";

/// Loads every `*.members.json` document under a root directory.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    pub root: Utf8PathBuf,
}

impl FsDocumentSource {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }
}

impl DocumentSource for FsDocumentSource {
    fn load_documents(&self) -> anyhow::Result<Vec<SourceDocument>> {
        let pattern = self.root.join(format!("**/*{DOCUMENT_SUFFIX}"));
        let pattern_str = pattern.as_str();

        debug!(pattern = %pattern_str, "scanning for documents");

        let mut out = Vec::new();
        for entry in glob(pattern_str).with_context(|| format!("glob {pattern_str}"))? {
            let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
            let path = Utf8PathBuf::from_path_buf(path)
                .map_err(|p| anyhow::anyhow!("non-utf8 path: {}", p.display()))?;

            let json = fs::read_to_string(&path)?;
            let doc: SourceDocument =
                serde_json::from_str(&json).with_context(|| format!("parse {path}"))?;
            debug!(path = %path, containers = doc.containers.len(), "loaded document");
            out.push(doc);
        }

        // Deterministic order matters.
        out.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(out)
    }
}

/// In-memory document source for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentSource {
    documents: Vec<SourceDocument>,
}

impl InMemoryDocumentSource {
    pub fn new(mut documents: Vec<SourceDocument>) -> Self {
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        Self { documents }
    }
}

impl DocumentSource for InMemoryDocumentSource {
    fn load_documents(&self) -> anyhow::Result<Vec<SourceDocument>> {
        Ok(self.documents.clone())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
