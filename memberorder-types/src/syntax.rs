use serde::{Deserialize, Serialize};

/// Kind of a trivia piece attached to a token.
///
/// Whitespace and end-of-line trivia are *blank*; everything else is material (comments,
/// directives) that a rewrite must carry along untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    LineComment,
    BlockComment,
    DocComment,
    Directive,
}

impl TriviaKind {
    pub fn is_blank(self) -> bool {
        matches!(self, TriviaKind::Whitespace | TriviaKind::EndOfLine)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::EndOfLine, text)
    }

    pub fn line_comment(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::LineComment, text)
    }

    pub fn is_blank(&self) -> bool {
        self.kind.is_blank()
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TriviaKind::Whitespace
    }

    pub fn is_end_of_line(&self) -> bool {
        self.kind == TriviaKind::EndOfLine
    }
}

/// A token together with the trivia that surrounds it.
///
/// Rendering a token yields `leading + text + trailing`, so a sequence of tokens reproduces
/// its source text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading: Vec<Trivia>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<Trivia>,

    /// Byte offset of `text` in the original document. Only used to locate diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            leading: Vec::new(),
            trailing: Vec::new(),
            offset: None,
        }
    }

    pub fn with_leading(mut self, leading: Vec<Trivia>) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: Vec<Trivia>) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn write_to(&self, out: &mut String) {
        for t in &self.leading {
            out.push_str(&t.text);
        }
        out.push_str(&self.text);
        for t in &self.trailing {
            out.push_str(&t.text);
        }
    }
}

/// Half-open byte range `[start, end)` into a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Two ranges conflict when they share a byte, or when both insert at the same point.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        (self.start < other.end && other.start < self.end) || self.start == other.start
    }
}
