//! Batched text replacements with overlap detection.
//!
//! Edits are accepted in submission order. An edit whose range overlaps one already accepted is
//! skipped, never merged, so every accepted edit still sees the exact bytes it was computed from.

use memberorder_types::syntax::TextRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub range: TextRange,
    pub text: String,
    /// Free-form tag carried into dispositions, usually the container name.
    pub label: String,
}

impl Replacement {
    pub fn new(range: TextRange, text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    /// Skipped because it overlaps the accepted edit at index `with`.
    Overlapping { with: usize },
    /// The range does not lie on character boundaries inside the text.
    OutOfBounds,
}

impl Disposition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Disposition::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub text: String,
    /// One entry per submitted replacement, in submission order.
    pub dispositions: Vec<Disposition>,
}

#[derive(Debug, Clone, Default)]
pub struct EditBatch {
    edits: Vec<Replacement>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: Replacement) {
        self.edits.push(edit);
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn edits(&self) -> &[Replacement] {
        &self.edits
    }

    /// Applies every non-overlapping edit to `text`.
    pub fn commit(&self, text: &str) -> CommitOutcome {
        let mut dispositions = Vec::with_capacity(self.edits.len());
        let mut accepted: Vec<usize> = Vec::new();

        for edit in &self.edits {
            let r = edit.range;
            let in_bounds = r.start <= r.end
                && r.end <= text.len()
                && text.is_char_boundary(r.start)
                && text.is_char_boundary(r.end);
            if !in_bounds {
                dispositions.push(Disposition::OutOfBounds);
                continue;
            }

            let clash = accepted
                .iter()
                .copied()
                .find(|&j| self.edits[j].range.overlaps(&r));
            match clash {
                Some(with) => dispositions.push(Disposition::Overlapping { with }),
                None => {
                    accepted.push(dispositions.len());
                    dispositions.push(Disposition::Applied);
                }
            }
        }

        // Splice back to front so earlier offsets stay valid.
        accepted.sort_by_key(|&i| std::cmp::Reverse(self.edits[i].range.start));
        let mut out = text.to_string();
        for i in accepted {
            let edit = &self.edits[i];
            out.replace_range(edit.range.start..edit.range.end, &edit.text);
        }

        CommitOutcome {
            text: out,
            dispositions,
        }
    }
}
