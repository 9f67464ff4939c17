//! Trivia surgery: the whitespace rules behind reordering.

use memberorder_types::container::Container;
use memberorder_types::syntax::Trivia;

const DEFAULT_EOL: &str = "\n";

/// Fallback end-of-line: the first one the container already uses.
pub fn detect_end_of_line(container: &Container) -> Trivia {
    container
        .members
        .iter()
        .flat_map(|m| m.tokens.iter())
        .flat_map(|t| t.leading.iter().chain(t.trailing.iter()))
        .find(|t| t.is_end_of_line())
        .cloned()
        .unwrap_or_else(|| Trivia::end_of_line(DEFAULT_EOL))
}

/// End-of-line to insert before a member, taken from its neighbourhood so that reordering the
/// container cannot change it: the one closing the previous member's trailing run, else the
/// first one in the member's own blank prefix.
pub fn line_break(prev_trailing: &[Trivia], leading: &[Trivia]) -> Option<Trivia> {
    if let Some(last) = prev_trailing.last()
        && last.is_end_of_line()
    {
        return Some(last.clone());
    }
    let (prefix, _) = split_leading(leading);
    prefix.iter().find(|t| t.is_end_of_line()).cloned()
}

/// Collapses a trailing run to at most one end-of-line.
///
/// Comments and directives stay exactly where they are; blank trivia after the last of them is
/// reduced to a single end-of-line if it contained one, and dropped otherwise.
pub fn normalize_trailing(run: &[Trivia]) -> Vec<Trivia> {
    let (material, suffix) = split_trailing(run);

    let mut out = material.to_vec();
    if let Some(eol) = suffix.iter().find(|t| t.is_end_of_line()) {
        out.push(eol.clone());
    }
    out
}

pub fn ends_with_end_of_line(run: &[Trivia]) -> bool {
    run.last().is_some_and(Trivia::is_end_of_line)
}

/// Splits a leading run into its blank prefix and the material (comments, directives) that
/// follows it.
pub fn split_leading(run: &[Trivia]) -> (&[Trivia], &[Trivia]) {
    let prefix_len = run.iter().position(|t| !t.is_blank()).unwrap_or(run.len());
    run.split_at(prefix_len)
}

/// Whitespace after the last end-of-line of a blank prefix: the member's own indentation.
pub fn indentation(prefix: &[Trivia]) -> &[Trivia] {
    let start = prefix
        .iter()
        .rposition(Trivia::is_end_of_line)
        .map_or(0, |i| i + 1);
    &prefix[start..]
}

/// Rebuilds a leading run as `newlines` end-of-lines, the member's own indentation, then its
/// original material.
pub fn respace_leading(run: &[Trivia], newlines: usize, eol: &Trivia) -> Vec<Trivia> {
    let (prefix, material) = split_leading(run);
    let indent = indentation(prefix);

    let mut out = Vec::with_capacity(newlines + indent.len() + material.len());
    out.extend(std::iter::repeat_n(eol.clone(), newlines));
    out.extend_from_slice(indent);
    out.extend_from_slice(material);
    out
}

/// Splits a trailing run into its material and the blank suffix after the last of it.
pub fn split_trailing(run: &[Trivia]) -> (&[Trivia], &[Trivia]) {
    let content_len = run
        .iter()
        .rposition(|t| !t.is_blank())
        .map_or(0, |i| i + 1);
    run.split_at(content_len)
}

/// Moves the blank prefix of `framing` in front of the material of `run`.
pub fn reframe_leading(framing: &[Trivia], run: &[Trivia]) -> Vec<Trivia> {
    let (prefix, _) = split_leading(framing);
    let (_, material) = split_leading(run);

    let mut out = prefix.to_vec();
    out.extend_from_slice(material);
    out
}

/// Appends the blank suffix of `framing` to the material of `run`.
pub fn reframe_trailing(framing: &[Trivia], run: &[Trivia]) -> Vec<Trivia> {
    let (material, _) = split_trailing(run);
    let (_, suffix) = split_trailing(framing);

    let mut out = material.to_vec();
    out.extend_from_slice(suffix);
    out
}
