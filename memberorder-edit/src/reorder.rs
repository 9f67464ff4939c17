//! The reorder-and-respace engine.
//!
//! `fix` is a pure `Container -> Container` transform: members are stable-sorted by their sort
//! key, trailing runs are collapsed, blank lines between neighbours are recomputed from group
//! boundaries, and the container's outer framing is carried over from the original.

use crate::trivia::{
    detect_end_of_line, ends_with_end_of_line, line_break, normalize_trailing, reframe_leading,
    reframe_trailing, respace_leading,
};
use memberorder_domain::classify::{MemberCategory, SortKey, category, sort_keys, target_order};
use memberorder_types::container::{Container, ContainerKind};
use memberorder_types::member::Member;

/// Blank lines required between two neighbours in the fixed order.
///
/// Different groups are separated by one blank line. Inside a group members pack tightly,
/// except methods in non-interface containers, which always get one.
pub fn blank_lines_between(
    prev: (&Member, &SortKey),
    cur: (&Member, &SortKey),
    container: ContainerKind,
) -> usize {
    if prev.1.group() != cur.1.group() {
        return 1;
    }

    let both_methods = category(prev.0) == Some(MemberCategory::Method)
        && category(cur.0) == Some(MemberCategory::Method);
    if both_methods && !container.is_interface_like() {
        1
    } else {
        0
    }
}

/// Sorts and respaces `container`, returning the replacement.
pub fn fix(container: &Container) -> Container {
    let n = container.members.len();
    if n < 2 {
        return container.clone();
    }

    let keys = sort_keys(container);
    let order = target_order(&keys);
    let fallback_eol = detect_end_of_line(container);

    let mut members: Vec<Member> = order
        .iter()
        .map(|&i| {
            let m = &container.members[i];
            m.with_trailing(normalize_trailing(m.trailing()))
        })
        .collect();

    for pos in 1..n {
        let (prev, cur) = (order[pos - 1], order[pos]);
        let blank = blank_lines_between(
            (&container.members[prev], &keys[prev]),
            (&container.members[cur], &keys[cur]),
            container.kind,
        );
        let prev_trailing = members[pos - 1].trailing();
        let newlines = if ends_with_end_of_line(prev_trailing) {
            blank
        } else {
            blank + 1
        };
        let eol = line_break(prev_trailing, members[pos].leading())
            .unwrap_or_else(|| fallback_eol.clone());
        members[pos] = members[pos].with_leading(respace_leading(
            members[pos].leading(),
            newlines,
            &eol,
        ));
    }

    // Framing belongs to the enclosing scope: when a different member lands at either end, the
    // blank prefix before the first member and the line break after the last one come from the
    // original sequence. Comments stay with the member they annotate.
    if order[0] != 0 {
        let first = &container.members[0];
        members[0] = members[0].with_leading(reframe_leading(first.leading(), members[0].leading()));
    }
    if order[n - 1] != n - 1 {
        let last = &container.members[n - 1];
        let own = &container.members[order[n - 1]];
        members[n - 1] = members[n - 1]
            .with_trailing(normalize_trailing(&reframe_trailing(last.trailing(), own.trailing())));
    }

    container.with_members(members)
}
