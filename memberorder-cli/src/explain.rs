//! Text for `memberorder explain`: the canonical order and the spacing rules.

use memberorder_domain::MemberCategory;
use memberorder_domain::classify::FALLBACK_RANK;
use memberorder_domain::{DEFAULT_IGNORED_NAMESPACE, DEFAULT_IGNORED_TYPE};
use memberorder_types::report::RULE_MEMBER_ORDER;

const RULE: &str =
    "================================================================================";
const SUBRULE: &str =
    "--------------------------------------------------------------------------------";

const ACCESSIBILITY: &[&str] = &[
    "public",
    "internal",
    "protected internal",
    "protected",
    "private protected",
    "private",
];

pub fn render_explanation() -> String {
    let mut out = String::new();

    out.push_str(&format!("{RULE}\nRULE: {RULE_MEMBER_ORDER} member order\n{RULE}\n\n"));

    out.push_str("MEMBER TYPE\n");
    out.push_str(SUBRULE);
    out.push('\n');
    out.push_str(&format!("  {:>4}  {}\n", "RANK", "CATEGORY"));
    for category in MemberCategory::ALL {
        out.push_str(&format!("  {:>4}  {}\n", category.rank(), category.label()));
    }
    out.push_str(&format!("  {:>4}  {}\n\n", FALLBACK_RANK, "anything else"));

    out.push_str("WITHIN A MEMBER TYPE\n");
    out.push_str(SUBRULE);
    out.push('\n');
    out.push_str(&format!("  1. accessibility: {}\n", ACCESSIBILITY.join(", ")));
    out.push_str(
        "     (no modifier: private, or public inside an interface)\n\
         \x20 2. interop-imported members after the rest\n\
         \x20 3. static before instance (const counts as static)\n\
         \x20 4. name, case-insensitive, then case-sensitive\n\
         \x20 5. ties (overloads) keep their original relative order\n\n",
    );

    out.push_str("SPACING\n");
    out.push_str(SUBRULE);
    out.push('\n');
    out.push_str(
        "  - one blank line between members of different groups\n\
         \x20 - one blank line between methods, except inside interfaces\n\
         \x20 - no blank lines between other members of the same group\n\
         \x20 - comments stay attached to the member they precede or follow\n\n",
    );

    out.push_str("EXEMPT CONTAINERS\n");
    out.push_str(SUBRULE);
    out.push('\n');
    out.push_str("  - fewer than two members\n");
    out.push_str("  - structs with a sequential or explicit layout marker\n");
    out.push_str(&format!(
        "  - subclasses of an ignored base type (default: {DEFAULT_IGNORED_NAMESPACE}.{DEFAULT_IGNORED_TYPE})\n"
    ));

    out
}
