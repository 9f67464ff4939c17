//! Document planning, batch commit and disk apply.

use camino::Utf8PathBuf;
use memberorder_domain::Analyzer;
use memberorder_edit::{ApplyOptions, DocumentPlan, apply_fixes, plan_document, render_patch};
use memberorder_types::container::{Container, ContainerKind};
use memberorder_types::document::SourceDocument;
use memberorder_types::member::{Member, MemberKind, TokenMarks};
use memberorder_types::report::FixStatus;
use memberorder_types::syntax::{TextRange, Token, Trivia};
use pretty_assertions::assert_eq;

fn member(indent: &str, kind: MemberKind, words: &[&str], tail: &str) -> Member {
    let mut tokens: Vec<Token> = words
        .iter()
        .map(|w| Token::new(*w).with_trailing(vec![Trivia::whitespace(" ")]))
        .collect();
    tokens[0].leading = vec![Trivia::whitespace(indent)];
    if let Some(last) = tokens.last_mut() {
        last.trailing.clear();
    }
    tokens.push(Token::new(tail).with_trailing(vec![Trivia::end_of_line("\n")]));

    Member::new(kind, tokens).with_marks(TokenMarks {
        name: Some(words.len() - 1),
        ..TokenMarks::default()
    })
}

const HEADER: &str = "class Widget\n{\n";

fn widget_doc() -> SourceDocument {
    let members = vec![
        member("    ", MemberKind::Method, &["void", "Run"], "() { }"),
        member("    ", MemberKind::Field, &["int", "count"], ";"),
    ];
    let body: String = members.iter().map(Member::to_source).collect();
    let span = TextRange::new(HEADER.len(), HEADER.len() + body.len());
    let text = format!("{HEADER}{body}}}\n");

    SourceDocument::new("src/Widget.cs", text).with_containers(vec![Container::new(
        "Widget",
        ContainerKind::Class,
        span,
        members,
    )])
}

const FIXED_WIDGET: &str = "class Widget\n{\n    int count;\n\n    void Run() { }\n}\n";

fn plan(doc: &SourceDocument) -> DocumentPlan {
    plan_document(doc, &Analyzer::default(), || false)
}

#[test]
fn violating_container_is_rewritten_in_place() {
    let p = plan(&widget_doc());
    assert!(p.is_changed());
    assert_eq!(p.after, FIXED_WIDGET);
    assert_eq!(p.results.len(), 1);
    assert_eq!(p.results[0].status, FixStatus::Applied);
    assert_eq!(p.results[0].container, "Widget");
}

#[test]
fn ordered_document_produces_no_results() {
    let p = plan(&widget_doc());
    let mut doc = SourceDocument::new("src/Widget.cs", p.after.clone());
    let members = vec![
        member("    ", MemberKind::Field, &["int", "count"], ";"),
        member("    ", MemberKind::Method, &["void", "Run"], "() { }"),
    ];
    let body: String = members.iter().map(Member::to_source).collect();
    doc.containers = vec![Container::new(
        "Widget",
        ContainerKind::Class,
        TextRange::new(HEADER.len(), HEADER.len() + body.len()),
        members,
    )];

    let again = plan(&doc);
    assert!(!again.is_changed());
    assert!(again.results.is_empty());
}

#[test]
fn stale_container_is_unresolved() {
    let mut doc = widget_doc();
    doc.text = doc.text.replace("count", "total");

    let p = plan(&doc);
    assert!(!p.is_changed());
    assert_eq!(p.count(FixStatus::Unresolved), 1);
}

#[test]
fn results_follow_document_order() {
    let widget = widget_doc();
    let members = vec![
        member("    ", MemberKind::Method, &["void", "Go"], "() { }"),
        member("    ", MemberKind::Field, &["int", "speed"], ";"),
    ];
    let body: String = members.iter().map(Member::to_source).collect();
    let header = format!("{}class Gadget\n{{\n", widget.text);
    let span = TextRange::new(header.len(), header.len() + body.len());
    let text = format!("{header}{}}}\n", body.replace("speed", "rate"));

    let mut containers = widget.containers.clone();
    containers.push(Container::new("Gadget", ContainerKind::Class, span, members));
    let doc = SourceDocument::new("src/Widget.cs", text).with_containers(containers);

    let p = plan(&doc);
    let order: Vec<(&str, FixStatus)> = p
        .results
        .iter()
        .map(|r| (r.container.as_str(), r.status))
        .collect();
    assert_eq!(
        order,
        vec![("Widget", FixStatus::Applied), ("Gadget", FixStatus::Unresolved)]
    );
    assert!(p.after.starts_with(FIXED_WIDGET));
}

#[test]
fn nested_fix_overlapping_parent_is_skipped() {
    let header = "class Outer\n{\n";
    let run = member("    ", MemberKind::Method, &["void", "Run"], "() { }");
    let go = member("        ", MemberKind::Method, &["void", "Go"], "() { }");
    let y = member("        ", MemberKind::Field, &["int", "y"], ";");
    let x = member("    ", MemberKind::Field, &["int", "x"], ";");

    let mut inner_tokens = vec![
        Token::new("class")
            .with_leading(vec![Trivia::whitespace("    ")])
            .with_trailing(vec![Trivia::whitespace(" ")]),
        Token::new("Inner").with_trailing(vec![Trivia::end_of_line("\n")]),
        Token::new("{")
            .with_leading(vec![Trivia::whitespace("    ")])
            .with_trailing(vec![Trivia::end_of_line("\n")]),
    ];
    inner_tokens.extend(go.tokens.iter().cloned());
    inner_tokens.extend(y.tokens.iter().cloned());
    inner_tokens.push(
        Token::new("}")
            .with_leading(vec![Trivia::whitespace("    ")])
            .with_trailing(vec![Trivia::end_of_line("\n")]),
    );
    let inner_member = Member::new(MemberKind::Class, inner_tokens).with_marks(TokenMarks {
        name: Some(1),
        ..TokenMarks::default()
    });

    let outer_members = vec![run.clone(), inner_member, x];
    let outer_body: String = outer_members.iter().map(Member::to_source).collect();
    let outer_span = TextRange::new(header.len(), header.len() + outer_body.len());

    let inner_start = header.len() + run.to_source().len() + "    class Inner\n    {\n".len();
    let inner_len = go.to_source().len() + y.to_source().len();
    let inner_span = TextRange::new(inner_start, inner_start + inner_len);

    let doc = SourceDocument::new("src/Outer.cs", format!("{header}{outer_body}}}\n"))
        .with_containers(vec![
            Container::new("Outer", ContainerKind::Class, outer_span, outer_members),
            Container::new("Inner", ContainerKind::Class, inner_span, vec![go, y]),
        ]);

    let p = plan(&doc);
    assert_eq!(p.results[0].status, FixStatus::Applied);
    assert_eq!(p.results[1].status, FixStatus::SkippedOverlap);
    assert_eq!(
        p.after,
        "class Outer\n{\n    int x;\n\n    void Run() { }\n\n    class Inner\n    {\n        void Go() { }\n        int y;\n    }\n}\n"
    );
}

#[test]
fn cancelled_planning_touches_nothing() {
    let p = plan_document(&widget_doc(), &Analyzer::default(), || true);
    assert!(!p.is_changed());
    assert!(p.results.is_empty());
}

#[test]
fn patch_names_the_document() {
    let p = plan(&widget_doc());
    let patch = render_patch(&[p]);
    assert!(patch.starts_with("diff --git a/src/Widget.cs b/src/Widget.cs\n"));
    assert!(patch.contains("@@"));
    assert!(patch.contains("-    void Run() { }") || patch.contains("-    int count;"));
}

fn repo_with(doc: &SourceDocument) -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(root.join(&doc.path), &doc.text).unwrap();
    (dir, root)
}

#[test]
fn apply_writes_fixed_text_and_backup() {
    let doc = widget_doc();
    let (_dir, root) = repo_with(&doc);
    let p = plan(&doc);

    let opts = ApplyOptions {
        dry_run: false,
        ..ApplyOptions::default()
    };
    let files = apply_fixes(&root, &[p], &opts).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(
        std::fs::read_to_string(root.join("src/Widget.cs")).unwrap(),
        FIXED_WIDGET
    );
    let backup = files[0].backup_path.as_deref().expect("backup path");
    assert!(backup.ends_with("Widget.cs.memberorder.bak"));
    assert_eq!(std::fs::read_to_string(backup).unwrap(), doc.text);
}

#[test]
fn dry_run_reports_but_does_not_write() {
    let doc = widget_doc();
    let (_dir, root) = repo_with(&doc);
    let p = plan(&doc);

    let files = apply_fixes(&root, &[p], &ApplyOptions::default()).unwrap();

    assert_eq!(files.len(), 1);
    assert_ne!(files[0].sha256_before, files[0].sha256_after);
    assert_eq!(
        std::fs::read_to_string(root.join("src/Widget.cs")).unwrap(),
        doc.text
    );
}

#[test]
fn changed_file_blocks_apply() {
    let doc = widget_doc();
    let (_dir, root) = repo_with(&doc);
    let p = plan(&doc);
    std::fs::write(root.join("src/Widget.cs"), "class Widget { }\n").unwrap();

    let opts = ApplyOptions {
        dry_run: false,
        backup_enabled: false,
        ..ApplyOptions::default()
    };
    let err = apply_fixes(&root, &[p], &opts).unwrap_err();

    assert!(err.is_policy_block());
    assert_eq!(err.exit_code(), 2);
    assert_eq!(
        std::fs::read_to_string(root.join("src/Widget.cs")).unwrap(),
        "class Widget { }\n"
    );
}
