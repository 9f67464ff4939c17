//! End-to-end tests for the `memberorder` binary.

#![allow(deprecated)]

use assert_cmd::Command;
use memberorder_types::container::{Container, ContainerKind, QualifiedName, ResolvedFacts};
use memberorder_types::document::SourceDocument;
use memberorder_types::member::{Member, MemberKind, TokenMarks};
use memberorder_types::syntax::{TextRange, Token, Trivia};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn memberorder() -> Command {
    Command::cargo_bin("memberorder").expect("memberorder binary")
}

fn member(kind: MemberKind, ty: &str, name: &str, tail: &str) -> Member {
    Member::new(
        kind,
        vec![
            Token::new(ty)
                .with_leading(vec![Trivia::whitespace("    ")])
                .with_trailing(vec![Trivia::whitespace(" ")]),
            Token::new(name),
            Token::new(tail).with_trailing(vec![Trivia::end_of_line("\n")]),
        ],
    )
    .with_marks(TokenMarks {
        name: Some(1),
        ..TokenMarks::default()
    })
}

const SOURCE: &str = "class Widget\n{\n    void Run() { }\n    int count;\n}\n";
const FIXED: &str = "class Widget\n{\n    int count;\n\n    void Run() { }\n}\n";

fn widget(base: Option<&str>) -> SourceDocument {
    let members = vec![
        member(MemberKind::Method, "void", "Run", "() { }"),
        member(MemberKind::Field, "int", "count", ";"),
    ];
    let start = "class Widget\n{\n".len();
    let end = SOURCE.len() - "}\n".len();
    let container = Container::new("Widget", ContainerKind::Class, TextRange::new(start, end), members)
        .with_facts(ResolvedFacts {
            base_type: base.map(QualifiedName::parse),
            layout: None,
        });
    SourceDocument::new("src/Widget.cs", SOURCE).with_containers(vec![container])
}

fn repo_with(doc: &SourceDocument) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/Widget.cs"), &doc.text).unwrap();
    fs::write(
        root.join("src/Widget.cs.members.json"),
        serde_json::to_string_pretty(doc).unwrap(),
    )
    .unwrap();
    td
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn explain_prints_order_table() {
    memberorder()
        .arg("explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("MO0001"))
        .stdout(predicate::str::contains("static constructor"));
}

#[test]
fn check_on_empty_tree_succeeds() {
    let td = tempfile::tempdir().unwrap();
    memberorder()
        .current_dir(td.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 finding(s)"));
}

#[test]
fn check_reports_violation_with_exit_2() {
    let td = repo_with(&widget(None));
    memberorder()
        .current_dir(td.path())
        .arg("check")
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "src/Widget.cs: MO0001 member 'count' is out of order",
        ));
}

#[test]
fn check_json_is_a_check_report() {
    let td = repo_with(&widget(None));
    let output = memberorder()
        .current_dir(td.path())
        .args(["check", "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["schema"], "memberorder.check.v1");
    assert_eq!(report["findings"][0]["subject"], "count");
}

#[test]
fn check_out_dir_receives_artifacts() {
    let td = repo_with(&widget(None));
    memberorder()
        .current_dir(td.path())
        .args(["check", "--out-dir", "artifacts"])
        .assert()
        .code(2);

    assert!(read(td.path(), "artifacts/check.json").contains("memberorder.check.v1"));
    assert!(read(td.path(), "artifacts/check.md").contains("`count`"));
}

#[test]
fn ignore_base_flag_exempts_container() {
    let td = repo_with(&widget(Some("Acme.Workflow.Script")));
    memberorder()
        .current_dir(td.path())
        .args(["check", "--ignore-base", "Acme.Workflow.Script"])
        .assert()
        .success();
}

#[test]
fn config_can_disable_default_exemption() {
    let td = repo_with(&widget(Some(
        "Microsoft.EntityFrameworkCore.Migrations.Migration",
    )));
    memberorder()
        .current_dir(td.path())
        .arg("check")
        .assert()
        .success();

    fs::write(
        td.path().join("memberorder.toml"),
        "[exemptions]\nignored_base_types = []\n",
    )
    .unwrap();
    memberorder()
        .current_dir(td.path())
        .arg("check")
        .assert()
        .code(2);
}

#[test]
fn fix_defaults_to_dry_run() {
    let td = repo_with(&widget(None));
    memberorder()
        .current_dir(td.path())
        .arg("fix")
        .assert()
        .success()
        .stdout(predicate::str::contains("diff --git a/src/Widget.cs b/src/Widget.cs"))
        .stderr(predicate::str::contains("dry-run"));

    assert_eq!(read(td.path(), "src/Widget.cs"), SOURCE);
}

#[test]
fn fix_apply_writes_source_and_backup() {
    let td = repo_with(&widget(None));
    memberorder()
        .current_dir(td.path())
        .args(["fix", "--apply"])
        .assert()
        .success();

    assert_eq!(read(td.path(), "src/Widget.cs"), FIXED);
    assert_eq!(read(td.path(), "src/Widget.cs.memberorder.bak"), SOURCE);
}

#[test]
fn fix_apply_without_backups() {
    let td = repo_with(&widget(None));
    memberorder()
        .current_dir(td.path())
        .args(["fix", "--apply", "--no-backups"])
        .assert()
        .success();

    assert_eq!(read(td.path(), "src/Widget.cs"), FIXED);
    assert!(!td.path().join("src/Widget.cs.memberorder.bak").exists());
}

#[test]
fn fix_apply_refuses_stale_source() {
    let td = repo_with(&widget(None));
    fs::write(td.path().join("src/Widget.cs"), "class Widget { }\n").unwrap();

    memberorder()
        .current_dir(td.path())
        .args(["fix", "--apply"])
        .assert()
        .code(2);

    assert_eq!(read(td.path(), "src/Widget.cs"), "class Widget { }\n");
}

#[test]
fn fix_out_dir_receives_artifacts() {
    let td = repo_with(&widget(None));
    memberorder()
        .current_dir(td.path())
        .args(["fix", "--out-dir", "out"])
        .assert()
        .success();

    assert!(read(td.path(), "out/fix.json").contains("memberorder.fix.v1"));
    assert!(read(td.path(), "out/patch.diff").contains("@@"));
    assert!(td.path().join("out/fix.md").exists());
}

#[test]
fn unknown_format_is_rejected() {
    memberorder()
        .args(["check", "--format", "yaml"])
        .assert()
        .failure();
}
