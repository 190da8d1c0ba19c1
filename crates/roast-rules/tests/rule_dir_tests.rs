//! Integration tests for loading rule directories
//!
//! These tests write rule files to a temporary directory and load them
//! through the public API.

use roast_rules::{RuleBook, RuleError, RuleFiles, RuleKind, RuleSet};
use std::fs;
use tempfile::TempDir;

fn write_rules(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(name), body).unwrap();
}

fn full_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_rules(
        &dir,
        "company.ini",
        "[DEFAULT]\nindustry = Unknown\n\n[industries]\nAcme Corp = Manufacturing\n",
    );
    write_rules(&dir, "study.ini", "[DEFAULT]\ndescription = A study\n");
    write_rules(&dir, "interaction.ini", "[DEFAULT]\ngroups = users:all\n");
    dir
}

#[test]
fn test_load_rule_directory() {
    let dir = full_dir();
    let book = RuleBook::load(dir.path()).unwrap();

    assert_eq!(book.company().origin(), "company.ini");
    assert_eq!(
        book.company()
            .resolve("Acme Corp", "industries", "industry")
            .unwrap(),
        "Manufacturing"
    );
    assert_eq!(
        book.study().resolve("Any", "descriptions", "description").unwrap(),
        "A study"
    );
    assert_eq!(
        book.get(RuleKind::Interaction)
            .resolve("Any", "groups", "groups")
            .unwrap(),
        "users:all"
    );
}

#[test]
fn test_missing_rule_file_fails_fast() {
    let dir = TempDir::new().unwrap();
    write_rules(&dir, "company.ini", "[DEFAULT]\n");
    write_rules(&dir, "study.ini", "[DEFAULT]\n");

    let err = RuleBook::load(dir.path()).unwrap_err();
    match err {
        RuleError::FileRead { path, .. } => {
            assert!(path.ends_with("interaction.ini"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_custom_file_names() {
    let dir = TempDir::new().unwrap();
    write_rules(&dir, "c.rules", "[DEFAULT]\nx = 1\n");
    write_rules(&dir, "s.rules", "[DEFAULT]\nx = 2\n");
    write_rules(&dir, "i.rules", "[DEFAULT]\nx = 3\n");

    let files = RuleFiles {
        company: "c.rules".to_string(),
        study: "s.rules".to_string(),
        interaction: "i.rules".to_string(),
    };
    let book = RuleBook::load_with(dir.path(), &files).unwrap();
    assert_eq!(book.study().resolve("n", "s", "x").unwrap(), "2");
}

#[test]
fn test_parse_error_reports_file_and_line() {
    let dir = full_dir();
    write_rules(&dir, "study.ini", "[DEFAULT]\ndescription = ok\nbroken line\n");

    let err = RuleBook::load(dir.path()).unwrap_err();
    match err {
        RuleError::Parse { origin, line, .. } => {
            assert_eq!(origin, "study.ini");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_from_file_direct() {
    let dir = full_dir();
    let rules = RuleSet::from_file(dir.path().join("company.ini")).unwrap();
    assert!(rules.has_section("industries"));
    assert!(rules.has_override("acme corp", "industries"));
}
