//! End-to-end check of the repository's own site configuration and
//! content tree, the same path the `docsite check` command takes.

use std::path::PathBuf;

use docsite::{CollectionLoader, CollectionRegistry, SidebarEntry, SiteConfig, SiteError};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn repo_config_loads_and_validates() {
    let config = SiteConfig::load(&repo_root().join("site.toml")).expect("load site.toml");

    assert_eq!(config.title, "React-Plug");
    assert_eq!(config.table_of_contents.max_heading_level, 4);
    assert_eq!(config.custom_css.len(), 2);
    assert!(config.logo.as_ref().is_some_and(|l| l.replaces_title));
    assert!(config.social.contains_key("github"));

    let labels: Vec<&str> = config.sidebar.iter().map(SidebarEntry::label).collect();
    assert_eq!(labels, vec!["Guides", "Reference"]);
}

#[test]
fn repo_content_tree_is_clean() {
    let config = SiteConfig::load(&repo_root().join("site.toml")).expect("load site.toml");
    let registry = CollectionRegistry::builtin();

    let report = CollectionLoader::new(&registry)
        .load(&repo_root().join(&config.content_dir))
        .expect("load content");

    assert!(
        report.is_clean(),
        "repo content should validate cleanly: {:?}",
        report.failures
    );
    assert_eq!(report.entries("docs").len(), 3);
    assert_eq!(report.entries("release_notes").len(), 2);
}

#[test]
fn release_notes_sort_by_date() {
    let registry = CollectionRegistry::builtin();
    let report = CollectionLoader::new(&registry)
        .load(&repo_root().join("content"))
        .expect("load content");

    let mut dates: Vec<&str> = report
        .entries("release_notes")
        .iter()
        .filter_map(|e| e.fields.get("date").and_then(|v| v.as_str()))
        .collect();
    dates.sort_unstable();
    assert_eq!(dates, vec!["2024-01-14", "2024-03-02"]);
}

#[test]
fn check_rejects_broken_entry_but_keeps_the_rest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content = dir.path().join("content");

    std::fs::create_dir_all(content.join("release_notes")).expect("mkdir");
    std::fs::write(
        content.join("release_notes/ok.md"),
        "---\ntitle: \"v1.0.0\"\ndate: \"2025-06-01\"\nsemver: \"1.0.0\"\n---\nStable.",
    )
    .expect("write");
    std::fs::write(
        content.join("release_notes/broken.md"),
        "---\ndate: \"2025-06-02\"\nsemver: 2\n---\nNo title.",
    )
    .expect("write");

    let registry = CollectionRegistry::builtin();
    let report = CollectionLoader::new(&registry)
        .load(&content)
        .expect("load content");

    assert_eq!(report.entries("release_notes").len(), 1);
    assert_eq!(report.failures.len(), 1);

    match &report.failures[0].error {
        SiteError::Validation {
            collection,
            violations,
        } => {
            assert_eq!(collection, "release_notes");
            assert!(violations.names_field("title"));
            assert!(violations.names_field("semver"));
            assert!(!violations.names_field("date"));
        }
        other => panic!("expected a validation failure, got {other}"),
    }
}
