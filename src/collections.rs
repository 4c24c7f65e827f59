//! Content collection loading and per-record validation reporting.
//!
//! Walks the content directory and validates every entry against its
//! collection's registered schema. Each first-level subdirectory of the
//! content directory is one collection; the files inside it are its
//! entries. Validation failures are collected per entry rather than
//! aborting the whole load, so the caller decides whether unaffected
//! records may still be used.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SiteError};
use crate::frontmatter::parse_frontmatter;
use crate::schema::CollectionRegistry;
use crate::validate::Record;

/// A validated content entry.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Source file path.
    pub path: PathBuf,

    /// Collection the entry belongs to.
    pub collection: String,

    /// Frontmatter fields, unchanged from what the author wrote.
    pub fields: Record,

    /// Document body below the frontmatter.
    pub body: String,
}

/// A content entry that failed to load or validate.
#[derive(Debug)]
pub struct EntryFailure {
    /// Collection the entry belongs to.
    pub collection: String,

    /// Source file path.
    pub path: PathBuf,

    /// Why the entry was rejected.
    pub error: SiteError,
}

/// Result of loading a content directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Validated entries per collection. Entry order within a collection
    /// carries no guarantee; consumers may sort by a field such as `date`.
    pub collections: BTreeMap<String, Vec<Entry>>,

    /// Entries rejected during loading or validation.
    pub failures: Vec<EntryFailure>,
}

impl LoadReport {
    /// Total number of validated entries across all collections.
    pub fn entry_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    /// True if every entry loaded and validated cleanly.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Validated entries for one collection, if any loaded.
    pub fn entries(&self, collection: &str) -> &[Entry] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Content loader that walks collection directories and validates entries.
#[derive(Debug)]
pub struct CollectionLoader<'a> {
    registry: &'a CollectionRegistry,
}

impl<'a> CollectionLoader<'a> {
    /// Create a loader over the given schema registry.
    #[must_use]
    pub fn new(registry: &'a CollectionRegistry) -> Self {
        Self { registry }
    }

    /// Load and validate all content under `content_dir`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the content directory is missing
    /// or a subdirectory names a collection with no registered schema.
    /// Authoring defects (bad frontmatter, schema violations) do not abort
    /// the load; they are reported in the returned [`LoadReport`].
    pub fn load(&self, content_dir: &Path) -> Result<LoadReport> {
        if !content_dir.is_dir() {
            return Err(SiteError::config(format!(
                "content directory not found: {}",
                content_dir.display()
            )));
        }

        info!(dir = %content_dir.display(), "loading content collections");

        let mut report = LoadReport::default();

        for dir_entry in fs::read_dir(content_dir)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();

            if !path.is_dir() {
                debug!(path = %path.display(), "skipping file outside any collection");
                continue;
            }

            let Some(collection) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if !self.registry.contains(collection) {
                return Err(SiteError::unknown_collection(collection));
            }

            self.load_collection(collection, &path, &mut report)?;
        }

        info!(
            entries = report.entry_count(),
            failures = report.failures.len(),
            "content load finished"
        );

        Ok(report)
    }

    /// Load every entry of one collection directory.
    fn load_collection(
        &self,
        collection: &str,
        dir: &Path,
        report: &mut LoadReport,
    ) -> Result<()> {
        // Make sure the collection appears in the report even when empty.
        report.collections.entry(collection.to_string()).or_default();

        for file in WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = file.path();
            let is_markdown = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "md" | "markdown"));
            if !is_markdown {
                debug!(path = %path.display(), "skipping non-content file");
                continue;
            }

            match self.load_entry(collection, path) {
                Ok(entry) => {
                    debug!(path = %path.display(), collection, "entry validated");
                    report
                        .collections
                        .get_mut(collection)
                        .expect("collection entry list exists")
                        .push(entry);
                }
                Err(error) if error.is_authoring_error() => {
                    warn!(path = %path.display(), %error, "rejecting entry");
                    report.failures.push(EntryFailure {
                        collection: collection.to_string(),
                        path: path.to_path_buf(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(())
    }

    /// Parse and validate a single entry file.
    fn load_entry(&self, collection: &str, path: &Path) -> Result<Entry> {
        let content = fs::read_to_string(path)?;
        let (fields, body) = parse_frontmatter(&content, path)?;

        self.registry.validate(collection, &fields)?;

        Ok(Entry {
            path: path.to_path_buf(),
            collection: collection.to_string(),
            fields,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    #[test]
    fn test_load_valid_content_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "docs/guides/quick-start.md",
            "---\ntitle: Quick Start\n---\nGet going fast.",
        );
        write(
            dir.path(),
            "release_notes/v0-1-0.md",
            "---\ntitle: \"v0.1.0\"\ndate: \"2024-01-14\"\nsemver: \"0.1.0\"\n---\nFirst release.",
        );

        let registry = CollectionRegistry::builtin();
        let report = CollectionLoader::new(&registry)
            .load(dir.path())
            .expect("load");

        assert!(report.is_clean());
        assert_eq!(report.entry_count(), 2);
        assert_eq!(report.entries("docs").len(), 1);

        let note = &report.entries("release_notes")[0];
        assert_eq!(note.fields.get("semver").and_then(|v| v.as_str()), Some("0.1.0"));
        assert_eq!(note.body, "First release.");
    }

    #[test]
    fn test_invalid_entry_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "release_notes/good.md",
            "---\ntitle: \"v1\"\ndate: \"2024-02-01\"\nsemver: \"1.0.0\"\n---\nOk.",
        );
        write(
            dir.path(),
            "release_notes/bad.md",
            "---\ntitle: \"v2\"\ndate: \"not-a-date\"\n---\nBroken.",
        );

        let registry = CollectionRegistry::builtin();
        let report = CollectionLoader::new(&registry)
            .load(dir.path())
            .expect("load");

        assert_eq!(report.entry_count(), 1);
        assert_eq!(report.failures.len(), 1);

        let failure = &report.failures[0];
        assert_eq!(failure.collection, "release_notes");
        assert!(failure.path.ends_with("bad.md"));
        match &failure.error {
            SiteError::Validation { violations, .. } => {
                assert!(violations.names_field("date"));
                assert!(violations.names_field("semver"));
            }
            other => panic!("Expected Validation, got: {other}"),
        }
    }

    #[test]
    fn test_unregistered_collection_directory_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "changelog/entry.md",
            "---\ntitle: x\n---\nBody.",
        );

        let registry = CollectionRegistry::builtin();
        let err = CollectionLoader::new(&registry)
            .load(dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            SiteError::UnknownCollection { collection } if collection == "changelog"
        ));
    }

    #[test]
    fn test_missing_content_dir() {
        let registry = CollectionRegistry::builtin();
        let err = CollectionLoader::new(&registry)
            .load(Path::new("/nonexistent/content"))
            .unwrap_err();
        assert!(err.to_string().contains("content directory not found"));
    }

    #[test]
    fn test_non_markdown_files_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "docs/styles.css", "body { color: red }");
        write(dir.path(), "docs/page.md", "---\ntitle: Page\n---\nText.");

        let registry = CollectionRegistry::builtin();
        let report = CollectionLoader::new(&registry)
            .load(dir.path())
            .expect("load");

        assert!(report.is_clean());
        assert_eq!(report.entry_count(), 1);
    }

    #[test]
    fn test_bad_frontmatter_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "docs/broken.md",
            "---\ntitle: [unclosed\n---\nBody.",
        );

        let registry = CollectionRegistry::builtin();
        let report = CollectionLoader::new(&registry)
            .load(dir.path())
            .expect("load");

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            SiteError::Frontmatter { .. }
        ));
    }
}
