//! Content loader - walks the source directory and builds documents

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Document, FrontMatter};
use crate::error::LoadError;
use crate::Lectern;

/// Result of one load pass: parsed documents plus per-document failures.
///
/// A document that fails to read or parse contributes an error entry and
/// nothing else; it never aborts the siblings in the same load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub documents: Vec<Document>,
    pub errors: Vec<LoadError>,
}

impl LoadReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Loads documents from the source directory
pub struct DocumentLoader<'a> {
    lectern: &'a Lectern,
}

impl<'a> DocumentLoader<'a> {
    /// Create a new document loader
    pub fn new(lectern: &'a Lectern) -> Self {
        Self { lectern }
    }

    /// Lazy sequence of (path, raw text) pairs under the source dir.
    ///
    /// Finite and restartable: every call walks the directory afresh.
    /// Entries are yielded in file-name order for determinism.
    pub fn sources(&self) -> impl Iterator<Item = (PathBuf, io::Result<String>)> {
        WalkDir::new(&self.lectern.source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .map(|e| {
                let path = e.into_path();
                let text = fs::read_to_string(&path);
                (path, text)
            })
    }

    /// Load every document under the source directory.
    ///
    /// Fails only when the source directory itself is unreadable; individual
    /// file failures are collected into the report instead.
    pub fn load(&self) -> Result<LoadReport> {
        let dir = &self.lectern.source_dir;
        fs::read_dir(dir)
            .with_context(|| format!("source directory {:?} is not readable", dir))?;

        let tz = self.lectern.config.timezone()?;
        tracing::debug!("loading documents from {:?}", dir);

        Ok(collect_documents(tz, dir, self.sources()))
    }
}

/// Parse, validate, and de-duplicate a sequence of raw sources
fn collect_documents(
    tz: Tz,
    base: &Path,
    sources: impl Iterator<Item = (PathBuf, io::Result<String>)>,
) -> LoadReport {
    let mut report = LoadReport::default();
    let mut seen = HashSet::new();

    for (path, text) in sources {
        let source = relative_source(base, &path);

        if !seen.insert(source.clone()) {
            report.errors.push(LoadError::DuplicatePath {
                source_path: source,
            });
            continue;
        }

        let raw = match text {
            Ok(raw) => raw,
            Err(error) => {
                report.errors.push(LoadError::Io {
                    source_path: source,
                    error,
                });
                continue;
            }
        };

        match FrontMatter::parse(&raw, tz) {
            Ok((front, body)) => {
                report.documents.push(Document::new(source, path, front, body));
            }
            Err(error) => {
                tracing::warn!("failed to load {}: {}", source, error);
                report.errors.push(LoadError::Metadata {
                    source_path: source,
                    error,
                });
            }
        }
    }

    report
}

/// Source identifier: path relative to the source dir
fn relative_source(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn site_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Lectern) {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("source");
        fs::create_dir(&source).unwrap();
        for (name, content) in posts {
            write_post(&source, name, content);
        }
        let lectern = Lectern::new(tmp.path()).unwrap();
        (tmp, lectern)
    }

    #[test]
    fn test_broken_post_does_not_abort_siblings() {
        let (_tmp, lectern) = site_with_posts(&[
            (
                "good.md",
                "---\ntitle: Good\ndate: 2020-08-25\n---\nBody.\n",
            ),
            (
                "bad.md",
                "---\ntitle: Bad\ndate: 2020-08-24\n\nNo closing delimiter.\n",
            ),
        ]);

        let report = DocumentLoader::new(&lectern).load().unwrap();
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].title, "Good");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].source_path(), "bad.md");
        assert!(matches!(report.errors[0], LoadError::Metadata { .. }));
    }

    #[test]
    fn test_missing_required_field_excludes_document() {
        let (_tmp, lectern) = site_with_posts(&[(
            "untitled.md",
            "---\ndate: 2020-08-24\n---\nBody.\n",
        )]);

        let report = DocumentLoader::new(&lectern).load().unwrap();
        assert!(report.documents.is_empty());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_non_markdown_files_are_ignored() {
        let (_tmp, lectern) = site_with_posts(&[
            (
                "post.md",
                "---\ntitle: Post\ndate: 2020-08-24\n---\nBody.\n",
            ),
            ("notes.txt", "not a post"),
        ]);

        let report = DocumentLoader::new(&lectern).load().unwrap();
        assert_eq!(report.documents.len(), 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let lectern = Lectern::new(tmp.path()).unwrap();
        assert!(DocumentLoader::new(&lectern).load().is_err());
    }

    #[test]
    fn test_sources_restart_on_each_call() {
        let (_tmp, lectern) = site_with_posts(&[(
            "post.md",
            "---\ntitle: Post\ndate: 2020-08-24\n---\nBody.\n",
        )]);

        let loader = DocumentLoader::new(&lectern);
        assert_eq!(loader.sources().count(), 1);
        assert_eq!(loader.sources().count(), 1);
    }

    #[test]
    fn test_duplicate_source_is_reported() {
        let base = PathBuf::from("/posts");
        let text = "---\ntitle: Post\ndate: 2020-08-24\n---\nBody.\n";
        let entries = vec![
            (base.join("a.md"), Ok(text.to_string())),
            (base.join("a.md"), Ok(text.to_string())),
        ];

        let report = collect_documents(Tz::UTC, &base, entries.into_iter());
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], LoadError::DuplicatePath { .. }));
    }

    #[test]
    fn test_unreadable_file_is_a_per_item_error() {
        let base = PathBuf::from("/posts");
        let entries = vec![
            (
                base.join("ok.md"),
                Ok("---\ntitle: Ok\ndate: 2020-08-24\n---\n".to_string()),
            ),
            (
                base.join("broken.md"),
                Err(Error::new(ErrorKind::PermissionDenied, "denied")),
            ),
        ];

        let report = collect_documents(Tz::UTC, &base, entries.into_iter());
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], LoadError::Io { .. }));
        assert_eq!(report.errors[0].source_path(), "broken.md");
    }
}
