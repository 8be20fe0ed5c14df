//! lectern: loads front-matter tagged blog content and orders it for rendering
//!
//! The pipeline is a synchronous batch transform: walk the source directory,
//! split the front-matter block off each document, validate the required
//! metadata, and assemble a date-ordered, draft-filtered collection for an
//! external renderer. Each load reads from disk afresh and returns immutable
//! documents; callers that want caching do it themselves.

pub mod config;
pub mod content;
pub mod error;

use anyhow::Result;
use std::path::Path;

use content::loader::DocumentLoader;
use content::{CollectionOptions, Document, LoadReport};
use error::LoadError;

/// The main application handle
#[derive(Clone)]
pub struct Lectern {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory
    pub source_dir: std::path::PathBuf,
}

impl Lectern {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
        })
    }

    /// Load every document under the source directory
    pub fn load(&self) -> Result<LoadReport> {
        DocumentLoader::new(self).load()
    }

    /// Load and assemble the published collection.
    ///
    /// Per-document errors come back alongside the collection, so callers
    /// can report them without losing the documents that did parse.
    pub fn collection(
        &self,
        options: &CollectionOptions,
    ) -> Result<(Vec<Document>, Vec<LoadError>)> {
        let report = self.load()?;
        let documents = content::collection::assemble(report.documents, options);
        Ok((documents, report.errors))
    }
}
