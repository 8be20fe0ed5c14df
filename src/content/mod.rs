//! Content module - front matter, documents, loading, and collection assembly

pub mod collection;
mod document;
mod frontmatter;
pub mod loader;

pub use collection::CollectionOptions;
pub use document::Document;
pub use frontmatter::FrontMatter;
pub use loader::{DocumentLoader, LoadReport};
