//! Collection assembly - draft filtering and date ordering

use super::Document;

/// Options controlling collection assembly
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionOptions {
    /// Include documents marked `draft: true`
    pub include_drafts: bool,
}

/// Sort documents in place: date descending, source path ascending on ties.
///
/// The sort is stable and total, so sorting an already-sorted slice is a
/// no-op.
pub fn sort(documents: &mut [Document]) {
    documents.sort_by(|a, b| a.collection_cmp(b));
}

/// Filter drafts per the options, then order by date. Pure: no I/O.
pub fn assemble(documents: Vec<Document>, options: &CollectionOptions) -> Vec<Document> {
    let mut documents: Vec<Document> = documents
        .into_iter()
        .filter(|doc| options.include_drafts || !doc.draft)
        .collect();
    sort(&mut documents);
    documents
}
