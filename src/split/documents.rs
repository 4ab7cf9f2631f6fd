//! Chunking the `content` of documents.

use crate::chain::Chain;
use crate::document::{CONTENT, Document};
use crate::error::ChainError;
use crate::seq::Seq;
use crate::split::TextSplitter;
use anyhow::Result;
use std::sync::Arc;

/// Replaces every document by one copy per chunk of its `content`.
///
/// Each copy keeps all other fields verbatim. Chunks of one document keep their order
/// and documents keep the order of the input sequence. Work happens lazily, one
/// source document at a time, as the output is consumed.
pub struct SplitDocuments<S> {
    splitter: Arc<S>,
}

impl<S: TextSplitter> SplitDocuments<S> {
    pub fn new(splitter: S) -> Self {
        Self {
            splitter: Arc::new(splitter),
        }
    }

    pub fn splitter(&self) -> &S {
        &self.splitter
    }

    /// Split a single document.
    ///
    /// # Errors
    /// [`ChainError::MissingField`] when the document has no `content`, or whatever
    /// the splitter fails with.
    pub fn split_document(&self, document: &Document) -> Result<Vec<Document>> {
        split_document(self.splitter.as_ref(), document)
    }
}

fn split_document<S: TextSplitter + ?Sized>(splitter: &S, document: &Document) -> Result<Vec<Document>> {
    let content = document
        .content()
        .ok_or_else(|| ChainError::MissingField(CONTENT.to_string()))?;
    let chunks = splitter.split(content)?;
    tracing::debug!(
        chunks = chunks.len(),
        source = document.source().unwrap_or_default(),
        "split document"
    );
    Ok(chunks
        .into_iter()
        .map(|chunk| document.with_content(chunk))
        .collect())
}

impl<S: TextSplitter + 'static> Chain<Seq<Document>, Seq<Document>> for SplitDocuments<S> {
    fn run(&self, input: Seq<Document>) -> Result<Seq<Document>> {
        let splitter = Arc::clone(&self.splitter);
        let out = input.flat_map(move |item| {
            match item.and_then(|doc| split_document(splitter.as_ref(), &doc)) {
                Ok(parts) => parts.into_iter().map(Ok).collect::<Vec<_>>(),
                Err(e) => vec![Err(e)],
            }
        });
        Ok(Seq::new(out))
    }
}
