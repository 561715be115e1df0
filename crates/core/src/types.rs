//! Core document and chunk types
//!
//! A [`Document`] is handed to a chunker once ingestion has extracted and
//! cleaned its text. Chunkers produce [`Chunk`]s that reference their owning
//! document by id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key carrying the owning document's source
pub const METADATA_SOURCE: &str = "source";

/// Metadata key carrying the owning document's page number
pub const METADATA_PAGE_NUMBER: &str = "page_number";

/// A document ready to be chunked
///
/// # Examples
///
/// ```
/// use chunkwise_core::types::Document;
///
/// let doc = Document::new("doc-1", "Some content.", "guide.pdf")
///     .with_page_number(3)
///     .with_metadata("author", "Ada");
///
/// assert_eq!(doc.page_number, Some(3));
/// assert_eq!(doc.metadata.get("author").map(String::as_str), Some("Ada"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique document identifier
    pub id: String,
    /// Cleaned document text
    pub content: String,
    /// Where the document came from, e.g. a file name
    pub source: String,
    /// Page number within the source, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Free-form metadata copied onto every chunk
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Creates a document without page number or metadata
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            source: source.into(),
            page_number: None,
            metadata: HashMap::new(),
        }
    }

    /// Sets the page number
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Adds a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether the document has any non-whitespace content
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A contiguous span of a document's text
///
/// Chunks are created by a chunker through [`Chunk::from_document`] and are
/// not modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// `{document_id}_chunk_{index}`
    pub id: String,
    /// Chunk text
    pub text: String,
    /// Zero-based index within the owning document
    pub index: usize,
    /// Id of the owning document
    pub document_id: String,
    /// Metadata merged from the owning document
    pub metadata: HashMap<String, String>,
}

impl Chunk {
    /// Builds the deterministic chunk id for a document and index
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkwise_core::types::Chunk;
    ///
    /// assert_eq!(Chunk::make_id("report", 2), "report_chunk_2");
    /// ```
    pub fn make_id(document_id: &str, index: usize) -> String {
        format!("{}_chunk_{}", document_id, index)
    }

    /// Creates the chunk at `index` of `document`
    ///
    /// The chunk metadata holds the document source and page number, then
    /// the document's own metadata, which wins on key collisions.
    pub fn from_document(document: &Document, index: usize, text: impl Into<String>) -> Self {
        let mut metadata = HashMap::with_capacity(document.metadata.len() + 2);
        metadata.insert(METADATA_SOURCE.to_string(), document.source.clone());
        if let Some(page) = document.page_number {
            metadata.insert(METADATA_PAGE_NUMBER.to_string(), page.to_string());
        }
        metadata.extend(
            document
                .metadata
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            id: Self::make_id(&document.id, index),
            text: text.into(),
            index,
            document_id: document.id.clone(),
            metadata,
        }
    }

    /// Source of the owning document, if recorded
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(METADATA_SOURCE).map(String::as_str)
    }

    /// Page number of the owning document, if recorded
    pub fn page_number(&self) -> Option<u32> {
        self.metadata
            .get(METADATA_PAGE_NUMBER)
            .and_then(|p| p.parse().ok())
    }

    /// Number of characters in the chunk text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
