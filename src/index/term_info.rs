//! Per-term statistics and document membership.

use ahash::AHashMap;

use crate::document::{DocId, Document};

/// One document's entry in a term's posting map.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub doc_id: DocId,

    /// Log-damped frequency of the term in this document.
    pub term_frequency: f64,
}

/// Index-wide statistics for one term.
///
/// `document_frequency` always equals the number of entries in `documents`.
/// A `TermInfo` with no documents must not stay in the index.
#[derive(Debug, Clone)]
pub struct TermInfo {
    document_frequency: usize,
    collection_frequency: f64,
    documents: AHashMap<DocId, DocumentInfo>,
}

impl TermInfo {
    /// Create the entry for the first document containing `term`.
    pub fn new(document: &Document, term: &str) -> Self {
        let mut info = TermInfo {
            document_frequency: 0,
            collection_frequency: 0.0,
            documents: AHashMap::new(),
        };
        info.append_document(document, term);
        info
    }

    /// Record that `document` contains `term`.
    ///
    /// An existing entry for the same id is replaced and the counters adjusted,
    /// so the same document is never counted twice.
    pub fn append_document(&mut self, document: &Document, term: &str) {
        let term_frequency = document.tf_log(term).unwrap_or(0.0);
        let info = DocumentInfo {
            doc_id: document.id().to_string(),
            term_frequency,
        };

        match self.documents.insert(info.doc_id.clone(), info) {
            Some(previous) => {
                self.collection_frequency += term_frequency - previous.term_frequency;
            }
            None => {
                self.document_frequency += 1;
                self.collection_frequency += term_frequency;
            }
        }
    }

    /// Forget `doc_id`. Returns whether it was present.
    pub fn remove_document(&mut self, doc_id: &str) -> bool {
        match self.documents.remove(doc_id) {
            Some(previous) => {
                self.document_frequency -= 1;
                self.collection_frequency -= previous.term_frequency;
                if self.documents.is_empty() {
                    self.collection_frequency = 0.0;
                }
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document_frequency(&self) -> usize {
        self.document_frequency
    }

    /// Sum of the log-damped frequencies over all documents.
    pub fn collection_frequency(&self) -> f64 {
        self.collection_frequency
    }

    pub fn documents(&self) -> &AHashMap<DocId, DocumentInfo> {
        &self.documents
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.documents.contains_key(doc_id)
    }

    /// Ids of the documents containing the term.
    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, words: &[&str]) -> Document {
        Document::from_terms(id, words.join(" "), words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_new_term_info() {
        let info = TermInfo::new(&doc("d1", &["cat", "cat"]), "cat");

        assert_eq!(info.document_frequency(), 1);
        assert!((info.collection_frequency() - (1.0 + 2f64.ln())).abs() < 1e-12);
        assert!(info.contains("d1"));
    }

    #[test]
    fn test_append_and_remove() {
        let mut info = TermInfo::new(&doc("d1", &["cat"]), "cat");
        info.append_document(&doc("d2", &["cat", "dog"]), "cat");

        assert_eq!(info.document_frequency(), 2);
        assert_eq!(info.collection_frequency(), 2.0);

        assert!(info.remove_document("d1"));
        assert!(!info.remove_document("d1"));
        assert_eq!(info.document_frequency(), 1);
        assert_eq!(info.doc_ids().collect::<Vec<_>>(), vec!["d2"]);

        assert!(info.remove_document("d2"));
        assert!(info.is_empty());
        assert_eq!(info.collection_frequency(), 0.0);
    }

    #[test]
    fn test_append_same_document_replaces() {
        let mut info = TermInfo::new(&doc("d1", &["cat"]), "cat");
        info.append_document(&doc("d1", &["cat", "cat"]), "cat");

        assert_eq!(info.document_frequency(), 1);
        assert_eq!(info.documents().len(), 1);
        assert!((info.collection_frequency() - (1.0 + 2f64.ln())).abs() < 1e-12);
    }
}
