//! Document structure and derived term statistics.

use std::sync::Arc;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a document, unique within one index.
pub type DocId = String;

/// Generate a fresh document id (UUID v4).
pub fn generate_id() -> DocId {
    uuid::Uuid::new_v4().to_string()
}

/// Caller-side document before preprocessing.
///
/// # Examples
///
/// ```
/// use xiphos::document::NewDocument;
///
/// let doc = NewDocument::new("The cat sat on the mat")
///     .with_id("d1")
///     .with_title("Cats")
///     .with_property("lang", "en");
///
/// assert_eq!(doc.id.as_deref(), Some("d1"));
/// assert_eq!(doc.properties["lang"], "en");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    /// Requested id; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The text to index. Must not be empty.
    pub text: String,

    /// Defaults to the ingestion time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// Opaque caller data, passed through unmodified.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl NewDocument {
    pub fn new<S: Into<String>>(text: S) -> Self {
        NewDocument {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_id<S: Into<DocId>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_property<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// An indexed document.
///
/// Immutable once built: the term statistics are derived exactly once from
/// `terms`, and an update replaces the whole document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    text: String,
    date: DateTime<Utc>,
    properties: Map<String, Value>,
    terms: Vec<String>,
    #[serde(skip)]
    tf_raw: AHashMap<String, u32>,
    #[serde(skip)]
    tf_log: AHashMap<String, f64>,
}

impl Document {
    /// Build a document from its caller-side form and its preprocessed terms.
    ///
    /// `id` wins over `new.id`, which lets the caller substitute a generated id.
    pub fn new(id: DocId, new: NewDocument, terms: Vec<String>) -> Self {
        let mut tf_raw: AHashMap<String, u32> = AHashMap::new();
        for term in &terms {
            *tf_raw.entry(term.clone()).or_insert(0) += 1;
        }

        let tf_log = tf_raw
            .iter()
            .map(|(term, &count)| (term.clone(), 1.0 + f64::from(count).ln()))
            .collect();

        Document {
            id,
            title: new.title,
            text: new.text,
            date: new.date.unwrap_or_else(Utc::now),
            properties: new.properties,
            terms,
            tf_raw,
            tf_log,
        }
    }

    /// Shorthand for a document with only an id, text and terms.
    pub fn from_terms<S: Into<DocId>, T: Into<String>>(id: S, text: T, terms: Vec<String>) -> Self {
        Self::new(id.into(), NewDocument::new(text), terms)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Terms in document order, duplicates included.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms (token count).
    pub fn length(&self) -> usize {
        self.terms.len()
    }

    /// Raw occurrence count of `term`; zero when absent.
    pub fn tf_raw(&self, term: &str) -> u32 {
        self.tf_raw.get(term).copied().unwrap_or(0)
    }

    /// Log-damped weight `1 + ln(count)` of `term`, if the document contains it.
    pub fn tf_log(&self, term: &str) -> Option<f64> {
        self.tf_log.get(term).copied()
    }

    /// Distinct terms with their log-damped weights.
    pub fn log_weights(&self) -> impl Iterator<Item = (&str, f64)> {
        self.tf_log.iter().map(|(term, &weight)| (term.as_str(), weight))
    }

    /// Distinct terms of the document.
    pub fn distinct_terms(&self) -> impl Iterator<Item = &str> {
        self.tf_raw.keys().map(String::as_str)
    }

    /// Number of distinct terms.
    pub fn distinct_term_count(&self) -> usize {
        self.tf_raw.len()
    }

    /// Rebuild the caller-side form, e.g. for an update that keeps metadata.
    pub fn to_new_document(&self) -> NewDocument {
        NewDocument {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            text: self.text.clone(),
            date: Some(self.date),
            properties: self.properties.clone(),
        }
    }
}

/// Shared handle to a document owned by an index.
pub type DocumentRef = Arc<Document>;

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_term_statistics() {
        let doc = Document::from_terms("d1", "cat cat dog", terms(&["cat", "cat", "dog"]));

        assert_eq!(doc.length(), 3);
        assert_eq!(doc.distinct_term_count(), 2);
        assert_eq!(doc.tf_raw("cat"), 2);
        assert_eq!(doc.tf_raw("bird"), 0);
        assert!((doc.tf_log("cat").unwrap() - (1.0 + 2f64.ln())).abs() < 1e-12);
        assert_eq!(doc.tf_log("dog"), Some(1.0));
        assert_eq!(doc.tf_log("bird"), None);
    }

    #[test]
    fn test_metadata_passthrough() {
        let date = DateTime::parse_from_rfc3339("2020-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let new = NewDocument::new("hello")
            .with_title("Greeting")
            .with_date(date)
            .with_property("rating", 5);

        let doc = Document::new("x".to_string(), new, terms(&["hello"]));

        assert_eq!(doc.id(), "x");
        assert_eq!(doc.title(), Some("Greeting"));
        assert_eq!(doc.date(), date);
        assert_eq!(doc.properties()["rating"], 5);
        assert_eq!(doc.to_new_document().id.as_deref(), Some("x"));
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::from_terms("empty", "the", Vec::new());
        assert_eq!(doc.length(), 0);
        assert_eq!(doc.distinct_term_count(), 0);
    }

    #[test]
    fn test_serialization_skips_statistics() {
        let doc = Document::from_terms("d1", "cat", terms(&["cat"]));
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["id"], "d1");
        assert_eq!(json["terms"][0], "cat");
        assert!(json.get("tf_raw").is_none());
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
