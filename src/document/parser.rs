//! Bulk ingestion payload parser.
//!
//! Turns the uploaded JSON payload (one object or an array of objects) into
//! [`NewDocument`]s. Each object must carry a non-empty string `text`. The
//! optional `id` (string or integer), `title` (string) and `date` (RFC 3339
//! string) fields are lifted into the document when they have that shape.
//! Every other top-level field, including metadata of any other shape, is kept
//! verbatim in `properties`.
//!
//! Validation is all-or-nothing: the first invalid item aborts the whole
//! payload and nothing from it is returned.
//!
//! # Examples
//!
//! ```
//! use xiphos::document::DocumentParser;
//!
//! let docs = DocumentParser::new()
//!     .parse_str(r#"[{"id": "d1", "text": "hello", "lang": "en"}, {"text": "world"}]"#)
//!     .unwrap();
//!
//! assert_eq!(docs.len(), 2);
//! assert_eq!(docs[0].id.as_deref(), Some("d1"));
//! assert_eq!(docs[0].properties["lang"], "en");
//! assert_eq!(docs[1].id, None);
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::document::document::NewDocument;
use crate::error::{Result, XiphosError};

const ID_FIELD: &str = "id";
const TEXT_FIELD: &str = "text";
const TITLE_FIELD: &str = "title";
const DATE_FIELD: &str = "date";

/// Parser for bulk ingestion payloads.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        DocumentParser
    }

    /// Parse a payload held in a string.
    pub fn parse_str(&self, payload: &str) -> Result<Vec<NewDocument>> {
        let value: Value = serde_json::from_str(payload)?;
        self.parse_value(value)
    }

    /// Parse a payload from any reader.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<NewDocument>> {
        let value: Value = serde_json::from_reader(reader)?;
        self.parse_value(value)
    }

    /// Parse a payload stored in a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<NewDocument>> {
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse an already decoded payload.
    pub fn parse_value(&self, value: Value) -> Result<Vec<NewDocument>> {
        match value {
            Value::Object(object) => Ok(vec![self.parse_object(0, object)?]),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(object) => self.parse_object(index, object),
                    other => Err(XiphosError::validation(format!(
                        "item {index}: expected an object, found {}",
                        type_name(&other)
                    ))),
                })
                .collect(),
            other => Err(XiphosError::validation(format!(
                "expected an object or an array of objects, found {}",
                type_name(&other)
            ))),
        }
    }

    fn parse_object(&self, index: usize, mut object: Map<String, Value>) -> Result<NewDocument> {
        let text = match object.remove(TEXT_FIELD) {
            Some(Value::String(text)) if !text.is_empty() => text,
            Some(Value::String(_)) => {
                return Err(XiphosError::validation(format!(
                    "item {index}: field 'text' must not be empty"
                )));
            }
            Some(other) => {
                return Err(XiphosError::validation(format!(
                    "item {index}: field 'text' must be a string, found {}",
                    type_name(&other)
                )));
            }
            None => {
                return Err(XiphosError::validation(format!(
                    "item {index}: missing required field 'text'"
                )));
            }
        };

        // Metadata fields are lifted only when usable; anything else stays
        // in the properties bag untouched.
        let id = lift(&mut object, ID_FIELD, |value| match value {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(number) if number.is_u64() || number.is_i64() => {
                Some(number.to_string())
            }
            _ => None,
        });
        let title = lift(&mut object, TITLE_FIELD, |value| {
            value.as_str().map(str::to_string)
        });
        let date = lift(&mut object, DATE_FIELD, |value| {
            let date = DateTime::parse_from_rfc3339(value.as_str()?).ok()?;
            Some(date.with_timezone(&Utc))
        });

        Ok(NewDocument {
            id,
            title,
            text,
            date,
            properties: object,
        })
    }
}

/// Remove `field` from `object` if `convert` accepts its value. Nulls are
/// dropped.
fn lift<T>(
    object: &mut Map<String, Value>,
    field: &str,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = object.get(field)?;
    if value.is_null() {
        object.remove(field);
        return None;
    }
    let lifted = convert(value)?;
    object.remove(field);
    Some(lifted)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
