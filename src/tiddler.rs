use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single wiki record: named header fields plus body text.
///
/// Fields keep the order of their first occurrence in the source; setting a
/// field that already exists replaces its value in place. The body is stored
/// as the `text` field, set once after the header fields, so a header field
/// literally named `text` is overwritten by the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tiddler {
    fields: Map<String, Value>,
}

impl Tiddler {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header field, overwriting any earlier value in place
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(name.into(), Value::String(value.into()));
    }

    /// Set the body text
    pub fn set_text(&mut self, body: impl Into<String>) {
        self.set("text", body);
    }

    /// Look up a field value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// The identifying `title` field, if present
    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    /// The body text (empty string when no body was parsed)
    pub fn text(&self) -> &str {
        self.get("text").unwrap_or("")
    }

    /// Iterate fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|v| (name.as_str(), v)))
    }

    /// Number of fields, the `text` field included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the record into its JSON object representation
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
