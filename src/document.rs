//! Documents: ordered string-to-string records flowing through pipelines.
//!
//! Keys are unique. Insertion order is kept for serialization and display, but two
//! documents with the same entries in a different order compare equal.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key holding the text body.
pub const CONTENT: &str = "content";
/// Key holding a provenance label.
pub const SOURCE: &str = "source";
/// Key carrying the question of a retrieval-augmented flow.
pub const QUESTION: &str = "question";

/// One unit of content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: IndexMap<String, String>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite `key`. Overwriting keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.get(CONTENT)
    }

    pub fn source(&self) -> Option<&str> {
        self.get(SOURCE)
    }

    pub fn question(&self) -> Option<&str> {
        self.get(QUESTION)
    }

    /// A copy of this document with `content` replaced and every other key kept.
    #[must_use]
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.insert(CONTENT, content);
        copy
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Document {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Document {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}
