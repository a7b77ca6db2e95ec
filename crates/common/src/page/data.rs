use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Everything a page stores apart from its children:
//  the wiki text itself, plus free-form string properties
//  (think `Test`, `Suite`, `Help`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageData {
    content: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,
}

impl PageData {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Set a property, returning the previous value if any
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    /// Split into content and properties, e.g. for writing them out separately
    pub fn into_parts(self) -> (String, BTreeMap<String, String>) {
        (self.content, self.properties)
    }

    pub fn from_parts(content: String, properties: BTreeMap<String, String>) -> Self {
        Self {
            content,
            properties,
        }
    }
}
