//! JSON:API documents - the envelopes every API response arrives in.

use serde::{Deserialize, Serialize};

/// Pagination and self links of a list document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// URL of this page.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Absolute URL of the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// A list document: `{data: [...], included: [...], links: {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    /// Primary records of this page.
    pub data: Vec<T>,
    /// Side-loaded related resources, kept untyped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<serde_json::Value>,
    /// Pagination links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl<T> Document<T> {
    /// The next-page locator, if any.
    pub fn next_link(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.next.as_deref())
    }
}

/// A single-resource document: `{data: {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleDocument<T> {
    /// The resource.
    pub data: T,
}

/// One batch of records plus an optional cursor to the next batch.
///
/// Transient: built from a [`Document`], consumed by the paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records in server order.
    pub items: Vec<T>,
    /// Locator of the next page.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Whether this is the last page.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

impl<T> From<Document<T>> for Page<T> {
    fn from(doc: Document<T>) -> Self {
        let next = doc.next_link().map(str::to_string);
        Self {
            items: doc.data,
            next,
        }
    }
}
