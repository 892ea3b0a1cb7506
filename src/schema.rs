//! Record and page types shared by the extractor, lookup and output layers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One error code entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Symbolic name, e.g. `E_FAIL`
    pub value: String,
    /// Numeric code as printed on the page, e.g. `0x80004005`
    pub code: String,
    /// Whitespace-normalized description
    pub description: String,
}

/// Parsed records of one category, keyed by `value`.
///
/// Read-only once built. Keeps first-insertion order; a repeated value
/// replaces the earlier record in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    records: IndexMap<String, Record>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, record: Record) {
        self.records.insert(record.value.clone(), record);
    }

    /// Exact, case-sensitive lookup by value
    pub fn get(&self, value: &str) -> Option<&Record> {
        self.records.get(value)
    }

    /// The record used when no code is given: the first by insertion order.
    pub fn first(&self) -> Option<&Record> {
        self.records.first().map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Page {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut page = Page::new();
        for record in iter {
            page.insert(record);
        }
        page
    }
}

/// A record tagged with the category it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub category: String,
    #[serde(flatten)]
    pub record: Record,
}
