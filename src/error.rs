//! Error types for fetching, caching and extracting error-code pages.

use thiserror::Error;

/// Failures surfaced by the library.
///
/// A lookup across several categories never aborts on one of these; the
/// failing category is logged and treated as having no result.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a cache file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure while fetching a source document.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The source answered with a non-success status. Nothing is cached.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The category is registered but its extraction strategy has no algorithm.
    #[error("extraction strategy not implemented for category {category}")]
    StrategyNotImplemented { category: String },

    /// A source location in the registry is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// A table row that does not have the expected cell/paragraph structure.
///
/// Rows are numbered from 1, counting the first data row after the header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("row {row}: expected 2 labelled cells, found {found}")]
    CellCount { row: usize, found: usize },

    #[error("row {row}, cell {cell}: expected {expected} paragraph(s), found {found}")]
    ParagraphCount {
        row: usize,
        cell: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, cell {cell}: paragraph does not start with text")]
    MissingText { row: usize, cell: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
