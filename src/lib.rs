//! winerr: Windows error-code lookup backed by cached reference pages
//!
//! Pipeline:
//! - cache: fetch a category's page once, keep it as `<category>.cache`
//! - extract: parse the first table into value/code/description records
//! - lookup: memoized pages, selection by code

pub mod cache;
pub mod error;
pub mod extract;
pub mod logging;
pub mod lookup;
pub mod output;
pub mod registry;
pub mod schema;

pub use cache::DocumentCache;
pub use error::{Error, ParseError, Result};
pub use extract::{extract, Extraction};
pub use lookup::Lookup;
pub use registry::{Category, Registry, Strategy};
pub use schema::{Hit, Page, Record};
