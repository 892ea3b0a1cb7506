//! Table extraction: turn a fetched reference page into a [`Page`] of records.

use crate::error::{Error, ParseError, Result};
use crate::registry::{Category, Strategy};
use crate::schema::{Page, Record};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Records parsed from one document, plus the rows that could not be parsed.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub page: Page,
    /// Data rows seen, header excluded
    pub rows: usize,
    pub errors: Vec<ParseError>,
}

/// Extract records from `html` using the category's strategy.
///
/// `Ok(None)` means the document has no table (page unavailable).
/// Malformed rows are collected in [`Extraction::errors`] and do not stop
/// the remaining rows from being parsed.
pub fn extract(category: &Category, html: &str) -> Result<Option<Extraction>> {
    let extraction = match category.strategy {
        Strategy::Default => extract_table(html),
        Strategy::Unimplemented => {
            return Err(Error::StrategyNotImplemented {
                category: category.name.clone(),
            })
        }
    };

    if let Some(ext) = &extraction {
        for err in &ext.errors {
            warn!("{}: {}", category.name, err);
        }
    }

    Ok(extraction)
}

/// Default strategy: first `<table>`, header row skipped.
pub fn extract_table(html: &str) -> Option<Extraction> {
    let doc = Html::parse_document(html);
    let table = doc.select(&selector("table")).next()?;

    let rows: Vec<ElementRef> = table.select(&selector("tr")).skip(1).collect();
    debug!("Contains {} rows.", rows.len());

    let mut extraction = Extraction {
        rows: rows.len(),
        ..Default::default()
    };

    for (idx, row) in rows.into_iter().enumerate() {
        match parse_row(row, idx + 1) {
            Ok(record) => extraction.page.insert(record),
            Err(e) => extraction.errors.push(e),
        }
    }

    Some(extraction)
}

fn parse_row(row: ElementRef, row_no: usize) -> std::result::Result<Record, ParseError> {
    let cells: Vec<ElementRef> = row.select(&selector("td[data-th]")).collect();
    let [name_cell, desc_cell] = cells.as_slice() else {
        return Err(ParseError::CellCount {
            row: row_no,
            found: cells.len(),
        });
    };

    let paragraphs: Vec<ElementRef> = name_cell.select(&selector("p")).collect();
    let [value_p, code_p] = paragraphs.as_slice() else {
        return Err(ParseError::ParagraphCount {
            row: row_no,
            cell: 1,
            expected: 2,
            found: paragraphs.len(),
        });
    };

    let desc_p = desc_cell
        .select(&selector("p"))
        .next()
        .ok_or(ParseError::ParagraphCount {
            row: row_no,
            cell: 2,
            expected: 1,
            found: 0,
        })?;

    let missing = |cell| ParseError::MissingText { row: row_no, cell };
    let value = leading_text(*value_p).ok_or_else(|| missing(1))?;
    let code = leading_text(*code_p).ok_or_else(|| missing(1))?;
    let description = leading_text(desc_p).ok_or_else(|| missing(2))?;

    Ok(Record {
        value,
        code,
        description: normalize_description(&description),
    })
}

/// The element's first child, if it is a text node. Not trimmed.
fn leading_text(el: ElementRef) -> Option<String> {
    el.children()
        .next()
        .and_then(|node| node.value().as_text())
        .map(|text| String::from(&**text))
}

/// Strip every line and rejoin with single spaces.
pub fn normalize_description(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(|l| l.trim()).collect();
    lines.join(" ").trim_end_matches('\n').to_string()
}

fn selector(sel: &str) -> Selector {
    Selector::parse(sel).unwrap_or_else(|e| panic!("invalid built-in selector {sel:?}: {e}"))
}
