//! Known error-code categories, their source pages and extraction strategies.

use crate::error::{Error, Result};
use std::fmt;
use url::Url;

/// How a category's page is turned into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// First `<table>`, header row skipped, two `td[data-th]` cells per row.
    Default,
    /// Registered but without an algorithm. Extraction fails explicitly.
    Unimplemented,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Default => write!(f, "default"),
            Strategy::Unimplemented => write!(f, "unimplemented"),
        }
    }
}

/// A named class of error codes with its own source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: String,
    pub strategy: Strategy,
}

impl Category {
    pub fn new(name: impl Into<String>, url: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            strategy,
        }
    }

    /// Deterministic cache file name, `<category>.cache`.
    pub fn cache_file_name(&self) -> String {
        format!("{}.cache", self.name)
    }

    /// Parsed source location
    pub fn source_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }

    /// Fails for categories whose strategy has no algorithm.
    pub fn ensure_implemented(&self) -> Result<()> {
        match self.strategy {
            Strategy::Default => Ok(()),
            Strategy::Unimplemented => Err(Error::StrategyNotImplemented {
                category: self.name.clone(),
            }),
        }
    }
}

/// Ordered, fixed list of categories.
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<Category>,
}

impl Registry {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Lookup by exact, case-sensitive name
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Usage line built from the live category list.
    pub fn usage(&self, program: &str) -> String {
        format!("{} -t {} -v <error_value>", program, self.names().join("|"))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(vec![
            Category::new(
                "HRESULT",
                "https://msdn.microsoft.com/en-us/library/cc704587.aspx",
                Strategy::Default,
            ),
            Category::new(
                "NTSTATUS",
                "https://msdn.microsoft.com/en-us/library/cc704588.aspx",
                Strategy::Default,
            ),
            Category::new(
                "WIN32ERROR",
                "https://msdn.microsoft.com/en-us/library/cc231199.aspx",
                Strategy::Default,
            ),
            Category::new(
                "SYSTEMERRORCODES",
                "https://msdn.microsoft.com/en-us/library/windows/desktop/ms681382(v=vs.85).aspx",
                Strategy::Unimplemented,
            ),
        ])
    }
}
