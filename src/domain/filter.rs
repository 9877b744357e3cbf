//! String predicates used to narrow the analysis.
//!
//! Two independent filters exist: the path filter (file paths, and raw type
//! references treated as paths) and the class filter (class names). An absent
//! filter accepts everything.

use anyhow::{Context, Result};
use regex::Regex;

pub trait Filter: Send + Sync {
    fn accepts(&self, value: &str) -> bool;
}

/// `None` accepts every value.
pub fn passes(filter: Option<&dyn Filter>, value: &str) -> bool {
    filter.is_none_or(|f| f.accepts(value))
}

/// Accepts values fully matched by a regular expression.
pub struct RegexFilter {
    regex: Regex,
}

impl RegexFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .with_context(|| format!("Invalid filter pattern: {pattern}"))?;
        Ok(Self { regex })
    }
}

impl Filter for RegexFilter {
    fn accepts(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Rejects values fully matched by a regular expression.
pub struct InverseRegexFilter {
    inner: RegexFilter,
}

impl InverseRegexFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            inner: RegexFilter::new(pattern)?,
        })
    }
}

impl Filter for InverseRegexFilter {
    fn accepts(&self, value: &str) -> bool {
        !self.inner.accepts(value)
    }
}

/// Accepts a value only when every member filter does.
pub struct AndFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AndFilter {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }
}

impl Filter for AndFilter {
    fn accepts(&self, value: &str) -> bool {
        self.filters.iter().all(|f| f.accepts(value))
    }
}

/// Adapts a closure into a [`Filter`].
pub struct FnFilter<F>(pub F);

impl<F> Filter for FnFilter<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accepts(&self, value: &str) -> bool {
        (self.0)(value)
    }
}
