use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::{Error, ErrorKind, Result};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Bucket identifier for the events of one calendar month.
///
/// The key is the zero-based month index directly followed by the full year,
/// e.g. April 2024 becomes `"32024"`. There is no separator, so February 12024
/// and December 2024 both map to `"112024"`. Stored keys rely
/// on this exact layout, so it is kept as is.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        MonthKey(format!("{}{}", date.month0(), date.year()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MonthKey {
    fn from(key: &str) -> Self {
        MonthKey(key.to_owned())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        Error::new(
            ErrorKind::DateParse,
            &format!("'{}' is not a DD/MM/YYYY date ({})", s, e),
        )
    })
}
