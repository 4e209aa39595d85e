use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Validation errors raised while turning the raw export into a filtered
/// series. All of these are fatal; the pipeline has no retry or
/// partial-success mode.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("input table has no usable rows or period columns")]
    EmptyTable,

    #[error("category row '{0}' not found in input table")]
    CategoryNotFound(String),

    #[error("category '{0}' matches more than one row")]
    AmbiguousCategory(String),

    #[error("period label '{0}' does not match YYYY.MM")]
    InvalidPeriodLabel(String),

    #[error("duplicate period {0} after reshape")]
    DuplicatePeriod(NaiveDate),

    #[error("non-positive index value {value} at {date}: log transform undefined")]
    NonPositiveValue { date: NaiveDate, value: f64 },

    #[error("series has {len} observations but the filter window needs at least {needed}")]
    SeriesTooShort { len: usize, needed: usize },

    #[error("invalid filter configuration: {0}")]
    InvalidFilterConfig(String),
}
