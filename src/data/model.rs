use chrono::NaiveDate;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// WideTable – the raw spreadsheet export
// ---------------------------------------------------------------------------

/// One row of the wide export: a category label plus one cell per period
/// column. Blank or non-numeric cells are `None`.
#[derive(Debug, Clone)]
pub struct WideRow {
    pub category: String,
    pub cells: Vec<Option<f64>>,
}

/// The wide table as exported: period labels across, categories down.
/// `period_labels` keeps the header order; every row has exactly
/// `period_labels.len()` cells.
#[derive(Debug, Clone)]
pub struct WideTable {
    pub period_labels: Vec<String>,
    pub rows: Vec<WideRow>,
}

impl WideTable {
    /// Number of category rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no usable data.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.period_labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// MonthlySeries – the cleaned long-form series
// ---------------------------------------------------------------------------

/// A single (month, value) pair. Months are stored as the first day of the
/// month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered monthly series: dates strictly increasing, no duplicates.
/// The constructor sorts, so callers may feed observations in export order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    observations: Vec<Observation>,
}

impl MonthlySeries {
    /// Build a series from unordered observations. Sorts by date and
    /// rejects duplicate periods.
    pub fn from_observations(mut observations: Vec<Observation>) -> Result<Self, DataError> {
        observations.sort_by_key(|obs| obs.date);
        for pair in observations.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(DataError::DuplicatePeriod(pair[0].date));
            }
        }
        Ok(MonthlySeries { observations })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The dates in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|obs| obs.date)
    }

    /// The values in date order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|obs| obs.value)
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Natural-log transform. Values must be strictly positive; a
    /// non-positive value is a validation error rather than a silent
    /// NaN / -inf propagating downstream.
    pub fn ln(&self) -> Result<MonthlySeries, DataError> {
        let observations = self
            .observations
            .iter()
            .map(|obs| {
                if obs.value <= 0.0 {
                    return Err(DataError::NonPositiveValue {
                        date: obs.date,
                        value: obs.value,
                    });
                }
                Ok(Observation {
                    date: obs.date,
                    value: obs.value.ln(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MonthlySeries { observations })
    }

    /// Rebuild a series from already-ordered observations. Used by the
    /// band-pass filter, whose output dates are a sub-range of an input
    /// that already satisfied the ordering invariant.
    pub(crate) fn from_sorted_unchecked(observations: Vec<Observation>) -> Self {
        debug_assert!(observations.windows(2).all(|p| p[0].date < p[1].date));
        MonthlySeries { observations }
    }
}
