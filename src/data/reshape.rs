use chrono::NaiveDate;

use super::model::{MonthlySeries, Observation, WideTable};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Wide -> long reshape for one category row
// ---------------------------------------------------------------------------

/// Suffix the statistics office appends to period labels carrying
/// provisional figures, e.g. `2025.04 p)`.
pub const PROVISIONAL_MARKER: &str = "p)";

/// Extract the series for `category` from the wide table: select exactly
/// one matching row, melt its period columns into (date, value) pairs,
/// drop missing cells, and return the sorted series.
///
/// Zero matching rows is a hard error, not an empty series; an empty
/// series here would silently degrade every downstream step.
pub fn extract_series(table: &WideTable, category: &str) -> Result<MonthlySeries, DataError> {
    let mut matches = table.rows.iter().filter(|row| row.category == category);

    let row = matches
        .next()
        .ok_or_else(|| DataError::CategoryNotFound(category.to_string()))?;
    if matches.next().is_some() {
        return Err(DataError::AmbiguousCategory(category.to_string()));
    }

    let mut observations = Vec::with_capacity(row.cells.len());
    for (label, cell) in table.period_labels.iter().zip(&row.cells) {
        let date = parse_period_label(label)?;
        // Missing cells are dropped, matching the cleaned export semantics.
        if let Some(value) = *cell {
            observations.push(Observation { date, value });
        }
    }

    let dropped = row.cells.len() - observations.len();
    if dropped > 0 {
        log::warn!("Dropped {dropped} missing values for category '{category}'");
    }

    MonthlySeries::from_observations(observations)
}

// ---------------------------------------------------------------------------
// Period-label parsing
// ---------------------------------------------------------------------------

/// Strip a trailing provisional marker (and the whitespace before it)
/// from a period label.
fn normalize_period_label(label: &str) -> &str {
    let trimmed = label.trim();
    match trimmed.strip_suffix(PROVISIONAL_MARKER) {
        Some(stripped) => stripped.trim_end(),
        None => trimmed,
    }
}

/// Parse a normalized `YYYY.MM` period label into the first day of that
/// month. Anything that does not match the pattern is fatal.
pub fn parse_period_label(label: &str) -> Result<NaiveDate, DataError> {
    let normalized = normalize_period_label(label);
    let invalid = || DataError::InvalidPeriodLabel(label.to_string());

    let (year_part, month_part) = normalized.split_once('.').ok_or_else(invalid)?;
    if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if month_part.is_empty()
        || month_part.len() > 2
        || !month_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = month_part.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::WideRow;

    fn month(year: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, m, 1).unwrap()
    }

    fn table(labels: &[&str], rows: Vec<(&str, Vec<Option<f64>>)>) -> WideTable {
        WideTable {
            period_labels: labels.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|(category, cells)| WideRow {
                    category: category.to_string(),
                    cells,
                })
                .collect(),
        }
    }

    #[test]
    fn parses_plain_and_provisional_labels() {
        assert_eq!(parse_period_label("2020.01").unwrap(), month(2020, 1));
        assert_eq!(parse_period_label("2025.04 p)").unwrap(), month(2025, 4));
        assert_eq!(parse_period_label("2025.04p)").unwrap(), month(2025, 4));
        assert_eq!(parse_period_label(" 2020.12 ").unwrap(), month(2020, 12));
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["2025.13", "abc", "2025-04", "25.04", "2025.", "2025.004"] {
            assert!(
                matches!(
                    parse_period_label(label),
                    Err(DataError::InvalidPeriodLabel(_))
                ),
                "label {label:?} should be rejected"
            );
        }
    }

    #[test]
    fn extracts_target_row_and_drops_missing() {
        let table = table(
            &["2020.02", "2020.01", "2020.03"],
            vec![
                ("광공업", vec![Some(1.0), Some(2.0), Some(3.0)]),
                ("전산업생산지수", vec![Some(101.0), Some(100.0), None]),
            ],
        );

        let series = extract_series(&table, "전산업생산지수").unwrap();
        assert_eq!(series.len(), 2);
        // Sorted by date even though the export listed 2020.02 first.
        let dates: Vec<NaiveDate> = series.dates().collect();
        assert_eq!(dates, vec![month(2020, 1), month(2020, 2)]);
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![100.0, 101.0]);
    }

    #[test]
    fn missing_category_is_a_named_error() {
        let table = table(&["2020.01"], vec![("광공업", vec![Some(1.0)])]);
        assert!(matches!(
            extract_series(&table, "전산업생산지수"),
            Err(DataError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn duplicate_category_rows_are_rejected() {
        let table = table(
            &["2020.01"],
            vec![
                ("전산업생산지수", vec![Some(1.0)]),
                ("전산업생산지수", vec![Some(2.0)]),
            ],
        );
        assert!(matches!(
            extract_series(&table, "전산업생산지수"),
            Err(DataError::AmbiguousCategory(_))
        ));
    }

    #[test]
    fn duplicate_period_columns_are_rejected() {
        let table = table(
            &["2020.01", "2020.01 p)"],
            vec![("전산업생산지수", vec![Some(1.0), Some(2.0)])],
        );
        assert!(matches!(
            extract_series(&table, "전산업생산지수"),
            Err(DataError::DuplicatePeriod(_))
        ));
    }
}
