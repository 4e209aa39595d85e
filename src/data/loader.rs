use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{WideRow, WideTable};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wide index table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row `<category column>, <period>, <period>, ...`,
///   one record per category (the statistics-office export layout)
/// * `.json` – records-oriented: `[{ "<category column>": "...", "<period>": 103.2, ... }, ...]`
///
/// `category_column` names the single non-period column (e.g. `산업별 지수`);
/// every other column is treated as a period label.
pub fn load_table(path: &Path, category_column: &str) -> Result<WideTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path, category_column)?,
        "json" => load_json(path, category_column)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    if table.is_empty() {
        return Err(DataError::EmptyTable.into());
    }
    log::info!(
        "Loaded {} category rows x {} period columns from {}",
        table.len(),
        table.period_labels.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one header row; the category column may appear at any
/// position, all remaining columns are period labels. Blank cells become
/// missing values; anything else must parse as a number.
fn load_csv(path: &Path, category_column: &str) -> Result<WideTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let category_idx = headers
        .iter()
        .position(|h| h == category_column)
        .with_context(|| format!("CSV missing '{category_column}' column"))?;

    let period_labels: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != category_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let category = record
            .get(category_idx)
            .unwrap_or("")
            .trim()
            .to_string();

        let mut cells = Vec::with_capacity(period_labels.len());
        for (col_idx, raw) in record.iter().enumerate() {
            if col_idx == category_idx {
                continue;
            }
            cells.push(parse_cell(raw).with_context(|| {
                format!("CSV row {row_no}, column '{}'", headers[col_idx])
            })?);
        }
        rows.push(WideRow { category, cells });
    }

    Ok(WideTable {
        period_labels,
        rows,
    })
}

/// A blank cell is a missing value; anything else must be a number.
fn parse_cell(raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = trimmed
        .parse::<f64>()
        .with_context(|| format!("'{trimmed}' is not a number"))?;
    Ok(Some(value))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "산업별 지수": "전산업생산지수", "2020.01": 105.3, "2020.02": null, ... },
///   ...
/// ]
/// ```
///
/// Period labels are taken from the first record; every record must carry
/// the same period keys.
fn load_json(path: &Path, category_column: &str) -> Result<WideTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;
    let Some(first) = records.first() else {
        return Ok(WideTable {
            period_labels: Vec::new(),
            rows: Vec::new(),
        });
    };

    let period_labels: Vec<String> = first
        .as_object()
        .context("Row 0 is not a JSON object")?
        .keys()
        .filter(|k| *k != category_column)
        .cloned()
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let category = obj
            .get(category_column)
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or non-string '{category_column}'"))?
            .trim()
            .to_string();

        let mut cells = Vec::with_capacity(period_labels.len());
        for label in &period_labels {
            let cell = match obj.get(label) {
                None | Some(JsonValue::Null) => None,
                Some(value) => Some(value.as_f64().with_context(|| {
                    format!("Row {i}, '{label}': not a number")
                })?),
            };
            cells.push(cell);
        }
        rows.push(WideRow { category, cells });
    }

    Ok(WideTable {
        period_labels,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("cyclescope-loader-{}-{name}", std::process::id()))
    }

    #[test]
    fn csv_round_trip_with_missing_cells() {
        let path = scratch_path("basic.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "산업별 지수,2020.01,2020.02,2020.03").unwrap();
        writeln!(file, "전산업생산지수,100.1,,102.3").unwrap();
        writeln!(file, "광공업,99.0,98.5,97.9").unwrap();
        drop(file);

        let table = load_table(&path, "산업별 지수").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.period_labels, vec!["2020.01", "2020.02", "2020.03"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].category, "전산업생산지수");
        assert_eq!(table.rows[0].cells, vec![Some(100.1), None, Some(102.3)]);
    }

    #[test]
    fn csv_non_numeric_cell_is_an_error() {
        let path = scratch_path("garbage.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "산업별 지수,2020.01").unwrap();
        writeln!(file, "전산업생산지수,abc").unwrap();
        drop(file);

        let result = load_table(&path, "산업별 지수");
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn json_records_layout() {
        let path = scratch_path("basic.json");
        std::fs::write(
            &path,
            r#"[{"산업별 지수": "전산업생산지수", "2020.01": 100.1, "2020.02": null}]"#,
        )
        .unwrap();

        let table = load_table(&path, "산업별 지수").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].cells.len(), 2);
        assert!(table.rows[0].cells.contains(&Some(100.1)));
        assert!(table.rows[0].cells.contains(&None));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let result = load_table(Path::new("table.xlsx"), "산업별 지수");
        assert!(result.is_err());
    }
}
