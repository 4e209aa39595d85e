use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cycle::bandpass::{self, BandPassConfig};
use crate::data::{loader, reshape};
use crate::error::DataError;
use crate::render::{render_chart, ChartConfig};

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// Category label of the all-industry production index row.
pub const TARGET_CATEGORY: &str = "전산업생산지수";
/// Header of the single non-period column in the export.
pub const CATEGORY_COLUMN: &str = "산업별 지수";

/// Everything the batch run needs besides the two paths.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub category_column: String,
    pub category: String,
    pub filter: BandPassConfig,
    pub chart: ChartConfig,
}

impl Default for PipelineConfig {
    /// Reproduces the source program: the all-industry row, the
    /// 18-96-month business-cycle band, the Korean-labeled chart.
    fn default() -> Self {
        PipelineConfig {
            category_column: CATEGORY_COLUMN.to_string(),
            category: TARGET_CATEGORY.to_string(),
            filter: BandPassConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

/// What the run produced, for the caller's confirmation message.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub observations: usize,
    pub filtered_len: usize,
    pub output: PathBuf,
}

// ---------------------------------------------------------------------------
// The batch run
// ---------------------------------------------------------------------------

/// Load → extract → log-transform → band-pass filter → render.
///
/// The missing-input check runs before anything else so a bad path
/// terminates cleanly without creating a partial output file. Every later
/// failure is equally fatal; there is no retry or partial-success mode.
pub fn run(input: &Path, output: &Path, config: &PipelineConfig) -> Result<PipelineSummary> {
    if !input.exists() {
        return Err(DataError::InputNotFound(input.to_path_buf()).into());
    }

    let table = loader::load_table(input, &config.category_column)
        .with_context(|| format!("loading {}", input.display()))?;

    let series = reshape::extract_series(&table, &config.category)?;
    log::info!(
        "Extracted {} observations for '{}' ({} to {})",
        series.len(),
        config.category,
        series.first().map(|o| o.date.format("%Y.%m").to_string()).unwrap_or_default(),
        series.last().map(|o| o.date.format("%Y.%m").to_string()).unwrap_or_default(),
    );

    let logged = series.ln()?;
    let cyclical = bandpass::apply(&config.filter, &logged)?;

    render_chart(&cyclical, output, &config.chart)?;

    Ok(PipelineSummary {
        observations: series.len(),
        filtered_len: cyclical.len(),
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_terminates_without_output() {
        let scratch = std::env::temp_dir();
        let input = scratch.join("cyclescope-no-such-file.csv");
        let output = scratch.join(format!(
            "cyclescope-missing-input-{}.png",
            std::process::id()
        ));

        let result = run(&input, &output, &PipelineConfig::default());

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::InputNotFound(_))
        ));
        assert!(!output.exists(), "no partial output may be created");
    }
}
