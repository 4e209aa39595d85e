//! cyclescope: business-cycle extraction and charting for monthly
//! production indices.
//!
//! A single-shot batch pipeline: read a wide spreadsheet export of a
//! seasonally adjusted industrial production index, reshape one category
//! row into an ordered monthly series, take natural logs, extract the
//! cyclical component with a Baxter-King band-pass filter, and render a
//! labeled PNG line chart with a zero reference line.

pub mod color;
pub mod cycle;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;
