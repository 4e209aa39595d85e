/// Cyclical-component extraction.
///
/// The only resident is the Baxter-King band-pass filter: a symmetric
/// finite-window approximation of the ideal band-pass, used to isolate
/// business-cycle-length fluctuations from a log index series.

pub mod bandpass;
