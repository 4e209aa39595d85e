use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Font selection
// ---------------------------------------------------------------------------

/// Hangul-capable font family per platform. The chart carries Korean
/// captions, so the family must be one the platform actually ships.
pub const WINDOWS_FONT: &str = "Malgun Gothic";
pub const MACOS_FONT: &str = "AppleGothic";
/// Linux needs the font installed separately.
pub const FALLBACK_FONT: &str = "NanumGothic";

/// Text rendering configuration, passed explicitly into the renderer
/// instead of living in process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
}

impl FontConfig {
    /// Pick the font family for the current platform.
    pub fn detect() -> Self {
        Self::for_platform(std::env::consts::OS)
    }

    /// Recognized platforms: `windows`, `macos`; everything else falls
    /// back to NanumGothic.
    pub fn for_platform(os: &str) -> Self {
        let family = match os {
            "windows" => WINDOWS_FONT,
            "macos" => MACOS_FONT,
            _ => FALLBACK_FONT,
        };
        FontConfig {
            family: family.to_string(),
        }
    }

    /// Explicit override, for tests and non-default setups.
    pub fn with_family(family: impl Into<String>) -> Self {
        FontConfig {
            family: family.into(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig::detect()
    }
}

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Everything the renderer needs besides the series itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Caption above the plot.
    pub title: String,
    /// X-axis description.
    pub x_label: String,
    /// Y-axis description.
    pub y_label: String,
    /// Legend entry for the filtered series.
    pub series_label: String,
    /// Legend entry for the zero reference line.
    pub reference_label: String,
    /// Width of the image (pixels).
    pub width: u32,
    /// Height of the image (pixels).
    pub height: u32,
    pub font: FontConfig,
    pub caption_font_size: u32,
    pub label_font_size: u32,
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Default for ChartConfig {
    /// The source chart: Korean captions, 15x7-inch figure at 100 dpi.
    fn default() -> Self {
        ChartConfig {
            title: "전산업생산지수 경기변동 성분 (2000-2025)".to_string(),
            x_label: "연도".to_string(),
            y_label: "경기 순환 성분 (로그 편차)".to_string(),
            series_label: "경기 순환 성분 (밴드패스 필터)".to_string(),
            reference_label: "추세선 (0)".to_string(),
            width: 1500,
            height: 700,
            font: FontConfig::default(),
            caption_font_size: 32,
            label_font_size: 16,
            show_grid: true,
            show_legend: true,
        }
    }
}
