//! Tunable constants for color discovery.
//!
//! The defaults are the values the converter has always shipped with. They
//! are kept as-is rather than re-derived so that detection results stay
//! stable across versions.

/// Subject color preselected when the caller has no better idea.
pub const DEFAULT_SUBJECT_HEX: &str = "#42D6FF";

/// Crop tolerance preselected when the caller has no better idea.
pub const DEFAULT_TOLERANCE: u32 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Longest side of the working thumbnail used for counting colors.
    pub thumbnail_max: u32,
    /// Pixels with alpha below this are treated as transparent.
    pub alpha_threshold: u8,
    /// Pixels closer than this (RGB distance) to the background are skipped.
    pub background_distance: f64,
    /// Candidates need lightness strictly inside `(min_lightness, max_lightness)`.
    pub min_lightness: f64,
    pub max_lightness: f64,
    /// Candidates need saturation strictly above this.
    pub min_saturation: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thumbnail_max: 256,
            alpha_threshold: 128,
            background_distance: 50.0,
            min_lightness: 0.1,
            max_lightness: 0.9,
            min_saturation: 0.15,
        }
    }
}

impl AnalysisConfig {
    /// Whether an HSL lightness/saturation pair counts as a vibrant color.
    pub(crate) fn is_vibrant(&self, lightness: f64, saturation: f64) -> bool {
        self.min_lightness < lightness
            && lightness < self.max_lightness
            && saturation > self.min_saturation
    }
}
