//! Validation configuration: one immutable record of every tunable
//! threshold and toggle for a single run.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default maximum page count.
pub const DEFAULT_MAX_PAGES: u32 = 1;
/// Default maximum file size in kilobytes.
pub const DEFAULT_MAX_FILE_SIZE_KB: f64 = 500.0;
/// Default minimum font size in points.
pub const DEFAULT_MIN_FONT: f64 = 8.0;
/// Default maximum font size in points.
pub const DEFAULT_MAX_FONT: f64 = 21.0;
/// Default saturation tolerance for the grayscale check.
pub const DEFAULT_SATURATION_TOLERANCE: f64 = 0.01;

/// Tunable thresholds and toggles for one validation run.
///
/// Built once from caller input, validated with [`ValidationConfig::validate`],
/// then shared by reference across all criterion evaluations. Custom words are
/// an ordered list: an all-lowercase entry is accepted in lowercase or
/// capitalized form, while an entry containing any uppercase letter mandates
/// that exact capitalization wherever the word appears.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Path of the PDF document under validation.
    pub document: PathBuf,
    /// Maximum allowed page count (at least 1).
    pub max_pages: u32,
    /// Maximum allowed file size in kilobytes (positive).
    pub max_file_size_kb: f64,
    /// Minimum allowed font size in points (inclusive).
    pub min_font: f64,
    /// Maximum allowed font size in points (inclusive).
    pub max_font: f64,
    /// Require every link annotation to use the https scheme.
    pub enforce_https: bool,
    /// Prohibit embedded images.
    pub no_images: bool,
    /// Require the first rendered pixel of the first page to be pure white.
    pub background_white: bool,
    /// Require every rendered pixel to be grayscale within tolerance.
    pub grayscale_colors: bool,
    /// Maximum allowed HSV saturation for the grayscale check, in [0, 1].
    pub saturation_tolerance: f64,
    /// Custom spelling terms, in precedence order.
    pub custom_words: Vec<String>,
}

impl ValidationConfig {
    /// Create a configuration for `document` with all defaults.
    pub fn new(document: impl Into<PathBuf>) -> Self {
        ValidationConfig {
            document: document.into(),
            max_pages: DEFAULT_MAX_PAGES,
            max_file_size_kb: DEFAULT_MAX_FILE_SIZE_KB,
            min_font: DEFAULT_MIN_FONT,
            max_font: DEFAULT_MAX_FONT,
            enforce_https: true,
            no_images: true,
            background_white: true,
            grayscale_colors: true,
            saturation_tolerance: DEFAULT_SATURATION_TOLERANCE,
            custom_words: Vec::new(),
        }
    }

    /// Check every configuration invariant.
    ///
    /// Violations are fatal: callers must refuse to evaluate any criterion
    /// against an invalid configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pages < 1 {
            return Err(ConfigError::PageLimit(self.max_pages));
        }
        if self.max_file_size_kb <= 0.0 {
            return Err(ConfigError::FileSizeLimit(self.max_file_size_kb));
        }
        if self.min_font >= self.max_font {
            return Err(ConfigError::FontRange {
                min: self.min_font,
                max: self.max_font,
            });
        }
        if !(0.0..=1.0).contains(&self.saturation_tolerance) {
            return Err(ConfigError::SaturationTolerance(self.saturation_tolerance));
        }
        Ok(())
    }
}

/// Validate a caller-supplied passing-score threshold.
///
/// The threshold itself is owned by the caller, not the scoring engine; this
/// helper exists so every front end rejects out-of-range values the same way.
pub fn validate_passing_score(score: f64) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&score) {
        return Err(ConfigError::PassingScore(score));
    }
    Ok(())
}
