//! Font-size-range extraction over positioned glyph runs.

use tracing::debug;

use super::{absorb, Criterion};
use crate::error::Result;
use crate::source::DocumentSource;

/// Every glyph on every page sits inside an inclusive point-size range.
///
/// The effective size per glyph already folds in the text and transformation
/// matrices, so a 1pt font drawn under a 12x scale counts as 12pt.
#[derive(Debug)]
pub struct FontRange {
    min: f64,
    max: f64,
    description: String,
}

impl FontRange {
    pub fn new(min: f64, max: f64) -> Self {
        FontRange {
            description: format!("Ensures all fonts are between {min}pt and {max}pt"),
            min,
            max,
        }
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        for page in 0..source.page_count()? {
            for run in source.text_runs(page)? {
                for glyph in &run.glyphs {
                    if glyph.size < self.min || glyph.size > self.max {
                        debug!(page, size = glyph.size, "glyph outside permitted range");
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }
}

impl Criterion for FontRange {
    fn name(&self) -> &'static str {
        "Font Size Range"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn weight(&self) -> f64 {
        12.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        absorb(self.name(), self.check(source))
    }
}
