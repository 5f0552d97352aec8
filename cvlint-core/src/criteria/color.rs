//! Pixel-level color checks over rendered pages.

use tracing::debug;

use super::{absorb, Criterion};
use crate::error::Result;
use crate::source::DocumentSource;

const PURE_WHITE: (u8, u8, u8) = (255, 255, 255);

/// HSV saturation of an RGB pixel, in `[0, 1]`. Black has no saturation.
fn saturation(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b);
    if max == 0 {
        return 0.0;
    }
    let min = r.min(g).min(b);
    f64::from(max - min) / f64::from(max)
}

/// The first page renders on a pure white background.
///
/// The probe is the top-left corner pixel: body content never reaches the
/// page margin, so a non-white corner means a painted background.
#[derive(Debug)]
pub struct WhiteBackground {
    required: bool,
}

impl WhiteBackground {
    pub fn new(required: bool) -> Self {
        WhiteBackground { required }
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        let raster = source.render_page(0)?;
        Ok(raster.pixel(0, 0) == PURE_WHITE)
    }
}

impl Criterion for WhiteBackground {
    fn name(&self) -> &'static str {
        "White Background"
    }

    fn description(&self) -> &str {
        "Validates that the PDF has a white background"
    }

    fn weight(&self) -> f64 {
        6.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        if !self.required {
            return true;
        }
        absorb(self.name(), self.check(source))
    }
}

/// No rendered pixel on any page carries saturation above the tolerance.
#[derive(Debug)]
pub struct Grayscale {
    required: bool,
    tolerance: f64,
}

impl Grayscale {
    pub fn new(required: bool, tolerance: f64) -> Self {
        Grayscale {
            required,
            tolerance,
        }
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        for page in 0..source.page_count()? {
            let raster = source.render_page(page)?;
            for (r, g, b) in raster.pixels() {
                if saturation(r, g, b) > self.tolerance {
                    debug!(page, r, g, b, "saturated pixel");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

impl Criterion for Grayscale {
    fn name(&self) -> &'static str {
        "Grayscale Colors Only"
    }

    fn description(&self) -> &str {
        "Ensures all colors in the PDF are grayscale (no saturation)"
    }

    fn weight(&self) -> f64 {
        8.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        if !self.required {
            return true;
        }
        absorb(self.name(), self.check(source))
    }
}
