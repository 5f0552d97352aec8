//! The validation rule battery.
//!
//! Every rule is a [`Criterion`]: an independently weighted pass/fail check
//! over a [`DocumentSource`]. The registry builds the full ordered battery
//! from a configuration; the scoring engine consumes it without knowing any
//! rule's internals.

mod basic;
mod color;
mod font_size;
mod spelling;

pub use basic::{FileExists, FileSize, HttpsLinks, Integrity, NoImages, PageLimit, Structure};
pub use color::{Grayscale, WhiteBackground};
pub use font_size::FontRange;
pub use spelling::{SpellCheck, SpellingReport};

use tracing::warn;

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::lexicon::BundledLexicon;
use crate::source::DocumentSource;

/// One independently evaluable validation rule.
///
/// Criteria are pure observers: evaluation never mutates the document or the
/// configuration, and a document access failure is absorbed into a `false`
/// outcome instead of propagating.
pub trait Criterion {
    /// Stable identifier, used for filtering and display. Renaming one is a
    /// breaking change for downstream tooling.
    fn name(&self) -> &'static str;

    /// One-line human-readable description.
    fn description(&self) -> &str;

    /// Points this check contributes to the weighted score.
    fn weight(&self) -> f64;

    /// Whether the document satisfies this rule.
    fn evaluate(&self, source: &dyn DocumentSource) -> bool;
}

/// Collapse an adapter failure into a failed check.
pub(crate) fn absorb(name: &str, outcome: Result<bool>) -> bool {
    match outcome {
        Ok(passed) => passed,
        Err(err) => {
            warn!(criterion = name, error = %err, "check aborted by document access failure");
            false
        }
    }
}

/// Build the full ordered criteria battery for a configuration.
///
/// The order is fixed and externally visible: reports and serialized output
/// list results in exactly this order.
pub fn criteria_for(config: &ValidationConfig) -> Vec<Box<dyn Criterion>> {
    vec![
        Box::new(FileExists::new()),
        Box::new(PageLimit::new(config.max_pages)),
        Box::new(FileSize::new(config.max_file_size_kb)),
        Box::new(FontRange::new(config.min_font, config.max_font)),
        Box::new(HttpsLinks::new(config.enforce_https)),
        Box::new(NoImages::new(config.no_images)),
        Box::new(WhiteBackground::new(config.background_white)),
        Box::new(Grayscale::new(
            config.grayscale_colors,
            config.saturation_tolerance,
        )),
        Box::new(SpellCheck::new(
            config.custom_words.clone(),
            Box::new(BundledLexicon::new()),
        )),
        Box::new(Structure::new()),
        Box::new(Integrity::new()),
    ]
}

/// Keep only the criteria named in `names`, preserving registry order.
pub fn filter_criteria(
    criteria: Vec<Box<dyn Criterion>>,
    names: &[String],
) -> Vec<Box<dyn Criterion>> {
    criteria
        .into_iter()
        .filter(|criterion| names.iter().any(|name| name == criterion.name()))
        .collect()
}
