//! Weighted evaluation of the criteria battery.
//!
//! The engine runs criteria strictly in order and guarantees total isolation
//! between them: a failure of any kind, including a panic escaping a
//! predicate, is recorded against that criterion alone and never aborts the
//! run. The only fatal error is an invalid configuration, rejected before
//! evaluation starts.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ValidationConfig;
use crate::criteria::{criteria_for, Criterion};
use crate::error::ConfigError;
use crate::source::{DocumentSource, FileSource};

/// Outcome of a single criterion.
#[derive(Debug, Clone, Serialize)]
pub struct CriterionResult {
    pub name: String,
    pub description: String,
    pub weight: f64,
    pub passed: bool,
    /// Diagnostic text when the criterion blew up instead of evaluating.
    pub error: Option<String>,
}

/// Outcome of a whole validation run.
///
/// Serialized representations preserve these field names verbatim;
/// downstream tooling keys off them.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub document: String,
    /// Weighted percentage in `[0, 100]`, rounded to two decimals.
    pub score: f64,
    pub passed_count: usize,
    pub total_count: usize,
    pub results: Vec<CriterionResult>,
}

impl ScoreReport {
    /// Whether the score clears the caller's passing threshold.
    pub fn meets(&self, passing_score: f64) -> bool {
        self.score >= passing_score
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "criterion panicked".to_string()
    }
}

/// Evaluate `criteria` in order against `source` and score the outcomes.
///
/// The score is `100 x passed weight / total weight`, or 0 when no criteria
/// were evaluated at all.
pub fn score_criteria(
    document: impl Into<String>,
    source: &dyn DocumentSource,
    criteria: &[Box<dyn Criterion>],
) -> ScoreReport {
    let mut results = Vec::with_capacity(criteria.len());
    for criterion in criteria {
        let (passed, error) = match catch_unwind(AssertUnwindSafe(|| criterion.evaluate(source)))
        {
            Ok(passed) => (passed, None),
            Err(payload) => (false, Some(panic_message(payload.as_ref()))),
        };
        debug!(criterion = criterion.name(), passed, "criterion evaluated");
        results.push(CriterionResult {
            name: criterion.name().to_string(),
            description: criterion.description().to_string(),
            weight: criterion.weight(),
            passed,
            error,
        });
    }

    let total_weight: f64 = results.iter().map(|r| r.weight).sum();
    let passed_weight: f64 = results.iter().filter(|r| r.passed).map(|r| r.weight).sum();
    let score = if total_weight == 0.0 {
        0.0
    } else {
        round2(100.0 * passed_weight / total_weight)
    };

    ScoreReport {
        document: document.into(),
        score,
        passed_count: results.iter().filter(|r| r.passed).count(),
        total_count: results.len(),
        results,
    }
}

/// Validate the configured document with the full criteria battery.
pub fn run_validation(config: &ValidationConfig) -> Result<ScoreReport, ConfigError> {
    config.validate()?;
    let source = FileSource::new(&config.document);
    let criteria = criteria_for(config);
    info!(
        document = %config.document.display(),
        criteria = criteria.len(),
        "starting validation"
    );
    Ok(score_criteria(
        config.document.display().to_string(),
        &source,
        &criteria,
    ))
}
