//! # cvlint
//!
//! A weighted rule engine for validating single-page CV/resume PDFs in pure Rust.
//!
//! ## Features
//!
//! - **Fixed rule battery**: eleven independent pass/fail checks covering page
//!   count, file size, font sizes, link schemes, images, background color,
//!   color saturation, spelling, metadata, and structural integrity
//! - **Weighted scoring**: each check carries points; the run produces a
//!   percentage score plus a per-check result list
//! - **Failure isolation**: one broken check never aborts the run, a corrupt
//!   document simply fails the checks that need its contents
//! - **Custom terminology**: case-flexible and capitalization-mandating custom
//!   words layered over a bundled English lexicon
//! - **Pluggable document access**: checks see a [`DocumentSource`] trait, not
//!   a PDF library
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cvlint::{run_validation, ValidationConfig};
//!
//! # fn main() -> Result<(), cvlint::ConfigError> {
//! let mut config = ValidationConfig::new("resume.pdf");
//! config.custom_words = vec!["PostgreSQL".to_string(), "rustacean".to_string()];
//!
//! let report = run_validation(&config)?;
//! println!("score: {:.2}%", report.score);
//! for result in &report.results {
//!     println!("  [{}] {}", if result.passed { "pass" } else { "fail" }, result.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running a subset of checks
//!
//! ```rust,no_run
//! use cvlint::{criteria_for, filter_criteria, score_criteria, FileSource, ValidationConfig};
//!
//! let config = ValidationConfig::new("resume.pdf");
//! let criteria = filter_criteria(criteria_for(&config), &["Font Size Range".to_string()]);
//!
//! let source = FileSource::new(&config.document);
//! let report = score_criteria("resume.pdf", &source, &criteria);
//! assert_eq!(report.total_count, 1);
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Validation thresholds and toggles
//! - [`criteria`] - The individual checks and their registry
//! - [`scoring`] - Sequential evaluation and weighted scoring
//! - [`source`] - Read-only document access, backed by `lopdf`
//! - [`lexicon`] - The bundled English word list behind the spelling check
//! - [`error`] - Error types

pub mod config;
pub mod criteria;
pub mod error;
pub mod lexicon;
pub mod scoring;
pub mod source;

// Re-export configuration types
pub use config::{validate_passing_score, ValidationConfig};
pub use error::{ConfigError, SourceError};

// Re-export the rule battery
pub use criteria::{criteria_for, filter_criteria, Criterion, SpellCheck, SpellingReport};
pub use lexicon::{BundledLexicon, SpellingLexicon};

// Re-export the engine
pub use scoring::{run_validation, score_criteria, CriterionResult, ScoreReport};
pub use source::{DocumentMetadata, DocumentSource, FileSource, Glyph, PageRaster, TextRun};

/// Current version of cvlint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
