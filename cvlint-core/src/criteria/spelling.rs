//! Tokenized spell and capitalization checking with a custom-term override
//! policy.
//!
//! Custom terms come in two flavors. An all-lowercase term is case-flexible:
//! the term itself and its capitalized form are both acceptable. A term
//! containing any uppercase letter mandates that exact spelling, and a token
//! matching it in any other case is a capitalization error even when some
//! dictionary happens to know the other form. Custom terms are checked
//! against tokens directly and are never merged into the word oracle.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{absorb, Criterion};
use crate::error::Result;
use crate::lexicon::SpellingLexicon;
use crate::source::DocumentSource;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new("[a-zA-Z]+").unwrap();
}

/// Substrings that mark a token as technical notation rather than prose.
const TECH_MARKERS: [&str; 4] = ["js", "sql", "xml", "json"];

/// Bare scheme and domain-suffix tokens left behind by broken-apart URLs.
const URL_TOKENS: [&str; 6] = ["https", "http", "www", "com", "org", "net"];

/// Hosting and mail providers that show up inside handles and addresses.
const PROVIDER_MARKERS: [&str; 5] = ["github", "linkedin", "gmail", "yahoo", "hotmail"];

/// Tokens shorter than this are treated as initials and skipped.
const MIN_TOKEN_LEN: usize = 3;

/// Everything the spelling pass found, kept separately for reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpellingReport {
    /// Unknown words, deduplicated, in first-occurrence order.
    pub misspelled: Vec<String>,
    /// One entry per token that contradicts a mandated capitalization.
    pub capitalization: Vec<String>,
}

impl SpellingReport {
    pub fn is_clean(&self) -> bool {
        self.misspelled.is_empty() && self.capitalization.is_empty()
    }
}

/// `str.capitalize` shape: first letter upper, the rest lower.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Filters for tokens that look like notation or URL debris rather than
/// prose; such tokens never count as misspellings.
fn residual_allowed(token: &str) -> bool {
    if token.starts_with('.') || token.ends_with('.') {
        return true;
    }
    let lower = token.to_ascii_lowercase();
    if TECH_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return true;
    }
    if URL_TOKENS.contains(&lower.as_str()) {
        return true;
    }
    PROVIDER_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// The document's prose spells correctly and honors mandated capitalization.
pub struct SpellCheck {
    /// Mixed-case custom terms, in list order; first match wins.
    rigid: Vec<String>,
    /// Exact token spellings accepted without consulting the oracle.
    allowed: HashSet<String>,
    lexicon: Box<dyn SpellingLexicon>,
}

impl SpellCheck {
    pub fn new(custom_words: Vec<String>, lexicon: Box<dyn SpellingLexicon>) -> Self {
        let mut rigid = Vec::new();
        let mut allowed = HashSet::new();
        for word in custom_words {
            if word.chars().any(char::is_uppercase) {
                allowed.insert(word.clone());
                rigid.push(word);
            } else {
                allowed.insert(capitalize(&word));
                allowed.insert(word);
            }
        }
        SpellCheck {
            rigid,
            allowed,
            lexicon,
        }
    }

    /// Classify every token of `text` into the spelling report.
    pub fn inspect(&self, text: &str) -> SpellingReport {
        let mut report = SpellingReport::default();
        let mut seen = HashSet::new();

        'tokens: for token in WORD_RE.find_iter(text).map(|m| m.as_str()) {
            if token.len() < MIN_TOKEN_LEN {
                continue;
            }
            for mandated in &self.rigid {
                if token.eq_ignore_ascii_case(mandated) && token != mandated {
                    report
                        .capitalization
                        .push(format!("Found '{token}' but should be '{mandated}'"));
                    continue 'tokens;
                }
            }
            if self.allowed.contains(token) || self.lexicon.is_known(token) {
                continue;
            }
            if residual_allowed(token) {
                continue;
            }
            if seen.insert(token.to_string()) {
                report.misspelled.push(token.to_string());
            }
        }
        report
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        let report = self.inspect(&source.full_text()?);
        if !report.is_clean() {
            debug!(
                misspelled = report.misspelled.len(),
                capitalization = report.capitalization.len(),
                "spelling problems found"
            );
        }
        Ok(report.is_clean())
    }
}

impl Criterion for SpellCheck {
    fn name(&self) -> &'static str {
        "Spell Check and Capitalization"
    }

    fn description(&self) -> &str {
        "Validates spelling and proper capitalization of technical terms"
    }

    fn weight(&self) -> f64 {
        20.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        absorb(self.name(), self.check(source))
    }
}
