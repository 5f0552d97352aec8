//! English word oracle backing the spelling check.

use std::collections::HashSet;

use lazy_static::lazy_static;

/// Answers whether a token is a known word.
///
/// Implementations are case-insensitive: `"Rust"`, `"rust"`, and `"RUST"`
/// all answer alike. Capitalization policy is layered on top by the spelling
/// check, not by the oracle.
pub trait SpellingLexicon {
    fn is_known(&self, word: &str) -> bool;
}

lazy_static! {
    static ref WORDS: HashSet<&'static str> = include_str!("../assets/words.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
}

/// Word list compiled into the binary.
///
/// The bundled list is lowercase English vocabulary slanted toward resume
/// prose. It ships inside the executable, so the spelling check works
/// without any dictionary files on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledLexicon;

impl BundledLexicon {
    pub fn new() -> Self {
        BundledLexicon
    }

    /// Number of entries in the bundled list.
    pub fn len(&self) -> usize {
        WORDS.len()
    }

    pub fn is_empty(&self) -> bool {
        WORDS.is_empty()
    }
}

impl SpellingLexicon for BundledLexicon {
    fn is_known(&self, word: &str) -> bool {
        WORDS.contains(word.to_ascii_lowercase().as_str())
    }
}
