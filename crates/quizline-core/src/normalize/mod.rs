//! Text canonicalization applied to both sides of an answer comparison.
//!
//! The pipeline is NFC, lowercase, optional punctuation stripping, NFC again,
//! then whitespace collapsing. Stripping runs between the two NFC passes so a
//! removed mark can never leave a composable pair behind, which keeps
//! [`TextNormalizer::normalize`] idempotent.


use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Unicode-aware: letters, marks and digits of every script count as word chars.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Canonicalizes free-text answers before they are embedded or compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNormalizer {
    strip_punctuation: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            strip_punctuation: true,
        }
    }
}

impl TextNormalizer {
    /// Creates a normalizer; `strip_punctuation` removes everything outside word/space classes.
    pub fn new(strip_punctuation: bool) -> Self {
        Self { strip_punctuation }
    }

    /// Returns `true` if punctuation is removed.
    pub fn strips_punctuation(&self) -> bool {
        self.strip_punctuation
    }

    /// Returns the canonical form of `text`.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.nfc().collect::<String>().to_lowercase();

        let stripped = if self.strip_punctuation {
            PUNCTUATION.replace_all(&lowered, "").into_owned()
        } else {
            lowered
        };

        let composed: String = stripped.nfc().collect();
        composed.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Normalizes with the default settings (punctuation stripped).
pub fn normalize(text: &str) -> String {
    TextNormalizer::default().normalize(text)
}
