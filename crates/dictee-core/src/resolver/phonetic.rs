//! Phonetic encoding of dictated words.
//!
//! Words are folded to unaccented ASCII letters and run through Double
//! Metaphone. The primary code comes first, then the alternate when it
//! differs. Encoding is a pure function; [`PhoneticCache`] memoizes it for
//! the duration of one matching pass only.

use std::collections::HashMap;

use rphonetic::{DoubleMetaphone, Encoder};

use super::tokens::tokenize;

/// Replace accented Latin letters with their base letter.
pub fn fold_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => out.push('A'),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'È' | 'É' | 'Ê' | 'Ë' => out.push('E'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'Ì' | 'Í' | 'Î' | 'Ï' => out.push('I'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => out.push('o'),
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => out.push('O'),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'Ù' | 'Ú' | 'Û' | 'Ü' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'Ý' | 'Ÿ' => out.push('Y'),
            other => out.push(other),
        }
    }
    out
}

/// Ordered, deduplicated phonetic codes of a word. Empty when the word has
/// no Latin letters.
pub fn phonetic_codes(word: &str) -> Vec<String> {
    let letters: String = fold_diacritics(word)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return Vec::new();
    }

    let encoder = DoubleMetaphone::default();
    let mut codes: Vec<String> = Vec::with_capacity(2);
    for code in [encoder.encode(&letters), encoder.encode_alternate(&letters)] {
        if !code.is_empty() && !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Codes joined with `|`, for display.
pub fn phonetic_encode(word: &str) -> String {
    phonetic_codes(word).join("|")
}

/// Phonetic projection of a segment: one `|`-joined entry per token that
/// yields a code, separated by spaces.
pub fn phonetic_projection(segment: &str) -> String {
    tokenize(segment)
        .iter()
        .map(|t| phonetic_encode(t))
        .filter(|code| !code.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word → codes memo, scoped to a single matching call.
#[derive(Debug, Default)]
pub struct PhoneticCache {
    codes: HashMap<String, Vec<String>>,
}

impl PhoneticCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codes for `word`, computed at most once per cache.
    pub fn codes(&mut self, word: &str) -> &[String] {
        if !self.codes.contains_key(word) {
            self.codes.insert(word.to_string(), phonetic_codes(word));
        }
        self.codes.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Codes for two words at once.
    pub fn pair(&mut self, a: &str, b: &str) -> (&[String], &[String]) {
        self.codes(a);
        self.codes(b);
        let codes_a = self.codes.get(a).map(Vec::as_slice).unwrap_or(&[]);
        let codes_b = self.codes.get(b).map(Vec::as_slice).unwrap_or(&[]);
        (codes_a, codes_b)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
