//! Patient profile extraction from the dictation preamble.
//!
//! The preamble is the text before the first prescription keyword or drug
//! alias. Identity is only searched there, so a drug or dosage sentence is
//! never mistaken for a name.

use std::sync::LazyLock;

use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::models::{Gender, PatientProfile};
use crate::patterns::compile;

static PRESCRIPTION_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:prescriptions?|ordonnance|ordo|traitements?|ttt)\b"));

static CIVILITY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"\b(m\.|mr\.?|monsieur|mme\.?|madame|mlle\.?|melle|mademoiselle)\s+([\p{L}][\p{L}'-]*)\s+([\p{L}][\p{L}'-]*)",
    )
});

static KEYWORD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(patiente?|sortie de|au nom de)\s+([\p{L}][\p{L}'-]*)\s+([\p{L}][\p{L}'-]*)")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:\+33\s?|\b0)[1-9](?:[\s.-]?\d{2}){4}\b"));
static CITY: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:ville|city|commune)\s*:\s*([\p{L}](?:[\p{L}' -]*[\p{L}])?)")
});

/// A name hit: civility (if any), first and last name, and the whole span.
#[derive(Debug, Clone)]
struct NameMatch {
    civility: Option<String>,
    first_name: String,
    last_name: String,
    start: usize,
    end: usize,
}

/// Extracts at most one [`PatientProfile`] per dictation.
pub struct PatientExtractor<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> PatientExtractor<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Profile from the preamble, or `None` when no name is dictated there.
    ///
    /// `raw` is used only to recover the dictated casing of names.
    pub fn extract(&self, raw: &str, normalized: &str) -> Option<PatientProfile> {
        if normalized.trim().is_empty() {
            return None;
        }

        let preamble = &normalized[..self.preamble_end(normalized)];
        let (found, from_civility) = match find_civility_name(preamble) {
            Some(m) => (m, true),
            None => (find_keyword_name(preamble)?, false),
        };

        let recovered = recover_casing(raw, preamble, &found);
        let named = recovered.as_ref().unwrap_or(&found);
        let source_text = match &recovered {
            Some(m) => sentence_around(raw, m.start, m.end),
            None => sentence_around(preamble, found.start, found.end),
        }
        .or_else(|| Some(preamble.trim().to_string()).filter(|s| !s.is_empty()));

        let gender = if from_civility {
            Gender::from_civility(named.civility.as_deref())
        } else {
            Gender::Unknown
        };

        let profile = PatientProfile {
            first_name: Some(named.first_name.clone()),
            last_name: Some(named.last_name.clone()),
            gender: Some(gender),
            civility: named.civility.clone(),
            city: find_city(preamble),
            email: find_email(preamble),
            phone: find_phone(preamble),
            source_text,
        };

        debug!(
            civility = profile.civility.is_some(),
            email = profile.email.is_some(),
            phone = profile.phone.is_some(),
            city = profile.city.is_some(),
            gender = gender.as_str(),
            "patient profile found"
        );
        Some(profile)
    }

    /// Byte index where the preamble ends: the earliest prescription keyword
    /// or lexicon alias, else the end of the text.
    fn preamble_end(&self, normalized: &str) -> usize {
        let keyword = PRESCRIPTION_KEYWORD.find(normalized).map(|m| m.start());
        let alias = self
            .lexicon
            .all_aliases()
            .filter(|alias| !alias.is_empty())
            .filter_map(|alias| normalized.find(&alias))
            .min();

        [keyword, alias]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(normalized.len())
    }
}

fn find_civility_name(preamble: &str) -> Option<NameMatch> {
    let caps = CIVILITY_NAME.captures(preamble)?;
    let mut found = name_match(&caps)?;
    found.civility = caps.get(1).map(|c| title_case(c.as_str()));
    found.first_name = title_case(&found.first_name);
    found.last_name = title_case(&found.last_name);
    Some(found)
}

fn find_keyword_name(preamble: &str) -> Option<NameMatch> {
    let caps = KEYWORD_NAME.captures(preamble)?;
    let mut found = name_match(&caps)?;
    found.first_name = title_case(&found.first_name);
    found.last_name = title_case(&found.last_name);
    Some(found)
}

fn name_match(caps: &Captures) -> Option<NameMatch> {
    let whole = caps.get(0)?;
    Some(NameMatch {
        civility: None,
        first_name: caps.get(2)?.as_str().to_string(),
        last_name: caps.get(3)?.as_str().to_string(),
        start: whole.start(),
        end: whole.end(),
    })
}

/// Locate the matched phrase in the raw text (case-insensitively) and take
/// the names as dictated. All-lowercase raw names are title-cased.
fn recover_casing(raw: &str, preamble: &str, found: &NameMatch) -> Option<NameMatch> {
    let phrase = &preamble[found.start..found.end];
    let pattern = phrase
        .split_whitespace()
        .map(|word| format!("({})", regex::escape(word)))
        .collect::<Vec<_>>()
        .join(r"\s+");
    let regex = RegexBuilder::new(&pattern).case_insensitive(true).build().ok()?;

    let caps = regex.captures(raw)?;
    let whole = caps.get(0)?;
    let groups: Vec<&str> = caps.iter().skip(1).flatten().map(|m| m.as_str()).collect();
    let [head @ .., first, last] = groups.as_slice() else {
        return None;
    };

    let civility = found.civility.as_ref().map(|normalized_civility| {
        head.first()
            .map(|c| keep_or_title_case(c))
            .unwrap_or_else(|| normalized_civility.clone())
    });

    Some(NameMatch {
        civility,
        first_name: keep_or_title_case(first),
        last_name: keep_or_title_case(last),
        start: whole.start(),
        end: whole.end(),
    })
}

fn keep_or_title_case(word: &str) -> String {
    if word.chars().any(char::is_uppercase) {
        word.to_string()
    } else {
        title_case(word)
    }
}

/// Uppercase the first letter of each word, after spaces, hyphens and
/// apostrophes.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
        if matches!(c, ' ' | '-' | '\'') {
            at_word_start = true;
        }
    }
    out
}

/// Text between the nearest `.`/newline before `start` and after `end`.
fn sentence_around(text: &str, start: usize, end: usize) -> Option<String> {
    let is_delimiter = |c: char| c == '.' || c == '\n';
    // The civility "M." carries its own dot; the span already covers it.
    let from = text[..start].rfind(is_delimiter).map(|i| i + 1).unwrap_or(0);
    let to = text[end..].find(is_delimiter).map(|i| end + i).unwrap_or(text.len());

    let snippet = text[from..to].trim();
    (!snippet.is_empty()).then(|| snippet.to_string())
}

fn find_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

fn find_phone(text: &str) -> Option<String> {
    let found = PHONE.find(text)?.as_str();
    let mut phone = String::with_capacity(found.len());
    for (i, c) in found.chars().enumerate() {
        if c.is_ascii_digit() || (i == 0 && c == '+') {
            phone.push(c);
        }
    }
    Some(phone)
}

fn find_city(text: &str) -> Option<String> {
    let caps = CITY.captures(text)?;
    let city = caps.get(1)?.as_str().trim();
    (!city.is_empty()).then(|| title_case(city))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::normalize;

    fn extract(raw: &str) -> Option<PatientProfile> {
        PatientExtractor::new(Lexicon::builtin()).extract(raw, &normalize(raw))
    }

    #[test]
    fn test_civility_name() {
        let p = extract("M. Jean Dupont, 45 ans. Prescription ceftriaxone 1g").unwrap();
        assert_eq!(p.civility.as_deref(), Some("M."));
        assert_eq!(p.first_name.as_deref(), Some("Jean"));
        assert_eq!(p.last_name.as_deref(), Some("Dupont"));
        assert_eq!(p.gender, Some(Gender::Male));
        assert_eq!(p.source_text.as_deref(), Some("M. Jean Dupont, 45 ans"));
    }

    #[test]
    fn test_female_civility_and_lowercase_raw() {
        let p = extract("madame marie-claire le goff ordonnance vanco 1 g").unwrap();
        assert_eq!(p.civility.as_deref(), Some("Madame"));
        assert_eq!(p.first_name.as_deref(), Some("Marie-Claire"));
        assert_eq!(p.last_name.as_deref(), Some("Le"));
        assert_eq!(p.gender, Some(Gender::Female));
    }

    #[test]
    fn test_keyword_name() {
        let p = extract("Sortie de Paul Martin\ntraitement: flagyl 500 mg").unwrap();
        assert!(p.civility.is_none());
        assert_eq!(p.first_name.as_deref(), Some("Paul"));
        assert_eq!(p.last_name.as_deref(), Some("Martin"));
        assert_eq!(p.gender, Some(Gender::Unknown));
        assert_eq!(p.source_text.as_deref(), Some("Sortie de Paul Martin"));
    }

    #[test]
    fn test_contacts_in_preamble() {
        let p = extract(
            "Mme Alice Bernard, ville: saint-etienne, tel 06 12 34 56 78, alice.bernard@mail.fr. \
             Prescription amoxicilline 1 g",
        )
        .unwrap();
        assert_eq!(p.city.as_deref(), Some("Saint-Etienne"));
        assert_eq!(p.phone.as_deref(), Some("0612345678"));
        assert_eq!(p.email.as_deref(), Some("alice.bernard@mail.fr"));
        assert_eq!(p.gender, Some(Gender::Female));
    }

    #[test]
    fn test_international_phone() {
        assert_eq!(find_phone("tel +33 6 12 34 56 78").as_deref(), Some("+33612345678"));
        assert_eq!(find_phone("1 g 3x/j"), None);
    }

    #[test]
    fn test_name_after_boundary_is_ignored() {
        assert!(extract("ceftriaxone 1 g, M. Jean Dupont").is_none());
        assert!(extract("prescription: Monsieur Paul Martin").is_none());
    }

    #[test]
    fn test_empty_and_nameless() {
        assert!(extract("").is_none());
        assert!(extract("   ").is_none());
        assert!(extract("bonjour, rien a signaler").is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("m."), "M.");
        assert_eq!(title_case("jean-pierre d'arc"), "Jean-Pierre D'Arc");
        assert_eq!(title_case("éloïse"), "Éloïse");
    }
}
