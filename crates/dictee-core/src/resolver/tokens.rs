//! Word-level tokenization shared by the matcher and the phonetic projection.

/// Minimum token length (in chars) kept as a drug-name candidate.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Function words, units, schedule words and route/device words that never
/// name a drug.
const STOPWORDS: &[&str] = &[
    // French function words
    "les", "des", "une", "par", "sur", "pour", "pendant", "puis", "plus", "avec", "dans",
    "sans", "chez", "aux", "est", "que", "qui", "son", "ses", "lui", "elle",
    // units
    "mg", "µg", "ug", "gramme", "grammes", "milligramme", "milligrammes", "ml", "unite",
    "unites", "unité", "unités", "dose", "doses", "prise", "prises", "comprime", "comprimes",
    "comprimé", "comprimés", "sachet", "sachets", "ampoule", "ampoules", "flacon",
    // schedule
    "jour", "jours", "semaine", "semaines", "sem", "mois", "matin", "midi", "soir",
    "nuit", "heure", "heures", "toutes", "tous", "fois",
    // routes and devices
    "voie", "per", "orale", "oral", "ivl", "ivd", "ivse", "intraveineuse", "intraveineux",
    "sous", "cutanee", "cutane", "cutanée", "cutané", "intramusculaire", "vvp", "pac", "picc",
    "line", "midline", "cvc", "peripherique", "périphérique", "centrale", "chambre",
    "implantable",
    // dictation fillers
    "prescription", "ordonnance", "traitement", "ttt", "patient", "patiente",
];

/// Lowercase and split on non-alphanumeric boundaries.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Whether a token can be part of a drug name: long enough, no digits,
/// not a stopword.
pub fn is_candidate_word(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS
        && !token.chars().any(|c| c.is_numeric())
        && !is_stopword(token)
}

/// Tokens of `text` that survive [`is_candidate_word`].
pub fn candidate_words(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| is_candidate_word(t))
        .collect()
}

/// Concatenate words into one candidate ("gen", "tamissine" → "gentamissine").
pub fn glue(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Piperacilline+Tazo, 4 g/j"),
            vec!["piperacilline", "tazo", "4", "g", "j"]
        );
        assert!(tokenize(" ,;() ").is_empty());
    }

    #[test]
    fn test_candidate_words_filtering() {
        let words = candidate_words("x2 par jour de piperacilline tazo sur pac");
        assert_eq!(words, vec!["piperacilline", "tazo"]);
    }

    #[test]
    fn test_glue() {
        let words = candidate_words("gen tamissine");
        assert_eq!(glue(&words), Some("gentamissine".to_string()));
        assert_eq!(glue(&[]), None);
    }
}
