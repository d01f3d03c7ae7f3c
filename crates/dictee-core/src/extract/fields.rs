//! Small field extractors: route/device, duration, notes.
//!
//! Note extraction is written as `(field, remaining_text)` passes over
//! immutable snapshots so each pass can be tested and reordered safely.

use std::sync::LazyLock;

use regex::Regex;

use crate::patterns::compile;

/// A route pattern with the labels it yields.
struct RoutePattern {
    regex: Regex,
    route: &'static str,
    device: Option<&'static str>,
}

fn route(pattern: &str, route: &'static str, device: Option<&'static str>) -> RoutePattern {
    RoutePattern {
        regex: compile(pattern),
        route,
        device,
    }
}

static ROUTES: LazyLock<Vec<RoutePattern>> = LazyLock::new(|| {
    vec![
        route(r"\bvvp\b|\bvoie veineuse p[ée]riph[ée]rique\b", "IV", Some("VVP")),
        route(r"\bpac\b|\bchambre implantable\b|\bport[- ]?a[- ]?cath\b", "IV", Some("PAC")),
        route(r"\bpicc(?:[- ]?line)?\b", "IV", Some("PICC")),
        route(r"\bmidline\b", "IV", Some("Midline")),
        route(r"\bcvc\b|\bvoie veineuse centrale\b|\bcath[ée]ter central\b", "IV", Some("CVC")),
        route(r"\bivse\b|\bpousse[- ]seringue\b|\bseringue [ée]lectrique\b", "IVSE", None),
        route(r"\bivl\b|\bintraveineuse lente\b", "IVL", None),
        route(r"\bivd\b|\biv\b|\bintraveineu(?:se|x)\b", "IV", None),
        route(r"\bper os\b|\bpo\b|\bvoie orale\b|\bpar la bouche\b", "PO", None),
        route(r"\bsc\b|\bsous[- ]cutan[ée]e?\b", "SC", None),
        route(r"\bim\b|\bintramusculaire\b", "IM", None),
    ]
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:pendant|pour|sur)\s+(\d+)\s*(jours?|j|semaines?|sem|mois)\b")
});

static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| compile(r"\(([^()]*)\)"));
static NOTES_LABEL: LazyLock<Regex> = LazyLock::new(|| compile(r"\bnotes?\s*:"));
static PHONE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:t[ée]l[ée]phone|t[ée]l|portable)\b"));

/// Separator between a parenthesized note and a labeled one.
pub const NOTES_SEPARATOR: &str = " ; ";

/// A route/device hit with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub start: usize,
    pub end: usize,
    pub route: String,
    pub device: Option<String>,
}

/// The route pattern occurring earliest in the text. Position decides, list
/// order only breaks ties at the same start.
pub fn find_route(text: &str) -> Option<RouteMatch> {
    let mut best: Option<RouteMatch> = None;
    for pattern in ROUTES.iter() {
        let Some(m) = pattern.regex.find(text) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| m.start() < b.start) {
            best = Some(RouteMatch {
                start: m.start(),
                end: m.end(),
                route: pattern.route.to_string(),
                device: pattern.device.map(str::to_string),
            });
        }
    }
    best
}

/// Duration normalized to "<N>j" (weeks ×7, months ×30).
pub fn find_duration(text: &str) -> Option<String> {
    let caps = DURATION.captures(text)?;
    let amount: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();
    let days = if unit.starts_with("sem") {
        amount.checked_mul(7)?
    } else if unit == "mois" {
        amount.checked_mul(30)?
    } else {
        amount
    };
    Some(format!("{days}j"))
}

/// First parenthesized group: its trimmed content and the text without it.
pub fn take_parenthesized_note(text: &str) -> (Option<String>, String) {
    let Some(caps) = PARENTHESIZED.captures(text) else {
        return (None, text.to_string());
    };
    let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
        return (None, text.to_string());
    };

    let note = inner.as_str().trim();
    let remaining = join_around(text, whole.start(), whole.end());
    let note = (!note.is_empty()).then(|| note.to_string());
    (note, remaining)
}

/// `notes:` clause up to the end of the text, or up to a phone label if one
/// follows. The clause is removed from the text; the phone part is kept.
pub fn take_labeled_note(text: &str) -> (Option<String>, String) {
    let Some(label) = NOTES_LABEL.find(text) else {
        return (None, text.to_string());
    };

    let tail = &text[label.end()..];
    let clause_end = PHONE_LABEL
        .find(tail)
        .map(|m| label.end() + m.start())
        .unwrap_or(text.len());

    let note = text[label.end()..clause_end]
        .trim()
        .trim_end_matches([',', ';', '.'])
        .trim();
    let remaining = join_around(text, label.start(), clause_end);
    let note = (!note.is_empty()).then(|| note.to_string());
    (note, remaining)
}

/// Both note passes; notes are joined with [`NOTES_SEPARATOR`].
pub fn extract_notes(text: &str) -> (Option<String>, String) {
    let (parenthesized, text) = take_parenthesized_note(text);
    let (labeled, text) = take_labeled_note(&text);

    let notes = match (parenthesized, labeled) {
        (Some(a), Some(b)) => Some(format!("{a}{NOTES_SEPARATOR}{b}")),
        (a, b) => a.or(b),
    };
    (notes, text)
}

/// Text with `[start, end)` removed, the two sides joined by one space.
fn join_around(text: &str, start: usize, end: usize) -> String {
    let before = text[..start].trim_end();
    let after = text[end..].trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{before} {after}"),
    }
}
