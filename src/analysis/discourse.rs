//! Discourse Markers
//!
//! A fixed, categorized lexicon of discourse markers and a detector that
//! matches them as whole words or whole phrases.

use regex::Regex;

/// Discourse function of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerCategory {
    Additive,
    Contrastive,
    Causal,
    Temporal,
    Topic,
    Hedging,
    Response,
}

const LEXICON: &[(MarkerCategory, &[&str])] = &[
    (
        MarkerCategory::Additive,
        &["also", "and", "besides", "furthermore", "moreover", "additionally", "plus"],
    ),
    (
        MarkerCategory::Contrastive,
        &[
            "but",
            "however",
            "although",
            "though",
            "yet",
            "still",
            "nevertheless",
            "nonetheless",
            "on the other hand",
            "in contrast",
            "conversely",
        ],
    ),
    (
        MarkerCategory::Causal,
        &["because", "since", "therefore", "thus", "so", "hence", "consequently", "as a result"],
    ),
    (
        MarkerCategory::Temporal,
        &["then", "first", "next", "finally", "meanwhile", "afterwards", "previously", "subsequently"],
    ),
    (
        MarkerCategory::Topic,
        &["well", "now", "okay", "right", "so", "anyway", "actually", "basically"],
    ),
    (
        MarkerCategory::Hedging,
        &["like", "sort of", "kind of", "i think", "i guess", "maybe", "perhaps", "probably"],
    ),
    (
        MarkerCategory::Response,
        &["yes", "yeah", "no", "right", "okay", "sure", "absolutely"],
    ),
];

/// A lexicon entry. A marker listed under several categories keeps all of them.
#[derive(Debug, Clone)]
pub struct DiscourseMarker {
    pub text: &'static str,
    pub categories: Vec<MarkerCategory>,
    pattern: Regex,
}

impl DiscourseMarker {
    fn new(text: &'static str, category: MarkerCategory) -> Self {
        // Words of a phrase may be separated by any run of whitespace.
        let body = text
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", body))
            .expect("lexicon entries are plain words and always compile");
        Self {
            text,
            categories: vec![category],
            pattern,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Ordered marker list with set semantics: each marker appears once, in the
/// order it was first listed.
#[derive(Debug, Clone)]
pub struct DiscourseLexicon {
    markers: Vec<DiscourseMarker>,
}

impl DiscourseLexicon {
    fn build() -> Self {
        let mut markers: Vec<DiscourseMarker> = Vec::new();
        for (category, words) in LEXICON {
            for word in *words {
                match markers.iter_mut().find(|m| m.text == *word) {
                    Some(existing) => existing.categories.push(*category),
                    None => markers.push(DiscourseMarker::new(*word, *category)),
                }
            }
        }
        Self { markers }
    }

    pub fn markers(&self) -> &[DiscourseMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[cfg(test)]
    fn by_category(&self, category: MarkerCategory) -> impl Iterator<Item = &DiscourseMarker> {
        self.markers
            .iter()
            .filter(move |m| m.categories.contains(&category))
    }

    /// Number of lexicon entries occurring anywhere in `text`, substrings of
    /// longer words included. Used by the orality heuristic.
    pub fn containment_hits(&self, text: &str) -> usize {
        let lowered = text.to_lowercase();
        self.markers
            .iter()
            .filter(|m| lowered.contains(m.text))
            .count()
    }
}

lazy_static::lazy_static! {
    /// Shared, compiled marker lexicon
    pub static ref DISCOURSE_LEXICON: DiscourseLexicon = DiscourseLexicon::build();
}

/// Finds the lexicon markers present in a segment
#[derive(Debug, Clone, Copy)]
pub struct DiscourseDetector {
    lexicon: &'static DiscourseLexicon,
}

impl DiscourseDetector {
    pub fn new() -> Self {
        Self {
            lexicon: &DISCOURSE_LEXICON,
        }
    }

    /// Matched markers in lexicon order, without duplicates
    pub fn detect(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.lexicon
            .markers()
            .iter()
            .filter(|m| m.matches(text))
            .map(|m| m.text.to_string())
            .collect()
    }
}

impl Default for DiscourseDetector {
    fn default() -> Self {
        Self::new()
    }
}
