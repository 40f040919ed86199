//! Analysis Data Model
//!
//! Wire types exchanged over `/analyze` plus the internal outcome types that
//! keep "capability unavailable" distinct from "computed zero" until the
//! result is serialized.

use serde::{Deserialize, Serialize};

/// A caller-labelled text passage. `segment_index` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub segment_index: i64,
    pub text: String,
}

impl Segment {
    pub fn new(segment_index: i64, text: impl Into<String>) -> Self {
        Self {
            segment_index,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub segments: Vec<Segment>,
}

/// Coarse part-of-speech buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosBucket {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Interjection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosCounts {
    pub nouns: u32,
    pub verbs: u32,
    pub adjectives: u32,
    pub adverbs: u32,
    pub pronouns: u32,
    pub prepositions: u32,
    pub conjunctions: u32,
    pub interjections: u32,
}

impl PosCounts {
    pub fn record(&mut self, bucket: PosBucket) {
        let slot = match bucket {
            PosBucket::Noun => &mut self.nouns,
            PosBucket::Verb => &mut self.verbs,
            PosBucket::Adjective => &mut self.adjectives,
            PosBucket::Adverb => &mut self.adverbs,
            PosBucket::Pronoun => &mut self.pronouns,
            PosBucket::Preposition => &mut self.prepositions,
            PosBucket::Conjunction => &mut self.conjunctions,
            PosBucket::Interjection => &mut self.interjections,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u32 {
        self.nouns
            + self.verbs
            + self.adjectives
            + self.adverbs
            + self.pronouns
            + self.prepositions
            + self.conjunctions
            + self.interjections
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// The six readability formulas reported by the external calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub smog_index: f64,
    pub automated_readability_index: f64,
    pub coleman_liau_index: f64,
}

impl ReadabilityMetrics {
    pub fn is_finite(&self) -> bool {
        [
            self.flesch_reading_ease,
            self.flesch_kincaid_grade,
            self.gunning_fog,
            self.smog_index,
            self.automated_readability_index,
            self.coleman_liau_index,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub lexical_diversity: f64,
    pub avg_word_length: f64,
    pub sentence_complexity: f64,
}

/// Per-segment result as serialized to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub segment_index: i64,
    pub text: String,
    pub orality_score: f64,
    pub parts_of_speech: PosCounts,
    pub discourse_markers: Vec<String>,
    pub readability_score: f64,
    pub readability_metrics: ReadabilityMetrics,
    pub lingfeat_summary: Option<FeatureSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub error: Option<String>,
    pub results: Vec<SegmentResult>,
}

impl AnalysisResponse {
    pub fn success(results: Vec<SegmentResult>) -> Self {
        Self {
            success: true,
            error: None,
            results,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            results: Vec::new(),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// INTERNAL OUTCOMES
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PosOutcome {
    Counted(PosCounts),
    /// No tagger was loaded at startup
    Unavailable,
    Failed(String),
}

impl PosOutcome {
    pub fn counts(&self) -> PosCounts {
        match self {
            PosOutcome::Counted(counts) => *counts,
            PosOutcome::Unavailable | PosOutcome::Failed(_) => PosCounts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadabilityOutcome {
    /// Text was empty, the calculator was not consulted
    Empty,
    Computed {
        primary: f64,
        metrics: ReadabilityMetrics,
    },
    Unavailable,
    Failed(String),
}

impl ReadabilityOutcome {
    pub fn primary_score(&self) -> f64 {
        match self {
            ReadabilityOutcome::Computed { primary, .. } => *primary,
            _ => 0.0,
        }
    }

    pub fn metrics(&self) -> ReadabilityMetrics {
        match self {
            ReadabilityOutcome::Computed { metrics, .. } => *metrics,
            _ => ReadabilityMetrics::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OralitySource {
    ExternalModel,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OralityScore {
    pub value: f64,
    pub source: OralitySource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome {
    Extracted(FeatureSummary),
    /// Text was empty
    Skipped,
    Unavailable,
    Failed(String),
}

impl FeatureOutcome {
    pub fn summary(&self) -> Option<FeatureSummary> {
        match self {
            FeatureOutcome::Extracted(summary) => Some(*summary),
            _ => None,
        }
    }
}

/// Everything computed for one segment, before collapsing to the wire shape
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAnalysis {
    pub segment_index: i64,
    pub text: String,
    pub orality: OralityScore,
    pub pos: PosOutcome,
    pub discourse_markers: Vec<String>,
    pub readability: ReadabilityOutcome,
    pub features: FeatureOutcome,
}

impl SegmentAnalysis {
    pub fn into_result(self) -> SegmentResult {
        SegmentResult {
            segment_index: self.segment_index,
            orality_score: round2(self.orality.value),
            parts_of_speech: self.pos.counts(),
            discourse_markers: self.discourse_markers,
            readability_score: round2(self.readability.primary_score()),
            readability_metrics: self.readability.metrics(),
            lingfeat_summary: self.features.summary(),
            text: self.text,
        }
    }
}

/// Rounds to two decimals. Adding `0.0` turns a `-0.0` into `0.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Clamps a score to [0, 100], never yielding `-0.0`
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0) + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_counts_record() {
        let mut counts = PosCounts::default();
        assert!(counts.is_zero());
        counts.record(PosBucket::Noun);
        counts.record(PosBucket::Noun);
        counts.record(PosBucket::Interjection);
        assert_eq!(counts.nouns, 2);
        assert_eq!(counts.interjections, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_unavailable_collapses_to_zero_only_on_serialization() {
        let analysis = SegmentAnalysis {
            segment_index: 7,
            text: "hello".to_string(),
            orality: OralityScore { value: 61.234, source: OralitySource::Heuristic },
            pos: PosOutcome::Unavailable,
            discourse_markers: vec![],
            readability: ReadabilityOutcome::Failed("boom".to_string()),
            features: FeatureOutcome::Failed("boom".to_string()),
        };
        assert_ne!(analysis.readability, ReadabilityOutcome::Computed {
            primary: 0.0,
            metrics: ReadabilityMetrics::default(),
        });

        let result = analysis.into_result();
        assert_eq!(result.segment_index, 7);
        assert_eq!(result.orality_score, 61.23);
        assert!(result.parts_of_speech.is_zero());
        assert_eq!(result.readability_score, 0.0);
        assert_eq!(result.readability_metrics, ReadabilityMetrics::default());
        assert!(result.lingfeat_summary.is_none());
    }

    #[test]
    fn test_segment_result_wire_fields() {
        let result = SegmentResult {
            segment_index: 1,
            text: "ok".to_string(),
            orality_score: 50.0,
            parts_of_speech: PosCounts::default(),
            discourse_markers: vec!["okay".to_string()],
            readability_score: 0.0,
            readability_metrics: ReadabilityMetrics::default(),
            lingfeat_summary: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["segment_index"], 1);
        assert_eq!(json["parts_of_speech"]["interjections"], 0);
        assert_eq!(json["readability_metrics"]["coleman_liau_index"], 0.0);
        assert!(json["lingfeat_summary"].is_null());
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        assert!(clamp_score(-0.0).is_sign_positive());
        assert!(round2(-0.0).is_sign_positive());
        assert!(round2(-0.001).is_sign_positive());
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
    }

    #[test]
    fn test_failure_response_has_no_results() {
        let response = AnalysisResponse::failure("bad");
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("bad"));
        assert!(response.results.is_empty());
    }
}
