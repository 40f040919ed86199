//! Orality Scoring
//!
//! Estimates how spoken-like a segment is on a 0-100 scale. The external
//! orality model is tried first; the deterministic heuristic answers whenever
//! the model is missing or its call fails.

use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::warn;

use super::discourse::{DiscourseLexicon, DISCOURSE_LEXICON};
use super::types::{clamp_score, OralityScore, OralitySource};
use crate::capabilities::OralityModel;

/// Score returned for empty text
pub const NEUTRAL_SCORE: f64 = 50.0;

const INDICATOR_CAP: f64 = 25.0;
const PERSONAL_PRONOUNS: &[&str] = &["i", "you", "we", "me", "my", "your", "our"];
const CONTRACTIONS: &[&str] = &["'m", "'re", "'ve", "'ll", "'d", "n't", "'s"];

/// One way of producing an orality score
pub enum OralityStrategy<'a> {
    ExternalModel(&'a dyn OralityModel),
    HeuristicFallback(&'a OralityHeuristic),
}

impl OralityStrategy<'_> {
    pub fn source(&self) -> OralitySource {
        match self {
            OralityStrategy::ExternalModel(_) => OralitySource::ExternalModel,
            OralityStrategy::HeuristicFallback(_) => OralitySource::Heuristic,
        }
    }

    pub async fn score(&self, text: &str) -> Result<f64> {
        match self {
            OralityStrategy::ExternalModel(model) => {
                let native = model.score(text).await?;
                if !native.is_finite() {
                    bail!("orality model returned a non-finite score ({})", native);
                }
                Ok(clamp_score(native * 100.0))
            }
            OralityStrategy::HeuristicFallback(heuristic) => Ok(heuristic.score(text)),
        }
    }
}

/// Weighted sum of four spoken-language indicators, 25 points each
#[derive(Debug, Clone, Copy)]
pub struct OralityHeuristic {
    lexicon: &'static DiscourseLexicon,
}

/// Points contributed by each indicator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OralityBreakdown {
    pub discourse: f64,
    pub pronouns: f64,
    pub word_length: f64,
    pub contractions: f64,
}

impl OralityBreakdown {
    pub fn total(&self) -> f64 {
        self.discourse + self.pronouns + self.word_length + self.contractions
    }
}

impl OralityHeuristic {
    pub fn new() -> Self {
        Self {
            lexicon: &DISCOURSE_LEXICON,
        }
    }

    pub fn score(&self, text: &str) -> f64 {
        match self.breakdown(text) {
            Some(points) => clamp_score(points.total()),
            None => NEUTRAL_SCORE,
        }
    }

    /// `None` for text without any words
    pub fn breakdown(&self, text: &str) -> Option<OralityBreakdown> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        let word_count = words.len() as f64;

        let discourse_hits = self.lexicon.containment_hits(&lowered) as f64;
        let discourse = (discourse_hits / word_count * 100.0 * 5.0).min(INDICATOR_CAP);

        let pronoun_hits = words
            .iter()
            .filter(|w| PERSONAL_PRONOUNS.contains(*w))
            .count() as f64;
        let pronouns = (pronoun_hits / word_count * 100.0 * 3.0).min(INDICATOR_CAP);

        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let avg_len = total_chars as f64 / word_count;
        let word_length = if avg_len < 4.0 {
            25.0
        } else if avg_len < 5.0 {
            15.0
        } else if avg_len < 6.0 {
            5.0
        } else {
            0.0
        };

        // Each contraction form counts once, however often it occurs.
        let contraction_hits = CONTRACTIONS
            .iter()
            .filter(|c| lowered.contains(**c))
            .count() as f64;
        let contractions = (contraction_hits * 5.0).min(INDICATOR_CAP);

        Some(OralityBreakdown {
            discourse,
            pronouns,
            word_length,
            contractions,
        })
    }
}

impl Default for OralityHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-tier scorer: external model first, heuristic fallback
#[derive(Clone)]
pub struct OralityScorer {
    model: Option<Arc<dyn OralityModel>>,
    heuristic: OralityHeuristic,
}

impl OralityScorer {
    pub fn new(model: Option<Arc<dyn OralityModel>>) -> Self {
        Self {
            model,
            heuristic: OralityHeuristic::new(),
        }
    }

    /// Strategies in the order they are tried
    pub fn strategies(&self) -> Vec<OralityStrategy<'_>> {
        let mut strategies = Vec::with_capacity(2);
        if let Some(model) = &self.model {
            strategies.push(OralityStrategy::ExternalModel(model.as_ref()));
        }
        strategies.push(OralityStrategy::HeuristicFallback(&self.heuristic));
        strategies
    }

    pub async fn score(&self, text: &str) -> OralityScore {
        for strategy in self.strategies() {
            match strategy.score(text).await {
                Ok(value) => {
                    return OralityScore {
                        value,
                        source: strategy.source(),
                    }
                }
                Err(e) => warn!("Orality model failed, using heuristic: {:#}", e),
            }
        }
        // The heuristic strategy is always last and never fails.
        OralityScore {
            value: self.heuristic.score(text),
            source: OralitySource::Heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::round2;
    use async_trait::async_trait;

    struct FixedModel(f64);

    #[async_trait]
    impl OralityModel for FixedModel {
        async fn score(&self, _text: &str) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl OralityModel for BrokenModel {
        async fn score(&self, _text: &str) -> Result<f64> {
            bail!("model crashed")
        }
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let heuristic = OralityHeuristic::new();
        assert_eq!(heuristic.score(""), NEUTRAL_SCORE);
        assert_eq!(heuristic.score("  \n\t "), NEUTRAL_SCORE);
    }

    #[test]
    fn test_conversational_text_breakdown() {
        let heuristic = OralityHeuristic::new();
        let text = "I think it's kind of complicated, you know?";
        let points = heuristic.breakdown(text).unwrap();
        // "i think", "kind of", plus "no" and "now" inside "know", over 8 words
        assert_eq!(points.discourse, 25.0);
        // "i" and "you"
        assert_eq!(points.pronouns, 25.0);
        // 36 chars / 8 words = 4.5
        assert_eq!(points.word_length, 15.0);
        // "'s"
        assert_eq!(points.contractions, 5.0);
        assert_eq!(heuristic.score(text), 70.0);
        assert!(heuristic.score(text) > 50.0);
    }

    #[test]
    fn test_formal_text_scores_low() {
        let heuristic = OralityHeuristic::new();
        let score = heuristic.score("Comprehensive institutional documentation necessitates meticulous verification.");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_heuristic_is_deterministic() {
        let heuristic = OralityHeuristic::new();
        let text = "Well, we're gonna need a bigger boat, aren't we?";
        let first = heuristic.score(text);
        for _ in 0..20 {
            assert_eq!(heuristic.score(text), first);
        }
    }

    #[test]
    fn test_contraction_cap() {
        let heuristic = OralityHeuristic::new();
        let points = heuristic
            .breakdown("I'm sure you're right, we've said we'll go, he'd know, don't worry, it's fine")
            .unwrap();
        assert_eq!(points.contractions, 25.0);
    }

    #[tokio::test]
    async fn test_model_score_is_scaled_and_clamped() {
        let scorer = OralityScorer::new(Some(Arc::new(FixedModel(0.42))));
        let score = scorer.score("anything").await;
        assert_eq!(score.source, OralitySource::ExternalModel);
        assert!((score.value - 42.0).abs() < 1e-9);

        let scorer = OralityScorer::new(Some(Arc::new(FixedModel(1.7))));
        assert_eq!(scorer.score("anything").await.value, 100.0);

        let scorer = OralityScorer::new(Some(Arc::new(FixedModel(-0.3))));
        assert_eq!(scorer.score("anything").await.value, 0.0);
    }

    #[tokio::test]
    async fn test_negative_zero_model_score_is_plain_zero() {
        let scorer = OralityScorer::new(Some(Arc::new(FixedModel(-0.0))));
        let score = scorer.score("anything").await;
        assert_eq!(score.source, OralitySource::ExternalModel);
        assert!(score.value.is_sign_positive());

        let json = serde_json::to_string(&round2(score.value)).unwrap();
        assert_eq!(json, "0.0");
    }

    #[tokio::test]
    async fn test_model_failure_falls_back_to_heuristic() {
        let scorer = OralityScorer::new(Some(Arc::new(BrokenModel)));
        let score = scorer.score("").await;
        assert_eq!(score.source, OralitySource::Heuristic);
        assert_eq!(score.value, NEUTRAL_SCORE);
    }

    #[tokio::test]
    async fn test_non_finite_model_score_falls_back() {
        let scorer = OralityScorer::new(Some(Arc::new(FixedModel(f64::NAN))));
        let score = scorer.score("I think so.").await;
        assert_eq!(score.source, OralitySource::Heuristic);
        assert!(score.value.is_finite());
    }

    #[tokio::test]
    async fn test_without_model_uses_heuristic() {
        let scorer = OralityScorer::new(None);
        assert_eq!(scorer.strategies().len(), 1);
        let score = scorer.score("I think it's kind of complicated, you know?").await;
        assert_eq!(score.source, OralitySource::Heuristic);
        assert_eq!(score.value, 70.0);
    }
}
