//! Part-of-Speech Buckets
//!
//! Folds the tagger's coarse labels into eight linguistic categories.

use std::sync::Arc;
use tracing::warn;

use super::types::{PosBucket, PosCounts, PosOutcome};
use crate::capabilities::{TaggedToken, Tagger};

impl PosBucket {
    /// Bucket for a tag label; `None` for labels outside the table (PUNCT, DET, NUM, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NOUN" | "PROPN" => Some(PosBucket::Noun),
            "VERB" | "AUX" => Some(PosBucket::Verb),
            "ADJ" => Some(PosBucket::Adjective),
            "ADV" => Some(PosBucket::Adverb),
            "PRON" => Some(PosBucket::Pronoun),
            "ADP" => Some(PosBucket::Preposition),
            "CCONJ" | "SCONJ" => Some(PosBucket::Conjunction),
            "INTJ" => Some(PosBucket::Interjection),
            _ => None,
        }
    }
}

pub fn aggregate<'a>(tokens: impl IntoIterator<Item = &'a TaggedToken>) -> PosCounts {
    let mut counts = PosCounts::default();
    for bucket in tokens.into_iter().filter_map(|t| PosBucket::from_tag(&t.tag)) {
        counts.record(bucket);
    }
    counts
}

#[derive(Clone)]
pub struct PosAggregator {
    tagger: Option<Arc<dyn Tagger>>,
}

impl PosAggregator {
    pub fn new(tagger: Option<Arc<dyn Tagger>>) -> Self {
        Self { tagger }
    }

    pub async fn count(&self, text: &str) -> PosOutcome {
        let Some(tagger) = &self.tagger else {
            return PosOutcome::Unavailable;
        };
        if text.trim().is_empty() {
            return PosOutcome::Counted(PosCounts::default());
        }

        match tagger.tag(text).await {
            Ok(tokens) => PosOutcome::Counted(aggregate(&tokens)),
            Err(e) => {
                warn!("POS tagging failed: {:#}", e);
                PosOutcome::Failed(e.to_string())
            }
        }
    }
}
