//! Extended Features
//!
//! Narrows the feature extractor's output to a three-field summary. Unlike the
//! other adapters, failure omits the summary instead of zeroing it.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::types::{FeatureOutcome, FeatureSummary};
use crate::capabilities::FeatureExtractor;

pub const LEXICAL_DIVERSITY: &str = "LexicalDiversity";
pub const AVG_WORD_LENGTH: &str = "AvgWordLength";
pub const SENTENCE_COMPLEXITY: &str = "SentenceComplexity";

pub fn summarize(features: &HashMap<String, f64>) -> FeatureSummary {
    let get = |name: &str| features.get(name).copied().unwrap_or(0.0);
    FeatureSummary {
        lexical_diversity: get(LEXICAL_DIVERSITY),
        avg_word_length: get(AVG_WORD_LENGTH),
        sentence_complexity: get(SENTENCE_COMPLEXITY),
    }
}

#[derive(Clone)]
pub struct FeatureAdapter {
    extractor: Option<Arc<dyn FeatureExtractor>>,
}

impl FeatureAdapter {
    pub fn new(extractor: Option<Arc<dyn FeatureExtractor>>) -> Self {
        Self { extractor }
    }

    pub async fn extract(&self, text: &str) -> FeatureOutcome {
        let Some(extractor) = &self.extractor else {
            return FeatureOutcome::Unavailable;
        };
        if text.trim().is_empty() {
            return FeatureOutcome::Skipped;
        }

        match extractor.extract(text).await {
            Ok(features) => {
                let summary = summarize(&features);
                if [summary.lexical_diversity, summary.avg_word_length, summary.sentence_complexity]
                    .iter()
                    .all(|v| v.is_finite())
                {
                    FeatureOutcome::Extracted(summary)
                } else {
                    warn!("Feature extraction returned non-finite values: {:?}", summary);
                    FeatureOutcome::Failed("non-finite feature values".to_string())
                }
            }
            Err(e) => {
                warn!("Feature extraction failed: {:#}", e);
                FeatureOutcome::Failed(e.to_string())
            }
        }
    }
}
