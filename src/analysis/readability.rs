//! Readability
//!
//! Delegates the six formulas to the external calculator. The primary score
//! is Flesch Reading Ease clamped to [0, 100].

use std::sync::Arc;
use tracing::warn;

use super::types::{clamp_score, ReadabilityMetrics, ReadabilityOutcome};
use crate::capabilities::ReadabilityCalculator;

pub fn primary_score(metrics: &ReadabilityMetrics) -> f64 {
    clamp_score(metrics.flesch_reading_ease)
}

#[derive(Clone)]
pub struct ReadabilityAdapter {
    calculator: Option<Arc<dyn ReadabilityCalculator>>,
}

impl ReadabilityAdapter {
    pub fn new(calculator: Option<Arc<dyn ReadabilityCalculator>>) -> Self {
        Self { calculator }
    }

    pub async fn measure(&self, text: &str) -> ReadabilityOutcome {
        if text.trim().is_empty() {
            return ReadabilityOutcome::Empty;
        }
        let Some(calculator) = &self.calculator else {
            return ReadabilityOutcome::Unavailable;
        };

        match calculator.measure(text).await {
            Ok(metrics) if metrics.is_finite() => ReadabilityOutcome::Computed {
                primary: primary_score(&metrics),
                metrics,
            },
            Ok(metrics) => {
                warn!("Readability analysis returned non-finite metrics: {:?}", metrics);
                ReadabilityOutcome::Failed("non-finite readability metrics".to_string())
            }
            Err(e) => {
                warn!("Readability analysis failed: {:#}", e);
                ReadabilityOutcome::Failed(e.to_string())
            }
        }
    }
}
