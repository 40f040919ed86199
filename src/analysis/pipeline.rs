//! Analysis Pipeline
//!
//! Runs every scorer over each segment and assembles results in input order.
//! Collaborator failures are absorbed by the individual adapters; anything
//! that still escapes a segment (a panic) fails the whole batch.

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::discourse::DiscourseDetector;
use super::features::FeatureAdapter;
use super::orality::OralityScorer;
use super::pos::PosAggregator;
use super::readability::ReadabilityAdapter;
use super::types::{Segment, SegmentAnalysis, SegmentResult};
use crate::capabilities::Capabilities;
use crate::error::AnalysisError;

/// Spawned segment task, aborted when dropped before it finishes
struct SegmentTask(JoinHandle<SegmentAnalysis>);

impl Drop for SegmentTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Stateless per-request analyzer. Cloning is cheap; all capability handles are shared.
#[derive(Clone)]
pub struct AnalysisPipeline {
    discourse: DiscourseDetector,
    orality: OralityScorer,
    pos: PosAggregator,
    readability: ReadabilityAdapter,
    features: FeatureAdapter,
    concurrency: usize,
}

impl AnalysisPipeline {
    pub fn new(capabilities: &Capabilities) -> Self {
        Self {
            discourse: DiscourseDetector::new(),
            orality: OralityScorer::new(capabilities.orality_model.clone()),
            pos: PosAggregator::new(capabilities.tagger.clone()),
            readability: ReadabilityAdapter::new(capabilities.readability.clone()),
            features: FeatureAdapter::new(capabilities.feature_extractor.clone()),
            concurrency: 1,
        }
    }

    /// Number of segments analysed at once. Output order is unaffected.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Analyses one segment. The scorers are independent and run concurrently.
    pub async fn analyze_segment(&self, segment: &Segment) -> SegmentAnalysis {
        let text = segment.text.trim();

        let (orality, pos, readability, features) = tokio::join!(
            self.orality.score(text),
            self.pos.count(text),
            self.readability.measure(text),
            self.features.extract(text),
        );
        let discourse_markers = self.discourse.detect(text);

        debug!(
            segment_index = segment.segment_index,
            orality = orality.value,
            pos_tokens = pos.counts().total(),
            markers = discourse_markers.len(),
            "segment analysed"
        );

        SegmentAnalysis {
            segment_index: segment.segment_index,
            text: text.to_string(),
            orality,
            pos,
            discourse_markers,
            readability,
            features,
        }
    }

    /// Analyses a batch, all or nothing: either one analysis per segment in
    /// input order, or an error and no results. Segments still running when
    /// the batch fails or is dropped are aborted.
    pub async fn analyze_batch(&self, segments: Vec<Segment>) -> Result<Vec<SegmentAnalysis>, AnalysisError> {
        stream::iter(segments)
            .map(|segment| {
                let pipeline = self.clone();
                let index = segment.segment_index;
                let mut task = SegmentTask(tokio::spawn(async move {
                    pipeline.analyze_segment(&segment).await
                }));
                async move {
                    (&mut task.0).await.map_err(|source| {
                        error!("Analysis of segment {} aborted: {}", index, source);
                        AnalysisError::SegmentAborted { index, source }
                    })
                }
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// [`analyze_batch`](Self::analyze_batch) collapsed to the wire shape
    pub async fn analyze(&self, segments: Vec<Segment>) -> Result<Vec<SegmentResult>, AnalysisError> {
        let analyses = self.analyze_batch(segments).await?;
        Ok(analyses.into_iter().map(SegmentAnalysis::into_result).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::orality::NEUTRAL_SCORE;
    use crate::analysis::types::{FeatureOutcome, OralitySource, PosOutcome, ReadabilityOutcome};

    #[tokio::test]
    async fn test_empty_segment_defaults() {
        let pipeline = AnalysisPipeline::new(&Capabilities::none());
        let results = pipeline.analyze(vec![Segment::new(0, "")]).await.unwrap();
        assert_eq!(results.len(), 1);

        let result = &results[0];
        assert_eq!(result.orality_score, NEUTRAL_SCORE);
        assert_eq!(result.readability_score, 0.0);
        assert!(result.discourse_markers.is_empty());
        assert!(result.parts_of_speech.is_zero());
        assert!(result.lingfeat_summary.is_none());
    }

    #[tokio::test]
    async fn test_text_is_trimmed() {
        let pipeline = AnalysisPipeline::new(&Capabilities::none());
        let analysis = pipeline.analyze_segment(&Segment::new(4, "  Well, okay.\n")).await;
        assert_eq!(analysis.text, "Well, okay.");
        assert_eq!(analysis.discourse_markers, vec!["well", "okay"]);
        assert_eq!(analysis.orality.source, OralitySource::Heuristic);
        assert_eq!(analysis.pos, PosOutcome::Unavailable);
        assert_eq!(analysis.readability, ReadabilityOutcome::Unavailable);
        assert_eq!(analysis.features, FeatureOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_order_and_indices_preserved() {
        let pipeline = AnalysisPipeline::new(&Capabilities::none()).with_concurrency(3);
        let segments = vec![
            Segment::new(3, "First one."),
            Segment::new(1, "Second, I guess."),
            Segment::new(2, "Third!"),
        ];
        let results = pipeline.analyze(segments).await.unwrap();
        let indices: Vec<i64> = results.iter().map(|r| r.segment_index).collect();
        assert_eq!(indices, vec![3, 1, 2]);
        assert_eq!(results[1].text, "Second, I guess.");
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let pipeline = AnalysisPipeline::new(&Capabilities::none());
        assert!(pipeline.analyze(Vec::new()).await.unwrap().is_empty());
    }

    #[test]
    fn test_concurrency_floor() {
        let pipeline = AnalysisPipeline::new(&Capabilities::none()).with_concurrency(0);
        assert_eq!(pipeline.concurrency(), 1);
    }
}
