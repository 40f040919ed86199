//! Linguistic Analysis
//!
//! Discourse markers, orality, part-of-speech buckets, readability and
//! extended features, composed per segment by [`pipeline::AnalysisPipeline`].

pub mod discourse;
pub mod features;
pub mod orality;
pub mod pipeline;
pub mod pos;
pub mod readability;
pub mod types;

pub use discourse::{DiscourseDetector, MarkerCategory, DISCOURSE_LEXICON};
pub use orality::{OralityHeuristic, OralityScorer, OralityStrategy};
pub use pipeline::AnalysisPipeline;
pub use types::{
    AnalysisRequest, AnalysisResponse, FeatureSummary, PosCounts, ReadabilityMetrics, Segment,
    SegmentAnalysis, SegmentResult,
};
