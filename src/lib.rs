//! Linguistic Analysis Service
//!
//! Per-segment linguistic profiling for short text passages:
//! - Orality score (spoken-like vs written-like), model-backed with a heuristic fallback
//! - Part-of-speech distribution over eight coarse categories
//! - Discourse marker detection
//! - Readability metrics
//! - Optional extended linguistic features
//!
//! External taggers and models plug in through the traits in [`capabilities`].

pub mod analysis;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod server;
pub mod telemetry;

// Re-exports for convenience
pub use analysis::{AnalysisPipeline, Segment, SegmentResult};
pub use capabilities::Capabilities;
pub use config::ServiceConfig;
pub use error::{AnalysisError, ConfigError};
