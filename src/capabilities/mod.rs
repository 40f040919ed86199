//! Capabilities
//!
//! External analysis collaborators consumed through narrow async contracts.
//! Handles are built once at startup, bundled in [`Capabilities`] and shared
//! read-only across requests. Any of them may be absent.

pub mod remote;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::analysis::types::ReadabilityMetrics;

pub use remote::{RemoteEndpoint, RemoteFeatureExtractor, RemoteOralityModel, RemoteReadability, RemoteTagger};

/// A token with its coarse part-of-speech label (e.g. `NOUN`, `AUX`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }
}

/// Part-of-speech tagger
#[async_trait]
pub trait Tagger: Send + Sync {
    async fn tag(&self, text: &str) -> Result<Vec<TaggedToken>>;
}

/// Calculator for the six standard readability formulas
#[async_trait]
pub trait ReadabilityCalculator: Send + Sync {
    async fn measure(&self, text: &str) -> Result<ReadabilityMetrics>;
}

/// Orality model returning a native score in [0, 1], higher meaning more spoken-like
#[async_trait]
pub trait OralityModel: Send + Sync {
    async fn score(&self, text: &str) -> Result<f64>;
}

/// Extractor of named scalar linguistic features
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<HashMap<String, f64>>;
}

/// The set of collaborators loaded for this process
#[derive(Clone, Default)]
pub struct Capabilities {
    pub tagger: Option<Arc<dyn Tagger>>,
    pub readability: Option<Arc<dyn ReadabilityCalculator>>,
    pub orality_model: Option<Arc<dyn OralityModel>>,
    pub feature_extractor: Option<Arc<dyn FeatureExtractor>>,
}

impl Capabilities {
    /// No collaborators at all; every component runs in its degraded mode
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn with_readability(mut self, calculator: Arc<dyn ReadabilityCalculator>) -> Self {
        self.readability = Some(calculator);
        self
    }

    pub fn with_orality_model(mut self, model: Arc<dyn OralityModel>) -> Self {
        self.orality_model = Some(model);
        self
    }

    pub fn with_feature_extractor(mut self, extractor: Arc<dyn FeatureExtractor>) -> Self {
        self.feature_extractor = Some(extractor);
        self
    }

    /// Availability flags as reported by `GET /`
    pub fn availability(&self) -> BTreeMap<&'static str, bool> {
        BTreeMap::from([
            ("tagger", self.tagger.is_some()),
            ("readability", self.readability.is_some()),
            ("orality_model", self.orality_model.is_some()),
            ("extended_features", self.feature_extractor.is_some()),
        ])
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.availability()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullModel;

    #[async_trait]
    impl OralityModel for NullModel {
        async fn score(&self, _text: &str) -> Result<f64> {
            Ok(0.0)
        }
    }

    #[test]
    fn test_availability_flags() {
        let caps = Capabilities::none();
        assert!(caps.availability().values().all(|v| !v));

        let caps = caps.with_orality_model(Arc::new(NullModel));
        let flags = caps.availability();
        assert_eq!(flags["orality_model"], true);
        assert_eq!(flags["tagger"], false);
        assert_eq!(flags.len(), 4);
    }

    #[test]
    fn test_capabilities_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Capabilities>();
    }
}
