//! Remote Capabilities
//!
//! HTTP/JSON clients for capability servers. Each capability is reached at
//! its own base URL and answers `POST /<operation>` with `{"text": ...}`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{Capabilities, FeatureExtractor, OralityModel, ReadabilityCalculator, TaggedToken, Tagger};
use crate::analysis::types::ReadabilityMetrics;
use crate::config::CapabilityConfig;

/// A capability server base URL plus the client used to reach it
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    client: Client,
    base_url: String,
}

impl RemoteEndpoint {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health` answered with a 2xx status
    pub async fn probe(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!("Capability at {} responded with status {}", self.base_url, resp.status());
                false
            }
            Err(e) => {
                warn!("Could not reach capability at {}: {}", self.base_url, e);
                false
            }
        }
    }

    async fn post_text<T: DeserializeOwned>(&self, operation: &str, text: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, operation);
        debug!("POST {} ({} chars)", url, text.len());
        let res = self
            .client
            .post(&url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()?;
        res.json::<T>()
            .await
            .with_context(|| format!("malformed response from {}", url))
    }
}

#[derive(Deserialize)]
struct TagResponse {
    tokens: Vec<TaggedToken>,
}

pub struct RemoteTagger {
    endpoint: RemoteEndpoint,
}

impl RemoteTagger {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl Tagger for RemoteTagger {
    async fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let res: TagResponse = self.endpoint.post_text("tag", text).await?;
        Ok(res.tokens)
    }
}

pub struct RemoteReadability {
    endpoint: RemoteEndpoint,
}

impl RemoteReadability {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl ReadabilityCalculator for RemoteReadability {
    async fn measure(&self, text: &str) -> Result<ReadabilityMetrics> {
        self.endpoint.post_text("readability", text).await
    }
}

#[derive(Deserialize)]
struct OralityResponse {
    score: f64,
}

pub struct RemoteOralityModel {
    endpoint: RemoteEndpoint,
}

impl RemoteOralityModel {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl OralityModel for RemoteOralityModel {
    async fn score(&self, text: &str) -> Result<f64> {
        let res: OralityResponse = self.endpoint.post_text("orality", text).await?;
        Ok(res.score)
    }
}

#[derive(Deserialize)]
struct FeaturesResponse {
    features: HashMap<String, f64>,
}

pub struct RemoteFeatureExtractor {
    endpoint: RemoteEndpoint,
}

impl RemoteFeatureExtractor {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl FeatureExtractor for RemoteFeatureExtractor {
    async fn extract(&self, text: &str) -> Result<HashMap<String, f64>> {
        let res: FeaturesResponse = self.endpoint.post_text("features", text).await?;
        Ok(res.features)
    }
}

/// Connects every configured capability. Unconfigured or unreachable ones are
/// left out and reported once here.
pub async fn load_capabilities(config: &CapabilityConfig) -> Result<Capabilities> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("failed to build capability HTTP client")?;

    let mut caps = Capabilities::none();

    if let Some(endpoint) = connect("tagger", config.tagger_url.as_deref(), &client, config.probe).await {
        caps = caps.with_tagger(Arc::new(RemoteTagger::new(endpoint)));
    }
    if let Some(endpoint) = connect("readability", config.readability_url.as_deref(), &client, config.probe).await {
        caps = caps.with_readability(Arc::new(RemoteReadability::new(endpoint)));
    }
    if let Some(endpoint) = connect("orality_model", config.orality_url.as_deref(), &client, config.probe).await {
        caps = caps.with_orality_model(Arc::new(RemoteOralityModel::new(endpoint)));
    }
    if let Some(endpoint) = connect("extended_features", config.features_url.as_deref(), &client, config.probe).await {
        caps = caps.with_feature_extractor(Arc::new(RemoteFeatureExtractor::new(endpoint)));
    }

    Ok(caps)
}

async fn connect(name: &str, url: Option<&str>, client: &Client, probe: bool) -> Option<RemoteEndpoint> {
    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        warn!("⚠️  {} capability not configured; running without it", name);
        return None;
    };

    let endpoint = RemoteEndpoint::new(client.clone(), url);
    if probe && !endpoint.probe().await {
        warn!("⚠️  {} capability unavailable at {}; running without it", name, endpoint.base_url());
        return None;
    }

    info!("✅ {} capability loaded from {}", name, endpoint.base_url());
    Some(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let endpoint = RemoteEndpoint::new(Client::new(), "http://localhost:9001/");
        assert_eq!(endpoint.base_url(), "http://localhost:9001");
    }

    #[tokio::test]
    async fn test_unconfigured_capabilities_are_absent() {
        let config = CapabilityConfig {
            tagger_url: None,
            readability_url: Some("   ".to_string()),
            orality_url: None,
            features_url: None,
            timeout_secs: 1,
            probe: true,
        };
        let caps = load_capabilities(&config).await.unwrap();
        assert!(caps.availability().values().all(|v| !v));
    }

    #[tokio::test]
    async fn test_configured_without_probe_is_loaded() {
        let config = CapabilityConfig {
            tagger_url: Some("http://127.0.0.1:9".to_string()),
            readability_url: None,
            orality_url: None,
            features_url: None,
            timeout_secs: 1,
            probe: false,
        };
        let caps = load_capabilities(&config).await.unwrap();
        assert!(caps.tagger.is_some());
        assert!(caps.readability.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_capability_fails_the_call() {
        let tagger = RemoteTagger::new(RemoteEndpoint::new(
            Client::builder().timeout(Duration::from_secs(1)).build().unwrap(),
            "http://127.0.0.1:9",
        ));
        assert!(tagger.tag("hello").await.is_err());
    }
}
