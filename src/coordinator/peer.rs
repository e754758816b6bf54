//! HTTP client for peer-to-peer operations.

use super::protocol::{GetResponse, SetRequest, ENDPOINT_DELETE, ENDPOINT_GET, ENDPOINT_SET};
use crate::cluster::types::Node;

use anyhow::Result;
use std::time::Duration;

/// Deadline for write and delete fan-out calls.
const FORWARD_TIMEOUT: Duration = Duration::from_secs(2);
/// Deadline for peer reads. Reads are single-shot so a dead replica costs
/// one timeout before the coordinator moves to the next one.
const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Fan-out retry policy: a handful of attempts with doubling, jittered
/// backoff. Replicas deduplicate via `last_updated`, so retrying a forward
/// that actually landed is harmless.
const FORWARD_ATTEMPTS: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 100;
const RETRY_MAX_DELAY_MS: u64 = 1000;
const RETRY_JITTER_MS: u64 = 50;

/// Typed wrapper over a shared `reqwest::Client`.
///
/// Fan-out calls retry with backoff and jitter; errors bubble up as
/// `anyhow` and the coordinator decides whether to swallow them (writes,
/// deletes) or fall through to the next replica (reads).
#[derive(Clone, Default)]
pub struct PeerClient {
    http: reqwest::Client,
}

impl PeerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a write to a replica. The request must already carry the
    /// coordinator-assigned `last_updated`.
    pub async fn forward_set(&self, node: &Node, request: &SetRequest) -> Result<()> {
        let url = format!("http://{}{}", node.addr, ENDPOINT_SET);
        let response = self
            .send_with_retry(
                self.http.post(url).json(request).timeout(FORWARD_TIMEOUT),
                FORWARD_ATTEMPTS,
            )
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("set forward to {} failed: {}", node.id, response.status());
        }
        Ok(())
    }

    /// Forward a delete to a replica.
    pub async fn forward_delete(&self, node: &Node, key: &str) -> Result<()> {
        let url = format!("http://{}{}", node.addr, ENDPOINT_DELETE);
        let response = self
            .send_with_retry(
                self.http
                    .delete(url)
                    .query(&[("key", key)])
                    .timeout(FORWARD_TIMEOUT),
                FORWARD_ATTEMPTS,
            )
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("delete forward to {} failed: {}", node.id, response.status());
        }
        Ok(())
    }

    /// Read `key` from a peer.
    ///
    /// `Ok(Some)` on a hit, `Ok(None)` when the peer answered 404; any other
    /// status or a transport failure is an error so the caller tries the
    /// next replica.
    pub async fn fetch(&self, node: &Node, key: &str) -> Result<Option<GetResponse>> {
        let url = format!("http://{}{}", node.addr, ENDPOINT_GET);
        let response = self
            .http
            .get(url)
            .query(&[("key", key)])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("get from {} failed: {}", node.id, response.status());
        }

        Ok(Some(response.json().await?))
    }

    /// Run a prepared request through the shared backoff loop.
    ///
    /// The method, body, query and timeout all live on the builder, which is
    /// re-cloned per attempt (our bodies are buffered JSON, never streams,
    /// so the clone cannot fail).
    async fn send_with_retry(
        &self,
        request: reqwest::RequestBuilder,
        attempts: usize,
    ) -> Result<reqwest::Response> {
        let mut delay_ms = RETRY_BASE_DELAY_MS;

        for attempt in 0..attempts {
            let prepared = request
                .try_clone()
                .ok_or_else(|| anyhow::anyhow!("request body is not replayable"))?;

            match prepared.send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if attempt + 1 == attempts {
                        return Err(anyhow::anyhow!(e));
                    }
                    let jitter = rand::random::<u64>() % RETRY_JITTER_MS;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(RETRY_MAX_DELAY_MS);
                }
            }
        }

        Err(anyhow::anyhow!("retry attempts exhausted"))
    }
}
