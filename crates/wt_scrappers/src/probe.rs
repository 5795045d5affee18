use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use reqwest::{redirect, Client};
use tokio::sync::Semaphore;
use wt_core::Result;

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// How many links, from the start of the list, get checked
    pub limit: usize,
    pub timeout: Duration,
    pub concurrency: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            limit: 15,
            timeout: Duration::from_secs(8),
            concurrency: 10,
        }
    }
}

/// Checks whether external links still resolve.
#[derive(Debug, Clone)]
pub struct LinkProber {
    client: Client,
    config: ProbeConfig,
    semaphore: Arc<Semaphore>,
}

impl LinkProber {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
            config,
        })
    }

    /// HEAD first, GET for servers that reject HEAD. Any transport error
    /// counts as broken.
    pub async fn is_broken(&self, url: &str) -> bool {
        let _permit = self.semaphore.acquire().await.ok();

        match self.client.head(url).send().await {
            Ok(resp) if reachable(resp.status()) => return false,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("HEAD {} failed: {}", url, e);
                return true;
            }
        }
        match self.client.get(url).send().await {
            Ok(resp) => !reachable(resp.status()),
            Err(e) => {
                tracing::debug!("GET {} failed: {}", url, e);
                true
            }
        }
    }

    /// Broken links among the first `limit` entries, in input order.
    pub async fn find_broken(&self, urls: &[String]) -> Vec<String> {
        let sample = &urls[..urls.len().min(self.config.limit)];
        let checks = join_all(sample.iter().map(|url| self.is_broken(url))).await;
        sample
            .iter()
            .zip(checks)
            .filter(|(_, broken)| *broken)
            .map(|(url, _)| url.clone())
            .collect()
    }
}

fn reachable(status: reqwest::StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}
