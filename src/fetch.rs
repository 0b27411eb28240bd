// src/fetch.rs
//! Page fetching with silent-and-local failure.
//!
//! Every transport problem (timeout, connection error, non-success status,
//! unreadable body) collapses to [`Fetched::Unavailable`]. A source that is
//! down contributes zero listings on this run; it never aborts the run and
//! is never retried before the next cache refresh.

use std::time::Duration;

use metrics::counter;

/// Per-request timeout, in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Browser-style UA; several grant portals reject the default library one.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0 Safari/537.36 GrantScanner/0.1";

/// Outcome of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Content(String),
    Unavailable,
}

pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("building http client");
        Self { client }
    }

    /// GET `url` and return its body.
    pub async fn get(&self, url: &str) -> Fetched {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = ?e, url, "fetch transport error");
                counter!("fetch_unavailable_total").increment(1);
                return Fetched::Unavailable;
            }
        };
        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), url, "fetch non-success status");
            counter!("fetch_unavailable_total").increment(1);
            return Fetched::Unavailable;
        }
        match resp.text().await {
            Ok(body) => Fetched::Content(body),
            Err(e) => {
                tracing::warn!(error = ?e, url, "fetch body read error");
                counter!("fetch_unavailable_total").increment(1);
                Fetched::Unavailable
            }
        }
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
