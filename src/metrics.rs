// src/metrics.rs
//! Prometheus exposition for the scan counters emitted across the crate.

use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Must run before the first
    /// pipeline run so the scan counters land in the registry; also pins a
    /// static gauge with the configured cache TTL for dashboard context.
    pub fn init(cache_ttl_secs: u64) -> Self {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("prometheus: install recorder");
        gauge!("listing_cache_ttl_secs").set(cache_ttl_secs as f64);
        Self { handle }
    }

    /// Router exposing `/metrics` in the Prometheus exposition format,
    /// merged with the API router in `main`.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
