// src/pipeline.rs
//! Staged aggregation: extract → normalize → cutoff → relevance, plus the
//! cached [`Scanner`] facade the HTTP layer talks to.

use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;

use crate::cache::ListingCache;
use crate::config::ScannerConfig;
use crate::listing::{Listing, RawListing};
use crate::relevance::is_relevant;
use crate::sources::GrantSource;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "scan_listings_total",
            "Raw listings collected from all sources."
        );
        describe_counter!(
            "scan_kept_total",
            "Listings surviving the cutoff and relevance filters."
        );
        describe_counter!(
            "scan_deadline_filtered_total",
            "Listings dropped by the cutoff predicate."
        );
        describe_counter!(
            "scan_relevance_filtered_total",
            "Listings dropped by the keyword filter."
        );
        describe_counter!(
            "scan_source_errors_total",
            "Sources that were unavailable or unreadable."
        );
        describe_counter!(
            "scan_listings_extracted_total",
            "Listings parsed per extractor invocation."
        );
        describe_counter!(
            "scan_items_skipped_total",
            "Single malformed items skipped inside extractors."
        );
        describe_counter!(
            "fetch_unavailable_total",
            "Fetches that collapsed to unavailable."
        );
        describe_gauge!("scan_last_run_ts", "Unix ts when the pipeline last ran.");
    });
}

/// Per-run accounting. Kept distinguishable for operators and tests: an
/// unavailable source is not the same thing as a source with no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub extracted: usize,
    pub kept: usize,
    pub deadline_filtered: usize,
    pub relevance_filtered: usize,
    pub sources_failed: usize,
    pub sources_total: usize,
}

/// Run the staged transform once.
///
/// Stages are total and order-preserving: extractor declaration order first,
/// listing order within each extractor. A failed source contributes zero
/// listings and never aborts the run.
pub async fn run_once(
    sources: &[Box<dyn GrantSource>],
    config: &ScannerConfig,
) -> (Vec<Listing>, RunStats) {
    ensure_metrics_described();

    let mut stats = RunStats {
        sources_total: sources.len(),
        ..Default::default()
    };

    // Stage 1: invoke every extractor, concatenating in declared order.
    let mut raw: Vec<RawListing> = Vec::new();
    for source in sources {
        match source.extract().await {
            Ok(mut v) => raw.append(&mut v),
            Err(e) => {
                tracing::warn!(error = ?e, source = source.name(), "source error");
                counter!("scan_source_errors_total").increment(1);
                stats.sources_failed += 1;
            }
        }
    }
    stats.extracted = raw.len();

    // Stage 2: normalize deadlines for every row.
    let normalized: Vec<Listing> = raw.into_iter().map(RawListing::resolve).collect();

    // Stage 3: cutoff predicate. The boundary date itself is kept, and
    // open-ended deadlines always pass.
    let mut after_cutoff = Vec::with_capacity(normalized.len());
    for listing in normalized {
        if listing.deadline_resolved.is_on_or_after(config.cutoff) {
            after_cutoff.push(listing);
        } else {
            stats.deadline_filtered += 1;
        }
    }

    // Stage 4: relevance predicate.
    let mut kept = Vec::with_capacity(after_cutoff.len());
    for listing in after_cutoff {
        if is_relevant(&listing, &config.keywords) {
            kept.push(listing);
        } else {
            stats.relevance_filtered += 1;
        }
    }
    stats.kept = kept.len();

    counter!("scan_listings_total").increment(stats.extracted as u64);
    counter!("scan_kept_total").increment(stats.kept as u64);
    counter!("scan_deadline_filtered_total").increment(stats.deadline_filtered as u64);
    counter!("scan_relevance_filtered_total").increment(stats.relevance_filtered as u64);
    gauge!("scan_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    (kept, stats)
}

/// Facade owning the sources, the configuration, and the cached table.
pub struct Scanner {
    sources: Vec<Box<dyn GrantSource>>,
    config: ScannerConfig,
    cache: ListingCache,
    refresh: tokio::sync::Mutex<()>,
}

impl Scanner {
    pub fn new(sources: Vec<Box<dyn GrantSource>>, config: ScannerConfig) -> Self {
        let cache = ListingCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self {
            sources,
            config,
            cache,
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// The current result table.
    ///
    /// Served from cache while fresh, with no source fetched. On expiry one
    /// caller rebuilds the table under the refresh guard; concurrent misses
    /// wait on the same refresh and read its result. A run in which every
    /// source failed replaces nothing: the previous table stays intact and
    /// is served until a later refresh succeeds.
    pub async fn table(&self) -> Arc<Vec<Listing>> {
        if let Some(table) = self.cache.get_fresh() {
            return table;
        }

        let _guard = self.refresh.lock().await;
        // Someone else may have refreshed while we waited for the guard.
        if let Some(table) = self.cache.get_fresh() {
            return table;
        }

        let (listings, stats) = run_once(&self.sources, &self.config).await;
        tracing::info!(
            extracted = stats.extracted,
            kept = stats.kept,
            deadline_filtered = stats.deadline_filtered,
            relevance_filtered = stats.relevance_filtered,
            sources_failed = stats.sources_failed,
            "pipeline run complete"
        );

        if stats.sources_failed == stats.sources_total && stats.sources_total > 0 {
            if let Some(previous) = self.cache.get_any() {
                tracing::warn!("all sources failed; keeping previous table");
                return previous;
            }
        }
        self.cache.store(listings)
    }
}
