// src/sources/mod.rs
//! Source extractors: one per funding source, all emitting the common
//! [`RawListing`] shape. Extractors never filter by date or relevance;
//! that is the pipeline's job.

pub mod grants_rss;
pub mod html_list;
pub mod hrm_table;
pub mod static_list;

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::OnceCell;

use crate::fetch::PageFetcher;
use crate::listing::RawListing;

#[async_trait::async_trait]
pub trait GrantSource: Send + Sync {
    /// Extract zero or more raw listings.
    ///
    /// `Err` means the source was unavailable or its content unreadable;
    /// `Ok(vec![])` means it was reachable but yielded nothing. The pipeline
    /// keeps the two distinguishable (log + counter) but treats both as
    /// "zero listings from this source". Neither aborts the run.
    async fn extract(&self) -> Result<Vec<RawListing>>;

    fn name(&self) -> &'static str;
}

/// All configured sources in declared order. The order is fixed so repeated
/// runs produce the table in the same row order.
pub fn default_sources(fetcher: &Arc<PageFetcher>) -> Vec<Box<dyn GrantSource>> {
    vec![
        Box::new(html_list::HtmlListSource::from_spec(
            &html_list::CMHC_FUNDING,
            fetcher.clone(),
        )),
        Box::new(html_list::HtmlListSource::from_spec(
            &html_list::CHTC_FUNDING,
            fetcher.clone(),
        )),
        Box::new(hrm_table::HrmTableSource::from_fetcher(fetcher.clone())),
        Box::new(grants_rss::GrantsRssSource::from_url(
            grants_rss::FCM_BULLETIN_URL,
            fetcher.clone(),
        )),
        Box::new(static_list::StaticListSource::new()),
    ]
}

/// Decode HTML entities, collapse whitespace runs, trim.
pub(crate) fn clean_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(decoded.as_ref(), " ").trim().to_string()
}

/// Resolve `href` against `base` into an absolute URL string. `None` for
/// unparseable inputs; callers skip such items rather than emit a listing
/// with a broken link.
pub(crate) fn absolutize(base: &str, href: &str) -> Option<String> {
    let base = url::Url::parse(base).ok()?;
    base.join(href.trim()).ok().map(|u| u.to_string())
}
