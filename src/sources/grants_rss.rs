// src/sources/grants_rss.rs
//! FCM funding bulletin feed.
//!
//! The Federation of Canadian Municipalities announces program intakes on an
//! RSS feed rather than a stable listings page. Feed items put closing dates
//! in prose, so the item description doubles as the raw deadline text for
//! the normalizer to scan.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::counter;
use quick_xml::de::from_str;
use serde::Deserialize;

use super::{clean_text, GrantSource};
use crate::fetch::{Fetched, PageFetcher};
use crate::listing::RawListing;

pub const FCM_BULLETIN_URL: &str = "https://fcm.ca/en/news-media/rss/funding.xml";
const SOURCE_NAME: &str = "FCM";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
}

enum Mode {
    Http {
        url: &'static str,
        fetcher: Arc<PageFetcher>,
    },
    Fixture(String),
}

pub struct GrantsRssSource {
    mode: Mode,
}

impl GrantsRssSource {
    pub fn from_url(url: &'static str, fetcher: Arc<PageFetcher>) -> Self {
        Self {
            mode: Mode::Http { url, fetcher },
        }
    }

    /// Parse a canned feed instead of fetching; used by tests.
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    fn parse_items_from_str(s: &str) -> Result<Vec<RawListing>> {
        let xml_clean = scrub_html_entities_for_xml(s);
        let rss: Rss = from_str(&xml_clean).context("parsing funding bulletin xml")?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let title = clean_text(it.title.as_deref().unwrap_or_default());
            // Items missing a title or a usable absolute link are skipped
            // alone; the rest of the feed still contributes.
            if title.is_empty() {
                counter!("scan_items_skipped_total").increment(1);
                continue;
            }
            let link = it
                .link
                .as_deref()
                .map(str::trim)
                .filter(|l| url::Url::parse(l).is_ok());
            let Some(link) = link else {
                counter!("scan_items_skipped_total").increment(1);
                continue;
            };
            let description = clean_text(it.description.as_deref().unwrap_or_default());

            out.push(RawListing {
                source: SOURCE_NAME.to_string(),
                title,
                deadline_raw: description.clone(),
                description,
                amount: String::new(),
                category: "Municipal programs".to_string(),
                link: link.to_string(),
            });
        }
        counter!("scan_listings_extracted_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl GrantSource for GrantsRssSource {
    async fn extract(&self) -> Result<Vec<RawListing>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_items_from_str(s),
            Mode::Http { url, fetcher } => match fetcher.get(url).await {
                Fetched::Content(body) => Self::parse_items_from_str(&body),
                Fetched::Unavailable => return Err(anyhow!("{} feed unavailable", SOURCE_NAME)),
            },
        }
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}

// Feeds routinely embed HTML entities that are not valid XML ones.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
