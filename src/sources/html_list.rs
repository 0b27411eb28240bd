// src/sources/html_list.rs
//! Selector-driven extractor for card/list shaped grant pages.
//!
//! Most funding pages share one shape: a container element per opportunity
//! holding a title, an anchor, and a few labelled fields. A single extractor
//! parameterized by a [`SelectorSpec`] covers all of them; layouts that
//! genuinely don't fit (see `hrm_table`) get their own module instead.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use metrics::counter;
use scraper::{ElementRef, Html, Selector};

use super::{absolutize, clean_text, GrantSource};
use crate::fetch::{Fetched, PageFetcher};
use crate::listing::RawListing;

/// Static description of one card/list shaped source.
pub struct SelectorSpec {
    pub name: &'static str,
    pub url: &'static str,
    /// Base for resolving relative hrefs.
    pub base: &'static str,
    /// One match per opportunity.
    pub item: &'static str,
    pub title: &'static str,
    /// Anchor whose `href` becomes the listing link.
    pub link: &'static str,
    pub description: Option<&'static str>,
    pub deadline: Option<&'static str>,
    pub amount: Option<&'static str>,
    /// Fixed topical tag for everything this source emits.
    pub category: &'static str,
}

pub static CMHC_FUNDING: SelectorSpec = SelectorSpec {
    name: "CMHC",
    url: "https://www.cmhc-schl.gc.ca/professionals/project-funding-and-mortgage-financing/funding-programs",
    base: "https://www.cmhc-schl.gc.ca",
    item: "div.funding-program-card",
    title: "h3.card-title",
    link: "a.card-link",
    description: Some("p.card-text"),
    deadline: Some("span.deadline"),
    amount: Some("span.contribution"),
    category: "Housing",
};

pub static CHTC_FUNDING: SelectorSpec = SelectorSpec {
    name: "CHTC",
    url: "https://centre.support/funding-opportunities/",
    base: "https://centre.support",
    item: "article.funding-opportunity",
    title: "h2.entry-title",
    link: "h2.entry-title a",
    description: Some("div.entry-summary"),
    deadline: Some("div.deadline"),
    amount: Some("div.contribution"),
    category: "Community Housing",
};

enum Mode {
    Http { fetcher: Arc<PageFetcher> },
    Fixture(String),
}

pub struct HtmlListSource {
    spec: &'static SelectorSpec,
    mode: Mode,
}

impl HtmlListSource {
    pub fn from_spec(spec: &'static SelectorSpec, fetcher: Arc<PageFetcher>) -> Self {
        Self {
            spec,
            mode: Mode::Http { fetcher },
        }
    }

    /// Parse a canned document instead of fetching; used by tests.
    pub fn from_fixture(spec: &'static SelectorSpec, html: &str) -> Self {
        Self {
            spec,
            mode: Mode::Fixture(html.to_string()),
        }
    }

    fn parse_document(&self, html: &str) -> Vec<RawListing> {
        let spec = self.spec;
        let doc = Html::parse_document(html);

        // Specs are static literals; a bad selector is a programming error.
        let item_sel = Selector::parse(spec.item).expect("item selector");
        let title_sel = Selector::parse(spec.title).expect("title selector");
        let link_sel = Selector::parse(spec.link).expect("link selector");
        let desc_sel = spec
            .description
            .map(|s| Selector::parse(s).expect("description selector"));
        let deadline_sel = spec
            .deadline
            .map(|s| Selector::parse(s).expect("deadline selector"));
        let amount_sel = spec
            .amount
            .map(|s| Selector::parse(s).expect("amount selector"));

        let mut out = Vec::new();
        for item in doc.select(&item_sel) {
            // Malformed single items are skipped alone; the rest of the
            // page still contributes.
            let title = text_of(&item, &title_sel);
            if title.is_empty() {
                counter!("scan_items_skipped_total").increment(1);
                continue;
            }
            let href = item
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"));
            let Some(link) = href.and_then(|h| absolutize(spec.base, h)) else {
                counter!("scan_items_skipped_total").increment(1);
                continue;
            };

            out.push(RawListing {
                source: spec.name.to_string(),
                title,
                description: opt_text_of(&item, desc_sel.as_ref()),
                deadline_raw: opt_text_of(&item, deadline_sel.as_ref()),
                amount: opt_text_of(&item, amount_sel.as_ref()),
                category: spec.category.to_string(),
                link,
            });
        }
        out
    }
}

fn text_of(scope: &ElementRef<'_>, sel: &Selector) -> String {
    scope
        .select(sel)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .unwrap_or_default()
}

fn opt_text_of(scope: &ElementRef<'_>, sel: Option<&Selector>) -> String {
    sel.map(|s| text_of(scope, s)).unwrap_or_default()
}

#[async_trait]
impl GrantSource for HtmlListSource {
    async fn extract(&self) -> Result<Vec<RawListing>> {
        let body = match &self.mode {
            Mode::Fixture(html) => html.clone(),
            Mode::Http { fetcher } => match fetcher.get(self.spec.url).await {
                Fetched::Content(body) => body,
                Fetched::Unavailable => {
                    return Err(anyhow!("{} page unavailable", self.spec.name))
                }
            },
        };
        let items = self.parse_document(&body);
        if items.is_empty() {
            // Reachable page without the expected structure is "no data",
            // not an error.
            tracing::debug!(source = self.spec.name, "no listings extracted");
        }
        counter!("scan_listings_extracted_total").increment(items.len() as u64);
        Ok(items)
    }

    fn name(&self) -> &'static str {
        self.spec.name
    }
}
