// src/sources/hrm_table.rs
//! Halifax Regional Municipality grants page.
//!
//! Unlike the card-shaped sources, HRM renders a single `<table>` whose
//! columns are positional: program, deadline, award. Field mapping by cell
//! index doesn't fit the selector-spec shape, so this source keeps its own
//! parsing logic.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use metrics::counter;
use scraper::{Html, Selector};

use super::{absolutize, clean_text, GrantSource};
use crate::fetch::{Fetched, PageFetcher};
use crate::listing::RawListing;

pub const HRM_GRANTS_URL: &str =
    "https://www.halifax.ca/business/doing-business-halifax/grants";
const HRM_BASE: &str = "https://www.halifax.ca";
const SOURCE_NAME: &str = "HRM";

enum Mode {
    Http { fetcher: Arc<PageFetcher> },
    Fixture(String),
}

pub struct HrmTableSource {
    mode: Mode,
}

impl HrmTableSource {
    pub fn from_fetcher(fetcher: Arc<PageFetcher>) -> Self {
        Self {
            mode: Mode::Http { fetcher },
        }
    }

    /// Parse a canned document instead of fetching; used by tests.
    pub fn from_fixture(html: &str) -> Self {
        Self {
            mode: Mode::Fixture(html.to_string()),
        }
    }

    fn parse_document(html: &str) -> Vec<RawListing> {
        let doc = Html::parse_document(html);
        let row_sel = Selector::parse("table.grants tbody tr").expect("row selector");
        let cell_sel = Selector::parse("td").expect("cell selector");
        let anchor_sel = Selector::parse("a").expect("anchor selector");

        let mut out = Vec::new();
        for row in doc.select(&row_sel) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            // Spacer and malformed rows are skipped alone.
            if cells.len() < 2 {
                continue;
            }
            let title = clean_text(&cells[0].text().collect::<String>());
            let href = cells[0]
                .select(&anchor_sel)
                .next()
                .and_then(|a| a.value().attr("href"));
            let Some(link) = href.and_then(|h| absolutize(HRM_BASE, h)) else {
                counter!("scan_items_skipped_total").increment(1);
                continue;
            };
            if title.is_empty() {
                counter!("scan_items_skipped_total").increment(1);
                continue;
            }

            out.push(RawListing {
                source: SOURCE_NAME.to_string(),
                title,
                description: String::new(),
                deadline_raw: clean_text(&cells[1].text().collect::<String>()),
                amount: cells
                    .get(2)
                    .map(|c| clean_text(&c.text().collect::<String>()))
                    .unwrap_or_default(),
                category: "Municipal".to_string(),
                link,
            });
        }
        out
    }
}

#[async_trait]
impl GrantSource for HrmTableSource {
    async fn extract(&self) -> Result<Vec<RawListing>> {
        let body = match &self.mode {
            Mode::Fixture(html) => html.clone(),
            Mode::Http { fetcher } => match fetcher.get(HRM_GRANTS_URL).await {
                Fetched::Content(body) => body,
                Fetched::Unavailable => return Err(anyhow!("{} page unavailable", SOURCE_NAME)),
            },
        };
        let items = Self::parse_document(&body);
        if items.is_empty() {
            tracing::debug!(source = SOURCE_NAME, "no listings extracted");
        }
        counter!("scan_listings_extracted_total").increment(items.len() as u64);
        Ok(items)
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}
