// src/sources/static_list.rs
//! Programs with no page worth scraping.
//!
//! A few funders run always-open intakes described on static pages that
//! change rarely and render poorly for machines. Those are declared here as
//! data instead of fetched; they flow through the same normalization and
//! filtering as everything else.

use anyhow::Result;
use async_trait::async_trait;

use super::GrantSource;
use crate::listing::RawListing;

struct StaticEntry {
    source: &'static str,
    title: &'static str,
    description: &'static str,
    deadline_raw: &'static str,
    amount: &'static str,
    category: &'static str,
    link: &'static str,
}

const ALWAYS_OPEN: &[StaticEntry] = &[
    StaticEntry {
        source: "CMHC",
        title: "Seed Funding",
        description: "Interest-free loans and non-repayable contributions for \
                      pre-development work on affordable housing projects.",
        deadline_raw: "Ongoing",
        amount: "Up to $350,000",
        category: "Housing",
        link: "https://www.cmhc-schl.gc.ca/professionals/project-funding-and-mortgage-financing/funding-programs/all-funding-programs/seed-funding",
    },
    StaticEntry {
        source: "Housing Trust NS",
        title: "Community Acquisition Support",
        description: "Rolling support for non-profits acquiring rental \
                      buildings to keep them affordable.",
        deadline_raw: "Rolling",
        amount: "Varies",
        category: "Housing",
        link: "https://www.housingtrustns.ca/acquisition-support",
    },
    StaticEntry {
        source: "Tamarack",
        title: "Community Climate Transitions Cohort",
        description: "Peer cohort and small grants for neighbourhood climate \
                      resilience initiatives.",
        deadline_raw: "Varies",
        amount: "Varies",
        category: "Climate",
        link: "https://www.tamarackcommunity.ca/climatetransitions",
    },
];

pub struct StaticListSource;

impl StaticListSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StaticListSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GrantSource for StaticListSource {
    async fn extract(&self) -> Result<Vec<RawListing>> {
        Ok(ALWAYS_OPEN
            .iter()
            .map(|e| RawListing {
                source: e.source.to_string(),
                title: e.title.to_string(),
                description: e.description.to_string(),
                deadline_raw: e.deadline_raw.to_string(),
                amount: e.amount.to_string(),
                category: e.category.to_string(),
                link: e.link.to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "Static"
    }
}
