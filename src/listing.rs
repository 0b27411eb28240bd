// src/listing.rs
//! Canonical listing record types shared by the extractors, the pipeline,
//! and the HTTP surface.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deadline;

/// Resolved deadline of a listing: a concrete calendar date, or open-ended
/// (rolling/ongoing/unparseable text).
///
/// Policy: an open-ended program remains eligible indefinitely. `OpenEnded`
/// therefore orders after every concrete date and always passes a
/// future-cutoff test: an "Ongoing" intake must not drop out of the table
/// just because it publishes no closing date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Deadline {
    By(NaiveDate),
    OpenEnded,
}

impl Deadline {
    /// Cutoff predicate. Concrete deadlines pass when on or after `cutoff`
    /// (the boundary date itself is kept); open-ended always passes.
    pub fn is_on_or_after(&self, cutoff: NaiveDate) -> bool {
        match self {
            Deadline::By(d) => *d >= cutoff,
            Deadline::OpenEnded => true,
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::By(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Deadline::OpenEnded => f.write_str("open-ended"),
        }
    }
}

// Serialized as the display form ("2027-03-01" / "open-ended") so the
// dashboard and the CSV export show the same value.
impl Serialize for Deadline {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "open-ended" {
            return Ok(Deadline::OpenEnded);
        }
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Deadline::By)
            .map_err(serde::de::Error::custom)
    }
}

/// One raw listing as emitted by a source extractor, before deadline
/// normalization. Extractors guarantee non-empty `source` and `title` and an
/// absolute `link`; everything else may be empty free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub source: String,
    pub title: String,
    pub description: String,
    /// Deadline text exactly as found on the source page ("January 5, 2027",
    /// "Ongoing", "Varies", or prose containing a date).
    pub deadline_raw: String,
    pub amount: String,
    pub category: String,
    pub link: String,
}

impl RawListing {
    /// Normalize into the canonical record. This is the only constructor of
    /// [`Listing`], so `deadline_resolved` can never be left unset.
    pub fn resolve(self) -> Listing {
        let deadline_resolved = deadline::normalize(&self.deadline_raw);
        Listing {
            source: self.source,
            title: self.title,
            description: self.description,
            deadline_raw: self.deadline_raw,
            deadline_resolved,
            amount: self.amount,
            category: self.category,
            link: self.link,
        }
    }
}

/// The canonical, immutable funding opportunity record. Rebuilt from scratch
/// on every pipeline run; no identity is kept across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub source: String,
    pub title: String,
    pub description: String,
    pub deadline_raw: String,
    pub deadline_resolved: Deadline,
    pub amount: String,
    pub category: String,
    pub link: String,
}
