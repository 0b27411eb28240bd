// src/relevance.rs
//! Topical relevance filtering over listing text.
//!
//! Matching is a case-insensitive substring check against the concatenated
//! title and description. There is no stemming and no word-boundary rule: a
//! short keyword like "ans" also matches inside "loans". Keep configured
//! keywords specific enough for the precision you need.

use std::collections::BTreeSet;

use anyhow::{bail, Result};

use crate::listing::Listing;

/// The configured keyword vocabulary, pre-lowercased and deduplicated.
/// Static configuration: built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    lowered: Vec<String>,
}

impl KeywordSet {
    /// Build from configured keywords: trim, lowercase, drop blanks, dedup.
    ///
    /// An empty result is a configuration error, not an empty filter: it
    /// would silently drop the whole table.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for kw in keywords {
            let t = kw.as_ref().trim().to_lowercase();
            if !t.is_empty() {
                set.insert(t);
            }
        }
        if set.is_empty() {
            bail!("relevance keyword set is empty");
        }
        Ok(Self {
            lowered: set.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.lowered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lowered.is_empty()
    }

    /// True when any keyword occurs as a substring of the lowercased
    /// `title + " " + description`.
    pub fn matches(&self, title: &str, description: &str) -> bool {
        let haystack = format!("{} {}", title, description).to_lowercase();
        self.lowered.iter().any(|kw| haystack.contains(kw.as_str()))
    }
}

/// Pipeline predicate over a normalized listing.
pub fn is_relevant(listing: &Listing, keywords: &KeywordSet) -> bool {
    keywords.matches(&listing.title, &listing.description)
}
