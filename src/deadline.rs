// src/deadline.rs
//! Free-text deadline normalization.
//!
//! Grant pages publish closing dates in wildly inconsistent prose:
//! "January 5, 2027", "2026-02-15", "Applications close March 1, 2027 at
//! 5pm", "Rolling", "Varies". Two literal shapes are recognized; everything
//! else resolves to the open-ended sentinel, which is a legitimate category
//! of listing, not a parse error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::listing::Deadline;

// Long-form month-day-year ("January 5, 2027").
static RE_LONG_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]+\s+\d{1,2},\s*\d{4})").unwrap());

// ISO calendar date ("2026-02-15").
static RE_ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").unwrap());

/// Scan `raw` for the first recognizable date substring and parse it.
///
/// The long-form shape is tried before the ISO shape; the first pattern
/// that matches anywhere in the text wins. The matched value is parsed as
/// `%B %d, %Y`, falling back to `%Y-%m-%d`. No match, or a match that
/// parses as neither, resolves to [`Deadline::OpenEnded`].
pub fn normalize(raw: &str) -> Deadline {
    for re in [&*RE_LONG_FORM, &*RE_ISO] {
        if let Some(m) = re.find(raw) {
            return parse_candidate(m.as_str());
        }
    }
    Deadline::OpenEnded
}

fn parse_candidate(value: &str) -> Deadline {
    NaiveDate::parse_from_str(value, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map(Deadline::By)
        .unwrap_or(Deadline::OpenEnded)
}
