// tests/deadline_normalize.rs
//
// Normalization properties for free-text deadlines: the two recognized
// literal shapes, the open-ended fallback, and the cutoff predicate.

use chrono::NaiveDate;
use grant_scanner::deadline::normalize;
use grant_scanner::listing::Deadline;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn long_form_resolves_to_the_calendar_date() {
    assert_eq!(normalize("January 5, 2027"), Deadline::By(date(2027, 1, 5)));
    assert_eq!(
        normalize("Applications close March 1, 2027."),
        Deadline::By(date(2027, 3, 1))
    );
    assert_eq!(
        normalize("Deadline: September 30, 2026 at 5pm AST"),
        Deadline::By(date(2026, 9, 30))
    );
}

#[test]
fn iso_resolves_to_the_same_calendar_date() {
    assert_eq!(normalize("2026-02-15"), Deadline::By(date(2026, 2, 15)));
    assert_eq!(
        normalize("Closes 2026-02-15 (17:00)"),
        Deadline::By(date(2026, 2, 15))
    );
}

#[test]
fn unrecognizable_text_is_open_ended() {
    for raw in ["Rolling", "Varies", "Ongoing", "", "Check back in the fall"] {
        assert_eq!(normalize(raw), Deadline::OpenEnded, "raw = {raw:?}");
    }
}

#[test]
fn open_ended_passes_every_cutoff() {
    let open = normalize("Rolling");
    assert!(open.is_on_or_after(date(1970, 1, 1)));
    assert!(open.is_on_or_after(date(9999, 12, 31)));
}

#[test]
fn cutoff_boundary_is_inclusive() {
    let cutoff = date(2026, 1, 1);
    assert!(!Deadline::By(date(2025, 12, 31)).is_on_or_after(cutoff));
    assert!(Deadline::By(date(2026, 1, 1)).is_on_or_after(cutoff));
    assert!(Deadline::By(date(2026, 1, 2)).is_on_or_after(cutoff));
}
