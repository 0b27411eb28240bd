// tests/sources_html.rs
//
// Fixture tests for the HTML extractors: field mapping, link
// absolutization, per-item skipping, and the missing-structure case.

use grant_scanner::sources::html_list::{HtmlListSource, CHTC_FUNDING};
use grant_scanner::sources::hrm_table::HrmTableSource;
use grant_scanner::sources::GrantSource;

const CHTC_HTML: &str = include_str!("fixtures/chtc_funding.html");
const HRM_HTML: &str = include_str!("fixtures/hrm_grants.html");

#[tokio::test]
async fn chtc_fixture_extracts_items_and_skips_the_linkless_one() {
    let source = HtmlListSource::from_fixture(&CHTC_FUNDING, CHTC_HTML);
    let listings = source.extract().await.expect("fixture parse ok");

    // Three articles in the fixture; the one without an anchor is skipped.
    assert_eq!(listings.len(), 2);
    assert!(listings.iter().all(|l| l.source == "CHTC"));
    assert!(listings
        .iter()
        .all(|l| l.title != "Broken Item Without Link"));
}

#[tokio::test]
async fn chtc_fixture_maps_fields_and_absolutizes_links() {
    let source = HtmlListSource::from_fixture(&CHTC_FUNDING, CHTC_HTML);
    let listings = source.extract().await.unwrap();

    let first = &listings[0];
    assert_eq!(first.title, "Sector Transformation Fund");
    assert_eq!(
        first.link,
        "https://centre.support/funding/sector-transformation",
        "relative href must be absolutized against the source base"
    );
    assert_eq!(first.deadline_raw, "Deadline: January 5, 2027");
    assert_eq!(first.amount, "Up to $150,000");
    assert!(first.description.contains("pre-development work"));

    let second = &listings[1];
    assert_eq!(
        second.link,
        "https://centre.support/funding/local-projects",
        "absolute hrefs pass through unchanged"
    );
    assert_eq!(second.deadline_raw, "Rolling");
    assert_eq!(second.amount, "", "missing amount element maps to empty");
}

#[tokio::test]
async fn page_without_expected_structure_yields_empty_not_error() {
    let source = HtmlListSource::from_fixture(
        &CHTC_FUNDING,
        "<html><body><p>Maintenance page</p></body></html>",
    );
    let listings = source.extract().await.expect("must not error");
    assert!(listings.is_empty());
}

#[tokio::test]
async fn hrm_fixture_extracts_table_rows_positionally() {
    let source = HrmTableSource::from_fixture(HRM_HTML);
    let listings = source.extract().await.expect("fixture parse ok");

    // Three body rows; the one without an anchor is skipped.
    assert_eq!(listings.len(), 2);

    let first = &listings[0];
    assert_eq!(first.source, "HRM");
    assert_eq!(first.title, "Community Grants Program");
    assert_eq!(first.deadline_raw, "September 30, 2026");
    assert_eq!(first.amount, "$5,000 to $25,000");
    assert_eq!(
        first.link,
        "https://www.halifax.ca/business/grants/community-grants"
    );

    assert_eq!(listings[1].deadline_raw, "2026-02-15");
}
