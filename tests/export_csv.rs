// tests/export_csv.rs
//
// CSV serialization: header row, field order, quoting, and the rendered
// deadline forms.

use grant_scanner::export::to_csv;
use grant_scanner::listing::RawListing;

fn listing(title: &str, description: &str, deadline_raw: &str) -> grant_scanner::listing::Listing {
    RawListing {
        source: "Stub".into(),
        title: title.into(),
        description: description.into(),
        deadline_raw: deadline_raw.into(),
        amount: "Up to $10,000".into(),
        category: "Test".into(),
        link: "https://example.test/p".into(),
    }
    .resolve()
}

#[test]
fn header_row_comes_first() {
    let csv = to_csv(&[]);
    assert_eq!(
        csv,
        "source,title,description,deadline,deadline_resolved,amount,category,link\n"
    );
}

#[test]
fn one_row_per_listing_with_resolved_deadline_rendered() {
    let csv = to_csv(&[
        listing("Housing Grant", "Plain text.", "March 1, 2027"),
        listing("Community Program", "Also plain.", "Ongoing"),
    ]);
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "Stub,Housing Grant,Plain text.,\"March 1, 2027\",2027-03-01,\"Up to $10,000\",Test,https://example.test/p"
    );
    assert!(lines[2].contains(",Ongoing,open-ended,"));
}

#[test]
fn embedded_commas_and_quotes_are_escaped() {
    let csv = to_csv(&[listing(
        "Mixed-use, mixed-income",
        "The \"flagship\" stream",
        "Varies",
    )]);
    let row = csv.lines().nth(1).unwrap();
    assert!(row.contains("\"Mixed-use, mixed-income\""));
    assert!(row.contains("\"The \"\"flagship\"\" stream\""));
}
