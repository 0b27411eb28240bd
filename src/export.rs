// src/export.rs
//! CSV serialization of the result table, for the dashboard's download
//! button.

use std::io::{self, Write};

use crate::listing::Listing;

/// Column order matches the listing schema.
pub const CSV_HEADER: [&str; 8] = [
    "source",
    "title",
    "description",
    "deadline",
    "deadline_resolved",
    "amount",
    "category",
    "link",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row with standard quoting (embedded quotes doubled).
fn write_row<W: Write>(mut w: W, row: &[&str]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Serialize the table: header row plus one row per listing.
pub fn to_csv(listings: &[Listing]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    write_row(&mut buf, &CSV_HEADER).expect("write to Vec");
    for l in listings {
        let resolved = l.deadline_resolved.to_string();
        let row = [
            l.source.as_str(),
            l.title.as_str(),
            l.description.as_str(),
            l.deadline_raw.as_str(),
            resolved.as_str(),
            l.amount.as_str(),
            l.category.as_str(),
            l.link.as_str(),
        ];
        write_row(&mut buf, &row).expect("write to Vec");
    }
    String::from_utf8(buf).expect("csv output is utf8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_covers_commas_quotes_and_newlines() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["a,b", "say \"hi\"", "two\nlines", "plain"]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\",plain\n"
        );
    }
}
