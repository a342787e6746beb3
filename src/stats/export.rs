use anyhow::{Context, Result};

use crate::db::models::Match;

pub const CSV_HEADER: [&str; 6] = ["Home", "Away", "HalfTime", "FullTime", "BTTS", "Comeback"];

/// Suggested download name for the export.
pub const CSV_FILENAME: &str = "winmix_export.csv";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render matches as CSV; fields containing commas, quotes or newlines are quoted.
pub fn matches_to_csv(matches: &[Match]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for m in matches {
        writer.write_record([
            m.home(),
            m.away(),
            m.ht(),
            m.ft(),
            yes_no(m.btts()),
            yes_no(m.comeback()),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}
