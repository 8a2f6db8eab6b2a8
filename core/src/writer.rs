use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Context;
use csv::{Terminator, WriterBuilder};

use crate::report::ReportRecord;

const HEADER: [&str; 3] = ["Title", "Severity", "URL"];

/// Creates (or truncates) `path` and writes every record as a CSV row.
pub fn write_csv(path: &Path, records: &[ReportRecord]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file '{}'", path.display()))?;
    write_records(file, records)
        .with_context(|| format!("failed to write output file '{}'", path.display()))
}

/// Writes the `Title,Severity,URL` header followed by one row per record.
/// A missing severity becomes an empty field. Rows end in `\r\n`.
pub fn write_records<W: io::Write>(out: W, records: &[ReportRecord]) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(out);
    wtr.write_record(HEADER)?;
    for record in records {
        wtr.write_record([
            record.title.as_str(),
            record.severity.as_deref().unwrap_or(""),
            record.url.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
