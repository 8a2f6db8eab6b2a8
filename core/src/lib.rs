pub mod api;
pub mod fetcher;
pub mod report;
pub mod request;
pub mod sink;
pub mod writer;

use std::path::PathBuf;

pub use crate::api::{ApiConfig, HacktivityNode, SearchPage, DEFAULT_ENDPOINT};
pub use crate::fetcher::{ReportFetcher, PAGE_SIZE};
pub use crate::report::{severity_color, ReportRecord};
pub use crate::request::{parse_count, FetchRequest, RequestError, DEFAULT_REPORTS, MAX_REPORTS};
pub use crate::sink::{ConsoleSink, ReportSink, SilentSink, SinkRef};
pub use crate::writer::{write_csv, write_records};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub category: String,
    pub output_path: PathBuf,
}

impl RunSummary {
    pub fn message(&self) -> String {
        format!(
            "[+] Saved {} reports about '{}' to {}",
            self.saved,
            self.category,
            self.output_path.display()
        )
    }
}

/// Fetches every page for `request`, writes the CSV, then echoes records to
/// the sink when no explicit output file was requested.
///
/// Nothing is written unless the whole fetch succeeds.
pub async fn extract_reports(
    request: &FetchRequest,
    fetcher: &ReportFetcher,
    sink: &SinkRef,
) -> anyhow::Result<RunSummary> {
    let nodes = fetcher.fetch(request.category(), request.max_count()).await?;
    let records: Vec<ReportRecord> = nodes.into_iter().map(ReportRecord::from).collect();

    let output_path = request.output_path();
    write_csv(&output_path, &records)?;

    if request.echo_to_terminal() {
        for record in &records {
            sink.on_report(record).await;
        }
    }

    let summary = RunSummary {
        saved: records.len(),
        category: request.category().to_string(),
        output_path,
    };
    sink.on_log("success", &summary.message());
    Ok(summary)
}
