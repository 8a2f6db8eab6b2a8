use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::report::ReportRecord;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const CONNECT_MESSAGE: &str = "Connecting to HackerOne API";
const CONNECT_DURATION: Duration = Duration::from_secs(3);

/// Output abstraction for a run.
/// The CLI uses `ConsoleSink`; tests can swap in something quieter.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Banner and connection animation shown before the first request.
    async fn startup(&self, banner: &str);
    fn on_log(&self, level: &str, message: &str);
    async fn on_report(&self, record: &ReportRecord);
}

pub type SinkRef = Arc<dyn ReportSink>;

/// Colored terminal output. With `animated` off, the same text is printed
/// without the spinner or any pauses.
pub struct ConsoleSink {
    animated: bool,
}

impl ConsoleSink {
    pub fn new(animated: bool) -> Self {
        Self { animated }
    }

    pub fn new_ref(animated: bool) -> SinkRef {
        Arc::new(Self::new(animated))
    }

    async fn pause(&self, ms: u64) {
        if self.animated {
            sleep(Duration::from_millis(ms)).await;
        }
    }

    async fn spin(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{msg} {spinner}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(SPINNER_FRAMES),
        );
        pb.set_message(CONNECT_MESSAGE);
        pb.enable_steady_tick(Duration::from_millis(100));
        sleep(CONNECT_DURATION).await;
        pb.finish_and_clear();
    }
}

fn out(text: &str) {
    println!("{}", text);
    std::io::stdout().flush().ok();
}

#[async_trait]
impl ReportSink for ConsoleSink {
    async fn startup(&self, banner: &str) {
        for line in banner.lines() {
            out(&line.bright_cyan().to_string());
            self.pause(20).await;
        }
        out(&format!("   {}\n", "hacktivity report extractor".dimmed()));
        self.pause(300).await;

        if self.animated {
            self.spin().await;
        }
        out(&"[+] Connected!".green().to_string());
    }

    fn on_log(&self, level: &str, message: &str) {
        let colored = match level {
            "success" => message.green().to_string(),
            "error" => message.red().to_string(),
            "warn" => message.yellow().to_string(),
            _ => message.to_string(),
        };
        if level == "error" {
            eprintln!("{}", colored);
        } else {
            out(&colored);
        }
    }

    async fn on_report(&self, record: &ReportRecord) {
        let color = record.color();
        out(&format!("[#] Title: {}", record.title).color(color).to_string());
        self.pause(20).await;
        out(&format!("    Severity: {}", record.severity_label()).color(color).to_string());
        self.pause(20).await;
        out(&format!("    URL: {}\n", record.url).color(color).to_string());
        self.pause(50).await;
    }
}

/// Discards startup output and records, keeping log lines for inspection.
#[derive(Default)]
pub struct SilentSink {
    logs: Mutex<Vec<(String, String)>>,
}

impl SilentSink {
    pub fn logs(&self) -> Vec<(String, String)> {
        self.logs.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ReportSink for SilentSink {
    async fn startup(&self, _banner: &str) {}

    fn on_log(&self, level: &str, message: &str) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.push((level.to_string(), message.to_string()));
        }
    }

    async fn on_report(&self, _record: &ReportRecord) {}
}
