use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::debug;

use hacktivity_core::{
    extract_reports, parse_count, ApiConfig, ConsoleSink, FetchRequest, ReportFetcher, ReportSink,
    SinkRef, DEFAULT_ENDPOINT, DEFAULT_REPORTS,
};

const BANNER: &str = r#"
 ____                             _       _____        _                       _
|  _ \   ___  _ __    ___   _ __ | |_    | ____|__  __| |_  _ __   __ _   ___ | |_   ___   _ __
| |_) | / _ \| '_ \  / _ \ | '__|| __|   |  _|  \ \/ /| __|| '__| / _` | / __|| __| / _ \ | '__|
|  _ < |  __/| |_) || (_) || |   | |_    | |___  >  < | |_ | |   | (_| || (__ | |_ | (_) || |
|_| \_\ \___|| .__/  \___/ |_|    \__|   |_____|/_/\_\ \__||_|    \__,_| \___| \__| \___/ |_|
             |_|
"#;

#[derive(Parser, Debug)]
#[command(
    name = "hacktivity",
    version,
    about = "Fetch resolved, publicly disclosed HackerOne reports by bug type",
    after_help = "\x1b[1;36mEXAMPLES:\x1b[0m
  Default (100 reports, echoed):  hacktivity -v SQL Injection
  Custom count:                   hacktivity -v XSS -n 500
  Quiet export to a file:         hacktivity -v Open Redirect -o redirects.csv
  No animation:                   hacktivity -v SSRF --no-animation"
)]
pub struct Args {
    #[arg(short = 'v', long, required = true, num_args = 1.., help = "Vulnerability name (weakness category)")]
    pub vulnerability: Vec<String>,

    #[arg(short = 'o', long, help = "Output CSV file name (default: <bug_name>.csv)")]
    pub output: Option<PathBuf>,

    #[arg(short = 'n', long, default_value_t = DEFAULT_REPORTS, value_parser = parse_count,
        allow_negative_numbers = true,
        help = "Number of reports to fetch (default: 100, max 3000)")]
    pub number: i64,

    #[arg(long, default_value_t = false, help = "Skip the banner delays and connection spinner")]
    pub no_animation: bool,

    #[arg(long, hide = true, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[tokio::main]
async fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Startup output precedes usage errors and help.
    let parsed = Args::try_parse();
    let animated = match parsed {
        Ok(ref args) => !args.no_animation,
        Err(_) => !std::env::args_os().any(|a| a == "--no-animation"),
    };
    let sink = ConsoleSink::new_ref(animated);

    sink.startup(BANNER).await;

    let args = parsed.unwrap_or_else(|e| e.exit());

    let request = match FetchRequest::new(&args.vulnerability, args.number, args.output.clone()) {
        Ok(req) => req,
        Err(e) => {
            sink.on_log("error", &format!("[-] Error: {}", e));
            process::exit(1);
        }
    };
    debug!("{:?}", request);

    if let Err(e) = run(&request, &args.endpoint, &sink).await {
        sink.on_log("error", &format!("[!] {:#}", e));
        process::exit(1);
    }
}

async fn run(request: &FetchRequest, endpoint: &str, sink: &SinkRef) -> anyhow::Result<()> {
    let config = ApiConfig::with_endpoint(endpoint)?;
    let fetcher = ReportFetcher::new(config)?;
    extract_reports(request, &fetcher, sink).await?;
    Ok(())
}
