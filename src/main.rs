use anyhow::Result;
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use snyklookup::{model::SkipReason, output::LinePrinter, Config, Lookup, LookupReport, Query};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit codes. Usage errors exit with 2 from clap.
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "snyklookup")]
#[command(
    author,
    version,
    about = "Look up known vulnerabilities and CVE identifiers for an npm package version"
)]
struct Cli {
    /// npm package name
    package: String,

    /// Package version
    #[arg(value_name = "VERSION")]
    pkg_version: String,

    /// Also print the description of each vulnerability
    #[arg(short, long)]
    descriptions: bool,

    /// Print an identifier every time it appears instead of once
    #[arg(long)]
    allow_duplicates: bool,

    /// Keep going when a detail page fails and report failures at the end
    #[arg(long)]
    keep_going: bool,

    /// Fetch detail pages concurrently
    #[arg(long)]
    parallel: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Vulnerability database root URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Hide the progress spinner and the end-of-run summary
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = apply_overrides(load_config(cli.config.as_deref())?, &cli);
    let query = Query::new(cli.package.as_str(), cli.pkg_version.as_str());
    let lookup = Lookup::from_config(&config)?;

    let progress = spinner(&query, cli.quiet);
    let rows = lookup.fetch_listing(&query).await;
    progress.finish_and_clear();
    let rows = rows?;

    let stdout = io::stdout();
    let mut printer = LinePrinter::new(stdout.lock(), config.deduplicate);
    let report = lookup.resolve(&rows, &mut printer).await?;

    if report.duplicates > 0 {
        info!(duplicates = report.duplicates, "suppressed repeated identifiers");
    }
    if !cli.quiet {
        print_skipped(&report);
    }
    print_failures(&report);

    if report.has_failures() {
        Ok(exit_codes::ERROR)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "warn,snyklookup=info",
        _ => "warn,snyklookup=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// An explicit `--config` must load; a broken default file falls back to
/// defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load().unwrap_or_else(|e| {
            warn!(path = %Config::config_path().display(), error = %e, "ignoring config file");
            Config::default()
        })),
    }
}

fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    config.include_descriptions |= cli.descriptions;
    config.deduplicate &= !cli.allow_duplicates;
    config.keep_going |= cli.keep_going;
    config.parallel |= cli.parallel;
    config
}

fn spinner(query: &Query, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Looking up {}...", query));
    pb
}

fn print_skipped(report: &LookupReport) {
    if report.skipped.is_empty() {
        return;
    }

    let breakdown: Vec<String> = [SkipReason::NoAnchor, SkipReason::MissingId, SkipReason::EmptyId]
        .into_iter()
        .filter_map(|reason| match report.skipped_count(reason) {
            0 => None,
            n => Some(format!("{}: {}", reason, n)),
        })
        .collect();

    eprintln!(
        "Skipped {} CVE element(s) without an identifier ({})",
        report.skipped.len(),
        breakdown.join(", ")
    );
    if report.markup_drift_count() > 0 {
        eprintln!("Some elements did not match the expected page markup; output may be incomplete.");
    }
}

fn print_failures(report: &LookupReport) {
    if !report.has_failures() {
        return;
    }

    eprintln!("{} detail page(s) failed:", report.failures.len());
    for failure in &report.failures {
        eprintln!("  {}: {}", failure.link, failure.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_positional_arguments() {
        let cli = parse(&["snyklookup", "lodash", "4.17.20"]);

        assert_eq!(cli.package, "lodash");
        assert_eq!(cli.pkg_version, "4.17.20");
        assert!(!cli.descriptions);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_missing_version_is_usage_error() {
        let err = Cli::try_parse_from(["snyklookup", "lodash"]).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = parse(&[
            "snyklookup",
            "-d",
            "--allow-duplicates",
            "--keep-going",
            "--parallel",
            "--timeout",
            "3",
            "--base-url",
            "http://localhost:1234",
            "-vv",
            "minimist",
            "1.2.0",
        ]);

        let config = apply_overrides(Config::default(), &cli);

        assert!(config.include_descriptions);
        assert!(!config.deduplicate);
        assert!(config.keep_going);
        assert!(config.parallel);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_apply_overrides_keeps_config_values() {
        let cli = parse(&["snyklookup", "lodash", "4.17.20"]);
        let config = Config {
            include_descriptions: true,
            deduplicate: false,
            ..Config::default()
        };

        let config = apply_overrides(config, &cli);

        assert!(config.include_descriptions);
        assert!(!config.deduplicate);
        assert_eq!(config.timeout_secs, 30);
    }
}
