use std::path::PathBuf;
use std::process::ExitCode;

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use labsense::{
    config, AnalysisError, CatalogError, NarrativeContent, RawReading, ReportAnalyzer,
    TestCatalog, UserProfile,
};

/// One analysis request as the product's backend hands it over: extracted
/// readings, the optional profile, and the narrative service's text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisRequest {
    #[serde(default = "default_report_type")]
    report_type: String,
    #[serde(default)]
    profile: UserProfile,
    readings: Vec<RawReading>,
    #[serde(default)]
    narrative: NarrativeContent,
}

fn default_report_type() -> String {
    "blood_test".into()
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Usage: labsense <request.json> [--catalog <catalog.json>]\n       labsense --list-tests [--catalog <catalog.json>]")]
    Usage,

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Request is not valid JSON: {0}")]
    RequestParse(#[from] serde_json::Error),

    // Not #[from]: the request-parse variant already claims serde_json::Error
    #[error("Report serialization failed: {0}")]
    ReportEncode(serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

struct CliArgs {
    request_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    list_tests: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, CliError> {
    args.next(); // program name

    let mut request_path = None;
    let mut catalog_path = None;
    let mut list_tests = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => {
                catalog_path = Some(PathBuf::from(args.next().ok_or(CliError::Usage)?));
            }
            "--list-tests" => list_tests = true,
            _ if request_path.is_none() => request_path = Some(PathBuf::from(arg)),
            _ => return Err(CliError::Usage),
        }
    }

    // Exactly one mode: analyze a request file, or list the catalog.
    if list_tests == request_path.is_some() {
        return Err(CliError::Usage);
    }
    Ok(CliArgs {
        request_path,
        catalog_path,
        list_tests,
    })
}

fn run(args: CliArgs) -> Result<(), CliError> {
    let catalog = match &args.catalog_path {
        Some(path) => TestCatalog::from_json_file(path)?,
        None => TestCatalog::builtin(),
    };

    let analyzer = ReportAnalyzer::new(catalog);

    if args.list_tests {
        let mut tests: Vec<_> = analyzer.catalog().iter().collect();
        tests.sort_by(|a, b| a.id.cmp(&b.id));
        for test in tests {
            println!("{}\t{} [{}]", test.id, test.display_name, test.canonical_unit);
        }
        return Ok(());
    }

    let request_path = args.request_path.ok_or(CliError::Usage)?;
    let request: AnalysisRequest =
        serde_json::from_str(&std::fs::read_to_string(&request_path)?)?;

    let report = analyzer.build_report(
        &request.readings,
        &request.profile,
        request.narrative,
        &request.report_type,
    )?;

    // Report on stdout; logs stay on stderr.
    let json = serde_json::to_string_pretty(&report).map_err(CliError::ReportEncode)?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Labsense starting v{}", config::APP_VERSION);

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "Analysis request failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
