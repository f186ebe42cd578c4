use cliproc::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vproj::commands::vproj::Vproj;
use vproj::util::environment::{DEFAULT_LOG_FILTER, VPROJ_LOG};

fn main() -> ExitCode {
    // diagnostics go to stderr so they never mix with the tool's output
    let filter =
        EnvFilter::try_from_env(VPROJ_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
    Cli::default().parse(std::env::args()).go::<Vproj>()
}
