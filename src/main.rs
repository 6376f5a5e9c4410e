//! CI resource entrypoint for `CodeCommit` pull requests.

use std::io::{self, Write};
use std::process::ExitCode;

use codecommit_pr::cli::{check, comment, get};
use codecommit_pr::{
    AdapterError, BuildEnvironment, CodeCommitAdapter, OperationMode, RepositoryLocator,
    ResourceConfig, Session,
};
use ortho_config::OrthoConfig;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run() -> Result<(), AdapterError> {
    let config = load_config()?;
    config.validate()?;

    let locator = RepositoryLocator::parse(config.require_repository()?)?;
    let session = Session::connect(locator, config.endpoint_url.as_deref()).await;
    let adapter = CodeCommitAdapter::from_session(&session, BuildEnvironment::from_env());

    match config.operation_mode() {
        OperationMode::Check => check::run(&adapter, &config).await,
        OperationMode::Get => get::run(&adapter, &config).await,
        OperationMode::Comment => comment::run(&adapter, &config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ResourceConfig, AdapterError> {
    ResourceConfig::load().map_err(|error| AdapterError::Configuration {
        message: error.to_string(),
    })
}
