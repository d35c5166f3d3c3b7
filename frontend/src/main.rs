//! Terminal entry-point: loads settings, wires the HTTP adapter, runs the shell.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recommender_frontend::config::{FrontendSettings, parse_base_url};
use recommender_frontend::domain::{IdentityStore, RecommendationClient};
use recommender_frontend::inbound::terminal::TerminalShell;
use recommender_frontend::outbound::http::HttpRecommendationSource;

/// `recommender` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "recommender",
    about = "Browse Codeforces problem recommendations and submission history",
    version
)]
struct CliArgs {
    /// Backend origin. Overrides `RECOMMENDER_API_BASE_URL`.
    #[arg(long = "api-base-url", value_name = "url")]
    api_base_url: Option<String>,
    /// Submit this handle at start-up instead of waiting for input.
    #[arg(long = "handle", value_name = "handle")]
    handle: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let settings = FrontendSettings::load_from_iter([OsString::from("recommender")])
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    init_tracing(settings.json_logs);

    let base_url = match args.api_base_url.as_deref() {
        Some(raw) => parse_base_url(raw),
        None => settings.api_base_url(),
    }
    .wrap_err("invalid backend URL")?;
    let timeout = settings
        .request_timeout()
        .wrap_err("invalid request timeout")?;
    let source = HttpRecommendationSource::new(base_url.clone(), timeout)
        .wrap_err("failed to build backend client")?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build terminal runtime")?;

    info!(%base_url, "starting session");
    let client = RecommendationClient::new(Arc::new(source));
    let mut shell = TerminalShell::new(client, IdentityStore::new(), io::stdout());
    let preset = args
        .handle
        .map(|handle| format!("{handle}\n"))
        .unwrap_or_default();
    let input = BufReader::new(preset.as_bytes().chain(tokio::io::stdin()));
    runtime
        .block_on(shell.run(input))
        .wrap_err("terminal session failed")?;
    Ok(())
}

/// Logs go to stderr so page output on stdout stays readable.
fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        warn!(error = %e, "tracing init failed");
    }
}
