//! CLI for imgup.

use anyhow::{Context, Result};
use clap::Parser;
use imgup_core::api::CurlTransport;
use imgup_core::config::{self, ApiKey, RewriteSettings};
use imgup_core::control::CancelToken;
use imgup_core::input;
use imgup_core::pipeline::{self, RunSummary};
use imgup_core::rewrite::RewriteClient;
use std::io;
use std::path::PathBuf;

/// Rewrite image URLs for a 4k screen with Claude.
#[derive(Debug, Parser)]
#[command(name = "imgup")]
#[command(about = "imgup: rewrite image URLs for a 4k screen", long_about = None)]
pub struct Cli {
    /// Path to the input text file (one URL per line). Built-in sample URLs are used if omitted.
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Path to config.toml (default: ~/.config/imgup/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run_from_args() -> Result<RunSummary> {
        Cli::parse().run().await
    }

    /// Startup (config, credential, input) then the rewrite loop on a blocking thread.
    /// Any startup failure returns before the first network call.
    pub async fn run(self) -> Result<RunSummary> {
        let cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_default()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let api_key = ApiKey::from_env()?;
        let urls = input::load(self.input_file.as_deref())?;
        tracing::info!(count = urls.len(), "processing urls");

        let transport = CurlTransport::new(&cfg, api_key).context("invalid api_base_url")?;
        let client = RewriteClient::new(transport, RewriteSettings::default());

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        // Streams are locked per write, never for the whole run: the signal
        // branch and the stderr log fallback must still get through.
        let mut worker = tokio::task::spawn_blocking(move || {
            pipeline::run(
                &client,
                &urls,
                &worker_cancel,
                &mut io::stdout(),
                &mut io::stderr(),
            )
        });

        let summary = tokio::select! {
            res = &mut worker => res??,
            _ = interrupted() => {
                cancel.cancel();
                tracing::warn!("interrupt received, cancelling in-flight request");
                worker.await??
            }
        };
        Ok(summary)
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::debug!("ctrl-c handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests;
