//! Sequential rewrite loop and reporting.
//!
//! `outcomes` is lazy: the next call starts only when the consumer pulls the
//! next item, so `report` prints each result before the following URL is sent.
//! Per-URL failures never stop the loop; only cancellation does.

use crate::api::MessagesTransport;
use crate::control::CancelToken;
use crate::error::RewriteError;
use crate::rewrite::RewriteClient;
use std::io::{self, Write};

/// Marker line that starts each output block.
pub const BLOCK_SEPARATOR: &str = "===";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePair {
    pub original: String,
    pub rewritten: String,
}

#[derive(Debug)]
pub struct FailedUrl {
    pub url: String,
    pub error: RewriteError,
}

pub type Outcome = Result<RewritePair, FailedUrl>;

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// URLs never attempted because the run was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
}

/// One outcome per URL, in input order, stopping early only on cancellation.
pub fn outcomes<'a, T: MessagesTransport>(
    client: &'a RewriteClient<T>,
    urls: &'a [String],
    cancel: &'a CancelToken,
) -> impl Iterator<Item = Outcome> + 'a {
    urls.iter()
        .take_while(move |_| !cancel.is_cancelled())
        .map(move |url| {
            tracing::debug!(url = %url, "rewriting");
            client
                .rewrite(url, cancel)
                .map(|rewritten| RewritePair {
                    original: url.clone(),
                    rewritten,
                })
                .map_err(|error| FailedUrl {
                    url: url.clone(),
                    error,
                })
        })
}

/// Write the output block for one success.
pub fn write_block<W: Write>(out: &mut W, pair: &RewritePair) -> io::Result<()> {
    writeln!(out, "{}", BLOCK_SEPARATOR)?;
    writeln!(out, "Original URL: {}", pair.original)?;
    writeln!(out, "Upscaled URL: {}", pair.rewritten)?;
    out.flush()
}

/// Successes go to `out`, failures to `diag`, in the order they arrive.
pub fn report<I, W, D>(outcomes: I, out: &mut W, diag: &mut D) -> io::Result<RunSummary>
where
    I: IntoIterator<Item = Outcome>,
    W: Write,
    D: Write,
{
    let mut summary = RunSummary::default();
    for outcome in outcomes {
        match outcome {
            Ok(pair) => {
                write_block(out, &pair)?;
                summary.succeeded += 1;
            }
            Err(failed) => {
                tracing::warn!(url = %failed.url, error = %failed.error, "rewrite failed");
                writeln!(diag, "Error processing URL {}: {}", failed.url, failed.error)?;
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// Rewrite every URL in order and report each result as it completes.
pub fn run<T, W, D>(
    client: &RewriteClient<T>,
    urls: &[String],
    cancel: &CancelToken,
    out: &mut W,
    diag: &mut D,
) -> io::Result<RunSummary>
where
    T: MessagesTransport,
    W: Write,
    D: Write,
{
    let mut summary = report(outcomes(client, urls, cancel), out, diag)?;
    summary.skipped = urls.len() - summary.succeeded - summary.failed;
    summary.cancelled = cancel.is_cancelled();
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        skipped = summary.skipped,
        cancelled = summary.cancelled,
        "run finished"
    );
    Ok(summary)
}
