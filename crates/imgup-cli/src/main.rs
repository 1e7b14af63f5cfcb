use imgup_core::logging;

mod cli;

use crate::cli::Cli;

/// Exit status when the run is interrupted with Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and run. Per-URL failures never change the exit status.
    match Cli::run_from_args().await {
        Ok(summary) if summary.cancelled => std::process::exit(EXIT_INTERRUPTED),
        Ok(_) => {}
        Err(err) => {
            eprintln!("imgup error: {:#}", err);
            std::process::exit(1);
        }
    }
}
