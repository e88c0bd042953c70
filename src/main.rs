//! `breathpace` - paced breathing in the terminal

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use clap::Parser;
use tokio_util::sync::CancellationToken;

use breathpace::cli::args::Cli;
use breathpace::cli::commands;
use breathpace::error::ExitCode;
use breathpace::observability::init_logging;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                ExitCode::USAGE_ERROR
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    let cancel = CancellationToken::new();
    let signalled = Arc::new(AtomicI32::new(ExitCode::SUCCESS));

    // First signal stops the session cleanly; a second one exits at once.
    {
        let cancel = cancel.clone();
        let signalled = Arc::clone(&signalled);
        tokio::spawn(async move {
            let Ok(mut sigterm) =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            else {
                tracing::warn!("failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                signalled.store(ExitCode::INTERRUPTED, Ordering::SeqCst);
                cancel.cancel();
                return;
            };

            let code = tokio::select! {
                _ = tokio::signal::ctrl_c() => ExitCode::INTERRUPTED,
                _ = sigterm.recv() => ExitCode::TERMINATED,
            };
            signalled.store(code, Ordering::SeqCst);
            cancel.cancel();

            tokio::select! {
                _ = tokio::signal::ctrl_c() => std::process::exit(ExitCode::INTERRUPTED),
                _ = sigterm.recv() => std::process::exit(ExitCode::TERMINATED),
            }
        });
    }

    let result = commands::dispatch(cli, cancel).await;

    match result {
        Ok(()) => std::process::exit(signalled.load(Ordering::SeqCst)),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
