//! CLI entry point for the image crawler.

use std::process::ExitCode;

use clap::Parser;

mod app;
mod cli;

use app::{exit_handler, runtime};
use cli::Args;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
    /// Raw OS error number, used when the URL list cannot be opened.
    Code(u8),
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Code(code) => code,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse before tracing so --help and usage errors print cleanly.
    let args = Args::parse();

    let exit = match runtime::run_crawler(args).await {
        Ok(exit) => exit,
        Err(error) => {
            // Error messages already carry their cause.
            eprintln!("imgcrawl: {error}");
            exit_handler::determine_exit_outcome(&error)
        }
    };
    ExitCode::from(exit.code())
}
