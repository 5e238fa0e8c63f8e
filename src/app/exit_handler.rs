//! Exit code logic for the crawler process.
//!
//! Single responsibility: map a run result to the process exit outcome.

use imgcrawl_core::CrawlError;

use crate::ProcessExit;

/// Determines the exit outcome for a run that returned an error.
///
/// A URL list that cannot be opened exits with the OS error number; every
/// other process-level failure exits with 1. Per-URL failures never reach
/// here.
pub(crate) fn determine_exit_outcome(error: &anyhow::Error) -> ProcessExit {
    let os_code = error
        .downcast_ref::<CrawlError>()
        .and_then(CrawlError::url_list_os_error);
    match os_code.and_then(|code| u8::try_from(code).ok()) {
        Some(code) if code != 0 => ProcessExit::Code(code),
        _ => ProcessExit::Failure,
    }
}
