//! Imgcrawl Core Library
//!
//! This library provides the core functionality for the imgcrawl tool,
//! which downloads the images referenced by a plaintext URL list while
//! honoring each host's robots.txt.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Structural URL validation
//! - [`download`] - robots.txt checks, image fetching and persistence
//! - [`progress`] - In-place terminal progress bar
//! - [`crawl`] - Per-URL pipeline, outcomes and the crawl log file
//! - [`config`] - Run configuration and defaults

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod crawl;
pub mod download;
pub mod parser;
pub mod progress;
mod user_agent;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawl::{CrawlError, CrawlLog, CrawlLogError, CrawlOutcome, CrawlSummary, Crawler};
pub use download::{DownloadError, HttpClient, RobotsChecker, RobotsError};
pub use parser::{ParseError, UrlRecord, parse_url_record};
pub use progress::{ProgressError, ProgressReporter};
