//! robots.txt checks, image fetching and persistence.
//!
//! # Features
//!
//! - Per-URL robots.txt evaluation (wildcard agent, no caching)
//! - Content-Type sniffing: only `image/*` responses are stored
//! - Streaming writes with partial-file cleanup on error
//! - Sequence-numbered filenames (`1_cat.png`, `2_dog.jpg`, ...)
//! - Explicit timeouts (10s connect, 30s total by default)
//!
//! # Example
//!
//! ```no_run
//! use imgcrawl_core::download::{HttpClient, RobotsChecker};
//! use imgcrawl_core::parser::parse_url_record;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let robots = RobotsChecker::new(client.clone());
//! let record = parse_url_record("https://example.com/cat.png")?;
//! if robots.is_allowed(&record.url, &record.scheme, &record.authority).await? {
//!     let outcome = client.fetch_and_store(&record.url, Path::new("./images"), 1).await;
//!     println!("{outcome}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
mod filename;
mod mime;
mod robots;

pub use client::{HttpClient, StoredImage};
pub use error::DownloadError;
pub use filename::sequenced_filename;
pub use mime::{is_image_content_type, primary_mime_type};
pub use robots::{RobotsChecker, RobotsError, RobotsPolicy, RobotsRule, robots_url};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
