//! URL line validation.
//!
//! Each line of the URL list is checked structurally before any network
//! access: it must carry a scheme, an authority, and a path.
//!
//! # Example
//!
//! ```
//! use imgcrawl_core::parser::{is_valid_url, parse_url_record};
//!
//! assert!(is_valid_url("https://example.com/cat.jpg"));
//! assert!(!is_valid_url("example.com/cat.jpg"));
//!
//! let record = parse_url_record("https://example.com/cat.jpg").unwrap();
//! assert_eq!(record.authority, "example.com");
//! ```

mod error;
mod url;

pub use error::{MAX_URL_LENGTH, ParseError};
pub use self::url::{UrlRecord, is_valid_url, parse_url_record};
