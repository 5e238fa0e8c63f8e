//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use imgcrawl_core::CrawlConfig;
use imgcrawl_core::config::{DEFAULT_LOG_FILE, default_destination_dir};
use imgcrawl_core::download::constants::{MAX_REQUEST_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};

/// Download images from URL list in a file.
///
/// Every URL is checked against its host's robots.txt before it is fetched;
/// only responses declaring an image content type are stored.
#[derive(Parser, Debug)]
#[command(name = "imgcrawl")]
#[command(author, version, about)]
pub struct Args {
    /// Plaintext file containing URLs of images to download, one per line
    #[arg(value_name = "URL_FILE")]
    pub url_file: PathBuf,

    /// Alternative destination directory (default: current working directory)
    #[arg(short = 'd', long = "destination-dir", value_name = "DEST_DIR")]
    pub destination_dir: Option<PathBuf>,

    /// Alternative log file
    #[arg(short = 'l', long = "log-file", value_name = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Total timeout per HTTP request in seconds (1-600)
    #[arg(short = 't', long, default_value_t = REQUEST_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=MAX_REQUEST_TIMEOUT_SECS))]
    pub timeout: u64,

    /// Increase diagnostic output on stderr (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress bar and non-error diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the crawl configuration from the parsed flags.
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            destination_dir: self
                .destination_dir
                .clone()
                .unwrap_or_else(default_destination_dir),
            log_file: self.log_file.clone(),
            request_timeout_secs: self.timeout,
            ..CrawlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_url_file_only_uses_defaults() {
        let args = Args::try_parse_from(["imgcrawl", "links.txt"]).unwrap();
        assert_eq!(args.url_file, PathBuf::from("links.txt"));
        assert_eq!(args.destination_dir, None);
        assert_eq!(args.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(args.timeout, 30);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);

        let config = args.to_config();
        assert_eq!(config.destination_dir, default_destination_dir());
        assert_eq!(config.log_file, PathBuf::from("crawling.log"));
    }

    #[test]
    fn test_cli_destination_dir_short_flag() {
        let args =
            Args::try_parse_from(["imgcrawl", "links.txt", "-d", "download_dir/images/"]).unwrap();
        assert_eq!(
            args.destination_dir,
            Some(PathBuf::from("download_dir/images/"))
        );
        assert_eq!(args.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_cli_all_arguments_any_order() {
        let args = Args::try_parse_from([
            "imgcrawl",
            "-d",
            "download_dir/images/",
            "links.txt",
            "-l",
            "download_dir/images.log",
        ])
        .unwrap();
        assert_eq!(args.url_file, PathBuf::from("links.txt"));
        assert_eq!(
            args.destination_dir,
            Some(PathBuf::from("download_dir/images/"))
        );
        assert_eq!(args.log_file, PathBuf::from("download_dir/images.log"));

        let config = args.to_config();
        assert_eq!(config.destination_dir, PathBuf::from("download_dir/images/"));
        assert_eq!(config.log_file, PathBuf::from("download_dir/images.log"));
    }

    #[test]
    fn test_cli_long_flags() {
        let args = Args::try_parse_from([
            "imgcrawl",
            "links.txt",
            "--destination-dir",
            "out",
            "--log-file",
            "run.log",
            "--timeout",
            "5",
        ])
        .unwrap();
        assert_eq!(args.destination_dir, Some(PathBuf::from("out")));
        assert_eq!(args.log_file, PathBuf::from("run.log"));
        assert_eq!(args.to_config().request_timeout_secs, 5);
    }

    #[test]
    fn test_cli_missing_url_file_rejected() {
        let err = Args::try_parse_from(["imgcrawl"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );

        let err = Args::try_parse_from(["imgcrawl", "-d", "out", "-l", "run.log"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["imgcrawl", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_timeout_out_of_range_rejected() {
        let err = Args::try_parse_from(["imgcrawl", "links.txt", "-t", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        let err = Args::try_parse_from(["imgcrawl", "links.txt", "-t", "601"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_verbose_and_quiet() {
        let args = Args::try_parse_from(["imgcrawl", "links.txt", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        let args = Args::try_parse_from(["imgcrawl", "links.txt", "-q"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_unknown_flag_rejected() {
        let err = Args::try_parse_from(["imgcrawl", "links.txt", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
