use std::io::{self, IsTerminal};

use anyhow::Result;
use imgcrawl_core::{CrawlLog, Crawler};
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::terminal;
use crate::cli::Args;

pub(crate) async fn run_crawler(args: Args) -> Result<ProcessExit> {
    let config = args.to_config();
    // The log resolves the local UTC offset, which needs to happen before
    // any blocking-pool thread is spawned.
    let mut log = CrawlLog::open(&config.log_file)?;

    let default_level = terminal::resolve_default_log_level(args.verbose, args.quiet);
    let dumb_terminal = terminal::is_dumb_terminal();
    let no_color = terminal::should_disable_color(terminal::no_color_env_requested(), dumb_terminal);
    terminal::init_tracing(default_level, no_color);

    debug!(?args, "CLI arguments parsed");

    info!(
        url_file = %args.url_file.display(),
        destination = %config.destination_dir.display(),
        log_file = %log.path().display(),
        "crawler starting"
    );
    let crawler = Crawler::new(config)?;

    let draw_progress =
        terminal::should_draw_progress(io::stdout().is_terminal(), args.quiet, dumb_terminal);
    let summary = if draw_progress {
        crawler.run(&args.url_file, &mut log, io::stdout()).await?
    } else {
        crawler.run(&args.url_file, &mut log, io::sink()).await?
    };
    log.close()?;

    debug!(?summary, "crawl summary");
    Ok(ProcessExit::Success)
}
