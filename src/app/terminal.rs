//! Terminal capability checks and tracing setup.

pub(crate) fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

pub(crate) fn should_disable_color(no_color_env: bool, dumb_terminal: bool) -> bool {
    no_color_env || dumb_terminal
}

/// The progress bar redraws in place, so it is only drawn on an interactive stdout.
pub(crate) fn should_draw_progress(
    stdout_is_terminal: bool,
    quiet: bool,
    dumb_terminal: bool,
) -> bool {
    stdout_is_terminal && !quiet && !dumb_terminal
}

/// Default diagnostic level; `RUST_LOG` still overrides it.
pub(crate) fn resolve_default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub(crate) fn init_tracing(default_level: &str, no_color: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_log_level() {
        assert_eq!(resolve_default_log_level(0, false), "warn");
        assert_eq!(resolve_default_log_level(1, false), "info");
        assert_eq!(resolve_default_log_level(2, false), "debug");
        assert_eq!(resolve_default_log_level(5, false), "trace");
        assert_eq!(resolve_default_log_level(3, true), "error");
    }

    #[test]
    fn test_should_draw_progress_requires_interactive_stdout() {
        assert!(should_draw_progress(true, false, false));
        assert!(!should_draw_progress(false, false, false));
        assert!(!should_draw_progress(true, true, false));
        assert!(!should_draw_progress(true, false, true));
    }

    #[test]
    fn test_should_disable_color() {
        assert!(!should_disable_color(false, false));
        assert!(should_disable_color(true, false));
        assert!(should_disable_color(false, true));
    }
}
