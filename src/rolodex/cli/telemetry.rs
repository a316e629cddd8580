use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ROLODEX_LOG";

/// Installs the stderr subscriber. `ROLODEX_LOG` takes the usual filter
/// directives and defaults to `warn`; `--verbose` forces `debug`.
pub(super) fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Already installed is fine (tests run several commands per process)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
