use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "fnsplice=warn";

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so stdout only carries the patch report. `RUST_LOG`
/// takes precedence; otherwise `verbose` raises the crate to debug.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("fnsplice=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let result = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbose)
        .without_time()
        .try_init();

    if let Err(e) = result {
        // Already initialized, e.g. by a test harness
        eprintln!("Warning: Logger initialization failed: {}", e);
    }
}
