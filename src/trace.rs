use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logs to stderr so piped batch output stays clean. `RUST_LOG` overrides
/// the info default.
pub fn setup() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
