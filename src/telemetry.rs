use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Initialize tracing
///
/// Output goes to stderr; stdout is reserved for the documents the CLI prints.
pub fn init(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Decide on layers
    let reg = Registry::default().with(env_filter);
    if json {
        let logger = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        reg.with(logger).init();
    } else {
        let logger = tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr);
        reg.with(logger).init();
    }
}
