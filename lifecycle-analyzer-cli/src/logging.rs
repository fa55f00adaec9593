use tracing_subscriber::EnvFilter;

/// Initializes the global `tracing` subscriber, writing to stderr at the given minimum level.
///
/// `level` accepts anything [`EnvFilter`] understands (`error`, `warn`, `info`, `debug`,
/// `trace`); an unparseable value falls back to `info` rather than failing the phase.
pub(crate) fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

pub(crate) fn fail_with_error<IntoString: Into<String>>(error: IntoString) -> ! {
    eprintln!("❌ {}", error.into());
    std::process::exit(UNSPECIFIED_ERROR);
}

const UNSPECIFIED_ERROR: i32 = 1;
