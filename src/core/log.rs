//! Tracing subscriber setup for the binary.
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Directives used when `RUST_LOG` is unset and `--verbose` is given. HTTP
/// internals stay quiet so request logs from the provider remain readable.
const VERBOSE_DIRECTIVES: &str = "pesoconv=debug,reqwest=warn,hyper_util=warn";

pub fn init_logging(verbose: bool) {
    let (crate_level, default_directives) = if verbose {
        (LevelFilter::DEBUG, VERBOSE_DIRECTIVES)
    } else {
        (LevelFilter::OFF, "off")
    };
    let crate_filter = Targets::new()
        .with_target("pesoconv", crate_level)
        .with_default(LevelFilter::WARN);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Logs go to stderr so the status line on stdout stays pipeable.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(crate_filter)
        .with(env_filter)
        .init();
}
