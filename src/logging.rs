use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";
const VERBOSE_LEVEL: &str = "debug";

pub fn init() {
    init_with(false);
}

/// Install the fmt subscriber. `RUST_LOG` wins over the `verbose` default.
pub fn init_with(verbose: bool) {
    let level = if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (tests, embedding callers) keeps the first subscriber.
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init_with(true);
        tracing::info!("logging initialised twice without panicking");
    }
}
