use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the tracing subscriber. Logs go to stderr so they never mix with
/// the desk's prompts on stdout. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "rentdesk=debug,warn"
    } else {
        "rentdesk=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Verbose logging enabled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        // The second call fails because a global subscriber is already set
        let _ = init_logging(true);
        assert!(init_logging(false).is_err());
    }
}
