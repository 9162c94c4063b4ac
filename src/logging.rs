//! Subscriber setup for hosts embedding the crate
//!
//! `RUST_LOG` overrides the level chosen from the flags.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    }
}

/// Install a global fmt subscriber. Returns false when one was already installed.
pub fn init(verbose: bool, quiet: bool) -> bool {
    let filter = default_filter(verbose, quiet);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true, true), "debug");
        assert_eq!(default_filter(false, true), "error");
        assert_eq!(default_filter(false, false), "info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false, true);
        assert!(!init(false, true));
    }
}
