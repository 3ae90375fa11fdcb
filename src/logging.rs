//! Logging setup for the sealed-keys binary
//!
//! Logs go to stderr so that stdout stays clean for envelopes and keys.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

use crate::error::{SealError, SealResult};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "sealed_keys=info";

/// Filter used by `--verbose`
pub const VERBOSE_FILTER: &str = "sealed_keys=debug";

/// Install the global tracing subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init(verbose: bool) -> SealResult<()> {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| SealError::Config(format!("Failed to install logger: {}", e)))
}
