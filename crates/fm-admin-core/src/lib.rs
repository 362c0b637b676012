//! Core types, configuration and errors for the FM admin console

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use types::{Booking, ErrorPayload, GalleryItem, MenuItem, RecordId, Testimonial, unseen_count};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level. The `json` format emits one
/// JSON object per event; anything else uses the human readable formatter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(logging: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| Error::Configuration {
            message: format!("invalid log level '{}': {e}", logging.level),
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| Error::Other(format!("Failed to initialize logging: {e}")))
}
