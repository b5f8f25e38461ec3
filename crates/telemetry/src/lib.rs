//! Tracing pipeline bootstrap for FOLIO.

use tracing_subscriber::EnvFilter;

use folio_kernel::settings::{LogFormat, TelemetrySettings};

/// Initialize the global tracing subscriber.
///
/// Filtering comes from `RUST_LOG` when set, defaulting to `info`. Output is
/// human-readable in local development or JSON lines for log shipping,
/// selected by `telemetry.log_format`. Calling this twice is a no-op rather
/// than an error so tests can initialize freely.
pub fn init(settings: &TelemetrySettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let settings = TelemetrySettings::default();
        init(&settings);
        init(&settings);
    }
}
