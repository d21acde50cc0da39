//! Telemetry helpers for applications embedding `timeline-rs`.
//!
//! Tracing setup stays explicit and opt-in. Hosts can call
//! `init_default_tracing` or install their own `tracing` subscriber.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_FILTER: &str = "info";

/// Initializes a compact `tracing` subscriber honoring `RUST_LOG`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_TRACING_FILTER)
}

/// Same as [`init_default_tracing`] but with an explicit fallback filter,
/// e.g. `"timeline_rs=debug"` to watch layout and transaction events.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
