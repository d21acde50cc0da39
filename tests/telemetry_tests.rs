use timeline_rs::telemetry::{DEFAULT_TRACING_FILTER, init_default_tracing};

#[test]
fn default_filter_is_info() {
    assert_eq!(DEFAULT_TRACING_FILTER, "info");
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_init_is_disabled_without_feature() {
    assert!(!init_default_tracing());
}

#[cfg(feature = "telemetry")]
#[test]
fn tracing_init_succeeds_once() {
    let first = init_default_tracing();
    let second = init_default_tracing();
    assert!(!(first && second));
}
