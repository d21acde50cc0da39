use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use timeline_rs::TimelineError;
use timeline_rs::core::{
    LinearTimeScale, MIN_ITEM_WIDTH_PX, calculate_position, calculate_width,
    calculate_width_with_min,
};

fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

#[test]
fn week_viewport_maps_item_to_expected_pixels() {
    let total = jan(8) - jan(1);

    let left = calculate_position(jan(3), jan(1), total, 700.0).expect("position");
    let width = calculate_width(jan(3), Some(jan(5)), total, 700.0).expect("width");

    assert!((left - 200.0).abs() <= 1e-9);
    assert!((width - 200.0).abs() <= 1e-9);
}

#[test]
fn position_is_not_clamped_outside_the_window() {
    let total = jan(8) - jan(1);

    let before = calculate_position(jan(1) - TimeDelta::days(1), jan(1), total, 700.0)
        .expect("position before start");
    let after = calculate_position(jan(10), jan(1), total, 700.0).expect("position after end");

    assert!((before - (-100.0)).abs() <= 1e-9);
    assert!((after - 900.0).abs() <= 1e-9);
}

#[test]
fn viewport_edges_map_to_container_edges() {
    let total = jan(8) - jan(1);

    let start = calculate_position(jan(1), jan(1), total, 700.0).expect("start");
    let end = calculate_position(jan(8), jan(1), total, 700.0).expect("end");

    assert_eq!(start, 0.0);
    assert_eq!(end, 700.0);
}

#[test]
fn point_items_get_the_minimum_width() {
    let total = jan(8) - jan(1);

    let width = calculate_width(jan(3), None, total, 700.0).expect("width");
    assert_eq!(width, MIN_ITEM_WIDTH_PX);
}

#[test]
fn sub_pixel_items_are_floored_to_the_minimum_width() {
    let total = jan(31) - jan(1);

    let width = calculate_width(jan(3), Some(jan(3) + TimeDelta::minutes(1)), total, 700.0)
        .expect("width");
    assert_eq!(width, MIN_ITEM_WIDTH_PX);

    let zero = calculate_width(jan(3), Some(jan(3)), total, 700.0).expect("zero width");
    assert_eq!(zero, MIN_ITEM_WIDTH_PX);
}

#[test]
fn explicit_minimum_width_is_honored() {
    let total = jan(8) - jan(1);

    let width = calculate_width_with_min(jan(3), None, total, 700.0, 8.0).expect("width");
    assert_eq!(width, 8.0);

    let err = calculate_width_with_min(jan(3), None, total, 700.0, f64::NAN)
        .expect_err("nan min width must fail");
    assert!(matches!(err, TimelineError::InvalidData(_)));
}

#[test]
fn degenerate_durations_fail_fast() {
    let err = calculate_position(jan(3), jan(1), TimeDelta::zero(), 700.0)
        .expect_err("zero duration must fail");
    assert!(matches!(err, TimelineError::InvalidTimeRange { .. }));

    let err = calculate_position(jan(3), jan(1), TimeDelta::hours(-1), 700.0)
        .expect_err("negative duration must fail");
    assert!(matches!(err, TimelineError::InvalidTimeRange { .. }));

    let err = calculate_width(jan(3), Some(jan(4)), TimeDelta::zero(), 700.0)
        .expect_err("zero duration must fail");
    assert!(matches!(err, TimelineError::InvalidTimeRange { .. }));
}

#[test]
fn invalid_container_width_is_rejected() {
    let total = jan(8) - jan(1);

    let err = calculate_position(jan(3), jan(1), total, 0.0).expect_err("zero width");
    assert!(matches!(err, TimelineError::InvalidViewport { .. }));

    let err = calculate_position(jan(3), jan(1), total, f64::INFINITY).expect_err("inf width");
    assert!(matches!(err, TimelineError::InvalidViewport { .. }));
}

#[test]
fn linear_time_scale_round_trips_pixels() {
    let scale = LinearTimeScale::new(jan(1), jan(8)).expect("scale");

    let px = scale.time_to_pixel(jan(4), 700.0).expect("to pixel");
    assert!((px - 300.0).abs() <= 1e-9);

    let time = scale.pixel_to_time(px, 700.0).expect("from pixel");
    assert_eq!(time, jan(4));

    assert!((scale.time_to_percent(jan(8)) - 100.0).abs() <= 1e-9);
}

#[test]
fn linear_time_scale_rejects_inverted_domain() {
    let err = LinearTimeScale::new(jan(8), jan(1)).expect_err("inverted domain");
    assert!(matches!(err, TimelineError::InvalidTimeRange { .. }));
}
