use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use timeline_rs::api::{ItemGeometry, TimelineAccessors, TimelineView, TimelineViewConfig};
use timeline_rs::render::{Color, NullRenderer, RectPrimitive, RenderFrame};

#[derive(Debug, Clone)]
struct Task {
    id: String,
    name: String,
    start: Option<DateTime<Utc>>,
    due: Option<DateTime<Utc>>,
}

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn task(id: &str, start: u32, due: u32) -> Task {
    Task {
        id: id.to_owned(),
        name: format!("Task {id}"),
        start: Some(day(start)),
        due: Some(day(due)),
    }
}

fn accessors() -> TimelineAccessors<Task> {
    TimelineAccessors::new(|task: &Task| task.id.clone(), |task: &Task| task.start)
        .with_end(|task: &Task| task.due)
}

fn view_at(now: DateTime<Utc>, records: Vec<Task>) -> TimelineView<Task, NullRenderer> {
    let config = TimelineViewConfig::new(700.0).with_initial_range(day(1), day(8));
    let mut view = TimelineView::with_clock(
        NullRenderer::default(),
        accessors(),
        config,
        Box::new(move || now),
    )
    .expect("view init");
    view.set_items(records);
    view
}

fn sample_tasks() -> Vec<Task> {
    vec![task("a", 1, 3), task("b", 2, 5), task("c", 4, 6)]
}

#[test]
fn visible_items_carry_lane_geometry() {
    let view = view_at(day(20), sample_tasks());

    let visible = view.visible_items().expect("visible items");
    assert_eq!(visible.len(), 3);
    assert_eq!(view.lane_count(), 2);

    let a = &visible[0];
    assert_eq!(a.id, "a");
    assert_eq!(a.lane, 0);
    assert_relative_eq!(a.left_px, 0.0);
    assert_relative_eq!(a.width_px, 200.0);
    assert_relative_eq!(a.top_px, 10.0);
    assert_relative_eq!(a.height_px, 32.0);

    let b = &visible[1];
    assert_eq!(b.lane, 1);
    assert_relative_eq!(b.left_px, 100.0);
    assert_relative_eq!(b.width_px, 300.0);
    assert_relative_eq!(b.top_px, 50.0);

    let c = &visible[2];
    assert_eq!(c.lane, 0);
    assert_relative_eq!(c.left_px, 300.0);
}

#[test]
fn items_fully_left_of_window_are_culled() {
    let mut view = view_at(day(20), sample_tasks());

    view.pan_by_pixels(250.0).expect("pan");

    let ids: Vec<String> = view
        .visible_items()
        .expect("visible items")
        .into_iter()
        .map(|geometry| geometry.id)
        .collect();
    assert_eq!(ids, vec!["b".to_owned(), "c".to_owned()]);
}

#[test]
fn item_touching_left_edge_stays_visible() {
    let mut view = view_at(day(20), sample_tasks());

    view.pan_by_pixels(200.0).expect("pan");

    let visible = view.visible_items().expect("visible items");
    assert_eq!(visible[0].id, "a");
    assert_relative_eq!(visible[0].right_px(), 0.0, epsilon = 1e-9);
}

#[test]
fn items_right_of_window_are_culled() {
    let mut records = sample_tasks();
    records.push(task("later", 10, 12));
    let view = view_at(day(20), records);

    let visible = view.visible_items().expect("visible items");
    assert!(visible.iter().all(|geometry| geometry.id != "later"));
    assert_eq!(view.layout().len(), 4);
}

#[test]
fn records_without_start_are_dropped_not_fatal() {
    let broken = Task {
        id: "broken".to_owned(),
        name: "Broken".to_owned(),
        start: None,
        due: Some(day(3)),
    };
    let view = view_at(day(20), vec![broken, task("a", 1, 3)]);

    assert_eq!(view.dropped_record_count(), 1);
    assert_eq!(view.records().len(), 2);
    assert_eq!(view.timeline_items().len(), 1);

    let visible = view.visible_items().expect("visible items");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].source_index, 1);
}

#[test]
fn empty_timeline_still_reserves_one_lane() {
    let view = view_at(day(20), Vec::new());

    assert_eq!(view.lane_count(), 1);
    assert_relative_eq!(view.canvas_height_px(), 140.0);
    assert!(view.visible_items().expect("visible items").is_empty());
}

#[test]
fn canvas_height_grows_with_lanes() {
    let view = view_at(day(20), sample_tasks());
    assert_relative_eq!(view.canvas_height_px(), 180.0);
}

#[test]
fn click_passes_original_record_to_handler() {
    let clicked: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&clicked);
    let mut view = view_at(day(20), sample_tasks());
    view.set_on_item_click(Box::new(move |task: &Task| {
        sink.borrow_mut().push(task.name.clone());
    }));

    assert_eq!(view.click_at(150.0, 20.0).expect("click a"), Some(0));
    assert_eq!(view.click_at(150.0, 60.0).expect("click b"), Some(1));
    assert_eq!(view.click_at(250.0, 20.0).expect("gap"), None);

    assert_eq!(*clicked.borrow(), vec!["Task a".to_owned(), "Task b".to_owned()]);
}

#[test]
fn click_without_handler_still_reports_hit() {
    let mut view = view_at(day(20), sample_tasks());
    assert_eq!(view.click_at(350.0, 20.0).expect("click c"), Some(2));
}

#[test]
fn now_indicator_only_inside_window() {
    let view = view_at(
        Utc.with_ymd_and_hms(2024, 1, 4, 12, 0, 0)
            .single()
            .expect("valid date"),
        sample_tasks(),
    );
    let x = view
        .now_indicator_px()
        .expect("indicator")
        .expect("now is visible");
    assert_relative_eq!(x, 350.0);

    let outside = view_at(day(20), sample_tasks());
    assert_eq!(outside.now_indicator_px().expect("indicator"), None);

    let on_edge = view_at(day(1), sample_tasks());
    assert_eq!(on_edge.now_indicator_px().expect("indicator"), None);
}

#[test]
fn now_indicator_can_be_disabled() {
    let now = day(4);
    let config = TimelineViewConfig::new(700.0)
        .with_initial_range(day(1), day(8))
        .with_now_indicator(false);
    let view: TimelineView<Task, NullRenderer> =
        TimelineView::with_clock(NullRenderer::default(), accessors(), config, Box::new(move || now))
            .expect("view init");

    assert_eq!(view.now_indicator_px().expect("indicator"), None);
}

#[test]
fn range_label_spans_both_ends() {
    let view = view_at(day(20), sample_tasks());
    assert_eq!(view.range_label(), "Jan 1 - Jan 8, 2024");
}

#[test]
fn frame_layers_grid_items_and_now_line() {
    let view = view_at(day(4), sample_tasks());

    let frame = view.build_frame().expect("frame");
    frame.validate().expect("valid frame");

    assert_relative_eq!(frame.width_px, 700.0);
    assert_relative_eq!(frame.height_px, 220.0);
    assert_eq!(frame.grid_lines.len(), 8);
    assert_eq!(frame.grid_labels.len(), 8);
    assert_eq!(frame.grid_labels[0].text, "Jan 1");
    assert_eq!(frame.item_rects.len(), 3);
    assert_eq!(frame.item_labels.len(), 3);
    assert_eq!(frame.item_labels[0].text, "a");
    assert_eq!(frame.overlay_lines.len(), 1);

    // Items sit below the header.
    assert_relative_eq!(frame.item_rects[0].y, 50.0);
    assert_relative_eq!(frame.item_rects[1].y, 90.0);
}

#[test]
fn custom_item_renderer_receives_record() {
    let mut view = view_at(day(20), sample_tasks());
    view.set_item_renderer(Box::new(
        |task: &Task, geometry: &ItemGeometry, frame: &mut RenderFrame| {
        let fill = if task.id == "b" {
            Color::rgb(1.0, 0.0, 0.0)
        } else {
            Color::rgb(0.0, 0.0, 1.0)
        };
        frame.push_item_rect(RectPrimitive::new(
            geometry.left_px,
            geometry.top_px,
            geometry.width_px,
            geometry.height_px,
            fill,
        ));
    }));

    let frame = view.build_frame().expect("frame");
    assert_eq!(frame.item_rects.len(), 3);
    assert!(frame.item_labels.is_empty());
    assert_eq!(frame.item_rects[1].fill, Color::rgb(1.0, 0.0, 0.0));

    view.clear_item_renderer();
    let frame = view.build_frame().expect("frame");
    assert_eq!(frame.item_labels.len(), 3);
}

#[test]
fn render_hands_frame_to_renderer() {
    let mut view = view_at(day(4), sample_tasks());

    view.render().expect("render");

    let renderer = view.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_grid_line_count, 8);
    assert_eq!(renderer.last_item_count, 3);
    assert_eq!(renderer.last_overlay_count, 1);
}

#[test]
fn point_items_render_at_minimum_width() {
    let point = Task {
        id: "milestone".to_owned(),
        name: "Milestone".to_owned(),
        start: Some(day(2)),
        due: None,
    };
    let view = view_at(day(20), vec![point]);

    let visible = view.visible_items().expect("visible items");
    assert_relative_eq!(visible[0].left_px, 100.0);
    assert_relative_eq!(visible[0].width_px, 4.0);
}
