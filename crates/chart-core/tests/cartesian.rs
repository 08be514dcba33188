// File: crates/chart-core/tests/cartesian.rs
// Purpose: Bar and line geometry on band/linear scales, axes, colors, and enter transitions.

use chart_core::geometry::{Animated, Shape, ShapeKind};
use chart_core::{BarChart, ChartRenderer, LineChart, LineConfig, Rect, Record, Scene, Theme, Viewport};

fn rect_of(scene: &Scene, i: usize) -> Rect {
    match &scene.primitives[i].shape {
        Shape::Rect { rect, .. } => *rect,
        other => panic!("expected rect, got {other:?}"),
    }
}

fn bars(scene: &Scene) -> Vec<Rect> {
    scene.interactive().map(|(id, _)| rect_of(scene, id.0)).collect()
}

fn texts(scene: &Scene) -> Vec<String> {
    scene
        .primitives
        .iter()
        .filter_map(|p| match &p.shape {
            Shape::Text(t) => Some(t.content.clone()),
            _ => None,
        })
        .collect()
}

/// Default margins leave a 100 x 180 plot area.
fn viewport() -> Viewport {
    Viewport::new(180.0, 240.0).unwrap()
}

#[test]
fn two_bars_share_width_and_scale_height() {
    let data = [Record::new("A", 10.0, "2024"), Record::new("B", 20.0, "2024")];
    let scene = BarChart::default().render(&data, viewport());
    let b = bars(&scene);
    assert_eq!(b.len(), 2);

    let expected_bw = (100.0 / 1.15) / 2.0;
    assert!((b[0].width - expected_bw).abs() < 1e-9);
    assert!((b[1].width - b[0].width).abs() < 1e-12);
    assert!((b[1].height - 2.0 * b[0].height).abs() < 1e-9);

    assert_eq!(b[0].x, 60.0);
    assert!((b[1].x - (60.0 + expected_bw * 1.3)).abs() < 1e-9);
    assert_eq!(b[0].bottom(), 200.0);
    assert_eq!(b[1].y, 20.0);
}

#[test]
fn repeated_categories_share_band_and_color() {
    let data = [
        Record::new("North", 5.0, "2023"),
        Record::new("South", 8.0, "2023"),
        Record::new("North", 3.0, "2024"),
    ];
    let scene = BarChart::default().render(&data, viewport());
    let ids: Vec<_> = scene.interactive().map(|(id, _)| id).collect();
    assert_eq!(ids.len(), 3);
    let (first, third) = (&scene.primitives[ids[0].0], &scene.primitives[ids[2].0]);
    assert_eq!(rect_of(&scene, ids[0].0).x, rect_of(&scene, ids[2].0).x);
    assert_eq!(first.style.fill, third.style.fill);
    assert_ne!(first.style.fill, scene.primitives[ids[1].0].style.fill);
}

#[test]
fn colors_alias_past_palette_length() {
    let theme = Theme::default();
    let n = theme.palette.len() + 1;
    let data: Vec<Record> = (0..n).map(|i| Record::new(format!("c{i}"), 1.0 + i as f64, "")).collect();
    let scene = BarChart::default().render(&data, Viewport::new(900.0, 450.0).unwrap());
    let fills: Vec<_> = scene.interactive().map(|(_, p)| p.style.fill).collect();
    assert_eq!(fills.len(), n);
    assert_eq!(fills[0], fills[n - 1]);
    assert_ne!(fills[0], fills[1]);
}

#[test]
fn bars_grow_from_the_baseline() {
    let data = [Record::new("A", 10.0, ""), Record::new("B", 20.0, "")];
    let chart = BarChart::default();
    let scene = chart.render(&data, viewport());
    let (id, bar) = scene.interactive().next().unwrap();
    let t = bar.enter.expect("bars animate in");
    assert_eq!(t.duration_ms, chart.config.enter_ms);
    assert!(matches!(t.start, Animated::Grow { baseline } if baseline == 200.0));

    let start = bar.at_time(0.0);
    match &start.shape {
        Shape::Rect { rect, .. } => {
            assert_eq!(rect.height, 0.0);
            assert_eq!(rect.y, 200.0);
        }
        _ => unreachable!(),
    }
    assert_eq!(*bar.at_time(10_000.0), scene.primitives[id.0]);
    assert_eq!(scene.transition_end_ms(), 800);
}

#[test]
fn bar_axes_have_ticks_labels_and_title() {
    let data = [Record::new("Jan", 1234.0, ""), Record::new("Feb", 2500.0, "")];
    let scene = BarChart::default().render(&data, Viewport::new(900.0, 450.0).unwrap());
    let labels = texts(&scene);
    assert!(labels.contains(&"Jan".to_string()));
    assert!(labels.contains(&"Feb".to_string()));
    assert!(labels.contains(&"Sales ($)".to_string()));
    assert!(labels.contains(&"2,500".to_string()));
    assert!(labels.contains(&"0".to_string()));
    // no gridlines on the bar chart
    assert!(scene.primitives.iter().all(|p| p.style.dash.is_none()));
}

#[test]
fn line_points_sit_at_band_centers() {
    let data = [
        Record::new("Jan", 10.0, "2024"),
        Record::new("Feb", 40.0, "2024"),
        Record::new("Mar", 20.0, "2024"),
    ];
    let chart = LineChart::default();
    let scene = chart.render(&data, Viewport::new(900.0, 450.0).unwrap());
    let model = chart.prepare(&data);
    let frame = chart.frame(&model, Viewport::new(900.0, 450.0).unwrap());

    let markers: Vec<_> = scene.interactive().collect();
    assert_eq!(markers.len(), 3);
    for ((_, p), r) in markers.iter().zip(&data) {
        let Shape::Circle { center, radius } = p.shape else { panic!("markers are circles") };
        assert_eq!(radius, 4.0);
        let cx = frame.band_x(&r.category).unwrap() + frame.x.bandwidth() / 2.0;
        assert!((center.x - cx).abs() < 1e-9);
        assert!((center.y - frame.value_y(r.value)).abs() < 1e-9);
    }

    let path = scene.primitives.iter().find(|p| p.kind() == ShapeKind::Path).unwrap();
    let Shape::Path(ref path_shape) = path.shape else { unreachable!() };
    assert_eq!(path_shape.points.len(), 3);
    assert!(!path_shape.closed);
    assert_eq!(path.style.stroke, Some(Theme::default().line_stroke));
    assert!(matches!(path.enter.map(|t| t.start), Some(Animated::Reveal { .. })));
}

#[test]
fn line_markers_stagger_and_emphasize() {
    let data: Vec<Record> = ["Jan", "Feb", "Mar", "Apr"].iter().map(|m| Record::new(*m, 5.0, "")).collect();
    let chart = LineChart::default();
    let scene = chart.render(&data, Viewport::default());
    let delays: Vec<u32> = scene.interactive().map(|(_, p)| p.enter.unwrap().delay_ms).collect();
    assert_eq!(delays, [0, 50, 100, 150]);

    let (_, marker) = scene.interactive().next().unwrap();
    let hovered = marker.emphasized();
    let Shape::Circle { radius, .. } = hovered.shape else { unreachable!() };
    assert_eq!(radius, 6.0);
    assert_eq!(hovered.style.fill, Some(Theme::default().accent));
}

#[test]
fn huge_stagger_saturates_instead_of_overflowing() {
    let data: Vec<Record> = ["Jan", "Feb", "Mar"].iter().map(|m| Record::new(*m, 5.0, "")).collect();
    let config = LineConfig { point_stagger_ms: u32::MAX, ..LineConfig::default() };
    let scene = LineChart::new(config, Theme::default()).render(&data, Viewport::default());
    assert_eq!(scene.transition_end_ms(), u32::MAX);
    // mid-animation frame still resolves every primitive
    assert_eq!(scene.resolved(None, Some(1_000.0)).len(), scene.len());
}

#[test]
fn line_draws_dashed_gridlines() {
    let data = [Record::new("Jan", 100.0, ""), Record::new("Feb", 50.0, "")];
    let scene = LineChart::default().render(&data, Viewport::default());
    let dashed = scene.primitives.iter().filter(|p| p.kind() == ShapeKind::Line && p.style.dash.is_some()).count();
    assert!(dashed >= 2);
}

#[test]
fn month_column_maps_to_category() {
    let r: Record = record_from_toml("Jan", 42.0);
    assert_eq!(r.category, "Jan");
    assert_eq!(r.year, "");
}

fn record_from_toml(month: &str, value: f64) -> Record {
    let text = format!("month = \"{month}\"\nvalue = {value:.1}\n");
    toml::from_str(&text).unwrap()
}

#[test]
fn empty_input_produces_nothing() {
    assert!(BarChart::default().render(&[], viewport()).is_empty());
    assert!(LineChart::default().render(&[], viewport()).is_empty());
}
