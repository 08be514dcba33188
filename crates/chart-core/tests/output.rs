// File: crates/chart-core/tests/output.rs
// Purpose: SVG serialization and number/label formatting.

use chart_core::format;
use chart_core::geometry::{Emphasis, Path, SourceRef, Text};
use chart_core::svg::{path_data, render_svg, write_svg};
use chart_core::{BarChart, ChartRenderer, Color, Point, Primitive, Rect, Record, Scene, Viewport};

#[test]
fn grouping_and_locale_forms() {
    assert_eq!(format::grouped(1234.5, 1), "1,234.5");
    assert_eq!(format::grouped(-1234.0, 0), "-1,234");
    assert_eq!(format::grouped(999.0, 0), "999");
    assert_eq!(format::grouped(-0.0001, 2), "0.00");
    assert_eq!(format::locale(12500.0), "12,500");
    assert_eq!(format::locale(1234.5), "1,234.5");
    assert_eq!(format::currency_locale(1234.5), "$1,234.5");
    assert_eq!(format::currency_whole(99.6), "$100");
    assert_eq!(format::one_decimal(4.0), "4.0");
    assert_eq!(format::plain(10.0), "10");
}

#[test]
fn halves_round_away_from_zero() {
    assert_eq!(format::one_decimal(4.25), "4.3");
    assert_eq!(format::currency_whole(12.5), "$13");
    assert_eq!(format::currency_whole(-12.5), "$-13");
    assert_eq!(format::grouped(2.5, 0), "3");
    assert_eq!(format::grouped(1234.25, 1), "1,234.3");
    assert_eq!(format::locale(0.0625), "0.063");
    assert_eq!(format::grouped(1_234_567.0, 2), "1,234,567.00");
}

#[test]
fn tick_labels_use_step_precision() {
    assert_eq!(format::tick(2500.0, 500.0), "2,500");
    assert_eq!(format::tick(0.0, 500.0), "0");
    assert_eq!(format::tick(0.5, 0.5), "0.5");
    assert_eq!(format::tick(3.0, 0.0), "3");
}

#[test]
fn labels_truncate_below_threshold() {
    assert_eq!(format::truncate_label("Headphones", 50.0, 60.0), "Hea...");
    assert_eq!(format::truncate_label("Headphones", 60.0, 60.0), "Headphones");
    assert_eq!(format::truncate_label("TV", 10.0, 60.0), "TV...");
}

#[test]
fn svg_escapes_text_and_carries_styles() {
    let mut scene = Scene::new(Viewport::new(200.0, 100.0).unwrap());
    scene.push(Primitive::rect(Rect::from_xywh(10.0, 10.0, 50.0, 40.0)).fill(Color::rgb(255, 0, 0)).fill_opacity(0.5));
    scene.push(Primitive::text(Text::new(Point::new(5.0, 90.0), "R&D <team>", 12.0).bold(), Color::BLACK));
    scene.push(Primitive::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).stroke(Color::rgb(0xdd, 0xdd, 0xdd), 1.0).dashed(3.0, 3.0));

    let svg = render_svg(&scene, Color::WHITE, None);
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<rect").count(), 2, "background plus one bar");
    assert!(svg.contains("R&amp;D &lt;team&gt;"));
    assert!(svg.contains("font-weight=\"700\""));
    assert!(svg.contains("fill=\"#ff0000\" fill-opacity=\"0.500\""));
    assert!(svg.contains("stroke-dasharray=\"3 3\""));
}

#[test]
fn svg_applies_hover_emphasis() {
    let mut scene = Scene::new(Viewport::default());
    let id = scene.push(
        Primitive::rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0))
            .fill(Color::BLACK)
            .source(SourceRef::Record(0))
            .emphasis(Emphasis { opacity: Some(0.8), ..Emphasis::default() }),
    );
    assert!(!render_svg(&scene, Color::WHITE, None).contains("opacity=\"0.8\""));
    assert!(render_svg(&scene, Color::WHITE, Some(id)).contains("opacity=\"0.8\""));
}

#[test]
fn path_data_closes_polygons() {
    let open = Path::open(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
    assert_eq!(path_data(&open), "M 0.00 0.00 L 10.00 5.00");
    let tri = Path::closed(vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)]);
    assert!(path_data(&tri).ends_with(" Z"));
    assert!((tri.length() - 12.0).abs() < 1e-9);
}

#[test]
fn bar_chart_writes_an_svg_file() {
    let data = [Record::new("Q1", 10.0, "2024"), Record::new("Q2", 20.0, "2024")];
    let scene = BarChart::default().render(&data, Viewport::default());
    let path = std::env::temp_dir().join(format!("chart-core-bar-{}.svg", std::process::id()));
    write_svg(&path, &scene, Color::WHITE).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(text.contains(">Q1</text>"));
    assert!(text.contains(">Sales ($)</text>"));
}
