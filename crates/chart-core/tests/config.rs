// File: crates/chart-core/tests/config.rs
// Purpose: Dashboard config defaults, TOML overrides, themes, and colors.

use chart_core::theme::{self, Color};
use chart_core::{ChartError, DashboardConfig, Insets};

#[test]
fn defaults_carry_dashboard_constants() {
    let c = DashboardConfig::default();
    assert_eq!(c.bar.padding, 0.3);
    assert_eq!(c.bar.margin, Insets::new(60, 20, 20, 40));
    assert_eq!(c.bar.hover_ms, 800);
    assert_eq!(c.line.padding, 0.5);
    assert!(c.line.axis.gridlines);
    assert_eq!(c.radar.levels, 5);
    assert_eq!(c.radar.headroom, 1.1);
    assert_eq!(c.treemap.padding_outer, 8.0);
    assert_eq!(c.treemap.padding_top, 24.0);
    assert_eq!(c.treemap.padding_inner, 4.0);
    assert_eq!(c.treemap.hover_ms, 200);
    assert_eq!(c.theme().name, "light");
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let text = r#"
        theme = "dark"

        [bar]
        padding = 0.2

        [treemap]
        hover_ms = 150
        truncate_below = 72.0

        [radar]
        palette_limit = 8
    "#;
    let c = DashboardConfig::from_toml_str(text).unwrap();
    assert_eq!(c.theme().name, "dark");
    assert_eq!(c.bar.padding, 0.2);
    assert_eq!(c.bar.enter_ms, 800);
    assert_eq!(c.treemap.hover_ms, 150);
    assert_eq!(c.treemap.truncate_below, 72.0);
    assert_eq!(c.radar.palette_limit, Some(8));
    assert_eq!(c.line, DashboardConfig::default().line);
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = DashboardConfig::from_toml_str("[bar]\npadding = \"wide\"").unwrap_err();
    assert!(matches!(err, ChartError::Config(_)), "{err}");
}

#[test]
fn load_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("chart-core-config-{}.toml", std::process::id()));
    std::fs::write(&path, "theme = \"category10\"\n[line]\nstroke_width = 3.0\n").unwrap();
    let c = DashboardConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(c.theme().palette, &theme::CATEGORY10[..]);
    assert_eq!(c.line.stroke_width, 3.0);

    let missing = DashboardConfig::load(path.with_extension("absent"));
    assert!(matches!(missing, Err(ChartError::Io(_))));
}

#[test]
fn config_round_trips_through_toml() {
    let c = DashboardConfig::default();
    let text = toml::to_string(&c).unwrap();
    assert_eq!(DashboardConfig::from_toml_str(&text).unwrap(), c);
}

#[test]
fn unknown_theme_falls_back_to_light() {
    assert_eq!(theme::find("solarized").name, "light");
    assert_eq!(theme::find("DARK").name, "dark");
}

#[test]
fn colors_parse_and_brighten() {
    assert_eq!(Color::from_hex("#3B82F6"), Some(Color::rgb(0x3b, 0x82, 0xf6)));
    assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
    assert_eq!(Color::from_hex("#00000080").map(|c| c.a), Some(0x80));
    assert_eq!(Color::from_hex("blue"), None);

    let c = Color::rgb(70, 140, 210);
    let b = c.brighter(1.0);
    assert_eq!((b.r, b.g, b.b), (100, 200, 255));
    assert_eq!(c.brighter(0.0), c);
    assert_eq!(String::from(Color::rgb(0x7f, 0, 0xff)), "#7f00ff");
}

#[test]
fn palette_wraps_and_empty_palette_is_black() {
    assert_eq!(theme::categorical(&theme::CATEGORY10, 10), theme::CATEGORY10[0]);
    assert_eq!(theme::categorical(&[], 3), Color::BLACK);
}
