// File: crates/chart-core/src/config.rs
// Summary: Per-chart layout options with dashboard defaults, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::theme::{self, Theme};
use crate::types::Insets;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub tick_count: usize,
    pub font_size: f64,
    /// Rotation of x tick labels, degrees.
    pub x_label_rotation: f64,
    pub y_title: Option<String>,
    pub gridlines: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            tick_count: 5,
            font_size: 12.0,
            x_label_rotation: -45.0,
            y_title: Some("Sales ($)".to_string()),
            gridlines: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub margin: Insets,
    pub padding: f64,
    pub axis: AxisConfig,
    pub enter_ms: u32,
    pub hover_opacity: f64,
    pub hover_ms: u32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            margin: Insets::default(),
            padding: 0.3,
            axis: AxisConfig::default(),
            enter_ms: 800,
            hover_opacity: 0.8,
            hover_ms: 800,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub margin: Insets,
    pub padding: f64,
    pub axis: AxisConfig,
    pub stroke_width: f64,
    pub point_radius: f64,
    pub hover_radius: f64,
    pub reveal_ms: u32,
    pub point_ms: u32,
    pub point_stagger_ms: u32,
    pub hover_ms: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            margin: Insets::default(),
            padding: 0.5,
            axis: AxisConfig { gridlines: true, ..AxisConfig::default() },
            stroke_width: 2.0,
            point_radius: 4.0,
            hover_radius: 6.0,
            reveal_ms: 1000,
            point_ms: 500,
            point_stagger_ms: 50,
            hover_ms: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub margin: Insets,
    pub levels: usize,
    /// Domain max is the largest category average times this factor.
    pub headroom: f64,
    pub label_offset: f64,
    pub fill_opacity: f64,
    pub stroke_width: f64,
    pub marker_radius: f64,
    /// Cap on distinct series colors; `None` uses the whole theme palette.
    pub palette_limit: Option<usize>,
    pub title: Option<String>,
    pub legend: bool,
    pub hover_ms: u32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            margin: Insets::new(80, 80, 50, 50),
            levels: 5,
            headroom: 1.1,
            label_offset: 20.0,
            fill_opacity: 0.3,
            stroke_width: 2.0,
            marker_radius: 4.0,
            palette_limit: Some(5),
            title: Some("Category Comparison - Rating, Price, Value".to_string()),
            legend: true,
            hover_ms: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapConfig {
    pub margin: Insets,
    pub padding_outer: f64,
    pub padding_top: f64,
    pub padding_inner: f64,
    /// Leaf names shorten to three characters below this width.
    pub truncate_below: f64,
    /// Leaf value labels are hidden at or below this width.
    pub value_label_above: f64,
    pub max_font_size: f64,
    pub fill_opacity: f64,
    pub brighten: f64,
    pub hover_ms: u32,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            margin: Insets::uniform(10),
            padding_outer: 8.0,
            padding_top: 24.0,
            padding_inner: 4.0,
            truncate_below: 60.0,
            value_label_above: 40.0,
            max_font_size: 11.0,
            fill_opacity: 0.85,
            brighten: 0.7,
            hover_ms: 200,
        }
    }
}

/// Everything a dashboard needs to lay out its four charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub theme: String,
    pub bar: BarConfig,
    pub line: LineConfig,
    pub radar: RadarConfig,
    pub treemap: TreemapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            bar: BarConfig::default(),
            line: LineConfig::default(),
            radar: RadarConfig::default(),
            treemap: TreemapConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ChartError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }
}
