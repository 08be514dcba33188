// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the chart layout engine (scales, aggregation, geometry, interaction, lifecycle).

pub mod aggregate;
pub mod bar;
pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod interaction;
pub mod lifecycle;
pub mod line;
pub mod radar;
pub mod scale;
pub mod svg;
pub mod theme;
pub mod treemap;
pub mod types;

pub use aggregate::{aggregate_by_category, build_hierarchy, AggregatedCategory, HierarchyNode, NodeKind, RadarAxis};
pub use bar::BarChart;
pub use chart::{CartesianFrame, CategoricalData, ChartKind, ChartRenderer};
pub use config::{AxisConfig, BarConfig, DashboardConfig, LineConfig, RadarConfig, TreemapConfig};
pub use error::ChartError;
pub use geometry::{Point, Primitive, PrimitiveId, Rect, Scene, Shape, ShapeKind, SourceRef};
pub use interaction::{
    HoverState, Interaction, LogNotifier, Notification, Notifier, PointerEvent, Response, Tooltip, TooltipContent,
};
pub use lifecycle::{attach, ChartInstance, ChartSurface, ResizeHub, ResizeSubscription};
pub use line::LineChart;
pub use radar::RadarChart;
pub use scale::{BandScale, LinearScale};
pub use theme::{Color, Theme};
pub use treemap::{TreemapCell, TreemapChart, TreemapModel, TreemapPadding};
pub use types::{Insets, ProductRecord, Record, Viewport, HEIGHT, WIDTH};
