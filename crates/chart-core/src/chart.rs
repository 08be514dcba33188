// File: crates/chart-core/src/chart.rs
// Summary: Renderer trait shared by the four chart types and the cartesian frame (scales + axes) used by bar and line.

use std::fmt;

use tracing::trace;

use crate::aggregate::distinct_categories;
use crate::config::AxisConfig;
use crate::format;
use crate::geometry::{Point, Primitive, Scene, SourceRef, Text, TextAnchor};
use crate::interaction::{Notification, TooltipContent};
use crate::scale::{finite_max, BandScale, LinearScale};
use crate::theme::Theme;
use crate::types::{Insets, Record, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
    Treemap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Line, ChartKind::Radar, ChartKind::Treemap];

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Radar => "radar",
            ChartKind::Treemap => "treemap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One chart type: prepare a model from records, lay it out into a scene,
/// and answer tooltip/click lookups through a primitive's [`SourceRef`].
///
/// `layout` is pure; a rebuild is `prepare` + `layout` on fresh inputs.
pub trait ChartRenderer {
    type Datum;
    type Model;

    fn kind(&self) -> ChartKind;

    fn prepare(&self, data: &[Self::Datum]) -> Self::Model;

    fn layout(&self, model: &Self::Model, viewport: Viewport) -> Scene;

    /// Tooltip rows for the primitive built from `source`.
    fn tooltip(&self, model: &Self::Model, source: SourceRef) -> TooltipContent;

    /// Click payload; `None` when the source carries nothing to report.
    fn notification(&self, model: &Self::Model, source: SourceRef) -> Option<Notification>;

    /// Full rebuild. Empty input lays out nothing.
    fn render(&self, data: &[Self::Datum], viewport: Viewport) -> Scene {
        if data.is_empty() {
            trace!(kind = %self.kind(), "empty dataset, nothing to draw");
            return Scene::new(viewport);
        }
        let model = self.prepare(data);
        self.layout(&model, viewport)
    }
}

/// Records plus their distinct categories, shared by bar and line.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoricalData {
    pub records: Vec<Record>,
    pub categories: Vec<String>,
}

impl CategoricalData {
    pub fn new(records: &[Record]) -> Self {
        let categories = distinct_categories(records.iter().map(|r| r.category.as_str()))
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { records: records.to_vec(), categories }
    }

    pub fn record(&self, source: SourceRef) -> Option<&Record> {
        match source {
            SourceRef::Record(i) => self.records.get(i),
            SourceRef::Vertex { .. } => None,
        }
    }

    pub fn tooltip(&self, source: SourceRef) -> TooltipContent {
        match self.record(source) {
            Some(r) => TooltipContent::new(&r.category).line(format!("Value: {}", format::plain(r.value))),
            None => TooltipContent::default(),
        }
    }

    pub fn notification(&self, source: SourceRef) -> Option<Notification> {
        self.record(source).map(|r| Notification::new(&r.category, r.value))
    }
}

/// Band x scale and niced linear y scale placed inside the margins.
#[derive(Clone, Debug, PartialEq)]
pub struct CartesianFrame {
    pub x: BandScale,
    pub y: LinearScale,
    pub origin: Point,
    pub inner: (f64, f64),
}

impl CartesianFrame {
    pub fn new(data: &CategoricalData, viewport: Viewport, margin: &Insets, padding: f64, ticks: usize) -> Self {
        let (iw, ih) = viewport.inner(margin);
        let x = BandScale::new(&data.categories, (0.0, iw), padding);
        let max = finite_max(data.records.iter().map(|r| r.value));
        let y = LinearScale::from_max(max, (ih, 0.0)).nice(ticks);
        Self { x, y, origin: Point::new(margin.left as f64, margin.top as f64), inner: (iw, ih) }
    }

    /// Left edge of the band for `category`, in canvas coordinates.
    pub fn band_x(&self, category: &str) -> Option<f64> {
        self.x.map(category).map(|x| self.origin.x + x)
    }

    pub fn value_y(&self, v: f64) -> f64 {
        self.origin.y + self.y.map(v)
    }

    pub fn baseline(&self) -> f64 {
        self.origin.y + self.inner.1
    }

    /// Axis lines, tick marks, tick labels, optional gridlines, and the y title.
    pub fn draw_axes(&self, scene: &mut Scene, axis: &AxisConfig, margin: &Insets, theme: &Theme) {
        let (ox, oy) = (self.origin.x, self.origin.y);
        let (iw, ih) = self.inner;
        let bottom = self.baseline();
        let step = self.y.tick_step(axis.tick_count);

        let ticks = self.y.ticks(axis.tick_count);
        if axis.gridlines {
            for &t in &ticks {
                let y = self.value_y(t);
                scene.push(
                    Primitive::line(Point::new(ox, y), Point::new(ox + iw, y))
                        .stroke(theme.axis_line, 1.0)
                        .opacity(0.2)
                        .dashed(3.0, 3.0),
                );
            }
        }

        scene.push(Primitive::line(Point::new(ox, bottom), Point::new(ox + iw, bottom)).stroke(theme.axis_line, 1.0));
        for label in self.x.domain() {
            let Some(cx) = self.x.center(label) else { continue };
            let cx = ox + cx;
            scene.push(Primitive::line(Point::new(cx, bottom), Point::new(cx, bottom + 6.0)).stroke(theme.axis_line, 1.0));
            let text = Text::new(Point::new(cx, bottom + 10.0), label.as_str(), axis.font_size)
                .anchor(TextAnchor::End)
                .rotated(axis.x_label_rotation);
            scene.push(Primitive::text(text, theme.text));
        }

        scene.push(Primitive::line(Point::new(ox, oy), Point::new(ox, bottom)).stroke(theme.axis_line, 1.0));
        for &t in &ticks {
            let y = self.value_y(t);
            scene.push(Primitive::line(Point::new(ox - 6.0, y), Point::new(ox, y)).stroke(theme.axis_line, 1.0));
            let text = Text::new(Point::new(ox - 9.0, y + 4.0), format::tick(t, step), axis.font_size)
                .anchor(TextAnchor::End);
            scene.push(Primitive::text(text, theme.text));
        }

        if let Some(title) = &axis.y_title {
            let pos = Point::new(ox - margin.left as f64 + 12.0, oy + ih / 2.0);
            let text = Text::new(pos, title.as_str(), axis.font_size).anchor(TextAnchor::Middle).rotated(-90.0);
            scene.push(Primitive::text(text, theme.text));
        }
    }
}
