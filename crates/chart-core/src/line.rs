// File: crates/chart-core/src/line.rs
// Summary: Line chart: points at band centers joined by a straight-segment path, with circle markers.

use tracing::debug;

use crate::chart::{CartesianFrame, CategoricalData, ChartKind, ChartRenderer};
use crate::config::LineConfig;
use crate::geometry::{Animated, Emphasis, Path, Point, Primitive, Scene, SourceRef, Transition};
use crate::interaction::{Notification, TooltipContent};
use crate::theme::Theme;
use crate::types::{Record, Viewport};

#[derive(Clone, Debug, Default)]
pub struct LineChart {
    pub config: LineConfig,
    pub theme: Theme,
}

impl LineChart {
    pub fn new(config: LineConfig, theme: Theme) -> Self {
        Self { config, theme }
    }

    pub fn frame(&self, data: &CategoricalData, viewport: Viewport) -> CartesianFrame {
        let c = &self.config;
        CartesianFrame::new(data, viewport, &c.margin, c.padding, c.axis.tick_count)
    }

    /// Canvas position of every record, in input order.
    pub fn points(&self, frame: &CartesianFrame, data: &CategoricalData) -> Vec<(usize, Point)> {
        let half = frame.x.bandwidth() / 2.0;
        data.records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| frame.band_x(&r.category).map(|x| (i, Point::new(x + half, frame.value_y(r.value)))))
            .collect()
    }
}

impl ChartRenderer for LineChart {
    type Datum = Record;
    type Model = CategoricalData;

    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn prepare(&self, data: &[Record]) -> CategoricalData {
        CategoricalData::new(data)
    }

    fn layout(&self, model: &CategoricalData, viewport: Viewport) -> Scene {
        let mut scene = Scene::new(viewport);
        if model.records.is_empty() {
            return scene;
        }
        let c = &self.config;
        let frame = self.frame(model, viewport);
        frame.draw_axes(&mut scene, &c.axis, &c.margin, &self.theme);

        let points = self.points(&frame, model);
        let path = Path::open(points.iter().map(|&(_, p)| p).collect());
        let length = path.length();
        scene.push(
            Primitive::path(path)
                .stroke(self.theme.line_stroke, c.stroke_width)
                .enter(Transition::new(Animated::Reveal { length }, c.reveal_ms)),
        );

        let hover = Emphasis {
            radius: Some(c.hover_radius),
            fill: Some(self.theme.accent),
            duration_ms: c.hover_ms,
            ..Emphasis::default()
        };
        for (n, &(i, p)) in points.iter().enumerate() {
            let delay = c.point_stagger_ms.saturating_mul(n as u32);
            scene.push(
                Primitive::circle(p, c.point_radius)
                    .fill(self.theme.line_stroke)
                    .source(SourceRef::Record(i))
                    .emphasis(hover)
                    .enter(Transition::new(Animated::Radius { from: 0.0 }, c.point_ms).delayed(delay)),
            );
        }
        debug!(points = points.len(), length, "line layout");
        scene
    }

    fn tooltip(&self, model: &CategoricalData, source: SourceRef) -> TooltipContent {
        model.tooltip(source)
    }

    fn notification(&self, model: &CategoricalData, source: SourceRef) -> Option<Notification> {
        model.notification(source)
    }
}
