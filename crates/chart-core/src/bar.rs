// File: crates/chart-core/src/bar.rs
// Summary: Bar chart: one rectangle per record on a band x scale and niced linear y scale.

use tracing::debug;

use crate::chart::{CartesianFrame, CategoricalData, ChartKind, ChartRenderer};
use crate::config::BarConfig;
use crate::geometry::{Animated, Emphasis, Primitive, Rect, Scene, SourceRef, Transition};
use crate::interaction::{Notification, TooltipContent};
use crate::theme::Theme;
use crate::types::{Record, Viewport};

#[derive(Clone, Debug, Default)]
pub struct BarChart {
    pub config: BarConfig,
    pub theme: Theme,
}

impl BarChart {
    pub fn new(config: BarConfig, theme: Theme) -> Self {
        Self { config, theme }
    }

    pub fn frame(&self, data: &CategoricalData, viewport: Viewport) -> CartesianFrame {
        let c = &self.config;
        CartesianFrame::new(data, viewport, &c.margin, c.padding, c.axis.tick_count)
    }
}

impl ChartRenderer for BarChart {
    type Datum = Record;
    type Model = CategoricalData;

    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn prepare(&self, data: &[Record]) -> CategoricalData {
        CategoricalData::new(data)
    }

    fn layout(&self, model: &CategoricalData, viewport: Viewport) -> Scene {
        let mut scene = Scene::new(viewport);
        if model.records.is_empty() {
            return scene;
        }
        let frame = self.frame(model, viewport);
        frame.draw_axes(&mut scene, &self.config.axis, &self.config.margin, &self.theme);

        let bw = frame.x.bandwidth();
        let baseline = frame.baseline();
        let hover = Emphasis {
            opacity: Some(self.config.hover_opacity),
            duration_ms: self.config.hover_ms,
            ..Emphasis::default()
        };
        for (i, r) in model.records.iter().enumerate() {
            let (Some(x), Some(color_ix)) = (frame.band_x(&r.category), frame.x.index_of(&r.category)) else {
                continue;
            };
            let y = frame.value_y(r.value);
            let rect = Rect::from_xywh(x, y, bw, baseline - y);
            scene.push(
                Primitive::rect(rect)
                    .fill(self.theme.color_for(color_ix))
                    .source(SourceRef::Record(i))
                    .emphasis(hover)
                    .enter(Transition::new(Animated::Grow { baseline }, self.config.enter_ms)),
            );
        }
        debug!(bars = model.records.len(), bandwidth = bw, "bar layout");
        scene
    }

    fn tooltip(&self, model: &CategoricalData, source: SourceRef) -> TooltipContent {
        model.tooltip(source)
    }

    fn notification(&self, model: &CategoricalData, source: SourceRef) -> Option<Notification> {
        model.notification(source)
    }
}
