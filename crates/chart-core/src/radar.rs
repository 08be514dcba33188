// File: crates/chart-core/src/radar.rs
// Summary: Radar chart: per-category averages on three polar axes, reference rings, legend, and title.

use tracing::debug;

use crate::aggregate::{aggregate_by_category, AggregatedCategory, RadarAxis};
use crate::chart::{ChartKind, ChartRenderer};
use crate::config::RadarConfig;
use crate::geometry::{angle_slice, Emphasis, Path, Point, Primitive, Rect, Scene, SourceRef, Text, TextAnchor};
use crate::interaction::{Notification, TooltipContent};
use crate::scale::{finite_max, LinearScale};
use crate::theme::{categorical, Color, Theme};
use crate::types::{ProductRecord, Viewport};

#[derive(Clone, Debug, Default)]
pub struct RadarChart {
    pub config: RadarConfig,
    pub theme: Theme,
}

/// Angle of axis `k`: first axis straight up, then clockwise.
pub fn axis_angle(k: usize) -> f64 {
    angle_slice(RadarAxis::ALL.len()) * k as f64 - std::f64::consts::FRAC_PI_2
}

/// One scale per axis with domain `[0, headroom · max]` and range `[0, radius]`.
pub fn axis_scales(categories: &[AggregatedCategory], radius: f64, headroom: f64) -> [LinearScale; 3] {
    RadarAxis::ALL.map(|axis| {
        let max = match finite_max(categories.iter().map(|c| c.value(axis))) {
            Some(m) if m != 0.0 => m,
            _ => axis.fallback_max(),
        };
        LinearScale::new((0.0, max * headroom), (0.0, radius))
    })
}

impl RadarChart {
    pub fn new(config: RadarConfig, theme: Theme) -> Self {
        Self { config, theme }
    }

    pub fn color_for(&self, index: usize) -> Color {
        let palette = self.theme.palette;
        let n = self.config.palette_limit.map_or(palette.len(), |l| l.min(palette.len()));
        categorical(&palette[..n], index)
    }

    /// Plot center and outer radius for `viewport`.
    pub fn geometry(&self, viewport: Viewport) -> (Point, f64) {
        let m = &self.config.margin;
        let (iw, ih) = viewport.inner(m);
        let center = Point::new(m.left as f64 + iw / 2.0, m.top as f64 + ih / 2.0);
        (center, iw.min(ih) / 2.0)
    }

    /// Polygon vertices of one category, in axis order.
    pub fn vertices(&self, category: &AggregatedCategory, scales: &[LinearScale; 3], center: Point) -> [Point; 3] {
        RadarAxis::ALL.map(|axis| {
            let k = axis.index();
            Point::polar(center, scales[k].map(category.value(axis)), axis_angle(k))
        })
    }

    fn draw_grid(&self, scene: &mut Scene, center: Point, radius: f64) {
        let levels = self.config.levels.max(1);
        for level in 1..=levels {
            let r = radius * level as f64 / levels as f64;
            scene.push(Primitive::circle(center, r).stroke(self.theme.grid, 1.0).dashed(4.0, 4.0));
        }
        for axis in RadarAxis::ALL {
            let angle = axis_angle(axis.index());
            scene.push(Primitive::line(center, Point::polar(center, radius, angle)).stroke(self.theme.grid, 1.0));
            let label_at = Point::polar(center, radius + self.config.label_offset, angle).offset(0.0, 4.0);
            let text = Text::new(label_at, axis.label(), 12.0).anchor(TextAnchor::Middle);
            scene.push(Primitive::text(text, self.theme.text));
        }
    }

    fn draw_legend(&self, scene: &mut Scene, model: &[AggregatedCategory], viewport: Viewport) {
        let m = &self.config.margin;
        let (iw, ih) = viewport.inner(m);
        let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
        let origin = Point::new(cx - iw / 2.0 + m.left as f64 / 2.0, cy - ih / 2.0 + m.top as f64 / 2.0);
        for (i, c) in model.iter().enumerate() {
            let row = origin.offset(0.0, i as f64 * 20.0);
            scene.push(Primitive::rounded_rect(Rect::from_xywh(row.x, row.y, 12.0, 12.0), 2.0).fill(self.color_for(i)));
            scene.push(Primitive::text(Text::new(row.offset(18.0, 10.0), c.category.as_str(), 12.0), self.theme.text));
        }
    }
}

impl ChartRenderer for RadarChart {
    type Datum = ProductRecord;
    type Model = Vec<AggregatedCategory>;

    fn kind(&self) -> ChartKind {
        ChartKind::Radar
    }

    fn prepare(&self, data: &[ProductRecord]) -> Vec<AggregatedCategory> {
        aggregate_by_category(data)
    }

    fn layout(&self, model: &Vec<AggregatedCategory>, viewport: Viewport) -> Scene {
        let mut scene = Scene::new(viewport);
        if model.is_empty() {
            return scene;
        }
        let c = &self.config;
        let (center, radius) = self.geometry(viewport);
        let scales = axis_scales(model, radius, c.headroom);

        self.draw_grid(&mut scene, center, radius);

        let hover = Emphasis {
            radius: Some(c.marker_radius + 2.0),
            stroke_width: Some(2.0),
            duration_ms: c.hover_ms,
            ..Emphasis::default()
        };
        for (ci, category) in model.iter().enumerate() {
            let color = self.color_for(ci);
            let vertices = self.vertices(category, &scales, center);
            scene.push(
                Primitive::path(Path::closed(vertices.to_vec()))
                    .fill(color)
                    .fill_opacity(c.fill_opacity)
                    .stroke(color, c.stroke_width),
            );
            for (axis, p) in RadarAxis::ALL.into_iter().zip(vertices) {
                scene.push(
                    Primitive::circle(p, c.marker_radius)
                        .fill(color)
                        .stroke(Color::WHITE, 1.0)
                        .source(SourceRef::Vertex { category: ci, axis })
                        .emphasis(hover),
                );
            }
        }

        if c.legend {
            self.draw_legend(&mut scene, model, viewport);
        }
        if let Some(title) = &c.title {
            let (_, ih) = viewport.inner(&c.margin);
            let at = Point::new(viewport.width / 2.0, viewport.height / 2.0 - ih / 2.0 - 35.0);
            scene.push(Primitive::text(Text::new(at, title.as_str(), 16.0).bold().anchor(TextAnchor::Middle), self.theme.text));
        }
        debug!(categories = model.len(), radius, "radar layout");
        scene
    }

    fn tooltip(&self, model: &Vec<AggregatedCategory>, source: SourceRef) -> TooltipContent {
        match source {
            SourceRef::Vertex { category, axis } => match model.get(category) {
                Some(c) => TooltipContent::new(format!(
                    "{} - {}: {}",
                    c.category,
                    axis.label(),
                    axis.format_value(c.value(axis))
                )),
                None => TooltipContent::default(),
            },
            SourceRef::Record(_) => TooltipContent::default(),
        }
    }

    fn notification(&self, model: &Vec<AggregatedCategory>, source: SourceRef) -> Option<Notification> {
        match source {
            SourceRef::Vertex { category, axis } => {
                model.get(category).map(|c| Notification::new(&c.category, c.value(axis)))
            }
            SourceRef::Record(_) => None,
        }
    }
}
