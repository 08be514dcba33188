// File: crates/chart-render-skia/src/raster.rs
// Summary: Headless raster pipeline: draws a scene (plus hover emphasis and tooltip) onto Skia CPU surfaces.

use std::path::Path as FsPath;

use chart_core::geometry::{Path, Primitive, PrimitiveId, Shape, Style};
use chart_core::{Color, Scene, Theme, Tooltip, HEIGHT, WIDTH};
use skia_safe as skia;
use thiserror::Error;
use tracing::debug;

use crate::text::TextShaper;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },
    #[error("encode PNG failed")]
    Encode,
    #[error("reading surface pixels failed")]
    ReadPixels,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH as i32, height: HEIGHT as i32, theme: Theme::light(), draw_labels: true }
    }
}

impl RenderOptions {
    /// Surface sized to the scene's viewport.
    pub fn for_scene(scene: &Scene, theme: Theme) -> Self {
        Self {
            width: scene.viewport.width.round().max(1.0) as i32,
            height: scene.viewport.height.round().max(1.0) as i32,
            theme,
            draw_labels: true,
        }
    }
}

/// One drawable moment of a chart: scene, hover target, tooltip, and
/// animation clock (`None` draws final geometry).
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub hovered: Option<PrimitiveId>,
    pub tooltip: Option<&'a Tooltip>,
    pub elapsed_ms: Option<f64>,
}

impl<'a> Frame<'a> {
    pub fn still(scene: &'a Scene) -> Self {
        Self { scene, hovered: None, tooltip: None, elapsed_ms: None }
    }

    pub fn hovering(mut self, hovered: Option<PrimitiveId>, tooltip: Option<&'a Tooltip>) -> Self {
        self.hovered = hovered;
        self.tooltip = tooltip;
        self
    }

    pub fn at(mut self, elapsed_ms: f64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }
}

#[derive(Default)]
pub struct SkiaRenderer {
    text: TextShaper,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `frame` onto any Skia canvas, scaled from the scene viewport to the surface size.
    pub fn draw_onto_canvas(&self, canvas: &skia::Canvas, frame: Frame<'_>, opts: &RenderOptions) {
        canvas.clear(to_skia(opts.theme.background));
        let vp = frame.scene.viewport;
        let (sx, sy) = (opts.width as f64 / vp.width, opts.height as f64 / vp.height);
        canvas.save();
        if (sx - 1.0).abs() > f64::EPSILON || (sy - 1.0).abs() > f64::EPSILON {
            canvas.scale((sx as f32, sy as f32));
        }
        for p in frame.scene.resolved(frame.hovered, frame.elapsed_ms) {
            self.draw_primitive(canvas, &p, opts.draw_labels);
        }
        if let Some(tip) = frame.tooltip {
            self.draw_tooltip(canvas, tip, &opts.theme, (vp.width, vp.height));
        }
        canvas.restore();
    }

    fn draw_primitive(&self, canvas: &skia::Canvas, p: &Primitive, draw_labels: bool) {
        let s = &p.style;
        match &p.shape {
            Shape::Rect { rect, corner_radius } => {
                let r = rect.normalized();
                let sr = skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32);
                let rx = *corner_radius as f32;
                for paint in paints(s) {
                    if rx > 0.0 {
                        canvas.draw_round_rect(sr, rx, rx, &paint);
                    } else {
                        canvas.draw_rect(sr, &paint);
                    }
                }
            }
            Shape::Circle { center, radius } => {
                if *radius <= 0.0 {
                    return;
                }
                for paint in paints(s) {
                    canvas.draw_circle((center.x as f32, center.y as f32), *radius as f32, &paint);
                }
            }
            Shape::Line { from, to } => {
                if let Some(paint) = stroke_paint(s) {
                    canvas.draw_line((from.x as f32, from.y as f32), (to.x as f32, to.y as f32), &paint);
                }
            }
            Shape::Path(path) => {
                let Some(sk_path) = to_skia_path(path) else { return };
                for paint in paints(s) {
                    canvas.draw_path(&sk_path, &paint);
                }
            }
            Shape::Text(t) => {
                if !draw_labels {
                    return;
                }
                if let Some(c) = s.fill {
                    self.text.draw(canvas, t, with_opacity(c, s.opacity));
                }
            }
        }
    }

    fn draw_tooltip(&self, canvas: &skia::Canvas, tip: &Tooltip, theme: &Theme, bounds: (f64, f64)) {
        const PAD: f32 = 8.0;
        const LINE_H: f32 = 18.0;
        let rows: Vec<(&str, f32, bool)> = tip
            .content
            .rows()
            .enumerate()
            .map(|(i, r)| if i == 0 { (r, 13.0, true) } else { (r, 12.0, false) })
            .collect();
        let text_w = rows.iter().map(|(r, size, bold)| self.text.measure_width(r, *size, *bold)).fold(0.0f32, f32::max);
        let (w, h) = (text_w + 2.0 * PAD, rows.len() as f32 * LINE_H + PAD);

        // keep the box on screen
        let x = (tip.position.x as f32).min(bounds.0 as f32 - w - 1.0).max(1.0);
        let y = (tip.position.y as f32).min(bounds.1 as f32 - h - 1.0).max(1.0);
        let rect = skia::Rect::from_xywh(x, y, w, h);

        let mut bg = skia::Paint::default();
        bg.set_anti_alias(true);
        bg.set_color(to_skia(theme.tooltip_background));
        canvas.draw_round_rect(rect, 4.0, 4.0, &bg);
        let mut border = skia::Paint::default();
        border.set_anti_alias(true);
        border.set_style(skia::paint::Style::Stroke);
        border.set_stroke_width(1.0);
        border.set_color(to_skia(theme.tooltip_border));
        canvas.draw_round_rect(rect, 4.0, 4.0, &border);

        let color = to_skia(theme.tooltip_text);
        for (i, (row, size, bold)) in rows.into_iter().enumerate() {
            let mut label = chart_core::geometry::Text::new(
                chart_core::Point::new((x + PAD) as f64, (y + PAD + LINE_H * (i as f32 + 0.7)) as f64),
                row,
                size as f64,
            );
            label.bold = bold;
            self.text.draw(canvas, &label, color);
        }
    }

    fn raster(&self, opts: &RenderOptions, frame: Frame<'_>) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or(RenderError::Surface { width: opts.width, height: opts.height })?;
        self.draw_onto_canvas(surface.canvas(), frame, opts);
        debug!(
            width = opts.width,
            height = opts.height,
            primitives = frame.scene.len(),
            hovered = ?frame.hovered,
            "rasterized frame"
        );
        Ok(surface)
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions, frame: Frame<'_>) -> Result<Vec<u8>> {
        let mut surface = self.raster(opts, frame)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image.encode_to_data(skia::EncodedImageFormat::PNG).ok_or(RenderError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render `frame` to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, opts: &RenderOptions, frame: Frame<'_>, output_png_path: impl AsRef<FsPath>) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts, frame)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels plus `(width, height, stride)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions, frame: Frame<'_>) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.raster(opts, frame)?;
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(RenderError::ReadPixels);
        }
        Ok((pixels, opts.width, opts.height, stride))
    }
}

pub fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn with_opacity(c: Color, opacity: f64) -> skia::Color {
    let a = (c.alpha_f() * opacity).clamp(0.0, 1.0);
    to_skia(c.with_alpha((a * 255.0).round() as u8))
}

fn fill_paint(s: &Style) -> Option<skia::Paint> {
    let c = s.fill?;
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(with_opacity(c, s.opacity * s.fill_opacity));
    Some(paint)
}

fn stroke_paint(s: &Style) -> Option<skia::Paint> {
    let c = s.stroke?;
    if s.stroke_width <= 0.0 {
        return None;
    }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(s.stroke_width as f32);
    paint.set_color(with_opacity(c, s.opacity));
    if let Some([on, off]) = s.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on as f32, off as f32], 0.0));
    }
    Some(paint)
}

/// Fill first, then stroke.
fn paints(s: &Style) -> impl Iterator<Item = skia::Paint> {
    fill_paint(s).into_iter().chain(stroke_paint(s))
}

fn to_skia_path(path: &Path) -> Option<skia::Path> {
    let (first, rest) = path.points.split_first()?;
    let mut p = skia::Path::new();
    p.move_to((first.x as f32, first.y as f32));
    for pt in rest {
        p.line_to((pt.x as f32, pt.y as f32));
    }
    if path.closed {
        p.close();
    }
    Some(p)
}
