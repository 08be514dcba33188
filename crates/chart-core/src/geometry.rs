// File: crates/chart-core/src/geometry.rs
// Summary: Drawable primitives (shapes + style), hover emphasis, enter transitions, and the retained scene.

use std::borrow::Cow;
use std::f64::consts::PI;

use crate::aggregate::RadarAxis;
use crate::theme::Color;
use crate::types::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Point at `radius` from `center` along `angle` (radians, y-down canvas).
    pub fn polar(center: Point, radius: f64, angle: f64) -> Self {
        Self::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self { Self::new(self.x + dx, self.y + dy) }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { x: left, y: top, width: right - left, height: bottom - top }
    }
    pub fn left(&self) -> f64 { self.x }
    pub fn top(&self) -> f64 { self.y }
    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }
    pub fn area(&self) -> f64 { self.width * self.height }

    /// Same rectangle with non-negative width and height.
    pub fn normalized(&self) -> Self {
        Self::from_ltrb(
            self.left().min(self.right()),
            self.top().min(self.bottom()),
            self.left().max(self.right()),
            self.top().max(self.bottom()),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        let r = self.normalized();
        p.x >= r.left() && p.x <= r.right() && p.y >= r.top() && p.y <= r.bottom()
    }
}

/// Polyline or polygon through `points` with straight segments.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Path {
    pub fn open(points: Vec<Point>) -> Self { Self { points, closed: false } }
    pub fn closed(points: Vec<Point>) -> Self { Self { points, closed: true } }

    /// Total stroke length, including the closing segment for polygons.
    pub fn length(&self) -> f64 {
        let mut len: f64 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        if self.closed && self.points.len() > 2 {
            len += self.points[self.points.len() - 1].distance(self.points[0]);
        }
        len
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    pub bold: bool,
    pub anchor: TextAnchor,
    /// Clockwise rotation in degrees around `position`.
    pub rotation: f64,
}

impl Text {
    pub fn new(position: Point, content: impl Into<String>, font_size: f64) -> Self {
        Self { position, content: content.into(), font_size, bold: false, anchor: TextAnchor::Start, rotation: 0.0 }
    }
    pub fn bold(mut self) -> Self { self.bold = true; self }
    pub fn anchor(mut self, anchor: TextAnchor) -> Self { self.anchor = anchor; self }
    pub fn rotated(mut self, degrees: f64) -> Self { self.rotation = degrees; self }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Circle,
    Line,
    Path,
    Text,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { rect: Rect, corner_radius: f64 },
    Circle { center: Point, radius: f64 },
    Line { from: Point, to: Point },
    Path(Path),
    Text(Text),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect { .. } => ShapeKind::Rect,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Path(_) => ShapeKind::Path,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    /// Area hit test; lines, paths, and text are never hit.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Shape::Rect { rect, .. } => rect.contains(p),
            Shape::Circle { center, radius } => center.distance(p) <= radius.abs(),
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    /// Dash pattern `[on, off]` in pixels.
    pub dash: Option<[f64; 2]>,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, opacity: 1.0, fill_opacity: 1.0, dash: None }
    }
}

/// Style overrides applied while a primitive is hovered.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Emphasis {
    pub opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub stroke_width: Option<f64>,
    pub radius: Option<f64>,
    pub fill: Option<Color>,
    pub duration_ms: u32,
}

/// Back-reference from a primitive to the datum it was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceRef {
    /// Index into the input record slice.
    Record(usize),
    /// Radar vertex: index into the aggregated categories plus the axis.
    Vertex { category: usize, axis: RadarAxis },
}

/// Starting state of an enter animation; the primitive's own geometry is the end state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Animated {
    /// Rect grows upward from a zero-height bar whose top sits at `baseline`.
    Grow { baseline: f64 },
    /// Circle radius grows from `from`.
    Radius { from: f64 },
    /// Stroke is revealed along its `length`.
    Reveal { length: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub start: Animated,
    pub duration_ms: u32,
    pub delay_ms: u32,
}

impl Transition {
    pub fn new(start: Animated, duration_ms: u32) -> Self {
        Self { start, duration_ms, delay_ms: 0 }
    }

    pub fn delayed(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn end_ms(&self) -> u32 { self.delay_ms.saturating_add(self.duration_ms) }

    /// Eased progress in `[0, 1]` at `elapsed_ms` (cubic in-out).
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let t = if self.duration_ms == 0 {
            if elapsed_ms >= self.delay_ms as f64 { 1.0 } else { 0.0 }
        } else {
            ((elapsed_ms - self.delay_ms as f64) / self.duration_ms as f64).clamp(0.0, 1.0)
        };
        let t2 = t * 2.0;
        if t2 <= 1.0 { t2 * t2 * t2 / 2.0 } else { ((t2 - 2.0).powi(3) + 2.0) / 2.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub style: Style,
    pub source: Option<SourceRef>,
    pub emphasis: Option<Emphasis>,
    pub enter: Option<Transition>,
}

impl Primitive {
    pub fn new(shape: Shape) -> Self {
        Self { shape, style: Style::default(), source: None, emphasis: None, enter: None }
    }
    pub fn rect(rect: Rect) -> Self { Self::new(Shape::Rect { rect, corner_radius: 0.0 }) }
    pub fn rounded_rect(rect: Rect, corner_radius: f64) -> Self { Self::new(Shape::Rect { rect, corner_radius }) }
    pub fn circle(center: Point, radius: f64) -> Self { Self::new(Shape::Circle { center, radius }) }
    pub fn line(from: Point, to: Point) -> Self { Self::new(Shape::Line { from, to }) }
    pub fn path(path: Path) -> Self { Self::new(Shape::Path(path)) }
    pub fn text(text: Text, color: Color) -> Self { Self::new(Shape::Text(text)).fill(color) }

    pub fn fill(mut self, color: Color) -> Self { self.style.fill = Some(color); self }
    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = width;
        self
    }
    pub fn fill_opacity(mut self, v: f64) -> Self { self.style.fill_opacity = v; self }
    pub fn opacity(mut self, v: f64) -> Self { self.style.opacity = v; self }
    pub fn dashed(mut self, on: f64, off: f64) -> Self { self.style.dash = Some([on, off]); self }
    pub fn source(mut self, source: SourceRef) -> Self { self.source = Some(source); self }
    pub fn emphasis(mut self, emphasis: Emphasis) -> Self { self.emphasis = Some(emphasis); self }
    pub fn enter(mut self, transition: Transition) -> Self { self.enter = Some(transition); self }

    pub fn kind(&self) -> ShapeKind { self.shape.kind() }

    pub fn is_interactive(&self) -> bool { self.source.is_some() }

    pub fn contains(&self, p: Point) -> bool { self.shape.contains(p) }

    /// Copy with the hover emphasis applied (or `self` when there is none).
    pub fn emphasized(&self) -> Cow<'_, Primitive> {
        let Some(e) = self.emphasis else { return Cow::Borrowed(self) };
        let mut p = self.clone();
        if let Some(v) = e.opacity { p.style.opacity = v; }
        if let Some(v) = e.fill_opacity { p.style.fill_opacity = v; }
        if let Some(v) = e.stroke_width { p.style.stroke_width = v; }
        if let Some(c) = e.fill { p.style.fill = Some(c); }
        if let (Some(r), Shape::Circle { radius, .. }) = (e.radius, &mut p.shape) { *radius = r; }
        Cow::Owned(p)
    }

    /// Geometry at `elapsed_ms` into the enter transition.
    pub fn at_time(&self, elapsed_ms: f64) -> Cow<'_, Primitive> {
        let Some(t) = self.enter else { return Cow::Borrowed(self) };
        if elapsed_ms >= t.end_ms() as f64 { return Cow::Borrowed(self); }
        let k = t.progress(elapsed_ms);
        let lerp = |a: f64, b: f64| a + (b - a) * k;
        let mut p = self.clone();
        match (t.start, &mut p.shape) {
            (Animated::Grow { baseline }, Shape::Rect { rect, .. }) => {
                let top = lerp(baseline, rect.y);
                rect.height = lerp(0.0, rect.height);
                rect.y = top;
            }
            (Animated::Radius { from }, Shape::Circle { radius, .. }) => {
                *radius = lerp(from, *radius);
            }
            (Animated::Reveal { length }, _) => {
                let shown = lerp(0.0, length);
                p.style.dash = Some([shown, (length - shown).max(0.0) + 1.0]);
            }
            _ => {}
        }
        Cow::Owned(p)
    }
}

/// Position of a primitive in a scene's draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub usize);

/// Retained drawable tree for one chart: primitives in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, primitives: Vec::new() }
    }

    pub fn push(&mut self, primitive: Primitive) -> PrimitiveId {
        self.primitives.push(primitive);
        PrimitiveId(self.primitives.len() - 1)
    }

    pub fn clear(&mut self) { self.primitives.clear(); }
    pub fn len(&self) -> usize { self.primitives.len() }
    pub fn is_empty(&self) -> bool { self.primitives.is_empty() }
    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> { self.primitives.get(id.0) }

    pub fn interactive(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives.iter().enumerate().filter(|(_, p)| p.is_interactive()).map(|(i, p)| (PrimitiveId(i), p))
    }

    pub fn count_kind(&self, kind: ShapeKind) -> usize {
        self.primitives.iter().filter(|p| p.kind() == kind).count()
    }

    /// Topmost interactive primitive under `p`.
    pub fn hit_test(&self, p: Point) -> Option<PrimitiveId> {
        self.primitives
            .iter()
            .enumerate()
            .rev()
            .find(|(_, prim)| prim.is_interactive() && prim.contains(p))
            .map(|(i, _)| PrimitiveId(i))
    }

    /// Latest end time of any enter transition, in ms.
    pub fn transition_end_ms(&self) -> u32 {
        self.primitives.iter().filter_map(|p| p.enter.map(|t| t.end_ms())).max().unwrap_or(0)
    }

    /// Primitives as they should be drawn: enter transitions sampled at
    /// `elapsed_ms` (final geometry when `None`), then hover emphasis on `hovered`.
    pub fn resolved(&self, hovered: Option<PrimitiveId>, elapsed_ms: Option<f64>) -> Vec<Cow<'_, Primitive>> {
        self.primitives
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let p = match elapsed_ms {
                    Some(ms) => p.at_time(ms),
                    None => Cow::Borrowed(p),
                };
                if hovered == Some(PrimitiveId(i)) {
                    Cow::Owned(p.emphasized().into_owned())
                } else {
                    p
                }
            })
            .collect()
    }
}

/// Full turn divided into `n` equal angular slices.
pub fn angle_slice(n: usize) -> f64 {
    2.0 * PI / n.max(1) as f64
}
