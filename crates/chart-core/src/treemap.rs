// File: crates/chart-core/src/treemap.rs
// Summary: Treemap chart: summed category/product hierarchy laid out with squarified tiling and padded headers.

use tracing::debug;

use crate::aggregate::{build_hierarchy, HierarchyNode, NodeKind};
use crate::chart::{ChartKind, ChartRenderer};
use crate::config::TreemapConfig;
use crate::format;
use crate::geometry::{Emphasis, Point, Primitive, Rect, Scene, SourceRef, Text};
use crate::interaction::{Notification, TooltipContent};
use crate::theme::Theme;
use crate::types::{ProductRecord, Viewport};

/// Golden ratio, the target aspect ratio of squarified rows.
pub const PHI: f64 = 1.618_033_988_749_895;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreemapPadding {
    /// Left, right, and bottom padding inside every parent.
    pub outer: f64,
    /// Top padding inside every parent (room for its header).
    pub top: f64,
    /// Gap between siblings.
    pub inner: f64,
}

impl TreemapPadding {
    pub fn from_config(c: &TreemapConfig) -> Self {
        Self { outer: c.padding_outer, top: c.padding_top, inner: c.padding_inner }
    }
}

impl Default for TreemapPadding {
    fn default() -> Self {
        Self::from_config(&TreemapConfig::default())
    }
}

/// One laid-out hierarchy node (root included at depth 0).
#[derive(Clone, Debug, PartialEq)]
pub struct TreemapCell {
    pub depth: usize,
    pub name: String,
    pub value: f64,
    pub kind: NodeKind,
    /// Palette slot of the owning category (itself for category cells).
    pub category: Option<usize>,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Bounds {
    /// Inset each edge, collapsing to the midline when edges cross.
    fn inset(self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (self.x0 + left, self.y0 + top, self.x1 - right, self.y1 - bottom);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Self { x0, y0, x1, y1 }
    }

    fn rounded(self) -> Rect {
        Rect::from_ltrb(self.x0.round(), self.y0.round(), self.x1.round(), self.y1.round())
    }
}

/// Zero and NaN totals place children without extent.
fn nonzero(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

/// Squarified tiling of `values` (summing to `total`) into `area`; one box per value.
fn squarify(values: &[f64], total: f64, area: Bounds) -> Vec<Bounds> {
    let n = values.len();
    let mut out = vec![area; n];
    let Bounds { mut x0, mut y0, x1, y1 } = area;
    let mut remaining = total;
    let (mut i0, mut i1) = (0, 0);

    while i0 < n {
        let (dx, dy) = (x1 - x0, y1 - y0);

        // first non-empty value starts the row
        let mut sum;
        loop {
            sum = values[i1];
            i1 += 1;
            if nonzero(sum) || i1 >= n {
                break;
            }
        }
        let (mut min_v, mut max_v) = (sum, sum);
        let alpha = (dy / dx).max(dx / dy) / (remaining * PHI);
        let mut beta = sum * sum * alpha;
        let mut min_ratio = (max_v / beta).max(beta / min_v);

        while i1 < n {
            let v = values[i1];
            sum += v;
            min_v = min_v.min(v);
            max_v = max_v.max(v);
            beta = sum * sum * alpha;
            let ratio = (max_v / beta).max(beta / min_v);
            if ratio > min_ratio {
                sum -= v;
                break;
            }
            min_ratio = ratio;
            i1 += 1;
        }

        let row = &values[i0..i1];
        let row_boxes = &mut out[i0..i1];
        if dx < dy {
            // dice: a horizontal band across the top
            let band_y1 = if nonzero(remaining) { y0 + dy * sum / remaining } else { y1 };
            let k = if nonzero(sum) { dx / sum } else { 0.0 };
            let mut x = x0;
            for (b, &v) in row_boxes.iter_mut().zip(row) {
                let next = x + v * k;
                *b = Bounds { x0: x, y0, x1: next, y1: band_y1 };
                x = next;
            }
            if nonzero(remaining) {
                y0 = band_y1;
            }
        } else {
            // slice: a vertical band down the left
            let band_x1 = if nonzero(remaining) { x0 + dx * sum / remaining } else { x1 };
            let k = if nonzero(sum) { dy / sum } else { 0.0 };
            let mut y = y0;
            for (b, &v) in row_boxes.iter_mut().zip(row) {
                let next = y + v * k;
                *b = Bounds { x0, y0: y, x1: band_x1, y1: next };
                y = next;
            }
            if nonzero(remaining) {
                x0 = band_x1;
            }
        }
        remaining -= sum;
        i0 = i1;
    }
    out
}

/// Lay out a summed hierarchy inside a `width` x `height` box at `origin`.
/// Every level is padded, tiled by squarified rows, and rounded to whole pixels.
pub fn layout_hierarchy(root: &HierarchyNode, origin: Point, size: (f64, f64), padding: &TreemapPadding) -> Vec<TreemapCell> {
    let mut out = Vec::new();
    let area = Bounds { x0: 0.0, y0: 0.0, x1: size.0.max(0.0), y1: size.1.max(0.0) };
    position(root, area, 0, 0.0, None, padding, &mut out);
    for cell in &mut out {
        cell.rect.x += origin.x;
        cell.rect.y += origin.y;
    }
    out
}

fn position(
    node: &HierarchyNode,
    bounds: Bounds,
    depth: usize,
    pad: f64,
    category: Option<usize>,
    padding: &TreemapPadding,
    out: &mut Vec<TreemapCell>,
) {
    let b = bounds.inset(pad, pad, pad, pad);
    let category = match node.kind {
        NodeKind::Category { index } => Some(index),
        _ => category,
    };
    out.push(TreemapCell {
        depth,
        name: node.name.clone(),
        value: node.value,
        kind: node.kind,
        category,
        rect: b.rounded(),
    });
    if node.is_leaf() {
        return;
    }

    let half = padding.inner / 2.0;
    let inner = b.inset(padding.outer - half, padding.top - half, padding.outer - half, padding.outer - half);
    let values: Vec<f64> = node.children.iter().map(|c| c.value).collect();
    for (child, child_bounds) in node.children.iter().zip(squarify(&values, node.value, inner)) {
        position(child, child_bounds, depth + 1, half, category, padding, out);
    }
}

/// Records plus their summed, value-sorted hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct TreemapModel {
    pub records: Vec<ProductRecord>,
    pub root: HierarchyNode,
}

#[derive(Clone, Debug, Default)]
pub struct TreemapChart {
    pub config: TreemapConfig,
    pub theme: Theme,
}

impl TreemapChart {
    pub fn new(config: TreemapConfig, theme: Theme) -> Self {
        Self { config, theme }
    }

    pub fn cells(&self, model: &TreemapModel, viewport: Viewport) -> Vec<TreemapCell> {
        let m = &self.config.margin;
        let origin = Point::new(m.left as f64, m.top as f64);
        layout_hierarchy(&model.root, origin, viewport.inner(m), &TreemapPadding::from_config(&self.config))
    }

    fn record<'a>(&self, model: &'a TreemapModel, source: SourceRef) -> Option<&'a ProductRecord> {
        match source {
            SourceRef::Record(i) => model.records.get(i),
            SourceRef::Vertex { .. } => None,
        }
    }
}

impl ChartRenderer for TreemapChart {
    type Datum = ProductRecord;
    type Model = TreemapModel;

    fn kind(&self) -> ChartKind {
        ChartKind::Treemap
    }

    fn prepare(&self, data: &[ProductRecord]) -> TreemapModel {
        let mut root = build_hierarchy(data);
        root.sum();
        root.sort_by_value_desc();
        TreemapModel { records: data.to_vec(), root }
    }

    fn layout(&self, model: &TreemapModel, viewport: Viewport) -> Scene {
        let mut scene = Scene::new(viewport);
        if model.records.is_empty() {
            return scene;
        }
        let c = &self.config;
        let t = &self.theme;
        let cells = self.cells(model, viewport);

        for cell in cells.iter().filter(|cell| cell.depth == 1) {
            let color = t.color_for(cell.category.unwrap_or(0));
            let r = cell.rect;
            scene.push(
                Primitive::rounded_rect(Rect::from_xywh(r.x, r.y, r.width, c.padding_top), 3.0)
                    .fill(color)
                    .stroke(t.separator, 1.0),
            );
            let label = Text::new(Point::new(r.x + 8.0, r.y + 16.0), cell.name.as_str(), 12.0).bold();
            scene.push(Primitive::text(label, t.header_text));
        }

        let hover = Emphasis {
            fill_opacity: Some(1.0),
            stroke_width: Some(2.0),
            duration_ms: c.hover_ms,
            ..Emphasis::default()
        };
        let mut leaves = 0;
        for cell in &cells {
            let NodeKind::Leaf { record } = cell.kind else { continue };
            let color = t.color_for(cell.category.unwrap_or(0));
            let r = cell.rect;
            scene.push(
                Primitive::rounded_rect(r, 2.0)
                    .fill(color.brighter(c.brighten))
                    .stroke(color, 1.0)
                    .fill_opacity(c.fill_opacity)
                    .source(SourceRef::Record(record))
                    .emphasis(hover),
            );

            let font = (r.width / 10.0).min(r.height / 10.0).min(c.max_font_size);
            let name = format::truncate_label(&cell.name, r.width, c.truncate_below);
            scene.push(Primitive::text(Text::new(Point::new(r.x + 6.0, r.y + 14.0), name, font).bold(), t.text));
            if r.width > c.value_label_above {
                let value = Text::new(Point::new(r.x + 6.0, r.y + 28.0), format::currency_locale(cell.value), 13.0);
                scene.push(Primitive::text(value, t.muted_text));
            }
            leaves += 1;
        }
        debug!(categories = model.root.children.len(), leaves, total = model.root.value, "treemap layout");
        scene
    }

    fn tooltip(&self, model: &TreemapModel, source: SourceRef) -> TooltipContent {
        match self.record(model, source) {
            Some(r) => TooltipContent::new(&r.name)
                .line(format!("Category: {}", r.category))
                .line(format!("Value: {}", format::currency_locale(r.value)))
                .line(format!("Price: ${}", format::plain(r.price)))
                .line(format!("Rating: {} / 5", format::plain(r.rating))),
            None => TooltipContent::default(),
        }
    }

    fn notification(&self, model: &TreemapModel, source: SourceRef) -> Option<Notification> {
        self.record(model, source).map(|r| Notification::new(&r.category, r.value))
    }
}
