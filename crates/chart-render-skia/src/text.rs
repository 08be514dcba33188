// File: crates/chart-render-skia/src/text.rs
// Summary: Text shaper using Skia textlayout; measures and paints anchored, rotated labels.

use chart_core::geometry::{Text, TextAnchor};
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};
use skia_safe as skia;

const SANS: [&str; 6] = ["Inter", "Segoe UI", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&SANS);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT, bold).longest_line()
    }

    /// Paint `text` with its position as the baseline anchor point.
    pub fn draw(&self, canvas: &skia::Canvas, text: &Text, color: skia::Color) {
        let size = text.font_size as f32;
        if size <= 0.0 || text.content.is_empty() {
            return;
        }
        let p = self.layout(&text.content, size, color, text.bold);
        let width = p.longest_line();
        let dx = match text.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -width / 2.0,
            TextAnchor::End => -width,
        };
        let (x, y) = (text.position.x as f32, text.position.y as f32);
        canvas.save();
        if text.rotation != 0.0 {
            canvas.rotate(text.rotation as f32, Some(skia::Point::new(x, y)));
        }
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x + dx, y - size * 0.8));
        canvas.restore();
    }
}
