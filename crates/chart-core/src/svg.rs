// File: crates/chart-core/src/svg.rs
// Summary: Serialize a scene to standalone SVG markup.

use std::path::Path as FsPath;

use crate::error::ChartError;
use crate::geometry::{Path, Primitive, PrimitiveId, Rect, Scene, Shape, Style, TextAnchor};
use crate::theme::Color;

/// SVG document for `scene` with hover emphasis applied to `hovered`.
pub fn render_svg(scene: &Scene, background: Color, hovered: Option<PrimitiveId>) -> String {
    let (w, h) = (scene.viewport.width, scene.viewport.height);
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"Inter, sans-serif\">",
    ));
    svg.push_str(&format!("<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", background.to_hex()));
    for p in scene.resolved(hovered, None) {
        push_primitive(&mut svg, &p);
    }
    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg(path: impl AsRef<FsPath>, scene: &Scene, background: Color) -> Result<(), ChartError> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_svg(scene, background, None))?;
    Ok(())
}

fn push_primitive(svg: &mut String, p: &Primitive) {
    let style = style_attrs(&p.style);
    match &p.shape {
        Shape::Rect { rect, corner_radius } => {
            let r: Rect = rect.normalized();
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\"{style}/>",
                r.x, r.y, r.width, r.height, corner_radius
            ));
        }
        Shape::Circle { center, radius } => {
            svg.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"{style}/>",
                center.x, center.y, radius.max(0.0)
            ));
        }
        Shape::Line { from, to } => {
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"{style}/>",
                from.x, from.y, to.x, to.y
            ));
        }
        Shape::Path(path) => {
            if path.points.is_empty() {
                return;
            }
            svg.push_str(&format!("<path d=\"{}\"{style}/>", path_data(path)));
        }
        Shape::Text(t) => {
            let anchor = match t.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let weight = if t.bold { " font-weight=\"700\"" } else { "" };
            let rotate = if t.rotation != 0.0 {
                format!(" transform=\"rotate({} {:.2} {:.2})\"", t.rotation, t.position.x, t.position.y)
            } else {
                String::new()
            };
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.1}\" text-anchor=\"{anchor}\"{weight}{rotate}{style}>{}</text>",
                t.position.x,
                t.position.y,
                t.font_size.max(0.0),
                escape_xml(&t.content)
            ));
        }
    }
}

/// `M x y L x y ... [Z]`.
pub fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for (i, p) in path.points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        d.push_str(&format!("{cmd} {:.2} {:.2}", p.x, p.y));
    }
    if path.closed {
        d.push_str(" Z");
    }
    d
}

fn style_attrs(s: &Style) -> String {
    let mut out = String::new();
    match s.fill {
        Some(c) => {
            out.push_str(&format!(" fill=\"{}\"", c.to_hex()));
            let a = c.alpha_f() * s.fill_opacity;
            if a < 1.0 {
                out.push_str(&format!(" fill-opacity=\"{a:.3}\""));
            }
        }
        None => out.push_str(" fill=\"none\""),
    }
    if let Some(c) = s.stroke {
        out.push_str(&format!(" stroke=\"{}\" stroke-width=\"{}\"", c.to_hex(), s.stroke_width));
        if c.a < 255 {
            out.push_str(&format!(" stroke-opacity=\"{:.3}\"", c.alpha_f()));
        }
        if let Some([on, off]) = s.dash {
            out.push_str(&format!(" stroke-dasharray=\"{on} {off}\""));
        }
    }
    if s.opacity < 1.0 {
        out.push_str(&format!(" opacity=\"{}\"", s.opacity));
    }
    out
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
