// File: crates/chart-render-skia/tests/rgba.rs
// Purpose: RGBA buffer shape, background pixels, hover emphasis, and tooltip overlay.

use chart_core::{
    BarChart, ChartInstance, ChartRenderer, Color, PointerEvent, Primitive, Rect, Record, Scene, Theme, Viewport,
};
use chart_core::geometry::{Emphasis, SourceRef};
use chart_render_skia::{Frame, RenderOptions, SkiaRenderer};

fn no_labels() -> RenderOptions {
    // avoid font variance
    RenderOptions { draw_labels: false, ..RenderOptions::default() }
}

fn pixel(px: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let i = y * stride + x * 4;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

#[test]
fn render_rgba8_buffer() {
    let data = [Record::new("A", 10.0, "2024"), Record::new("B", 20.0, "2024")];
    let scene = BarChart::default().render(&data, Viewport::default());
    let opts = no_labels();
    let (px, w, h, stride) = SkiaRenderer::new().render_to_rgba8(&opts, Frame::still(&scene)).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);
    // light theme background in the top-left corner
    assert_eq!(pixel(&px, stride, 0, 0), [255, 255, 255, 255]);
}

#[test]
fn hovered_fill_is_emphasized() {
    let mut scene = Scene::new(Viewport::new(40.0, 20.0).unwrap());
    let id = scene.push(
        Primitive::rect(Rect::from_xywh(0.0, 0.0, 20.0, 20.0))
            .fill(Color::rgb(0, 0, 0))
            .source(SourceRef::Record(0))
            .emphasis(Emphasis { fill: Some(Color::rgb(255, 0, 0)), ..Emphasis::default() }),
    );
    let opts = RenderOptions { width: 40, height: 20, ..no_labels() };
    let r = SkiaRenderer::new();

    let (still, _, _, stride) = r.render_to_rgba8(&opts, Frame::still(&scene)).unwrap();
    assert_eq!(pixel(&still, stride, 10, 10), [0, 0, 0, 255]);

    let (hot, _, _, _) = r.render_to_rgba8(&opts, Frame::still(&scene).hovering(Some(id), None)).unwrap();
    assert_eq!(pixel(&hot, stride, 10, 10), [255, 0, 0, 255]);
    assert_eq!(pixel(&hot, stride, 30, 10), [255, 255, 255, 255]);
}

#[test]
fn surface_scales_scene_to_its_size() {
    let mut scene = Scene::new(Viewport::new(10.0, 10.0).unwrap());
    scene.push(Primitive::rect(Rect::from_xywh(0.0, 0.0, 5.0, 10.0)).fill(Color::rgb(0, 0, 255)));
    let opts = RenderOptions { width: 100, height: 100, ..no_labels() };
    let (px, _, _, stride) = SkiaRenderer::new().render_to_rgba8(&opts, Frame::still(&scene)).unwrap();
    assert_eq!(pixel(&px, stride, 25, 50), [0, 0, 255, 255]);
    assert_eq!(pixel(&px, stride, 75, 50), [255, 255, 255, 255]);
}

#[test]
fn tooltip_overlay_draws_a_box() {
    let mut chart = ChartInstance::new(BarChart::default(), vec![Record::new("A", 10.0, "2024")]);
    chart.mount(Viewport::new(400.0, 300.0).unwrap());
    let (_, bar) = chart.scene().unwrap().interactive().next().unwrap();
    let chart_core::Shape::Rect { rect, .. } = bar.shape else { panic!("bar expected") };
    chart.pointer(PointerEvent::Move(chart_core::Point::new(rect.x + 2.0, rect.bottom() - 80.0)));
    let tip = chart.tooltip().expect("tooltip while hovering");

    let theme = Theme::dark();
    let opts = RenderOptions { width: 400, height: 300, theme, draw_labels: false };
    let scene = chart.scene().unwrap();
    let (px, _, _, stride) = SkiaRenderer::new()
        .render_to_rgba8(&opts, Frame::still(scene).hovering(chart.hovered(), Some(&tip)))
        .unwrap();
    // just inside the box's top-left corner, past the rounded corner and border
    let x = tip.position.x as usize + 6;
    let y = tip.position.y as usize + 6;
    let bg = theme.tooltip_background;
    assert_eq!(pixel(&px, stride, x, y), [bg.r, bg.g, bg.b, 255]);
}
