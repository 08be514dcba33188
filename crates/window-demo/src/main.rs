// File: crates/window-demo/src/main.rs
// Summary: Windowed dashboard viewer; RGBA blit (CPU) via winit + softbuffer with hover tooltips, click toasts, resize rebuilds, and enter animations.

use anyhow::{Context, Result};
use chart_core::{
    attach, BarChart, ChartInstance, ChartSurface, DashboardConfig, LineChart, Notification, Point, PointerEvent,
    ProductRecord, RadarChart, Record, ResizeHub, Response, Theme, TreemapChart, Viewport,
};
use chart_render_skia::{Frame, RenderOptions, SkiaRenderer};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const SALES_CSV: &str = include_str!("../../demo/data/sales.csv");
const MONTHLY_CSV: &str = include_str!("../../demo/data/monthly.csv");
const PRODUCTS_CSV: &str = include_str!("../../demo/data/products.csv");

type Surface = Rc<RefCell<dyn ChartSurface>>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional arg: dashboard TOML
    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::load(&path).with_context(|| format!("loading config '{path}'"))?,
        None => DashboardConfig::default(),
    };
    let theme = config.theme();

    // Last click notification, shown in the title bar
    let toast: Rc<RefCell<Option<String>>> = Rc::default();
    let charts = build_charts(&config, theme, &toast)?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Constellation Dashboard")
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 640.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    let hub = ResizeHub::new();
    let size = window.inner_size();
    let viewport = Viewport::new(size.width.max(1) as f64, size.height.max(1) as f64)?;
    for (i, chart) in charts.iter().enumerate() {
        chart.borrow_mut().mount(viewport);
        if !attach(chart, &hub) {
            warn!(chart = i, "chart busy; resize listener not attached");
        }
    }
    info!(charts = charts.len(), listeners = hub.listener_count(), "dashboard mounted; any key cycles charts");

    let renderer = SkiaRenderer::new();
    let mut idx = 0usize;
    let mut size = size;
    let mut cursor: Option<Point> = None;
    let mut shown_at = Instant::now();
    let mut shown_toast: Option<String> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    for chart in &charts {
                        chart.borrow_mut().unmount();
                    }
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                    match Viewport::new(size.width as f64, size.height as f64) {
                        Ok(vp) => hub.emit(vp),
                        Err(e) => warn!("ignoring resize: {e}"),
                    }
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let p = Point::new(position.x, position.y);
                    cursor = Some(p);
                    if pointer(&charts[idx], PointerEvent::Move(p)) != Response::None {
                        window.request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    cursor = None;
                    if pointer(&charts[idx], PointerEvent::Leave) != Response::None {
                        window.request_redraw();
                    }
                }
                WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                    if let Some(p) = cursor {
                        pointer(&charts[idx], PointerEvent::Click(p));
                    }
                }
                WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                    pointer(&charts[idx], PointerEvent::Leave);
                    idx = (idx + 1) % charts.len();
                    shown_at = Instant::now();
                    info!(chart = %charts[idx].borrow().kind(), "showing");
                    window.request_redraw();
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let latest = toast.borrow().clone();
                if latest != shown_toast {
                    if let Some(msg) = &latest {
                        window.set_title(&format!("Constellation Dashboard | {msg}"));
                    }
                    shown_toast = latest;
                }
            }
            Event::RedrawRequested(_) => {
                let (w, h) = (size.width.max(1), size.height.max(1));
                let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else { return };
                if let Err(e) = surface.resize(nw, nh) {
                    warn!("surface resize failed: {e}");
                    return;
                }

                let chart = charts[idx].borrow();
                let Some(scene) = chart.scene() else { return };
                let elapsed = shown_at.elapsed().as_secs_f64() * 1000.0;
                let animating = elapsed < scene.transition_end_ms() as f64;
                let tooltip = chart.tooltip();
                let mut frame = Frame::still(scene).hovering(chart.hovered(), tooltip.as_ref());
                if animating {
                    frame = frame.at(elapsed);
                }
                let opts = RenderOptions { width: w as i32, height: h as i32, theme, draw_labels: true };
                let rgba = match renderer.render_to_rgba8(&opts, frame) {
                    Ok((rgba, ..)) => rgba,
                    Err(e) => {
                        warn!("render failed: {e}");
                        return;
                    }
                };

                let mut buffer = match surface.buffer_mut() {
                    Ok(b) => b,
                    Err(e) => {
                        warn!("no frame buffer: {e}");
                        return;
                    }
                };
                // softbuffer pixels are 0RGB
                for (dst, px) in buffer.iter_mut().zip(rgba.chunks_exact(4)) {
                    *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
                }
                if let Err(e) = buffer.present() {
                    warn!("present error: {e}");
                }
                if animating {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    })
}

fn pointer(chart: &Surface, event: PointerEvent) -> Response {
    chart.borrow_mut().pointer(event)
}

fn build_charts(config: &DashboardConfig, theme: Theme, toast: &Rc<RefCell<Option<String>>>) -> Result<Vec<Surface>> {
    let sales: Vec<Record> = parse_rows(SALES_CSV).context("bundled sales.csv")?;
    let monthly: Vec<Record> = parse_rows(MONTHLY_CSV).context("bundled monthly.csv")?;
    let products: Vec<ProductRecord> = parse_rows(PRODUCTS_CSV).context("bundled products.csv")?;

    let notifier = |toast: &Rc<RefCell<Option<String>>>| {
        let toast = Rc::clone(toast);
        move |n: &Notification| {
            info!(category = %n.category, value = n.value, "{}", n.message);
            *toast.borrow_mut() = Some(n.message.clone());
        }
    };
    let charts: Vec<Surface> = vec![
        Rc::new(RefCell::new(
            ChartInstance::new(BarChart::new(config.bar.clone(), theme), sales).with_notifier(notifier(toast)),
        )),
        Rc::new(RefCell::new(
            ChartInstance::new(LineChart::new(config.line.clone(), theme), monthly).with_notifier(notifier(toast)),
        )),
        Rc::new(RefCell::new(
            ChartInstance::new(RadarChart::new(config.radar.clone(), theme), products.clone())
                .with_notifier(notifier(toast)),
        )),
        Rc::new(RefCell::new(
            ChartInstance::new(TreemapChart::new(config.treemap.clone(), theme), products).with_notifier(notifier(toast)),
        )),
    ];
    Ok(charts)
}

fn parse_rows<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, csv::Error> {
    csv::Reader::from_reader(text.as_bytes()).deserialize().collect()
}
