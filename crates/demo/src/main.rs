// File: crates/demo/src/main.rs
// Summary: Batch demo; loads sales/monthly/product CSVs, lays out all four charts, writes SVG + PNG (plus a hovered PNG) per chart.

use anyhow::{Context, Result};
use chart_core::geometry::Primitive;
use chart_core::svg::write_svg;
use chart_core::{
    BarChart, ChartInstance, ChartSurface, DashboardConfig, LineChart, LogNotifier, Point, PointerEvent, ProductRecord,
    RadarChart, Record, Shape, Theme, TreemapChart, Viewport,
};
use chart_render_skia::{Frame, RenderOptions, SkiaRenderer};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const SALES_CSV: &str = include_str!("../data/sales.csv");
const MONTHLY_CSV: &str = include_str!("../data/monthly.csv");
const PRODUCTS_CSV: &str = include_str!("../data/products.csv");

struct Args {
    data_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    out_dir: PathBuf,
}

impl Args {
    /// `constellation-demo [DATA_DIR] [--config FILE] [--out DIR]`
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Args { data_dir: None, config: None, out_dir: PathBuf::from("target/out") };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(args.next().context("--config needs a file")?.into()),
                "--out" => parsed.out_dir = args.next().context("--out needs a directory")?.into(),
                _ if arg.starts_with("--") => anyhow::bail!("unknown flag {arg}"),
                _ => parsed.data_dir = Some(arg.into()),
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => DashboardConfig::load(path).with_context(|| format!("loading config '{}'", path.display()))?,
        None => DashboardConfig::default(),
    };
    let theme = config.theme();
    info!(theme = theme.name, "using theme");

    let sales: Vec<Record> = load_table(args.data_dir.as_deref(), "sales.csv", SALES_CSV)?;
    let monthly: Vec<Record> = load_table(args.data_dir.as_deref(), "monthly.csv", MONTHLY_CSV)?;
    let products: Vec<ProductRecord> = load_table(args.data_dir.as_deref(), "products.csv", PRODUCTS_CSV)?;
    info!(sales = sales.len(), monthly = monthly.len(), products = products.len(), "loaded datasets");

    let mut charts: Vec<Box<dyn ChartSurface>> = vec![
        Box::new(ChartInstance::new(BarChart::new(config.bar.clone(), theme), sales).with_notifier(LogNotifier)),
        Box::new(ChartInstance::new(LineChart::new(config.line.clone(), theme), monthly).with_notifier(LogNotifier)),
        Box::new(ChartInstance::new(RadarChart::new(config.radar.clone(), theme), products.clone()).with_notifier(LogNotifier)),
        Box::new(ChartInstance::new(TreemapChart::new(config.treemap.clone(), theme), products).with_notifier(LogNotifier)),
    ];

    let renderer = SkiaRenderer::new();
    let viewport = Viewport::new(900.0, 500.0)?;
    let mut failures = 0;
    for chart in charts.iter_mut() {
        let name = chart.kind().name();
        chart.mount(viewport);
        match write_outputs(chart.as_mut(), &renderer, &theme, &args.out_dir) {
            Ok(()) => info!(chart = name, dir = %args.out_dir.display(), "wrote outputs"),
            Err(e) => {
                failures += 1;
                error!(chart = name, "render failed: {e:#}");
            }
        }
        chart.unmount();
    }
    if failures > 0 {
        warn!(failures, "some charts failed to render");
    }
    Ok(())
}

/// `DIR/name` when a data directory was given and the file exists, else the bundled copy.
fn load_table<T: DeserializeOwned>(dir: Option<&Path>, name: &str, bundled: &str) -> Result<Vec<T>> {
    match dir.map(|d| d.join(name)).filter(|p| p.exists()) {
        Some(path) => {
            let mut rdr = csv::Reader::from_path(&path).with_context(|| format!("opening {}", path.display()))?;
            let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>();
            rows.with_context(|| format!("parsing {}", path.display()))
        }
        None => {
            let mut rdr = csv::Reader::from_reader(bundled.as_bytes());
            let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>();
            rows.with_context(|| format!("parsing bundled {name}"))
        }
    }
}

fn write_outputs(chart: &mut dyn ChartSurface, renderer: &SkiaRenderer, theme: &Theme, out_dir: &Path) -> Result<()> {
    let name = chart.kind().name();
    let scene = chart.scene().context("chart is not mounted")?;
    let opts = RenderOptions::for_scene(scene, *theme);

    write_svg(out_dir.join(format!("{name}.svg")), scene, theme.background)?;
    renderer.render_to_png(&opts, Frame::still(scene), out_dir.join(format!("{name}.png")))?;

    // Hover the first interactive primitive and capture it with its tooltip, then click it.
    let Some(target) = scene.interactive().find_map(|(_, p)| anchor_point(p)) else {
        return Ok(());
    };
    chart.pointer(PointerEvent::Move(target));
    let tooltip = chart.tooltip();
    let scene = chart.scene().context("chart is not mounted")?;
    let frame = Frame::still(scene).hovering(chart.hovered(), tooltip.as_ref());
    renderer.render_to_png(&opts, frame, out_dir.join(format!("{name}_hover.png")))?;
    chart.pointer(PointerEvent::Click(target));
    Ok(())
}

fn anchor_point(p: &Primitive) -> Option<Point> {
    match p.shape {
        Shape::Rect { rect, .. } => {
            let r = rect.normalized();
            Some(Point::new(r.x + r.width / 2.0, r.y + r.height / 2.0))
        }
        Shape::Circle { center, .. } => Some(center),
        _ => None,
    }
}
