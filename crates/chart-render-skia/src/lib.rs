// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia backend for chart-core scenes; CPU raster to PNG/RGBA with tooltip overlay and shaped text.

pub mod raster;
pub mod text;

pub use raster::{to_skia, Frame, RenderError, RenderOptions, SkiaRenderer};
pub use text::TextShaper;
