// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (input records, viewport, insets).

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Default surface width in pixels.
pub const WIDTH: u32 = 900;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 450;

/// Sales row consumed by the bar and line charts.
///
/// The line chart reads monthly series; a `month` column deserializes into
/// `category` so both charts share one record shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(alias = "month")]
    pub category: String,
    pub value: f64,
    #[serde(default)]
    pub year: String,
}

impl Record {
    pub fn new(category: impl Into<String>, value: f64, year: impl Into<String>) -> Self {
        Self { category: category.into(), value, year: year.into() }
    }
}

/// Product row consumed by the radar and treemap charts. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub price: f64,
    pub rating: f64,
    #[serde(default)]
    pub year: String,
}

impl ProductRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        value: f64,
        price: f64,
        rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            value,
            price,
            rating,
            year: String::new(),
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }
}

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    pub const fn uniform(all: u32) -> Self {
        Self::new(all, all, all, all)
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(60, 20, 20, 40)
    }
}

/// Pixel size of the host container, read at rebuild time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Validate host dimensions; both must be finite and strictly positive.
    pub fn new(width: f64, height: f64) -> Result<Self, ChartError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ChartError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Plot area size after removing `insets`, floored at zero.
    pub fn inner(&self, insets: &Insets) -> (f64, f64) {
        (
            (self.width - insets.hsum() as f64).max(0.0),
            (self.height - insets.vsum() as f64).max(0.0),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: WIDTH as f64, height: HEIGHT as f64 }
    }
}
