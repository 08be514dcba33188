// File: crates/chart-core/src/scale.rs
// Summary: Band (category -> offset) and linear (value -> pixel) scales with niced domains.

use std::collections::HashSet;

/// Categorical scale mapping distinct labels to equal-width bands.
///
/// With `n` bands across width `W` and padding `p`:
/// `bandwidth = (W / (1 + p·(n−1)/n)) / n`, adjacent bands are separated by a
/// gutter of `p · bandwidth`, and `n·bandwidth + (n−1)·gutter == W`.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
    bandwidth: f64,
    gutter: f64,
}

impl BandScale {
    /// Build from labels; duplicates are dropped keeping first-seen order.
    pub fn new<I, S>(labels: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut domain = Vec::new();
        for label in labels {
            let label = label.as_ref();
            if seen.insert(label.to_string()) {
                domain.push(label.to_string());
            }
        }

        let padding = padding.clamp(0.0, 1.0);
        let n = domain.len() as f64;
        let width = range.1 - range.0;
        let bandwidth = if domain.is_empty() {
            0.0
        } else {
            (width / (1.0 + padding * (n - 1.0) / n)) / n
        };
        Self { domain, range, padding, bandwidth, gutter: padding * bandwidth }
    }

    #[inline]
    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    #[inline]
    pub fn gutter(&self) -> f64 { self.gutter }
    /// Distance between the starts of adjacent bands.
    #[inline]
    pub fn step(&self) -> f64 { self.bandwidth + self.gutter }
    pub fn padding(&self) -> f64 { self.padding }
    pub fn domain(&self) -> &[String] { &self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }
    pub fn len(&self) -> usize { self.domain.len() }
    pub fn is_empty(&self) -> bool { self.domain.is_empty() }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.domain.iter().position(|d| d == label)
    }

    /// Start offset of the band for `label`.
    pub fn map(&self, label: &str) -> Option<f64> {
        self.index_of(label).map(|i| self.range.0 + i as f64 * self.step())
    }

    /// Midpoint of the band for `label`.
    pub fn center(&self, label: &str) -> Option<f64> {
        self.map(label).map(|x| x + self.bandwidth * 0.5)
    }
}

/// Continuous scale `[d0, d1] -> [r0, r1]`. Monotonic; inverted ranges are
/// allowed (`[height, 0]` plots larger values higher).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, mut d1) = domain;
        if (d1 - d0).abs() < 1e-12 { d1 = d0 + 1.0; }
        Self { d0, d1, r0: range.0, r1: range.1 }
    }

    /// Scale for `[0, max]`; non-finite or missing maxima fall back to `[0, 1]`.
    pub fn from_max(max: Option<f64>, range: (f64, f64)) -> Self {
        Self::new((0.0, max.unwrap_or(1.0)), range)
    }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let span = self.r1 - self.r0;
        if span.abs() < 1e-12 { return self.d0; }
        self.d0 + (px - self.r0) / span * (self.d1 - self.d0)
    }

    pub fn domain(&self) -> (f64, f64) { (self.d0, self.d1) }
    pub fn range(&self) -> (f64, f64) { (self.r0, self.r1) }

    /// Extend the domain outward to multiples of the tick step for `count`
    /// ticks, repeating until the step settles.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = if self.d0 <= self.d1 { (self.d0, self.d1) } else { (self.d1, self.d0) };
        let original_stop = stop;
        let mut prestep = None;
        let mut last_step = 0.0;
        for _ in 0..10 {
            let step = tick_step(start, stop, count);
            if !(step > 0.0) || prestep == Some(step) { break; }
            if step >= 1.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                let inv = (1.0 / step).round();
                start = (start * inv).floor() / inv;
                stop = (stop * inv).ceil() / inv;
            }
            prestep = Some(step);
            last_step = step;
        }
        // keep the data max inside the domain
        if stop < original_stop { stop += last_step; }
        if self.d0 <= self.d1 { self.d0 = start; self.d1 = stop; } else { self.d0 = stop; self.d1 = start; }
        self
    }

    /// Spacing between the ticks [`ticks`](Self::ticks) would produce.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.d0.min(self.d1), self.d0.max(self.d1), count)
    }

    /// Round tick values spanning the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.d0 <= self.d1 { (self.d0, self.d1) } else { (self.d1, self.d0) };
        let step = self.tick_step(count);
        if !(step > 0.0) { return vec![lo]; }
        if step >= 1.0 {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|k| k as f64 * step).collect()
        } else {
            let inv = (1.0 / step).round();
            let first = (lo * inv).ceil() as i64;
            let last = (hi * inv).floor() as i64;
            (first..=last).map(|k| k as f64 / inv).collect()
        }
    }
}

/// Tick spacing `factor · 10^k` (factor in 1, 2, 5, 10) closest to
/// `(stop − start) / count`. Returns 0 for empty or non-finite spans.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if !(raw > 0.0) || !raw.is_finite() { return 0.0; }
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Largest finite value, if any.
pub fn finite_max<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}
