// File: crates/chart-core/tests/scale.rs
// Purpose: Band and linear scale mapping, niced domains, and tick generation.

use chart_core::scale::{finite_max, tick_step};
use chart_core::{BandScale, LinearScale};
use proptest::prelude::*;

#[test]
fn two_bands_fill_the_range() {
    let band = BandScale::new(["A", "B"], (0.0, 100.0), 0.3);
    let bw = band.bandwidth();
    assert!((bw - (100.0 / 1.15) / 2.0).abs() < 1e-9);
    assert!((band.gutter() - 0.3 * bw).abs() < 1e-9);
    assert!((2.0 * bw + band.gutter() - 100.0).abs() < 1e-9);
    assert_eq!(band.map("A"), Some(0.0));
    let b = band.map("B").unwrap();
    assert!((b - band.step()).abs() < 1e-9);
    assert!((band.center("A").unwrap() - bw / 2.0).abs() < 1e-9);
}

#[test]
fn band_domain_is_distinct_in_first_seen_order() {
    let band = BandScale::new(["Mar", "Jan", "Mar", "Feb", "Jan"], (0.0, 300.0), 0.5);
    assert_eq!(band.domain(), ["Mar", "Jan", "Feb"]);
    assert_eq!(band.index_of("Feb"), Some(2));
    assert_eq!(band.map("Apr"), None);
}

#[test]
fn empty_band_scale_has_no_width() {
    let band = BandScale::new(Vec::<String>::new(), (0.0, 100.0), 0.3);
    assert!(band.is_empty());
    assert_eq!(band.bandwidth(), 0.0);
}

#[test]
fn nice_rounds_max_up_to_tick_multiple() {
    let s = LinearScale::new((0.0, 97.0), (400.0, 0.0)).nice(5);
    assert_eq!(s.domain(), (0.0, 100.0));
    assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

    let already_round = LinearScale::new((0.0, 20.0), (100.0, 0.0)).nice(5);
    assert_eq!(already_round.domain(), (0.0, 20.0));
}

#[test]
fn inverted_range_plots_larger_values_higher() {
    let s = LinearScale::new((0.0, 20.0), (180.0, 0.0));
    assert_eq!(s.map(0.0), 180.0);
    assert_eq!(s.map(20.0), 0.0);
    assert_eq!(s.map(10.0), 90.0);
    assert!((s.invert(45.0) - 15.0).abs() < 1e-9);
}

#[test]
fn degenerate_domain_widens() {
    let s = LinearScale::new((5.0, 5.0), (0.0, 10.0));
    assert_eq!(s.domain(), (5.0, 6.0));
    assert!(s.map(5.5).is_finite());
}

#[test]
fn missing_max_falls_back_to_unit_domain() {
    let s = LinearScale::from_max(finite_max([f64::NAN]), (0.0, 50.0));
    assert_eq!(s.domain(), (0.0, 1.0));
    assert_eq!(finite_max([3.0, f64::NAN, 7.0, 1.0]), Some(7.0));
}

#[test]
fn tick_steps_use_one_two_five() {
    assert_eq!(tick_step(0.0, 10.0, 5), 2.0);
    assert_eq!(tick_step(0.0, 100.0, 10), 10.0);
    assert!((tick_step(0.0, 1.0, 5) - 0.2).abs() < 1e-12);
    assert_eq!(tick_step(0.0, 20.0, 5), 5.0);
    assert_eq!(tick_step(3.0, 3.0, 5), 0.0);
}

proptest! {
    #[test]
    fn bands_are_uniform_and_span_the_range(
        n in 1usize..30,
        width in 1.0..5000.0f64,
        padding in 0.0..1.0f64,
    ) {
        let labels: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
        let band = BandScale::new(&labels, (0.0, width), padding);
        let total = n as f64 * band.bandwidth() + (n as f64 - 1.0) * band.gutter();
        prop_assert!((total - width).abs() < 1e-6 * width.max(1.0));
        for pair in labels.windows(2) {
            let d = band.map(&pair[1]).unwrap() - band.map(&pair[0]).unwrap();
            prop_assert!((d - band.step()).abs() < 1e-9 * width.max(1.0));
        }
    }

    #[test]
    fn niced_upper_bound_never_truncates_max(max in 1e-3..1e7f64, ticks in 2usize..12) {
        let s = LinearScale::from_max(Some(max), (500.0, 0.0)).nice(ticks);
        prop_assert!(s.domain().1 >= max);
        prop_assert_eq!(s.domain().0, 0.0);
    }
}
