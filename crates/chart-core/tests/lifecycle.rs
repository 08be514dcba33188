// File: crates/chart-core/tests/lifecycle.rs
// Purpose: Mount/unmount guards, dataset identity, resize subscriptions, and empty-data no-ops.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chart_core::{
    attach, BarChart, ChartInstance, ChartKind, ChartSurface, LineChart, PointerEvent, ProductRecord, RadarChart,
    Record, ResizeHub, Response, TreemapChart, Viewport,
};

fn sales() -> Vec<Record> {
    vec![Record::new("Q1", 120.0, "2024"), Record::new("Q2", 180.0, "2024")]
}

fn products() -> Vec<ProductRecord> {
    vec![
        ProductRecord::new("1", "Laptop", "Electronics", 1200.0, 999.0, 4.5),
        ProductRecord::new("2", "Desk", "Furniture", 300.0, 250.0, 3.0),
    ]
}

fn vp(w: f64, h: f64) -> Viewport {
    Viewport::new(w, h).unwrap()
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 100.0).is_err());
    assert!(Viewport::new(100.0, -1.0).is_err());
    assert!(Viewport::new(f64::NAN, 100.0).is_err());
    assert!(Viewport::new(1.0, 1.0).is_ok());
}

#[test]
fn rebuild_before_mount_is_skipped() {
    let mut chart = ChartInstance::new(BarChart::default(), sales());
    chart.rebuild();
    chart.resize(vp(300.0, 200.0));
    assert!(!chart.is_mounted());
    assert!(chart.scene().is_none());
    assert_eq!(chart.rebuild_count(), 0);
    assert_eq!(chart.pointer(PointerEvent::Leave), Response::None);
}

#[test]
fn mount_draws_and_unmount_releases() {
    let mut chart = ChartInstance::new(BarChart::default(), sales());
    chart.mount(vp(400.0, 300.0));
    assert_eq!(chart.rebuild_count(), 1);
    assert_eq!(chart.scene().unwrap().interactive().count(), 2);

    chart.unmount();
    assert!(chart.scene().is_none());
    chart.rebuild();
    assert_eq!(chart.rebuild_count(), 1);
}

#[test]
fn same_dataset_reference_does_not_rebuild() {
    let data: Arc<[Record]> = sales().into();
    let mut chart = ChartInstance::new(LineChart::default(), Arc::clone(&data));
    chart.mount(vp(400.0, 300.0));
    assert!(!chart.set_data(Arc::clone(&data)));
    assert_eq!(chart.rebuild_count(), 1);

    // equal contents, new reference: full rebuild
    assert!(chart.set_data(sales()));
    assert_eq!(chart.rebuild_count(), 2);
}

#[test]
fn data_change_replaces_scene() {
    let mut chart = ChartInstance::new(BarChart::default(), sales());
    chart.mount(vp(400.0, 300.0));
    let mut more = sales();
    more.push(Record::new("Q3", 90.0, "2024"));
    chart.set_data(more);
    assert_eq!(chart.scene().unwrap().interactive().count(), 3);

    chart.set_data(Vec::new());
    assert!(chart.scene().unwrap().is_empty());
    assert!(chart.model().is_none());
}

#[test]
fn empty_dataset_is_a_no_op_for_every_chart() {
    let viewport = vp(500.0, 400.0);
    let mut bar = ChartInstance::new(BarChart::default(), Vec::<Record>::new());
    let mut line = ChartInstance::new(LineChart::default(), Vec::<Record>::new());
    let mut radar = ChartInstance::new(RadarChart::default(), Vec::<ProductRecord>::new());
    let mut treemap = ChartInstance::new(TreemapChart::default(), Vec::<ProductRecord>::new());
    let surfaces: [&mut dyn ChartSurface; 4] = [&mut bar, &mut line, &mut radar, &mut treemap];
    for s in surfaces {
        s.mount(viewport);
        assert!(s.scene().unwrap().is_empty(), "{} drew something", s.kind());
        assert_eq!(s.pointer(PointerEvent::Move(chart_core::Point::new(250.0, 200.0))), Response::None);
        assert!(s.tooltip().is_none());
    }
}

#[test]
fn resize_rebuilds_through_the_hub() {
    let hub = ResizeHub::new();
    let chart = Rc::new(RefCell::new(ChartInstance::new(TreemapChart::default(), products())));
    chart.borrow_mut().mount(vp(900.0, 400.0));
    assert!(attach(&chart, &hub));
    assert_eq!(hub.listener_count(), 1);

    hub.emit(vp(600.0, 300.0));
    {
        let c = chart.borrow();
        assert_eq!(c.viewport(), Some(vp(600.0, 300.0)));
        assert_eq!(c.rebuild_count(), 2);
        assert_eq!(c.scene().unwrap().viewport, vp(600.0, 300.0));
    }

    chart.borrow_mut().unmount();
    assert_eq!(hub.listener_count(), 0);
    hub.emit(vp(300.0, 300.0));
    assert_eq!(chart.borrow().rebuild_count(), 2);
}

#[test]
fn busy_chart_reports_failed_attach() {
    let hub = ResizeHub::new();
    let chart = Rc::new(RefCell::new(ChartInstance::new(BarChart::default(), sales())));
    chart.borrow_mut().mount(vp(400.0, 300.0));
    let held = chart.borrow();
    assert!(!attach(&chart, &hub));
    assert_eq!(hub.listener_count(), 0);
    drop(held);
    assert!(attach(&chart, &hub));
    assert_eq!(hub.listener_count(), 1);
}

#[test]
fn dropping_a_chart_detaches_its_listener() {
    let hub = ResizeHub::new();
    {
        let chart = Rc::new(RefCell::new(ChartInstance::new(RadarChart::default(), products())));
        chart.borrow_mut().mount(vp(600.0, 500.0));
        attach(&chart, &hub);
        assert_eq!(hub.listener_count(), 1);
    }
    assert_eq!(hub.listener_count(), 0);
    hub.emit(vp(100.0, 100.0));
}

#[test]
fn hub_serves_mixed_surfaces() {
    let hub = ResizeHub::new();
    let charts: Vec<Rc<RefCell<dyn ChartSurface>>> = vec![
        Rc::new(RefCell::new(ChartInstance::new(BarChart::default(), sales()))),
        Rc::new(RefCell::new(ChartInstance::new(RadarChart::default(), products()))),
    ];
    for c in &charts {
        c.borrow_mut().mount(vp(400.0, 400.0));
        attach(c, &hub);
    }
    assert_eq!(hub.listener_count(), 2);
    hub.emit(vp(800.0, 500.0));
    for c in &charts {
        assert_eq!(c.borrow().scene().unwrap().viewport, vp(800.0, 500.0));
    }
    assert_eq!(charts[1].borrow().kind(), ChartKind::Radar);
    drop(charts);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn rebuild_clears_hover() {
    let mut chart = ChartInstance::new(BarChart::default(), sales());
    chart.mount(vp(400.0, 300.0));
    chart.pointer(PointerEvent::Move(chart_core::Point::new(120.0, 255.0)));
    assert!(chart.hovered().is_some());
    chart.resize(vp(410.0, 300.0));
    assert!(chart.hovered().is_none());
    assert!(chart.tooltip().is_none());
}
