// File: crates/chart-core/src/aggregate.rs
// Summary: Per-category averages for the radar chart and the two-level hierarchy for the treemap.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::format;
use crate::types::ProductRecord;

/// Radar axes, in their fixed angular order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadarAxis {
    Rating,
    Price,
    Value,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 3] = [RadarAxis::Rating, RadarAxis::Price, RadarAxis::Value];

    pub fn index(self) -> usize {
        match self {
            RadarAxis::Rating => 0,
            RadarAxis::Price => 1,
            RadarAxis::Value => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RadarAxis::Rating => "Rating",
            RadarAxis::Price => "Price",
            RadarAxis::Value => "Value",
        }
    }

    /// Domain max used when every category averages zero on this axis.
    pub fn fallback_max(self) -> f64 {
        match self {
            RadarAxis::Rating => 5.0,
            RadarAxis::Price => 500.0,
            RadarAxis::Value => 10_000.0,
        }
    }

    /// Rating keeps one decimal; price and value are whole dollars.
    pub fn format_value(self, v: f64) -> String {
        match self {
            RadarAxis::Rating => format::one_decimal(v),
            RadarAxis::Price | RadarAxis::Value => format::currency_whole(v),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedCategory {
    pub category: String,
    pub avg_rating: f64,
    pub avg_price: f64,
    pub avg_value: f64,
    pub count: usize,
}

impl AggregatedCategory {
    pub fn value(&self, axis: RadarAxis) -> f64 {
        match axis {
            RadarAxis::Rating => self.avg_rating,
            RadarAxis::Price => self.avg_price,
            RadarAxis::Value => self.avg_value,
        }
    }
}

/// Group by category (first-seen order) and average rating, price, value.
pub fn aggregate_by_category(records: &[ProductRecord]) -> Vec<AggregatedCategory> {
    struct Acc<'a> {
        category: &'a str,
        rating: f64,
        price: f64,
        value: f64,
        count: usize,
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Acc<'_>> = Vec::new();
    for r in records {
        let slot = *index.entry(r.category.as_str()).or_insert_with(|| {
            groups.push(Acc { category: &r.category, rating: 0.0, price: 0.0, value: 0.0, count: 0 });
            groups.len() - 1
        });
        let g = &mut groups[slot];
        g.rating += r.rating;
        g.price += r.price;
        g.value += r.value;
        g.count += 1;
    }

    groups
        .into_iter()
        .map(|g| {
            // every group holds at least the record that created it
            let n = g.count as f64;
            AggregatedCategory {
                category: g.category.to_string(),
                avg_rating: g.rating / n,
                avg_price: g.price / n,
                avg_value: g.value / n,
                count: g.count,
            }
        })
        .collect()
}

/// Distinct categories in first-seen order.
pub fn distinct_categories<'a, I>(categories: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<&str> = Vec::new();
    for c in categories {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// `index` is the category's first-seen position (its palette slot).
    Category { index: usize },
    /// `record` indexes the input slice.
    Leaf { record: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    pub value: f64,
    pub kind: NodeKind,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Recompute every interior value as the sum of its leaves; returns the root total.
    pub fn sum(&mut self) -> f64 {
        if !self.is_leaf() {
            self.value = self.children.iter_mut().map(HierarchyNode::sum).sum();
        }
        self.value
    }

    /// Sort every level by value, largest first (stable for ties).
    pub fn sort_by_value_desc(&mut self) {
        self.children.sort_by(|a, b| b.value.total_cmp(&a.value));
        for c in &mut self.children {
            c.sort_by_value_desc();
        }
    }

    pub fn leaves(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a HierarchyNode>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            for c in &self.children {
                c.collect_leaves(out);
            }
        }
    }
}

/// Root -> categories (first-seen) -> products (input order). Interior values
/// start at zero; call [`HierarchyNode::sum`] before layout.
pub fn build_hierarchy(records: &[ProductRecord]) -> HierarchyNode {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<HierarchyNode> = Vec::new();
    for (i, r) in records.iter().enumerate() {
        let slot = *index.entry(r.category.as_str()).or_insert_with(|| {
            categories.push(HierarchyNode {
                name: r.category.clone(),
                value: 0.0,
                kind: NodeKind::Category { index: categories.len() },
                children: Vec::new(),
            });
            categories.len() - 1
        });
        categories[slot].children.push(HierarchyNode {
            name: r.name.clone(),
            value: r.value,
            kind: NodeKind::Leaf { record: i },
            children: Vec::new(),
        });
    }
    HierarchyNode { name: "root".to_string(), value: 0.0, kind: NodeKind::Root, children: categories }
}
