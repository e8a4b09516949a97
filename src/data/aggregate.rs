use std::collections::{BTreeMap, HashMap};

use super::model::Restaurant;

/// Bin count of the dashboard rating histogram.
pub const HISTOGRAM_BINS: usize = 20;
/// Sample points along the density curve.
const DENSITY_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// A categorical column that can be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    City,
    Cuisine,
}

impl CategoryField {
    fn value(self, record: &Restaurant) -> Option<&str> {
        match self {
            CategoryField::City => record.city.as_deref(),
            CategoryField::Cuisine => record.cuisine.as_deref(),
        }
    }
}

/// Count records per category value.
///
/// Ordered by count descending, ties by name ascending. Missing values are
/// not counted. `top_n = None` keeps every category.
pub fn count_by(
    records: &[&Restaurant],
    field: CategoryField,
    top_n: Option<usize>,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records {
        if let Some(v) = field.value(r) {
            *counts.entry(v).or_default() += 1;
        }
    }

    let mut pairs: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if let Some(n) = top_n {
        pairs.truncate(n);
    }
    pairs
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: usize,
    /// Percentage of the slices passed in, 0..=100.
    pub percent: f64,
}

/// Turn counts into percentages of their own total.
pub fn shares(counts: &[(String, usize)]) -> Vec<Share> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .iter()
        .map(|(label, count)| Share {
            label: label.clone(),
            count: *count,
            percent: if total == 0 {
                0.0
            } else {
                *count as f64 * 100.0 / total as f64
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rating distribution
// ---------------------------------------------------------------------------

/// Equal-width histogram. `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin equal-width over the value range; the last bin is right-closed.
    ///
    /// Returns `None` for an empty input. A single distinct value is
    /// centred in a range of width 1.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;

        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Some(Histogram { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// `(centre, count)` per bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| ((w[0] + w[1]) / 2.0, c))
    }
}

fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

/// Gaussian kernel density estimate scaled to histogram counts.
///
/// Bandwidth follows Scott's rule. The unbounded curve integrates to
/// `values.len() * bin_width`; only the data range is sampled. Empty when
/// there are fewer than two points or no spread.
pub fn density_curve(values: &[f64], bin_width: f64) -> Vec<[f64; 2]> {
    if values.len() < 2 {
        return Vec::new();
    }
    let std = sample_std(values);
    if std.is_nan() || std <= 0.0 {
        return Vec::new();
    }
    let n = values.len() as f64;
    let bandwidth = std * n.powf(-0.2);
    let norm = 1.0 / (bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n * bin_width;

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (DENSITY_POINTS - 1) as f64;

    (0..DENSITY_POINTS)
        .map(|i| {
            let x = lo + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            [x, scale * norm * sum / n]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cost vs rating
// ---------------------------------------------------------------------------

/// Scatter points of one cuisine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    /// `[cost, rating]`
    pub points: Vec<[f64; 2]>,
}

/// Label of the single series used when there is no cuisine column.
pub const ALL_SERIES: &str = "All";

/// Group `(cost, rating)` points by cuisine, series sorted by name.
///
/// Records missing cost or rating are skipped. With `by_cuisine == false`
/// everything lands in one series.
pub fn cost_vs_rating(records: &[&Restaurant], by_cuisine: bool) -> Vec<ScatterSeries> {
    let mut groups: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for r in records {
        let (Some(cost), Some(rating)) = (r.cost, r.rating) else {
            continue;
        };
        let label = if by_cuisine {
            match r.cuisine.as_deref() {
                Some(c) => c,
                None => continue,
            }
        } else {
            ALL_SERIES
        };
        groups.entry(label).or_default().push([cost, rating]);
    }
    groups
        .into_iter()
        .map(|(label, points)| ScatterSeries {
            label: label.to_string(),
            points,
        })
        .collect()
}
