//! Render-ready summaries of a filtered view.
//!
//! Each struct is recomputed from the base dataset whenever its page's
//! filters change; the UI only reads them.

use crate::data::aggregate::{
    cost_vs_rating, count_by, density_curve, shares, CategoryField, Histogram, ScatterSeries,
    Share, HISTOGRAM_BINS,
};
use crate::data::filter::{apply_all, rating_tier, top_n, FilterConfig};
use crate::data::model::{Restaurant, RestaurantDataset};

/// Highlighted cards on the explore page.
pub const TOP_PICKS: usize = 3;
/// Rows of the explore table.
pub const TABLE_ROWS: usize = 10;
/// Bars in the city chart.
pub const TOP_CITIES: usize = 20;
/// Slices in the cuisine pie.
pub const TOP_CUISINES: usize = 10;

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// `"4.6 🌟"`; missing ratings render as a dash.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{r:.1} {}", rating_tier(r).emoji()),
        None => "–".to_string(),
    }
}

/// Whole currency units behind the symbol, e.g. `"₹250"`.
pub fn format_cost(cost: Option<f64>, currency: &str) -> String {
    match cost {
        Some(c) => format!("{currency}{}", c.trunc() as i64),
        None => "–".to_string(),
    }
}

pub fn or_dash(text: Option<&str>) -> &str {
    text.unwrap_or("–")
}

// ---------------------------------------------------------------------------
// Explore page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExploreView {
    /// Size of the whole filtered set.
    pub total: usize,
    /// Best `TABLE_ROWS` by rating, then cost.
    pub top: Vec<Restaurant>,
}

impl ExploreView {
    pub fn compute(dataset: &RestaurantDataset, config: &FilterConfig) -> Self {
        let filtered = apply_all(dataset, config);
        ExploreView {
            total: filtered.len(),
            top: top_n(&filtered, TABLE_ROWS).into_iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn top_picks(&self) -> &[Restaurant] {
        &self.top[..self.top.len().min(TOP_PICKS)]
    }
}

// ---------------------------------------------------------------------------
// Dashboard page
// ---------------------------------------------------------------------------

/// Chart inputs. A chart whose column is absent stays `None` / empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub total: usize,
    pub rating_histogram: Option<Histogram>,
    /// KDE overlay in histogram count units.
    pub rating_density: Vec<[f64; 2]>,
    pub cost_vs_rating: Option<Vec<ScatterSeries>>,
    pub city_counts: Option<Vec<(String, usize)>>,
    pub cuisine_shares: Option<Vec<Share>>,
}

impl DashboardView {
    pub fn compute(dataset: &RestaurantDataset, config: &FilterConfig) -> Self {
        let schema = dataset.schema();
        let filtered = apply_all(dataset, config);

        let mut view = DashboardView {
            total: filtered.len(),
            ..Default::default()
        };
        if filtered.is_empty() {
            return view;
        }

        if schema.has_rating {
            let ratings: Vec<f64> = filtered.iter().filter_map(|r| r.rating).collect();
            view.rating_histogram = Histogram::from_values(&ratings, HISTOGRAM_BINS);
            if let Some(h) = &view.rating_histogram {
                view.rating_density = density_curve(&ratings, h.bin_width());
            }
        }
        if schema.has_rating && schema.has_cost {
            view.cost_vs_rating = Some(cost_vs_rating(&filtered, schema.has_cuisine));
        }
        if schema.has_city {
            view.city_counts = Some(count_by(&filtered, CategoryField::City, Some(TOP_CITIES)));
        }
        if schema.has_cuisine {
            let counts = count_by(&filtered, CategoryField::Cuisine, Some(TOP_CUISINES));
            view.cuisine_shares = Some(shares(&counts));
        }
        view
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
