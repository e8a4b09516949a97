use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::CategoryColors;
use crate::data::filter::{filter_by_cities, filter_by_min_cost, filter_by_min_rating, FilterConfig};
use crate::data::model::{Restaurant, RestaurantDataset};
use crate::view::{DashboardView, ExploreView};

// ---------------------------------------------------------------------------
// Page selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Page {
    Explore,
    Dashboard,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Explore, Page::Dashboard];

    pub fn label(self) -> &'static str {
        match self {
            Page::Explore => "Explore Restaurants",
            Page::Dashboard => "Dashboard",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Base dataset, loaded once and never mutated.
    pub dataset: Arc<RestaurantDataset>,

    /// Page being shown.
    pub page: Page,

    /// Filters of the explore page.
    pub explore_filters: FilterConfig,

    /// Filters of the dashboard page, independent of the explore ones.
    pub dashboard_filters: FilterConfig,

    /// Explore page summary for `explore_filters` (cached).
    pub explore: ExploreView,

    /// Dashboard charts for `dashboard_filters` (cached).
    pub dashboard: DashboardView,

    /// Stable colour per cuisine.
    pub cuisine_colors: CategoryColors,

    /// Symbol printed in front of costs.
    pub currency: String,
}

impl AppState {
    pub fn new(dataset: Arc<RestaurantDataset>, page: Page, currency: String) -> Self {
        let explore_filters = FilterConfig::explore(&dataset);
        let dashboard_filters = FilterConfig::dashboard(&dataset);
        let explore = ExploreView::compute(&dataset, &explore_filters);
        let dashboard = DashboardView::compute(&dataset, &dashboard_filters);
        let cuisine_colors = CategoryColors::new(dataset.cuisines());

        Self {
            dataset,
            page,
            explore_filters,
            dashboard_filters,
            explore,
            dashboard,
            cuisine_colors,
            currency,
        }
    }

    /// Filters of the page being shown.
    pub fn filters(&self) -> &FilterConfig {
        match self.page {
            Page::Explore => &self.explore_filters,
            Page::Dashboard => &self.dashboard_filters,
        }
    }

    pub fn filters_mut(&mut self) -> &mut FilterConfig {
        match self.page {
            Page::Explore => &mut self.explore_filters,
            Page::Dashboard => &mut self.dashboard_filters,
        }
    }

    /// Switch pages. Each page keeps its own filters.
    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.refilter();
        }
    }

    /// Recompute the current page's view after a filter change.
    pub fn refilter(&mut self) {
        match self.page {
            Page::Explore => {
                self.explore = ExploreView::compute(&self.dataset, &self.explore_filters);
            }
            Page::Dashboard => {
                self.dashboard = DashboardView::compute(&self.dataset, &self.dashboard_filters);
            }
        }
        log::debug!(
            "{} filters {:?} matched {} restaurants",
            self.page.label(),
            self.filters(),
            self.visible_count()
        );
    }

    /// Restore the current page's defaults.
    pub fn reset_filters(&mut self) {
        let defaults = match self.page {
            Page::Explore => FilterConfig::explore(&self.dataset),
            Page::Dashboard => FilterConfig::dashboard(&self.dataset),
        };
        *self.filters_mut() = defaults;
        self.refilter();
    }

    /// Cuisine choices for the current page: the cuisines left by the
    /// filters drawn above the cuisine list, plus every cuisine already
    /// checked so it can still be unchecked.
    ///
    /// Explore lists cuisines after city, rating and cost; the dashboard
    /// after city only.
    pub fn cuisine_options(&self) -> Vec<String> {
        let schema = self.dataset.schema();
        let filters = self.filters();
        let mut rows: Vec<&Restaurant> = self.dataset.records().iter().collect();

        if schema.has_city {
            rows = filter_by_cities(rows, &filters.cities);
        }
        if self.page == Page::Explore {
            if schema.has_rating {
                rows = filter_by_min_rating(rows, filters.min_rating);
            }
            if schema.has_cost {
                rows = filter_by_min_cost(rows, filters.min_cost);
            }
        }

        let mut options: BTreeSet<String> =
            rows.iter().filter_map(|r| r.cuisine.clone()).collect();
        options.extend(filters.cuisines.iter().cloned());
        options.into_iter().collect()
    }

    /// Restaurants matching the current page's filters.
    pub fn visible_count(&self) -> usize {
        match self.page {
            Page::Explore => self.explore.total,
            Page::Dashboard => self.dashboard.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_dataset;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset()), Page::Explore, "₹".to_string())
    }

    #[test]
    fn initial_views_use_page_defaults() {
        let state = state();
        // Explore starts at rating 3.0, the dashboard at 0.0.
        assert_eq!(state.explore.total, 3);
        assert_eq!(state.dashboard.total, 3);
        assert_eq!(state.visible_count(), 3);
    }

    #[test]
    fn pages_keep_independent_filters() {
        let mut state = state();
        state.filters_mut().min_rating = 4.0;
        state.refilter();
        assert_eq!(state.visible_count(), 2);

        state.set_page(Page::Dashboard);
        assert_eq!(state.filters().min_rating, 0.0);
        assert_eq!(state.visible_count(), 3);

        state.set_page(Page::Explore);
        assert_eq!(state.filters().min_rating, 4.0);
        assert_eq!(state.visible_count(), 2);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = state();
        state.filters_mut().min_cost = 500.0;
        state.refilter();
        assert!(state.explore.is_empty());

        state.reset_filters();
        assert_eq!(state.explore_filters, FilterConfig::explore(&state.dataset));
        assert_eq!(state.visible_count(), 3);
    }

    #[test]
    fn cost_floor_above_every_cost_shows_no_matches() {
        let mut state = state();
        state.filters_mut().set_min_cost(500.0);
        state.refilter();
        assert_eq!(state.filters().min_cost, 500.0);
        assert!(state.explore.is_empty());
        assert_eq!(state.visible_count(), 0);
    }

    #[test]
    fn explore_cuisines_narrow_by_city_rating_and_cost() {
        let mut state = state();
        assert_eq!(state.cuisine_options(), ["X", "Y"]);

        state.filters_mut().cities.insert("A".to_string());
        assert_eq!(state.cuisine_options(), ["X"]);

        state.filters_mut().cities.clear();
        state.filters_mut().set_min_cost(160.0);
        assert_eq!(state.cuisine_options(), ["X"]);

        state.filters_mut().set_min_rating(4.7);
        assert!(state.cuisine_options().is_empty());
    }

    #[test]
    fn checked_cuisine_stays_listed() {
        let mut state = state();
        state.filters_mut().cuisines.insert("Y".to_string());
        state.filters_mut().cities.insert("A".to_string());
        assert_eq!(state.cuisine_options(), ["X", "Y"]);
    }

    #[test]
    fn dashboard_cuisines_narrow_by_city_only() {
        let mut state = state();
        state.set_page(Page::Dashboard);
        state.filters_mut().set_min_rating(4.7);
        assert_eq!(state.cuisine_options(), ["X", "Y"]);

        state.filters_mut().cities.insert("B".to_string());
        assert_eq!(state.cuisine_options(), ["Y"]);
    }
}
