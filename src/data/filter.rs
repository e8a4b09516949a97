use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::model::{Restaurant, RestaurantDataset};

// ---------------------------------------------------------------------------
// Filter configuration: one optional predicate per filterable column
// ---------------------------------------------------------------------------

/// Default rating floor on the explore page.
pub const EXPLORE_MIN_RATING: f64 = 3.0;
/// Default rating floor on the dashboard.
pub const DASHBOARD_MIN_RATING: f64 = 0.0;
/// Upper end of the rating scale.
pub const MAX_RATING: f64 = 5.0;
/// Granularity of the rating floor.
pub const RATING_STEP: f64 = 0.1;

fn snap_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Active predicates for one page.
///
/// An empty `cities` / `cuisines` set means "no constraint", not "match
/// nothing". Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub cities: BTreeSet<String>,
    pub min_rating: f64,
    pub min_cost: f64,
    pub cuisines: BTreeSet<String>,
}

impl FilterConfig {
    /// Defaults for the explore page.
    pub fn explore(dataset: &RestaurantDataset) -> Self {
        Self::with_min_rating(dataset, EXPLORE_MIN_RATING)
    }

    /// Defaults for the dashboard page.
    pub fn dashboard(dataset: &RestaurantDataset) -> Self {
        Self::with_min_rating(dataset, DASHBOARD_MIN_RATING)
    }

    fn with_min_rating(dataset: &RestaurantDataset, min_rating: f64) -> Self {
        FilterConfig {
            cities: BTreeSet::new(),
            min_rating,
            // Whole currency units, so the default never excludes the cheapest row.
            min_cost: dataset.min_cost().map(f64::floor).unwrap_or(0.0),
            cuisines: BTreeSet::new(),
        }
    }

    /// Set the rating floor, snapped to the nearest tenth.
    ///
    /// Slider arithmetic leaves values such as `4.6000000000000005`, which
    /// would exclude a record rated exactly `4.6`.
    pub fn set_min_rating(&mut self, value: f64) {
        self.min_rating = snap_to_tenth(value).clamp(0.0, MAX_RATING);
    }

    /// Set the cost floor. Only negatives are rejected: a floor above the
    /// most expensive record is valid and matches nothing.
    pub fn set_min_cost(&mut self, value: f64) {
        self.min_cost = value.max(0.0);
    }

    /// Toggle one value of a multi-select set.
    pub fn toggle(set: &mut BTreeSet<String>, value: &str) {
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Individual predicates
// ---------------------------------------------------------------------------

/// Keep records whose city is in `cities`. Empty set → identity.
pub fn filter_by_cities<'a>(
    records: Vec<&'a Restaurant>,
    cities: &BTreeSet<String>,
) -> Vec<&'a Restaurant> {
    if cities.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.city.as_ref().is_some_and(|c| cities.contains(c)))
        .collect()
}

/// Keep records rated at least `threshold`.
pub fn filter_by_min_rating(records: Vec<&Restaurant>, threshold: f64) -> Vec<&Restaurant> {
    records
        .into_iter()
        .filter(|r| r.rating.is_some_and(|v| v >= threshold))
        .collect()
}

/// Keep records costing at least `threshold`.
pub fn filter_by_min_cost(records: Vec<&Restaurant>, threshold: f64) -> Vec<&Restaurant> {
    records
        .into_iter()
        .filter(|r| r.cost.is_some_and(|v| v >= threshold))
        .collect()
}

/// Keep records whose cuisine is in `cuisines`. Empty set → identity.
pub fn filter_by_cuisines<'a>(
    records: Vec<&'a Restaurant>,
    cuisines: &BTreeSet<String>,
) -> Vec<&'a Restaurant> {
    if cuisines.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.cuisine.as_ref().is_some_and(|c| cuisines.contains(c)))
        .collect()
}

/// Apply every predicate the dataset's schema supports, in a fixed order.
///
/// A predicate over a column the source did not provide is skipped. The
/// result keeps the dataset's original relative order.
pub fn apply_all<'a>(dataset: &'a RestaurantDataset, config: &FilterConfig) -> Vec<&'a Restaurant> {
    let schema = dataset.schema();
    let mut view: Vec<&Restaurant> = dataset.records().iter().collect();

    if schema.has_city {
        view = filter_by_cities(view, &config.cities);
    }
    if schema.has_rating {
        view = filter_by_min_rating(view, config.min_rating);
    }
    if schema.has_cost {
        view = filter_by_min_cost(view, config.min_cost);
    }
    if schema.has_cuisine {
        view = filter_by_cuisines(view, &config.cuisines);
    }
    view
}

// ---------------------------------------------------------------------------
// Ordering and truncation
// ---------------------------------------------------------------------------

/// Rating descending, then cost ascending. Missing values sort last.
fn rating_then_cost(a: &Restaurant, b: &Restaurant) -> Ordering {
    missing_last(a.rating, b.rating, |x, y| y.total_cmp(&x))
        .then_with(|| missing_last(a.cost, b.cost, |x, y| x.total_cmp(&y)))
}

fn missing_last(a: Option<f64>, b: Option<f64>, cmp: impl Fn(f64, f64) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort: exact (rating, cost) ties keep their input order.
pub fn sort_by_rating_then_cost(records: &mut [&Restaurant]) {
    records.sort_by(|a, b| rating_then_cost(a, b));
}

/// The first `n` records of the rating/cost order.
pub fn top_n<'a>(records: &[&'a Restaurant], n: usize) -> Vec<&'a Restaurant> {
    let mut sorted = records.to_vec();
    sort_by_rating_then_cost(&mut sorted);
    sorted.truncate(n);
    sorted
}

// ---------------------------------------------------------------------------
// Rating tiers (display annotation only)
// ---------------------------------------------------------------------------

/// Ordinal display tier, 1 is best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RatingTier {
    /// >= 4.5
    Top = 1,
    /// 4.0..4.5
    Great = 2,
    /// 3.5..4.0
    Good = 3,
    /// < 3.5
    Fair = 4,
}

impl RatingTier {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            RatingTier::Top
        } else if rating >= 4.0 {
            RatingTier::Great
        } else if rating >= 3.5 {
            RatingTier::Good
        } else {
            RatingTier::Fair
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            RatingTier::Top => "🌟",
            RatingTier::Great => "👍",
            RatingTier::Good => "👌",
            RatingTier::Fair => "🙂",
        }
    }
}

/// Display tier of a rating.
pub fn rating_tier(rating: f64) -> RatingTier {
    RatingTier::from_rating(rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{restaurant, sample_dataset, sample_records};
    use crate::data::model::Schema;

    fn config(min_rating: f64, min_cost: f64) -> FilterConfig {
        FilterConfig {
            cities: BTreeSet::new(),
            min_rating,
            min_cost,
            cuisines: BTreeSet::new(),
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn names(records: &[&Restaurant]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn min_rating_example_sorts_cheaper_first_on_tie() {
        let ds = sample_dataset();
        let view = apply_all(&ds, &config(4.0, 0.0));
        assert_eq!(view.len(), 2);

        let top = top_n(&view, 10);
        assert_eq!(names(&top), ["second", "first"]);

        let first = top_n(&view, 1);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].cost, Some(150.0));
    }

    #[test]
    fn city_example_keeps_records_one_and_three() {
        let ds = sample_dataset();
        let mut cfg = config(0.0, 0.0);
        cfg.cities = set(&["A"]);
        assert_eq!(names(&apply_all(&ds, &cfg)), ["first", "third"]);
    }

    #[test]
    fn high_min_cost_yields_empty_view() {
        let ds = sample_dataset();
        assert!(apply_all(&ds, &config(0.0, 500.0)).is_empty());
    }

    #[test]
    fn empty_sets_are_identity() {
        let records = sample_records();
        let refs: Vec<&Restaurant> = records.iter().collect();
        assert_eq!(filter_by_cities(refs.clone(), &BTreeSet::new()), refs);
        assert_eq!(filter_by_cuisines(refs.clone(), &BTreeSet::new()), refs);
    }

    #[test]
    fn singleton_set_differs_from_empty_set() {
        let records = sample_records();
        let refs: Vec<&Restaurant> = records.iter().collect();
        let only_y = filter_by_cuisines(refs.clone(), &set(&["Y"]));
        assert_eq!(names(&only_y), ["second"]);
        assert_eq!(filter_by_cuisines(refs, &set(&["Z"])).len(), 0);
    }

    #[test]
    fn city_match_is_case_sensitive() {
        let records = sample_records();
        let refs: Vec<&Restaurant> = records.iter().collect();
        assert!(filter_by_cities(refs, &set(&["a"])).is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let records = sample_records();
        let refs: Vec<&Restaurant> = records.iter().collect();
        assert_eq!(filter_by_min_rating(refs.clone(), 4.6).len(), 2);
        assert_eq!(filter_by_min_cost(refs, 200.0).len(), 1);
    }

    #[test]
    fn stepped_rating_floor_keeps_record_at_that_tenth() {
        let ds = sample_dataset();
        for tenth in 0..=50 {
            let rating = tenth as f64 / 10.0;
            // Value a 0..=5 slider with step 0.1 stores for this position.
            let stepped = (rating / RATING_STEP).round() * RATING_STEP;

            let mut cfg = config(0.0, 0.0);
            cfg.set_min_rating(stepped);
            assert_eq!(cfg.min_rating, rating);

            let record = restaurant("exact", "A", rating, 100.0, "X");
            let kept = filter_by_min_rating(vec![&record], cfg.min_rating);
            assert_eq!(kept.len(), 1, "record rated {rating} dropped");
        }

        let mut cfg = FilterConfig::explore(&ds);
        cfg.set_min_rating(4.6000000000000005);
        assert_eq!(names(&apply_all(&ds, &cfg)), ["first", "second"]);
    }

    #[test]
    fn rating_floor_is_clamped_to_scale() {
        let mut cfg = config(0.0, 0.0);
        cfg.set_min_rating(7.3);
        assert_eq!(cfg.min_rating, MAX_RATING);
        cfg.set_min_rating(-1.0);
        assert_eq!(cfg.min_rating, 0.0);
    }

    #[test]
    fn cost_floor_above_max_cost_is_kept_and_matches_nothing() {
        let ds = sample_dataset();
        let mut cfg = FilterConfig::explore(&ds);
        cfg.set_min_cost(500.0);
        assert_eq!(cfg.min_cost, 500.0);
        assert!(apply_all(&ds, &cfg).is_empty());

        cfg.set_min_cost(-20.0);
        assert_eq!(cfg.min_cost, 0.0);
    }

    #[test]
    fn every_result_satisfies_every_predicate() {
        let records = vec![
            restaurant("a", "Pune", 4.1, 300.0, "Chinese"),
            restaurant("b", "Delhi", 3.9, 250.0, "North Indian"),
            restaurant("c", "Pune", 4.8, 800.0, "North Indian"),
            restaurant("d", "Goa", 2.5, 100.0, "Seafood"),
            restaurant("e", "Delhi", 4.5, 450.0, "Chinese"),
            restaurant("f", "Pune", 3.5, 200.0, "Seafood"),
        ];
        let ds = RestaurantDataset::new(records, Schema::full());

        let configs = [
            config(0.0, 0.0),
            config(3.5, 200.0),
            FilterConfig {
                cities: set(&["Pune", "Delhi"]),
                min_rating: 4.0,
                min_cost: 0.0,
                cuisines: set(&["Chinese"]),
            },
            FilterConfig {
                cities: set(&["Goa"]),
                min_rating: 0.0,
                min_cost: 150.0,
                cuisines: BTreeSet::new(),
            },
        ];

        for cfg in &configs {
            let view = apply_all(&ds, cfg);
            for r in &view {
                assert!(ds.records().contains(r));
                assert!(r.rating.unwrap() >= cfg.min_rating);
                assert!(r.cost.unwrap() >= cfg.min_cost);
                assert!(cfg.cities.is_empty() || cfg.cities.contains(r.city.as_ref().unwrap()));
                assert!(
                    cfg.cuisines.is_empty() || cfg.cuisines.contains(r.cuisine.as_ref().unwrap())
                );
            }
        }

        let view = apply_all(&ds, &configs[2]);
        assert_eq!(names(&view), ["a", "e"]);
    }

    #[test]
    fn predicate_order_does_not_matter() {
        let ds = sample_dataset();
        let all: Vec<&Restaurant> = ds.records().iter().collect();
        let cities = set(&["A", "B"]);
        let cuisines = set(&["X"]);

        let forward = filter_by_cuisines(
            filter_by_min_cost(
                filter_by_min_rating(filter_by_cities(all.clone(), &cities), 3.0),
                100.0,
            ),
            &cuisines,
        );
        let backward = filter_by_cities(
            filter_by_min_rating(
                filter_by_min_cost(filter_by_cuisines(all, &cuisines), 100.0),
                3.0,
            ),
            &cities,
        );
        assert_eq!(forward, backward);
    }

    #[test]
    fn absent_columns_are_not_filtered() {
        let mut records = sample_records();
        for r in &mut records {
            r.rating = None;
            r.city = None;
        }
        let schema = Schema {
            has_city: false,
            has_rating: false,
            ..Schema::full()
        };
        let ds = RestaurantDataset::new(records, schema);
        let mut cfg = config(4.0, 0.0);
        cfg.cities = set(&["A"]);
        assert_eq!(apply_all(&ds, &cfg).len(), 3);
    }

    #[test]
    fn missing_cell_fails_active_predicate() {
        let mut records = sample_records();
        records[0].rating = None;
        records[1].city = None;
        let ds = RestaurantDataset::new(records, Schema::full());
        assert_eq!(names(&apply_all(&ds, &config(0.0, 0.0))), ["second", "third"]);

        let mut cfg = config(0.0, 0.0);
        cfg.cities = set(&["A", "B"]);
        assert_eq!(names(&apply_all(&ds, &cfg)), ["third"]);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let records = vec![
            restaurant("x1", "A", 4.0, 100.0, "X"),
            restaurant("y", "A", 4.9, 300.0, "X"),
            restaurant("x2", "A", 4.0, 100.0, "X"),
            restaurant("z", "A", 4.0, 50.0, "X"),
            restaurant("x3", "A", 4.0, 100.0, "X"),
        ];
        let mut refs: Vec<&Restaurant> = records.iter().collect();
        sort_by_rating_then_cost(&mut refs);
        assert_eq!(names(&refs), ["y", "z", "x1", "x2", "x3"]);

        let once = refs.clone();
        sort_by_rating_then_cost(&mut refs);
        assert_eq!(refs, once);
    }

    #[test]
    fn top_n_is_prefix_of_sorted_order() {
        let records = sample_records();
        let refs: Vec<&Restaurant> = records.iter().collect();
        let full = top_n(&refs, usize::MAX);
        for n in 0..5 {
            let top = top_n(&refs, n);
            assert_eq!(top.len(), n.min(refs.len()));
            assert_eq!(top[..], full[..top.len()]);
        }
    }

    #[test]
    fn missing_rating_sorts_last() {
        let mut records = sample_records();
        records[1].rating = None;
        let refs: Vec<&Restaurant> = records.iter().collect();
        assert_eq!(names(&top_n(&refs, 3)), ["first", "third", "second"]);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(rating_tier(5.0), RatingTier::Top);
        assert_eq!(rating_tier(4.5), RatingTier::Top);
        assert_eq!(rating_tier(4.49), RatingTier::Great);
        assert_eq!(rating_tier(4.0), RatingTier::Great);
        assert_eq!(rating_tier(3.99), RatingTier::Good);
        assert_eq!(rating_tier(3.5), RatingTier::Good);
        assert_eq!(rating_tier(3.4), RatingTier::Fair);
        assert_eq!(rating_tier(0.0), RatingTier::Fair);
        assert_eq!(RatingTier::Top as u8, 1);
        assert_eq!(RatingTier::Fair as u8, 4);
        assert_eq!(RatingTier::Great.emoji(), "👍");
    }

    #[test]
    fn page_defaults() {
        let ds = sample_dataset();
        let explore = FilterConfig::explore(&ds);
        assert_eq!(explore.min_rating, 3.0);
        assert_eq!(explore.min_cost, 100.0);
        assert!(explore.cities.is_empty() && explore.cuisines.is_empty());
        assert_eq!(FilterConfig::dashboard(&ds).min_rating, 0.0);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut cities = BTreeSet::new();
        FilterConfig::toggle(&mut cities, "Pune");
        assert!(cities.contains("Pune"));
        FilterConfig::toggle(&mut cities, "Pune");
        assert!(cities.is_empty());
    }
}
