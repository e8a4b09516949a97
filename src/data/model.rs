use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Restaurant – one row of the listing table
// ---------------------------------------------------------------------------

/// A single restaurant listing.
///
/// Optional columns (`city`, `rating`, `cost`, `cuisine`) are `None` both when
/// the column is absent from the source and when the cell itself is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub name: String,
    pub city: Option<String>,
    /// 0.0..=5.0
    pub rating: Option<f64>,
    /// Non-negative, currency applied at render time.
    pub cost: Option<f64>,
    pub cuisine: Option<String>,
    pub address: String,
}

// ---------------------------------------------------------------------------
// Schema – which optional columns the source provided
// ---------------------------------------------------------------------------

/// Column capabilities computed once at load time.
///
/// Filters and charts consult this instead of probing the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    pub has_city: bool,
    pub has_rating: bool,
    pub has_cost: bool,
    pub has_cuisine: bool,
}

#[cfg(test)]
impl Schema {
    /// Every optional column present.
    pub fn full() -> Self {
        Schema {
            has_city: true,
            has_rating: true,
            has_cost: true,
            has_cuisine: true,
        }
    }
}

// ---------------------------------------------------------------------------
// RestaurantDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The base dataset. Built once by the loader, then shared read-only.
#[derive(Debug, Clone)]
pub struct RestaurantDataset {
    records: Vec<Restaurant>,
    schema: Schema,
    cities: Vec<String>,
    cuisines: Vec<String>,
}

impl RestaurantDataset {
    /// Build the option lists from the loaded records.
    pub fn new(records: Vec<Restaurant>, schema: Schema) -> Self {
        let cities: BTreeSet<String> = records.iter().filter_map(|r| r.city.clone()).collect();
        let cuisines: BTreeSet<String> =
            records.iter().filter_map(|r| r.cuisine.clone()).collect();

        RestaurantDataset {
            records,
            schema,
            cities: cities.into_iter().collect(),
            cuisines: cuisines.into_iter().collect(),
        }
    }

    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Sorted unique non-missing cities.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Sorted unique non-missing cuisines.
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    /// Smallest cost in the table, if any row has one.
    pub fn min_cost(&self) -> Option<f64> {
        self.records
            .iter()
            .filter_map(|r| r.cost)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Number of restaurants.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn restaurant(name: &str, city: &str, rating: f64, cost: f64, cuisine: &str) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            city: Some(city.to_string()),
            rating: Some(rating),
            cost: Some(cost),
            cuisine: Some(cuisine.to_string()),
            address: format!("{name} street"),
        }
    }

    /// The three-row table used throughout the filter examples.
    pub fn sample_records() -> Vec<Restaurant> {
        vec![
            restaurant("first", "A", 4.6, 200.0, "X"),
            restaurant("second", "B", 4.6, 150.0, "Y"),
            restaurant("third", "A", 3.0, 100.0, "X"),
        ]
    }

    pub fn sample_dataset() -> RestaurantDataset {
        RestaurantDataset::new(sample_records(), Schema::full())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn option_lists_are_sorted_and_unique() {
        let ds = sample_dataset();
        assert_eq!(ds.cities(), ["A".to_string(), "B".to_string()]);
        assert_eq!(ds.cuisines(), ["X".to_string(), "Y".to_string()]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn min_cost_skips_missing_values() {
        let mut records = sample_records();
        records[2].cost = None;
        let ds = RestaurantDataset::new(records, Schema::full());
        assert_eq!(ds.min_cost(), Some(150.0));

        let empty = RestaurantDataset::new(Vec::new(), Schema::default());
        assert!(empty.is_empty());
        assert_eq!(empty.min_cost(), None);
    }
}
