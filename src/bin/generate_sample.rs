use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, column order matches the viewer's expected header.
#[derive(Serialize)]
struct Row {
    name: String,
    city: &'static str,
    rating: f64,
    cost: u32,
    cuisine: &'static str,
    address: String,
}

const CITIES: [&str; 8] = [
    "Bangalore",
    "Chennai",
    "Delhi",
    "Hyderabad",
    "Kolkata",
    "Mumbai",
    "Pune",
    "Jaipur",
];

const CUISINES: [&str; 12] = [
    "North Indian",
    "South Indian",
    "Chinese",
    "Biryani",
    "Pizzas",
    "Desserts",
    "Beverages",
    "Fast Food",
    "Street Food",
    "Bakery",
    "Continental",
    "Kebabs",
];

const NAME_PREFIXES: [&str; 10] = [
    "Spice", "Royal", "Golden", "Urban", "Tandoor", "Masala", "Curry", "Coastal", "Saffron",
    "Namma",
];

const NAME_SUFFIXES: [&str; 8] = [
    "Kitchen", "House", "Corner", "Dhaba", "Bistro", "Express", "Cafe", "Point",
];

const STREETS: [&str; 6] = [
    "MG Road",
    "Station Road",
    "Park Street",
    "Church Street",
    "Ring Road",
    "Lake View",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.below(items.len())]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_restaurants.csv";
    let n_rows = 500;

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for i in 0..n_rows {
        let city = rng.pick(&CITIES);
        // Ratings 2.5..=5.0 in tenths, costs 100..=1500 in steps of 50.
        let rating = (25 + rng.below(26)) as f64 / 10.0;
        let cost = 100 + 50 * rng.below(29) as u32;

        let row = Row {
            name: format!(
                "{} {}",
                rng.pick(&NAME_PREFIXES),
                rng.pick(&NAME_SUFFIXES)
            ),
            city,
            rating,
            cost,
            cuisine: rng.pick(&CUISINES),
            address: format!("{} {}, {city}", i + 1, rng.pick(&STREETS)),
        };
        writer.serialize(&row).context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} restaurants to {output_path}");
    Ok(())
}
