//! Seeded fixture generation.
//!
//! Produces commerce and person data for request bodies. Every value comes
//! from a single `StdRng`, so a given seed always yields the same fixtures
//! in the same order.

use std::cmp::Ordering;

use probe_application::ports::DataFactory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Licensed", "Refined",
    "Tasty", "Elegant", "Modern", "Recycled", "Bespoke", "Luxurious",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal",
    "Soft", "Fresh", "Frozen", "Bronze", "Silk", "Marble", "Gold",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants",
    "Shirt", "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish",
    "Cheese", "Bacon", "Pizza", "Salad", "Sausages", "Chips",
];

const DESCRIPTIONS: &[&str] = &[
    "The beautiful range of apple naturalé that has an exciting mix of natural ingredients.",
    "New range of formal shirts are designed keeping you in mind.",
    "The slim and simple Maple Gaming Keyboard from Dev Byte comes with a sleek body.",
    "Carbonite web goalkeeper gloves are ergonomically designed to give easy fit.",
    "Boston's most advanced compression wear technology increases muscle oxygenation.",
    "The Football Is Good For Training And Recreational Purposes.",
    "Andy shoes are designed to keeping in mind durability as well as trends.",
    "Ergonomic executive chair upholstered in bonded black leather and PVC padded seat.",
    "The automobile layout consists of a front-engine design with transaxle-type transmissions.",
    "Innovative new design for an everyday product.",
];

const DEPARTMENTS: &[&str] = &[
    "Books", "Movies", "Music", "Games", "Electronics", "Computers", "Home", "Garden",
    "Tools", "Grocery", "Health", "Beauty", "Toys", "Kids", "Baby", "Clothing", "Shoes",
    "Jewelery", "Sports", "Outdoors", "Automotive", "Industrial",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "and Sons"];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda",
    "William", "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Thomas", "Sarah", "Charles", "Karen", "Emma", "Olivia", "Liam", "Noah", "Ava",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// `DataFactory` backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededDataFactory {
    rng: StdRng,
    seed: u64,
}

impl SeededDataFactory {
    /// Creates a factory that replays the same values for the same seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a factory with a seed drawn from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// The seed in use, for logging and replay.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.random_range(0..items.len())]
    }
}

impl DataFactory for SeededDataFactory {
    fn product_name(&mut self) -> String {
        let adjective = self.pick(ADJECTIVES);
        let material = self.pick(MATERIALS);
        let product = self.pick(PRODUCTS);
        format!("{adjective} {material} {product}")
    }

    fn product_description(&mut self) -> String {
        self.pick(DESCRIPTIONS).to_string()
    }

    fn price(&mut self, min: u32, max: u32) -> f64 {
        let (low, high) = ordered(min.saturating_mul(100), max.saturating_mul(100));
        let cents = self.rng.random_range(low..=high);
        f64::from(cents) / 100.0
    }

    fn float(&mut self, min: f64, max: f64, fraction_digits: u32) -> f64 {
        if min.partial_cmp(&max) != Some(Ordering::Less) {
            return min;
        }
        let value = self.rng.random_range(min..=max);
        let factor = 10_f64.powi(i32::try_from(fraction_digits).unwrap_or(i32::MAX));
        ((value * factor).round() / factor).clamp(min, max)
    }

    fn int(&mut self, min: i64, max: i64) -> i64 {
        let (low, high) = ordered(min, max);
        self.rng.random_range(low..=high)
    }

    fn company_name(&mut self) -> String {
        let name = self.pick(LAST_NAMES);
        if self.rng.random_bool(0.3) {
            let partner = self.pick(LAST_NAMES);
            format!("{name}, {partner} and Partners")
        } else {
            let suffix = self.pick(COMPANY_SUFFIXES);
            format!("{name} {suffix}")
        }
    }

    fn department(&mut self) -> String {
        self.pick(DEPARTMENTS).to_string()
    }

    fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    fn email(&mut self) -> String {
        let first = self.pick(FIRST_NAMES).to_lowercase();
        let last = self.pick(LAST_NAMES).to_lowercase();
        let number = self.rng.random_range(1..100);
        let domain = self.pick(EMAIL_DOMAINS);
        format!("{first}.{last}{number}@{domain}")
    }

    fn phone_number(&mut self) -> String {
        let area = self.rng.random_range(200..1000);
        let exchange = self.rng.random_range(200..1000);
        let line = self.rng.random_range(0..10_000);
        format!("+1 {area}-{exchange}-{line:04}")
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}
