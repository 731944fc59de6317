//! Fixture generation for request bodies.

mod seeded;

pub use seeded::SeededDataFactory;
