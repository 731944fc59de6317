//! Fixture data port

/// Source of randomized but well-formed fixture values.
///
/// Consumed when cases are planned, never by the assertion engine.
/// Implementations should be seedable so runs can be reproduced.
pub trait DataFactory: Send {
    /// A product name, e.g. "Ergonomic Steel Chair".
    fn product_name(&mut self) -> String;

    /// A one-sentence product description.
    fn product_description(&mut self) -> String;

    /// A price between `min` and `max` with two decimals.
    fn price(&mut self, min: u32, max: u32) -> f64;

    /// A float in `[min, max]` rounded to `fraction_digits` decimals.
    fn float(&mut self, min: f64, max: f64, fraction_digits: u32) -> f64;

    /// An integer in `[min, max]`.
    fn int(&mut self, min: i64, max: i64) -> i64;

    /// A company name.
    fn company_name(&mut self) -> String;

    /// A store department, e.g. "Electronics".
    fn department(&mut self) -> String;

    /// A person's first name.
    fn first_name(&mut self) -> String;

    /// A person's last name.
    fn last_name(&mut self) -> String;

    /// An email address.
    fn email(&mut self) -> String;

    /// A phone number.
    fn phone_number(&mut self) -> String;
}
