//! Descriptors for the value types the catalog knows about.
//!
//! Each descriptor is a unit struct, so a tree can own one for free or borrow a shared one.

mod complex;
mod function;

use std::cmp::Ordering;
use std::num::IntErrorKind;

pub use complex::{Complex, ComplexType};
pub use function::{FunctionRef, FunctionType};

use crate::descriptor::Descriptor;
use crate::error::ParseError;

/// Orders two floats, treating values that can't be ordered (NaN) as equal. Descriptors
/// reject NaN when parsing so this is a total order on everything they produce.
pub(crate) fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Parses a finite or infinite float, rejecting NaN.
pub(crate) fn parse_f64(kind: &'static str, text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty { kind });
    }
    let value: f64 = text.parse().map_err(|_| ParseError::InvalidNumber {
        kind,
        text: text.to_owned(),
    })?;
    if value.is_nan() {
        return Err(ParseError::NotANumber(text.to_owned()));
    }
    Ok(value)
}

/// 32-bit signed integers in numeric order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntType;

impl Descriptor for IntType {
    type Value = i32;

    fn name(&self) -> &'static str {
        "INT"
    }

    fn clone_value(&self, value: &i32) -> i32 {
        *value
    }

    fn parse(&self, text: &str) -> Result<i32, ParseError> {
        let text = text.trim();
        text.parse().map_err(|err: std::num::ParseIntError| match err.kind() {
            IntErrorKind::Empty => ParseError::Empty { kind: "integer" },
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::OutOfRange {
                kind: "integer",
                text: text.to_owned(),
            },
            _ => ParseError::InvalidNumber {
                kind: "integer",
                text: text.to_owned(),
            },
        })
    }

    fn compare(&self, a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn print(&self, value: &i32) -> String {
        value.to_string()
    }
}

/// Double precision floats in numeric order. `0` and `-0` are the same key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DoubleType;

impl Descriptor for DoubleType {
    type Value = f64;

    fn name(&self) -> &'static str {
        "DOUBLE"
    }

    fn clone_value(&self, value: &f64) -> f64 {
        *value
    }

    fn parse(&self, text: &str) -> Result<f64, ParseError> {
        parse_f64("float", text)
    }

    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        compare_f64(*a, *b)
    }

    fn print(&self, value: &f64) -> String {
        value.to_string()
    }
}

/// Strings in byte-wise lexicographic order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StringType;

impl Descriptor for StringType {
    type Value = String;

    fn name(&self) -> &'static str {
        "STRING"
    }

    fn clone_value(&self, value: &String) -> String {
        value.clone()
    }

    fn parse(&self, text: &str) -> Result<String, ParseError> {
        Ok(text.to_owned())
    }

    fn compare(&self, a: &String, b: &String) -> Ordering {
        a.cmp(b)
    }

    fn print(&self, value: &String) -> String {
        value.clone()
    }
}

/// A person record, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    /// The person's name.
    pub name: String,
}

impl Person {
    /// Creates a record for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// [`Person`] records ordered by name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PersonType;

impl Descriptor for PersonType {
    type Value = Person;

    fn name(&self) -> &'static str {
        "PERSON"
    }

    fn clone_value(&self, value: &Person) -> Person {
        value.clone()
    }

    fn parse(&self, text: &str) -> Result<Person, ParseError> {
        let name = text.trim();
        if name.is_empty() {
            return Err(ParseError::Empty { kind: "person" });
        }
        Ok(Person::new(name))
    }

    fn compare(&self, a: &Person, b: &Person) -> Ordering {
        a.name.cmp(&b.name)
    }

    fn print(&self, value: &Person) -> String {
        value.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(IntType.parse("42"), Ok(42));
        assert_eq!(IntType.parse(" -7 "), Ok(-7));
        assert_eq!(IntType.compare(&1, &2), Ordering::Less);
        assert_eq!(IntType.print(&-3), "-3");
        assert_eq!(IntType.size(), 4);
    }

    #[test]
    fn integer_errors() {
        assert_eq!(
            IntType.parse("2147483648"),
            Err(ParseError::OutOfRange {
                kind: "integer",
                text: "2147483648".into()
            })
        );
        assert!(matches!(
            IntType.parse("-99999999999"),
            Err(ParseError::OutOfRange { .. })
        ));
        assert!(matches!(
            IntType.parse("12abc"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert_eq!(IntType.parse(""), Err(ParseError::Empty { kind: "integer" }));
    }

    #[test]
    fn doubles() {
        assert_eq!(DoubleType.parse("2.5"), Ok(2.5));
        assert_eq!(DoubleType.compare(&-0.0, &0.0), Ordering::Equal);
        assert_eq!(DoubleType.compare(&1.5, &0.5), Ordering::Greater);
        assert_eq!(DoubleType.print(&3.0), "3");
        assert!(matches!(
            DoubleType.parse("NaN"),
            Err(ParseError::NotANumber(_))
        ));
        assert!(matches!(
            DoubleType.parse("1.2.3"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn strings() {
        let a = StringType.parse("apple").unwrap();
        let b = StringType.parse("banana").unwrap();

        assert_eq!(StringType.compare(&a, &b), Ordering::Less);
        assert_eq!(StringType.compare(&b, &StringType.clone_value(&b)), Ordering::Equal);
        assert_eq!(StringType.print(&a), "apple");
    }

    #[test]
    fn people() {
        let ann = PersonType.parse("Ann").unwrap();
        let bob = PersonType.parse("Bob").unwrap();

        assert_eq!(ann, Person::new("Ann"));
        assert_eq!(PersonType.compare(&bob, &ann), Ordering::Greater);
        assert_eq!(PersonType.print(&bob), "Bob");
        assert_eq!(PersonType.parse(" "), Err(ParseError::Empty { kind: "person" }));
    }
}
