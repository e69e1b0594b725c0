//! Field values held in dataset rows.

use ordered_float::OrderedFloat;
use std::fmt;

/// A single field of a row.
///
/// Numbers use a total ordering so values can key ordered maps and be
/// sorted deterministically. Splitting and routing only ever compare
/// values for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Number(OrderedFloat<f64>),
    Category(String),
}

/// An ordered sequence of field values, one of which is the class label.
pub type Row = Vec<Value>;

impl Value {
    /// Parse a raw text field: anything that reads as a finite float
    /// becomes a number, everything else is kept as a category. Spellings
    /// such as `NaN`, `inf` or `infinity` stay categories.
    pub fn parse_field(field: &str) -> Self {
        let field = field.trim();
        match field.parse::<f64>() {
            Ok(number) if number.is_finite() => Value::Number(OrderedFloat(number)),
            _ => Value::Category(field.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.into_inner()),
            Value::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Category(c) => Some(c),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n.into_inner()),
            Value::Category(c) => f.write_str(c),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(OrderedFloat(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(OrderedFloat(value as f64))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(OrderedFloat(f64::from(value)))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(OrderedFloat(value as f64))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Category(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Category(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_detects_numbers() {
        assert_eq!(Value::parse_field("1.5"), Value::from(1.5));
        assert_eq!(Value::parse_field(" 3 "), Value::from(3));
        assert_eq!(Value::parse_field("-2e3"), Value::from(-2000.0));
    }

    #[test]
    fn parse_field_keeps_categories() {
        assert_eq!(Value::parse_field("sunny"), Value::from("sunny"));
        assert_eq!(Value::parse_field(" yes "), Value::from("yes"));
        assert_eq!(Value::parse_field(""), Value::from(""));
    }

    #[test]
    fn parse_field_keeps_non_finite_spellings_as_categories() {
        for token in ["NaN", "nan", "inf", "-inf", "Infinity", "infinity"] {
            assert_eq!(Value::parse_field(token), Value::from(token));
            assert!(!Value::parse_field(token).is_number());
        }
        assert!(Value::parse_field("1e308").is_number());
        assert_eq!(Value::parse_field("1e309"), Value::from("1e309"));
    }

    #[test]
    fn integers_and_floats_compare_equal() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::from("1"));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Value::from(2).to_string(), "2");
        assert_eq!(Value::from(0.25).to_string(), "0.25");
        assert_eq!(Value::from("no").to_string(), "no");
    }

    #[test]
    fn numbers_sort_before_categories() {
        let mut values = vec![Value::from("b"), Value::from(3), Value::from("a"), Value::from(-1)];
        values.sort();
        assert_eq!(
            values,
            vec![Value::from(-1), Value::from(3), Value::from("a"), Value::from("b")]
        );
    }
}
