//! String-to-value coercion for bound fields.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::BoxError;

/// Format accepted for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The kind of value a field holds, used in error messages and to recognise
/// boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Int,
    Uint,
    Float,
    Bool,
    Date,
    /// A value type that parses itself; carries a display name.
    Custom(&'static str),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "string",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Custom(name) => *name,
        };
        f.write_str(name)
    }
}

/// A type that can be parsed from a single argument value.
///
/// Implemented for text, integers, floats, booleans and [`NaiveDate`]. A
/// domain type implements it to own its conversion: the binder only ever
/// calls [`Value::parse`], so the type's own parsing is what applies.
pub trait Value: Sized {
    const KIND: Kind;

    fn parse(input: &str) -> Result<Self, BoxError>;
}

impl Value for String {
    const KIND: Kind = Kind::Text;

    fn parse(input: &str) -> Result<Self, BoxError> {
        Ok(input.to_string())
    }
}

macro_rules! impl_value_from_str {
    ($kind:expr => $($ty:ty),+) => {
        $(
            impl Value for $ty {
                const KIND: Kind = $kind;

                fn parse(input: &str) -> Result<Self, BoxError> {
                    Ok(input.parse::<$ty>()?)
                }
            }
        )+
    };
}

impl_value_from_str!(Kind::Int => i8, i16, i32, i64, i128, isize);
impl_value_from_str!(Kind::Uint => u8, u16, u32, u64, u128, usize);
impl_value_from_str!(Kind::Float => f32, f64);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
pub struct ParseBoolError;

impl Value for bool {
    const KIND: Kind = Kind::Bool;

    fn parse(input: &str) -> Result<Self, BoxError> {
        match input {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ParseBoolError.into()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected a date in YYYY-MM-DD form")]
pub struct DateFormatError;

impl Value for NaiveDate {
    const KIND: Kind = Kind::Date;

    fn parse(input: &str) -> Result<Self, BoxError> {
        if !is_date_shaped(input) {
            return Err(DateFormatError.into());
        }
        Ok(NaiveDate::parse_from_str(input, DATE_FORMAT)?)
    }
}

/// Exactly `DDDD-DD-DD`; chrono alone would also accept unpadded fields.
fn is_date_shaped(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_base_ten() {
        assert_eq!(<i64 as Value>::parse("-42").unwrap(), -42);
        assert!(<i64 as Value>::parse("0x10").is_err());
        assert!(<u8 as Value>::parse("256").is_err());
        assert!(<u32 as Value>::parse("-1").is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(<f64 as Value>::parse("2.5").unwrap(), 2.5);
        assert!(<f64 as Value>::parse("two").is_err());
    }

    #[test]
    fn booleans_accept_short_forms() {
        for input in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(<bool as Value>::parse(input).unwrap(), "{input}");
        }
        for input in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!<bool as Value>::parse(input).unwrap(), "{input}");
        }
        assert!(<bool as Value>::parse("yes").is_err());
        assert!(<bool as Value>::parse("tRUE").is_err());
    }

    #[test]
    fn dates_use_fixed_format() {
        assert_eq!(
            <NaiveDate as Value>::parse("2025-09-12").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 12).unwrap()
        );
        assert!(<NaiveDate as Value>::parse("2025-9-12").is_err());
        assert!(<NaiveDate as Value>::parse("2025-09-12T10:00:00").is_err());
        assert!(<NaiveDate as Value>::parse("2025-02-30").is_err());
        assert!(<NaiveDate as Value>::parse("12/09/2025").is_err());
    }

    #[test]
    fn kind_names() {
        assert_eq!(Kind::Text.to_string(), "string");
        assert_eq!(Kind::Date.to_string(), "date");
        assert_eq!(Kind::Custom("sort order").to_string(), "sort order");
    }
}
