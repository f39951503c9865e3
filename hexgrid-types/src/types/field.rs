use ordered_float::OrderedFloat;
use serde::{self, Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A scalar produced by evaluating an expression node. Immutable once
/// produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, Hash)]
pub enum Field {
    UInt(u64),
    Int(i64),
    Float(OrderedFloat<f64>),
    Boolean(bool),
    String(String),
    Null,
}

impl Field {
    pub fn ty(&self) -> Option<FieldType> {
        match self {
            Field::UInt(_) => Some(FieldType::UInt),
            Field::Int(_) => Some(FieldType::Int),
            Field::Float(_) => Some(FieldType::Float),
            Field::Boolean(_) => Some(FieldType::Boolean),
            Field::String(_) => Some(FieldType::String),
            Field::Null => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Field::UInt(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Field::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Field::Float(f) => Some(f.0),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Field::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Field::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces to `u64`. String coercion follows the generic scalar rules:
    /// the text must parse as a decimal unsigned integer.
    pub fn to_uint(&self) -> Option<u64> {
        match self {
            Field::UInt(i) => Some(*i),
            Field::Int(i) => u64::try_from(*i).ok(),
            Field::Float(f) => Some(f.0 as u64),
            Field::String(s) => s.parse::<u64>().ok(),
            Field::Boolean(_) | Field::Null => None,
        }
    }

    pub fn to_int(&self) -> Option<i64> {
        match self {
            Field::UInt(i) => i64::try_from(*i).ok(),
            Field::Int(i) => Some(*i),
            Field::Float(f) => Some(f.0 as i64),
            Field::String(s) => s.parse::<i64>().ok(),
            Field::Boolean(_) | Field::Null => None,
        }
    }

    pub fn to_float(&self) -> Option<f64> {
        match self {
            Field::UInt(i) => Some(*i as f64),
            Field::Int(i) => Some(*i as f64),
            Field::Float(f) => Some(f.0),
            Field::String(s) => s.parse::<f64>().ok(),
            Field::Boolean(_) | Field::Null => None,
        }
    }

    /// Coerces to text. Every non-null scalar has a textual form; `Null`
    /// stays absent.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Field::Null => None,
            field => Some(field.to_string()),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::UInt(i) => write!(f, "{i}"),
            Field::Int(i) => write!(f, "{i}"),
            Field::Float(v) => write!(f, "{}", v.0),
            Field::Boolean(b) => write!(f, "{b}"),
            Field::String(s) => write!(f, "{s}"),
            Field::Null => write!(f, "NULL"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, Hash)]
pub enum FieldType {
    UInt,
    Int,
    Float,
    Boolean,
    String,
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::UInt => f.write_str("UINT"),
            FieldType::Int => f.write_str("INT"),
            FieldType::Float => f.write_str("FLOAT"),
            FieldType::Boolean => f.write_str("BOOLEAN"),
            FieldType::String => f.write_str("STRING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Field::String("42".to_string()).to_int(), Some(42));
        assert_eq!(Field::String("42".to_string()).to_uint(), Some(42));
        assert_eq!(Field::String("-1".to_string()).to_uint(), None);
        assert_eq!(Field::String("4.5".to_string()).to_float(), Some(4.5));
        assert_eq!(Field::String("abc".to_string()).to_float(), None);
        assert_eq!(Field::UInt(7).to_int(), Some(7));
        assert_eq!(Field::Int(-7).to_uint(), None);
        assert_eq!(Field::Null.to_float(), None);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(Field::Int(123).to_text(), Some("123".to_string()));
        assert_eq!(
            Field::String("abc".to_string()).to_text(),
            Some("abc".to_string())
        );
        assert_eq!(Field::Null.to_text(), None);
    }
}
