use ordered_float::NotNan;
use std::fmt::{self, Display};

use crate::catalog::ColumnType;

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(NotNan<f64>),
    Bool(bool),
    Null,
}

impl Literal {
    /// `None` when `value` is NaN.
    pub fn float(value: f64) -> Option<Literal> {
        NotNan::new(value).ok().map(Literal::Float)
    }

    pub fn ty(&self) -> ColumnType {
        match self {
            Literal::String(_) => ColumnType::String,
            Literal::Int(_) => ColumnType::BigInt,
            Literal::Float(_) => ColumnType::Double,
            Literal::Bool(_) => ColumnType::Boolean,
            Literal::Null => ColumnType::Null,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(n) => write!(f, "{}", n.into_inner()),
            Literal::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Literal::Null => write!(f, "NULL"),
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(_) => write!(f, "String({})", self),
            Literal::Int(_) => write!(f, "Int({})", self),
            Literal::Float(_) => write!(f, "Float({})", self),
            Literal::Bool(_) => write!(f, "Bool({})", self),
            Literal::Null => write!(f, "Null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_not_a_literal() {
        assert!(Literal::float(f64::NAN).is_none());
        assert_eq!(Literal::float(1.5).unwrap().ty(), ColumnType::Double);
    }

    #[test]
    fn sql_text() {
        assert_eq!(Literal::String("it's".into()).to_string(), "'it''s'");
        assert_eq!(Literal::Bool(true).to_string(), "TRUE");
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::Int(-3).to_string(), "-3");
    }
}
