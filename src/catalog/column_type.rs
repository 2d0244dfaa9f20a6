use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar SQL types carried by expressions and slot descriptors.
///
/// The analyzer only needs enough of a type system to derive function
/// return types and to compare an expression's type against the slot that
/// stores it, so this is a flat enum without precision/scale parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Type of the NULL literal before any coercion
    Null,
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    String,
    Timestamp,
}

impl ColumnType {
    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnType::TinyInt | ColumnType::SmallInt | ColumnType::Int | ColumnType::BigInt)
    }

    pub fn is_floating_point(&self) -> bool {
        matches!(self, ColumnType::Float | ColumnType::Double)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_floating_point()
    }

    /// Promote two types to a common representative.
    ///
    /// Integers widen to the larger integer, any floating point operand turns
    /// the pair into `Double`. `Null` yields the other side. Unrelated
    /// non-numeric types keep the left (first seen) type.
    pub fn promote(a: ColumnType, b: ColumnType) -> ColumnType {
        use ColumnType::*;
        if a == b { return a; }
        match (a, b) {
            (Null, y) => y,
            (x, Null) => x,
            (x, y) if x.is_integer() && y.is_integer() => {
                if x.integer_rank() >= y.integer_rank() { x } else { y }
            }
            (x, y) if x.is_numeric() && y.is_numeric() => Double,
            (x, _) => x,
        }
    }

    fn integer_rank(&self) -> u8 {
        match self {
            ColumnType::TinyInt => 1,
            ColumnType::SmallInt => 2,
            ColumnType::Int => 3,
            ColumnType::BigInt => 4,
            _ => 0,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnType::Null => "NULL_TYPE",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Int => "INT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::String => "STRING",
            ColumnType::Timestamp => "TIMESTAMP",
        };
        write!(f, "{}", s)
    }
}
