use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque index of a tuple descriptor inside a [`DescriptorTable`](crate::catalog::DescriptorTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TupleId(pub(crate) usize);

/// Opaque index of a slot descriptor inside a [`DescriptorTable`](crate::catalog::DescriptorTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub(crate) usize);

impl TupleId {
    pub fn as_usize(&self) -> usize { self.0 }
}

impl SlotId {
    pub fn as_usize(&self) -> usize { self.0 }
}

impl fmt::Display for TupleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
