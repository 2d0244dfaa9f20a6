use std::{fmt, hash::{Hash, Hasher}};

use crate::catalog::{ColumnType, SlotId};

/// Reference to the value stored in one slot.
///
/// Two slot refs are equal when they point at the same slot; the label is
/// only used for display.
#[derive(Debug, Clone)]
pub struct SlotRef {
    pub slot: SlotId,
    pub ty: ColumnType,
    pub label: Option<String>,
}

impl SlotRef {
    pub fn new(slot: SlotId, ty: ColumnType) -> Self {
        Self { slot, ty, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl PartialEq for SlotRef {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl Eq for SlotRef {}

impl Hash for SlotRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "<slot {}>", self.slot),
        }
    }
}
