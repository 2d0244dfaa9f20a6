use crate::catalog::{SlotId, TupleId};

/// A named, ordered collection of slots describing one row shape.
///
/// The descriptor only keeps slot ids; the slot descriptors themselves live
/// in the owning [`DescriptorTable`](crate::catalog::DescriptorTable).
#[derive(Debug, Clone, PartialEq)]
pub struct TupleDescriptor {
    id: TupleId,
    debug_name: String,
    slots: Vec<SlotId>,
    /// false for logical tuples that are remapped onto physical ones during planning
    is_materialized: bool,
}

impl TupleDescriptor {
    pub(crate) fn new(id: TupleId, debug_name: impl Into<String>) -> Self {
        Self { id, debug_name: debug_name.into(), slots: Vec::new(), is_materialized: true }
    }

    pub fn id(&self) -> TupleId { self.id }
    pub fn debug_name(&self) -> &str { &self.debug_name }
    pub fn slots(&self) -> &[SlotId] { &self.slots }
    pub fn slot_count(&self) -> usize { self.slots.len() }
    pub fn is_materialized(&self) -> bool { self.is_materialized }

    pub fn set_is_materialized(&mut self, materialized: bool) {
        self.is_materialized = materialized;
    }

    pub(crate) fn push_slot(&mut self, slot: SlotId) {
        self.slots.push(slot);
    }
}
