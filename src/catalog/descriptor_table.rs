use crate::{
    analyzer::AnalyzerError,
    catalog::{ColumnType, SlotDescriptor, SlotId, TupleDescriptor, TupleId},
};

/// Arena owning every tuple and slot descriptor created while compiling one query.
///
/// Ids handed out by the table are plain indices; they are only meaningful
/// for the table that issued them. Allocation is append-only.
#[derive(Debug, Clone, Default)]
pub struct DescriptorTable {
    tuples: Vec<TupleDescriptor>,
    slots: Vec<SlotDescriptor>,
}

impl DescriptorTable {
    pub fn new() -> Self { Self::default() }

    pub fn create_tuple_descriptor(&mut self, debug_name: impl Into<String>) -> TupleId {
        let id = TupleId(self.tuples.len());
        self.tuples.push(TupleDescriptor::new(id, debug_name));
        id
    }

    pub fn add_slot_descriptor(&mut self, tuple: TupleId, ty: ColumnType) -> Result<SlotId, AnalyzerError> {
        let id = SlotId(self.slots.len());
        self.tuple_mut(tuple)?.push_slot(id);
        self.slots.push(SlotDescriptor::new(id, tuple, ty));
        Ok(id)
    }

    pub fn get_tuple(&self, id: TupleId) -> Option<&TupleDescriptor> {
        self.tuples.get(id.0)
    }

    pub fn tuple(&self, id: TupleId) -> Result<&TupleDescriptor, AnalyzerError> {
        self.tuples.get(id.0)
            .ok_or_else(|| AnalyzerError::InvalidState(format!("unknown tuple id {}", id)))
    }

    pub fn tuple_mut(&mut self, id: TupleId) -> Result<&mut TupleDescriptor, AnalyzerError> {
        self.tuples.get_mut(id.0)
            .ok_or_else(|| AnalyzerError::InvalidState(format!("unknown tuple id {}", id)))
    }

    pub fn slot(&self, id: SlotId) -> Result<&SlotDescriptor, AnalyzerError> {
        self.slots.get(id.0)
            .ok_or_else(|| AnalyzerError::InvalidState(format!("unknown slot id {}", id)))
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Result<&mut SlotDescriptor, AnalyzerError> {
        self.slots.get_mut(id.0)
            .ok_or_else(|| AnalyzerError::InvalidState(format!("unknown slot id {}", id)))
    }

    /// Slot descriptors of `tuple` in slot order.
    pub fn slots_of(&self, tuple: TupleId) -> Result<Vec<&SlotDescriptor>, AnalyzerError> {
        self.tuple(tuple)?
            .slots()
            .iter()
            .map(|id| self.slot(*id))
            .collect()
    }

    pub fn materialized_slot_count(&self, tuple: TupleId) -> Result<usize, AnalyzerError> {
        Ok(self.slots_of(tuple)?.iter().filter(|s| s.is_materialized()).count())
    }

    pub fn tuple_count(&self) -> usize { self.tuples.len() }
    pub fn slot_count(&self) -> usize { self.slots.len() }

    pub fn debug_string(&self, tuple: TupleId) -> Result<String, AnalyzerError> {
        let desc = self.tuple(tuple)?;
        let slots = self.slots_of(tuple)?
            .iter()
            .map(|s| s.debug_string())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "TupleDescriptor{{id={}, name={}, materialized={}, slots=[{}]}}",
            desc.id(),
            desc.debug_name(),
            desc.is_materialized(),
            slots,
        ))
    }
}
