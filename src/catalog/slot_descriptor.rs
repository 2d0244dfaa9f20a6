use crate::catalog::{ColumnType, SlotId, TupleId};

/// Metadata for one column-sized storage location within a tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDescriptor {
    id: SlotId,
    parent: TupleId,
    ty: ColumnType,
    /// Human readable origin of the slot (column name or expr text)
    label: Option<String>,
    /// Whether the slot's value must be computed at execution time
    is_materialized: bool,
}

impl SlotDescriptor {
    pub(crate) fn new(id: SlotId, parent: TupleId, ty: ColumnType) -> Self {
        Self { id, parent, ty, label: None, is_materialized: false }
    }

    pub fn id(&self) -> SlotId { self.id }
    pub fn parent(&self) -> TupleId { self.parent }
    pub fn ty(&self) -> ColumnType { self.ty }
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }
    pub fn is_materialized(&self) -> bool { self.is_materialized }

    pub fn set_type(&mut self, ty: ColumnType) {
        self.ty = ty;
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn set_materialized(&mut self, materialized: bool) {
        self.is_materialized = materialized;
    }

    pub fn debug_string(&self) -> String {
        format!(
            "SlotDescriptor{{id={}, parent={}, type={}, label={}, materialized={}}}",
            self.id,
            self.parent,
            self.ty,
            self.label.as_deref().unwrap_or(""),
            self.is_materialized,
        )
    }
}
