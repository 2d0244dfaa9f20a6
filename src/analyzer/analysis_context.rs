use crate::{
    analyzer::{AnalyzerConfig, AnalyzerError},
    catalog::{ColumnType, DescriptorTable, TupleId},
    expr::{Expr, SlotRef},
};

/// Per-query analysis state threaded through every pass.
///
/// Owns the descriptor table, so tuples and slots allocated while analyzing
/// one query live exactly as long as its context. Nothing here is shared
/// between queries.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    desc_tbl: DescriptorTable,
    config: AnalyzerConfig,
}

impl AnalysisContext {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { desc_tbl: DescriptorTable::new(), config }
    }

    pub fn desc_tbl(&self) -> &DescriptorTable { &self.desc_tbl }
    pub fn desc_tbl_mut(&mut self) -> &mut DescriptorTable { &mut self.desc_tbl }

    pub fn config(&self) -> &AnalyzerConfig { &self.config }
    pub fn config_mut(&mut self) -> &mut AnalyzerConfig { &mut self.config }

    /// Register a scanned table: one tuple with a slot per column.
    ///
    /// Returns the tuple id and a slot ref per column, labelled `table.column`.
    pub fn add_base_table(
        &mut self,
        name: &str,
        columns: &[(&str, ColumnType)],
    ) -> Result<(TupleId, Vec<Expr>), AnalyzerError> {
        let tuple = self.desc_tbl.create_tuple_descriptor(name);
        let mut refs = Vec::with_capacity(columns.len());
        for (column, ty) in columns {
            let slot = self.desc_tbl.add_slot_descriptor(tuple, *ty)?;
            let label = format!("{}.{}", name, column);
            self.desc_tbl.slot_mut(slot)?.set_label(label.clone());
            refs.push(Expr::SlotRef(SlotRef::new(slot, *ty).with_label(label)));
        }
        Ok((tuple, refs))
    }

    /// Mark every slot referenced by `exprs` as materialized.
    pub fn materialize_slots(&mut self, exprs: &[Expr]) -> Result<(), AnalyzerError> {
        for id in Expr::slot_ids(exprs) {
            self.desc_tbl.slot_mut(id)?.set_materialized(true);
        }
        Ok(())
    }
}
