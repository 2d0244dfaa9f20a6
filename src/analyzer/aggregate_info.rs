use indexmap::IndexSet;

use crate::{
    analyzer::{check_state, AggregateTupleBuilder, AggregateTuples, AnalysisContext, AnalyzerError, TupleBuildingStrategy},
    catalog::SlotId,
    expr::{Expr, ExprSubstitutionMap, FunctionCall, SlotRef},
};

/// Grouping exprs and aggregate calls of a GROUP BY block, with the tuples
/// backing them and the smap from each to its output slot.
#[derive(Debug, Clone)]
pub struct AggregateInfo {
    grouping_exprs: Vec<Expr>,
    aggregate_exprs: Vec<FunctionCall>,
    tuples: AggregateTuples,
    smap: ExprSubstitutionMap,
    /// Indices into aggregate_exprs whose result is needed.
    materialized_slots: Vec<usize>,
}

impl AggregateInfo {
    pub fn create(
        grouping_exprs: &mut Vec<Expr>,
        aggregate_exprs: &mut Vec<FunctionCall>,
        ctx: &mut AnalysisContext,
    ) -> Result<AggregateInfo, AnalyzerError> {
        Self::create_with(grouping_exprs, aggregate_exprs, ctx, &AggregateTupleBuilder::for_grouping())
    }

    pub fn create_with(
        grouping_exprs: &mut Vec<Expr>,
        aggregate_exprs: &mut Vec<FunctionCall>,
        ctx: &mut AnalysisContext,
        strategy: &dyn TupleBuildingStrategy,
    ) -> Result<AggregateInfo, AnalyzerError> {
        Expr::remove_duplicates(grouping_exprs);
        let unique: IndexSet<FunctionCall> = aggregate_exprs.drain(..).collect();
        aggregate_exprs.extend(unique);

        let tuples = strategy.create_tuple_descs(grouping_exprs, aggregate_exprs, ctx)?;

        let targets: Vec<Expr> = grouping_exprs.iter()
            .cloned()
            .chain(aggregate_exprs.iter().cloned().map(Expr::FunctionCall))
            .collect();
        let output = ctx.desc_tbl().slots_of(tuples.output)?;
        check_state(output.len() == targets.len(), || {
            format!("aggregate tuple has {} slots for {} targets", output.len(), targets.len())
        })?;

        let mut smap = ExprSubstitutionMap::new();
        for (target, slot) in targets.into_iter().zip(output) {
            smap.put(target, Expr::SlotRef(SlotRef::new(slot.id(), slot.ty())));
        }

        Ok(AggregateInfo {
            grouping_exprs: grouping_exprs.clone(),
            aggregate_exprs: aggregate_exprs.clone(),
            tuples,
            smap,
            materialized_slots: Vec::new(),
        })
    }

    pub fn grouping_exprs(&self) -> &[Expr] { &self.grouping_exprs }
    pub fn aggregate_exprs(&self) -> &[FunctionCall] { &self.aggregate_exprs }
    pub fn smap(&self) -> &ExprSubstitutionMap { &self.smap }
    pub fn tuples(&self) -> AggregateTuples { self.tuples }
    pub fn materialized_slots(&self) -> &[usize] { &self.materialized_slots }

    fn slot_ids(&self, ctx: &AnalysisContext) -> Result<(Vec<SlotId>, Vec<SlotId>), AnalyzerError> {
        let output = ctx.desc_tbl().tuple(self.tuples.output)?.slots().to_vec();
        let intermediate = ctx.desc_tbl().tuple(self.tuples.intermediate)?.slots().to_vec();
        let expected = self.grouping_exprs.len() + self.aggregate_exprs.len();
        check_state(output.len() == expected && intermediate.len() == expected, || {
            format!("aggregate tuples have {}/{} slots for {} targets", output.len(), intermediate.len(), expected)
        })?;
        Ok((output, intermediate))
    }

    /// Grouping slots are always computed; an aggregate is computed only if
    /// its output slot is materialized.
    pub fn materialize_required_slots(
        &mut self,
        ctx: &mut AnalysisContext,
        smap: &ExprSubstitutionMap,
    ) -> Result<(), AnalyzerError> {
        self.materialized_slots.clear();
        let (output, intermediate) = self.slot_ids(ctx)?;
        let num_grouping = self.grouping_exprs.len();

        for (out, mid) in output.iter().zip(&intermediate).take(num_grouping) {
            ctx.desc_tbl_mut().slot_mut(*out)?.set_materialized(true);
            ctx.desc_tbl_mut().slot_mut(*mid)?.set_materialized(true);
        }
        let mut exprs = self.grouping_exprs.clone();

        let agg_slots = output.iter().zip(&intermediate).skip(num_grouping);
        for (i, (call, (out, mid))) in self.aggregate_exprs.iter().zip(agg_slots).enumerate() {
            if !ctx.desc_tbl().slot(*out)?.is_materialized() { continue; }
            ctx.desc_tbl_mut().slot_mut(*mid)?.set_materialized(true);
            exprs.push(Expr::FunctionCall(call.clone()));
            self.materialized_slots.push(i);
        }
        let resolved = Expr::substitute_list(&exprs, smap);
        ctx.materialize_slots(&resolved)
    }

    pub fn check_consistency(&self, ctx: &AnalysisContext) -> Result<(), AnalyzerError> {
        let (output, intermediate) = self.slot_ids(ctx)?;
        let num_grouping = self.grouping_exprs.len();

        let mut num_materialized = 0;
        for id in intermediate.iter().skip(num_grouping) {
            if ctx.desc_tbl().slot(*id)?.is_materialized() { num_materialized += 1; }
        }
        check_state(num_materialized == self.materialized_slots.len(), || {
            format!(
                "aggregate tuple has {} materialized aggregate slots but {} aggregates are materialized",
                num_materialized,
                self.materialized_slots.len()
            )
        })?;

        let targets = self.grouping_exprs.iter()
            .map(|e| (e.to_sql(), e.ty()))
            .chain(self.aggregate_exprs.iter().map(|f| (f.to_string(), f.ret_ty)));
        for ((sql, ty), id) in targets.zip(&output) {
            let slot_ty = ctx.desc_tbl().slot(*id)?.ty();
            check_state(ty == slot_ty, || {
                format!("Aggregate expr {} returns type {} but its aggregate tuple slot has type {}", sql, ty, slot_ty)
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnType;

    fn setup() -> (AnalysisContext, Vec<Expr>) {
        let mut ctx = AnalysisContext::default();
        let (_, cols) = ctx.add_base_table("t", &[("g", ColumnType::String), ("x", ColumnType::Int)]).unwrap();
        (ctx, cols)
    }

    #[test]
    fn dedups_and_maps_grouping_and_aggregates() {
        let (mut ctx, cols) = setup();
        let sum = FunctionCall::builtin("sum", vec![cols[1].clone()]).unwrap();
        let count = FunctionCall::builtin("count", vec![]).unwrap();
        let mut grouping = vec![cols[0].clone(), cols[0].clone()];
        let mut aggs = vec![sum.clone(), count.clone(), sum.clone()];

        let info = AggregateInfo::create(&mut grouping, &mut aggs, &mut ctx).unwrap();

        assert_eq!(info.grouping_exprs(), &[cols[0].clone()]);
        assert_eq!(info.aggregate_exprs(), &[sum.clone(), count]);
        assert_eq!(aggs.len(), 2);
        assert_eq!(info.smap().len(), 3);
        let out = ctx.desc_tbl().tuple(info.tuples().output).unwrap().slots().to_vec();
        assert_eq!(info.smap().get(&Expr::FunctionCall(sum)), Some(&Expr::SlotRef(SlotRef::new(out[1], ColumnType::BigInt))));
    }

    #[test]
    fn grouping_slots_always_materialized() {
        let (mut ctx, cols) = setup();
        let mut grouping = vec![cols[0].clone()];
        let mut aggs = vec![
            FunctionCall::builtin("max", vec![cols[1].clone()]).unwrap(),
            FunctionCall::builtin("min", vec![cols[1].clone()]).unwrap(),
        ];
        let mut info = AggregateInfo::create(&mut grouping, &mut aggs, &mut ctx).unwrap();
        let out = ctx.desc_tbl().tuple(info.tuples().output).unwrap().slots().to_vec();
        ctx.desc_tbl_mut().slot_mut(out[2]).unwrap().set_materialized(true);

        info.materialize_required_slots(&mut ctx, &ExprSubstitutionMap::new()).unwrap();

        assert_eq!(info.materialized_slots(), &[1]);
        let mid = ctx.desc_tbl().slots_of(info.tuples().intermediate).unwrap();
        assert_eq!(mid.iter().map(|s| s.is_materialized()).collect::<Vec<_>>(), vec![true, false, true]);
        info.check_consistency(&ctx).unwrap();
    }

    #[test]
    fn consistency_checks_output_types() {
        let (mut ctx, cols) = setup();
        let mut grouping = vec![];
        let mut aggs = vec![FunctionCall::builtin("avg", vec![cols[1].clone()]).unwrap()];
        let info = AggregateInfo::create(&mut grouping, &mut aggs, &mut ctx).unwrap();
        // AVG's STRING state lives in the intermediate tuple only
        info.check_consistency(&ctx).unwrap();

        let out = ctx.desc_tbl().tuple(info.tuples().output).unwrap().slots()[0];
        ctx.desc_tbl_mut().slot_mut(out).unwrap().set_type(ColumnType::Float);
        let err = info.check_consistency(&ctx).unwrap_err();
        assert_eq!(
            err,
            AnalyzerError::InvalidState("Aggregate expr avg(t.x) returns type DOUBLE but its aggregate tuple slot has type FLOAT".into())
        );
    }

    #[test]
    fn empty_block_is_invalid() {
        let (mut ctx, _) = setup();
        let before = ctx.desc_tbl().tuple_count();
        assert!(AggregateInfo::create(&mut vec![], &mut vec![], &mut ctx).is_err());
        assert_eq!(ctx.desc_tbl().tuple_count(), before);
    }
}
