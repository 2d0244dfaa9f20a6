use std::collections::BTreeSet;

use crate::{
    analyzer::{check_state, AggregateTupleBuilder, AggregateTuples, AnalysisContext, AnalyzerError, TupleBuildingStrategy},
    catalog::{SlotId, TupleId},
    expr::{Expr, ExprSubstitutionMap, FunctionCall, SlotRef},
};

/// The analytic functions of one select block, the logical tuples that hold
/// their results, and the smap from each analytic expr to its result slot.
#[derive(Debug, Clone)]
pub struct AnalyticInfo {
    /// Distinct analytic exprs, deep copies of the caller's.
    analytic_exprs: Vec<Expr>,
    /// The function call of each analytic expr, index-aligned with `analytic_exprs`.
    aggregate_exprs: Vec<FunctionCall>,
    tuples: AggregateTuples,
    /// analytic_exprs[i] -> slot ref to output slot i
    smap: ExprSubstitutionMap,
    /// Indices into analytic_exprs whose result is needed by the enclosing block.
    materialized_slots: Vec<usize>,
}

impl AnalyticInfo {
    /// Build the analytic info for `analytic_exprs`.
    ///
    /// Duplicates are removed from `analytic_exprs` in place (first
    /// occurrences kept), so afterwards the caller's list is index-aligned with
    /// [`AnalyticInfo::analytic_exprs`].
    pub fn create(analytic_exprs: &mut Vec<Expr>, ctx: &mut AnalysisContext) -> Result<AnalyticInfo, AnalyzerError> {
        let builder = AggregateTupleBuilder::for_analytics(ctx.config());
        Self::create_with(analytic_exprs, ctx, &builder)
    }

    pub fn create_with(
        analytic_exprs: &mut Vec<Expr>,
        ctx: &mut AnalysisContext,
        strategy: &dyn TupleBuildingStrategy,
    ) -> Result<AnalyticInfo, AnalyzerError> {
        check_state(!analytic_exprs.is_empty(), || "analytic info requires at least one analytic expr".to_string())?;
        Expr::remove_duplicates(analytic_exprs);

        let owned: Vec<Expr> = analytic_exprs.clone();
        let aggregate_exprs = owned.iter()
            .map(|e| {
                e.as_analytic()
                    .map(|a| a.fn_call.clone())
                    .ok_or_else(|| AnalyzerError::InvalidState(format!("{} is not an analytic expr", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tuples = strategy.create_tuple_descs(&[], &aggregate_exprs, ctx)?;

        // Logical only: planning remaps these slots onto physical tuples.
        ctx.desc_tbl_mut().tuple_mut(tuples.output)?.set_is_materialized(false);
        ctx.desc_tbl_mut().tuple_mut(tuples.intermediate)?.set_is_materialized(false);

        let output_refs: Vec<SlotRef> = ctx.desc_tbl()
            .slots_of(tuples.output)?
            .iter()
            .map(|s| SlotRef::new(s.id(), s.ty()))
            .collect();
        check_state(output_refs.len() == owned.len(), || {
            format!("analytic tuple has {} slots for {} analytic exprs", output_refs.len(), owned.len())
        })?;

        let mut smap = ExprSubstitutionMap::new();
        for (expr, slot_ref) in owned.iter().zip(output_refs) {
            smap.put(expr.clone(), Expr::SlotRef(slot_ref));
        }

        Ok(AnalyticInfo {
            analytic_exprs: owned,
            aggregate_exprs,
            tuples,
            smap,
            materialized_slots: Vec::new(),
        })
    }

    pub fn analytic_exprs(&self) -> &[Expr] { &self.analytic_exprs }
    pub fn aggregate_exprs(&self) -> &[FunctionCall] { &self.aggregate_exprs }
    pub fn smap(&self) -> &ExprSubstitutionMap { &self.smap }
    pub fn tuples(&self) -> AggregateTuples { self.tuples }
    pub fn output_tuple(&self) -> TupleId { self.tuples.output }
    pub fn intermediate_tuple(&self) -> TupleId { self.tuples.intermediate }
    pub fn materialized_slots(&self) -> &[usize] { &self.materialized_slots }

    /// Ids of all slots read while computing the analytic functions: every
    /// slot the analytic exprs reference plus the whole intermediate tuple,
    /// which the executor always materializes in full.
    pub fn referenced_slots(&self, ctx: &AnalysisContext) -> Result<BTreeSet<SlotId>, AnalyzerError> {
        let intermediate = ctx.desc_tbl()
            .get_tuple(self.tuples.intermediate)
            .ok_or_else(|| AnalyzerError::InvalidState(
                format!("intermediate tuple {} has not been allocated", self.tuples.intermediate)
            ))?;
        let mut ids = Expr::slot_ids(&self.analytic_exprs);
        ids.extend(intermediate.slots().iter().copied());
        Ok(ids)
    }

    /// Propagate the enclosing block's materialization decisions.
    ///
    /// For every analytic expr whose output slot is materialized, its
    /// intermediate slot is materialized too and the expr, resolved through
    /// `smap`, is registered so the slots it reads get computed. The others
    /// are pruned.
    pub fn materialize_required_slots(
        &mut self,
        ctx: &mut AnalysisContext,
        smap: &ExprSubstitutionMap,
    ) -> Result<(), AnalyzerError> {
        self.materialized_slots.clear();
        let output_slots = ctx.desc_tbl().tuple(self.tuples.output)?.slots().to_vec();
        let intermediate_slots = ctx.desc_tbl().tuple(self.tuples.intermediate)?.slots().to_vec();
        check_state(
            output_slots.len() == self.analytic_exprs.len() && intermediate_slots.len() == self.analytic_exprs.len(),
            || format!(
                "analytic tuples have {}/{} slots for {} analytic exprs",
                output_slots.len(), intermediate_slots.len(), self.analytic_exprs.len()
            ),
        )?;

        let mut exprs = Vec::new();
        for (i, ((expr, out), mid)) in self.analytic_exprs.iter().zip(&output_slots).zip(&intermediate_slots).enumerate() {
            if !ctx.desc_tbl().slot(*out)?.is_materialized() { continue; }
            ctx.desc_tbl_mut().slot_mut(*mid)?.set_materialized(true);
            exprs.push(expr.clone());
            self.materialized_slots.push(i);
        }
        let resolved = Expr::substitute_list(&exprs, smap);
        ctx.materialize_slots(&resolved)
    }

    /// Validate internal state: the number of materialized intermediate slots
    /// matches the number of materialized analytic exprs, and every analytic
    /// expr's type matches its slot.
    pub fn check_consistency(&self, ctx: &AnalysisContext) -> Result<(), AnalyzerError> {
        let slots = ctx.desc_tbl().slots_of(self.tuples.intermediate)?;

        let num_materialized = slots.iter().filter(|s| s.is_materialized()).count();
        check_state(num_materialized == self.materialized_slots.len(), || {
            format!(
                "analytic tuple has {} materialized slots but {} analytic exprs are materialized",
                num_materialized,
                self.materialized_slots.len()
            )
        })?;

        check_state(slots.len() == self.analytic_exprs.len(), || {
            format!("analytic tuple has {} slots for {} analytic exprs", slots.len(), self.analytic_exprs.len())
        })?;
        for (expr, slot) in self.analytic_exprs.iter().zip(&slots) {
            check_state(expr.ty() == slot.ty(), || {
                format!(
                    "Analytic expr {} returns type {} but its analytic tuple slot has type {}",
                    expr.to_sql(),
                    expr.ty(),
                    slot.ty()
                )
            })?;
        }
        Ok(())
    }

    /// Rewrite this info against `smap` (e.g. an inline view's smap that maps
    /// view slots onto base table slots).
    ///
    /// Returns a new info; the tuples are shared with `self` and the
    /// materialization state starts empty.
    pub fn rewrite(&self, smap: &ExprSubstitutionMap) -> Result<AnalyticInfo, AnalyzerError> {
        let analytic_exprs = Expr::substitute_list(&self.analytic_exprs, smap);
        let aggregate_exprs = analytic_exprs.iter()
            .map(|e| {
                e.as_analytic()
                    .map(|a| a.fn_call.clone())
                    .ok_or_else(|| AnalyzerError::InvalidState(format!("rewrite turned an analytic expr into {}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let new_smap = self.smap.substitute_lhs(smap);
        check_state(new_smap.len() == analytic_exprs.len(), || {
            "rewrite collapsed distinct analytic exprs into one".to_string()
        })?;
        Ok(AnalyticInfo {
            analytic_exprs,
            aggregate_exprs,
            tuples: self.tuples,
            smap: new_smap,
            materialized_slots: Vec::new(),
        })
    }

    pub fn debug_string(&self, ctx: &AnalysisContext) -> Result<String, AnalyzerError> {
        let exprs = self.analytic_exprs.iter().map(|e| e.to_sql()).collect::<Vec<_>>().join(", ");
        Ok(format!(
            "AnalyticInfo{{output_tuple={}, intermediate_tuple={}, materialized_slots={:?}, analytic_exprs=[{}], smap={}}}",
            ctx.desc_tbl().debug_string(self.tuples.output)?,
            ctx.desc_tbl().debug_string(self.tuples.intermediate)?,
            self.materialized_slots,
            exprs,
            self.smap.debug_string(),
        ))
    }
}
