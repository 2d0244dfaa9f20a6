use std::collections::BTreeSet;

use tracing::{debug, trace, Level};

use crate::{
    analyzer::{check_state, AnalysisContext, AnalyticInfo, AnalyticResolver, AnalyzerError},
    catalog::SlotId,
    expr::{Expr, ExprSubstitutionMap},
};

pub struct SelectBlockAnalyzer;

impl SelectBlockAnalyzer {
    /// Resolve the analytic exprs of one select list.
    ///
    /// Every analytic expr in the result is replaced by a ref to its slot in
    /// the analytic output tuple.
    pub fn analyze(select_list: Vec<Expr>, ctx: &mut AnalysisContext) -> Result<AnalyzedSelectBlock, AnalyzerError> {
        let mut analytic_exprs = AnalyticResolver::collect_all(&select_list)?;
        if analytic_exprs.is_empty() {
            return Ok(AnalyzedSelectBlock { result_exprs: select_list, analytic_info: None });
        }

        let info = AnalyticInfo::create(&mut analytic_exprs, ctx)?;
        if ctx.config().trace_analytic_info && tracing::enabled!(Level::TRACE) {
            Self::trace_analytic_info(&info, ctx);
        }

        let result_exprs = Expr::substitute_list(&select_list, info.smap());
        Ok(AnalyzedSelectBlock { result_exprs, analytic_info: Some(info) })
    }

    // diagnostics only: a failure to render is reported in place of the text
    fn trace_analytic_info(info: &AnalyticInfo, ctx: &AnalysisContext) {
        let tuple = ctx.desc_tbl().debug_string(info.output_tuple()).unwrap_or_else(|e| e.to_string());
        trace!(%tuple, "analytic tuple");
        trace!(smap = %info.smap().debug_string(), "analytic smap");
        let info_str = info.debug_string(ctx).unwrap_or_else(|e| e.to_string());
        trace!(info = %info_str, "analytic info");
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzedSelectBlock {
    result_exprs: Vec<Expr>,
    analytic_info: Option<AnalyticInfo>,
}

impl AnalyzedSelectBlock {
    pub fn result_exprs(&self) -> &[Expr] { &self.result_exprs }
    pub fn analytic_info(&self) -> Option<&AnalyticInfo> { self.analytic_info.as_ref() }

    /// Materialize what the consumer needs: the result exprs at `required`
    /// positions, then whatever analytic computation they depend on.
    ///
    /// `resolver` maps exprs of this block onto the slots that actually carry
    /// them (e.g. an inline view's smap); pass an empty map when there is none.
    pub fn materialize(
        &mut self,
        required: &[usize],
        resolver: &ExprSubstitutionMap,
        ctx: &mut AnalysisContext,
    ) -> Result<(), AnalyzerError> {
        let mut exprs = Vec::with_capacity(required.len());
        for &i in required {
            check_state(i < self.result_exprs.len(), || {
                format!("result expr {} requested but the block has {}", i, self.result_exprs.len())
            })?;
            exprs.push(self.result_exprs[i].clone());
        }
        ctx.materialize_slots(&exprs)?;

        let Some(info) = self.analytic_info.as_mut() else { return Ok(()) };
        info.materialize_required_slots(ctx, resolver)?;
        debug!(
            materialized = ?info.materialized_slots(),
            total = info.analytic_exprs().len(),
            "materialized analytic slots"
        );

        if ctx.config().check_consistency {
            info.check_consistency(ctx)?;
        }
        Ok(())
    }

    /// Slots read by the result exprs plus those the analytic computation needs.
    pub fn referenced_slots(&self, ctx: &AnalysisContext) -> Result<BTreeSet<SlotId>, AnalyzerError> {
        let mut ids = Expr::slot_ids(&self.result_exprs);
        if let Some(info) = &self.analytic_info {
            ids.extend(info.referenced_slots(ctx)?);
        }
        Ok(ids)
    }
}
