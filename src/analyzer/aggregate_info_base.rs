use crate::{
    analyzer::{check_state, AnalysisContext, AnalyzerConfig, AnalyzerError},
    catalog::{ColumnType, TupleId},
    expr::{Expr, FunctionCall},
};

/// The pair of tuples backing a set of aggregate-style computations.
///
/// Slot `i` of both tuples belongs to the same grouping expr or aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateTuples {
    pub intermediate: TupleId,
    pub output: TupleId,
}

/// Allocates the intermediate/output tuple pair for a list of targets.
pub trait TupleBuildingStrategy {
    /// Slots are laid out grouping exprs first, then aggregates, in input order.
    fn create_tuple_descs(
        &self,
        grouping_exprs: &[Expr],
        aggregate_exprs: &[FunctionCall],
        ctx: &mut AnalysisContext,
    ) -> Result<AggregateTuples, AnalyzerError>;
}

/// Default strategy: output slots carry the final types. Intermediate slots
/// carry each function's running-state type when `separate_state` is set,
/// otherwise the return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTupleBuilder {
    pub output_name: String,
    pub intermediate_name: String,
    pub separate_state: bool,
}

impl AggregateTupleBuilder {
    pub fn new(output_name: impl Into<String>, intermediate_name: impl Into<String>) -> Self {
        Self { output_name: output_name.into(), intermediate_name: intermediate_name.into(), separate_state: true }
    }

    pub fn with_separate_state(mut self, separate_state: bool) -> Self {
        self.separate_state = separate_state;
        self
    }

    pub fn for_grouping() -> Self {
        Self::new("agg-tuple", "agg-intermed-tuple")
    }

    /// Analytic intermediate slots hold the finished value of each function,
    /// so they are typed with its return type.
    pub fn for_analytics(config: &AnalyzerConfig) -> Self {
        Self::new(config.output_tuple_name.clone(), config.intermediate_tuple_name.clone())
            .with_separate_state(false)
    }

    fn add_slot(ctx: &mut AnalysisContext, tuple: TupleId, ty: ColumnType, label: &str) -> Result<(), AnalyzerError> {
        let slot = ctx.desc_tbl_mut().add_slot_descriptor(tuple, ty)?;
        ctx.desc_tbl_mut().slot_mut(slot)?.set_label(label);
        Ok(())
    }
}

impl TupleBuildingStrategy for AggregateTupleBuilder {
    fn create_tuple_descs(
        &self,
        grouping_exprs: &[Expr],
        aggregate_exprs: &[FunctionCall],
        ctx: &mut AnalysisContext,
    ) -> Result<AggregateTuples, AnalyzerError> {
        check_state(!grouping_exprs.is_empty() || !aggregate_exprs.is_empty(), || {
            format!("no targets to build {} from", self.output_name)
        })?;

        let output = ctx.desc_tbl_mut().create_tuple_descriptor(self.output_name.clone());
        let intermediate = ctx.desc_tbl_mut().create_tuple_descriptor(self.intermediate_name.clone());

        for expr in grouping_exprs {
            let label = expr.to_sql();
            Self::add_slot(ctx, output, expr.ty(), &label)?;
            Self::add_slot(ctx, intermediate, expr.ty(), &label)?;
        }
        for call in aggregate_exprs {
            let label = call.to_string();
            Self::add_slot(ctx, output, call.ret_ty, &label)?;
            let state_ty = if self.separate_state { call.intermediate_type() } else { call.ret_ty };
            Self::add_slot(ctx, intermediate, state_ty, &label)?;
        }

        Ok(AggregateTuples { intermediate, output })
    }
}
