use crate::{analyzer::AnalyzerError, catalog::ColumnType};

/// Types derived for one call of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub ret_ty: ColumnType,
    /// `None` when the running state has the return type.
    pub intermediate_ty: Option<ColumnType>,
}

impl FunctionSignature {
    pub fn returning(ret_ty: ColumnType) -> Self {
        Self { ret_ty, intermediate_ty: None }
    }

    pub fn with_intermediate(ret_ty: ColumnType, intermediate_ty: ColumnType) -> Self {
        Self { ret_ty, intermediate_ty: Some(intermediate_ty) }
    }
}

/// Per-function metadata.
/// One instance is registered per function name.
/// It is stateless and thread-safe to share.
pub trait FunctionImpl: Send + Sync {
    /// Canonical lowercase function name ("sum", "rank", ...).
    fn name(&self) -> &'static str;

    /// Derive the result types for a call with the given argument types.
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError>;

    /// Functions like RANK() that are only valid with an OVER clause.
    fn is_analytic_only(&self) -> bool { false }
}

pub(crate) fn arg_mismatch(name: &str, expected: &str, got: &[ColumnType]) -> AnalyzerError {
    AnalyzerError::FunctionArgMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: got.to_vec(),
    }
}
