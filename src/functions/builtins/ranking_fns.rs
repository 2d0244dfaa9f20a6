use crate::{
    analyzer::AnalyzerError,
    catalog::ColumnType,
    functions::{arg_mismatch, FunctionImpl, FunctionSignature},
};

pub struct RankImpl;
impl FunctionImpl for RankImpl {
    fn name(&self) -> &'static str { "rank" }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [] => Ok(FunctionSignature::returning(ColumnType::BigInt)),
            other => Err(arg_mismatch(self.name(), "RANK()", other)),
        }
    }
    fn is_analytic_only(&self) -> bool { true }
}

pub struct DenseRankImpl;
impl FunctionImpl for DenseRankImpl {
    fn name(&self) -> &'static str { "dense_rank" }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [] => Ok(FunctionSignature::returning(ColumnType::BigInt)),
            other => Err(arg_mismatch(self.name(), "DENSE_RANK()", other)),
        }
    }
    fn is_analytic_only(&self) -> bool { true }
}

pub struct RowNumberImpl;
impl FunctionImpl for RowNumberImpl {
    fn name(&self) -> &'static str { "row_number" }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [] => Ok(FunctionSignature::returning(ColumnType::BigInt)),
            other => Err(arg_mismatch(self.name(), "ROW_NUMBER()", other)),
        }
    }
    fn is_analytic_only(&self) -> bool { true }
}

pub struct NtileImpl;
impl FunctionImpl for NtileImpl {
    fn name(&self) -> &'static str { "ntile" }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [_] => Ok(FunctionSignature::returning(ColumnType::BigInt)),
            other => Err(arg_mismatch(self.name(), "NTILE(buckets)", other)),
        }
    }
    fn is_analytic_only(&self) -> bool { true }
}
