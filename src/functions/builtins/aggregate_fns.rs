use crate::{
    analyzer::AnalyzerError,
    catalog::ColumnType,
    functions::{arg_mismatch, FunctionImpl, FunctionSignature},
};

pub struct CountImpl;
impl FunctionImpl for CountImpl {
    fn name(&self) -> &'static str { "count" }
    // COUNT(*) is represented with no arguments
    fn resolve_types(&self, _arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        Ok(FunctionSignature::returning(ColumnType::BigInt))
    }
}

pub struct SumImpl;
impl FunctionImpl for SumImpl {
    fn name(&self) -> &'static str { "sum" }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [t] if t.is_integer() || *t == ColumnType::Null => Ok(FunctionSignature::returning(ColumnType::BigInt)),
            [t] if t.is_floating_point() => Ok(FunctionSignature::returning(ColumnType::Double)),
            other => Err(arg_mismatch(self.name(), "SUM(numeric)", other)),
        }
    }
}

pub struct AvgImpl;
impl FunctionImpl for AvgImpl {
    fn name(&self) -> &'static str { "avg" }
    // running (sum, count) pair is kept serialized in a string slot
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [t] if t.is_numeric() || *t == ColumnType::Null =>
                Ok(FunctionSignature::with_intermediate(ColumnType::Double, ColumnType::String)),
            [ColumnType::Timestamp] =>
                Ok(FunctionSignature::with_intermediate(ColumnType::Timestamp, ColumnType::String)),
            other => Err(arg_mismatch(self.name(), "AVG(numeric | timestamp)", other)),
        }
    }
}

pub struct MinImpl;
impl FunctionImpl for MinImpl {
    fn name(&self) -> &'static str { "min" }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [t] => Ok(FunctionSignature::returning(*t)),
            other => Err(arg_mismatch(self.name(), "MIN(expr)", other)),
        }
    }
}

pub struct MaxImpl;
impl FunctionImpl for MaxImpl {
    fn name(&self) -> &'static str { "max" }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [t] => Ok(FunctionSignature::returning(*t)),
            other => Err(arg_mismatch(self.name(), "MAX(expr)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnType::*;

    #[test]
    fn sum_widens_to_bigint_or_double() {
        assert_eq!(SumImpl.resolve_types(&[Int]).unwrap().ret_ty, BigInt);
        assert_eq!(SumImpl.resolve_types(&[TinyInt]).unwrap().ret_ty, BigInt);
        assert_eq!(SumImpl.resolve_types(&[Float]).unwrap().ret_ty, Double);
    }

    #[test]
    fn sum_needs_one_numeric_arg() {
        let err = SumImpl.resolve_types(&[String]).unwrap_err();
        assert_eq!(err, AnalyzerError::FunctionArgMismatch {
            name: "sum".into(), expected: "SUM(numeric)".into(), got: vec![String],
        });
        assert!(SumImpl.resolve_types(&[]).is_err());
    }

    #[test]
    fn avg_keeps_string_state() {
        let sig = AvgImpl.resolve_types(&[BigInt]).unwrap();
        assert_eq!(sig, FunctionSignature::with_intermediate(Double, String));
    }

    #[test]
    fn count_accepts_star_and_args() {
        assert_eq!(CountImpl.resolve_types(&[]).unwrap().ret_ty, BigInt);
        assert_eq!(CountImpl.resolve_types(&[String]).unwrap().ret_ty, BigInt);
    }

    #[test]
    fn min_max_return_arg_type() {
        assert_eq!(MinImpl.resolve_types(&[Timestamp]).unwrap().ret_ty, Timestamp);
        assert_eq!(MaxImpl.resolve_types(&[String]).unwrap().ret_ty, String);
        assert!(MaxImpl.resolve_types(&[Int, Int]).is_err());
    }
}
