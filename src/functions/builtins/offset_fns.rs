use crate::{
    analyzer::AnalyzerError,
    catalog::ColumnType,
    functions::{arg_mismatch, FunctionImpl, FunctionSignature},
};

/// LEAD / LAG: `(expr [, offset [, default]])`, typed after `expr` promoted
/// with the default value's type.
pub struct OffsetImpl {
    name: &'static str,
}

impl OffsetImpl {
    pub const LEAD: OffsetImpl = OffsetImpl { name: "lead" };
    pub const LAG: OffsetImpl = OffsetImpl { name: "lag" };
}

impl FunctionImpl for OffsetImpl {
    fn name(&self) -> &'static str { self.name }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [t] | [t, _] => Ok(FunctionSignature::returning(*t)),
            [t, _, default] => Ok(FunctionSignature::returning(ColumnType::promote(*t, *default))),
            other => Err(arg_mismatch(self.name, "(expr [, offset [, default]])", other)),
        }
    }
    fn is_analytic_only(&self) -> bool { true }
}

/// FIRST_VALUE / LAST_VALUE.
pub struct BoundaryValueImpl {
    name: &'static str,
}

impl BoundaryValueImpl {
    pub const FIRST_VALUE: BoundaryValueImpl = BoundaryValueImpl { name: "first_value" };
    pub const LAST_VALUE: BoundaryValueImpl = BoundaryValueImpl { name: "last_value" };
}

impl FunctionImpl for BoundaryValueImpl {
    fn name(&self) -> &'static str { self.name }
    fn resolve_types(&self, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        match arg_types {
            [t] => Ok(FunctionSignature::returning(*t)),
            other => Err(arg_mismatch(self.name, "(expr)", other)),
        }
    }
    fn is_analytic_only(&self) -> bool { true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnType::*;

    #[test]
    fn lead_lag_follow_first_arg() {
        assert_eq!(OffsetImpl::LAG.resolve_types(&[String]).unwrap().ret_ty, String);
        assert_eq!(OffsetImpl::LEAD.resolve_types(&[Double, BigInt, Double]).unwrap().ret_ty, Double);
        assert_eq!(OffsetImpl::LAG.resolve_types(&[Int, BigInt, BigInt]).unwrap().ret_ty, BigInt);
        assert_eq!(OffsetImpl::LAG.resolve_types(&[Null, BigInt, Double]).unwrap().ret_ty, Double);
        assert!(OffsetImpl::LEAD.resolve_types(&[]).is_err());
        assert!(OffsetImpl::LAG.resolve_types(&[Int, Int, Int, Int]).is_err());
    }

    #[test]
    fn first_last_value_follow_arg() {
        assert_eq!(BoundaryValueImpl::FIRST_VALUE.resolve_types(&[Timestamp]).unwrap().ret_ty, Timestamp);
        assert_eq!(BoundaryValueImpl::LAST_VALUE.name(), "last_value");
    }
}
