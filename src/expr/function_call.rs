use std::fmt;

use crate::{
    analyzer::AnalyzerError,
    catalog::ColumnType,
    expr::{Expr, ExprSubstitutionMap},
    functions::{FunctionRegistry, BUILTINS},
};

/// A resolved function call: name, arguments and the types the registry derived for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionCall {
    pub name: String,            // normalized lowercase
    pub args: Vec<Expr>,
    pub distinct: bool,
    pub ret_ty: ColumnType,
    /// Type of the running state kept while the function is computed,
    /// `None` when it is the return type.
    pub intermediate_ty: Option<ColumnType>,
}

impl FunctionCall {
    /// Resolve `name(args)` against `registry`, deriving its result types.
    pub fn resolve(
        name: &str,
        args: Vec<Expr>,
        distinct: bool,
        registry: &FunctionRegistry,
    ) -> Result<FunctionCall, AnalyzerError> {
        let arg_types: Vec<ColumnType> = args.iter().map(Expr::ty).collect();
        let signature = registry.resolve_types(name, &arg_types)?;
        Ok(FunctionCall {
            name: name.to_ascii_lowercase(),
            args,
            distinct,
            ret_ty: signature.ret_ty,
            intermediate_ty: signature.intermediate_ty,
        })
    }

    /// Resolve against the builtin registry.
    pub fn builtin(name: &str, args: Vec<Expr>) -> Result<FunctionCall, AnalyzerError> {
        Self::resolve(name, args, false, &BUILTINS)
    }

    pub fn intermediate_type(&self) -> ColumnType {
        self.intermediate_ty.unwrap_or(self.ret_ty)
    }

    pub fn substitute(&self, smap: &ExprSubstitutionMap) -> FunctionCall {
        FunctionCall {
            name: self.name.clone(),
            args: Expr::substitute_list(&self.args, smap),
            distinct: self.distinct,
            ret_ty: self.ret_ty,
            intermediate_ty: self.intermediate_ty,
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ");
        if self.distinct {
            write!(f, "{}(DISTINCT {})", self.name, args)
        } else {
            write!(f, "{}({})", self.name, args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::SlotId, expr::{Literal, SlotRef}};

    fn int_col(id: usize, label: &str) -> Expr {
        Expr::SlotRef(SlotRef::new(SlotId(id), ColumnType::Int).with_label(label))
    }

    #[test]
    fn resolve_normalizes_name_and_types() {
        let f = FunctionCall::builtin("SUM", vec![int_col(0, "t.x")]).unwrap();
        assert_eq!(f.name, "sum");
        assert_eq!(f.ret_ty, ColumnType::BigInt);
        assert_eq!(f.intermediate_type(), ColumnType::BigInt);
        assert_eq!(f.to_string(), "sum(t.x)");
    }

    #[test]
    fn intermediate_type_overrides_return_type() {
        let f = FunctionCall::builtin("avg", vec![int_col(0, "t.x")]).unwrap();
        assert_eq!(f.ret_ty, ColumnType::Double);
        assert_eq!(f.intermediate_type(), ColumnType::String);
    }

    #[test]
    fn unknown_function_is_reported() {
        let err = FunctionCall::builtin("median", vec![int_col(0, "t.x")]).unwrap_err();
        assert_eq!(err, AnalyzerError::FunctionNotFound("median".into()));
    }

    #[test]
    fn distinct_is_rendered() {
        let f = FunctionCall::resolve("count", vec![int_col(1, "t.y")], true, &BUILTINS).unwrap();
        assert_eq!(f.to_string(), "count(DISTINCT t.y)");
    }

    #[test]
    fn substitute_rewrites_arguments_only() {
        let f = FunctionCall::builtin("lag", vec![int_col(0, "t.x"), Expr::Literal(Literal::Int(1))]).unwrap();
        let mut smap = ExprSubstitutionMap::new();
        smap.put(int_col(0, "t.x"), int_col(7, "v.x"));
        let g = f.substitute(&smap);
        assert_eq!(g.args[0], int_col(7, "v.x"));
        assert_eq!(g.args[1], Expr::Literal(Literal::Int(1)));
        assert_eq!(g.ret_ty, f.ret_ty);
    }
}
