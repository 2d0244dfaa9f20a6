use once_cell::sync::Lazy;
use std::{collections::HashMap, sync::Arc};

use crate::{
    analyzer::AnalyzerError,
    catalog::ColumnType,
    functions::{
        AvgImpl, BoundaryValueImpl, CountImpl, DenseRankImpl, FunctionImpl, FunctionSignature, MaxImpl,
        MinImpl, NtileImpl, OffsetImpl, RankImpl, RowNumberImpl, SumImpl,
    },
};

/// Registry with every builtin function, shared by all analyzers.
pub static BUILTINS: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::default_function_registry);

/// Case-insensitive registry of functions.
#[derive(Default)]
pub struct FunctionRegistry {
    by_name: HashMap<String, Arc<dyn FunctionImpl>>,
}

impl FunctionRegistry {
    pub fn new() -> Self { Self { by_name: HashMap::new() } }

    pub fn register<I: FunctionImpl + 'static>(&mut self, impl_: I) {
        self.by_name.insert(impl_.name().to_string(), Arc::new(impl_));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn FunctionImpl>> {
        self.by_name.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let mut v: Vec<_> = self.by_name.keys().cloned().collect();
        v.sort();
        v
    }

    pub fn is_analytic_only(&self, name: &str) -> bool {
        self.get(name).map(|f| f.is_analytic_only()).unwrap_or(false)
    }

    pub fn resolve_types(&self, name: &str, arg_types: &[ColumnType]) -> Result<FunctionSignature, AnalyzerError> {
        let imp = self.get(name).ok_or_else(|| AnalyzerError::FunctionNotFound(name.to_ascii_lowercase()))?;
        imp.resolve_types(arg_types)
    }

    pub fn default_function_registry() -> Self {
        let mut registry = Self::new();
        registry.register(CountImpl);
        registry.register(SumImpl);
        registry.register(AvgImpl);
        registry.register(MinImpl);
        registry.register(MaxImpl);
        registry.register(RankImpl);
        registry.register(DenseRankImpl);
        registry.register(RowNumberImpl);
        registry.register(NtileImpl);
        registry.register(OffsetImpl::LEAD);
        registry.register(OffsetImpl::LAG);
        registry.register(BoundaryValueImpl::FIRST_VALUE);
        registry.register(BoundaryValueImpl::LAST_VALUE);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnType::*;

    #[test]
    fn registry_contains_all_and_lookup_is_case_insensitive() {
        let names = BUILTINS.list();
        assert_eq!(names, vec![
            "avg", "count", "dense_rank", "first_value", "lag", "last_value",
            "lead", "max", "min", "ntile", "rank", "row_number", "sum",
        ]);
        assert!(BUILTINS.get("RANK").is_some());
        assert!(BUILTINS.get("Row_Number").is_some());
    }

    #[test]
    fn analytic_only_flags() {
        assert!(BUILTINS.is_analytic_only("rank"));
        assert!(BUILTINS.is_analytic_only("LAG"));
        assert!(!BUILTINS.is_analytic_only("sum"));
        assert!(!BUILTINS.is_analytic_only("nope"));
    }

    #[test]
    fn resolve_types_routes_to_impl() {
        assert_eq!(BUILTINS.resolve_types("SUM", &[Int]).unwrap(), FunctionSignature::returning(BigInt));
        assert_eq!(
            BUILTINS.resolve_types("percentile", &[Int]).unwrap_err(),
            AnalyzerError::FunctionNotFound("percentile".into())
        );
    }

    #[test]
    fn custom_registry_only_sees_registered() {
        let mut r = FunctionRegistry::new();
        r.register(RankImpl);
        assert_eq!(r.list(), vec!["rank"]);
        assert!(r.resolve_types("sum", &[Int]).is_err());
    }
}
