use crate::{
    analyzer::AnalyzerError,
    expr::Expr,
    functions::BUILTINS,
};

pub struct AnalyticResolver;

impl AnalyticResolver {
    pub fn contains_analytic(expr: &Expr) -> bool {
        match expr {
            Expr::Analytic(_) => true,
            other => other.children().into_iter().any(Self::contains_analytic),
        }
    }

    /// Append every analytic expr found in `expr` to `out`, in pre-order.
    ///
    /// An analytic expr nested inside another one's arguments, partitions or
    /// ordering is rejected, and so is an analytic-only function (RANK, LAG,
    /// ...) called without an OVER clause.
    pub fn collect_analytic_exprs(expr: &Expr, out: &mut Vec<Expr>) -> Result<(), AnalyzerError> {
        match expr {
            Expr::Analytic(_) => {
                if let Some(nested) = expr.children().into_iter().find(|c| Self::contains_analytic(c)) {
                    return Err(AnalyzerError::InvalidState(format!(
                        "analytic expr {} is nested inside {}", nested, expr
                    )));
                }
                out.push(expr.clone());
                Ok(())
            }
            other => {
                if let Expr::FunctionCall(f) = other {
                    if BUILTINS.is_analytic_only(&f.name) {
                        return Err(AnalyzerError::InvalidState(format!("{} requires an OVER clause", f)));
                    }
                }
                for child in other.children() {
                    Self::collect_analytic_exprs(child, out)?;
                }
                Ok(())
            }
        }
    }

    pub fn collect_all(exprs: &[Expr]) -> Result<Vec<Expr>, AnalyzerError> {
        let mut out = Vec::new();
        for e in exprs {
            Self::collect_analytic_exprs(e, &mut out)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analyzer::AnalysisContext,
        catalog::ColumnType,
        expr::{AnalyticExpr, FunctionCall, Literal},
    };

    fn cols() -> Vec<Expr> {
        let mut ctx = AnalysisContext::default();
        ctx.add_base_table("t", &[("x", ColumnType::Int), ("y", ColumnType::Int)]).unwrap().1
    }

    fn sum_over(arg: &Expr, part: &Expr) -> Expr {
        AnalyticExpr::new(FunctionCall::builtin("sum", vec![arg.clone()]).unwrap())
            .partition_by(vec![part.clone()])
            .into()
    }

    #[test]
    fn finds_analytics_under_scalar_calls() {
        let c = cols();
        let inner = sum_over(&c[0], &c[1]);
        let wrapped = Expr::FunctionCall(FunctionCall::builtin("max", vec![inner.clone()]).unwrap());

        assert!(AnalyticResolver::contains_analytic(&wrapped));
        assert!(!AnalyticResolver::contains_analytic(&c[0]));
        assert!(!AnalyticResolver::contains_analytic(&Expr::Literal(Literal::Int(1))));

        let found = AnalyticResolver::collect_all(&[c[0].clone(), wrapped, inner.clone()]).unwrap();
        assert_eq!(found, vec![inner.clone(), inner]);
    }

    #[test]
    fn analytic_only_function_needs_over() {
        let c = cols();
        let bare = Expr::FunctionCall(FunctionCall::builtin("lag", vec![c[0].clone()]).unwrap());
        let err = AnalyticResolver::collect_all(&[bare]).unwrap_err();
        assert_eq!(err, AnalyzerError::InvalidState("lag(t.x) requires an OVER clause".into()));
    }

    #[test]
    fn nested_analytic_is_rejected() {
        let c = cols();
        let inner = sum_over(&c[0], &c[1]);
        let outer: Expr = AnalyticExpr::new(FunctionCall::builtin("max", vec![c[0].clone()]).unwrap())
            .partition_by(vec![inner])
            .into();

        let err = AnalyticResolver::collect_all(&[outer]).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidState(msg) if msg.contains("nested")));
    }
}
