use indexmap::IndexSet;
use std::{collections::BTreeSet, fmt};

use crate::{
    catalog::{ColumnType, SlotId},
    expr::{AnalyticExpr, ExprSubstitutionMap, FunctionCall, Literal, SlotRef},
};

/// An analyzed expression tree.
///
/// Equality and hashing are structural, so two separately built
/// `sum(t.x) OVER (PARTITION BY t.y)` trees compare equal. `Clone` is a deep
/// copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    SlotRef(SlotRef),
    FunctionCall(FunctionCall),
    Analytic(AnalyticExpr),
}

impl Expr {
    pub fn ty(&self) -> ColumnType {
        match self {
            Expr::Literal(l) => l.ty(),
            Expr::SlotRef(s) => s.ty,
            Expr::FunctionCall(f) => f.ret_ty,
            Expr::Analytic(a) => a.ty(),
        }
    }

    pub fn to_sql(&self) -> String {
        self.to_string()
    }

    pub fn as_analytic(&self) -> Option<&AnalyticExpr> {
        match self {
            Expr::Analytic(a) => Some(a),
            _ => None,
        }
    }

    /// Direct sub-expressions, in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Literal(_) | Expr::SlotRef(_) => vec![],
            Expr::FunctionCall(f) => f.args.iter().collect(),
            Expr::Analytic(a) => a.fn_call.args.iter()
                .chain(a.partition_exprs.iter())
                .chain(a.order_by.iter().map(|o| &o.expr))
                .collect(),
        }
    }

    /// Replace every subtree that is a key of `smap` by its value.
    ///
    /// The outermost match wins: once a subtree is replaced its children are
    /// not visited.
    pub fn substitute(&self, smap: &ExprSubstitutionMap) -> Expr {
        if let Some(rhs) = smap.get(self) {
            return rhs.clone();
        }
        match self {
            Expr::Literal(_) | Expr::SlotRef(_) => self.clone(),
            Expr::FunctionCall(f) => Expr::FunctionCall(f.substitute(smap)),
            Expr::Analytic(a) => Expr::Analytic(a.substitute(smap)),
        }
    }

    pub fn substitute_list(exprs: &[Expr], smap: &ExprSubstitutionMap) -> Vec<Expr> {
        exprs.iter().map(|e| e.substitute(smap)).collect()
    }

    pub fn collect_slot_ids(&self, out: &mut BTreeSet<SlotId>) {
        if let Expr::SlotRef(s) = self {
            out.insert(s.slot);
        }
        for child in self.children() {
            child.collect_slot_ids(out);
        }
    }

    /// Ids of every slot referenced anywhere inside `exprs`.
    pub fn slot_ids(exprs: &[Expr]) -> BTreeSet<SlotId> {
        let mut out = BTreeSet::new();
        for e in exprs {
            e.collect_slot_ids(&mut out);
        }
        out
    }

    /// Drop structurally equal duplicates in place, keeping first occurrences in order.
    pub fn remove_duplicates(exprs: &mut Vec<Expr>) {
        let unique: IndexSet<Expr> = exprs.drain(..).collect();
        exprs.extend(unique);
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(l) => write!(f, "{}", l),
            Expr::SlotRef(s) => write!(f, "{}", s),
            Expr::FunctionCall(fun) => write!(f, "{}", fun),
            Expr::Analytic(a) => write!(f, "{}", a),
        }
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self { Expr::Literal(value) }
}

impl From<SlotRef> for Expr {
    fn from(value: SlotRef) -> Self { Expr::SlotRef(value) }
}

impl From<FunctionCall> for Expr {
    fn from(value: FunctionCall) -> Self { Expr::FunctionCall(value) }
}

impl From<AnalyticExpr> for Expr {
    fn from(value: AnalyticExpr) -> Self { Expr::Analytic(value) }
}
