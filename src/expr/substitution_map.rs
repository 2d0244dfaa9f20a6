use indexmap::IndexMap;

use crate::expr::Expr;

/// Ordered expr -> expr rewrite table.
///
/// Keys are compared structurally. Putting a key that is already present
/// keeps the existing entry, so lookups always see the first mapping made for
/// a given expression. Values may repeat.
#[derive(Debug, Clone, Default)]
pub struct ExprSubstitutionMap {
    entries: IndexMap<Expr, Expr>,
}

impl ExprSubstitutionMap {
    pub fn new() -> Self { Self::default() }

    pub fn put(&mut self, lhs: Expr, rhs: Expr) {
        self.entries.entry(lhs).or_insert(rhs);
    }

    pub fn get(&self, lhs: &Expr) -> Option<&Expr> {
        self.entries.get(lhs)
    }

    pub fn contains(&self, lhs: &Expr) -> bool {
        self.entries.contains_key(lhs)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Expr, &Expr)> {
        self.entries.iter()
    }

    pub fn lhs(&self) -> impl Iterator<Item = &Expr> {
        self.entries.keys()
    }

    pub fn rhs(&self) -> impl Iterator<Item = &Expr> {
        self.entries.values()
    }

    /// New map whose keys are rewritten through `smap`; values are unchanged.
    pub fn substitute_lhs(&self, smap: &ExprSubstitutionMap) -> ExprSubstitutionMap {
        let mut out = ExprSubstitutionMap::new();
        for (lhs, rhs) in &self.entries {
            out.put(lhs.substitute(smap), rhs.clone());
        }
        out
    }

    pub fn debug_string(&self) -> String {
        let entries = self.entries.iter()
            .map(|(lhs, rhs)| format!("{}:{}", lhs, rhs))
            .collect::<Vec<_>>()
            .join(" ");
        format!("smap({})", entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::{ColumnType, SlotId}, expr::{FunctionCall, Literal, SlotRef}};

    fn col(id: usize, label: &str) -> Expr {
        Expr::SlotRef(SlotRef::new(SlotId(id), ColumnType::Int).with_label(label))
    }

    #[test]
    fn first_mapping_wins_for_equal_keys() {
        let mut smap = ExprSubstitutionMap::new();
        smap.put(col(0, "a"), col(10, "first"));
        smap.put(col(0, "a-again"), col(11, "second"));
        assert_eq!(smap.len(), 1);
        assert_eq!(smap.get(&col(0, "whatever")), Some(&col(10, "first")));
    }

    #[test]
    fn duplicate_values_are_allowed() {
        let mut smap = ExprSubstitutionMap::new();
        smap.put(col(0, "a"), col(10, "out"));
        smap.put(col(1, "b"), col(10, "out"));
        assert_eq!(smap.len(), 2);
        assert_eq!(smap.rhs().filter(|r| **r == col(10, "out")).count(), 2);
    }

    #[test]
    fn lookup_is_structural() {
        let mut smap = ExprSubstitutionMap::new();
        let f = FunctionCall::builtin("max", vec![col(0, "t.x")]).unwrap();
        smap.put(Expr::FunctionCall(f), col(5, "agg"));
        let again = FunctionCall::builtin("MAX", vec![col(0, "x")]).unwrap();
        assert!(smap.contains(&Expr::FunctionCall(again)));
        assert!(smap.get(&Expr::Literal(Literal::Int(0))).is_none());
    }

    #[test]
    fn debug_string_in_insertion_order() {
        let mut smap = ExprSubstitutionMap::new();
        smap.put(col(2, "t.b"), col(20, "B"));
        smap.put(col(1, "t.a"), col(10, "A"));
        assert_eq!(smap.debug_string(), "smap(t.b:B t.a:A)");
        assert_eq!(ExprSubstitutionMap::new().debug_string(), "smap()");
    }

    #[test]
    fn substitute_lhs_rewrites_keys_only() {
        let mut smap = ExprSubstitutionMap::new();
        let f = Expr::FunctionCall(FunctionCall::builtin("min", vec![col(0, "t.x")]).unwrap());
        smap.put(f, col(5, "agg"));

        let mut view = ExprSubstitutionMap::new();
        view.put(col(0, "t.x"), col(3, "base.x"));

        let rewritten = smap.substitute_lhs(&view);
        let expected_key = Expr::FunctionCall(FunctionCall::builtin("min", vec![col(3, "base.x")]).unwrap());
        assert_eq!(rewritten.get(&expected_key), Some(&col(5, "agg")));
        assert_eq!(rewritten.len(), 1);
    }
}
