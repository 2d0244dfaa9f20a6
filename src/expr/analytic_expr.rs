use std::fmt;

use crate::{
    catalog::ColumnType,
    expr::{Expr, ExprSubstitutionMap, FunctionCall},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowType {
    Rows,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}

/// Window frame of an analytic expr.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalyticWindow {
    pub window_type: WindowType,
    pub left: Boundary,
    /// Absence means the frame is given by its start only (`ROWS 2 PRECEDING`).
    pub right: Option<Boundary>,
}

impl AnalyticWindow {
    pub fn rows_between(left: Boundary, right: Boundary) -> Self {
        Self { window_type: WindowType::Rows, left, right: Some(right) }
    }

    pub fn range_between(left: Boundary, right: Boundary) -> Self {
        Self { window_type: WindowType::Range, left, right: Some(right) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderByElement {
    pub expr: Expr,
    pub is_asc: bool,
    pub nulls_first: Option<bool>,
}

impl OrderByElement {
    pub fn asc(expr: Expr) -> Self { Self { expr, is_asc: true, nulls_first: None } }
    pub fn desc(expr: Expr) -> Self { Self { expr, is_asc: false, nulls_first: None } }

    pub fn substitute(&self, smap: &ExprSubstitutionMap) -> OrderByElement {
        OrderByElement { expr: self.expr.substitute(smap), is_asc: self.is_asc, nulls_first: self.nulls_first }
    }
}

/// `fn_call OVER (PARTITION BY ... ORDER BY ... window)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalyticExpr {
    pub fn_call: FunctionCall,
    pub partition_exprs: Vec<Expr>,
    pub order_by: Vec<OrderByElement>,
    pub window: Option<AnalyticWindow>,
}

impl AnalyticExpr {
    pub fn new(fn_call: FunctionCall) -> Self {
        Self { fn_call, partition_exprs: Vec::new(), order_by: Vec::new(), window: None }
    }

    pub fn partition_by(mut self, exprs: Vec<Expr>) -> Self {
        self.partition_exprs = exprs;
        self
    }

    pub fn order_by(mut self, elements: Vec<OrderByElement>) -> Self {
        self.order_by = elements;
        self
    }

    pub fn window(mut self, window: AnalyticWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn ty(&self) -> ColumnType { self.fn_call.ret_ty }

    pub fn substitute(&self, smap: &ExprSubstitutionMap) -> AnalyticExpr {
        AnalyticExpr {
            fn_call: self.fn_call.substitute(smap),
            partition_exprs: Expr::substitute_list(&self.partition_exprs, smap),
            order_by: self.order_by.iter().map(|o| o.substitute(smap)).collect(),
            window: self.window.clone(),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::UnboundedPreceding => write!(f, "UNBOUNDED PRECEDING"),
            Boundary::Preceding(n) => write!(f, "{} PRECEDING", n),
            Boundary::CurrentRow => write!(f, "CURRENT ROW"),
            Boundary::Following(n) => write!(f, "{} FOLLOWING", n),
            Boundary::UnboundedFollowing => write!(f, "UNBOUNDED FOLLOWING"),
        }
    }
}

impl fmt::Display for AnalyticWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.window_type {
            WindowType::Rows => "ROWS",
            WindowType::Range => "RANGE",
        };
        match &self.right {
            Some(right) => write!(f, "{} BETWEEN {} AND {}", kind, self.left, right),
            None => write!(f, "{} {}", kind, self.left),
        }
    }
}

impl fmt::Display for OrderByElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expr, if self.is_asc { "ASC" } else { "DESC" })?;
        match self.nulls_first {
            Some(true) => write!(f, " NULLS FIRST"),
            Some(false) => write!(f, " NULLS LAST"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for AnalyticExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        if !self.partition_exprs.is_empty() {
            let exprs = self.partition_exprs.iter().map(|e| e.to_string()).collect::<Vec<_>>();
            clauses.push(format!("PARTITION BY {}", exprs.join(", ")));
        }
        if !self.order_by.is_empty() {
            let elements = self.order_by.iter().map(|o| o.to_string()).collect::<Vec<_>>();
            clauses.push(format!("ORDER BY {}", elements.join(", ")));
        }
        if let Some(window) = &self.window {
            clauses.push(window.to_string());
        }
        write!(f, "{} OVER ({})", self.fn_call, clauses.join(" "))
    }
}
