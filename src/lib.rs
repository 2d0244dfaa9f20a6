pub mod catalog;
pub use catalog::{ColumnType, DescriptorTable, SlotId, TupleId};

pub mod expr;
pub use expr::{AnalyticExpr, Expr, ExprSubstitutionMap, FunctionCall};

pub mod functions;

pub mod analyzer;
pub use analyzer::{AnalysisContext, AnalyticInfo, AnalyzerConfig, AnalyzerError, SelectBlockAnalyzer};
