pub mod literal;
pub use literal::*;

pub mod slot_ref;
pub use slot_ref::*;

pub mod function_call;
pub use function_call::*;

pub mod analytic_expr;
pub use analytic_expr::*;

pub mod expr;
pub use expr::*;

pub mod substitution_map;
pub use substitution_map::*;
