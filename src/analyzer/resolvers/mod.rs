pub mod analytic_resolver;
pub use analytic_resolver::*;
