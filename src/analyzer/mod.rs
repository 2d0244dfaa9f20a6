pub mod analyzer_error;
pub use analyzer_error::*;

pub mod analyzer_config;
pub use analyzer_config::*;

pub mod analysis_context;
pub use analysis_context::*;

pub mod aggregate_info_base;
pub use aggregate_info_base::*;

pub mod aggregate_info;
pub use aggregate_info::*;

pub mod analytic_info;
pub use analytic_info::*;

pub mod select_analyzer;
pub use select_analyzer::*;

pub mod resolvers;
pub use resolvers::*;
