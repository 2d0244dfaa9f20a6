pub mod aggregate_fns;
pub use aggregate_fns::*;

pub mod ranking_fns;
pub use ranking_fns::*;

pub mod offset_fns;
pub use offset_fns::*;
