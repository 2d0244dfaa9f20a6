pub mod column_type;
pub use column_type::*;

pub mod ids;
pub use ids::*;

pub mod slot_descriptor;
pub use slot_descriptor::*;

pub mod tuple_descriptor;
pub use tuple_descriptor::*;

pub mod descriptor_table;
pub use descriptor_table::*;
