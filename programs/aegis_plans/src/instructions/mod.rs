// programs/aegis_plans/src/instructions/mod.rs

pub mod catalog;
pub mod initialize;
pub mod statistics;

pub use catalog::*;
pub use initialize::*;
pub use statistics::*;
