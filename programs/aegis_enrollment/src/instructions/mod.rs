// programs/aegis_enrollment/src/instructions/mod.rs

pub mod coverage;
pub mod enrollment;
pub mod initialize;
pub mod utilization;

pub use coverage::*;
pub use enrollment::*;
pub use initialize::*;
pub use utilization::*;
