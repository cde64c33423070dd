// programs/aegis_claims/src/instructions/mod.rs

pub mod appeals;
pub mod initialize;
pub mod review;
pub mod settlement;
pub mod submission;

pub use appeals::*;
pub use initialize::*;
pub use review::*;
pub use settlement::*;
pub use submission::*;
