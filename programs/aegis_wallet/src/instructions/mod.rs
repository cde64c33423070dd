// programs/aegis_wallet/src/instructions/mod.rs

pub mod initialize;
pub mod ledger;
pub mod sponsorships;
pub mod wallets;

pub use initialize::*;
pub use ledger::*;
pub use sponsorships::*;
pub use wallets::*;
