// programs/aegis_plans/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum PlansError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Invalid plan configuration")]
    InvalidPlanConfig,

    #[msg("Coverage percentage exceeds 100%")]
    InvalidCoverageBps,

    #[msg("Duplicate coverage rule for service type")]
    DuplicateServiceRule,

    #[msg("Plan name is required")]
    NameRequired,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}
