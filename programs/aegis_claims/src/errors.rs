// programs/aegis_claims/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum ClaimsError {
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Claims processing is paused")]
    ClaimsPaused,

    #[msg("Invalid claim status for this transition")]
    InvalidClaimStatus,

    #[msg("Invalid claim amount")]
    InvalidClaimAmount,

    #[msg("Service is not covered by the plan")]
    ServiceNotCovered,

    #[msg("A reason is required")]
    ReasonRequired,

    #[msg("Claim has already been paid")]
    AlreadyPaid,

    #[msg("An appeal has already been filed for this claim")]
    AppealAlreadyFiled,

    #[msg("Service date is in the future")]
    ServiceDateInFuture,

    #[msg("Filing window for this service date has elapsed")]
    FilingWindowElapsed,

    #[msg("Enrollment is not accepting claims")]
    EnrollmentNotClaimable,

    #[msg("Service date falls outside the coverage window")]
    OutsideCoverageWindow,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}
