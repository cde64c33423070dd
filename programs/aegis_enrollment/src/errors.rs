// programs/aegis_enrollment/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum EnrollmentError {
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Plan is not accepting enrollments")]
    PlanClosed,

    #[msg("Dependent count exceeds the plan allowance")]
    TooManyDependents,

    #[msg("Enrollment is not in a cancellable state")]
    NotCancellable,

    #[msg("Enrollment is outside its renewal window")]
    NotRenewable,

    #[msg("Coverage window has not lapsed")]
    NotExpirable,

    #[msg("Enrollment is not active")]
    EnrollmentInactive,

    #[msg("Enrollment is not suspended")]
    NotSuspended,

    #[msg("Cancellation reason is required")]
    ReasonRequired,

    #[msg("Invalid coverage window")]
    InvalidCoverageWindow,

    #[msg("Currency mismatch")]
    CurrencyMismatch,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}
