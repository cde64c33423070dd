// programs/aegis_enrollment/src/lib.rs
//
// Aegis Enrollment Program
// ========================
// Enrollment lifecycle and per-member utilization tracking:
// - Plan enrollment with up-front premium collection
// - Coverage windows, renewals, grace periods, cancellations with
//   pro-rata refunds
// - Utilization counters (pending/approved/rejected claims, deductible,
//   out-of-pocket), written only by the claims program via CPI

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::ClaimOutcome;

declare_id!("7b2bnKcX2jBZ5VoV9HE7i1HWsFLTUbsLDNLuSjLBsnpo");

#[program]
pub mod aegis_enrollment {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the enrollment program configuration
    pub fn initialize_enrollment_config(
        ctx: Context<InitializeEnrollmentConfig>,
        params: InitializeEnrollmentConfigParams,
    ) -> Result<()> {
        instructions::initialize::initialize_enrollment_config(ctx, params)
    }

    // ==================== ENROLLMENT LIFECYCLE ====================

    /// Enroll a member in a plan
    pub fn enroll(ctx: Context<Enroll>, params: EnrollParams) -> Result<()> {
        instructions::enrollment::enroll(ctx, params)
    }

    /// Cancel an enrollment (pro-rata refund for annual schedules)
    pub fn cancel_enrollment(ctx: Context<CancelEnrollment>, reason: String) -> Result<()> {
        instructions::enrollment::cancel_enrollment(ctx, reason)
    }

    /// Renew an enrollment for another term
    pub fn renew_enrollment(ctx: Context<RenewEnrollment>) -> Result<()> {
        instructions::enrollment::renew_enrollment(ctx)
    }

    /// Crank a lapsed enrollment into GracePeriod / Expired
    pub fn expire_enrollment(ctx: Context<ExpireEnrollment>) -> Result<()> {
        instructions::enrollment::expire_enrollment(ctx)
    }

    // ==================== COVERAGE MANAGEMENT ====================

    /// Assign the member's primary care provider
    pub fn assign_primary_provider(ctx: Context<AssignPrimaryProvider>) -> Result<()> {
        instructions::coverage::assign_primary_provider(ctx)
    }

    /// Suspend an active enrollment
    pub fn suspend_enrollment(ctx: Context<SuspendEnrollment>) -> Result<()> {
        instructions::coverage::suspend_enrollment(ctx)
    }

    /// Reactivate a suspended enrollment
    pub fn reactivate_enrollment(ctx: Context<ReactivateEnrollment>) -> Result<()> {
        instructions::coverage::reactivate_enrollment(ctx)
    }

    // ==================== UTILIZATION (CPI-only) ====================

    /// Record a claim outcome against an enrollment
    pub fn record_claim_outcome(
        ctx: Context<RecordClaimOutcome>,
        outcome: ClaimOutcome,
    ) -> Result<()> {
        instructions::utilization::record_claim_outcome(ctx, outcome)
    }
}
