// programs/aegis_claims/src/lib.rs
//
// Aegis Claims Program
// ====================
// The claims core of the Aegis Care protocol:
// - Claim submission with eligibility and coverage validation
// - Restricted status state machine with an append-only audit trail
// - Coverage adjudication (copay, deductible, coinsurance splits)
// - At-most-once settlement crediting the claimant's wallet
// - Appeals with committee review
//
// Every adjudication step updates the enrollment's utilization and the
// plan's statistics via CPI inside the same transaction, so the three
// aggregates can never drift apart.

use anchor_lang::prelude::*;

pub mod state;
pub mod coverage;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::PaymentMethod;

declare_id!("J65pg6g7caJvSvfGBsuwzzYiyxR1EJePP1NGuaPqRK6C");

#[program]
pub mod aegis_claims {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the claims program configuration
    pub fn initialize_claims_config(
        ctx: Context<InitializeClaimsConfig>,
        params: InitializeClaimsConfigParams,
    ) -> Result<()> {
        instructions::initialize::initialize_claims_config(ctx, params)
    }

    /// Pause or resume claims processing
    pub fn set_claims_pause(ctx: Context<SetClaimsPause>, is_active: bool) -> Result<()> {
        instructions::initialize::set_claims_pause(ctx, is_active)
    }

    // ==================== SUBMISSION ====================

    /// Submit a claim against an enrollment
    pub fn submit_claim(ctx: Context<SubmitClaim>, params: SubmitClaimParams) -> Result<()> {
        instructions::submission::submit_claim(ctx, params)
    }

    /// Withdraw an early-stage claim
    pub fn cancel_claim(ctx: Context<CancelClaim>) -> Result<()> {
        instructions::submission::cancel_claim(ctx)
    }

    // ==================== REVIEW ====================

    /// Assign a claim to a reviewer
    pub fn assign_claim(ctx: Context<AssignClaim>, reviewer: Pubkey) -> Result<()> {
        instructions::review::assign_claim(ctx, reviewer)
    }

    /// Approve a claim (amount defaults to the covered amount)
    pub fn approve_claim<'info>(
        ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
        amount: Option<u64>,
        notes: String,
    ) -> Result<()> {
        instructions::review::approve_claim(ctx, amount, notes)
    }

    /// Reject a claim with a mandatory reason
    pub fn reject_claim<'info>(
        ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
        reason: String,
    ) -> Result<()> {
        instructions::review::reject_claim(ctx, reason)
    }

    /// Approve part of a claim and reject the rest
    pub fn partially_approve_claim<'info>(
        ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
        approved_amount: u64,
        rejected_amount: u64,
        notes: String,
    ) -> Result<()> {
        instructions::review::partially_approve_claim(ctx, approved_amount, rejected_amount, notes)
    }

    // ==================== SETTLEMENT ====================

    /// Pay an approved claim (at most once)
    pub fn pay_claim(ctx: Context<PayClaim>, method: PaymentMethod, notes: String) -> Result<()> {
        instructions::settlement::pay_claim(ctx, method, notes)
    }

    // ==================== APPEALS ====================

    /// File an appeal against an approved or rejected claim
    pub fn appeal_claim(ctx: Context<AppealClaim>, reason: String) -> Result<()> {
        instructions::appeals::appeal_claim(ctx, reason)
    }

    /// Decide a filed appeal
    pub fn review_appeal<'info>(
        ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
        decision: AppealDecision,
        notes: String,
        amount: Option<u64>,
    ) -> Result<()> {
        instructions::appeals::review_appeal(ctx, decision, notes, amount)
    }
}
