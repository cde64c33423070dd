// programs/aegis_enrollment/src/instructions/utilization.rs

use anchor_lang::prelude::*;

use crate::state::{ClaimOutcome, Enrollment, EnrollmentConfig};
use crate::errors::EnrollmentError;
use crate::events::ClaimOutcomeRecorded;

/// Record a claim outcome against an enrollment. Only the claims-config
/// PDA may call this (via CPI); it is the sole writer of the
/// utilization counters.
#[derive(Accounts)]
pub struct RecordClaimOutcome<'info> {
    #[account(
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump = enrollment_config.bump,
        constraint = enrollment_config.claims_authority == authority.key()
            @ EnrollmentError::Unauthorized
    )]
    pub enrollment_config: Account<'info, EnrollmentConfig>,

    #[account(
        mut,
        seeds = [Enrollment::SEED_PREFIX, &enrollment.enrollment_id.to_le_bytes()],
        bump = enrollment.bump,
    )]
    pub enrollment: Account<'info, Enrollment>,

    /// Claims-config PDA signing the CPI
    pub authority: Signer<'info>,
}

pub fn record_claim_outcome(
    ctx: Context<RecordClaimOutcome>,
    outcome: ClaimOutcome,
) -> Result<()> {
    let clock = Clock::get()?;
    let enrollment = &mut ctx.accounts.enrollment;

    let limits = enrollment.limits;
    enrollment.utilization.record(outcome, &limits);

    emit!(ClaimOutcomeRecorded {
        enrollment_id: enrollment.enrollment_id,
        outcome,
        claims_pending: enrollment.utilization.claims_pending,
        claims_approved: enrollment.utilization.claims_approved,
        claims_rejected: enrollment.utilization.claims_rejected,
        deductible_met: enrollment.utilization.deductible_met,
        out_of_pocket_spent: enrollment.utilization.out_of_pocket_spent,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
