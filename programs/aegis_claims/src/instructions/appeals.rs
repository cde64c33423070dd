// programs/aegis_claims/src/instructions/appeals.rs

use aegis_enrollment::state::ClaimOutcome;
use anchor_lang::prelude::*;

use crate::instructions::review::{self, AdjudicateClaim};
use crate::state::{Claim, ClaimStatus, ClaimsConfig};
use crate::errors::ClaimsError;
use crate::events::{AppealReviewed, ClaimAppealed};

/// File an appeal against an approved or rejected claim (member only)
#[derive(Accounts)]
pub struct AppealClaim<'info> {
    #[account(
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
        constraint = claims_config.is_active @ ClaimsError::ClaimsPaused
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(
        mut,
        seeds = [Claim::SEED_PREFIX, &claim.claim_id.to_le_bytes()],
        bump = claim.bump,
        constraint = claim.patient == member.key() @ ClaimsError::Unauthorized
    )]
    pub claim: Account<'info, Claim>,

    pub member: Signer<'info>,
}

pub fn appeal_claim(ctx: Context<AppealClaim>, reason: String) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let claim = &mut ctx.accounts.claim;

    require!(!reason.trim().is_empty(), ClaimsError::ReasonRequired);
    require!(!claim.appeal.filed, ClaimsError::AppealAlreadyFiled);

    let previous_status = claim.status;
    claim.record_transition(
        ClaimStatus::Appealed,
        ctx.accounts.member.key(),
        reason.clone(),
        now,
    )?;
    claim.appeal.filed = true;
    claim.appeal.reason = reason.clone();
    claim.appeal.filed_at = now;

    emit!(ClaimAppealed {
        claim_id: claim.claim_id,
        previous_status,
        reason,
        timestamp: now,
    });

    Ok(())
}

/// Committee decision on a filed appeal
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppealDecision {
    Approve,
    Reject,
}

/// Decide an appeal. An upheld appeal mirrors approval: it derives the
/// coverage breakdown and records the utilization outcome. A denied one
/// leaves the claim terminally Rejected and touches no enrollment
/// counters; the original rejection was already counted when the claim
/// first left review.
pub fn review_appeal<'info>(
    ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
    decision: AppealDecision,
    notes: String,
    amount: Option<u64>,
) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    require!(
        ctx.accounts.claim.status == ClaimStatus::Appealed,
        ClaimsError::InvalidClaimStatus
    );

    let decision_status = match decision {
        AppealDecision::Approve => {
            let (_, breakdown) = review::apply_approval(
                &mut ctx.accounts.claim,
                &ctx.accounts.enrollment,
                &ctx.accounts.plan,
                ctx.accounts.reviewer.key(),
                amount,
                notes,
                now,
            )?;
            review::record_outcome(
                &ctx,
                ClaimOutcome::Approved {
                    deductible: breakdown.patient_deductible,
                    out_of_pocket: breakdown.patient_total,
                },
            )?;
            let config = &mut ctx.accounts.claims_config;
            config.total_approved = config
                .total_approved
                .checked_add(1)
                .ok_or(ClaimsError::MathOverflow)?;
            ClaimStatus::Approved
        }
        AppealDecision::Reject => {
            review::apply_rejection(
                &mut ctx.accounts.claim,
                ctx.accounts.reviewer.key(),
                &notes,
                now,
            )?;
            // No utilization outcome here: claims_rejected was bumped by
            // the original rejection and must not be counted again.
            let config = &mut ctx.accounts.claims_config;
            config.total_rejected = config
                .total_rejected
                .checked_add(1)
                .ok_or(ClaimsError::MathOverflow)?;
            ClaimStatus::Rejected
        }
    };

    emit!(AppealReviewed {
        claim_id: ctx.accounts.claim.claim_id,
        decision: decision_status,
        reviewer: ctx.accounts.reviewer.key(),
        timestamp: now,
    });

    Ok(())
}
