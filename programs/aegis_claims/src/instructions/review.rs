// programs/aegis_claims/src/instructions/review.rs

use aegis_enrollment::state::{ClaimOutcome, Enrollment, EnrollmentConfig};
use aegis_plans::state::HmoPlan;
use anchor_lang::prelude::*;

use crate::coverage::{self, CoverageBreakdown};
use crate::state::{Claim, ClaimStatus, ClaimsConfig};
use crate::errors::ClaimsError;
use crate::events::{ClaimApproved, ClaimAssigned, ClaimPartiallyApproved, ClaimRejected};

/// Assign a claim to a reviewer
#[derive(Accounts)]
pub struct AssignClaim<'info> {
    #[account(
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
        constraint = claims_config.is_active @ ClaimsError::ClaimsPaused,
        constraint = assigner.key() == claims_config.authority
            || assigner.key() == claims_config.claims_committee
            @ ClaimsError::Unauthorized
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(
        mut,
        seeds = [Claim::SEED_PREFIX, &claim.claim_id.to_le_bytes()],
        bump = claim.bump,
    )]
    pub claim: Account<'info, Claim>,

    pub assigner: Signer<'info>,
}

pub fn assign_claim(ctx: Context<AssignClaim>, reviewer: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let claim = &mut ctx.accounts.claim;

    claim.record_transition(
        ClaimStatus::UnderReview,
        ctx.accounts.assigner.key(),
        String::new(),
        now,
    )?;
    claim.processing.reviewer = reviewer;
    claim.processing.assigned_at = now;

    emit!(ClaimAssigned {
        claim_id: claim.claim_id,
        reviewer,
        assigned_by: ctx.accounts.assigner.key(),
        timestamp: now,
    });

    Ok(())
}

/// Accounts shared by the adjudication instructions (approve, reject,
/// partially approve): claim, its enrollment, and its plan, with the
/// enrollment program on hand for the utilization CPI.
#[derive(Accounts)]
pub struct AdjudicateClaim<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
        constraint = claims_config.is_active @ ClaimsError::ClaimsPaused,
        constraint = reviewer.key() == claims_config.authority
            || reviewer.key() == claims_config.claims_committee
            @ ClaimsError::Unauthorized
    )]
    pub claims_config: Box<Account<'info, ClaimsConfig>>,

    #[account(
        mut,
        seeds = [Claim::SEED_PREFIX, &claim.claim_id.to_le_bytes()],
        bump = claim.bump,
    )]
    pub claim: Box<Account<'info, Claim>>,

    #[account(
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump = enrollment_config.bump,
        seeds::program = enrollment_program.key(),
    )]
    pub enrollment_config: Box<Account<'info, EnrollmentConfig>>,

    #[account(
        mut,
        constraint = enrollment.key() == claim.enrollment @ ClaimsError::Unauthorized
    )]
    pub enrollment: Box<Account<'info, Enrollment>>,

    #[account(
        constraint = plan.key() == claim.plan @ ClaimsError::Unauthorized
    )]
    pub plan: Box<Account<'info, HmoPlan>>,

    pub reviewer: Signer<'info>,

    pub enrollment_program: Program<'info, aegis_enrollment::program::AegisEnrollment>,
}

/// Derive the coverage breakdown and move the claim to Approved,
/// filling the billing split. `amount` defaults to the covered amount
/// and is capped there. Shared by approve and appeal review.
pub(crate) fn apply_approval(
    claim: &mut Claim,
    enrollment: &Enrollment,
    plan: &HmoPlan,
    actor: Pubkey,
    amount: Option<u64>,
    notes: String,
    now: i64,
) -> Result<(u64, CoverageBreakdown)> {
    let rule = plan
        .coverage_for(claim.service_type)
        .ok_or(ClaimsError::ServiceNotCovered)?;
    let deductible_remaining = enrollment
        .utilization
        .deductible_remaining(&enrollment.limits);
    let breakdown = coverage::adjudicate(claim.billing.total_billed, rule, deductible_remaining)?;

    let approved = amount
        .unwrap_or(breakdown.covered_amount)
        .min(breakdown.covered_amount);
    require!(approved > 0, ClaimsError::InvalidClaimAmount);

    let was_appealed = claim.status == ClaimStatus::Appealed;
    claim.record_transition(ClaimStatus::Approved, actor, notes, now)?;

    claim.billing.covered_amount = breakdown.covered_amount;
    claim.billing.approved_amount = approved;
    claim.billing.patient_deductible = breakdown.patient_deductible;
    claim.billing.patient_copay = breakdown.patient_copay;
    claim.billing.patient_coinsurance = breakdown.patient_coinsurance;
    claim.billing.patient_total = breakdown.patient_total;
    claim.processing.review_completed_at = now;
    if was_appealed {
        claim.appeal.decided_at = now;
    }

    Ok((approved, breakdown))
}

/// Move the claim to Rejected. Shared by reject and appeal review.
pub(crate) fn apply_rejection(
    claim: &mut Claim,
    actor: Pubkey,
    reason: &str,
    now: i64,
) -> Result<()> {
    require!(!reason.trim().is_empty(), ClaimsError::ReasonRequired);

    let was_appealed = claim.status == ClaimStatus::Appealed;
    claim.record_transition(ClaimStatus::Rejected, actor, reason.to_string(), now)?;
    claim.processing.review_completed_at = now;
    if was_appealed {
        claim.appeal.decided_at = now;
    }

    Ok(())
}

pub(crate) fn record_outcome<'info>(
    ctx: &Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
    outcome: ClaimOutcome,
) -> Result<()> {
    let config_bump = ctx.accounts.claims_config.bump;
    let signer_seeds: &[&[u8]] = &[ClaimsConfig::SEED_PREFIX, &[config_bump]];
    aegis_enrollment::cpi::record_claim_outcome(
        CpiContext::new_with_signer(
            ctx.accounts.enrollment_program.to_account_info(),
            aegis_enrollment::cpi::accounts::RecordClaimOutcome {
                enrollment_config: ctx.accounts.enrollment_config.to_account_info(),
                enrollment: ctx.accounts.enrollment.to_account_info(),
                authority: ctx.accounts.claims_config.to_account_info(),
            },
            &[signer_seeds],
        ),
        outcome,
    )
}

pub fn approve_claim<'info>(
    ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
    amount: Option<u64>,
    notes: String,
) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let (approved, breakdown) = apply_approval(
        &mut ctx.accounts.claim,
        &ctx.accounts.enrollment,
        &ctx.accounts.plan,
        ctx.accounts.reviewer.key(),
        amount,
        notes,
        now,
    )?;

    record_outcome(
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

    let claim = &ctx.accounts.claim;
    emit!(ClaimApproved {
        claim_id: claim.claim_id,
        enrollment_id: claim.enrollment_id,
        total_billed: claim.billing.total_billed,
        covered_amount: claim.billing.covered_amount,
        approved_amount: approved,
        patient_total: claim.billing.patient_total,
        approver: ctx.accounts.reviewer.key(),
        timestamp: now,
    });

    Ok(())
}

pub fn reject_claim<'info>(
    ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
    reason: String,
) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    apply_rejection(
        &mut ctx.accounts.claim,
        ctx.accounts.reviewer.key(),
        &reason,
        now,
    )?;

    record_outcome(&ctx, ClaimOutcome::Rejected)?;

    let config = &mut ctx.accounts.claims_config;
    config.total_rejected = config
        .total_rejected
        .checked_add(1)
        .ok_or(ClaimsError::MathOverflow)?;

    emit!(ClaimRejected {
        claim_id: ctx.accounts.claim.claim_id,
        enrollment_id: ctx.accounts.claim.enrollment_id,
        reason,
        rejected_by: ctx.accounts.reviewer.key(),
        timestamp: now,
    });

    Ok(())
}

/// Approve part of a claim and reject the rest. Both amounts are
/// required; the billing split is still derived from the coverage rule
/// so the patient-responsibility fields stay consistent.
pub fn partially_approve_claim<'info>(
    ctx: Context<'_, '_, '_, 'info, AdjudicateClaim<'info>>,
    approved_amount: u64,
    rejected_amount: u64,
    notes: String,
) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let claim = &mut ctx.accounts.claim;

    require!(
        approved_amount > 0 && rejected_amount > 0,
        ClaimsError::InvalidClaimAmount
    );
    let split_total = approved_amount
        .checked_add(rejected_amount)
        .ok_or(ClaimsError::MathOverflow)?;
    require!(
        split_total <= claim.billing.total_billed,
        ClaimsError::InvalidClaimAmount
    );

    let rule = ctx
        .accounts
        .plan
        .coverage_for(claim.service_type)
        .ok_or(ClaimsError::ServiceNotCovered)?;
    let deductible_remaining = ctx
        .accounts
        .enrollment
        .utilization
        .deductible_remaining(&ctx.accounts.enrollment.limits);
    let breakdown = coverage::adjudicate(claim.billing.total_billed, rule, deductible_remaining)?;
    require!(
        approved_amount <= breakdown.covered_amount,
        ClaimsError::InvalidClaimAmount
    );

    claim.record_transition(
        ClaimStatus::PartiallyApproved,
        ctx.accounts.reviewer.key(),
        notes,
        now,
    )?;
    claim.billing.covered_amount = breakdown.covered_amount;
    claim.billing.approved_amount = approved_amount;
    claim.billing.rejected_amount = rejected_amount;
    claim.billing.patient_deductible = breakdown.patient_deductible;
    claim.billing.patient_copay = breakdown.patient_copay;
    claim.billing.patient_coinsurance = breakdown.patient_coinsurance;
    claim.billing.patient_total = breakdown.patient_total;
    claim.processing.review_completed_at = now;

    record_outcome(
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

    emit!(ClaimPartiallyApproved {
        claim_id: ctx.accounts.claim.claim_id,
        enrollment_id: ctx.accounts.claim.enrollment_id,
        approved_amount,
        rejected_amount,
        approver: ctx.accounts.reviewer.key(),
        timestamp: now,
    });

    Ok(())
}
