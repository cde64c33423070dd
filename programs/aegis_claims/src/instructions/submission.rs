// programs/aegis_claims/src/instructions/submission.rs

use aegis_core::ServiceType;
use aegis_enrollment::state::{ClaimOutcome, Enrollment, EnrollmentConfig};
use aegis_plans::state::HmoPlan;
use anchor_lang::prelude::*;

use crate::state::{Claim, ClaimStatus, ClaimsConfig, FILING_WINDOW_SECONDS};
use crate::errors::ClaimsError;
use crate::events::{ClaimCancelled, ClaimSubmitted};

/// Submit a claim against an enrollment. The claim and the enrollment's
/// pending counter move in the same transaction.
#[derive(Accounts)]
pub struct SubmitClaim<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
        constraint = claims_config.is_active @ ClaimsError::ClaimsPaused
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(
        init,
        payer = claimant,
        space = 8 + Claim::INIT_SPACE,
        seeds = [Claim::SEED_PREFIX, &claims_config.total_claims.to_le_bytes()],
        bump
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
        constraint = enrollment.accepts_claims() @ ClaimsError::EnrollmentNotClaimable,
        constraint = claimant.key() == enrollment.member
            || Some(claimant.key()) == enrollment.primary_provider
            @ ClaimsError::Unauthorized
    )]
    pub enrollment: Box<Account<'info, Enrollment>>,

    #[account(
        constraint = plan.key() == enrollment.plan @ ClaimsError::Unauthorized
    )]
    pub plan: Box<Account<'info, HmoPlan>>,

    #[account(mut)]
    pub claimant: Signer<'info>,

    pub enrollment_program: Program<'info, aegis_enrollment::program::AegisEnrollment>,
    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct SubmitClaimParams {
    pub service_type: ServiceType,
    pub service_date: i64,
    pub diagnosis: String,
    pub total_billed: u64,
}

pub fn submit_claim(ctx: Context<SubmitClaim>, params: SubmitClaimParams) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let enrollment = &ctx.accounts.enrollment;
    let plan = &ctx.accounts.plan;

    require!(params.total_billed > 0, ClaimsError::InvalidClaimAmount);
    require!(params.service_date <= now, ClaimsError::ServiceDateInFuture);
    require!(
        now.saturating_sub(params.service_date) <= FILING_WINDOW_SECONDS,
        ClaimsError::FilingWindowElapsed
    );
    require!(
        enrollment.is_in_coverage(params.service_date),
        ClaimsError::OutsideCoverageWindow
    );

    // Reject uncovered services at the door rather than at review time
    let rule = plan
        .coverage_for(params.service_type)
        .ok_or(ClaimsError::ServiceNotCovered)?;
    require!(rule.covered, ClaimsError::ServiceNotCovered);

    let claim_id = ctx.accounts.claims_config.total_claims;
    let claim = &mut ctx.accounts.claim;
    claim.claim_id = claim_id;
    claim.enrollment = enrollment.key();
    claim.enrollment_id = enrollment.enrollment_id;
    claim.plan = plan.key();
    claim.plan_id = plan.plan_id;
    claim.patient = enrollment.member;
    claim.claimant = ctx.accounts.claimant.key();
    claim.service_type = params.service_type;
    claim.service_date = params.service_date;
    claim.diagnosis = params.diagnosis;
    claim.billing.total_billed = params.total_billed;
    claim.currency = enrollment.currency;
    claim.status = ClaimStatus::Submitted;
    claim.status_history = vec![];
    claim.appeal = Default::default();
    claim.processing = Default::default();
    claim.payment_transaction = None;
    claim.payment_method = Default::default();
    claim.paid_at = 0;
    claim.submitted_at = now;
    claim.bump = ctx.bumps.claim;
    claim.push_history(
        ClaimStatus::Submitted,
        ctx.accounts.claimant.key(),
        String::new(),
        now,
    );

    // claims_pending += 1, signed as the claims-config PDA
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
        ClaimOutcome::Submitted,
    )?;

    let config = &mut ctx.accounts.claims_config;
    config.total_claims = config
        .total_claims
        .checked_add(1)
        .ok_or(ClaimsError::MathOverflow)?;

    emit!(ClaimSubmitted {
        claim_id,
        enrollment_id: ctx.accounts.enrollment.enrollment_id,
        plan_id: ctx.accounts.plan.plan_id,
        patient: ctx.accounts.enrollment.member,
        claimant: ctx.accounts.claimant.key(),
        service_type: params.service_type,
        total_billed: params.total_billed,
        currency: ctx.accounts.enrollment.currency,
        timestamp: now,
    });

    Ok(())
}

/// Withdraw an early-stage claim (member or the original claimant)
#[derive(Accounts)]
pub struct CancelClaim<'info> {
    #[account(
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(
        mut,
        seeds = [Claim::SEED_PREFIX, &claim.claim_id.to_le_bytes()],
        bump = claim.bump,
        constraint = signer.key() == claim.patient || signer.key() == claim.claimant
            @ ClaimsError::Unauthorized
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

    pub signer: Signer<'info>,

    pub enrollment_program: Program<'info, aegis_enrollment::program::AegisEnrollment>,
}

pub fn cancel_claim(ctx: Context<CancelClaim>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    ctx.accounts.claim.record_transition(
        ClaimStatus::Cancelled,
        ctx.accounts.signer.key(),
        String::new(),
        now,
    )?;

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
        ClaimOutcome::Cancelled,
    )?;

    emit!(ClaimCancelled {
        claim_id: ctx.accounts.claim.claim_id,
        cancelled_by: ctx.accounts.signer.key(),
        timestamp: now,
    });

    Ok(())
}
