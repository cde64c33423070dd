// programs/aegis_plans/src/instructions/statistics.rs
//
// Statistics counters are commands against the plan aggregate, gated to
// the program authorities registered in the catalog. The enrollment and
// claims programs invoke these via CPI inside their own transactions, so
// counter updates commit together with the state change they describe.

use anchor_lang::prelude::*;
use crate::state::{HmoPlan, PlanCatalog};
use crate::errors::PlansError;
use crate::events::{PlanCancellationRecorded, PlanClaimPaidRecorded, PlanEnrollmentRecorded};

/// Record a new enrollment against a plan (enrollment program only)
#[derive(Accounts)]
pub struct RecordEnrollment<'info> {
    #[account(
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        constraint = plan_catalog.enrollment_authority == authority.key() @ PlansError::Unauthorized
    )]
    pub plan_catalog: Account<'info, PlanCatalog>,

    #[account(
        mut,
        seeds = [HmoPlan::SEED_PREFIX, &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, HmoPlan>,

    /// Enrollment-config PDA signing the CPI
    pub authority: Signer<'info>,
}

pub fn record_enrollment(ctx: Context<RecordEnrollment>) -> Result<()> {
    let clock = Clock::get()?;
    let plan = &mut ctx.accounts.plan;

    plan.statistics.total_enrollments = plan
        .statistics
        .total_enrollments
        .checked_add(1)
        .ok_or(PlansError::MathOverflow)?;
    plan.statistics.active_enrollments = plan
        .statistics
        .active_enrollments
        .checked_add(1)
        .ok_or(PlansError::MathOverflow)?;

    emit!(PlanEnrollmentRecorded {
        plan_id: plan.plan_id,
        total_enrollments: plan.statistics.total_enrollments,
        active_enrollments: plan.statistics.active_enrollments,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Record a cancelled or expired enrollment (enrollment program only)
#[derive(Accounts)]
pub struct RecordCancellation<'info> {
    #[account(
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        constraint = plan_catalog.enrollment_authority == authority.key() @ PlansError::Unauthorized
    )]
    pub plan_catalog: Account<'info, PlanCatalog>,

    #[account(
        mut,
        seeds = [HmoPlan::SEED_PREFIX, &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, HmoPlan>,

    pub authority: Signer<'info>,
}

pub fn record_cancellation(ctx: Context<RecordCancellation>) -> Result<()> {
    let clock = Clock::get()?;
    let plan = &mut ctx.accounts.plan;

    plan.statistics.active_enrollments = plan.statistics.active_enrollments.saturating_sub(1);
    plan.statistics.cancelled_enrollments = plan
        .statistics
        .cancelled_enrollments
        .checked_add(1)
        .ok_or(PlansError::MathOverflow)?;

    emit!(PlanCancellationRecorded {
        plan_id: plan.plan_id,
        active_enrollments: plan.statistics.active_enrollments,
        cancelled_enrollments: plan.statistics.cancelled_enrollments,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Record a paid claim against a plan (claims program only)
#[derive(Accounts)]
pub struct RecordClaimPaid<'info> {
    #[account(
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        constraint = plan_catalog.claims_authority == authority.key() @ PlansError::Unauthorized
    )]
    pub plan_catalog: Account<'info, PlanCatalog>,

    #[account(
        mut,
        seeds = [HmoPlan::SEED_PREFIX, &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, HmoPlan>,

    /// Claims-config PDA signing the CPI
    pub authority: Signer<'info>,
}

pub fn record_claim_paid(ctx: Context<RecordClaimPaid>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let plan = &mut ctx.accounts.plan;

    require!(amount > 0, PlansError::InvalidAmount);

    plan.statistics.claims_paid_count = plan
        .statistics
        .claims_paid_count
        .checked_add(1)
        .ok_or(PlansError::MathOverflow)?;
    plan.statistics.total_claims_paid = plan
        .statistics
        .total_claims_paid
        .checked_add(amount)
        .ok_or(PlansError::MathOverflow)?;

    emit!(PlanClaimPaidRecorded {
        plan_id: plan.plan_id,
        amount,
        claims_paid_count: plan.statistics.claims_paid_count,
        total_claims_paid: plan.statistics.total_claims_paid,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
