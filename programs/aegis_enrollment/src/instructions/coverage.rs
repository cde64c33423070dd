// programs/aegis_enrollment/src/instructions/coverage.rs

use anchor_lang::prelude::*;

use crate::state::{Enrollment, EnrollmentConfig, EnrollmentStatus};
use crate::errors::EnrollmentError;
use crate::events::{EnrollmentStatusChanged, PrimaryProviderAssigned};

/// Assign or change the member's primary care provider
#[derive(Accounts)]
pub struct AssignPrimaryProvider<'info> {
    #[account(
        mut,
        seeds = [Enrollment::SEED_PREFIX, &enrollment.enrollment_id.to_le_bytes()],
        bump = enrollment.bump,
        constraint = enrollment.member == member.key() @ EnrollmentError::Unauthorized,
        constraint = enrollment.accepts_claims() @ EnrollmentError::EnrollmentInactive
    )]
    pub enrollment: Account<'info, Enrollment>,

    /// CHECK: provider wallet owner; settlements route to this pubkey's
    /// wallet, no signature needed to be nominated
    pub provider: UncheckedAccount<'info>,

    pub member: Signer<'info>,
}

pub fn assign_primary_provider(ctx: Context<AssignPrimaryProvider>) -> Result<()> {
    let clock = Clock::get()?;
    let enrollment = &mut ctx.accounts.enrollment;

    enrollment.primary_provider = Some(ctx.accounts.provider.key());

    emit!(PrimaryProviderAssigned {
        enrollment_id: enrollment.enrollment_id,
        member: enrollment.member,
        provider: ctx.accounts.provider.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Suspend an active enrollment (admin action, e.g. fraud review)
#[derive(Accounts)]
pub struct SuspendEnrollment<'info> {
    #[account(
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump = enrollment_config.bump,
        constraint = enrollment_config.authority == authority.key()
            @ EnrollmentError::Unauthorized
    )]
    pub enrollment_config: Account<'info, EnrollmentConfig>,

    #[account(
        mut,
        seeds = [Enrollment::SEED_PREFIX, &enrollment.enrollment_id.to_le_bytes()],
        bump = enrollment.bump,
        constraint = enrollment.status == EnrollmentStatus::Active
            @ EnrollmentError::EnrollmentInactive
    )]
    pub enrollment: Account<'info, Enrollment>,

    pub authority: Signer<'info>,
}

pub fn suspend_enrollment(ctx: Context<SuspendEnrollment>) -> Result<()> {
    let clock = Clock::get()?;
    let enrollment = &mut ctx.accounts.enrollment;

    let old_status = enrollment.status;
    enrollment.status = EnrollmentStatus::Suspended;

    emit!(EnrollmentStatusChanged {
        enrollment_id: enrollment.enrollment_id,
        old_status,
        new_status: EnrollmentStatus::Suspended,
        changed_by: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Reactivate a suspended enrollment
#[derive(Accounts)]
pub struct ReactivateEnrollment<'info> {
    #[account(
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump = enrollment_config.bump,
        constraint = enrollment_config.authority == authority.key()
            @ EnrollmentError::Unauthorized
    )]
    pub enrollment_config: Account<'info, EnrollmentConfig>,

    #[account(
        mut,
        seeds = [Enrollment::SEED_PREFIX, &enrollment.enrollment_id.to_le_bytes()],
        bump = enrollment.bump,
        constraint = enrollment.status == EnrollmentStatus::Suspended
            @ EnrollmentError::NotSuspended
    )]
    pub enrollment: Account<'info, Enrollment>,

    pub authority: Signer<'info>,
}

pub fn reactivate_enrollment(ctx: Context<ReactivateEnrollment>) -> Result<()> {
    let clock = Clock::get()?;
    let enrollment = &mut ctx.accounts.enrollment;

    let old_status = enrollment.status;
    enrollment.status = EnrollmentStatus::Active;

    emit!(EnrollmentStatusChanged {
        enrollment_id: enrollment.enrollment_id,
        old_status,
        new_status: EnrollmentStatus::Active,
        changed_by: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
