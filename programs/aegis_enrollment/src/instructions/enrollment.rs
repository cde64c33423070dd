// programs/aegis_enrollment/src/instructions/enrollment.rs

use aegis_core::money;
use aegis_core::{EnrollmentKind, PaymentSchedule};
use aegis_plans::state::{HmoPlan, PlanCatalog};
use aegis_wallet::state::{LedgerConfig, ReferenceKind, Wallet, WalletKind};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};

use crate::state::{Enrollment, EnrollmentConfig, EnrollmentStatus};
use crate::errors::EnrollmentError;
use crate::events::{EnrollmentCancelled, EnrollmentLapsed, EnrollmentRenewed, MemberEnrolled};

/// Enroll a member in a plan. The premium for the first term moves into
/// the custody vault in the same transaction that activates coverage.
#[derive(Accounts)]
pub struct Enroll<'info> {
    #[account(
        mut,
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump = enrollment_config.bump,
    )]
    pub enrollment_config: Account<'info, EnrollmentConfig>,

    #[account(
        init,
        payer = member,
        space = 8 + Enrollment::INIT_SPACE,
        seeds = [
            Enrollment::SEED_PREFIX,
            &enrollment_config.total_enrollments.to_le_bytes()
        ],
        bump
    )]
    pub enrollment: Box<Account<'info, Enrollment>>,

    #[account(
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        seeds::program = plans_program.key(),
    )]
    pub plan_catalog: Box<Account<'info, PlanCatalog>>,

    #[account(
        mut,
        seeds = [HmoPlan::SEED_PREFIX, &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
        seeds::program = plans_program.key(),
    )]
    pub plan: Box<Account<'info, HmoPlan>>,

    /// Member's token account paying the premium
    #[account(
        mut,
        constraint = source.mint == enrollment_config.usdc_mint
            @ EnrollmentError::CurrencyMismatch
    )]
    pub source: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = premium_vault.key() == enrollment_config.premium_vault
            @ EnrollmentError::CurrencyMismatch
    )]
    pub premium_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub member: Signer<'info>,

    pub plans_program: Program<'info, aegis_plans::program::AegisPlans>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct EnrollParams {
    pub kind: EnrollmentKind,
    pub schedule: PaymentSchedule,
    pub dependents: u8,
    pub primary_provider: Option<Pubkey>,
}

pub fn enroll(ctx: Context<Enroll>, params: EnrollParams) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let plan = &ctx.accounts.plan;

    require!(plan.accepts_enrollments(), EnrollmentError::PlanClosed);
    require!(
        params.dependents <= plan.dependents_allowed,
        EnrollmentError::TooManyDependents
    );

    let premium = plan.premium_for(params.kind, params.schedule);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.premium_vault.to_account_info(),
                authority: ctx.accounts.member.to_account_info(),
            },
        ),
        premium,
    )?;

    let enrollment_id = ctx.accounts.enrollment_config.total_enrollments;
    let coverage_end = now
        .checked_add(params.schedule.term_seconds())
        .ok_or(EnrollmentError::InvalidCoverageWindow)?;

    let enrollment = &mut ctx.accounts.enrollment;
    enrollment.enrollment_id = enrollment_id;
    enrollment.member = ctx.accounts.member.key();
    enrollment.plan = plan.key();
    enrollment.plan_id = plan.plan_id;
    enrollment.status = EnrollmentStatus::Active;
    enrollment.kind = params.kind;
    enrollment.schedule = params.schedule;
    enrollment.coverage_start = now;
    enrollment.coverage_end = coverage_end;
    enrollment.dependents = params.dependents;
    enrollment.primary_provider = params.primary_provider;
    enrollment.premium_paid = premium;
    enrollment.currency = plan.currency;
    enrollment.limits.deductible_total = plan.deductible;
    enrollment.limits.max_out_of_pocket = plan.max_out_of_pocket;
    enrollment.limits.annual_max = plan.annual_max;
    enrollment.utilization = Default::default();
    enrollment.cancelled_at = 0;
    enrollment.cancellation_reason = String::new();
    enrollment.created_at = now;
    enrollment.bump = ctx.bumps.enrollment;

    // Bump the plan's counters, signed as the enrollment-config PDA
    let config_bump = ctx.accounts.enrollment_config.bump;
    let signer_seeds: &[&[u8]] = &[EnrollmentConfig::SEED_PREFIX, &[config_bump]];
    aegis_plans::cpi::record_enrollment(CpiContext::new_with_signer(
        ctx.accounts.plans_program.to_account_info(),
        aegis_plans::cpi::accounts::RecordEnrollment {
            plan_catalog: ctx.accounts.plan_catalog.to_account_info(),
            plan: ctx.accounts.plan.to_account_info(),
            authority: ctx.accounts.enrollment_config.to_account_info(),
        },
        &[signer_seeds],
    ))?;

    let config = &mut ctx.accounts.enrollment_config;
    config.total_enrollments = config
        .total_enrollments
        .checked_add(1)
        .ok_or(EnrollmentError::MathOverflow)?;

    emit!(MemberEnrolled {
        enrollment_id,
        member: ctx.accounts.member.key(),
        plan_id: plan.plan_id,
        kind: params.kind,
        schedule: params.schedule,
        premium_paid: premium,
        currency: plan.currency,
        coverage_start: now,
        coverage_end,
        dependents: params.dependents,
        timestamp: now,
    });

    Ok(())
}

/// Cancel an enrollment. Annual premiums are refunded pro-rata for the
/// unused coverage days into the member's personal wallet; monthly
/// premiums are not refunded.
#[derive(Accounts)]
pub struct CancelEnrollment<'info> {
    #[account(
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump = enrollment_config.bump,
    )]
    pub enrollment_config: Account<'info, EnrollmentConfig>,

    #[account(
        mut,
        seeds = [Enrollment::SEED_PREFIX, &enrollment.enrollment_id.to_le_bytes()],
        bump = enrollment.bump,
        constraint = enrollment.member == member.key() @ EnrollmentError::Unauthorized
    )]
    pub enrollment: Box<Account<'info, Enrollment>>,

    #[account(
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        seeds::program = plans_program.key(),
    )]
    pub plan_catalog: Box<Account<'info, PlanCatalog>>,

    #[account(
        mut,
        constraint = plan.key() == enrollment.plan @ EnrollmentError::Unauthorized
    )]
    pub plan: Box<Account<'info, HmoPlan>>,

    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
        seeds::program = wallet_program.key(),
    )]
    pub ledger_config: Box<Account<'info, LedgerConfig>>,

    /// Member's personal wallet receiving any pro-rata refund
    #[account(
        mut,
        constraint = member_wallet.owner == member.key() @ EnrollmentError::Unauthorized,
        constraint = member_wallet.kind == WalletKind::Personal @ EnrollmentError::Unauthorized
    )]
    pub member_wallet: Box<Account<'info, Wallet>>,

    /// CHECK: transaction record PDA initialized by the wallet program
    #[account(mut)]
    pub transaction_record: UncheckedAccount<'info>,

    #[account(mut)]
    pub member: Signer<'info>,

    pub plans_program: Program<'info, aegis_plans::program::AegisPlans>,
    pub wallet_program: Program<'info, aegis_wallet::program::AegisWallet>,
    pub system_program: Program<'info, System>,
}

pub fn cancel_enrollment(ctx: Context<CancelEnrollment>, reason: String) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    require!(!reason.trim().is_empty(), EnrollmentError::ReasonRequired);
    require!(
        ctx.accounts.enrollment.can_be_cancelled(),
        EnrollmentError::NotCancellable
    );

    let enrollment = &mut ctx.accounts.enrollment;
    let unused_days = enrollment.unused_days(now);
    let refund_amount = match enrollment.schedule {
        PaymentSchedule::Annual => money::pro_rata(
            enrollment.premium_paid,
            unused_days,
            PaymentSchedule::Annual.term_days(),
        ),
        PaymentSchedule::Monthly => 0,
    };

    enrollment.status = EnrollmentStatus::Cancelled;
    enrollment.cancelled_at = now;
    enrollment.cancellation_reason = reason.clone();

    let config_bump = ctx.accounts.enrollment_config.bump;
    let signer_seeds: &[&[u8]] = &[EnrollmentConfig::SEED_PREFIX, &[config_bump]];

    if refund_amount > 0 {
        aegis_wallet::cpi::credit(
            CpiContext::new_with_signer(
                ctx.accounts.wallet_program.to_account_info(),
                aegis_wallet::cpi::accounts::Credit {
                    ledger_config: ctx.accounts.ledger_config.to_account_info(),
                    wallet: ctx.accounts.member_wallet.to_account_info(),
                    transaction_record: ctx.accounts.transaction_record.to_account_info(),
                    authority: ctx.accounts.enrollment_config.to_account_info(),
                    payer: ctx.accounts.member.to_account_info(),
                    system_program: ctx.accounts.system_program.to_account_info(),
                },
                &[signer_seeds],
            ),
            aegis_wallet::instructions::LedgerEntryParams {
                amount: refund_amount,
                currency: ctx.accounts.enrollment.currency,
                reference_kind: ReferenceKind::Enrollment,
                reference_id: ctx.accounts.enrollment.enrollment_id,
            },
        )?;
    }

    aegis_plans::cpi::record_cancellation(CpiContext::new_with_signer(
        ctx.accounts.plans_program.to_account_info(),
        aegis_plans::cpi::accounts::RecordCancellation {
            plan_catalog: ctx.accounts.plan_catalog.to_account_info(),
            plan: ctx.accounts.plan.to_account_info(),
            authority: ctx.accounts.enrollment_config.to_account_info(),
        },
        &[signer_seeds],
    ))?;

    emit!(EnrollmentCancelled {
        enrollment_id: ctx.accounts.enrollment.enrollment_id,
        member: ctx.accounts.member.key(),
        plan_id: ctx.accounts.enrollment.plan_id,
        refund_amount,
        unused_days,
        reason,
        timestamp: now,
    });

    Ok(())
}

/// Renew an enrollment for another term
#[derive(Accounts)]
pub struct RenewEnrollment<'info> {
    #[account(
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump = enrollment_config.bump,
    )]
    pub enrollment_config: Account<'info, EnrollmentConfig>,

    #[account(
        mut,
        seeds = [Enrollment::SEED_PREFIX, &enrollment.enrollment_id.to_le_bytes()],
        bump = enrollment.bump,
        constraint = enrollment.member == member.key() @ EnrollmentError::Unauthorized
    )]
    pub enrollment: Box<Account<'info, Enrollment>>,

    #[account(
        constraint = plan.key() == enrollment.plan @ EnrollmentError::Unauthorized
    )]
    pub plan: Box<Account<'info, HmoPlan>>,

    #[account(
        mut,
        constraint = source.mint == enrollment_config.usdc_mint
            @ EnrollmentError::CurrencyMismatch
    )]
    pub source: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = premium_vault.key() == enrollment_config.premium_vault
            @ EnrollmentError::CurrencyMismatch
    )]
    pub premium_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub member: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn renew_enrollment(ctx: Context<RenewEnrollment>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let plan = &ctx.accounts.plan;

    require!(
        ctx.accounts.enrollment.can_be_renewed(now),
        EnrollmentError::NotRenewable
    );
    require!(plan.accepts_enrollments(), EnrollmentError::PlanClosed);

    let premium = plan.premium_for(
        ctx.accounts.enrollment.kind,
        ctx.accounts.enrollment.schedule,
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.premium_vault.to_account_info(),
                authority: ctx.accounts.member.to_account_info(),
            },
        ),
        premium,
    )?;

    let enrollment = &mut ctx.accounts.enrollment;
    let new_coverage_end = enrollment
        .coverage_end
        .checked_add(enrollment.schedule.term_seconds())
        .ok_or(EnrollmentError::InvalidCoverageWindow)?;
    enrollment.coverage_end = new_coverage_end;
    enrollment.premium_paid = premium;
    enrollment.status = EnrollmentStatus::Active;

    emit!(EnrollmentRenewed {
        enrollment_id: enrollment.enrollment_id,
        member: enrollment.member,
        plan_id: enrollment.plan_id,
        premium_paid: premium,
        new_coverage_end,
        timestamp: now,
    });

    Ok(())
}

/// Crank a lapsed enrollment forward. Permissionless: anyone may move an
/// enrollment past its coverage window into GracePeriod, then Expired.
#[derive(Accounts)]
pub struct ExpireEnrollment<'info> {
    #[account(
        mut,
        seeds = [Enrollment::SEED_PREFIX, &enrollment.enrollment_id.to_le_bytes()],
        bump = enrollment.bump,
    )]
    pub enrollment: Account<'info, Enrollment>,
}

pub fn expire_enrollment(ctx: Context<ExpireEnrollment>) -> Result<()> {
    let clock = Clock::get()?;
    let enrollment = &mut ctx.accounts.enrollment;

    enrollment.lapse(clock.unix_timestamp)?;

    emit!(EnrollmentLapsed {
        enrollment_id: enrollment.enrollment_id,
        member: enrollment.member,
        new_status: enrollment.status,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
