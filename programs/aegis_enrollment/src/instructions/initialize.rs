// programs/aegis_enrollment/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};
use crate::state::EnrollmentConfig;
use crate::events::EnrollmentConfigInitialized;

/// Initialize the enrollment program configuration
#[derive(Accounts)]
pub struct InitializeEnrollmentConfig<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + EnrollmentConfig::INIT_SPACE,
        seeds = [EnrollmentConfig::SEED_PREFIX],
        bump
    )]
    pub enrollment_config: Account<'info, EnrollmentConfig>,

    /// Custody vault (wallet program) that receives premiums
    pub premium_vault: Account<'info, TokenAccount>,

    pub usdc_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeEnrollmentConfigParams {
    /// Claims-config PDA allowed to record claim outcomes
    pub claims_authority: Pubkey,
}

pub fn initialize_enrollment_config(
    ctx: Context<InitializeEnrollmentConfig>,
    params: InitializeEnrollmentConfigParams,
) -> Result<()> {
    let clock = Clock::get()?;

    let config = &mut ctx.accounts.enrollment_config;
    config.authority = ctx.accounts.authority.key();
    config.claims_authority = params.claims_authority;
    config.premium_vault = ctx.accounts.premium_vault.key();
    config.usdc_mint = ctx.accounts.usdc_mint.key();
    config.total_enrollments = 0;
    config.bump = ctx.bumps.enrollment_config;

    emit!(EnrollmentConfigInitialized {
        authority: config.authority,
        claims_authority: config.claims_authority,
        premium_vault: config.premium_vault,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
