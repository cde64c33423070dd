// programs/aegis_claims/src/instructions/initialize.rs

use anchor_lang::prelude::*;

use crate::state::ClaimsConfig;
use crate::errors::ClaimsError;
use crate::events::{ClaimsConfigInitialized, ClaimsPauseToggled};

/// Initialize the claims program configuration
#[derive(Accounts)]
pub struct InitializeClaimsConfig<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + ClaimsConfig::INIT_SPACE,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeClaimsConfigParams {
    /// Review committee able to adjudicate claims
    pub claims_committee: Pubkey,
}

pub fn initialize_claims_config(
    ctx: Context<InitializeClaimsConfig>,
    params: InitializeClaimsConfigParams,
) -> Result<()> {
    let clock = Clock::get()?;

    let config = &mut ctx.accounts.claims_config;
    config.authority = ctx.accounts.authority.key();
    config.claims_committee = params.claims_committee;
    config.total_claims = 0;
    config.total_approved = 0;
    config.total_rejected = 0;
    config.total_paid = 0;
    config.total_paid_amount = 0;
    config.is_active = true;
    config.bump = ctx.bumps.claims_config;

    emit!(ClaimsConfigInitialized {
        authority: config.authority,
        claims_committee: config.claims_committee,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Pause or resume claims processing
#[derive(Accounts)]
pub struct SetClaimsPause<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
        constraint = claims_config.authority == authority.key() @ ClaimsError::Unauthorized
    )]
    pub claims_config: Account<'info, ClaimsConfig>,

    pub authority: Signer<'info>,
}

pub fn set_claims_pause(ctx: Context<SetClaimsPause>, is_active: bool) -> Result<()> {
    let clock = Clock::get()?;

    ctx.accounts.claims_config.is_active = is_active;

    emit!(ClaimsPauseToggled {
        is_active,
        changed_by: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
