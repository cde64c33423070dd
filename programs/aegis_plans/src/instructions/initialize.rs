// programs/aegis_plans/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use crate::state::PlanCatalog;
use crate::events::PlanCatalogInitialized;

/// Initialize the plan catalog
#[derive(Accounts)]
pub struct InitializeCatalog<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + PlanCatalog::INIT_SPACE,
        seeds = [PlanCatalog::SEED_PREFIX],
        bump
    )]
    pub plan_catalog: Account<'info, PlanCatalog>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeCatalogParams {
    /// Claims-config PDA allowed to record paid claims
    pub claims_authority: Pubkey,
    /// Enrollment-config PDA allowed to record enrollments
    pub enrollment_authority: Pubkey,
}

pub fn initialize_catalog(
    ctx: Context<InitializeCatalog>,
    params: InitializeCatalogParams,
) -> Result<()> {
    let clock = Clock::get()?;

    let catalog = &mut ctx.accounts.plan_catalog;
    catalog.authority = ctx.accounts.authority.key();
    catalog.claims_authority = params.claims_authority;
    catalog.enrollment_authority = params.enrollment_authority;
    catalog.total_plans = 0;
    catalog.bump = ctx.bumps.plan_catalog;

    emit!(PlanCatalogInitialized {
        authority: catalog.authority,
        claims_authority: catalog.claims_authority,
        enrollment_authority: catalog.enrollment_authority,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
