// programs/aegis_wallet/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::state::{LedgerConfig, VaultAuthority};
use crate::errors::WalletError;
use crate::events::{CustodyVaultCreated, LedgerInitialized};

/// Initialize the wallet ledger
#[derive(Accounts)]
pub struct InitializeLedger<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + LedgerConfig::INIT_SPACE,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    pub usdc_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeLedgerParams {
    /// Claims-config PDA allowed to credit wallets for settlements
    pub claims_authority: Pubkey,
    /// Enrollment-config PDA allowed to credit wallets for refunds
    pub enrollment_authority: Pubkey,
}

pub fn initialize_ledger(
    ctx: Context<InitializeLedger>,
    params: InitializeLedgerParams,
) -> Result<()> {
    let clock = Clock::get()?;

    let config = &mut ctx.accounts.ledger_config;
    config.authority = ctx.accounts.authority.key();
    config.claims_authority = params.claims_authority;
    config.enrollment_authority = params.enrollment_authority;
    config.usdc_mint = ctx.accounts.usdc_mint.key();
    config.custody_vault = Pubkey::default();
    config.transaction_count = 0;
    config.total_credited = 0;
    config.total_debited = 0;
    config.bump = ctx.bumps.ledger_config;

    emit!(LedgerInitialized {
        authority: config.authority,
        claims_authority: config.claims_authority,
        enrollment_authority: config.enrollment_authority,
        usdc_mint: config.usdc_mint,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Create the custody vault holding all deposited funds
#[derive(Accounts)]
pub struct CreateCustodyVault<'info> {
    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
        constraint = ledger_config.authority == authority.key() @ WalletError::Unauthorized
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        init,
        payer = authority,
        space = 8 + VaultAuthority::INIT_SPACE,
        seeds = [VaultAuthority::SEED_PREFIX],
        bump
    )]
    pub vault_authority: Account<'info, VaultAuthority>,

    #[account(
        init,
        payer = authority,
        token::mint = usdc_mint,
        token::authority = vault_authority,
        seeds = [b"custody_vault"],
        bump
    )]
    pub custody_vault: Account<'info, TokenAccount>,

    #[account(
        constraint = usdc_mint.key() == ledger_config.usdc_mint @ WalletError::InvalidMint
    )]
    pub usdc_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn create_custody_vault(ctx: Context<CreateCustodyVault>) -> Result<()> {
    let clock = Clock::get()?;

    let vault_authority = &mut ctx.accounts.vault_authority;
    vault_authority.custody_vault = ctx.accounts.custody_vault.key();
    vault_authority.usdc_mint = ctx.accounts.usdc_mint.key();
    vault_authority.bump = ctx.bumps.vault_authority;

    ctx.accounts.ledger_config.custody_vault = ctx.accounts.custody_vault.key();

    emit!(CustodyVaultCreated {
        vault_authority: vault_authority.key(),
        custody_vault: ctx.accounts.custody_vault.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
