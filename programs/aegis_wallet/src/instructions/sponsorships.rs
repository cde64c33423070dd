// programs/aegis_wallet/src/instructions/sponsorships.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::state::{
    LedgerConfig, ReferenceKind, Sponsorship, SponsorshipStatus, TransactionKind,
    TransactionRecord, TransactionStatus, Wallet, WalletKind,
};
use crate::errors::WalletError;
use crate::events::{
    SponsorshipCompleted, SponsorshipCreated, SponsorshipFunded, SponsorshipPaused,
    SponsorshipResumed,
};

/// Create a sponsorship. The committed total is deposited into the
/// custody vault up-front so later draws are always backed.
#[derive(Accounts)]
#[instruction(params: CreateSponsorshipParams)]
pub struct CreateSponsorship<'info> {
    #[account(
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        init,
        payer = sponsor,
        space = 8 + Sponsorship::INIT_SPACE,
        seeds = [Sponsorship::SEED_PREFIX, &params.sponsorship_id.to_le_bytes()],
        bump
    )]
    pub sponsorship: Account<'info, Sponsorship>,

    /// Sponsor's token account funding the commitment
    #[account(
        mut,
        constraint = source.mint == ledger_config.usdc_mint @ WalletError::InvalidMint
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = custody_vault.key() == ledger_config.custody_vault @ WalletError::InvalidMint
    )]
    pub custody_vault: Account<'info, TokenAccount>,

    /// CHECK: beneficiary whose sponsored wallet will receive draws
    pub beneficiary: UncheckedAccount<'info>,

    #[account(mut)]
    pub sponsor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateSponsorshipParams {
    pub sponsorship_id: u64,
    pub total: u64,
    pub start: i64,
    pub end: i64,
}

pub fn create_sponsorship(
    ctx: Context<CreateSponsorship>,
    params: CreateSponsorshipParams,
) -> Result<()> {
    let clock = Clock::get()?;

    require!(params.total > 0, WalletError::InvalidAmount);
    require!(params.end > params.start, WalletError::InvalidSponsorshipConfig);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.custody_vault.to_account_info(),
                authority: ctx.accounts.sponsor.to_account_info(),
            },
        ),
        params.total,
    )?;

    let sponsorship = &mut ctx.accounts.sponsorship;
    sponsorship.sponsorship_id = params.sponsorship_id;
    sponsorship.sponsor = ctx.accounts.sponsor.key();
    sponsorship.beneficiary = ctx.accounts.beneficiary.key();
    sponsorship.total = params.total;
    sponsorship.used = 0;
    sponsorship.remaining = params.total;
    sponsorship.start = params.start;
    sponsorship.end = params.end;
    sponsorship.currency = aegis_core::Currency::Usd;
    sponsorship.status = SponsorshipStatus::Active;
    sponsorship.created_at = clock.unix_timestamp;
    sponsorship.bump = ctx.bumps.sponsorship;

    emit!(SponsorshipCreated {
        sponsorship_id: params.sponsorship_id,
        sponsor: sponsorship.sponsor,
        beneficiary: sponsorship.beneficiary,
        total: params.total,
        start: params.start,
        end: params.end,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Draw down a sponsorship into the beneficiary's sponsored wallet
#[derive(Accounts)]
pub struct FundSponsoredWallet<'info> {
    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [Sponsorship::SEED_PREFIX, &sponsorship.sponsorship_id.to_le_bytes()],
        bump = sponsorship.bump,
    )]
    pub sponsorship: Account<'info, Sponsorship>,

    #[account(
        mut,
        seeds = [
            Wallet::SEED_PREFIX,
            sponsorship.beneficiary.as_ref(),
            &WalletKind::Sponsored.seed()
        ],
        bump = wallet.bump,
        constraint = wallet.kind == WalletKind::Sponsored @ WalletError::InvalidWalletKind
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = authority,
        space = 8 + TransactionRecord::INIT_SPACE,
        seeds = [
            TransactionRecord::SEED_PREFIX,
            &ledger_config.transaction_count.to_le_bytes()
        ],
        bump
    )]
    pub transaction_record: Account<'info, TransactionRecord>,

    /// Sponsor or ledger admin
    #[account(
        mut,
        constraint = authority.key() == sponsorship.sponsor
            || authority.key() == ledger_config.authority @ WalletError::Unauthorized
    )]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn fund_sponsored_wallet(ctx: Context<FundSponsoredWallet>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.ledger_config;
    let sponsorship = &mut ctx.accounts.sponsorship;
    let wallet = &mut ctx.accounts.wallet;

    sponsorship.draw(amount, clock.unix_timestamp)?;
    let currency = wallet.balance.currency;
    wallet.apply_credit(amount, currency)?;

    let transaction_id = config.transaction_count;
    let record = &mut ctx.accounts.transaction_record;
    record.transaction_id = transaction_id;
    record.wallet = wallet.key();
    record.owner = wallet.owner;
    record.kind = TransactionKind::Credit;
    record.amount = amount;
    record.currency = currency;
    record.status = TransactionStatus::Completed;
    record.reference_kind = ReferenceKind::Sponsorship;
    record.reference_id = sponsorship.sponsorship_id;
    record.reverses = None;
    record.initiated_by = ctx.accounts.authority.key();
    record.created_at = clock.unix_timestamp;
    record.bump = ctx.bumps.transaction_record;

    config.transaction_count += 1;
    config.total_credited = config
        .total_credited
        .checked_add(amount)
        .ok_or(WalletError::MathOverflow)?;

    emit!(SponsorshipFunded {
        sponsorship_id: sponsorship.sponsorship_id,
        beneficiary: sponsorship.beneficiary,
        amount,
        remaining: sponsorship.remaining,
        transaction_id,
        timestamp: clock.unix_timestamp,
    });

    if sponsorship.status == SponsorshipStatus::Completed {
        emit!(SponsorshipCompleted {
            sponsorship_id: sponsorship.sponsorship_id,
            total_used: sponsorship.used,
            timestamp: clock.unix_timestamp,
        });
    }

    Ok(())
}

/// Pause an active sponsorship (sponsor only)
#[derive(Accounts)]
pub struct PauseSponsorship<'info> {
    #[account(
        mut,
        seeds = [Sponsorship::SEED_PREFIX, &sponsorship.sponsorship_id.to_le_bytes()],
        bump = sponsorship.bump,
        constraint = sponsorship.sponsor == sponsor.key() @ WalletError::Unauthorized,
        constraint = sponsorship.status == SponsorshipStatus::Active
            @ WalletError::SponsorshipInactive
    )]
    pub sponsorship: Account<'info, Sponsorship>,

    pub sponsor: Signer<'info>,
}

pub fn pause_sponsorship(ctx: Context<PauseSponsorship>) -> Result<()> {
    let clock = Clock::get()?;
    let sponsorship = &mut ctx.accounts.sponsorship;

    sponsorship.status = SponsorshipStatus::Paused;

    emit!(SponsorshipPaused {
        sponsorship_id: sponsorship.sponsorship_id,
        paused_by: ctx.accounts.sponsor.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Resume a paused sponsorship (sponsor only)
#[derive(Accounts)]
pub struct ResumeSponsorship<'info> {
    #[account(
        mut,
        seeds = [Sponsorship::SEED_PREFIX, &sponsorship.sponsorship_id.to_le_bytes()],
        bump = sponsorship.bump,
        constraint = sponsorship.sponsor == sponsor.key() @ WalletError::Unauthorized,
        constraint = sponsorship.status == SponsorshipStatus::Paused
            @ WalletError::SponsorshipNotPaused
    )]
    pub sponsorship: Account<'info, Sponsorship>,

    pub sponsor: Signer<'info>,
}

pub fn resume_sponsorship(ctx: Context<ResumeSponsorship>) -> Result<()> {
    let clock = Clock::get()?;
    let sponsorship = &mut ctx.accounts.sponsorship;

    sponsorship.status = SponsorshipStatus::Active;

    emit!(SponsorshipResumed {
        sponsorship_id: sponsorship.sponsorship_id,
        resumed_by: ctx.accounts.sponsor.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
