// programs/aegis_wallet/src/instructions/wallets.rs

use aegis_core::Currency;
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::state::{
    LedgerConfig, ReferenceKind, TransactionKind, TransactionRecord, TransactionStatus, Wallet,
    WalletKind,
};
use crate::errors::WalletError;
use crate::events::{FundsAdded, WalletOpened, WalletSnapshot};

/// Open a wallet for (owner, kind). Idempotent: re-running against an
/// existing wallet is a no-op and never resets the balance.
#[derive(Accounts)]
#[instruction(kind: WalletKind)]
pub struct OpenWallet<'info> {
    #[account(
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Wallet::INIT_SPACE,
        seeds = [Wallet::SEED_PREFIX, owner.key().as_ref(), &kind.seed()],
        bump
    )]
    pub wallet: Account<'info, Wallet>,

    /// CHECK: wallet owner; any pubkey may have a wallet opened on its
    /// behalf (providers and vendors receive settlements before they
    /// ever sign)
    pub owner: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn open_wallet(ctx: Context<OpenWallet>, kind: WalletKind, currency: Currency) -> Result<()> {
    let clock = Clock::get()?;
    let wallet = &mut ctx.accounts.wallet;

    // Already open: idempotent success
    if wallet.created_at != 0 {
        return Ok(());
    }

    wallet.owner = ctx.accounts.owner.key();
    wallet.kind = kind;
    wallet.balance.available = 0;
    wallet.balance.pending = 0;
    wallet.balance.reserved = 0;
    wallet.balance.currency = currency;
    wallet.transaction_count = 0;
    wallet.created_at = clock.unix_timestamp;
    wallet.bump = ctx.bumps.wallet;

    emit!(WalletOpened {
        owner: wallet.owner,
        kind,
        currency,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Deposit funds into one's own wallet: SPL transfer into the custody
/// vault paired with a ledger credit and exactly one transaction record
#[derive(Accounts)]
pub struct AddFunds<'info> {
    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [Wallet::SEED_PREFIX, owner.key().as_ref(), &wallet.kind.seed()],
        bump = wallet.bump,
        constraint = wallet.owner == owner.key() @ WalletError::Unauthorized
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = owner,
        space = 8 + TransactionRecord::INIT_SPACE,
        seeds = [
            TransactionRecord::SEED_PREFIX,
            &ledger_config.transaction_count.to_le_bytes()
        ],
        bump
    )]
    pub transaction_record: Account<'info, TransactionRecord>,

    /// Depositor's token account
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

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn add_funds(ctx: Context<AddFunds>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    require!(amount > 0, WalletError::InvalidAmount);

    // Move the tokens first; the ledger entry commits with them or not
    // at all
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.custody_vault.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    let config = &mut ctx.accounts.ledger_config;
    let wallet = &mut ctx.accounts.wallet;
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
    record.reference_kind = ReferenceKind::Deposit;
    record.reference_id = 0;
    record.reverses = None;
    record.initiated_by = ctx.accounts.owner.key();
    record.created_at = clock.unix_timestamp;
    record.bump = ctx.bumps.transaction_record;

    config.transaction_count += 1;
    config.total_credited = config
        .total_credited
        .checked_add(amount)
        .ok_or(WalletError::MathOverflow)?;

    emit!(FundsAdded {
        owner: wallet.owner,
        kind: wallet.kind,
        amount,
        transaction_id,
        new_available: wallet.balance.available,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Emit a balance snapshot covering both wallet kinds for an owner
#[derive(Accounts)]
pub struct SnapshotBalance<'info> {
    /// CHECK: owner whose balances are being read
    pub owner: UncheckedAccount<'info>,

    pub personal_wallet: Option<Account<'info, Wallet>>,

    pub sponsored_wallet: Option<Account<'info, Wallet>>,
}

pub fn snapshot_balance(ctx: Context<SnapshotBalance>) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();

    let (personal_available, personal_pending) = match ctx.accounts.personal_wallet.as_ref() {
        Some(w) => {
            require!(w.owner == owner, WalletError::Unauthorized);
            require!(w.kind == WalletKind::Personal, WalletError::InvalidWalletKind);
            (w.balance.available, w.balance.pending)
        }
        None => (0, 0),
    };
    let (sponsored_available, sponsored_pending) = match ctx.accounts.sponsored_wallet.as_ref() {
        Some(w) => {
            require!(w.owner == owner, WalletError::Unauthorized);
            require!(w.kind == WalletKind::Sponsored, WalletError::InvalidWalletKind);
            (w.balance.available, w.balance.pending)
        }
        None => (0, 0),
    };

    emit!(WalletSnapshot {
        owner: ctx.accounts.owner.key(),
        personal_available,
        personal_pending,
        sponsored_available,
        sponsored_pending,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
