// programs/aegis_wallet/src/instructions/ledger.rs
//
// The ledger instructions are the sole writers of wallet balances.
// Every balance mutation pairs with exactly one TransactionRecord; the
// two commit in the same transaction or not at all.

use aegis_core::Currency;
use anchor_lang::prelude::*;
use crate::state::{
    LedgerConfig, ReferenceKind, TransactionKind, TransactionRecord, TransactionStatus, Wallet,
};
use crate::errors::WalletError;
use crate::events::{TransactionReversed, WalletCredited, WalletDebited};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct LedgerEntryParams {
    pub amount: u64,
    pub currency: Currency,
    pub reference_kind: ReferenceKind,
    pub reference_id: u64,
}

/// Credit a wallet (protocol authorities only: settlements, refunds,
/// sponsorship draws go through here)
#[derive(Accounts)]
pub struct Credit<'info> {
    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [Wallet::SEED_PREFIX, wallet.owner.as_ref(), &wallet.kind.seed()],
        bump = wallet.bump,
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = payer,
        space = 8 + TransactionRecord::INIT_SPACE,
        seeds = [
            TransactionRecord::SEED_PREFIX,
            &ledger_config.transaction_count.to_le_bytes()
        ],
        bump
    )]
    pub transaction_record: Account<'info, TransactionRecord>,

    /// Ledger authority: config admin, claims config PDA, or enrollment
    /// config PDA (signing via CPI)
    #[account(
        constraint = ledger_config.is_ledger_authority(&authority.key()) @ WalletError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn credit(ctx: Context<Credit>, params: LedgerEntryParams) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.ledger_config;
    let wallet = &mut ctx.accounts.wallet;

    wallet.apply_credit(params.amount, params.currency)?;

    let transaction_id = config.transaction_count;
    write_record(
        &mut ctx.accounts.transaction_record,
        transaction_id,
        wallet.key(),
        wallet.owner,
        TransactionKind::Credit,
        &params,
        None,
        ctx.accounts.authority.key(),
        clock.unix_timestamp,
        ctx.bumps.transaction_record,
    );

    config.transaction_count += 1;
    config.total_credited = config
        .total_credited
        .checked_add(params.amount)
        .ok_or(WalletError::MathOverflow)?;

    emit!(WalletCredited {
        owner: wallet.owner,
        kind: wallet.kind,
        amount: params.amount,
        transaction_id,
        reference_kind: params.reference_kind,
        reference_id: params.reference_id,
        new_available: wallet.balance.available,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Debit a wallet. The owner may debit their own wallet; protocol
/// authorities may debit on the owner's behalf.
#[derive(Accounts)]
pub struct Debit<'info> {
    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [Wallet::SEED_PREFIX, wallet.owner.as_ref(), &wallet.kind.seed()],
        bump = wallet.bump,
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = payer,
        space = 8 + TransactionRecord::INIT_SPACE,
        seeds = [
            TransactionRecord::SEED_PREFIX,
            &ledger_config.transaction_count.to_le_bytes()
        ],
        bump
    )]
    pub transaction_record: Account<'info, TransactionRecord>,

    #[account(
        constraint = authority.key() == wallet.owner
            || ledger_config.is_ledger_authority(&authority.key()) @ WalletError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn debit(ctx: Context<Debit>, params: LedgerEntryParams) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.ledger_config;
    let wallet = &mut ctx.accounts.wallet;

    wallet.apply_debit(params.amount, params.currency)?;

    let transaction_id = config.transaction_count;
    write_record(
        &mut ctx.accounts.transaction_record,
        transaction_id,
        wallet.key(),
        wallet.owner,
        TransactionKind::Debit,
        &params,
        None,
        ctx.accounts.authority.key(),
        clock.unix_timestamp,
        ctx.bumps.transaction_record,
    );

    config.transaction_count += 1;
    config.total_debited = config
        .total_debited
        .checked_add(params.amount)
        .ok_or(WalletError::MathOverflow)?;

    emit!(WalletDebited {
        owner: wallet.owner,
        kind: wallet.kind,
        amount: params.amount,
        transaction_id,
        reference_kind: params.reference_kind,
        reference_id: params.reference_id,
        new_available: wallet.balance.available,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Reverse a completed transaction. The original record keeps its full
/// contents and only flips status; the correction is a new chained entry
/// applying the inverse balance adjustment.
#[derive(Accounts)]
pub struct ReverseTransaction<'info> {
    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
    )]
    pub ledger_config: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [
            TransactionRecord::SEED_PREFIX,
            &original.transaction_id.to_le_bytes()
        ],
        bump = original.bump,
        constraint = original.status == TransactionStatus::Completed
            @ WalletError::InvalidTransactionState
    )]
    pub original: Account<'info, TransactionRecord>,

    #[account(
        mut,
        seeds = [Wallet::SEED_PREFIX, wallet.owner.as_ref(), &wallet.kind.seed()],
        bump = wallet.bump,
        constraint = original.wallet == wallet.key() @ WalletError::WalletMismatch
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        init,
        payer = payer,
        space = 8 + TransactionRecord::INIT_SPACE,
        seeds = [
            TransactionRecord::SEED_PREFIX,
            &ledger_config.transaction_count.to_le_bytes()
        ],
        bump
    )]
    pub reversal: Account<'info, TransactionRecord>,

    #[account(
        constraint = ledger_config.is_ledger_authority(&authority.key()) @ WalletError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn reverse_transaction(ctx: Context<ReverseTransaction>, reason: String) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.ledger_config;
    let original = &mut ctx.accounts.original;
    let wallet = &mut ctx.accounts.wallet;

    // Inverse adjustment. Reversing a credit re-debits, so the wallet
    // must still hold the funds; InsufficientFunds aborts with no
    // mutation anywhere.
    let reversal_kind = original.kind.inverse();
    match reversal_kind {
        TransactionKind::Credit => wallet.apply_credit(original.amount, original.currency)?,
        TransactionKind::Debit => wallet.apply_debit(original.amount, original.currency)?,
    }

    let transaction_id = config.transaction_count;
    let params = LedgerEntryParams {
        amount: original.amount,
        currency: original.currency,
        reference_kind: ReferenceKind::Adjustment,
        reference_id: original.reference_id,
    };
    write_record(
        &mut ctx.accounts.reversal,
        transaction_id,
        wallet.key(),
        wallet.owner,
        reversal_kind,
        &params,
        Some(original.transaction_id),
        ctx.accounts.authority.key(),
        clock.unix_timestamp,
        ctx.bumps.reversal,
    );

    original.status = TransactionStatus::Reversed;

    config.transaction_count += 1;
    match reversal_kind {
        TransactionKind::Credit => {
            config.total_credited = config
                .total_credited
                .checked_add(original.amount)
                .ok_or(WalletError::MathOverflow)?;
        }
        TransactionKind::Debit => {
            config.total_debited = config
                .total_debited
                .checked_add(original.amount)
                .ok_or(WalletError::MathOverflow)?;
        }
    }

    emit!(TransactionReversed {
        original_transaction_id: original.transaction_id,
        reversal_transaction_id: transaction_id,
        wallet_owner: wallet.owner,
        kind: reversal_kind,
        amount: original.amount,
        reason,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_record(
    record: &mut TransactionRecord,
    transaction_id: u64,
    wallet_key: Pubkey,
    owner: Pubkey,
    kind: TransactionKind,
    params: &LedgerEntryParams,
    reverses: Option<u64>,
    initiated_by: Pubkey,
    now: i64,
    bump: u8,
) {
    record.transaction_id = transaction_id;
    record.wallet = wallet_key;
    record.owner = owner;
    record.kind = kind;
    record.amount = params.amount;
    record.currency = params.currency;
    record.status = TransactionStatus::Completed;
    record.reference_kind = params.reference_kind;
    record.reference_id = params.reference_id;
    record.reverses = reverses;
    record.initiated_by = initiated_by;
    record.created_at = now;
    record.bump = bump;
}
