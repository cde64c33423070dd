// programs/aegis_wallet/src/events.rs

use aegis_core::Currency;
use crate::state::{ReferenceKind, TransactionKind, WalletKind};
use anchor_lang::prelude::*;

/// Emitted when the ledger is initialized
#[event]
pub struct LedgerInitialized {
    pub authority: Pubkey,
    pub claims_authority: Pubkey,
    pub enrollment_authority: Pubkey,
    pub usdc_mint: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the custody vault is created
#[event]
pub struct CustodyVaultCreated {
    pub vault_authority: Pubkey,
    pub custody_vault: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a wallet is opened (not emitted on the idempotent
/// already-open path)
#[event]
pub struct WalletOpened {
    pub owner: Pubkey,
    pub kind: WalletKind,
    pub currency: Currency,
    pub timestamp: i64,
}

/// Emitted when an owner deposits into their wallet
#[event]
pub struct FundsAdded {
    pub owner: Pubkey,
    pub kind: WalletKind,
    pub amount: u64,
    pub transaction_id: u64,
    pub new_available: u64,
    pub timestamp: i64,
}

/// Emitted on every ledger credit
#[event]
pub struct WalletCredited {
    pub owner: Pubkey,
    pub kind: WalletKind,
    pub amount: u64,
    pub transaction_id: u64,
    pub reference_kind: ReferenceKind,
    pub reference_id: u64,
    pub new_available: u64,
    pub timestamp: i64,
}

/// Emitted on every ledger debit
#[event]
pub struct WalletDebited {
    pub owner: Pubkey,
    pub kind: WalletKind,
    pub amount: u64,
    pub transaction_id: u64,
    pub reference_kind: ReferenceKind,
    pub reference_id: u64,
    pub new_available: u64,
    pub timestamp: i64,
}

/// Emitted when a completed transaction is reversed
#[event]
pub struct TransactionReversed {
    pub original_transaction_id: u64,
    pub reversal_transaction_id: u64,
    pub wallet_owner: Pubkey,
    pub kind: TransactionKind,
    pub amount: u64,
    pub reason: String,
    pub timestamp: i64,
}

/// Emitted by the read path; one event carries both balance buckets
#[event]
pub struct WalletSnapshot {
    pub owner: Pubkey,
    pub personal_available: u64,
    pub personal_pending: u64,
    pub sponsored_available: u64,
    pub sponsored_pending: u64,
    pub timestamp: i64,
}

/// Emitted when a sponsorship is created
#[event]
pub struct SponsorshipCreated {
    pub sponsorship_id: u64,
    pub sponsor: Pubkey,
    pub beneficiary: Pubkey,
    pub total: u64,
    pub start: i64,
    pub end: i64,
    pub timestamp: i64,
}

/// Emitted when a sponsorship draw credits the beneficiary wallet
#[event]
pub struct SponsorshipFunded {
    pub sponsorship_id: u64,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub remaining: u64,
    pub transaction_id: u64,
    pub timestamp: i64,
}

/// Emitted when a sponsorship completes (fully drawn)
#[event]
pub struct SponsorshipCompleted {
    pub sponsorship_id: u64,
    pub total_used: u64,
    pub timestamp: i64,
}

/// Emitted when a sponsorship is paused
#[event]
pub struct SponsorshipPaused {
    pub sponsorship_id: u64,
    pub paused_by: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a sponsorship is resumed
#[event]
pub struct SponsorshipResumed {
    pub sponsorship_id: u64,
    pub resumed_by: Pubkey,
    pub timestamp: i64,
}
