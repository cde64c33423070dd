// programs/aegis_wallet/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum WalletError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Currency does not match wallet currency")]
    CurrencyMismatch,

    #[msg("Insufficient available balance")]
    InsufficientFunds,

    #[msg("Transaction is not in a reversible state")]
    InvalidTransactionState,

    #[msg("Transaction does not belong to this wallet")]
    WalletMismatch,

    #[msg("Invalid mint for custody vault")]
    InvalidMint,

    #[msg("Sponsorship is not active or outside its window")]
    SponsorshipInactive,

    #[msg("Sponsorship is not paused")]
    SponsorshipNotPaused,

    #[msg("Amount exceeds sponsorship remaining")]
    ExceedsSponsorshipRemaining,

    #[msg("Invalid sponsorship configuration")]
    InvalidSponsorshipConfig,

    #[msg("Wallet kind does not match the operation")]
    InvalidWalletKind,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}
