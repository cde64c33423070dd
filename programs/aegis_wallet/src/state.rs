// programs/aegis_wallet/src/state.rs

use aegis_core::Currency;
use anchor_lang::prelude::*;

use crate::errors::WalletError;

/// Ledger configuration
/// PDA seeds: ["ledger_config"]
#[account]
#[derive(InitSpace)]
pub struct LedgerConfig {
    /// Ledger administrator
    pub authority: Pubkey,

    /// Claims-config PDA allowed to credit wallets for settlements
    pub claims_authority: Pubkey,

    /// Enrollment-config PDA allowed to credit wallets for refunds
    pub enrollment_authority: Pubkey,

    /// Settlement mint (USDC)
    pub usdc_mint: Pubkey,

    /// Custody vault holding all deposited funds
    pub custody_vault: Pubkey,

    /// Global transaction sequence; next TransactionRecord id
    pub transaction_count: u64,

    /// Total credited across all wallets (minor units)
    pub total_credited: u64,

    /// Total debited across all wallets (minor units)
    pub total_debited: u64,

    /// Bump seed
    pub bump: u8,
}

impl LedgerConfig {
    pub const SEED_PREFIX: &'static [u8] = b"ledger_config";

    /// Is this signer allowed to move ledger balances on behalf of the
    /// protocol (settlements, refunds, sponsorship draws)
    pub fn is_ledger_authority(&self, key: &Pubkey) -> bool {
        *key == self.authority
            || *key == self.claims_authority
            || *key == self.enrollment_authority
    }
}

/// Signing authority for the custody vault
/// PDA seeds: ["vault_authority"]
#[account]
#[derive(InitSpace)]
pub struct VaultAuthority {
    /// Custody vault token account
    pub custody_vault: Pubkey,

    /// Settlement mint
    pub usdc_mint: Pubkey,

    /// Bump seed
    pub bump: u8,
}

impl VaultAuthority {
    pub const SEED_PREFIX: &'static [u8] = b"vault_authority";
}

/// Wallet bucket kind. A user holds at most one wallet per kind.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum WalletKind {
    /// Funds the owner deposited or earned
    #[default]
    Personal,
    /// Funds drawn from sponsorships; spendable only on covered care
    Sponsored,
}

impl WalletKind {
    /// Seed byte for PDA derivation
    pub fn seed(&self) -> [u8; 1] {
        match self {
            WalletKind::Personal => [0],
            WalletKind::Sponsored => [1],
        }
    }
}

/// Balance buckets for one wallet
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, InitSpace)]
pub struct WalletBalance {
    /// Spendable balance (minor units). Never negative by construction;
    /// every debit path checks before subtracting.
    pub available: u64,

    /// Incoming funds not yet settled
    pub pending: u64,

    /// Funds earmarked for in-flight operations
    pub reserved: u64,

    /// Wallet currency; every mutation must match
    pub currency: Currency,
}

/// Per-(owner, kind) wallet
/// PDA seeds: ["wallet", owner, kind]
#[account]
#[derive(InitSpace)]
pub struct Wallet {
    /// Wallet owner
    pub owner: Pubkey,

    /// Bucket kind
    pub kind: WalletKind,

    /// Balance buckets
    pub balance: WalletBalance,

    /// Number of ledger entries touching this wallet
    pub transaction_count: u64,

    /// Creation timestamp (0 = uninitialized, used by the idempotent
    /// open path)
    pub created_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl Wallet {
    pub const SEED_PREFIX: &'static [u8] = b"wallet";

    /// Apply a credit. Fails on zero amount, currency mismatch, or
    /// overflow; the balance is untouched on failure.
    pub fn apply_credit(&mut self, amount: u64, currency: Currency) -> Result<()> {
        require!(amount > 0, WalletError::InvalidAmount);
        require!(currency == self.balance.currency, WalletError::CurrencyMismatch);

        self.balance.available = self
            .balance
            .available
            .checked_add(amount)
            .ok_or(WalletError::MathOverflow)?;
        self.transaction_count = self.transaction_count.saturating_add(1);
        Ok(())
    }

    /// Apply a debit. Fails on zero amount, currency mismatch, or
    /// insufficient available balance; the balance is untouched on failure.
    pub fn apply_debit(&mut self, amount: u64, currency: Currency) -> Result<()> {
        require!(amount > 0, WalletError::InvalidAmount);
        require!(currency == self.balance.currency, WalletError::CurrencyMismatch);
        require!(
            self.balance.available >= amount,
            WalletError::InsufficientFunds
        );

        self.balance.available -= amount;
        self.transaction_count = self.transaction_count.saturating_add(1);
        Ok(())
    }
}

/// Ledger entry direction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum TransactionKind {
    #[default]
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn inverse(&self) -> TransactionKind {
        match self {
            TransactionKind::Credit => TransactionKind::Debit,
            TransactionKind::Debit => TransactionKind::Credit,
        }
    }
}

/// Ledger entry status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    /// A later reversal entry undid this one. The only mutation a
    /// completed record ever receives.
    Reversed,
}

/// What a ledger entry settles
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum ReferenceKind {
    #[default]
    None,
    /// Owner deposit via add_funds
    Deposit,
    /// Claim settlement; reference_id is the claim id
    Claim,
    /// Enrollment refund; reference_id is the enrollment id
    Enrollment,
    /// Sponsorship draw; reference_id is the sponsorship id
    Sponsorship,
    /// Manual adjustment or reversal
    Adjustment,
}

/// Immutable ledger entry, one per wallet balance mutation
/// PDA seeds: ["transaction", transaction_id]
#[account]
#[derive(InitSpace)]
pub struct TransactionRecord {
    /// Global sequence id
    pub transaction_id: u64,

    /// Wallet this entry touched
    pub wallet: Pubkey,

    /// Wallet owner at the time of entry
    pub owner: Pubkey,

    /// Direction
    pub kind: TransactionKind,

    /// Amount (minor units)
    pub amount: u64,

    /// Currency
    pub currency: Currency,

    /// Entry status; Completed entries never change except to Reversed
    pub status: TransactionStatus,

    /// What this entry settles
    pub reference_kind: ReferenceKind,

    /// Id of the referenced claim/enrollment/sponsorship (0 if none)
    pub reference_id: u64,

    /// Transaction this entry reverses, if it is a reversal
    pub reverses: Option<u64>,

    /// Signer that initiated the entry
    pub initiated_by: Pubkey,

    /// Creation timestamp
    pub created_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl TransactionRecord {
    pub const SEED_PREFIX: &'static [u8] = b"transaction";
}

/// Sponsorship status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum SponsorshipStatus {
    #[default]
    Active,
    Paused,
    /// Fully drawn down or past its end date
    Completed,
}

/// A sponsor's funding commitment to a beneficiary's sponsored wallet
/// PDA seeds: ["sponsorship", sponsorship_id]
#[account]
#[derive(InitSpace)]
pub struct Sponsorship {
    /// Unique sponsorship id
    pub sponsorship_id: u64,

    /// Funding party
    pub sponsor: Pubkey,

    /// Beneficiary whose sponsored wallet receives draws
    pub beneficiary: Pubkey,

    /// Committed total (minor units)
    pub total: u64,

    /// Drawn so far
    pub used: u64,

    /// Remaining headroom
    pub remaining: u64,

    /// Sponsorship window start
    pub start: i64,

    /// Sponsorship window end
    pub end: i64,

    /// Currency
    pub currency: Currency,

    /// Status
    pub status: SponsorshipStatus,

    /// Creation timestamp
    pub created_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl Sponsorship {
    pub const SEED_PREFIX: &'static [u8] = b"sponsorship";

    /// Can funds be drawn right now
    pub fn can_draw(&self, now: i64) -> bool {
        self.status == SponsorshipStatus::Active
            && now >= self.start
            && now <= self.end
            && self.remaining > 0
    }

    /// Draw down the commitment. Completes the sponsorship when the
    /// remaining headroom reaches zero.
    pub fn draw(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, WalletError::InvalidAmount);
        require!(self.can_draw(now), WalletError::SponsorshipInactive);
        require!(amount <= self.remaining, WalletError::ExceedsSponsorshipRemaining);

        self.used = self
            .used
            .checked_add(amount)
            .ok_or(WalletError::MathOverflow)?;
        self.remaining -= amount;

        if self.remaining == 0 {
            self.status = SponsorshipStatus::Completed;
        }
        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_wallet() -> Wallet {
        Wallet {
            owner: Pubkey::default(),
            kind: WalletKind::Personal,
            balance: WalletBalance {
                available: 100_000,
                pending: 0,
                reserved: 0,
                currency: Currency::Usd,
            },
            transaction_count: 0,
            created_at: 1,
            bump: 255,
        }
    }

    // ==================== CREDIT / DEBIT ====================

    #[test]
    fn test_apply_credit() {
        let mut wallet = test_wallet();
        wallet.apply_credit(50_000, Currency::Usd).unwrap();
        assert_eq!(wallet.balance.available, 150_000);
        assert_eq!(wallet.transaction_count, 1);
    }

    #[test]
    fn test_apply_credit_zero_amount_fails() {
        let mut wallet = test_wallet();
        assert!(wallet.apply_credit(0, Currency::Usd).is_err());
        assert_eq!(wallet.balance.available, 100_000);
    }

    #[test]
    fn test_apply_credit_currency_mismatch() {
        let mut wallet = test_wallet();
        assert!(wallet.apply_credit(50_000, Currency::Ngn).is_err());
        assert_eq!(wallet.balance.available, 100_000);
    }

    #[test]
    fn test_apply_debit() {
        let mut wallet = test_wallet();
        wallet.apply_debit(40_000, Currency::Usd).unwrap();
        assert_eq!(wallet.balance.available, 60_000);
    }

    #[test]
    fn test_apply_debit_insufficient_funds_leaves_balance() {
        let mut wallet = test_wallet();
        assert!(wallet.apply_debit(100_001, Currency::Usd).is_err());
        assert_eq!(wallet.balance.available, 100_000);
        assert_eq!(wallet.transaction_count, 0);
    }

    #[test]
    fn test_apply_debit_to_exactly_zero() {
        let mut wallet = test_wallet();
        wallet.apply_debit(100_000, Currency::Usd).unwrap();
        assert_eq!(wallet.balance.available, 0);
    }

    #[test]
    fn test_credit_overflow_fails() {
        let mut wallet = test_wallet();
        wallet.balance.available = u64::MAX;
        assert!(wallet.apply_credit(1, Currency::Usd).is_err());
        assert_eq!(wallet.balance.available, u64::MAX);
    }

    // ==================== TRANSACTION KIND ====================

    #[test]
    fn test_transaction_kind_inverse() {
        assert_eq!(TransactionKind::Credit.inverse(), TransactionKind::Debit);
        assert_eq!(TransactionKind::Debit.inverse(), TransactionKind::Credit);
    }

    #[test]
    fn test_wallet_kind_seeds_distinct() {
        assert_ne!(WalletKind::Personal.seed(), WalletKind::Sponsored.seed());
    }

    // ==================== SPONSORSHIP ====================

    fn test_sponsorship() -> Sponsorship {
        Sponsorship {
            sponsorship_id: 1,
            sponsor: Pubkey::default(),
            beneficiary: Pubkey::default(),
            total: 100_000,
            used: 0,
            remaining: 100_000,
            start: 100,
            end: 200,
            currency: Currency::Usd,
            status: SponsorshipStatus::Active,
            created_at: 100,
            bump: 255,
        }
    }

    #[test]
    fn test_sponsorship_draw() {
        let mut s = test_sponsorship();
        s.draw(40_000, 150).unwrap();
        assert_eq!(s.used, 40_000);
        assert_eq!(s.remaining, 60_000);
        assert_eq!(s.status, SponsorshipStatus::Active);
    }

    #[test]
    fn test_sponsorship_draw_completes_at_zero() {
        let mut s = test_sponsorship();
        s.draw(100_000, 150).unwrap();
        assert_eq!(s.remaining, 0);
        assert_eq!(s.status, SponsorshipStatus::Completed);
    }

    #[test]
    fn test_sponsorship_draw_exceeds_remaining() {
        let mut s = test_sponsorship();
        assert!(s.draw(100_001, 150).is_err());
        assert_eq!(s.used, 0);
    }

    #[test]
    fn test_sponsorship_draw_outside_window() {
        let mut s = test_sponsorship();
        assert!(s.draw(10_000, 50).is_err());
        assert!(s.draw(10_000, 250).is_err());
    }

    #[test]
    fn test_sponsorship_draw_paused() {
        let mut s = test_sponsorship();
        s.status = SponsorshipStatus::Paused;
        assert!(s.draw(10_000, 150).is_err());
    }

    #[test]
    fn test_sponsorship_can_draw_boundaries() {
        let s = test_sponsorship();
        assert!(s.can_draw(100));
        assert!(s.can_draw(200));
        assert!(!s.can_draw(99));
        assert!(!s.can_draw(201));
    }
}
