// programs/aegis_wallet/src/lib.rs
//
// Aegis Wallet Program
// ====================
// Custodial wallet ledger for the Aegis Care protocol. Holds member,
// provider, and vendor balances in USDC minor units, pairs every
// balance mutation with an immutable transaction record, and manages
// employer/NGO sponsorships that fund sponsored wallets over time.

use aegis_core::Currency;
use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::WalletKind;

declare_id!("CHJ4Bdc9wqKy6pjSiC3URjs53iDQpn58MPeAgLQVqRW1");

#[program]
pub mod aegis_wallet {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the wallet ledger
    pub fn initialize_ledger(
        ctx: Context<InitializeLedger>,
        params: InitializeLedgerParams,
    ) -> Result<()> {
        instructions::initialize::initialize_ledger(ctx, params)
    }

    /// Create the USDC custody vault backing all wallet balances
    pub fn create_custody_vault(ctx: Context<CreateCustodyVault>) -> Result<()> {
        instructions::initialize::create_custody_vault(ctx)
    }

    // ==================== WALLETS ====================

    /// Open a wallet for an owner (idempotent)
    pub fn open_wallet(
        ctx: Context<OpenWallet>,
        kind: WalletKind,
        currency: Currency,
    ) -> Result<()> {
        instructions::wallets::open_wallet(ctx, kind, currency)
    }

    /// Deposit funds into one's own wallet
    pub fn add_funds(ctx: Context<AddFunds>, amount: u64) -> Result<()> {
        instructions::wallets::add_funds(ctx, amount)
    }

    /// Emit a combined balance snapshot for an owner
    pub fn snapshot_balance(ctx: Context<SnapshotBalance>) -> Result<()> {
        instructions::wallets::snapshot_balance(ctx)
    }

    // ==================== LEDGER ====================

    /// Credit a wallet (protocol authorities only)
    pub fn credit(ctx: Context<Credit>, params: LedgerEntryParams) -> Result<()> {
        instructions::ledger::credit(ctx, params)
    }

    /// Debit a wallet (owner or protocol authority)
    pub fn debit(ctx: Context<Debit>, params: LedgerEntryParams) -> Result<()> {
        instructions::ledger::debit(ctx, params)
    }

    /// Reverse a completed transaction with a chained correction entry
    pub fn reverse_transaction(ctx: Context<ReverseTransaction>, reason: String) -> Result<()> {
        instructions::ledger::reverse_transaction(ctx, reason)
    }

    // ==================== SPONSORSHIPS ====================

    /// Create a sponsorship funded up-front into the custody vault
    pub fn create_sponsorship(
        ctx: Context<CreateSponsorship>,
        params: CreateSponsorshipParams,
    ) -> Result<()> {
        instructions::sponsorships::create_sponsorship(ctx, params)
    }

    /// Draw down a sponsorship into the beneficiary's sponsored wallet
    pub fn fund_sponsored_wallet(ctx: Context<FundSponsoredWallet>, amount: u64) -> Result<()> {
        instructions::sponsorships::fund_sponsored_wallet(ctx, amount)
    }

    /// Pause an active sponsorship
    pub fn pause_sponsorship(ctx: Context<PauseSponsorship>) -> Result<()> {
        instructions::sponsorships::pause_sponsorship(ctx)
    }

    /// Resume a paused sponsorship
    pub fn resume_sponsorship(ctx: Context<ResumeSponsorship>) -> Result<()> {
        instructions::sponsorships::resume_sponsorship(ctx)
    }
}
