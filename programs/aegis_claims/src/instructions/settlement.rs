// programs/aegis_claims/src/instructions/settlement.rs
//
// Settlement orchestration. Paying a claim credits the claimant's
// wallet, bumps the plan's paid counters, and marks the claim Paid as
// one atomic unit; if any leg fails the whole transaction reverts and
// the claim stays Approved and retryable.

use aegis_plans::state::{HmoPlan, PlanCatalog};
use aegis_wallet::state::{LedgerConfig, ReferenceKind, Wallet, WalletKind};
use anchor_lang::prelude::*;

use crate::state::{Claim, ClaimStatus, ClaimsConfig, PaymentMethod};
use crate::errors::ClaimsError;
use crate::events::ClaimPaid;

#[derive(Accounts)]
pub struct PayClaim<'info> {
    #[account(
        mut,
        seeds = [ClaimsConfig::SEED_PREFIX],
        bump = claims_config.bump,
        constraint = claims_config.is_active @ ClaimsError::ClaimsPaused,
        constraint = payer.key() == claims_config.authority
            || payer.key() == claims_config.claims_committee
            @ ClaimsError::Unauthorized
    )]
    pub claims_config: Box<Account<'info, ClaimsConfig>>,

    #[account(
        mut,
        seeds = [Claim::SEED_PREFIX, &claim.claim_id.to_le_bytes()],
        bump = claim.bump,
    )]
    pub claim: Box<Account<'info, Claim>>,

    #[account(
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        seeds::program = plans_program.key(),
    )]
    pub plan_catalog: Box<Account<'info, PlanCatalog>>,

    #[account(
        mut,
        constraint = plan.key() == claim.plan @ ClaimsError::Unauthorized
    )]
    pub plan: Box<Account<'info, HmoPlan>>,

    #[account(
        mut,
        seeds = [LedgerConfig::SEED_PREFIX],
        bump = ledger_config.bump,
        seeds::program = wallet_program.key(),
    )]
    pub ledger_config: Box<Account<'info, LedgerConfig>>,

    /// Claimant's personal wallet receiving the settlement; sponsored
    /// buckets never receive claim payouts
    #[account(
        mut,
        constraint = claimant_wallet.owner == claim.claimant @ ClaimsError::Unauthorized,
        constraint = claimant_wallet.kind == WalletKind::Personal @ ClaimsError::Unauthorized
    )]
    pub claimant_wallet: Box<Account<'info, Wallet>>,

    /// CHECK: transaction record PDA initialized by the wallet program
    #[account(mut)]
    pub transaction_record: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub plans_program: Program<'info, aegis_plans::program::AegisPlans>,
    pub wallet_program: Program<'info, aegis_wallet::program::AegisWallet>,
    pub system_program: Program<'info, System>,
}

pub fn pay_claim(ctx: Context<PayClaim>, method: PaymentMethod, notes: String) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    // Idempotence at the claim level: a second pay fails fast without
    // touching the wallet
    require!(
        ctx.accounts.claim.billing.amount_paid == 0,
        ClaimsError::AlreadyPaid
    );
    let amount = ctx.accounts.claim.billing.approved_amount;
    require!(amount > 0, ClaimsError::InvalidClaimAmount);

    // Approved -> Paid; any other starting status fails here with no
    // mutation anywhere
    ctx.accounts.claim.record_transition(
        ClaimStatus::Paid,
        ctx.accounts.payer.key(),
        notes,
        now,
    )?;

    // The ledger id the wallet program will assign to the credit
    let transaction_id = ctx.accounts.ledger_config.transaction_count;

    let config_bump = ctx.accounts.claims_config.bump;
    let signer_seeds: &[&[u8]] = &[ClaimsConfig::SEED_PREFIX, &[config_bump]];

    aegis_wallet::cpi::credit(
        CpiContext::new_with_signer(
            ctx.accounts.wallet_program.to_account_info(),
            aegis_wallet::cpi::accounts::Credit {
                ledger_config: ctx.accounts.ledger_config.to_account_info(),
                wallet: ctx.accounts.claimant_wallet.to_account_info(),
                transaction_record: ctx.accounts.transaction_record.to_account_info(),
                authority: ctx.accounts.claims_config.to_account_info(),
                payer: ctx.accounts.payer.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
            },
            &[signer_seeds],
        ),
        aegis_wallet::instructions::LedgerEntryParams {
            amount,
            currency: ctx.accounts.claim.currency,
            reference_kind: ReferenceKind::Claim,
            reference_id: ctx.accounts.claim.claim_id,
        },
    )?;

    aegis_plans::cpi::record_claim_paid(
        CpiContext::new_with_signer(
            ctx.accounts.plans_program.to_account_info(),
            aegis_plans::cpi::accounts::RecordClaimPaid {
                plan_catalog: ctx.accounts.plan_catalog.to_account_info(),
                plan: ctx.accounts.plan.to_account_info(),
                authority: ctx.accounts.claims_config.to_account_info(),
            },
            &[signer_seeds],
        ),
        amount,
    )?;

    let claim = &mut ctx.accounts.claim;
    claim.billing.amount_paid = amount;
    claim.payment_transaction = Some(transaction_id);
    claim.payment_method = method;
    claim.paid_at = now;

    let config = &mut ctx.accounts.claims_config;
    config.total_paid = config
        .total_paid
        .checked_add(1)
        .ok_or(ClaimsError::MathOverflow)?;
    config.total_paid_amount = config
        .total_paid_amount
        .checked_add(amount)
        .ok_or(ClaimsError::MathOverflow)?;

    emit!(ClaimPaid {
        claim_id: ctx.accounts.claim.claim_id,
        claimant: ctx.accounts.claim.claimant,
        amount_paid: amount,
        payment_transaction: transaction_id,
        method,
        timestamp: now,
    });

    Ok(())
}
