// programs/aegis_claims/src/events.rs

use aegis_core::{Currency, ServiceType};
use anchor_lang::prelude::*;

use crate::state::{ClaimStatus, PaymentMethod};

/// Emitted when the claims program is initialized
#[event]
pub struct ClaimsConfigInitialized {
    pub authority: Pubkey,
    pub claims_committee: Pubkey,
    pub timestamp: i64,
}

/// Emitted when claims processing is paused or resumed
#[event]
pub struct ClaimsPauseToggled {
    pub is_active: bool,
    pub changed_by: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a claim enters the pipeline
#[event]
pub struct ClaimSubmitted {
    pub claim_id: u64,
    pub enrollment_id: u64,
    pub plan_id: u64,
    pub patient: Pubkey,
    pub claimant: Pubkey,
    pub service_type: ServiceType,
    pub total_billed: u64,
    pub currency: Currency,
    pub timestamp: i64,
}

/// Emitted when a claim is assigned to a reviewer
#[event]
pub struct ClaimAssigned {
    pub claim_id: u64,
    pub reviewer: Pubkey,
    pub assigned_by: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a claim is approved
#[event]
pub struct ClaimApproved {
    pub claim_id: u64,
    pub enrollment_id: u64,
    pub total_billed: u64,
    pub covered_amount: u64,
    pub approved_amount: u64,
    pub patient_total: u64,
    pub approver: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a claim is partially approved
#[event]
pub struct ClaimPartiallyApproved {
    pub claim_id: u64,
    pub enrollment_id: u64,
    pub approved_amount: u64,
    pub rejected_amount: u64,
    pub approver: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a claim is rejected
#[event]
pub struct ClaimRejected {
    pub claim_id: u64,
    pub enrollment_id: u64,
    pub reason: String,
    pub rejected_by: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a settlement lands
#[event]
pub struct ClaimPaid {
    pub claim_id: u64,
    pub claimant: Pubkey,
    pub amount_paid: u64,
    pub payment_transaction: u64,
    pub method: PaymentMethod,
    pub timestamp: i64,
}

/// Emitted when a member files an appeal
#[event]
pub struct ClaimAppealed {
    pub claim_id: u64,
    pub previous_status: ClaimStatus,
    pub reason: String,
    pub timestamp: i64,
}

/// Emitted when the committee decides an appeal
#[event]
pub struct AppealReviewed {
    pub claim_id: u64,
    pub decision: ClaimStatus,
    pub reviewer: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a member withdraws an early-stage claim
#[event]
pub struct ClaimCancelled {
    pub claim_id: u64,
    pub cancelled_by: Pubkey,
    pub timestamp: i64,
}
