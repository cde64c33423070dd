// programs/aegis_plans/src/events.rs

use crate::state::PlanCategory;
use anchor_lang::prelude::*;

/// Emitted when the plan catalog is initialized
#[event]
pub struct PlanCatalogInitialized {
    pub authority: Pubkey,
    pub claims_authority: Pubkey,
    pub enrollment_authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a plan is created
#[event]
pub struct PlanCreated {
    pub plan_id: u64,
    pub name: String,
    pub category: PlanCategory,
    pub premium_individual: u64,
    pub deductible: u64,
    pub max_out_of_pocket: u64,
    pub timestamp: i64,
}

/// Emitted when a plan's availability flags change
#[event]
pub struct PlanFlagsUpdated {
    pub plan_id: u64,
    pub is_active: bool,
    pub enrollment_open: bool,
    pub updater: Pubkey,
    pub timestamp: i64,
}

/// Emitted when an enrollment is recorded against a plan
#[event]
pub struct PlanEnrollmentRecorded {
    pub plan_id: u64,
    pub total_enrollments: u64,
    pub active_enrollments: u64,
    pub timestamp: i64,
}

/// Emitted when a cancellation is recorded against a plan
#[event]
pub struct PlanCancellationRecorded {
    pub plan_id: u64,
    pub active_enrollments: u64,
    pub cancelled_enrollments: u64,
    pub timestamp: i64,
}

/// Emitted when a paid claim is recorded against a plan
#[event]
pub struct PlanClaimPaidRecorded {
    pub plan_id: u64,
    pub amount: u64,
    pub claims_paid_count: u64,
    pub total_claims_paid: u64,
    pub timestamp: i64,
}
