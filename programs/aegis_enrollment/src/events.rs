// programs/aegis_enrollment/src/events.rs

use aegis_core::{Currency, EnrollmentKind, PaymentSchedule};
use anchor_lang::prelude::*;

use crate::state::{ClaimOutcome, EnrollmentStatus};

/// Emitted when the enrollment program is initialized
#[event]
pub struct EnrollmentConfigInitialized {
    pub authority: Pubkey,
    pub claims_authority: Pubkey,
    pub premium_vault: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a member enrolls in a plan
#[event]
pub struct MemberEnrolled {
    pub enrollment_id: u64,
    pub member: Pubkey,
    pub plan_id: u64,
    pub kind: EnrollmentKind,
    pub schedule: PaymentSchedule,
    pub premium_paid: u64,
    pub currency: Currency,
    pub coverage_start: i64,
    pub coverage_end: i64,
    pub dependents: u8,
    pub timestamp: i64,
}

/// Emitted when an enrollment is cancelled. `refund_amount` is zero for
/// monthly schedules: only annual premiums are pro-rated back.
#[event]
pub struct EnrollmentCancelled {
    pub enrollment_id: u64,
    pub member: Pubkey,
    pub plan_id: u64,
    pub refund_amount: u64,
    pub unused_days: u32,
    pub reason: String,
    pub timestamp: i64,
}

/// Emitted when an enrollment is renewed for another term
#[event]
pub struct EnrollmentRenewed {
    pub enrollment_id: u64,
    pub member: Pubkey,
    pub plan_id: u64,
    pub premium_paid: u64,
    pub new_coverage_end: i64,
    pub timestamp: i64,
}

/// Emitted when a lapsed enrollment is cranked forward
#[event]
pub struct EnrollmentLapsed {
    pub enrollment_id: u64,
    pub member: Pubkey,
    pub new_status: EnrollmentStatus,
    pub timestamp: i64,
}

/// Emitted on admin suspension / reactivation
#[event]
pub struct EnrollmentStatusChanged {
    pub enrollment_id: u64,
    pub old_status: EnrollmentStatus,
    pub new_status: EnrollmentStatus,
    pub changed_by: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the claims program records an outcome
#[event]
pub struct ClaimOutcomeRecorded {
    pub enrollment_id: u64,
    pub outcome: ClaimOutcome,
    pub claims_pending: u64,
    pub claims_approved: u64,
    pub claims_rejected: u64,
    pub deductible_met: u64,
    pub out_of_pocket_spent: u64,
    pub timestamp: i64,
}

/// Emitted when a primary care provider is assigned
#[event]
pub struct PrimaryProviderAssigned {
    pub enrollment_id: u64,
    pub member: Pubkey,
    pub provider: Pubkey,
    pub timestamp: i64,
}
