// programs/aegis_claims/src/state.rs

use aegis_core::{Currency, ServiceType};
use anchor_lang::prelude::*;

use crate::errors::ClaimsError;

/// Claims a provider may file this long after the service date
pub const FILING_WINDOW_SECONDS: i64 = 90 * 86_400;

/// Claims program configuration
/// PDA seeds: ["claims_config"]
///
/// The config PDA doubles as the cross-program signing authority for
/// settlement and utilization CPIs.
#[account]
#[derive(InitSpace)]
pub struct ClaimsConfig {
    /// Program administrator
    pub authority: Pubkey,

    /// Review committee able to adjudicate claims
    pub claims_committee: Pubkey,

    /// Total claims submitted; next claim id
    pub total_claims: u64,

    /// Claims approved (count, full or partial)
    pub total_approved: u64,

    /// Claims rejected (count)
    pub total_rejected: u64,

    /// Claims paid (count)
    pub total_paid: u64,

    /// Total settled to claimant wallets (minor units)
    pub total_paid_amount: u64,

    /// Pause flag; submissions and adjudication halt when false
    pub is_active: bool,

    /// Bump seed
    pub bump: u8,
}

impl ClaimsConfig {
    pub const SEED_PREFIX: &'static [u8] = b"claims_config";
}

/// Claim lifecycle status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum ClaimStatus {
    #[default]
    Submitted,
    UnderReview,
    Approved,
    PartiallyApproved,
    Rejected,
    Appealed,
    Paid,
    Cancelled,
}

impl ClaimStatus {
    /// The full transition table. Any pair not listed here is invalid.
    pub fn can_transition(self, to: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self, to),
            (Submitted, UnderReview)
                | (Submitted | UnderReview | Appealed, Approved)
                | (Submitted | UnderReview | Appealed, Rejected)
                | (Submitted | UnderReview | Appealed, PartiallyApproved)
                | (Approved, Paid)
                | (Approved | Rejected, Appealed)
                | (Submitted | UnderReview, Cancelled)
        )
    }

    pub fn assert_transition(self, to: ClaimStatus) -> Result<()> {
        require!(self.can_transition(to), ClaimsError::InvalidClaimStatus);
        Ok(())
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ClaimStatus::Paid | ClaimStatus::Cancelled | ClaimStatus::Rejected
        )
    }
}

/// One audit-trail entry; a claim appends exactly one per successful
/// transition and none on a failed one
#[derive(AnchorSerialize, AnchorDeserialize, Clone, InitSpace)]
pub struct StatusHistoryEntry {
    pub status: ClaimStatus,
    pub actor: Pubkey,
    #[max_len(64)]
    pub notes: String,
    pub timestamp: i64,
}

/// Financial breakdown of a claim
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, InitSpace)]
pub struct Billing {
    /// Amount billed by the claimant (minor units)
    pub total_billed: u64,

    /// Plan-covered amount per the coverage computation
    pub covered_amount: u64,

    /// Amount approved for payment (≤ covered_amount)
    pub approved_amount: u64,

    /// Amount explicitly rejected (partial approvals)
    pub rejected_amount: u64,

    /// Amount actually settled. Set exactly once; non-zero blocks any
    /// further payment attempt.
    pub amount_paid: u64,

    /// Patient responsibility: deductible portion
    pub patient_deductible: u64,

    /// Patient responsibility: flat copay
    pub patient_copay: u64,

    /// Patient responsibility: coinsurance remainder
    pub patient_coinsurance: u64,

    /// Patient responsibility total
    pub patient_total: u64,
}

/// Appeal sub-record
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, InitSpace)]
pub struct Appeal {
    pub filed: bool,
    #[max_len(120)]
    pub reason: String,
    pub filed_at: i64,
    pub decided_at: i64,
}

/// Review processing trail
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, InitSpace)]
pub struct Processing {
    /// Assigned reviewer (zero if unassigned)
    pub reviewer: Pubkey,
    pub assigned_at: i64,
    pub review_completed_at: i64,
}

/// How a settlement was disbursed
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum PaymentMethod {
    #[default]
    WalletCredit,
    BankTransfer,
    MobileMoney,
}

/// A claim
/// PDA seeds: ["claim", claim_id]
///
/// Never closed: claims are financial records and survive termination of
/// the enrollment they were filed under.
#[account]
#[derive(InitSpace)]
pub struct Claim {
    /// Unique claim ID
    pub claim_id: u64,

    /// Enrollment account the claim is filed under
    pub enrollment: Pubkey,

    /// Enrollment ID (denormalized for event readers)
    pub enrollment_id: u64,

    /// Plan account
    pub plan: Pubkey,

    /// Plan ID
    pub plan_id: u64,

    /// Covered member the service was rendered to
    pub patient: Pubkey,

    /// Submitting provider/vendor; settlements credit this wallet owner
    pub claimant: Pubkey,

    /// Service rendered
    pub service_type: ServiceType,

    /// When the service was rendered (unix)
    pub service_date: i64,

    /// Diagnosis / service description
    #[max_len(120)]
    pub diagnosis: String,

    /// Financial breakdown
    pub billing: Billing,

    /// Settlement currency
    pub currency: Currency,

    /// Lifecycle status
    pub status: ClaimStatus,

    /// Append-only audit trail; oldest entry dropped at capacity
    #[max_len(16)]
    pub status_history: Vec<StatusHistoryEntry>,

    /// Appeal sub-record
    pub appeal: Appeal,

    /// Review processing trail
    pub processing: Processing,

    /// Ledger transaction id of the settlement, once paid
    pub payment_transaction: Option<u64>,

    /// Disbursement method, once paid
    pub payment_method: PaymentMethod,

    /// Settlement timestamp (0 if unpaid)
    pub paid_at: i64,

    /// Submission timestamp
    pub submitted_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl Claim {
    pub const SEED_PREFIX: &'static [u8] = b"claim";
    pub const MAX_HISTORY: usize = 16;

    /// Validate and apply a status transition, appending exactly one
    /// history entry. Guard failures leave the claim untouched.
    pub fn record_transition(
        &mut self,
        to: ClaimStatus,
        actor: Pubkey,
        notes: String,
        now: i64,
    ) -> Result<()> {
        self.status.assert_transition(to)?;
        self.status = to;
        self.push_history(to, actor, notes, now);
        Ok(())
    }

    pub(crate) fn push_history(&mut self, status: ClaimStatus, actor: Pubkey, notes: String, now: i64) {
        if self.status_history.len() >= Self::MAX_HISTORY {
            self.status_history.remove(0);
        }
        self.status_history.push(StatusHistoryEntry {
            status,
            actor,
            notes,
            timestamp: now,
        });
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_claim() -> Claim {
        Claim {
            claim_id: 7,
            enrollment: Pubkey::new_unique(),
            enrollment_id: 3,
            plan: Pubkey::new_unique(),
            plan_id: 1,
            patient: Pubkey::new_unique(),
            claimant: Pubkey::new_unique(),
            service_type: ServiceType::GeneralConsultation,
            service_date: 1_000_000,
            diagnosis: String::from("routine visit"),
            billing: Billing {
                total_billed: 100_000,
                ..Default::default()
            },
            currency: Currency::Usd,
            status: ClaimStatus::Submitted,
            status_history: vec![],
            appeal: Appeal::default(),
            processing: Processing::default(),
            payment_transaction: None,
            payment_method: PaymentMethod::default(),
            paid_at: 0,
            submitted_at: 1_000_000,
            bump: 255,
        }
    }

    #[test]
    fn happy_path_transitions() {
        use ClaimStatus::*;
        assert!(Submitted.can_transition(UnderReview));
        assert!(UnderReview.can_transition(Approved));
        assert!(Approved.can_transition(Paid));
        assert!(Approved.can_transition(Appealed));
        assert!(Rejected.can_transition(Appealed));
        assert!(Appealed.can_transition(Rejected));
    }

    #[test]
    fn terminal_states_reject_everything() {
        use ClaimStatus::*;
        for terminal in [Paid, Cancelled] {
            for to in [
                Submitted,
                UnderReview,
                Approved,
                PartiallyApproved,
                Rejected,
                Appealed,
                Paid,
                Cancelled,
            ] {
                assert!(!terminal.can_transition(to), "{terminal:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn approve_after_approve_fails() {
        let actor = Pubkey::new_unique();
        let mut claim = test_claim();
        claim
            .record_transition(ClaimStatus::Approved, actor, String::new(), 10)
            .unwrap();
        let err = claim.record_transition(ClaimStatus::Approved, actor, String::new(), 11);
        assert!(err.is_err());
        assert_eq!(claim.status, ClaimStatus::Approved);
        // Failed transition appends no history entry
        assert_eq!(claim.status_history.len(), 1);
    }

    #[test]
    fn partial_approve_on_terminal_fails() {
        let actor = Pubkey::new_unique();
        let mut claim = test_claim();
        claim
            .record_transition(ClaimStatus::Cancelled, actor, String::new(), 10)
            .unwrap();
        assert!(claim
            .record_transition(ClaimStatus::PartiallyApproved, actor, String::new(), 11)
            .is_err());
    }

    #[test]
    fn rejected_only_escapes_via_appeal() {
        use ClaimStatus::*;
        assert!(Rejected.can_transition(Appealed));
        assert!(!Rejected.can_transition(Approved));
        assert!(!Rejected.can_transition(Paid));
        assert!(!Rejected.can_transition(Cancelled));
    }

    #[test]
    fn history_appends_one_entry_per_transition() {
        let actor = Pubkey::new_unique();
        let mut claim = test_claim();
        claim
            .record_transition(ClaimStatus::UnderReview, actor, String::from("assigned"), 10)
            .unwrap();
        claim
            .record_transition(ClaimStatus::Approved, actor, String::new(), 20)
            .unwrap();
        assert_eq!(claim.status_history.len(), 2);
        assert_eq!(claim.status_history[0].status, ClaimStatus::UnderReview);
        assert_eq!(claim.status_history[1].status, ClaimStatus::Approved);
    }

    #[test]
    fn history_drops_oldest_at_capacity() {
        let actor = Pubkey::new_unique();
        let mut claim = test_claim();
        for i in 0..Claim::MAX_HISTORY as i64 {
            claim.push_history(ClaimStatus::UnderReview, actor, String::new(), i);
        }
        claim.push_history(ClaimStatus::Approved, actor, String::new(), 99);
        assert_eq!(claim.status_history.len(), Claim::MAX_HISTORY);
        assert_eq!(claim.status_history[0].timestamp, 1);
        assert_eq!(
            claim.status_history.last().unwrap().status,
            ClaimStatus::Approved
        );
    }
}
