// programs/aegis_enrollment/src/state.rs

use aegis_core::{Currency, EnrollmentKind, PaymentSchedule};
use anchor_lang::prelude::*;

use crate::errors::EnrollmentError;

/// Days before coverage_end during which renewal is allowed
pub const RENEWAL_WINDOW_SECONDS: i64 = 60 * 86_400;

/// Grace period after coverage_end before an enrollment expires
pub const GRACE_PERIOD_SECONDS: i64 = 30 * 86_400;

/// Enrollment program configuration
/// PDA seeds: ["enrollment_config"]
#[account]
#[derive(InitSpace)]
pub struct EnrollmentConfig {
    /// Program administrator
    pub authority: Pubkey,

    /// Claims-config PDA allowed to record claim outcomes (via CPI)
    pub claims_authority: Pubkey,

    /// Custody vault (wallet program) receiving premiums
    pub premium_vault: Pubkey,

    /// USDC mint
    pub usdc_mint: Pubkey,

    /// Total enrollments created; next enrollment id
    pub total_enrollments: u64,

    /// Bump seed
    pub bump: u8,
}

impl EnrollmentConfig {
    pub const SEED_PREFIX: &'static [u8] = b"enrollment_config";
}

/// Enrollment lifecycle status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum EnrollmentStatus {
    /// Account zero-state before activation
    #[default]
    Pending,
    Active,
    /// Coverage lapsed but still inside the grace period
    GracePeriod,
    Suspended,
    Cancelled,
    Expired,
}

/// Benefit limits snapshotted from the plan at enrollment time. Later
/// plan edits never change an active enrollment's terms.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, InitSpace)]
pub struct BenefitLimits {
    /// Deductible per coverage year (minor units)
    pub deductible_total: u64,

    /// Out-of-pocket maximum per coverage year
    pub max_out_of_pocket: u64,

    /// Annual benefit maximum
    pub annual_max: u64,
}

/// Claim outcome reported by the claims program
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// A new claim entered the pipeline
    Submitted,
    /// A claim was approved; carries the patient-responsibility portions
    Approved {
        deductible: u64,
        out_of_pocket: u64,
    },
    /// A claim was rejected
    Rejected,
    /// A pending claim was withdrawn
    Cancelled,
}

/// Per-enrollment utilization counters
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, InitSpace)]
pub struct Utilization {
    /// Claims approved (count)
    pub claims_approved: u64,

    /// Claims rejected (count)
    pub claims_rejected: u64,

    /// Claims in flight (count). Never negative: decrements clamp at zero
    /// so a replayed outcome cannot underflow the counter.
    pub claims_pending: u64,

    /// Deductible satisfied so far, saturating at the snapshot total
    pub deductible_met: u64,

    /// Out-of-pocket spend so far, saturating at the snapshot maximum
    pub out_of_pocket_spent: u64,
}

impl Utilization {
    /// Apply a claim outcome. Sole writer of the counters.
    pub fn record(&mut self, outcome: ClaimOutcome, limits: &BenefitLimits) {
        match outcome {
            ClaimOutcome::Submitted => {
                self.claims_pending = self.claims_pending.saturating_add(1);
            }
            ClaimOutcome::Approved {
                deductible,
                out_of_pocket,
            } => {
                self.claims_pending = self.claims_pending.saturating_sub(1);
                self.claims_approved = self.claims_approved.saturating_add(1);
                self.deductible_met = self
                    .deductible_met
                    .saturating_add(deductible)
                    .min(limits.deductible_total);
                self.out_of_pocket_spent = self
                    .out_of_pocket_spent
                    .saturating_add(out_of_pocket)
                    .min(limits.max_out_of_pocket);
            }
            ClaimOutcome::Rejected => {
                self.claims_pending = self.claims_pending.saturating_sub(1);
                self.claims_rejected = self.claims_rejected.saturating_add(1);
            }
            ClaimOutcome::Cancelled => {
                self.claims_pending = self.claims_pending.saturating_sub(1);
            }
        }
    }

    /// Deductible still owed under the snapshot limits
    pub fn deductible_remaining(&self, limits: &BenefitLimits) -> u64 {
        limits.deductible_total.saturating_sub(self.deductible_met)
    }
}

/// Member enrollment
/// PDA seeds: ["enrollment", enrollment_id]
#[account]
#[derive(InitSpace)]
pub struct Enrollment {
    /// Unique enrollment ID
    pub enrollment_id: u64,

    /// Covered member
    pub member: Pubkey,

    /// Plan account
    pub plan: Pubkey,

    /// Plan ID (denormalized for event readers)
    pub plan_id: u64,

    /// Lifecycle status
    pub status: EnrollmentStatus,

    /// Individual / family / corporate
    pub kind: EnrollmentKind,

    /// Monthly or annual billing
    pub schedule: PaymentSchedule,

    /// Coverage window start (unix)
    pub coverage_start: i64,

    /// Coverage window end (unix)
    pub coverage_end: i64,

    /// Number of dependents covered
    pub dependents: u8,

    /// Assigned primary care provider, if any
    pub primary_provider: Option<Pubkey>,

    /// Premium collected for the current term (minor units)
    pub premium_paid: u64,

    /// Settlement currency
    pub currency: Currency,

    /// Benefit limits snapshot
    pub limits: BenefitLimits,

    /// Utilization counters
    pub utilization: Utilization,

    /// Cancellation timestamp (0 if never cancelled)
    pub cancelled_at: i64,

    /// Cancellation reason
    #[max_len(120)]
    pub cancellation_reason: String,

    /// Creation timestamp
    pub created_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl Enrollment {
    pub const SEED_PREFIX: &'static [u8] = b"enrollment";

    pub fn is_in_coverage(&self, now: i64) -> bool {
        now >= self.coverage_start && now <= self.coverage_end
    }

    /// Cancellable from Active, GracePeriod, or Suspended
    pub fn can_be_cancelled(&self) -> bool {
        matches!(
            self.status,
            EnrollmentStatus::Active | EnrollmentStatus::GracePeriod | EnrollmentStatus::Suspended
        )
    }

    /// Renewable only inside the renewal window before coverage_end,
    /// from Active or GracePeriod
    pub fn can_be_renewed(&self, now: i64) -> bool {
        matches!(
            self.status,
            EnrollmentStatus::Active | EnrollmentStatus::GracePeriod
        ) && now >= self.coverage_end.saturating_sub(RENEWAL_WINDOW_SECONDS)
            && now <= self.coverage_end.saturating_add(GRACE_PERIOD_SECONDS)
    }

    /// Can claims be filed against this enrollment
    pub fn accepts_claims(&self) -> bool {
        matches!(
            self.status,
            EnrollmentStatus::Active | EnrollmentStatus::GracePeriod
        )
    }

    /// Unused whole days of coverage remaining at `now`
    pub fn unused_days(&self, now: i64) -> u32 {
        if now >= self.coverage_end {
            return 0;
        }
        let remaining = self.coverage_end - now.max(self.coverage_start);
        (remaining / 86_400) as u32
    }

    /// Lapse the coverage window: GracePeriod right after coverage_end,
    /// Expired once the grace period has passed
    pub fn lapse(&mut self, now: i64) -> Result<()> {
        require!(
            matches!(
                self.status,
                EnrollmentStatus::Active | EnrollmentStatus::GracePeriod
            ),
            EnrollmentError::NotExpirable
        );
        require!(now > self.coverage_end, EnrollmentError::NotExpirable);

        if now > self.coverage_end.saturating_add(GRACE_PERIOD_SECONDS) {
            self.status = EnrollmentStatus::Expired;
        } else {
            self.status = EnrollmentStatus::GracePeriod;
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

    const DAY: i64 = 86_400;

    fn test_limits() -> BenefitLimits {
        BenefitLimits {
            deductible_total: 50_000,
            max_out_of_pocket: 200_000,
            annual_max: 1_000_000,
        }
    }

    fn test_enrollment() -> Enrollment {
        Enrollment {
            enrollment_id: 1,
            member: Pubkey::new_unique(),
            plan: Pubkey::new_unique(),
            plan_id: 1,
            status: EnrollmentStatus::Active,
            kind: EnrollmentKind::Individual,
            schedule: PaymentSchedule::Annual,
            coverage_start: 1_000_000,
            coverage_end: 1_000_000 + 365 * DAY,
            dependents: 0,
            primary_provider: None,
            premium_paid: 120_000,
            currency: Currency::Usd,
            limits: test_limits(),
            utilization: Utilization::default(),
            cancelled_at: 0,
            cancellation_reason: String::new(),
            created_at: 1_000_000,
            bump: 255,
        }
    }

    #[test]
    fn submitted_increments_pending() {
        let mut u = Utilization::default();
        u.record(ClaimOutcome::Submitted, &test_limits());
        assert_eq!(u.claims_pending, 1);
        assert_eq!(u.claims_approved, 0);
    }

    #[test]
    fn approval_moves_pending_to_approved() {
        let limits = test_limits();
        let mut u = Utilization::default();
        u.record(ClaimOutcome::Submitted, &limits);
        u.record(
            ClaimOutcome::Approved {
                deductible: 10_000,
                out_of_pocket: 22_000,
            },
            &limits,
        );
        assert_eq!(u.claims_pending, 0);
        assert_eq!(u.claims_approved, 1);
        assert_eq!(u.deductible_met, 10_000);
        assert_eq!(u.out_of_pocket_spent, 22_000);
    }

    #[test]
    fn pending_decrement_clamps_at_zero() {
        let limits = test_limits();
        let mut u = Utilization::default();
        u.record(ClaimOutcome::Rejected, &limits);
        u.record(ClaimOutcome::Cancelled, &limits);
        assert_eq!(u.claims_pending, 0);
        assert_eq!(u.claims_rejected, 1);
    }

    #[test]
    fn rejection_counted_once_across_appeal_cycle() {
        let limits = test_limits();
        let mut u = Utilization::default();
        // Submit, reject, appeal, deny: the denial records no further
        // outcome, so the trace below is the complete history and the
        // rejection stays counted exactly once.
        u.record(ClaimOutcome::Submitted, &limits);
        u.record(ClaimOutcome::Rejected, &limits);
        assert_eq!(u.claims_rejected, 1);
        assert_eq!(u.claims_pending, 0);
    }

    #[test]
    fn deductible_saturates_at_snapshot_total() {
        let limits = test_limits();
        let mut u = Utilization::default();
        u.record(
            ClaimOutcome::Approved {
                deductible: 40_000,
                out_of_pocket: 40_000,
            },
            &limits,
        );
        u.record(
            ClaimOutcome::Approved {
                deductible: 40_000,
                out_of_pocket: 40_000,
            },
            &limits,
        );
        assert_eq!(u.deductible_met, limits.deductible_total);
        assert_eq!(u.deductible_remaining(&limits), 0);
    }

    #[test]
    fn out_of_pocket_saturates_at_maximum() {
        let limits = test_limits();
        let mut u = Utilization::default();
        u.record(
            ClaimOutcome::Approved {
                deductible: 0,
                out_of_pocket: 500_000,
            },
            &limits,
        );
        assert_eq!(u.out_of_pocket_spent, limits.max_out_of_pocket);
    }

    #[test]
    fn renewal_window_bounds() {
        let e = test_enrollment();
        // Too early: a year out
        assert!(!e.can_be_renewed(e.coverage_start + DAY));
        // Inside the 60-day window
        assert!(e.can_be_renewed(e.coverage_end - 30 * DAY));
        // During grace
        assert!(e.can_be_renewed(e.coverage_end + 10 * DAY));
        // Past grace
        assert!(!e.can_be_renewed(e.coverage_end + 40 * DAY));
    }

    #[test]
    fn lapse_grace_then_expired() {
        let mut e = test_enrollment();
        let end = e.coverage_end;
        e.lapse(end + DAY).unwrap();
        assert_eq!(e.status, EnrollmentStatus::GracePeriod);
        assert!(e.accepts_claims());
        e.lapse(end + GRACE_PERIOD_SECONDS + DAY).unwrap();
        assert_eq!(e.status, EnrollmentStatus::Expired);
        assert!(!e.accepts_claims());
    }

    #[test]
    fn lapse_rejects_live_window() {
        let mut e = test_enrollment();
        assert!(e.lapse(e.coverage_end - DAY).is_err());
        assert_eq!(e.status, EnrollmentStatus::Active);
    }

    #[test]
    fn cancelled_enrollment_not_cancellable_again() {
        let mut e = test_enrollment();
        assert!(e.can_be_cancelled());
        e.status = EnrollmentStatus::Cancelled;
        assert!(!e.can_be_cancelled());
        assert!(!e.accepts_claims());
    }

    #[test]
    fn unused_days_pro_rata_basis() {
        let e = test_enrollment();
        // 180 whole days left
        let now = e.coverage_end - 180 * DAY;
        assert_eq!(e.unused_days(now), 180);
        assert_eq!(e.unused_days(e.coverage_end + DAY), 0);
    }
}
