// programs/aegis_plans/src/state.rs

use aegis_core::{Currency, EnrollmentKind, LimitPeriod, PaymentSchedule, ServiceType};
use anchor_lang::prelude::*;

/// Plan catalog configuration
/// PDA seeds: ["plan_catalog"]
#[account]
#[derive(InitSpace)]
pub struct PlanCatalog {
    /// Catalog administrator
    pub authority: Pubkey,

    /// Claims-config PDA allowed to bump claim statistics (via CPI)
    pub claims_authority: Pubkey,

    /// Enrollment-config PDA allowed to bump enrollment statistics (via CPI)
    pub enrollment_authority: Pubkey,

    /// Total plans created
    pub total_plans: u64,

    /// Bump seed
    pub bump: u8,
}

impl PlanCatalog {
    pub const SEED_PREFIX: &'static [u8] = b"plan_catalog";
}

/// Plan product tier
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum PlanCategory {
    #[default]
    Basic,
    Standard,
    Premium,
    Platinum,
}

/// Coverage rule for one service type
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace)]
pub struct ServiceCoverage {
    /// Service type this rule applies to
    pub service_type: ServiceType,

    /// Is the service covered at all
    pub covered: bool,

    /// Flat copayment per claim (minor units)
    pub copay: u64,

    /// Coverage percentage in basis points (8000 = plan pays 80%)
    pub coverage_bps: u16,

    /// Limit amount (minor units, 0 = unlimited)
    pub limit_amount: u64,

    /// Period the limit applies to
    pub limit_period: LimitPeriod,
}

/// Aggregate plan statistics. Monotonic counters except active_enrollments;
/// mutated only through the authority-gated record_* instructions.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, InitSpace)]
pub struct PlanStatistics {
    /// Enrollments created against this plan (all-time)
    pub total_enrollments: u64,

    /// Currently active enrollments
    pub active_enrollments: u64,

    /// Cancelled enrollments (all-time)
    pub cancelled_enrollments: u64,

    /// Claims paid against this plan (count)
    pub claims_paid_count: u64,

    /// Claims paid against this plan (minor units)
    pub total_claims_paid: u64,
}

/// HMO plan product
/// PDA seeds: ["plan", plan_id]
///
/// Immutable during a claim's lifetime except for the statistics block.
/// Enrollments snapshot the limit fields at creation so later plan edits
/// never change active coverage terms.
#[account]
#[derive(InitSpace)]
pub struct HmoPlan {
    /// Unique plan ID
    pub plan_id: u64,

    /// Display name
    #[max_len(48)]
    pub name: String,

    /// Product tier
    pub category: PlanCategory,

    /// Coverage rules, one per service type
    #[max_len(15)]
    pub coverage: Vec<ServiceCoverage>,

    /// Monthly premium, individual enrollment (minor units)
    pub premium_individual: u64,

    /// Monthly premium, family enrollment
    pub premium_family: u64,

    /// Monthly premium, corporate enrollment
    pub premium_corporate: u64,

    /// Maximum dependents per enrollment
    pub dependents_allowed: u8,

    /// Annual benefit maximum (minor units)
    pub annual_max: u64,

    /// Lifetime benefit maximum (minor units, 0 = unlimited)
    pub lifetime_max: u64,

    /// Deductible per coverage year (minor units)
    pub deductible: u64,

    /// Out-of-pocket maximum per coverage year (minor units)
    pub max_out_of_pocket: u64,

    /// Settlement currency for this plan
    pub currency: Currency,

    /// Is the plan live (claims accepted)
    pub is_active: bool,

    /// Is the plan open for new enrollments
    pub enrollment_open: bool,

    /// Aggregate statistics
    pub statistics: PlanStatistics,

    /// Creation timestamp
    pub created_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl HmoPlan {
    pub const SEED_PREFIX: &'static [u8] = b"plan";

    /// Look up the coverage rule for a service type
    pub fn coverage_for(&self, service_type: ServiceType) -> Option<&ServiceCoverage> {
        self.coverage.iter().find(|c| c.service_type == service_type)
    }

    /// Premium for one billing term of the given kind and schedule
    pub fn premium_for(&self, kind: EnrollmentKind, schedule: PaymentSchedule) -> u64 {
        let monthly = match kind {
            EnrollmentKind::Individual => self.premium_individual,
            EnrollmentKind::Family => self.premium_family,
            EnrollmentKind::Corporate => self.premium_corporate,
        };
        match schedule {
            PaymentSchedule::Monthly => monthly,
            PaymentSchedule::Annual => monthly.saturating_mul(12),
        }
    }

    /// Can new enrollments be created against this plan
    pub fn accepts_enrollments(&self) -> bool {
        self.is_active && self.enrollment_open
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_plan() -> HmoPlan {
        HmoPlan {
            plan_id: 1,
            name: String::from("Standard Care"),
            category: PlanCategory::Standard,
            coverage: vec![
                ServiceCoverage {
                    service_type: ServiceType::GeneralConsultation,
                    covered: true,
                    copay: 2_000,
                    coverage_bps: 8_000,
                    limit_amount: 0,
                    limit_period: LimitPeriod::None,
                },
                ServiceCoverage {
                    service_type: ServiceType::Dental,
                    covered: false,
                    copay: 0,
                    coverage_bps: 0,
                    limit_amount: 0,
                    limit_period: LimitPeriod::None,
                },
            ],
            premium_individual: 10_000,
            premium_family: 25_000,
            premium_corporate: 8_000,
            dependents_allowed: 4,
            annual_max: 10_000_000,
            lifetime_max: 0,
            deductible: 50_000,
            max_out_of_pocket: 500_000,
            currency: Currency::Usd,
            is_active: true,
            enrollment_open: true,
            statistics: PlanStatistics::default(),
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_coverage_for_found() {
        let plan = test_plan();
        let rule = plan.coverage_for(ServiceType::GeneralConsultation).unwrap();
        assert!(rule.covered);
        assert_eq!(rule.coverage_bps, 8_000);
    }

    #[test]
    fn test_coverage_for_not_covered() {
        let plan = test_plan();
        let rule = plan.coverage_for(ServiceType::Dental).unwrap();
        assert!(!rule.covered);
    }

    #[test]
    fn test_coverage_for_missing() {
        let plan = test_plan();
        assert!(plan.coverage_for(ServiceType::Surgery).is_none());
    }

    #[test]
    fn test_premium_for_monthly() {
        let plan = test_plan();
        assert_eq!(
            plan.premium_for(EnrollmentKind::Individual, PaymentSchedule::Monthly),
            10_000
        );
        assert_eq!(
            plan.premium_for(EnrollmentKind::Family, PaymentSchedule::Monthly),
            25_000
        );
    }

    #[test]
    fn test_premium_for_annual() {
        let plan = test_plan();
        assert_eq!(
            plan.premium_for(EnrollmentKind::Individual, PaymentSchedule::Annual),
            120_000
        );
    }

    #[test]
    fn test_accepts_enrollments() {
        let mut plan = test_plan();
        assert!(plan.accepts_enrollments());
        plan.enrollment_open = false;
        assert!(!plan.accepts_enrollments());
        plan.enrollment_open = true;
        plan.is_active = false;
        assert!(!plan.accepts_enrollments());
    }
}
