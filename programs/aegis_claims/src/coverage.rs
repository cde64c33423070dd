// programs/aegis_claims/src/coverage.rs
//
// Coverage adjudication math. Pure functions over the plan's coverage
// rule and the enrollment's remaining deductible; every amount is a
// minor-unit integer and the breakdown always reconciles exactly:
// covered_amount + patient_total == total_billed.

use aegis_core::money;
use aegis_plans::state::ServiceCoverage;
use anchor_lang::prelude::*;

use crate::errors::ClaimsError;

/// Result of adjudicating a billed amount against a coverage rule
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverageBreakdown {
    pub covered_amount: u64,
    pub patient_total: u64,
    pub patient_copay: u64,
    pub patient_deductible: u64,
    pub patient_coinsurance: u64,
}

/// Compute the covered/patient split for one claim.
///
/// `base = min(total_billed, limit_amount)` when a benefit limit is set;
/// the plan pays `coverage_bps` of the base less the flat copay, clamped
/// at zero. Whatever the plan does not pay is the patient's, split
/// copay -> deductible (up to the enrollment's remaining deductible) ->
/// coinsurance.
pub fn adjudicate(
    total_billed: u64,
    rule: &ServiceCoverage,
    deductible_remaining: u64,
) -> Result<CoverageBreakdown> {
    require!(rule.covered, ClaimsError::ServiceNotCovered);
    require!(total_billed > 0, ClaimsError::InvalidClaimAmount);

    let base = if rule.limit_amount > 0 {
        total_billed.min(rule.limit_amount)
    } else {
        total_billed
    };

    let gross = money::percentage_of(base, rule.coverage_bps);
    let covered_amount = money::clamp_non_negative(gross, rule.copay);
    let patient_total = total_billed
        .checked_sub(covered_amount)
        .ok_or(ClaimsError::MathOverflow)?;

    let patient_copay = rule.copay.min(patient_total);
    let after_copay = patient_total - patient_copay;
    let patient_deductible = deductible_remaining.min(after_copay);
    let patient_coinsurance = after_copay - patient_deductible;

    Ok(CoverageBreakdown {
        covered_amount,
        patient_total,
        patient_copay,
        patient_deductible,
        patient_coinsurance,
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::{LimitPeriod, ServiceType};

    fn rule(covered: bool, copay: u64, coverage_bps: u16, limit_amount: u64) -> ServiceCoverage {
        ServiceCoverage {
            service_type: ServiceType::GeneralConsultation,
            covered,
            copay,
            coverage_bps,
            limit_amount,
            limit_period: if limit_amount > 0 {
                LimitPeriod::PerVisit
            } else {
                LimitPeriod::None
            },
        }
    }

    #[test]
    fn standard_eighty_percent_split() {
        // 1000.00 billed, 80% coverage, 20.00 copay
        let b = adjudicate(100_000, &rule(true, 2_000, 8_000, 0), 10_000).unwrap();
        assert_eq!(b.covered_amount, 78_000);
        assert_eq!(b.patient_total, 22_000);
        assert_eq!(b.patient_copay, 2_000);
        assert_eq!(b.patient_deductible, 10_000);
        assert_eq!(b.patient_coinsurance, 10_000);
        assert_eq!(b.covered_amount + b.patient_total, 100_000);
    }

    #[test]
    fn uncovered_service_fails() {
        let err = adjudicate(100_000, &rule(false, 0, 8_000, 0), 0);
        assert!(err.is_err());
    }

    #[test]
    fn benefit_limit_caps_the_base() {
        // 2000.00 billed, limit 1500.00, 50%: plan pays 750.00
        let b = adjudicate(200_000, &rule(true, 0, 5_000, 150_000), 0).unwrap();
        assert_eq!(b.covered_amount, 75_000);
        assert_eq!(b.patient_total, 125_000);
        assert_eq!(b.covered_amount + b.patient_total, 200_000);
    }

    #[test]
    fn copay_exceeding_gross_clamps_to_zero() {
        // Tiny bill, large copay: plan pays nothing, patient pays all
        let b = adjudicate(1_000, &rule(true, 5_000, 8_000, 0), 0).unwrap();
        assert_eq!(b.covered_amount, 0);
        assert_eq!(b.patient_total, 1_000);
        assert_eq!(b.patient_copay, 1_000);
        assert_eq!(b.patient_deductible, 0);
        assert_eq!(b.patient_coinsurance, 0);
    }

    #[test]
    fn deductible_exhausted_leaves_coinsurance_only() {
        let b = adjudicate(100_000, &rule(true, 2_000, 8_000, 0), 0).unwrap();
        assert_eq!(b.patient_deductible, 0);
        assert_eq!(b.patient_coinsurance, 20_000);
    }

    #[test]
    fn full_coverage_no_copay() {
        let b = adjudicate(50_000, &rule(true, 0, 10_000, 0), 25_000).unwrap();
        assert_eq!(b.covered_amount, 50_000);
        assert_eq!(b.patient_total, 0);
        assert_eq!(b.patient_deductible, 0);
    }

    #[test]
    fn rounding_half_up_reconciles() {
        // 33.33 at 33.33%: percentage_of rounds half-up, split must
        // still reconcile to the billed amount exactly
        let b = adjudicate(3_333, &rule(true, 0, 3_333, 0), 0).unwrap();
        assert_eq!(b.covered_amount, 1_111);
        assert_eq!(b.covered_amount + b.patient_total, 3_333);
    }

    #[test]
    fn zero_billed_rejected() {
        assert!(adjudicate(0, &rule(true, 0, 8_000, 0), 0).is_err());
    }
}
