// programs/aegis_core/src/lib.rs
//
// Aegis Core - Shared Types and Money Math
// ========================================
//
// This module provides:
// - Currency and service-type vocabulary shared by every program
// - Enrollment kind / payment schedule enums used for pricing
// - Fixed-point money arithmetic (minor units, deterministic rounding)
//
// Nothing here owns accounts or instructions; the other programs pull
// these types in so claim, enrollment, and ledger records agree on how
// amounts and coverage axes are encoded.

use anchor_lang::prelude::*;

declare_id!("DHGQUHAXRvEiHA4J3JhxKdSLkqvyKPyZYaciLfMA5yok");

// =============================================================================
// SUBMODULES
// =============================================================================

/// Minor-unit money arithmetic
pub mod money;

// =============================================================================
// SHARED VOCABULARY
// =============================================================================

/// Settlement currency. All amounts are minor units (2 decimals), so
/// 1000.00 is stored as 100_000.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum Currency {
    #[default]
    Usd,
    Ngn,
    Eur,
    Gbp,
}

impl Currency {
    /// Minor units per major unit (all supported currencies are 2-decimal)
    pub const MINOR_PER_MAJOR: u64 = 100;
}

/// Service types a plan's coverage map is keyed by
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ServiceType {
    GeneralConsultation,
    SpecialistConsultation,
    Emergency,
    Hospitalization,
    Surgery,
    Maternity,
    Laboratory,
    DiagnosticImaging,
    Prescription,
    Dental,
    Optical,
    MentalHealth,
    Preventive,
    Physiotherapy,
    Other,
}

/// Enrollment kind, the pricing axis for plan premiums
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum EnrollmentKind {
    #[default]
    Individual,
    Family,
    Corporate,
}

/// How an enrollment's premium is billed
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum PaymentSchedule {
    #[default]
    Monthly,
    Annual,
}

impl PaymentSchedule {
    /// Coverage term length in days
    pub fn term_days(&self) -> u32 {
        match self {
            PaymentSchedule::Monthly => 30,
            PaymentSchedule::Annual => 365,
        }
    }

    pub fn term_seconds(&self) -> i64 {
        self.term_days() as i64 * 24 * 60 * 60
    }
}

/// Period a per-service coverage limit applies to
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum LimitPeriod {
    /// No limit configured
    #[default]
    None,
    /// Limit caps each visit/incident
    PerVisit,
    /// Limit caps the coverage year
    Annual,
    /// Limit caps the enrollment lifetime
    Lifetime,
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_default() {
        assert_eq!(Currency::default(), Currency::Usd);
    }

    #[test]
    fn test_payment_schedule_term_days() {
        assert_eq!(PaymentSchedule::Monthly.term_days(), 30);
        assert_eq!(PaymentSchedule::Annual.term_days(), 365);
    }

    #[test]
    fn test_payment_schedule_term_seconds() {
        assert_eq!(PaymentSchedule::Annual.term_seconds(), 365 * 24 * 60 * 60);
    }

    #[test]
    fn test_limit_period_default_is_none() {
        assert_eq!(LimitPeriod::default(), LimitPeriod::None);
    }

    #[test]
    fn test_service_types_distinct() {
        assert_ne!(ServiceType::Emergency, ServiceType::Hospitalization);
        assert_ne!(ServiceType::GeneralConsultation, ServiceType::SpecialistConsultation);
    }
}
