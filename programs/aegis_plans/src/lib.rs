// programs/aegis_plans/src/lib.rs
//
// Aegis Plans Program
// ===================
// Plan catalog reference for the claims core:
// - Plan products with per-service coverage rules and pricing
// - Availability flags (active / open for enrollment)
// - Aggregate statistics counters, mutated only by the registered
//   enrollment and claims program authorities via CPI

use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("HynmZCjBZ5eHXL48Z7db6CwiCjh6KMXnCHXrsP11Vzdd");

#[program]
pub mod aegis_plans {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the plan catalog
    pub fn initialize_catalog(
        ctx: Context<InitializeCatalog>,
        params: InitializeCatalogParams,
    ) -> Result<()> {
        instructions::initialize::initialize_catalog(ctx, params)
    }

    // ==================== CATALOG MANAGEMENT ====================

    /// Create a new plan product
    pub fn create_plan(ctx: Context<CreatePlan>, params: CreatePlanParams) -> Result<()> {
        instructions::catalog::create_plan(ctx, params)
    }

    /// Update a plan's availability flags
    pub fn set_plan_flags(
        ctx: Context<SetPlanFlags>,
        is_active: bool,
        enrollment_open: bool,
    ) -> Result<()> {
        instructions::catalog::set_plan_flags(ctx, is_active, enrollment_open)
    }

    // ==================== STATISTICS (CPI-only) ====================

    /// Record a new enrollment against a plan
    pub fn record_enrollment(ctx: Context<RecordEnrollment>) -> Result<()> {
        instructions::statistics::record_enrollment(ctx)
    }

    /// Record a cancelled enrollment against a plan
    pub fn record_cancellation(ctx: Context<RecordCancellation>) -> Result<()> {
        instructions::statistics::record_cancellation(ctx)
    }

    /// Record a paid claim against a plan
    pub fn record_claim_paid(ctx: Context<RecordClaimPaid>, amount: u64) -> Result<()> {
        instructions::statistics::record_claim_paid(ctx, amount)
    }
}
