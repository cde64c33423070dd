// programs/aegis_plans/src/instructions/catalog.rs

use aegis_core::Currency;
use anchor_lang::prelude::*;
use crate::state::{HmoPlan, PlanCatalog, PlanCategory, PlanStatistics, ServiceCoverage};
use crate::errors::PlansError;
use crate::events::{PlanCreated, PlanFlagsUpdated};

/// Create a new plan product
#[derive(Accounts)]
#[instruction(params: CreatePlanParams)]
pub struct CreatePlan<'info> {
    #[account(
        mut,
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        constraint = plan_catalog.authority == authority.key() @ PlansError::Unauthorized
    )]
    pub plan_catalog: Account<'info, PlanCatalog>,

    #[account(
        init,
        payer = authority,
        space = 8 + HmoPlan::INIT_SPACE,
        seeds = [HmoPlan::SEED_PREFIX, &params.plan_id.to_le_bytes()],
        bump
    )]
    pub plan: Account<'info, HmoPlan>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreatePlanParams {
    pub plan_id: u64,
    pub name: String,
    pub category: PlanCategory,
    pub coverage: Vec<ServiceCoverage>,
    pub premium_individual: u64,
    pub premium_family: u64,
    pub premium_corporate: u64,
    pub dependents_allowed: u8,
    pub annual_max: u64,
    pub lifetime_max: u64,
    pub deductible: u64,
    pub max_out_of_pocket: u64,
    pub currency: Currency,
}

pub fn create_plan(ctx: Context<CreatePlan>, params: CreatePlanParams) -> Result<()> {
    let clock = Clock::get()?;
    let catalog = &mut ctx.accounts.plan_catalog;

    require!(!params.name.trim().is_empty(), PlansError::NameRequired);
    require!(params.premium_individual > 0, PlansError::InvalidPlanConfig);
    require!(params.annual_max > 0, PlansError::InvalidPlanConfig);

    for (i, rule) in params.coverage.iter().enumerate() {
        require!(rule.coverage_bps <= 10_000, PlansError::InvalidCoverageBps);
        let dup = params.coverage[..i]
            .iter()
            .any(|r| r.service_type == rule.service_type);
        require!(!dup, PlansError::DuplicateServiceRule);
    }

    let plan = &mut ctx.accounts.plan;
    plan.plan_id = params.plan_id;
    plan.name = params.name.clone();
    plan.category = params.category;
    plan.coverage = params.coverage;
    plan.premium_individual = params.premium_individual;
    plan.premium_family = params.premium_family;
    plan.premium_corporate = params.premium_corporate;
    plan.dependents_allowed = params.dependents_allowed;
    plan.annual_max = params.annual_max;
    plan.lifetime_max = params.lifetime_max;
    plan.deductible = params.deductible;
    plan.max_out_of_pocket = params.max_out_of_pocket;
    plan.currency = params.currency;
    plan.is_active = true;
    plan.enrollment_open = true;
    plan.statistics = PlanStatistics::default();
    plan.created_at = clock.unix_timestamp;
    plan.bump = ctx.bumps.plan;

    catalog.total_plans += 1;

    emit!(PlanCreated {
        plan_id: params.plan_id,
        name: params.name,
        category: plan.category,
        premium_individual: plan.premium_individual,
        deductible: plan.deductible,
        max_out_of_pocket: plan.max_out_of_pocket,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Update a plan's availability flags
#[derive(Accounts)]
pub struct SetPlanFlags<'info> {
    #[account(
        seeds = [PlanCatalog::SEED_PREFIX],
        bump = plan_catalog.bump,
        constraint = plan_catalog.authority == authority.key() @ PlansError::Unauthorized
    )]
    pub plan_catalog: Account<'info, PlanCatalog>,

    #[account(
        mut,
        seeds = [HmoPlan::SEED_PREFIX, &plan.plan_id.to_le_bytes()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, HmoPlan>,

    pub authority: Signer<'info>,
}

pub fn set_plan_flags(
    ctx: Context<SetPlanFlags>,
    is_active: bool,
    enrollment_open: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    let plan = &mut ctx.accounts.plan;

    plan.is_active = is_active;
    plan.enrollment_open = enrollment_open;

    emit!(PlanFlagsUpdated {
        plan_id: plan.plan_id,
        is_active,
        enrollment_open,
        updater: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
