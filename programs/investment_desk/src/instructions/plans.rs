/**
 * Investment Plan Instructions
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{InvestmentPlan, PlanParams, PlatformConfig, Profile},
    DeskError,
    PlanCreated,
    PlanUpdated,
    PLAN_SEED,
    PLATFORM_SEED,
    PROFILE_SEED,
};

// =============================================================================
// CREATE PLAN
// =============================================================================

#[derive(Accounts)]
pub struct CreatePlan<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROFILE_SEED, admin.key().as_ref()],
        bump = admin_profile.bump,
        constraint = admin_profile.is_admin() @ DeskError::Unauthorized,
    )]
    pub admin_profile: Account<'info, Profile>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(
        init,
        payer = admin,
        space = InvestmentPlan::LEN,
        seeds = [PLAN_SEED, config.plan_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub plan: Account<'info, InvestmentPlan>,

    pub system_program: Program<'info, System>,
}

pub fn create_handler(ctx: Context<CreatePlan>, params: PlanParams) -> Result<()> {
    let clock = Clock::get()?;
    let plan_key = ctx.accounts.plan.key();

    let id = ctx.accounts.config.next_plan_id()?;

    let plan = &mut ctx.accounts.plan;
    plan.apply(params)?;
    plan.id = id;
    plan.is_active = true;
    plan.created_at = clock.unix_timestamp;
    plan.bump = ctx.bumps.plan;

    emit!(PlanCreated {
        plan: plan_key,
        id,
        min_amount: plan.min_amount,
        max_amount: plan.max_amount,
        daily_rate_bps: plan.daily_rate_bps,
        duration_days: plan.duration_days,
    });

    msg!(
        "Plan #{} '{}' created: {}-{}, {} bps/day for {} days",
        id,
        plan.name,
        plan.min_amount,
        plan.max_amount,
        plan.daily_rate_bps,
        plan.duration_days
    );

    Ok(())
}

// =============================================================================
// UPDATE PLAN / TOGGLE
// =============================================================================

#[derive(Accounts)]
pub struct UpdatePlan<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROFILE_SEED, admin.key().as_ref()],
        bump = admin_profile.bump,
        constraint = admin_profile.is_admin() @ DeskError::Unauthorized,
    )]
    pub admin_profile: Account<'info, Profile>,

    #[account(
        mut,
        seeds = [PLAN_SEED, plan.id.to_le_bytes().as_ref()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, InvestmentPlan>,
}

pub fn update_handler(ctx: Context<UpdatePlan>, params: PlanParams) -> Result<()> {
    let plan_key = ctx.accounts.plan.key();
    let plan = &mut ctx.accounts.plan;
    plan.apply(params)?;

    emit_plan_updated(plan_key, plan);

    Ok(())
}

pub fn set_active_handler(ctx: Context<UpdatePlan>, is_active: bool) -> Result<()> {
    let plan_key = ctx.accounts.plan.key();
    let plan = &mut ctx.accounts.plan;
    plan.is_active = is_active;

    emit_plan_updated(plan_key, plan);

    msg!("Plan #{} {}", plan.id, if is_active { "enabled" } else { "disabled" });

    Ok(())
}

fn emit_plan_updated(plan_key: Pubkey, plan: &InvestmentPlan) {
    emit!(PlanUpdated {
        plan: plan_key,
        id: plan.id,
        min_amount: plan.min_amount,
        max_amount: plan.max_amount,
        daily_rate_bps: plan.daily_rate_bps,
        duration_days: plan.duration_days,
        is_active: plan.is_active,
    });
}
