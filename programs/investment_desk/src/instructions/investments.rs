/**
 * Investment Creation Instructions
 *
 * Two funding paths into a plan:
 * - From available balance: debited and Active in the same instruction
 * - Via external deposit: Pending until an admin reviews the proof
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    instructions::referrals::accrue_referral,
    state::{FundingSource, Investment, InvestmentPlan, PaymentMethod, PlatformConfig, Profile},
    DeskError,
    InvestmentCreated,
    INVESTMENT_SEED,
    PAYMENT_METHOD_SEED,
    PLAN_SEED,
    PLATFORM_SEED,
    PROFILE_SEED,
};

// =============================================================================
// INVEST FROM BALANCE
// =============================================================================

#[derive(Accounts)]
pub struct InvestFromBalance<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(
        seeds = [PLAN_SEED, plan.id.to_le_bytes().as_ref()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, InvestmentPlan>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, owner.key().as_ref()],
        bump = profile.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub profile: Account<'info, Profile>,

    #[account(
        init,
        payer = owner,
        space = Investment::LEN,
        seeds = [
            INVESTMENT_SEED,
            owner.key().as_ref(),
            profile.investment_count.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub investment: Account<'info, Investment>,

    /// Required when the investor was referred
    #[account(
        mut,
        constraint = referrer_profile.key() != profile.key() @ DeskError::ReferrerMismatch,
    )]
    pub referrer_profile: Option<Account<'info, Profile>>,

    pub system_program: Program<'info, System>,
}

pub fn from_balance_handler(mut ctx: Context<InvestFromBalance>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let plan_key = ctx.accounts.plan.key();
    let investment_key = ctx.accounts.investment.key();

    let accounts = &mut ctx.accounts;
    fund_from_balance(
        &mut accounts.config,
        &accounts.plan,
        plan_key,
        &mut accounts.profile,
        &mut accounts.investment,
        accounts.referrer_profile.as_deref_mut(),
        amount,
        clock.unix_timestamp,
        ctx.bumps.investment,
    )?;

    let investment = &ctx.accounts.investment;
    emit!(InvestmentCreated {
        investment: investment_key,
        owner: investment.owner,
        plan: plan_key,
        amount,
        funding: investment.funding,
        status: investment.status,
        end_date: investment.end_date,
    });

    msg!(
        "Investment #{} of {} active until {} (balance left: {})",
        investment.index,
        amount,
        investment.end_date,
        ctx.accounts.profile.available_balance
    );

    Ok(())
}

/// Debit the investor, open an Active record on `plan` and credit the referrer
#[allow(clippy::too_many_arguments)]
pub(crate) fn fund_from_balance(
    config: &mut PlatformConfig,
    plan: &InvestmentPlan,
    plan_key: Pubkey,
    profile: &mut Profile,
    investment: &mut Investment,
    referrer: Option<&mut Profile>,
    amount: u64,
    now: i64,
    bump: u8,
) -> Result<()> {
    config.ensure_open()?;
    profile.ensure_active()?;
    plan.check_amount(amount, Some(profile.available_balance))?;

    profile.debit(amount)?;
    let index = profile.next_investment_index()?;
    investment.open(
        index,
        profile.owner,
        plan.snapshot(plan_key),
        amount,
        FundingSource::Balance,
        now,
        bump,
    )?;

    config.record_activation(amount)?;
    accrue_referral(config, profile, referrer, amount)?;

    Ok(())
}

// =============================================================================
// INVEST VIA DEPOSIT
// =============================================================================

#[derive(Accounts)]
pub struct InvestViaDeposit<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [PLATFORM_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(
        seeds = [PLAN_SEED, plan.id.to_le_bytes().as_ref()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, InvestmentPlan>,

    #[account(
        seeds = [PAYMENT_METHOD_SEED, payment_method.id.to_le_bytes().as_ref()],
        bump = payment_method.bump,
        constraint = payment_method.enabled @ DeskError::PaymentMethodDisabled,
    )]
    pub payment_method: Account<'info, PaymentMethod>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, owner.key().as_ref()],
        bump = profile.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub profile: Account<'info, Profile>,

    #[account(
        init,
        payer = owner,
        space = Investment::LEN,
        seeds = [
            INVESTMENT_SEED,
            owner.key().as_ref(),
            profile.investment_count.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub investment: Account<'info, Investment>,

    pub system_program: Program<'info, System>,
}

pub fn via_deposit_handler(
    ctx: Context<InvestViaDeposit>,
    amount: u64,
    proof_reference: String,
) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();
    let plan_key = ctx.accounts.plan.key();
    let investment_key = ctx.accounts.investment.key();

    ctx.accounts.config.ensure_open()?;
    ctx.accounts.profile.ensure_active()?;
    ctx.accounts.plan.check_amount(amount, None)?;

    let index = ctx.accounts.profile.next_investment_index()?;
    let terms = ctx.accounts.plan.snapshot(plan_key);
    let label = ctx.accounts.payment_method.label();

    let investment = &mut ctx.accounts.investment;
    investment.open(
        index,
        owner,
        terms,
        amount,
        FundingSource::Deposit,
        clock.unix_timestamp,
        ctx.bumps.investment,
    )?;
    investment.attach_deposit(label, proof_reference)?;

    emit!(InvestmentCreated {
        investment: investment_key,
        owner,
        plan: plan_key,
        amount,
        funding: investment.funding,
        status: investment.status,
        end_date: investment.end_date,
    });

    msg!(
        "Investment #{} of {} pending review ({})",
        index,
        amount,
        investment.payment_method
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        instructions::test_fixtures::{blank_investment, config, error_name, plan, profile},
        state::InvestmentStatus,
        SECONDS_PER_DAY,
    };

    const T0: i64 = 1_700_000_000;

    #[test]
    fn balance_investment_debits_and_activates_together() {
        let mut cfg = config(500);
        let mut investor = profile(None);
        investor.available_balance = 1_500;
        let mut investment = blank_investment();
        let plan_key = Pubkey::new_unique();

        fund_from_balance(
            &mut cfg, &plan(), plan_key, &mut investor, &mut investment, None, 1_000, T0, 254,
        )
        .unwrap();

        assert_eq!(investor.available_balance, 500);
        assert_eq!(investor.investment_count, 1);
        assert_eq!(cfg.total_active_principal, 1_000);
        assert_eq!(investment.owner, investor.owner);
        assert_eq!(investment.plan, plan_key);
        assert_eq!(investment.status, InvestmentStatus::Active);
        assert_eq!(investment.end_date, T0 + 10 * SECONDS_PER_DAY);
    }

    #[test]
    fn balance_investment_credits_referrer() {
        let mut cfg = config(500);
        let mut referrer = profile(None);
        let mut investor = profile(Some(referrer.owner));
        investor.available_balance = 2_000;
        let mut investment = blank_investment();

        fund_from_balance(
            &mut cfg,
            &plan(),
            Pubkey::new_unique(),
            &mut investor,
            &mut investment,
            Some(&mut referrer),
            2_000,
            T0,
            254,
        )
        .unwrap();

        assert_eq!(referrer.referral_bonus, 100);
        assert_eq!(investor.available_balance, 0);
    }

    #[test]
    fn amount_refusals() {
        let mut cfg = config(0);
        let mut investor = profile(None);
        investor.available_balance = 500;
        let mut investment = blank_investment();
        let key = Pubkey::new_unique();

        let err = fund_from_balance(&mut cfg, &plan(), key, &mut investor, &mut investment, None, 100, T0, 254)
            .unwrap_err();
        assert_eq!(error_name(err), "AmountBelowPlanMinimum");

        let err = fund_from_balance(&mut cfg, &plan(), key, &mut investor, &mut investment, None, 600, T0, 254)
            .unwrap_err();
        assert_eq!(error_name(err), "InsufficientBalance");

        assert_eq!(investor.available_balance, 500);
        assert_eq!(investor.investment_count, 0);
        assert_eq!(cfg.total_active_principal, 0);
    }

    #[test]
    fn paused_platform_refuses_new_investments() {
        let mut cfg = config(0);
        cfg.is_paused = true;
        let mut investor = profile(None);
        investor.available_balance = 1_000;
        let mut investment = blank_investment();

        let err = fund_from_balance(
            &mut cfg, &plan(), Pubkey::new_unique(), &mut investor, &mut investment, None, 1_000, T0, 254,
        )
        .unwrap_err();
        assert_eq!(error_name(err), "PlatformPaused");
        assert_eq!(investor.available_balance, 1_000);
    }
}
