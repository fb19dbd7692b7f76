/**
 * Investment Lifecycle Instructions
 *
 * Admin review of deposits, the maturity crank, and the owner's exits
 * (withdraw to balance or reinvest into the same plan).
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    instructions::referrals::accrue_referral,
    state::{FundingSource, Investment, InvestmentQuote, PlatformConfig, Profile},
    DeskError,
    InvestmentApproved,
    InvestmentCreated,
    InvestmentMatured,
    InvestmentRejected,
    InvestmentReinvested,
    InvestmentWithdrawn,
    INVESTMENT_SEED,
    PLATFORM_SEED,
    PROFILE_SEED,
};

// =============================================================================
// APPROVE (admin)
// =============================================================================

#[derive(Accounts)]
pub struct ApproveInvestment<'info> {
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
        mut,
        seeds = [
            INVESTMENT_SEED,
            investment.owner.as_ref(),
            investment.index.to_le_bytes().as_ref(),
        ],
        bump = investment.bump,
    )]
    pub investment: Account<'info, Investment>,

    #[account(
        seeds = [PROFILE_SEED, investment.owner.as_ref()],
        bump = investor_profile.bump,
    )]
    pub investor_profile: Account<'info, Profile>,

    /// Required when the investor was referred
    #[account(
        mut,
        constraint = referrer_profile.key() != investor_profile.key() @ DeskError::ReferrerMismatch,
    )]
    pub referrer_profile: Option<Account<'info, Profile>>,
}

pub fn approve_handler(mut ctx: Context<ApproveInvestment>) -> Result<()> {
    let clock = Clock::get()?;
    let investment_key = ctx.accounts.investment.key();

    let accounts = &mut ctx.accounts;
    let referral_reward = activate_deposit(
        &mut accounts.config,
        &accounts.investor_profile,
        &mut accounts.investment,
        accounts.referrer_profile.as_deref_mut(),
        clock.unix_timestamp,
    )?;

    let investment = &ctx.accounts.investment;
    emit!(InvestmentApproved {
        investment: investment_key,
        owner: investment.owner,
        amount: investment.amount,
        start_date: investment.start_date,
        end_date: investment.end_date,
        referral_reward,
    });

    msg!(
        "Investment {} approved: {} active until {}",
        investment_key,
        investment.amount,
        investment.end_date
    );

    Ok(())
}

/// Pending deposit -> Active: count the principal and credit the referrer
/// Returns the referral reward.
pub(crate) fn activate_deposit(
    config: &mut PlatformConfig,
    investor: &Profile,
    investment: &mut Investment,
    referrer: Option<&mut Profile>,
    now: i64,
) -> Result<u64> {
    require_keys_eq!(investor.owner, investment.owner, DeskError::Unauthorized);

    investment.approve(now)?;
    config.record_activation(investment.amount)?;
    accrue_referral(config, investor, referrer, investment.amount)
}

// =============================================================================
// REJECT (admin)
// =============================================================================

#[derive(Accounts)]
pub struct RejectInvestment<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROFILE_SEED, admin.key().as_ref()],
        bump = admin_profile.bump,
        constraint = admin_profile.is_admin() @ DeskError::Unauthorized,
    )]
    pub admin_profile: Account<'info, Profile>,

    #[account(
        mut,
        seeds = [
            INVESTMENT_SEED,
            investment.owner.as_ref(),
            investment.index.to_le_bytes().as_ref(),
        ],
        bump = investment.bump,
    )]
    pub investment: Account<'info, Investment>,
}

pub fn reject_handler(ctx: Context<RejectInvestment>) -> Result<()> {
    let investment_key = ctx.accounts.investment.key();
    let investment = &mut ctx.accounts.investment;
    investment.reject()?;

    emit!(InvestmentRejected {
        investment: investment_key,
        owner: investment.owner,
        amount: investment.amount,
    });

    msg!("Investment {} rejected", investment_key);

    Ok(())
}

// =============================================================================
// MATURE (permissionless crank)
// =============================================================================

#[derive(Accounts)]
pub struct MatureInvestment<'info> {
    pub cranker: Signer<'info>,

    #[account(
        mut,
        seeds = [
            INVESTMENT_SEED,
            investment.owner.as_ref(),
            investment.index.to_le_bytes().as_ref(),
        ],
        bump = investment.bump,
    )]
    pub investment: Account<'info, Investment>,
}

pub fn mature_handler(ctx: Context<MatureInvestment>) -> Result<()> {
    let clock = Clock::get()?;
    let investment_key = ctx.accounts.investment.key();
    let investment = &mut ctx.accounts.investment;
    investment.mature(clock.unix_timestamp)?;

    emit!(InvestmentMatured {
        investment: investment_key,
        owner: investment.owner,
        matured_at: clock.unix_timestamp,
    });

    Ok(())
}

// =============================================================================
// WITHDRAW (owner)
// =============================================================================

#[derive(Accounts)]
pub struct WithdrawInvestment<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, owner.key().as_ref()],
        bump = profile.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub profile: Account<'info, Profile>,

    #[account(
        mut,
        seeds = [
            INVESTMENT_SEED,
            owner.key().as_ref(),
            investment.index.to_le_bytes().as_ref(),
        ],
        bump = investment.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub investment: Account<'info, Investment>,
}

pub fn withdraw_handler(mut ctx: Context<WithdrawInvestment>) -> Result<u64> {
    let clock = Clock::get()?;
    let investment_key = ctx.accounts.investment.key();

    let accounts = &mut ctx.accounts;
    let payout = withdraw_to_balance(
        &mut accounts.config,
        &mut accounts.profile,
        &mut accounts.investment,
        clock.unix_timestamp,
    )?;

    let profile = &ctx.accounts.profile;
    emit!(InvestmentWithdrawn {
        investment: investment_key,
        owner: profile.owner,
        payout,
        available_balance: profile.available_balance,
    });

    msg!("Investment {} withdrawn: {} credited", investment_key, payout);

    Ok(payout)
}

/// Matured -> Withdrawn: credit the payout and release the principal
pub(crate) fn withdraw_to_balance(
    config: &mut PlatformConfig,
    profile: &mut Profile,
    investment: &mut Investment,
    now: i64,
) -> Result<u64> {
    profile.ensure_active()?;

    let principal = investment.amount;
    let payout = investment.settle_withdrawal(now)?;
    profile.credit(payout)?;
    config.record_release(principal);

    Ok(payout)
}

// =============================================================================
// REINVEST (owner)
// =============================================================================

#[derive(Accounts)]
pub struct ReinvestInvestment<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, owner.key().as_ref()],
        bump = profile.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub profile: Account<'info, Profile>,

    #[account(
        mut,
        seeds = [
            INVESTMENT_SEED,
            owner.key().as_ref(),
            investment.index.to_le_bytes().as_ref(),
        ],
        bump = investment.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub investment: Account<'info, Investment>,

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
    pub new_investment: Account<'info, Investment>,

    pub system_program: Program<'info, System>,
}

pub fn reinvest_handler(mut ctx: Context<ReinvestInvestment>) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();
    let investment_key = ctx.accounts.investment.key();
    let new_investment_key = ctx.accounts.new_investment.key();

    let accounts = &mut ctx.accounts;
    let new_amount = roll_over(
        &mut accounts.config,
        &mut accounts.profile,
        &mut accounts.investment,
        investment_key,
        &mut accounts.new_investment,
        clock.unix_timestamp,
        ctx.bumps.new_investment,
    )?;

    let new_investment = &ctx.accounts.new_investment;
    emit!(InvestmentCreated {
        investment: new_investment_key,
        owner,
        plan: new_investment.plan,
        amount: new_amount,
        funding: new_investment.funding,
        status: new_investment.status,
        end_date: new_investment.end_date,
    });

    emit!(InvestmentReinvested {
        investment: investment_key,
        new_investment: new_investment_key,
        owner,
        new_amount,
    });

    msg!(
        "Investment {} reinvested as #{}: {} until {}",
        investment_key,
        new_investment.index,
        new_amount,
        new_investment.end_date
    );

    Ok(())
}

/// Matured -> Reinvested, opening `new_investment` on the same terms
/// The old principal is released before the new one is counted.
pub(crate) fn roll_over(
    config: &mut PlatformConfig,
    profile: &mut Profile,
    investment: &mut Investment,
    investment_key: Pubkey,
    new_investment: &mut Investment,
    now: i64,
    bump: u8,
) -> Result<u64> {
    config.ensure_open()?;
    profile.ensure_active()?;

    let principal = investment.amount;
    let new_amount = investment.settle_reinvestment(now)?;

    let index = profile.next_investment_index()?;
    new_investment.open(
        index,
        profile.owner,
        investment.terms(),
        new_amount,
        FundingSource::Reinvestment,
        now,
        bump,
    )?;
    new_investment.reinvested_from = Some(investment_key);

    config.record_release(principal);
    config.record_activation(new_amount)?;

    Ok(new_amount)
}

// =============================================================================
// QUOTE (read-only)
// =============================================================================

#[derive(Accounts)]
pub struct QuoteInvestment<'info> {
    #[account(
        seeds = [
            INVESTMENT_SEED,
            investment.owner.as_ref(),
            investment.index.to_le_bytes().as_ref(),
        ],
        bump = investment.bump,
    )]
    pub investment: Account<'info, Investment>,
}

pub fn quote_handler(ctx: Context<QuoteInvestment>) -> Result<InvestmentQuote> {
    let clock = Clock::get()?;
    let quote = ctx.accounts.investment.quote(clock.unix_timestamp)?;
    Ok(quote)
}
