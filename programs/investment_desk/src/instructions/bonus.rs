/**
 * Investment Bonus Instruction
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{Investment, Profile},
    DeskError,
    InvestmentBonusAdjusted,
    INVESTMENT_SEED,
    PROFILE_SEED,
};

#[derive(Accounts)]
pub struct AdjustInvestmentBonus<'info> {
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

/// Add to or deduct from the bonus paid on top of returns
/// Status and term dates are left alone.
pub fn adjust_handler(ctx: Context<AdjustInvestmentBonus>, delta: i64) -> Result<()> {
    require!(delta != 0, DeskError::InvalidAmount);

    let investment_key = ctx.accounts.investment.key();
    let bonus = ctx.accounts.investment.adjust_bonus(delta)?;

    emit!(InvestmentBonusAdjusted {
        investment: investment_key,
        admin: ctx.accounts.admin.key(),
        delta,
        bonus,
    });

    msg!("Bonus on {} adjusted by {} -> {}", investment_key, delta, bonus);

    Ok(())
}
