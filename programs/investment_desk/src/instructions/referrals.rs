/**
 * Referral Instructions
 *
 * Referrers earn `referral_bonus_bps` of every principal their referees
 * put to work (balance investments at creation, deposits at approval).
 * The bonus accrues on the referrer's profile and is moved into available
 * balance on demand.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{PlatformConfig, Profile},
    DeskError,
    ReferralBonusAccrued,
    ReferralBonusWithdrawn,
    PROFILE_SEED,
};

// =============================================================================
// ACCRUAL
// =============================================================================

/// Credit the investor's referrer for `amount` of newly active principal
///
/// `referrer` must be the profile named by `investor.referred_by`, and must
/// be absent for investors without a referrer. Returns the accrued reward.
pub(crate) fn accrue_referral(
    config: &PlatformConfig,
    investor: &Profile,
    referrer: Option<&mut Profile>,
    amount: u64,
) -> Result<u64> {
    let referrer = match (investor.referred_by, referrer) {
        (None, None) => return Ok(0),
        (Some(referred_by), Some(referrer)) => {
            require_keys_eq!(referrer.owner, referred_by, DeskError::ReferrerMismatch);
            referrer
        }
        _ => return err!(DeskError::ReferrerMismatch),
    };

    let reward = config.referral_reward(amount)?;
    if reward == 0 {
        return Ok(0);
    }

    referrer.accrue_referral_bonus(reward)?;

    emit!(ReferralBonusAccrued {
        referrer: referrer.owner,
        referee: investor.owner,
        reward,
    });

    msg!("Referral reward {} accrued to {}", reward, referrer.owner);

    Ok(reward)
}

// =============================================================================
// WITHDRAW REFERRAL BONUS
// =============================================================================

#[derive(Accounts)]
pub struct WithdrawReferralBonus<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, owner.key().as_ref()],
        bump = profile.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub profile: Account<'info, Profile>,
}

pub fn withdraw_handler(ctx: Context<WithdrawReferralBonus>) -> Result<u64> {
    let profile = &mut ctx.accounts.profile;
    profile.ensure_active()?;

    let amount = profile.take_referral_bonus()?;

    emit!(ReferralBonusWithdrawn {
        owner: profile.owner,
        amount,
        available_balance: profile.available_balance,
    });

    msg!("Referral bonus {} moved to available balance", amount);

    Ok(amount)
}
