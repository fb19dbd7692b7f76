/**
 * Profile Instructions
 *
 * Sign-up and self-service profile changes. Usernames are unique through
 * a handle PDA keyed by the username; changing username claims the new
 * handle and releases the old one in the same instruction.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{validate_full_name, validate_username, AccountStatus, Profile, Role, UsernameHandle},
    DeskError,
    ProfileRegistered,
    ProfileUpdated,
    PROFILE_SEED,
    USERNAME_SEED,
};

// =============================================================================
// REGISTER PROFILE
// =============================================================================

#[derive(Accounts)]
#[instruction(full_name: String, username: String)]
pub struct RegisterProfile<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = Profile::LEN,
        seeds = [PROFILE_SEED, owner.key().as_ref()],
        bump,
    )]
    pub profile: Account<'info, Profile>,

    /// May already exist if a previous holder released it
    #[account(
        init_if_needed,
        payer = owner,
        space = UsernameHandle::LEN,
        seeds = [USERNAME_SEED, username.as_bytes()],
        bump,
    )]
    pub username_handle: Account<'info, UsernameHandle>,

    /// Required when `referrer` is set
    #[account(mut)]
    pub referrer_profile: Option<Account<'info, Profile>>,

    pub system_program: Program<'info, System>,
}

pub fn register_handler(
    ctx: Context<RegisterProfile>,
    full_name: String,
    username: String,
    referrer: Option<Pubkey>,
) -> Result<()> {
    validate_full_name(&full_name)?;
    validate_username(&username)?;

    let owner = ctx.accounts.owner.key();
    let clock = Clock::get()?;

    if let Some(referrer_key) = referrer {
        require_keys_neq!(referrer_key, owner, DeskError::SelfReferral);
        let referrer_profile = ctx
            .accounts
            .referrer_profile
            .as_mut()
            .ok_or(DeskError::ReferrerMismatch)?;
        require_keys_eq!(referrer_profile.owner, referrer_key, DeskError::ReferrerMismatch);
        referrer_profile.referral_count = referrer_profile
            .referral_count
            .checked_add(1)
            .ok_or(DeskError::MathOverflow)?;
    }

    let handle = &mut ctx.accounts.username_handle;
    handle.claim(owner)?;
    handle.bump = ctx.bumps.username_handle;

    let profile = &mut ctx.accounts.profile;
    profile.owner = owner;
    profile.full_name = full_name;
    profile.username = username.clone();
    profile.role = Role::User;
    profile.status = AccountStatus::Active;
    profile.available_balance = 0;
    profile.referral_bonus = 0;
    profile.referred_by = referrer;
    profile.referral_count = 0;
    profile.investment_count = 0;
    profile.withdrawal_count = 0;
    profile.created_at = clock.unix_timestamp;
    profile.bump = ctx.bumps.profile;

    emit!(ProfileRegistered {
        owner,
        username,
        referred_by: referrer,
    });

    Ok(())
}

// =============================================================================
// UPDATE PROFILE
// =============================================================================

#[derive(Accounts)]
#[instruction(full_name: String, username: String)]
pub struct UpdateProfile<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, owner.key().as_ref()],
        bump = profile.bump,
        has_one = owner @ DeskError::Unauthorized,
    )]
    pub profile: Account<'info, Profile>,

    /// Handle for the requested username
    #[account(
        init_if_needed,
        payer = owner,
        space = UsernameHandle::LEN,
        seeds = [USERNAME_SEED, username.as_bytes()],
        bump,
    )]
    pub username_handle: Account<'info, UsernameHandle>,

    /// Handle for the current username; only when the username changes
    #[account(mut)]
    pub previous_handle: Option<Account<'info, UsernameHandle>>,

    pub system_program: Program<'info, System>,
}

pub fn update_handler(ctx: Context<UpdateProfile>, full_name: String, username: String) -> Result<()> {
    validate_full_name(&full_name)?;
    validate_username(&username)?;

    let owner = ctx.accounts.owner.key();
    let profile = &mut ctx.accounts.profile;

    let handle = &mut ctx.accounts.username_handle;
    handle.claim(owner)?;
    handle.bump = ctx.bumps.username_handle;

    if profile.username != username {
        let previous = ctx
            .accounts
            .previous_handle
            .as_mut()
            .ok_or(DeskError::UsernameHandleMismatch)?;
        let (expected, _) = Pubkey::find_program_address(
            &[USERNAME_SEED, profile.username.as_bytes()],
            ctx.program_id,
        );
        require_keys_eq!(previous.key(), expected, DeskError::UsernameHandleMismatch);
        previous.release(owner)?;
        msg!("Username changed: {} -> {}", profile.username, username);
    }

    profile.full_name = full_name;
    profile.username = username;

    emit!(ProfileUpdated {
        owner,
        full_name: profile.full_name.clone(),
        username: profile.username.clone(),
    });

    Ok(())
}
