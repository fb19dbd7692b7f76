/**
 * Admin User Management Instructions
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{AccountStatus, Profile, Role},
    DeskError,
    UserAccessChanged,
    UserBalanceUpdated,
    PROFILE_SEED,
};

#[derive(Accounts)]
pub struct ManageUser<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROFILE_SEED, admin.key().as_ref()],
        bump = admin_profile.bump,
        constraint = admin_profile.is_admin() @ DeskError::Unauthorized,
    )]
    pub admin_profile: Account<'info, Profile>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, user_profile.owner.as_ref()],
        bump = user_profile.bump,
    )]
    pub user_profile: Account<'info, Profile>,
}

// =============================================================================
// UPDATE USER BALANCE
// =============================================================================

pub fn update_balance_handler(ctx: Context<ManageUser>, amount: i64) -> Result<()> {
    require!(amount != 0, DeskError::InvalidAmount);

    let user = &mut ctx.accounts.user_profile;
    user.adjust_balance(amount)?;

    emit!(UserBalanceUpdated {
        admin: ctx.accounts.admin.key(),
        user: user.owner,
        delta: amount,
        available_balance: user.available_balance,
    });

    msg!("Balance of {} adjusted by {} -> {}", user.owner, amount, user.available_balance);

    Ok(())
}

// =============================================================================
// ROLE / STATUS
// =============================================================================

pub fn set_status_handler(ctx: Context<ManageUser>, status: AccountStatus) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let user = &mut ctx.accounts.user_profile;
    require_keys_neq!(user.owner, admin, DeskError::CannotModifySelf);

    user.status = status;

    emit_access_changed(admin, user);

    Ok(())
}

pub fn set_role_handler(ctx: Context<ManageUser>, role: Role) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let user = &mut ctx.accounts.user_profile;
    require_keys_neq!(user.owner, admin, DeskError::CannotModifySelf);

    user.role = role;

    emit_access_changed(admin, user);

    Ok(())
}

fn emit_access_changed(admin: Pubkey, user: &Profile) {
    emit!(UserAccessChanged {
        admin,
        user: user.owner,
        role: user.role,
        status: user.status,
    });

    msg!("Access for {}: {:?} / {:?}", user.owner, user.role, user.status);
}
