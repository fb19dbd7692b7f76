/**
 * Platform Instructions
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{
    state::{validate_full_name, validate_username, AccountStatus, PlatformConfig, Profile, Role, UsernameHandle},
    DeskError,
    PlatformInitialized,
    PlatformPauseChanged,
    ProfileRegistered,
    TreasuryFunded,
    PLATFORM_SEED,
    PROFILE_SEED,
    TREASURY_VAULT_SEED,
    USERNAME_SEED,
};

// =============================================================================
// INITIALIZE PLATFORM
// =============================================================================

#[derive(Accounts)]
#[instruction(full_name: String, username: String)]
pub struct InitializePlatform<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Settlement token mint
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = PlatformConfig::LEN,
        seeds = [PLATFORM_SEED],
        bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(
        init,
        payer = admin,
        seeds = [TREASURY_VAULT_SEED, config.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = config,
        token::token_program = token_program,
    )]
    pub treasury_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init,
        payer = admin,
        space = Profile::LEN,
        seeds = [PROFILE_SEED, admin.key().as_ref()],
        bump,
    )]
    pub admin_profile: Account<'info, Profile>,

    #[account(
        init,
        payer = admin,
        space = UsernameHandle::LEN,
        seeds = [USERNAME_SEED, username.as_bytes()],
        bump,
    )]
    pub username_handle: Account<'info, UsernameHandle>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn init_handler(
    ctx: Context<InitializePlatform>,
    full_name: String,
    username: String,
    referral_bonus_bps: u16,
) -> Result<()> {
    PlatformConfig::validate_referral_bonus(referral_bonus_bps)?;
    validate_full_name(&full_name)?;
    validate_username(&username)?;

    let clock = Clock::get()?;
    let admin_key = ctx.accounts.admin.key();

    let config = &mut ctx.accounts.config;
    config.admin = admin_key;
    config.mint = ctx.accounts.mint.key();
    config.treasury_vault = ctx.accounts.treasury_vault.key();
    config.referral_bonus_bps = referral_bonus_bps;
    config.plan_count = 0;
    config.payment_method_count = 0;
    config.total_active_principal = 0;
    config.total_paid_out = 0;
    config.is_paused = false;
    config.vault_bump = ctx.bumps.treasury_vault;
    config.bump = ctx.bumps.config;

    let profile = &mut ctx.accounts.admin_profile;
    profile.owner = admin_key;
    profile.full_name = full_name;
    profile.username = username.clone();
    profile.role = Role::Admin;
    profile.status = AccountStatus::Active;
    profile.available_balance = 0;
    profile.referral_bonus = 0;
    profile.referred_by = None;
    profile.referral_count = 0;
    profile.investment_count = 0;
    profile.withdrawal_count = 0;
    profile.created_at = clock.unix_timestamp;
    profile.bump = ctx.bumps.admin_profile;

    let handle = &mut ctx.accounts.username_handle;
    handle.claim(admin_key)?;
    handle.bump = ctx.bumps.username_handle;

    emit!(PlatformInitialized {
        admin: admin_key,
        mint: config.mint,
        treasury_vault: config.treasury_vault,
        referral_bonus_bps,
    });

    emit!(ProfileRegistered {
        owner: admin_key,
        username,
        referred_by: None,
    });

    msg!("Platform initialized: mint={}, referral bonus={} bps", config.mint, referral_bonus_bps);

    Ok(())
}

// =============================================================================
// PAUSE / RESUME
// =============================================================================

#[derive(Accounts)]
pub struct SetPaused<'info> {
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
}

pub fn set_paused_handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.is_paused = paused;

    emit!(PlatformPauseChanged {
        admin: ctx.accounts.admin.key(),
        is_paused: paused,
    });

    msg!("Platform {}", if paused { "paused" } else { "resumed" });

    Ok(())
}

// =============================================================================
// FUND TREASURY
// =============================================================================

#[derive(Accounts)]
pub struct FundTreasury<'info> {
    pub funder: Signer<'info>,

    #[account(
        seeds = [PLATFORM_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(address = config.mint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = funder,
        token::token_program = token_program,
    )]
    pub funder_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_vault.key() == config.treasury_vault @ DeskError::InvalidVault,
    )]
    pub treasury_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn fund_treasury_handler(ctx: Context<FundTreasury>, amount: u64) -> Result<()> {
    require!(amount > 0, DeskError::InvalidAmount);

    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.funder_token_account.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.treasury_vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    emit!(TreasuryFunded {
        funder: ctx.accounts.funder.key(),
        amount,
    });

    Ok(())
}
