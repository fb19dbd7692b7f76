/**
 * Withdrawal Instructions
 *
 * Users request payouts of available balance; the amount is debited at
 * request time. Admins settle requests from the treasury vault or reject
 * them, which restores the balance.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::{
    state::{PlatformConfig, Profile, Withdrawal},
    DeskError,
    WithdrawalApproved,
    WithdrawalRejected,
    WithdrawalRequested,
    PLATFORM_SEED,
    PROFILE_SEED,
    WITHDRAWAL_SEED,
};

// =============================================================================
// REQUEST WITHDRAWAL
// =============================================================================

#[derive(Accounts)]
pub struct RequestWithdrawal<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
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
        init,
        payer = owner,
        space = Withdrawal::LEN,
        seeds = [
            WITHDRAWAL_SEED,
            owner.key().as_ref(),
            profile.withdrawal_count.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub withdrawal: Account<'info, Withdrawal>,

    pub system_program: Program<'info, System>,
}

pub fn request_handler(
    ctx: Context<RequestWithdrawal>,
    amount: u64,
    wallet_address: Pubkey,
) -> Result<()> {
    require_keys_neq!(wallet_address, Pubkey::default(), DeskError::InvalidDestination);

    let bump = ctx.bumps.withdrawal;
    let accounts = ctx.accounts;
    open_withdrawal(
        &accounts.config,
        &mut accounts.profile,
        &mut accounts.withdrawal,
        amount,
        wallet_address,
        bump,
    )
}

// =============================================================================
// CREATE WITHDRAWAL (to the owner's associated token account)
// =============================================================================

#[derive(Accounts)]
pub struct CreateWithdrawal<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [PLATFORM_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, PlatformConfig>,

    #[account(address = config.mint)]
    pub mint: InterfaceAccount<'info, Mint>,

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
        space = Withdrawal::LEN,
        seeds = [
            WITHDRAWAL_SEED,
            owner.key().as_ref(),
            profile.withdrawal_count.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub withdrawal: Account<'info, Withdrawal>,

    #[account(
        associated_token::mint = mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn create_handler(ctx: Context<CreateWithdrawal>, amount: u64) -> Result<()> {
    let bump = ctx.bumps.withdrawal;
    let accounts = ctx.accounts;
    let wallet_address = accounts.destination.key();
    open_withdrawal(
        &accounts.config,
        &mut accounts.profile,
        &mut accounts.withdrawal,
        amount,
        wallet_address,
        bump,
    )
}

/// Debit the owner and record a Pending withdrawal
fn open_withdrawal<'info>(
    config: &Account<'info, PlatformConfig>,
    profile: &mut Account<'info, Profile>,
    withdrawal: &mut Account<'info, Withdrawal>,
    amount: u64,
    wallet_address: Pubkey,
    bump: u8,
) -> Result<()> {
    let clock = Clock::get()?;

    config.ensure_open()?;
    profile.ensure_active()?;
    require!(amount > 0, DeskError::InvalidAmount);

    profile.debit(amount)?;
    let index = profile.next_withdrawal_index()?;
    withdrawal.open(index, profile.owner, amount, wallet_address, clock.unix_timestamp, bump)?;

    emit!(WithdrawalRequested {
        withdrawal: withdrawal.key(),
        owner: profile.owner,
        amount,
        wallet_address,
    });

    msg!(
        "Withdrawal #{} of {} requested to {} (balance left: {})",
        index,
        amount,
        wallet_address,
        profile.available_balance
    );

    Ok(())
}

// =============================================================================
// APPROVE WITHDRAWAL (admin)
// =============================================================================

#[derive(Accounts)]
pub struct ApproveWithdrawal<'info> {
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
            WITHDRAWAL_SEED,
            withdrawal.owner.as_ref(),
            withdrawal.index.to_le_bytes().as_ref(),
        ],
        bump = withdrawal.bump,
    )]
    pub withdrawal: Account<'info, Withdrawal>,

    #[account(address = config.mint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = treasury_vault.key() == config.treasury_vault @ DeskError::InvalidVault,
    )]
    pub treasury_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        address = withdrawal.wallet_address @ DeskError::InvalidDestination,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn approve_handler(ctx: Context<ApproveWithdrawal>) -> Result<()> {
    let clock = Clock::get()?;
    let withdrawal_key = ctx.accounts.withdrawal.key();

    let amount = ctx.accounts.withdrawal.approve(clock.unix_timestamp)?;

    let config_bump = ctx.accounts.config.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[PLATFORM_SEED, &[config_bump]]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.treasury_vault.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    let config = &mut ctx.accounts.config;
    config.total_paid_out = config
        .total_paid_out
        .checked_add(amount)
        .ok_or(DeskError::MathOverflow)?;

    let withdrawal = &ctx.accounts.withdrawal;
    emit!(WithdrawalApproved {
        withdrawal: withdrawal_key,
        owner: withdrawal.owner,
        amount,
        wallet_address: withdrawal.wallet_address,
    });

    msg!("Withdrawal {} paid out: {} to {}", withdrawal_key, amount, withdrawal.wallet_address);

    Ok(())
}

// =============================================================================
// REJECT WITHDRAWAL (admin)
// =============================================================================

#[derive(Accounts)]
pub struct RejectWithdrawal<'info> {
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
            WITHDRAWAL_SEED,
            withdrawal.owner.as_ref(),
            withdrawal.index.to_le_bytes().as_ref(),
        ],
        bump = withdrawal.bump,
    )]
    pub withdrawal: Account<'info, Withdrawal>,

    #[account(
        mut,
        seeds = [PROFILE_SEED, withdrawal.owner.as_ref()],
        bump = user_profile.bump,
    )]
    pub user_profile: Account<'info, Profile>,
}

pub fn reject_handler(ctx: Context<RejectWithdrawal>) -> Result<()> {
    let clock = Clock::get()?;
    let withdrawal_key = ctx.accounts.withdrawal.key();

    let amount = ctx.accounts.withdrawal.reject(clock.unix_timestamp)?;

    let user = &mut ctx.accounts.user_profile;
    user.credit(amount)?;

    emit!(WithdrawalRejected {
        withdrawal: withdrawal_key,
        owner: user.owner,
        amount,
        available_balance: user.available_balance,
    });

    msg!("Withdrawal {} rejected: {} restored", withdrawal_key, amount);

    Ok(())
}
