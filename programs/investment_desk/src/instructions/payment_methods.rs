/**
 * Payment Method Instructions
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::{PaymentMethod, PaymentMethodParams, PlatformConfig, Profile},
    DeskError,
    PaymentMethodChanged,
    PAYMENT_METHOD_SEED,
    PLATFORM_SEED,
    PROFILE_SEED,
};

// =============================================================================
// ADD PAYMENT METHOD
// =============================================================================

#[derive(Accounts)]
pub struct AddPaymentMethod<'info> {
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
        space = PaymentMethod::LEN,
        seeds = [PAYMENT_METHOD_SEED, config.payment_method_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub payment_method: Account<'info, PaymentMethod>,

    pub system_program: Program<'info, System>,
}

pub fn add_handler(ctx: Context<AddPaymentMethod>, params: PaymentMethodParams) -> Result<()> {
    let key = ctx.accounts.payment_method.key();
    let id = ctx.accounts.config.next_payment_method_id()?;

    let method = &mut ctx.accounts.payment_method;
    method.apply(params)?;
    method.id = id;
    method.enabled = true;
    method.bump = ctx.bumps.payment_method;

    emit_changed(key, method, false);

    msg!("Payment method #{} added: {}", id, method.label());

    Ok(())
}

// =============================================================================
// UPDATE / TOGGLE
// =============================================================================

#[derive(Accounts)]
pub struct UpdatePaymentMethod<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROFILE_SEED, admin.key().as_ref()],
        bump = admin_profile.bump,
        constraint = admin_profile.is_admin() @ DeskError::Unauthorized,
    )]
    pub admin_profile: Account<'info, Profile>,

    #[account(
        mut,
        seeds = [PAYMENT_METHOD_SEED, payment_method.id.to_le_bytes().as_ref()],
        bump = payment_method.bump,
    )]
    pub payment_method: Account<'info, PaymentMethod>,
}

pub fn update_handler(ctx: Context<UpdatePaymentMethod>, params: PaymentMethodParams) -> Result<()> {
    let key = ctx.accounts.payment_method.key();
    let method = &mut ctx.accounts.payment_method;
    method.apply(params)?;

    emit_changed(key, method, false);

    Ok(())
}

pub fn set_enabled_handler(ctx: Context<UpdatePaymentMethod>, enabled: bool) -> Result<()> {
    let key = ctx.accounts.payment_method.key();
    let method = &mut ctx.accounts.payment_method;
    method.enabled = enabled;

    emit_changed(key, method, false);

    Ok(())
}

// =============================================================================
// REMOVE
// =============================================================================

#[derive(Accounts)]
pub struct RemovePaymentMethod<'info> {
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
        seeds = [PAYMENT_METHOD_SEED, payment_method.id.to_le_bytes().as_ref()],
        bump = payment_method.bump,
        close = admin,
    )]
    pub payment_method: Account<'info, PaymentMethod>,
}

pub fn remove_handler(ctx: Context<RemovePaymentMethod>) -> Result<()> {
    let key = ctx.accounts.payment_method.key();
    let method = &ctx.accounts.payment_method;

    emit_changed(key, method, true);

    msg!("Payment method #{} removed", method.id);

    Ok(())
}

fn emit_changed(key: Pubkey, method: &PaymentMethod, removed: bool) {
    emit!(PaymentMethodChanged {
        payment_method: key,
        id: method.id,
        label: method.label(),
        enabled: method.enabled && !removed,
        removed,
    });
}
