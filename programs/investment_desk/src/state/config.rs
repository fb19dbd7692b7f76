/**
 * Platform Configuration State
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{DeskError, BPS_DENOMINATOR, MAX_REFERRAL_BONUS_BPS};

/// Platform configuration account (singleton)
/// Stores the settlement mint, treasury vault and platform-wide counters
#[account]
pub struct PlatformConfig {
    /// Admin who initialized the platform
    pub admin: Pubkey,

    /// Settlement token mint (all amounts are in its base units)
    pub mint: Pubkey,

    /// Token account holding funds for withdrawals (owned by this PDA)
    pub treasury_vault: Pubkey,

    /// Referral reward on a referee's activated principal (500 = 5%)
    pub referral_bonus_bps: u16,

    /// Next plan id
    pub plan_count: u64,

    /// Next payment method id
    pub payment_method_count: u64,

    /// Principal currently held in active or matured investments
    pub total_active_principal: u64,

    /// Total paid out from the treasury vault (lifetime)
    pub total_paid_out: u64,

    /// Blocks new investments and withdrawal requests
    pub is_paused: bool,

    /// Bump seed for the treasury vault PDA
    pub vault_bump: u8,

    /// Bump seed for PDA
    pub bump: u8,

    /// Reserved for future use
    pub reserved: [u8; 64],
}

impl PlatformConfig {
    pub const LEN: usize = 8 + // discriminator
        32 + // admin
        32 + // mint
        32 + // treasury_vault
        2 +  // referral_bonus_bps
        8 +  // plan_count
        8 +  // payment_method_count
        8 +  // total_active_principal
        8 +  // total_paid_out
        1 +  // is_paused
        1 +  // vault_bump
        1 +  // bump
        64;  // reserved

    pub fn validate_referral_bonus(bps: u16) -> core::result::Result<(), DeskError> {
        if bps > MAX_REFERRAL_BONUS_BPS {
            return Err(DeskError::InvalidReferralBonus);
        }
        Ok(())
    }

    /// Referral reward for a given principal
    /// Uses u128 intermediate calculations to prevent overflow
    pub fn referral_reward(&self, amount: u64) -> core::result::Result<u64, DeskError> {
        let reward = (amount as u128)
            .checked_mul(self.referral_bonus_bps as u128)
            .ok_or(DeskError::MathOverflow)?
            / BPS_DENOMINATOR as u128;
        u64::try_from(reward).map_err(|_| DeskError::MathOverflow)
    }

    /// Hand out the next plan id
    pub fn next_plan_id(&mut self) -> core::result::Result<u64, DeskError> {
        let id = self.plan_count;
        self.plan_count = id.checked_add(1).ok_or(DeskError::MathOverflow)?;
        Ok(id)
    }

    /// Hand out the next payment method id
    pub fn next_payment_method_id(&mut self) -> core::result::Result<u64, DeskError> {
        let id = self.payment_method_count;
        self.payment_method_count = id.checked_add(1).ok_or(DeskError::MathOverflow)?;
        Ok(id)
    }

    /// Principal entered an active investment
    pub fn record_activation(&mut self, amount: u64) -> core::result::Result<(), DeskError> {
        self.total_active_principal = self.total_active_principal
            .checked_add(amount)
            .ok_or(DeskError::MathOverflow)?;
        Ok(())
    }

    /// Principal left an investment (withdrawn or rolled over)
    pub fn record_release(&mut self, amount: u64) {
        self.total_active_principal = self.total_active_principal.saturating_sub(amount);
    }

    pub fn ensure_open(&self) -> core::result::Result<(), DeskError> {
        if self.is_paused {
            return Err(DeskError::PlatformPaused);
        }
        Ok(())
    }
}
