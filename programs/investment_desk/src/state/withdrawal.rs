/**
 * Withdrawal State
 *
 * Balance is debited when the request is made and restored on rejection,
 * so a pending request can never be double-spent.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::DeskError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum WithdrawalStatus {
    Pending,
    /// Paid out from the treasury vault
    Approved,
    /// Refused, amount returned to available balance
    Rejected,
}

impl Default for WithdrawalStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[account]
pub struct Withdrawal {
    /// Position in the owner's withdrawal sequence (PDA seed)
    pub index: u64,

    pub owner: Pubkey,

    pub amount: u64,

    /// Settlement token account receiving the payout
    pub wallet_address: Pubkey,

    pub status: WithdrawalStatus,

    pub created_at: i64,

    /// Approval / rejection time (0 while pending)
    pub resolved_at: i64,

    /// Bump seed for PDA
    pub bump: u8,
}

impl Withdrawal {
    pub const LEN: usize = 8 + // discriminator
        8 +  // index
        32 + // owner
        8 +  // amount
        32 + // wallet_address
        1 +  // status
        8 +  // created_at
        8 +  // resolved_at
        1;   // bump

    pub fn open(
        &mut self,
        index: u64,
        owner: Pubkey,
        amount: u64,
        wallet_address: Pubkey,
        now: i64,
        bump: u8,
    ) -> core::result::Result<(), DeskError> {
        if amount == 0 {
            return Err(DeskError::InvalidAmount);
        }
        self.index = index;
        self.owner = owner;
        self.amount = amount;
        self.wallet_address = wallet_address;
        self.status = WithdrawalStatus::Pending;
        self.created_at = now;
        self.resolved_at = 0;
        self.bump = bump;
        Ok(())
    }

    fn resolve(
        &mut self,
        status: WithdrawalStatus,
        now: i64,
    ) -> core::result::Result<u64, DeskError> {
        if self.status != WithdrawalStatus::Pending {
            return Err(DeskError::WithdrawalNotPending);
        }
        self.status = status;
        self.resolved_at = now;
        Ok(self.amount)
    }

    /// Pending -> Approved, returns the amount to pay out
    pub fn approve(&mut self, now: i64) -> core::result::Result<u64, DeskError> {
        self.resolve(WithdrawalStatus::Approved, now)
    }

    /// Pending -> Rejected, returns the amount to restore
    pub fn reject(&mut self, now: i64) -> core::result::Result<u64, DeskError> {
        self.resolve(WithdrawalStatus::Rejected, now)
    }
}
