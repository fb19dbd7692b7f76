/**
 * Profile State
 *
 * Per-user ledger: available balance, referral bonus, role and status.
 * Usernames are kept unique through one handle PDA per username.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::validate_text,
    DeskError,
    MAX_FULL_NAME_LEN,
    MAX_USERNAME_LEN,
    MIN_USERNAME_LEN,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum AccountStatus {
    Active,
    Suspended,
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Usernames: lowercase ascii letters, digits and underscore
pub fn validate_username(username: &str) -> core::result::Result<(), DeskError> {
    let valid_len = (MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.len());
    let valid_chars = username
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if !valid_len || !valid_chars {
        return Err(DeskError::InvalidUsername);
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> core::result::Result<(), DeskError> {
    validate_text(full_name, MAX_FULL_NAME_LEN)
}

#[account]
pub struct Profile {
    /// Wallet that owns this profile
    pub owner: Pubkey,

    pub full_name: String,

    pub username: String,

    pub role: Role,

    pub status: AccountStatus,

    /// Spendable / withdrawable amount
    pub available_balance: u64,

    /// Accrued from referees' investments, moved to balance on request
    pub referral_bonus: u64,

    /// Wallet of the user who referred this one
    pub referred_by: Option<Pubkey>,

    pub referral_count: u32,

    /// Next investment index (also the lifetime count)
    pub investment_count: u64,

    /// Next withdrawal index (also the lifetime count)
    pub withdrawal_count: u64,

    pub created_at: i64,

    /// Bump seed for PDA
    pub bump: u8,

    /// Reserved for future use
    pub reserved: [u8; 32],
}

impl Profile {
    pub const LEN: usize = 8 + // discriminator
        32 + // owner
        4 + MAX_FULL_NAME_LEN +
        4 + MAX_USERNAME_LEN +
        1 +  // role
        1 +  // status
        8 +  // available_balance
        8 +  // referral_bonus
        1 + 32 + // referred_by
        4 +  // referral_count
        8 +  // investment_count
        8 +  // withdrawal_count
        8 +  // created_at
        1 +  // bump
        32;  // reserved

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin && self.status == AccountStatus::Active
    }

    pub fn ensure_active(&self) -> core::result::Result<(), DeskError> {
        if self.status == AccountStatus::Suspended {
            return Err(DeskError::AccountSuspended);
        }
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) -> core::result::Result<(), DeskError> {
        self.available_balance = self.available_balance
            .checked_add(amount)
            .ok_or(DeskError::MathOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> core::result::Result<(), DeskError> {
        self.available_balance = self.available_balance
            .checked_sub(amount)
            .ok_or(DeskError::InsufficientBalance)?;
        Ok(())
    }

    /// Signed admin adjustment of available balance
    pub fn adjust_balance(&mut self, delta: i64) -> core::result::Result<(), DeskError> {
        if delta >= 0 {
            self.credit(delta.unsigned_abs())
        } else {
            self.debit(delta.unsigned_abs())
        }
    }

    pub fn accrue_referral_bonus(&mut self, amount: u64) -> core::result::Result<(), DeskError> {
        self.referral_bonus = self.referral_bonus
            .checked_add(amount)
            .ok_or(DeskError::MathOverflow)?;
        Ok(())
    }

    /// Move the whole referral bonus into available balance
    pub fn take_referral_bonus(&mut self) -> core::result::Result<u64, DeskError> {
        let amount = self.referral_bonus;
        if amount == 0 {
            return Err(DeskError::NoReferralBonus);
        }
        self.credit(amount)?;
        self.referral_bonus = 0;
        Ok(amount)
    }

    pub fn next_investment_index(&mut self) -> core::result::Result<u64, DeskError> {
        let index = self.investment_count;
        self.investment_count = index.checked_add(1).ok_or(DeskError::MathOverflow)?;
        Ok(index)
    }

    pub fn next_withdrawal_index(&mut self) -> core::result::Result<u64, DeskError> {
        let index = self.withdrawal_count;
        self.withdrawal_count = index.checked_add(1).ok_or(DeskError::MathOverflow)?;
        Ok(index)
    }
}

/// Username uniqueness record, one PDA per username
#[account]
pub struct UsernameHandle {
    /// Current holder; default key when released
    pub owner: Pubkey,
    pub bump: u8,
}

impl UsernameHandle {
    pub const LEN: usize = 8 + 32 + 1;

    pub fn claim(&mut self, owner: Pubkey) -> core::result::Result<(), DeskError> {
        if self.owner != Pubkey::default() && self.owner != owner {
            return Err(DeskError::UsernameTaken);
        }
        self.owner = owner;
        Ok(())
    }

    pub fn release(&mut self, owner: Pubkey) -> core::result::Result<(), DeskError> {
        if self.owner != owner {
            return Err(DeskError::UsernameHandleMismatch);
        }
        self.owner = Pubkey::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            owner: Pubkey::new_unique(),
            full_name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            role: Role::User,
            status: AccountStatus::Active,
            available_balance: 0,
            referral_bonus: 0,
            referred_by: None,
            referral_count: 0,
            investment_count: 0,
            withdrawal_count: 0,
            created_at: 0,
            bump: 255,
            reserved: [0; 32],
        }
    }

    #[test]
    fn referral_bonus_withdrawal_moves_everything() {
        let mut p = profile();
        p.available_balance = 100;
        p.referral_bonus = 75;
        assert_eq!(p.take_referral_bonus().unwrap(), 75);
        assert_eq!(p.available_balance, 175);
        assert_eq!(p.referral_bonus, 0);
    }

    #[test]
    fn empty_referral_bonus_is_refused() {
        let mut p = profile();
        p.available_balance = 100;
        assert!(matches!(p.take_referral_bonus(), Err(DeskError::NoReferralBonus)));
        assert_eq!(p.available_balance, 100);
    }

    #[test]
    fn debit_cannot_overdraw() {
        let mut p = profile();
        p.credit(500).unwrap();
        assert!(matches!(p.debit(600), Err(DeskError::InsufficientBalance)));
        assert_eq!(p.available_balance, 500);
        p.debit(500).unwrap();
        assert_eq!(p.available_balance, 0);
    }

    #[test]
    fn signed_balance_adjustment() {
        let mut p = profile();
        p.adjust_balance(300).unwrap();
        p.adjust_balance(-100).unwrap();
        assert_eq!(p.available_balance, 200);
        assert!(matches!(p.adjust_balance(-201), Err(DeskError::InsufficientBalance)));
        assert!(matches!(p.adjust_balance(i64::MIN), Err(DeskError::InsufficientBalance)));
        assert_eq!(p.available_balance, 200);
    }

    #[test]
    fn suspended_profile_is_refused() {
        let mut p = profile();
        assert!(p.ensure_active().is_ok());
        p.status = AccountStatus::Suspended;
        assert!(matches!(p.ensure_active(), Err(DeskError::AccountSuspended)));
    }

    #[test]
    fn suspended_admin_loses_admin_rights() {
        let mut p = profile();
        assert!(!p.is_admin());
        p.role = Role::Admin;
        assert!(p.is_admin());
        p.status = AccountStatus::Suspended;
        assert!(!p.is_admin());
    }

    #[test]
    fn indices_advance() {
        let mut p = profile();
        assert_eq!(p.next_investment_index().unwrap(), 0);
        assert_eq!(p.next_investment_index().unwrap(), 1);
        assert_eq!(p.next_withdrawal_index().unwrap(), 0);
        assert_eq!(p.investment_count, 2);
        assert_eq!(p.withdrawal_count, 1);
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("ada_99").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("Ada").is_err());
        assert!(validate_username("ada lovelace").is_err());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LEN)).is_ok());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LEN + 1)).is_err());
    }

    #[test]
    fn handle_claim_and_release() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut handle = UsernameHandle { owner: Pubkey::default(), bump: 255 };

        handle.claim(alice).unwrap();
        // re-claiming your own handle is a no-op
        handle.claim(alice).unwrap();
        assert!(matches!(handle.claim(bob), Err(DeskError::UsernameTaken)));

        assert!(matches!(handle.release(bob), Err(DeskError::UsernameHandleMismatch)));
        handle.release(alice).unwrap();
        handle.claim(bob).unwrap();
        assert_eq!(handle.owner, bob);
    }
}
