/**
 * Account fixtures for instruction-level unit tests
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::state::{
    AccountStatus, FundingSource, Investment, InvestmentPlan, InvestmentStatus, PlatformConfig,
    Profile, Role,
};

pub(crate) fn config(referral_bonus_bps: u16) -> PlatformConfig {
    PlatformConfig {
        admin: Pubkey::new_unique(),
        mint: Pubkey::new_unique(),
        treasury_vault: Pubkey::new_unique(),
        referral_bonus_bps,
        plan_count: 0,
        payment_method_count: 0,
        total_active_principal: 0,
        total_paid_out: 0,
        is_paused: false,
        vault_bump: 255,
        bump: 254,
        reserved: [0; 64],
    }
}

pub(crate) fn profile(referred_by: Option<Pubkey>) -> Profile {
    Profile {
        owner: Pubkey::new_unique(),
        full_name: "Grace Hopper".to_string(),
        username: "grace".to_string(),
        role: Role::User,
        status: AccountStatus::Active,
        available_balance: 0,
        referral_bonus: 0,
        referred_by,
        referral_count: 0,
        investment_count: 0,
        withdrawal_count: 0,
        created_at: 0,
        bump: 255,
        reserved: [0; 32],
    }
}

/// 500..=5_000 at 2%/day for 10 days
pub(crate) fn plan() -> InvestmentPlan {
    InvestmentPlan {
        id: 0,
        name: "Starter".to_string(),
        description: String::new(),
        min_amount: 500,
        max_amount: 5_000,
        daily_rate_bps: 200,
        duration_days: 10,
        is_active: true,
        created_at: 0,
        bump: 255,
    }
}

/// Uninitialized record, as `init` hands it to a handler
pub(crate) fn blank_investment() -> Investment {
    Investment {
        index: 0,
        owner: Pubkey::default(),
        plan: Pubkey::default(),
        amount: 0,
        bonus: 0,
        status: InvestmentStatus::Pending,
        funding: FundingSource::Balance,
        daily_rate_bps: 0,
        duration_days: 0,
        created_at: 0,
        start_date: 0,
        end_date: 0,
        payment_method: String::new(),
        proof_reference: String::new(),
        reinvested_from: None,
        bump: 0,
        reserved: [0; 32],
    }
}

pub(crate) fn error_name(err: anchor_lang::error::Error) -> String {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_name,
        anchor_lang::error::Error::ProgramError(e) => e.program_error.to_string(),
    }
}
