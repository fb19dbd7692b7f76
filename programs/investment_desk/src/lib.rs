/**
 * Investment Desk
 *
 * Plan-based investments with maturity tracking, reinvestment,
 * referral bonuses and treasury-backed withdrawals.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 *
 * License: BSL 1.1 (converts to MIT after Dec 2028)
 */

use anchor_lang::prelude::*;

pub mod state;
pub mod instructions;

use state::*;
use instructions::*;

declare_id!("G5p6Ksup6vZbBG44sxAvBg2ki56aXDBPTKoNu7Yb3118");

// =============================================================================
// SEEDS
// =============================================================================

pub const PLATFORM_SEED: &[u8] = b"platform";
pub const TREASURY_VAULT_SEED: &[u8] = b"treasury_vault";
pub const PLAN_SEED: &[u8] = b"plan";
pub const PAYMENT_METHOD_SEED: &[u8] = b"payment_method";
pub const PROFILE_SEED: &[u8] = b"profile";
pub const USERNAME_SEED: &[u8] = b"username";
pub const INVESTMENT_SEED: &[u8] = b"investment";
pub const WITHDRAWAL_SEED: &[u8] = b"withdrawal";

// =============================================================================
// CONSTANTS
// =============================================================================

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// One day in seconds (plan durations are whole days)
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Maximum referral bonus: 20% of the referred principal
pub const MAX_REFERRAL_BONUS_BPS: u16 = 2_000;

/// Longest plan term: 10 years
pub const MAX_DURATION_DAYS: u16 = 3_650;

pub const MAX_PLAN_NAME_LEN: usize = 32;
pub const MAX_PLAN_DESCRIPTION_LEN: usize = 128;
pub const MAX_FULL_NAME_LEN: usize = 64;
pub const MIN_USERNAME_LEN: usize = 3;
/// Also bounded by the 32-byte PDA seed limit
pub const MAX_USERNAME_LEN: usize = 32;
pub const MAX_COIN_NAME_LEN: usize = 32;
pub const MAX_NETWORK_LEN: usize = 32;
pub const MAX_DEPOSIT_WALLET_LEN: usize = 64;
/// "Name (Network)" label stored on deposit-funded investments
pub const MAX_PAYMENT_LABEL_LEN: usize = MAX_COIN_NAME_LEN + MAX_NETWORK_LEN + 3;
pub const MAX_PROOF_REFERENCE_LEN: usize = 200;

// =============================================================================
// PROGRAM
// =============================================================================

#[program]
pub mod investment_desk {
    use super::*;

    // =========================================================================
    // PLATFORM
    // =========================================================================

    /// Initialize the platform config, treasury vault and the first admin profile
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        full_name: String,
        username: String,
        referral_bonus_bps: u16,
    ) -> Result<()> {
        instructions::platform::init_handler(ctx, full_name, username, referral_bonus_bps)
    }

    /// Pause or resume new investments and withdrawal requests
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        instructions::platform::set_paused_handler(ctx, paused)
    }

    /// Move settlement tokens into the treasury vault
    pub fn fund_treasury(ctx: Context<FundTreasury>, amount: u64) -> Result<()> {
        instructions::platform::fund_treasury_handler(ctx, amount)
    }

    // =========================================================================
    // INVESTMENT PLANS
    // =========================================================================

    pub fn create_plan(ctx: Context<CreatePlan>, params: PlanParams) -> Result<()> {
        instructions::plans::create_handler(ctx, params)
    }

    /// Update plan terms. Existing investments keep their snapshot.
    pub fn update_plan(ctx: Context<UpdatePlan>, params: PlanParams) -> Result<()> {
        instructions::plans::update_handler(ctx, params)
    }

    pub fn set_plan_active(ctx: Context<UpdatePlan>, is_active: bool) -> Result<()> {
        instructions::plans::set_active_handler(ctx, is_active)
    }

    // =========================================================================
    // PAYMENT METHODS (accepted cryptocurrencies)
    // =========================================================================

    pub fn add_payment_method(
        ctx: Context<AddPaymentMethod>,
        params: PaymentMethodParams,
    ) -> Result<()> {
        instructions::payment_methods::add_handler(ctx, params)
    }

    pub fn update_payment_method(
        ctx: Context<UpdatePaymentMethod>,
        params: PaymentMethodParams,
    ) -> Result<()> {
        instructions::payment_methods::update_handler(ctx, params)
    }

    pub fn set_payment_method_enabled(
        ctx: Context<UpdatePaymentMethod>,
        enabled: bool,
    ) -> Result<()> {
        instructions::payment_methods::set_enabled_handler(ctx, enabled)
    }

    /// Remove a payment method and reclaim its rent
    pub fn remove_payment_method(ctx: Context<RemovePaymentMethod>) -> Result<()> {
        instructions::payment_methods::remove_handler(ctx)
    }

    // =========================================================================
    // PROFILES
    // =========================================================================

    /// Sign up: create a profile and claim a unique username
    pub fn register_profile(
        ctx: Context<RegisterProfile>,
        full_name: String,
        username: String,
        referrer: Option<Pubkey>,
    ) -> Result<()> {
        instructions::profiles::register_handler(ctx, full_name, username, referrer)
    }

    /// Change full name and/or username
    /// Pass the previous username handle when the username changes
    pub fn update_profile(
        ctx: Context<UpdateProfile>,
        full_name: String,
        username: String,
    ) -> Result<()> {
        instructions::profiles::update_handler(ctx, full_name, username)
    }

    // =========================================================================
    // ADMIN: USERS
    // =========================================================================

    /// Credit (positive) or debit (negative) a user's available balance
    pub fn update_user_balance(ctx: Context<ManageUser>, amount: i64) -> Result<()> {
        instructions::admin_users::update_balance_handler(ctx, amount)
    }

    pub fn set_user_status(ctx: Context<ManageUser>, status: AccountStatus) -> Result<()> {
        instructions::admin_users::set_status_handler(ctx, status)
    }

    pub fn set_user_role(ctx: Context<ManageUser>, role: Role) -> Result<()> {
        instructions::admin_users::set_role_handler(ctx, role)
    }

    // =========================================================================
    // INVESTMENTS
    // =========================================================================

    /// Invest from available balance
    /// Active immediately; balance debited in the same instruction
    pub fn invest_from_balance(ctx: Context<InvestFromBalance>, amount: u64) -> Result<()> {
        instructions::investments::from_balance_handler(ctx, amount)
    }

    /// Invest via external crypto deposit
    /// Pending until an admin reviews the proof of payment
    pub fn invest_via_deposit(
        ctx: Context<InvestViaDeposit>,
        amount: u64,
        proof_reference: String,
    ) -> Result<()> {
        instructions::investments::via_deposit_handler(ctx, amount, proof_reference)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================
    //
    //   Pending --approve--> Active --(now >= end)--> Matured --withdraw--> Withdrawn
    //   Pending --reject--> Denied
    //   Matured --reinvest--> Reinvested (+ new Active investment)
    //
    // =========================================================================

    pub fn approve_investment(ctx: Context<ApproveInvestment>) -> Result<()> {
        instructions::lifecycle::approve_handler(ctx)
    }

    pub fn reject_investment(ctx: Context<RejectInvestment>) -> Result<()> {
        instructions::lifecycle::reject_handler(ctx)
    }

    /// Permissionless crank: Active -> Matured once the term has elapsed
    pub fn mature_investment(ctx: Context<MatureInvestment>) -> Result<()> {
        instructions::lifecycle::mature_handler(ctx)
    }

    /// Credit principal + interest + bonus to available balance
    /// Returns the credited amount
    pub fn withdraw_investment(ctx: Context<WithdrawInvestment>) -> Result<u64> {
        instructions::lifecycle::withdraw_handler(ctx)
    }

    /// Roll principal + interest + bonus into a new investment on the same plan
    pub fn reinvest_investment(ctx: Context<ReinvestInvestment>) -> Result<()> {
        instructions::lifecycle::reinvest_handler(ctx)
    }

    /// Progress, estimated returns and payout as of now
    pub fn quote_investment(ctx: Context<QuoteInvestment>) -> Result<InvestmentQuote> {
        instructions::lifecycle::quote_handler(ctx)
    }

    /// Add (positive) or deduct (negative) bonus on an investment
    pub fn adjust_investment_bonus(ctx: Context<AdjustInvestmentBonus>, delta: i64) -> Result<()> {
        instructions::bonus::adjust_handler(ctx, delta)
    }

    // =========================================================================
    // REFERRALS
    // =========================================================================

    /// Move the whole referral bonus into available balance
    /// Returns the amount moved
    pub fn withdraw_referral_bonus(ctx: Context<WithdrawReferralBonus>) -> Result<u64> {
        instructions::referrals::withdraw_handler(ctx)
    }

    // =========================================================================
    // WITHDRAWALS
    // =========================================================================

    /// Request a payout of available balance to any settlement token account
    pub fn request_withdrawal(
        ctx: Context<RequestWithdrawal>,
        amount: u64,
        wallet_address: Pubkey,
    ) -> Result<()> {
        instructions::withdrawals::request_handler(ctx, amount, wallet_address)
    }

    /// Request a payout to the caller's associated token account
    pub fn create_withdrawal(ctx: Context<CreateWithdrawal>, amount: u64) -> Result<()> {
        instructions::withdrawals::create_handler(ctx, amount)
    }

    /// Pay out a pending withdrawal from the treasury vault
    pub fn approve_withdrawal(ctx: Context<ApproveWithdrawal>) -> Result<()> {
        instructions::withdrawals::approve_handler(ctx)
    }

    /// Reject a pending withdrawal and restore the user's balance
    pub fn reject_withdrawal(ctx: Context<RejectWithdrawal>) -> Result<()> {
        instructions::withdrawals::reject_handler(ctx)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[error_code]
pub enum DeskError {
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Account is suspended")]
    AccountSuspended,

    #[msg("Platform is paused")]
    PlatformPaused,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Amount is below the plan minimum")]
    AmountBelowPlanMinimum,

    #[msg("Amount is above the plan maximum")]
    AmountAbovePlanMaximum,

    #[msg("Insufficient available balance")]
    InsufficientBalance,

    #[msg("Invalid plan terms (min <= max, positive rate and duration)")]
    InvalidPlanTerms,

    #[msg("Plan is not accepting new investments")]
    PlanInactive,

    #[msg("Text field is empty or too long")]
    InvalidText,

    #[msg("Username must be 3-32 chars of a-z, 0-9 or _")]
    InvalidUsername,

    #[msg("Username is already taken")]
    UsernameTaken,

    #[msg("Previous username handle does not match the profile")]
    UsernameHandleMismatch,

    #[msg("Referrer profile missing or does not match")]
    ReferrerMismatch,

    #[msg("Cannot refer yourself")]
    SelfReferral,

    #[msg("Referral bonus out of range (max 2000 bps)")]
    InvalidReferralBonus,

    #[msg("Payment method is disabled")]
    PaymentMethodDisabled,

    #[msg("Proof of payment is required")]
    MissingProofOfPayment,

    #[msg("Investment is not pending review")]
    InvestmentNotPending,

    #[msg("Investment is not active")]
    InvestmentNotActive,

    #[msg("Investment term has not elapsed")]
    InvestmentNotYetMatured,

    #[msg("Investment is not matured or has already been withdrawn")]
    InvestmentNotMatured,

    #[msg("Investment is finalized")]
    InvestmentFinalized,

    #[msg("Bonus cannot go below zero")]
    BonusUnderflow,

    #[msg("No referral bonus to withdraw")]
    NoReferralBonus,

    #[msg("Withdrawal is not pending")]
    WithdrawalNotPending,

    #[msg("Destination does not match the withdrawal wallet")]
    InvalidDestination,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Admins cannot change their own role or status")]
    CannotModifySelf,
}

// =============================================================================
// EVENTS
// =============================================================================

#[event]
pub struct PlatformInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub treasury_vault: Pubkey,
    pub referral_bonus_bps: u16,
}

#[event]
pub struct PlatformPauseChanged {
    pub admin: Pubkey,
    pub is_paused: bool,
}

#[event]
pub struct TreasuryFunded {
    pub funder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PlanCreated {
    pub plan: Pubkey,
    pub id: u64,
    pub min_amount: u64,
    pub max_amount: u64,
    pub daily_rate_bps: u16,
    pub duration_days: u16,
}

#[event]
pub struct PlanUpdated {
    pub plan: Pubkey,
    pub id: u64,
    pub min_amount: u64,
    pub max_amount: u64,
    pub daily_rate_bps: u16,
    pub duration_days: u16,
    pub is_active: bool,
}

#[event]
pub struct PaymentMethodChanged {
    pub payment_method: Pubkey,
    pub id: u64,
    pub label: String,
    pub enabled: bool,
    pub removed: bool,
}

#[event]
pub struct ProfileRegistered {
    pub owner: Pubkey,
    pub username: String,
    pub referred_by: Option<Pubkey>,
}

#[event]
pub struct ProfileUpdated {
    pub owner: Pubkey,
    pub full_name: String,
    pub username: String,
}

#[event]
pub struct UserBalanceUpdated {
    pub admin: Pubkey,
    pub user: Pubkey,
    pub delta: i64,
    pub available_balance: u64,
}

#[event]
pub struct UserAccessChanged {
    pub admin: Pubkey,
    pub user: Pubkey,
    pub role: Role,
    pub status: AccountStatus,
}

#[event]
pub struct InvestmentCreated {
    pub investment: Pubkey,
    pub owner: Pubkey,
    pub plan: Pubkey,
    pub amount: u64,
    pub funding: FundingSource,
    pub status: InvestmentStatus,
    pub end_date: i64,
}

#[event]
pub struct InvestmentApproved {
    pub investment: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub start_date: i64,
    pub end_date: i64,
    pub referral_reward: u64,
}

#[event]
pub struct InvestmentRejected {
    pub investment: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct InvestmentMatured {
    pub investment: Pubkey,
    pub owner: Pubkey,
    pub matured_at: i64,
}

#[event]
pub struct InvestmentWithdrawn {
    pub investment: Pubkey,
    pub owner: Pubkey,
    pub payout: u64,
    pub available_balance: u64,
}

#[event]
pub struct InvestmentReinvested {
    pub investment: Pubkey,
    pub new_investment: Pubkey,
    pub owner: Pubkey,
    pub new_amount: u64,
}

#[event]
pub struct InvestmentBonusAdjusted {
    pub investment: Pubkey,
    pub admin: Pubkey,
    pub delta: i64,
    pub bonus: u64,
}

#[event]
pub struct ReferralBonusAccrued {
    pub referrer: Pubkey,
    pub referee: Pubkey,
    pub reward: u64,
}

#[event]
pub struct ReferralBonusWithdrawn {
    pub owner: Pubkey,
    pub amount: u64,
    pub available_balance: u64,
}

#[event]
pub struct WithdrawalRequested {
    pub withdrawal: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub wallet_address: Pubkey,
}

#[event]
pub struct WithdrawalApproved {
    pub withdrawal: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub wallet_address: Pubkey,
}

#[event]
pub struct WithdrawalRejected {
    pub withdrawal: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub available_balance: u64,
}
