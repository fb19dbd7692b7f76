/**
 * Investment State
 *
 * Lifecycle:
 *   Pending  --approve-->  Active  --(now >= end)-->  Matured
 *   Pending  --reject-->   Denied                      (terminal)
 *   Matured  --withdraw--> Withdrawn                   (terminal)
 *   Matured  --reinvest--> Reinvested                  (terminal, new Active record)
 *
 * Returns are simple interest over the full term:
 *   amount + amount * daily_rate_bps / 10000 * duration_days
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::PlanSnapshot,
    DeskError,
    BPS_DENOMINATOR,
    MAX_PAYMENT_LABEL_LEN,
    MAX_PROOF_REFERENCE_LEN,
    SECONDS_PER_DAY,
};

// =============================================================================
// ENUMS
// =============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum InvestmentStatus {
    /// Deposit submitted, awaiting admin review
    Pending,
    /// Term running
    Active,
    /// Deposit refused by an admin
    Denied,
    /// Term elapsed, payout available
    Matured,
    /// Payout credited to available balance
    Withdrawn,
    /// Payout rolled into a new investment
    Reinvested,
}

impl InvestmentStatus {
    /// Statuses that display and pay returns
    pub fn earns_returns(&self) -> bool {
        matches!(self, Self::Active | Self::Matured)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Denied | Self::Withdrawn | Self::Reinvested)
    }
}

impl Default for InvestmentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum FundingSource {
    /// Paid from available balance
    Balance,
    /// Paid by external crypto deposit with proof
    Deposit,
    /// Rolled over from a matured investment
    Reinvestment,
}

// =============================================================================
// PURE CALCULATIONS
// =============================================================================

/// Percent of the term elapsed, floored and clamped to [0, 100]
pub fn progress(start: i64, end: i64, now: i64) -> u8 {
    if now >= end {
        return 100;
    }
    if now <= start {
        return 0;
    }
    // start < now < end here, so both spans are positive
    let elapsed = (now as i128 - start as i128) as u128;
    let term = (end as i128 - start as i128) as u128;
    (elapsed * 100 / term) as u8
}

/// Full-term value (principal + interest), 0 unless the status earns returns
/// Not pro-rated by elapsed time.
pub fn returns(
    amount: u64,
    daily_rate_bps: u16,
    duration_days: u16,
    status: InvestmentStatus,
) -> core::result::Result<u64, DeskError> {
    if !status.earns_returns() {
        return Ok(0);
    }
    let interest = (amount as u128)
        .checked_mul(daily_rate_bps as u128)
        .and_then(|v| v.checked_mul(duration_days as u128))
        .ok_or(DeskError::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    let total = (amount as u128)
        .checked_add(interest)
        .ok_or(DeskError::MathOverflow)?;
    u64::try_from(total).map_err(|_| DeskError::MathOverflow)
}

/// Term end for a start time
pub fn term_end(start: i64, duration_days: u16) -> core::result::Result<i64, DeskError> {
    (duration_days as i64)
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|secs| start.checked_add(secs))
        .ok_or(DeskError::MathOverflow)
}

/// Read-only view returned by `quote_investment`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct InvestmentQuote {
    pub status: InvestmentStatus,
    pub progress: u8,
    pub estimated_returns: u64,
    pub payout: u64,
    /// Term elapsed (withdraw / reinvest would succeed)
    pub matured: bool,
}

// =============================================================================
// INVESTMENT ACCOUNT
// =============================================================================

#[account]
pub struct Investment {
    /// Position in the owner's investment sequence (PDA seed)
    pub index: u64,

    pub owner: Pubkey,

    pub plan: Pubkey,

    /// Principal
    pub amount: u64,

    /// Admin/referral additive adjustment to the payout
    pub bonus: u64,

    pub status: InvestmentStatus,

    pub funding: FundingSource,

    /// Plan rate at creation
    pub daily_rate_bps: u16,

    /// Plan term at creation
    pub duration_days: u16,

    pub created_at: i64,

    pub start_date: i64,

    pub end_date: i64,

    /// "Coin (Network)" for deposit-funded investments
    pub payment_method: String,

    /// Proof-of-payment reference (tx hash or artifact URI)
    pub proof_reference: String,

    /// Matured investment this one was rolled over from
    pub reinvested_from: Option<Pubkey>,

    /// Bump seed for PDA
    pub bump: u8,

    /// Reserved for future use
    pub reserved: [u8; 32],
}

impl Investment {
    pub const LEN: usize = 8 + // discriminator
        8 +  // index
        32 + // owner
        32 + // plan
        8 +  // amount
        8 +  // bonus
        1 +  // status
        1 +  // funding
        2 +  // daily_rate_bps
        2 +  // duration_days
        8 +  // created_at
        8 +  // start_date
        8 +  // end_date
        4 + MAX_PAYMENT_LABEL_LEN +
        4 + MAX_PROOF_REFERENCE_LEN +
        1 + 32 + // reinvested_from
        1 +  // bump
        32;  // reserved

    /// Fill a freshly created record
    /// Balance and reinvestment records start Active, deposits start Pending.
    pub fn open(
        &mut self,
        index: u64,
        owner: Pubkey,
        terms: PlanSnapshot,
        amount: u64,
        funding: FundingSource,
        now: i64,
        bump: u8,
    ) -> core::result::Result<(), DeskError> {
        self.index = index;
        self.owner = owner;
        self.plan = terms.plan;
        self.amount = amount;
        self.bonus = 0;
        self.status = match funding {
            FundingSource::Deposit => InvestmentStatus::Pending,
            FundingSource::Balance | FundingSource::Reinvestment => InvestmentStatus::Active,
        };
        self.funding = funding;
        self.daily_rate_bps = terms.daily_rate_bps;
        self.duration_days = terms.duration_days;
        self.created_at = now;
        self.payment_method = String::new();
        self.proof_reference = String::new();
        self.reinvested_from = None;
        self.bump = bump;
        self.schedule(now)
    }

    /// Attach deposit details to a Pending record
    pub fn attach_deposit(
        &mut self,
        payment_method: String,
        proof_reference: String,
    ) -> core::result::Result<(), DeskError> {
        if proof_reference.trim().is_empty() {
            return Err(DeskError::MissingProofOfPayment);
        }
        if proof_reference.len() > MAX_PROOF_REFERENCE_LEN
            || payment_method.len() > MAX_PAYMENT_LABEL_LEN
        {
            return Err(DeskError::InvalidText);
        }
        self.payment_method = payment_method;
        self.proof_reference = proof_reference;
        Ok(())
    }

    /// Start the term at `start`
    pub fn schedule(&mut self, start: i64) -> core::result::Result<(), DeskError> {
        self.end_date = term_end(start, self.duration_days)?;
        self.start_date = start;
        Ok(())
    }

    pub fn terms(&self) -> PlanSnapshot {
        PlanSnapshot {
            plan: self.plan,
            daily_rate_bps: self.daily_rate_bps,
            duration_days: self.duration_days,
        }
    }

    pub fn progress(&self, now: i64) -> u8 {
        progress(self.start_date, self.end_date, now)
    }

    pub fn estimated_returns(&self) -> core::result::Result<u64, DeskError> {
        returns(self.amount, self.daily_rate_bps, self.duration_days, self.status)
    }

    /// Returns plus bonus: what a withdrawal credits or a reinvestment rolls over
    pub fn payout(&self) -> core::result::Result<u64, DeskError> {
        self.estimated_returns()?
            .checked_add(self.bonus)
            .ok_or(DeskError::MathOverflow)
    }

    pub fn term_elapsed(&self, now: i64) -> bool {
        now >= self.end_date
    }

    // ─────────────────────────────────────────────────────────────────────────
    // TRANSITIONS
    // ─────────────────────────────────────────────────────────────────────────

    /// Pending -> Active; the term restarts at approval time
    pub fn approve(&mut self, now: i64) -> core::result::Result<(), DeskError> {
        if self.status != InvestmentStatus::Pending {
            return Err(DeskError::InvestmentNotPending);
        }
        self.schedule(now)?;
        self.status = InvestmentStatus::Active;
        Ok(())
    }

    /// Pending -> Denied
    pub fn reject(&mut self) -> core::result::Result<(), DeskError> {
        if self.status != InvestmentStatus::Pending {
            return Err(DeskError::InvestmentNotPending);
        }
        self.status = InvestmentStatus::Denied;
        Ok(())
    }

    /// Active -> Matured once the term has elapsed
    ///
    /// The crank reports `InvestmentNotActive` for any other status, while
    /// the owner's exits (`settle_withdrawal`, `settle_reinvestment`) report
    /// `InvestmentNotMatured` for the same records.
    pub fn mature(&mut self, now: i64) -> core::result::Result<(), DeskError> {
        if self.status != InvestmentStatus::Active {
            return Err(DeskError::InvestmentNotActive);
        }
        if !self.term_elapsed(now) {
            return Err(DeskError::InvestmentNotYetMatured);
        }
        self.status = InvestmentStatus::Matured;
        Ok(())
    }

    /// Promote Active past end_date to Matured; true if promoted
    pub fn refresh_maturity(&mut self, now: i64) -> bool {
        if self.status == InvestmentStatus::Active && self.term_elapsed(now) {
            self.status = InvestmentStatus::Matured;
            return true;
        }
        false
    }

    /// Matured -> `closing`, returning the payout
    fn settle(
        &mut self,
        now: i64,
        closing: InvestmentStatus,
    ) -> core::result::Result<u64, DeskError> {
        self.refresh_maturity(now);
        if self.status != InvestmentStatus::Matured {
            return Err(DeskError::InvestmentNotMatured);
        }
        // payout depends on status, compute before closing
        let payout = self.payout()?;
        self.status = closing;
        Ok(payout)
    }

    /// Matured -> Withdrawn
    pub fn settle_withdrawal(&mut self, now: i64) -> core::result::Result<u64, DeskError> {
        self.settle(now, InvestmentStatus::Withdrawn)
    }

    /// Matured -> Reinvested; the payout becomes the new principal
    pub fn settle_reinvestment(&mut self, now: i64) -> core::result::Result<u64, DeskError> {
        self.settle(now, InvestmentStatus::Reinvested)
    }

    /// Apply a signed bonus delta
    pub fn adjust_bonus(&mut self, delta: i64) -> core::result::Result<u64, DeskError> {
        if self.status.is_terminal() {
            return Err(DeskError::InvestmentFinalized);
        }
        let bonus = if delta >= 0 {
            self.bonus
                .checked_add(delta.unsigned_abs())
                .ok_or(DeskError::MathOverflow)?
        } else {
            self.bonus
                .checked_sub(delta.unsigned_abs())
                .ok_or(DeskError::BonusUnderflow)?
        };
        self.bonus = bonus;
        Ok(bonus)
    }

    pub fn quote(&self, now: i64) -> core::result::Result<InvestmentQuote, DeskError> {
        let matured = self.status == InvestmentStatus::Matured
            || (self.status == InvestmentStatus::Active && self.term_elapsed(now));
        let estimated_returns = self.estimated_returns()?;
        let payout = if self.status.earns_returns() { self.payout()? } else { 0 };
        Ok(InvestmentQuote {
            status: self.status,
            progress: self.progress(now),
            estimated_returns,
            payout,
            matured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = SECONDS_PER_DAY;
    const T0: i64 = 1_700_000_000;

    fn terms(daily_rate_bps: u16, duration_days: u16) -> PlanSnapshot {
        PlanSnapshot {
            plan: Pubkey::new_unique(),
            daily_rate_bps,
            duration_days,
        }
    }

    fn blank() -> Investment {
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

    fn opened(amount: u64, funding: FundingSource) -> Investment {
        let mut inv = blank();
        inv.open(0, Pubkey::new_unique(), terms(200, 10), amount, funding, T0, 255)
            .unwrap();
        inv
    }

    // ─────────────────────────────────────────────────────────────────────
    // progress
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn progress_endpoints() {
        let end = T0 + 10 * DAY;
        assert_eq!(progress(T0, end, T0), 0);
        assert_eq!(progress(T0, end, end), 100);
        assert_eq!(progress(T0, end, T0 - 1), 0);
        assert_eq!(progress(T0, end, end + DAY), 100);
    }

    #[test]
    fn progress_is_floored() {
        let end = T0 + 3;
        assert_eq!(progress(T0, end, T0 + 1), 33);
        assert_eq!(progress(T0, end, T0 + 2), 66);
        assert_eq!(progress(T0, T0 + 10 * DAY, T0 + 5 * DAY), 50);
    }

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let end = T0 + 7 * DAY + 13;
        let mut last = 0;
        let mut now = T0 - DAY;
        while now <= end + DAY {
            let p = progress(T0, end, now);
            assert!(p <= 100);
            assert!(p >= last);
            last = p;
            now += 3_607;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn progress_handles_degenerate_term() {
        assert_eq!(progress(T0, T0, T0), 100);
        assert_eq!(progress(T0, T0, T0 - 1), 0);
        assert_eq!(progress(i64::MIN, i64::MAX, 0), 50);
    }

    // ─────────────────────────────────────────────────────────────────────
    // returns
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn returns_full_term_simple_interest() {
        // 1000 at 2%/day for 10 days
        assert_eq!(returns(1_000, 200, 10, InvestmentStatus::Active).unwrap(), 1_200);
        assert_eq!(returns(1_000, 200, 10, InvestmentStatus::Matured).unwrap(), 1_200);
        // 0.5%/day for 30 days on 100_000 base units
        assert_eq!(returns(100_000, 50, 30, InvestmentStatus::Active).unwrap(), 115_000);
    }

    #[test]
    fn returns_zero_for_non_earning_statuses() {
        for status in [
            InvestmentStatus::Pending,
            InvestmentStatus::Denied,
            InvestmentStatus::Withdrawn,
            InvestmentStatus::Reinvested,
        ] {
            assert_eq!(returns(1_000, 200, 10, status).unwrap(), 0);
        }
    }

    #[test]
    fn returns_overflow_is_reported() {
        assert!(matches!(
            returns(u64::MAX, 10_000, 10, InvestmentStatus::Active),
            Err(DeskError::MathOverflow)
        ));
    }

    #[test]
    fn returns_ignore_elapsed_time() {
        let inv = opened(1_000, FundingSource::Balance);
        assert_eq!(inv.quote(T0).unwrap().estimated_returns, 1_200);
        assert_eq!(inv.quote(T0 + 3 * DAY).unwrap().estimated_returns, 1_200);
    }

    // ─────────────────────────────────────────────────────────────────────
    // creation
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn balance_investment_starts_active_with_full_term() {
        let inv = opened(1_000, FundingSource::Balance);
        assert_eq!(inv.status, InvestmentStatus::Active);
        assert_eq!(inv.start_date, T0);
        assert_eq!(inv.end_date, T0 + 10 * DAY);
        assert_eq!(inv.bonus, 0);
    }

    #[test]
    fn deposit_investment_starts_pending_and_needs_proof() {
        let mut inv = opened(1_000, FundingSource::Deposit);
        assert_eq!(inv.status, InvestmentStatus::Pending);
        assert!(matches!(
            inv.attach_deposit("USDT (TRC20)".to_string(), " ".to_string()),
            Err(DeskError::MissingProofOfPayment)
        ));
        assert!(matches!(
            inv.attach_deposit("USDT (TRC20)".to_string(), "x".repeat(MAX_PROOF_REFERENCE_LEN + 1)),
            Err(DeskError::InvalidText)
        ));
        inv.attach_deposit("USDT (TRC20)".to_string(), "ipfs://proof".to_string())
            .unwrap();
        assert_eq!(inv.proof_reference, "ipfs://proof");
    }

    // ─────────────────────────────────────────────────────────────────────
    // transitions
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn approval_activates_and_restarts_term() {
        let mut inv = opened(1_000, FundingSource::Deposit);
        let approved_at = T0 + 2 * DAY;
        inv.approve(approved_at).unwrap();
        assert_eq!(inv.status, InvestmentStatus::Active);
        assert_eq!(inv.start_date, approved_at);
        assert_eq!(inv.end_date, approved_at + 10 * DAY);
        assert!(matches!(inv.approve(approved_at), Err(DeskError::InvestmentNotPending)));
    }

    #[test]
    fn rejection_is_terminal() {
        let mut inv = opened(1_000, FundingSource::Deposit);
        inv.reject().unwrap();
        assert_eq!(inv.status, InvestmentStatus::Denied);
        assert!(matches!(inv.approve(T0), Err(DeskError::InvestmentNotPending)));
        assert!(matches!(inv.reject(), Err(DeskError::InvestmentNotPending)));
        assert!(matches!(inv.adjust_bonus(10), Err(DeskError::InvestmentFinalized)));
        assert_eq!(inv.estimated_returns().unwrap(), 0);
    }

    #[test]
    fn crank_matures_only_after_term() {
        let mut inv = opened(1_000, FundingSource::Balance);
        assert!(matches!(
            inv.mature(T0 + 10 * DAY - 1),
            Err(DeskError::InvestmentNotYetMatured)
        ));
        inv.mature(T0 + 10 * DAY).unwrap();
        assert_eq!(inv.status, InvestmentStatus::Matured);
        assert!(matches!(inv.mature(T0 + 11 * DAY), Err(DeskError::InvestmentNotActive)));
    }

    #[test]
    fn crank_and_exit_report_pending_differently() {
        let mut inv = opened(1_000, FundingSource::Deposit);
        assert!(matches!(inv.mature(T0 + 20 * DAY), Err(DeskError::InvestmentNotActive)));
        assert!(matches!(
            inv.settle_withdrawal(T0 + 20 * DAY),
            Err(DeskError::InvestmentNotMatured)
        ));
        assert_eq!(inv.status, InvestmentStatus::Pending);
    }

    #[test]
    fn withdraw_before_maturity_is_refused() {
        let mut inv = opened(1_000, FundingSource::Balance);
        let err = inv.settle_withdrawal(T0 + DAY).unwrap_err();
        assert!(matches!(err, DeskError::InvestmentNotMatured));
        assert_eq!(
            err.to_string(),
            "Investment is not matured or has already been withdrawn"
        );
        assert_eq!(inv.status, InvestmentStatus::Active);
    }

    #[test]
    fn withdraw_pays_returns_plus_bonus_once() {
        let mut inv = opened(1_000, FundingSource::Balance);
        inv.adjust_bonus(50).unwrap();
        inv.mature(T0 + 10 * DAY).unwrap();
        assert_eq!(inv.settle_withdrawal(T0 + 10 * DAY).unwrap(), 1_250);
        assert_eq!(inv.status, InvestmentStatus::Withdrawn);
        assert!(matches!(
            inv.settle_withdrawal(T0 + 11 * DAY),
            Err(DeskError::InvestmentNotMatured)
        ));
    }

    #[test]
    fn withdraw_promotes_elapsed_active_investment() {
        let mut inv = opened(1_000, FundingSource::Balance);
        assert_eq!(inv.settle_withdrawal(T0 + 10 * DAY).unwrap(), 1_200);
        assert_eq!(inv.status, InvestmentStatus::Withdrawn);
    }

    #[test]
    fn pending_investment_cannot_be_withdrawn_even_after_term() {
        let mut inv = opened(1_000, FundingSource::Deposit);
        assert!(matches!(
            inv.settle_withdrawal(T0 + 20 * DAY),
            Err(DeskError::InvestmentNotMatured)
        ));
        assert_eq!(inv.status, InvestmentStatus::Pending);
    }

    #[test]
    fn reinvest_rolls_returns_and_bonus_into_same_plan() {
        let mut inv = opened(1_000, FundingSource::Balance);
        inv.adjust_bonus(50).unwrap();
        inv.mature(T0 + 10 * DAY).unwrap();
        assert_eq!(inv.estimated_returns().unwrap(), 1_200);

        let reinvested_at = T0 + 12 * DAY;
        let new_amount = inv.settle_reinvestment(reinvested_at).unwrap();
        assert_eq!(new_amount, 1_250);
        assert_eq!(inv.status, InvestmentStatus::Reinvested);

        let mut next = blank();
        next.open(1, inv.owner, inv.terms(), new_amount, FundingSource::Reinvestment, reinvested_at, 254)
            .unwrap();
        assert_eq!(next.plan, inv.plan);
        assert_eq!(next.amount, 1_250);
        assert_eq!(next.status, InvestmentStatus::Active);
        assert_eq!(next.end_date, reinvested_at + 10 * DAY);

        assert!(matches!(
            inv.settle_reinvestment(reinvested_at),
            Err(DeskError::InvestmentNotMatured)
        ));
    }

    #[test]
    fn bonus_adjustments() {
        let mut inv = opened(1_000, FundingSource::Balance);
        assert_eq!(inv.adjust_bonus(100).unwrap(), 100);
        assert_eq!(inv.adjust_bonus(-40).unwrap(), 60);
        assert!(matches!(inv.adjust_bonus(-61), Err(DeskError::BonusUnderflow)));
        assert_eq!(inv.bonus, 60);
        // dates and status untouched
        assert_eq!(inv.status, InvestmentStatus::Active);
        assert_eq!(inv.end_date, T0 + 10 * DAY);
        assert_eq!(inv.payout().unwrap(), 1_260);
    }

    #[test]
    fn quote_reports_lazy_maturity() {
        let inv = opened(1_000, FundingSource::Balance);
        let q = inv.quote(T0 + 5 * DAY).unwrap();
        assert_eq!(q.progress, 50);
        assert!(!q.matured);
        assert_eq!(q.payout, 1_200);

        let q = inv.quote(T0 + 10 * DAY).unwrap();
        assert_eq!(q.progress, 100);
        assert!(q.matured);
        assert_eq!(q.status, InvestmentStatus::Active);

        let pending = opened(1_000, FundingSource::Deposit);
        let q = pending.quote(T0 + 10 * DAY).unwrap();
        assert!(!q.matured);
        assert_eq!(q.estimated_returns, 0);
        assert_eq!(q.payout, 0);
    }

    #[test]
    fn term_end_overflow_is_reported() {
        assert!(matches!(term_end(i64::MAX - 10, 1), Err(DeskError::MathOverflow)));
        assert_eq!(term_end(0, 2).unwrap(), 2 * DAY);
    }
}
