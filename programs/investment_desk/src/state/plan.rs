/**
 * Investment Plan State
 *
 * A plan defines the amount bounds, daily rate and term of an investment.
 * Investments snapshot rate and term at creation, so plan edits only
 * affect new investments.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::validate_text,
    DeskError,
    MAX_DURATION_DAYS,
    MAX_PLAN_DESCRIPTION_LEN,
    MAX_PLAN_NAME_LEN,
};

/// Plan creation / update arguments
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct PlanParams {
    pub name: String,
    pub description: String,
    pub min_amount: u64,
    pub max_amount: u64,
    /// Daily interest rate in bps (200 = 2% per day)
    pub daily_rate_bps: u16,
    pub duration_days: u16,
}

impl PlanParams {
    pub fn validate(&self) -> core::result::Result<(), DeskError> {
        validate_text(&self.name, MAX_PLAN_NAME_LEN)?;
        if self.description.len() > MAX_PLAN_DESCRIPTION_LEN {
            return Err(DeskError::InvalidText);
        }
        if self.min_amount == 0
            || self.min_amount > self.max_amount
            || self.daily_rate_bps == 0
            || self.duration_days == 0
            || self.duration_days > MAX_DURATION_DAYS
        {
            return Err(DeskError::InvalidPlanTerms);
        }
        Ok(())
    }
}

/// Rate and term copied onto an investment when it is created
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanSnapshot {
    pub plan: Pubkey,
    pub daily_rate_bps: u16,
    pub duration_days: u16,
}

#[account]
pub struct InvestmentPlan {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub min_amount: u64,
    pub max_amount: u64,
    pub daily_rate_bps: u16,
    pub duration_days: u16,
    /// Inactive plans accept no new investments
    pub is_active: bool,
    pub created_at: i64,
    pub bump: u8,
}

impl InvestmentPlan {
    pub const LEN: usize = 8 + // discriminator
        8 +  // id
        4 + MAX_PLAN_NAME_LEN +
        4 + MAX_PLAN_DESCRIPTION_LEN +
        8 +  // min_amount
        8 +  // max_amount
        2 +  // daily_rate_bps
        2 +  // duration_days
        1 +  // is_active
        8 +  // created_at
        1;   // bump

    /// Validate and copy terms onto the plan
    pub fn apply(&mut self, params: PlanParams) -> core::result::Result<(), DeskError> {
        params.validate()?;
        self.name = params.name;
        self.description = params.description;
        self.min_amount = params.min_amount;
        self.max_amount = params.max_amount;
        self.daily_rate_bps = params.daily_rate_bps;
        self.duration_days = params.duration_days;
        Ok(())
    }

    /// Validate a requested investment amount against this plan
    ///
    /// `available_balance` is `Some` only for balance-funded investments.
    pub fn check_amount(
        &self,
        amount: u64,
        available_balance: Option<u64>,
    ) -> core::result::Result<(), DeskError> {
        if !self.is_active {
            return Err(DeskError::PlanInactive);
        }
        if amount == 0 {
            return Err(DeskError::InvalidAmount);
        }
        if amount < self.min_amount {
            return Err(DeskError::AmountBelowPlanMinimum);
        }
        if amount > self.max_amount {
            return Err(DeskError::AmountAbovePlanMaximum);
        }
        if let Some(balance) = available_balance {
            if amount > balance {
                return Err(DeskError::InsufficientBalance);
            }
        }
        Ok(())
    }

    pub fn snapshot(&self, plan: Pubkey) -> PlanSnapshot {
        PlanSnapshot {
            plan,
            daily_rate_bps: self.daily_rate_bps,
            duration_days: self.duration_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min_amount: u64, max_amount: u64) -> PlanParams {
        PlanParams {
            name: "Starter".to_string(),
            description: "Entry plan".to_string(),
            min_amount,
            max_amount,
            daily_rate_bps: 200,
            duration_days: 10,
        }
    }

    fn plan(min_amount: u64, max_amount: u64) -> InvestmentPlan {
        let mut plan = InvestmentPlan {
            id: 0,
            name: String::new(),
            description: String::new(),
            min_amount: 0,
            max_amount: 0,
            daily_rate_bps: 0,
            duration_days: 0,
            is_active: true,
            created_at: 0,
            bump: 255,
        };
        plan.apply(params(min_amount, max_amount)).unwrap();
        plan
    }

    #[test]
    fn rejects_amount_below_minimum() {
        let plan = plan(500, 5_000);
        assert!(matches!(
            plan.check_amount(100, None),
            Err(DeskError::AmountBelowPlanMinimum)
        ));
    }

    #[test]
    fn rejects_amount_above_maximum() {
        let plan = plan(500, 5_000);
        assert!(matches!(
            plan.check_amount(5_001, None),
            Err(DeskError::AmountAbovePlanMaximum)
        ));
    }

    #[test]
    fn rejects_zero_amount() {
        let plan = plan(500, 5_000);
        assert!(matches!(plan.check_amount(0, Some(1_000)), Err(DeskError::InvalidAmount)));
    }

    #[test]
    fn balance_path_rejects_amount_over_balance() {
        let plan = plan(100, 1_000);
        assert!(matches!(
            plan.check_amount(600, Some(500)),
            Err(DeskError::InsufficientBalance)
        ));
        assert!(plan.check_amount(500, Some(500)).is_ok());
        // deposit path has no balance check
        assert!(plan.check_amount(600, None).is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        let plan = plan(500, 5_000);
        assert!(plan.check_amount(500, None).is_ok());
        assert!(plan.check_amount(5_000, None).is_ok());
    }

    #[test]
    fn inactive_plan_refuses_investments() {
        let mut plan = plan(500, 5_000);
        plan.is_active = false;
        assert!(matches!(plan.check_amount(1_000, None), Err(DeskError::PlanInactive)));
    }

    #[test]
    fn invalid_terms_are_refused() {
        assert!(matches!(params(600, 500).validate(), Err(DeskError::InvalidPlanTerms)));
        assert!(matches!(params(0, 500).validate(), Err(DeskError::InvalidPlanTerms)));

        let mut zero_rate = params(100, 500);
        zero_rate.daily_rate_bps = 0;
        assert!(matches!(zero_rate.validate(), Err(DeskError::InvalidPlanTerms)));

        let mut zero_days = params(100, 500);
        zero_days.duration_days = 0;
        assert!(matches!(zero_days.validate(), Err(DeskError::InvalidPlanTerms)));

        let mut no_name = params(100, 500);
        no_name.name = "  ".to_string();
        assert!(matches!(no_name.validate(), Err(DeskError::InvalidText)));
    }

    #[test]
    fn failed_update_keeps_previous_terms() {
        let mut plan = plan(500, 5_000);
        assert!(plan.apply(params(900, 800)).is_err());
        assert_eq!(plan.min_amount, 500);
        assert_eq!(plan.max_amount, 5_000);
    }
}
