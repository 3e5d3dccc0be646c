//! Financial calculators
//!
//! Pure, deterministic functions over their explicit inputs. They never read
//! conversation context directly, which keeps each one trivially testable.
//! Degenerate inputs (negative income, a retirement age at or below the
//! current age) propagate arithmetically rather than erroring; the router
//! decides what to ask for before calling in.

use crate::models::{BudgetPlan, DebtPayoffPlan, EmergencyFundPlan, RetirementPlan};

/// Assumed nominal annual market return for projections.
pub const ANNUAL_RETURN: f64 = 0.07;

/// Default share of income contributed toward retirement.
pub const DEFAULT_CONTRIBUTION_RATE: f64 = 0.15;

/// 4%-rule safe annual withdrawal rate.
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Default emergency fund horizon, in months of expenses.
pub const DEFAULT_EMERGENCY_MONTHS: f64 = 6.0;

/// Share of income assumed available for emergency savings each month.
pub const EMERGENCY_SAVINGS_RATE: f64 = 0.10;

/// Split a monthly income using the 50/30/20 rule.
///
/// The three amounts always sum back to the income. Percentages are returned
/// alongside the amounts for display.
pub fn calculate_budget(income: f64) -> BudgetPlan {
    BudgetPlan {
        income,
        needs: income * 0.5,
        wants: income * 0.3,
        savings: income * 0.2,
        needs_percent: 50.0,
        wants_percent: 30.0,
        savings_percent: 20.0,
    }
}

/// Project a retirement fund at a fixed 7% annual return.
///
/// Existing savings compound annually over the horizon; the monthly
/// contribution (income × contribution rate) grows as an ordinary annuity at
/// the monthly rate. The projected fund supports a 4%-rule withdrawal,
/// reported as a monthly figure. A horizon of zero or less is not rejected
/// and produces a degenerate projection.
pub fn calculate_retirement_plan(
    current_age: u32,
    retirement_age: u32,
    current_savings: f64,
    monthly_income: f64,
    contribution_rate: f64,
) -> RetirementPlan {
    let years_to_retirement = retirement_age as f64 - current_age as f64;
    let monthly_contribution = monthly_income * contribution_rate;
    let monthly_return = ANNUAL_RETURN / 12.0;
    let months = years_to_retirement * 12.0;

    let savings_future_value =
        current_savings * (1.0 + ANNUAL_RETURN).powf(years_to_retirement);

    // Annuity future value; the zero-rate limit is contribution × months.
    let contributions_future_value = if monthly_return == 0.0 {
        monthly_contribution * months
    } else {
        monthly_contribution * (((1.0 + monthly_return).powf(months) - 1.0) / monthly_return)
    };

    let projected_fund = savings_future_value + contributions_future_value;

    RetirementPlan {
        years_to_retirement,
        monthly_contribution,
        projected_fund,
        monthly_income_at_retirement: projected_fund * SAFE_WITHDRAWAL_RATE / 12.0,
    }
}

/// Size an emergency fund and the pace toward it.
///
/// Target is `monthly_expenses × target_months`; the assumed monthly
/// set-aside is a fixed 10% of income regardless of actual surplus. With zero
/// income and a remaining gap, `months_to_goal` is `f64::INFINITY`.
pub fn calculate_emergency_fund(
    monthly_expenses: f64,
    current_savings: f64,
    monthly_income: f64,
    target_months: f64,
) -> EmergencyFundPlan {
    let target_amount = monthly_expenses * target_months;
    let remaining_amount = (target_amount - current_savings).max(0.0);
    let monthly_set_aside = monthly_income * EMERGENCY_SAVINGS_RATE;

    let months_to_goal = if remaining_amount > 0.0 {
        (remaining_amount / monthly_set_aside).ceil()
    } else {
        0.0
    };

    EmergencyFundPlan {
        target_amount,
        remaining_amount,
        monthly_set_aside,
        months_to_goal,
    }
}

/// Amortize a debt to zero with a fixed monthly payment.
///
/// When the payment does not exceed the interest accruing each month the
/// debt never pays off; all result fields are the `f64::INFINITY` sentinel
/// and [`DebtPayoffPlan::never_pays_off`] reports true. Otherwise the months
/// to payoff come from the standard closed-form amortization inversion.
pub fn calculate_debt_payoff(
    balance: f64,
    annual_interest_rate: f64,
    monthly_payment: f64,
) -> DebtPayoffPlan {
    let monthly_rate = annual_interest_rate / 12.0;

    if monthly_payment <= balance * monthly_rate {
        return DebtPayoffPlan {
            months_to_payoff: f64::INFINITY,
            total_paid: f64::INFINITY,
            total_interest: f64::INFINITY,
        };
    }

    let months_to_payoff = if monthly_rate == 0.0 {
        (balance / monthly_payment).ceil()
    } else {
        (-(1.0 - balance * monthly_rate / monthly_payment).ln() / (1.0 + monthly_rate).ln())
            .ceil()
    };

    let total_paid = months_to_payoff * monthly_payment;

    DebtPayoffPlan {
        months_to_payoff,
        total_paid,
        total_interest: total_paid - balance,
    }
}
