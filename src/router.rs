//! Intent router
//!
//! The single meaningful entry point of the core:
//! `respond(text, context) -> (response, updated_context)`.
//!
//! Each turn runs two passes. A fact-extraction pass pulls income and age out
//! of the message into the user data. A dispatch pass then classifies the
//! message (see [`crate::intent`] for the ordered cascade) and either
//! computes advice from the facts on hand or asks a clarifying question
//! naming exactly what is missing. The router has no failure mode — every
//! input produces some response string.

use tracing::debug;

use crate::calculators::{
    calculate_budget, calculate_debt_payoff, calculate_emergency_fund, calculate_retirement_plan,
    DEFAULT_CONTRIBUTION_RATE, DEFAULT_EMERGENCY_MONTHS,
};
use crate::extract::{extract_age_from_text, extract_income_amount, extract_number_from_text};
use crate::format::{format_currency, format_percent};
use crate::intent::{detect_intent, Intent, INCOME_KEYWORDS};
use crate::models::{ConversationContext, ConversationState};

/// Assumed credit card APR when the user does not supply a rate.
pub const ASSUMED_CARD_APR: f64 = 0.18;

/// Minimum payment heuristic: 2% of the balance.
pub const MINIMUM_PAYMENT_RATE: f64 = 0.02;

/// Produce a response to one user message.
///
/// The context is taken by reference and returned updated, so callers own
/// all state and the core stays pure per session.
pub fn respond(text: &str, context: &ConversationContext) -> (String, ConversationContext) {
    let mut ctx = context.clone();
    let lowered = text.to_lowercase();

    // Fact extraction happens before dispatch, so a message that states a
    // fact and asks a question in the same breath gets a computed answer.
    let age_found = extract_age_from_text(&lowered);
    if let Some(age) = age_found {
        ctx.user_data.age = Some(age);
    }

    let mut income_found = None;
    if INCOME_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        if let Some(amount) = extract_income_amount(text) {
            ctx.user_data.income = Some(amount);
            ctx.conversation_state = ConversationState::GatheringInfo;
            income_found = Some(amount);
        }
    }

    let intent = detect_intent(&lowered);
    debug!(intent = ?intent, "routed user message");

    let reply = match intent {
        Intent::Greeting => greeting_reply(),
        Intent::Budget => budget_reply(&mut ctx),
        Intent::Retirement => retirement_reply(&mut ctx),
        Intent::EmergencyFund => emergency_fund_reply(&ctx),
        Intent::Debt => debt_reply(text),
        Intent::Investment => investment_reply(&ctx),
        Intent::StartOver => start_over_reply(),
        Intent::Unknown => fallback_reply(income_found, age_found),
    };

    (reply, ctx)
}

fn greeting_reply() -> String {
    "Hi there! I'm your personal finance assistant. I can help you with:\n\n\
     • Budgeting (the 50/30/20 rule)\n\
     • Retirement planning\n\
     • Building an emergency fund\n\
     • Paying off debt\n\
     • Getting started with investing\n\n\
     Tell me a bit about yourself — your monthly income and your age are a \
     good start."
        .to_string()
}

fn budget_reply(ctx: &mut ConversationContext) -> String {
    let Some(income) = ctx.user_data.income else {
        ctx.last_topic = Some("budget".to_string());
        return "Happy to help you build a budget. What's your monthly income? \
                You can say something like \"I make $4,000 per month\"."
            .to_string();
    };

    let plan = calculate_budget(income);
    format!(
        "Here's a 50/30/20 budget for your monthly income of {}:\n\n\
         • Needs ({}): {} — housing, groceries, utilities, insurance\n\
         • Wants ({}): {} — dining out, entertainment, hobbies\n\
         • Savings ({}): {} — emergency fund, retirement, goals\n\n\
         Keeping needs at half your income leaves room to save without \
         feeling squeezed.",
        format_currency(plan.income),
        format_percent(plan.needs_percent),
        format_currency(plan.needs),
        format_percent(plan.wants_percent),
        format_currency(plan.wants),
        format_percent(plan.savings_percent),
        format_currency(plan.savings),
    )
}

fn retirement_reply(ctx: &mut ConversationContext) -> String {
    let data = &ctx.user_data;
    let (Some(age), Some(income)) = (data.age, data.income) else {
        let mut missing = Vec::new();
        if data.age.is_none() {
            missing.push("your age");
        }
        if data.income.is_none() {
            missing.push("your monthly income");
        }
        ctx.last_topic = Some("retirement".to_string());
        return format!(
            "To project your retirement I still need {}. For example: \
             \"I'm 35 and make $5,500 per month\".",
            missing.join(" and ")
        );
    };

    let retirement_age = data.retirement_age_or_default();
    let plan = calculate_retirement_plan(
        age,
        retirement_age,
        data.savings_or_default(),
        income,
        DEFAULT_CONTRIBUTION_RATE,
    );

    format!(
        "Here's your retirement outlook:\n\n\
         • Years until retirement (at {}): {:.0}\n\
         • Suggested monthly contribution (15% of income): {}\n\
         • Projected fund at a 7% annual return: {}\n\
         • Monthly income that supports (4% rule): {}\n\n\
         Consistency beats timing — automate the contribution and let \
         compounding do the work.",
        retirement_age,
        plan.years_to_retirement,
        format_currency(plan.monthly_contribution),
        format_currency(plan.projected_fund),
        format_currency(plan.monthly_income_at_retirement),
    )
}

fn emergency_fund_reply(ctx: &ConversationContext) -> String {
    let data = &ctx.user_data;
    let (Some(income), Some(expenses)) = (data.income, data.expenses_or_default()) else {
        return "An emergency fund should cover about six months of expenses. \
                What's your monthly income, so I can size it for you?"
            .to_string();
    };

    let plan = calculate_emergency_fund(
        expenses,
        data.savings_or_default(),
        income,
        DEFAULT_EMERGENCY_MONTHS,
    );

    let mut reply = format!(
        "Let's build your emergency fund (six months of expenses):\n\n\
         • Target amount: {}\n\
         • Still to save: {}\n\
         • Monthly set-aside (10% of income): {}\n",
        format_currency(plan.target_amount),
        format_currency(plan.remaining_amount),
        format_currency(plan.monthly_set_aside),
    );

    if plan.months_to_goal == 0.0 {
        reply.push_str("\nYour savings already cover the target — well done. Keep it somewhere liquid, like a high-yield savings account.");
    } else if plan.months_to_goal.is_finite() {
        reply.push_str(&format!(
            "• Months to reach the goal: {:.0}\n\n\
             Park it in a high-yield savings account so it stays liquid.",
            plan.months_to_goal
        ));
    } else {
        reply.push_str(
            "\nWith no income coming in there's no pace to project — let's revisit once money is flowing again.",
        );
    }

    reply
}

fn debt_reply(text: &str) -> String {
    let Some(balance) = extract_number_from_text(text) else {
        return "How much debt are you carrying? Tell me the balance, for \
                example \"I have $5,000 in credit card debt\"."
            .to_string();
    };

    let minimum_payment = balance * MINIMUM_PAYMENT_RATE;
    let aggressive_payment = minimum_payment * 2.0;
    let minimum = calculate_debt_payoff(balance, ASSUMED_CARD_APR, minimum_payment);
    let aggressive = calculate_debt_payoff(balance, ASSUMED_CARD_APR, aggressive_payment);

    if minimum.never_pays_off() {
        return format!(
            "At {} of debt (assuming 18% APR), a {} minimum payment never \
             outruns the interest. Paying {} a month clears it in {:.0} \
             months with {} in interest.",
            format_currency(balance),
            format_currency(minimum_payment),
            format_currency(aggressive_payment),
            aggressive.months_to_payoff,
            format_currency(aggressive.total_interest),
        );
    }

    let interest_saved = minimum.total_interest - aggressive.total_interest;
    format!(
        "Here's a payoff plan for your {} of debt (assuming 18% APR):\n\n\
         • Minimum payments ({}/month): debt-free in {:.0} months, {} in interest\n\
         • Doubling up ({}/month): debt-free in {:.0} months, {} in interest\n\n\
         Doubling the payment saves you {} in interest. If you carry several \
         balances, the avalanche method (highest rate first) saves the most; \
         the snowball method (smallest balance first) builds momentum.",
        format_currency(balance),
        format_currency(minimum_payment),
        minimum.months_to_payoff,
        format_currency(minimum.total_interest),
        format_currency(aggressive_payment),
        aggressive.months_to_payoff,
        format_currency(aggressive.total_interest),
        format_currency(interest_saved),
    )
}

fn investment_reply(ctx: &ConversationContext) -> String {
    // Allocation by formula; never gates on missing data.
    let age = ctx.user_data.age.unwrap_or(30);
    let stock_allocation = (100 - age as i64).clamp(0, 90);
    let bond_allocation = 100 - stock_allocation;

    format!(
        "Based on your age ({}), a common starting allocation is:\n\n\
         • Stocks: {}% — e.g. a total market or S&P 500 index fund\n\
         • Bonds: {}% — e.g. a total bond market index fund\n\n\
         Low-cost index funds beat most stock picking over the long run. \
         Rebalance about once a year.",
        age, stock_allocation, bond_allocation,
    )
}

fn start_over_reply() -> String {
    "Let's start from the top. Tell me your monthly income and your age — \
     for example \"I'm 35 and make $5,500 per month\" — and I can help with \
     budgeting, retirement, an emergency fund, debt payoff, or investing."
        .to_string()
}

fn fallback_reply(income_found: Option<f64>, age_found: Option<u32>) -> String {
    let noted = match (income_found, age_found) {
        (Some(income), Some(age)) => Some(format!(
            "Got it — monthly income of {} and age {}. ",
            format_currency(income),
            age
        )),
        (Some(income), None) => Some(format!(
            "Got it — monthly income of {}. ",
            format_currency(income)
        )),
        (None, Some(age)) => Some(format!("Got it — age {}. ", age)),
        (None, None) => None,
    };

    format!(
        "{}I can help with budgeting, retirement planning, emergency funds, \
         debt payoff, and investing. What would you like to look at?",
        noted.unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConversationContext;

    #[test]
    fn test_budget_without_income_asks_for_it() {
        let ctx = ConversationContext::new();
        let (reply, updated) = respond("Help me create a budget", &ctx);
        assert!(reply.to_lowercase().contains("income"));
        assert!(!reply.contains('%'));
        assert_eq!(updated.last_topic.as_deref(), Some("budget"));
        assert!(updated.user_data.income.is_none());
    }

    #[test]
    fn test_budget_flow_across_turns() {
        let ctx = ConversationContext::new();

        let (_, ctx) = respond("Help me create a budget", &ctx);
        let (reply, ctx) = respond("I make $5000 per month", &ctx);
        assert_eq!(ctx.user_data.income, Some(5000.0));
        assert_eq!(ctx.conversation_state, ConversationState::GatheringInfo);
        assert!(reply.contains("$5,000"));

        let (reply, _) = respond("help me budget", &ctx);
        assert!(reply.contains("$2,500"));
        assert!(reply.contains("$1,500"));
        assert!(reply.contains("$1,000"));
    }

    #[test]
    fn test_single_message_sets_facts_and_computes_retirement() {
        let ctx = ConversationContext::new();
        let (reply, updated) = respond(
            "I'm 30 years old and make $6000 per month, help me plan for retirement",
            &ctx,
        );

        assert_eq!(updated.user_data.age, Some(30));
        assert_eq!(updated.user_data.income, Some(6000.0));
        // Computed answer, not a follow-up question.
        assert!(reply.contains("retirement outlook"));
        assert!(reply.contains("35"));
        assert!(reply.contains("$900"));
    }

    #[test]
    fn test_retirement_names_missing_facts() {
        let ctx = ConversationContext::new();
        let (reply, updated) = respond("help me plan for retirement", &ctx);
        assert!(reply.contains("your age"));
        assert!(reply.contains("your monthly income"));
        assert_eq!(updated.last_topic.as_deref(), Some("retirement"));
    }

    #[test]
    fn test_debt_scenario_compares_minimum_and_double() {
        let ctx = ConversationContext::new();
        let (reply, _) = respond("I have $5000 in credit card debt", &ctx);

        // $100 minimum → 94 months, $4,400 interest; $200 → 32 months,
        // $1,400 interest; savings is the literal difference.
        assert!(reply.contains("$100"));
        assert!(reply.contains("$200"));
        assert!(reply.contains("94 months"));
        assert!(reply.contains("$4,400"));
        assert!(reply.contains("$1,400"));
        assert!(reply.contains("$3,000"));
    }

    #[test]
    fn test_debt_without_amount_asks_for_balance() {
        let ctx = ConversationContext::new();
        let (reply, _) = respond("I need help with my debt", &ctx);
        assert!(reply.to_lowercase().contains("how much"));
    }

    #[test]
    fn test_investment_defaults_age_to_30() {
        let ctx = ConversationContext::new();
        let (reply, _) = respond("how should I invest", &ctx);
        assert!(reply.contains("(30)"));
        assert!(reply.contains("70%"));
        assert!(reply.contains("30%"));
    }

    #[test]
    fn test_investment_clamps_stock_allocation() {
        let mut ctx = ConversationContext::new();
        ctx.user_data.age = Some(5);
        let (reply, _) = respond("how should I invest", &ctx);
        assert!(reply.contains("90%"));
        assert!(reply.contains("10%"));
    }

    #[test]
    fn test_emergency_fund_uses_expense_default() {
        let mut ctx = ConversationContext::new();
        ctx.user_data.income = Some(5000.0);
        let (reply, _) = respond("do I need an emergency fund?", &ctx);

        // Expenses default to 80% of income: target 6 × $4,000 = $24,000,
        // set-aside $500/month, 48 months from zero savings.
        assert!(reply.contains("$24,000"));
        assert!(reply.contains("$500"));
        assert!(reply.contains("48"));
    }

    #[test]
    fn test_every_input_gets_a_response() {
        let ctx = ConversationContext::new();
        for text in ["", "???", "tell me a joke", "asdfghjkl"] {
            let (reply, _) = respond(text, &ctx);
            assert!(!reply.is_empty());
        }
    }

    #[test]
    fn test_fallback_acknowledges_stored_income() {
        let ctx = ConversationContext::new();
        let (reply, updated) = respond("my salary is $7,500", &ctx);
        assert_eq!(updated.user_data.income, Some(7500.0));
        assert!(reply.contains("$7,500"));
    }

    #[test]
    fn test_context_in_is_never_mutated() {
        let ctx = ConversationContext::new();
        let (_, _) = respond("I make $5000 per month", &ctx);
        assert!(ctx.user_data.income.is_none());
        assert_eq!(ctx.conversation_state, ConversationState::Greeting);
    }
}
