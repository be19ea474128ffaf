//! Keyword chatbot
//!
//! Maps a free-text question to one canned response. The query is
//! lowercased and checked against an ordered list of intents by substring
//! containment ("spending" matches "spend"); the first match wins. Data-driven
//! answers are computed from the snapshot in [`ChatContext`]. There is no
//! conversation state.

use crate::aggregate::{
    category_spend, distinct_categories, humanize_category, income_expense, limit_statuses,
    top_category,
};
use crate::config::AnalyticsConfig;
use crate::models::{SpendingLimit, Transaction};

/// Data snapshot the chatbot answers from
pub struct ChatContext<'a> {
    pub transactions: &'a [Transaction],
    pub limits: &'a [SpendingLimit],
    pub config: &'a AnalyticsConfig,
}

impl<'a> ChatContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        limits: &'a [SpendingLimit],
        config: &'a AnalyticsConfig,
    ) -> Self {
        Self {
            transactions,
            limits,
            config,
        }
    }
}

/// What a query is about, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    Overspend,
    Food,
    Travel,
    Spending,
    Income,
    Savings,
    Budget,
    Categories,
    Challenges,
    Limits,
    Greeting,
    Fallback,
}

impl ChatIntent {
    /// Every intent that has keywords, in matching order
    pub fn all() -> &'static [ChatIntent] {
        &[
            Self::Overspend,
            Self::Food,
            Self::Travel,
            Self::Spending,
            Self::Income,
            Self::Savings,
            Self::Budget,
            Self::Categories,
            Self::Challenges,
            Self::Limits,
            Self::Greeting,
        ]
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Overspend => &["overspend", "over budget", "exceed"],
            Self::Food => &["food"],
            Self::Travel => &["travel"],
            Self::Spending => &["spend", "expense"],
            Self::Income => &["income", "credit", "salary"],
            Self::Savings => &["save", "saving"],
            Self::Budget => &["budget"],
            Self::Categories => &["category", "categories"],
            Self::Challenges => &["challenge", "reward"],
            Self::Limits => &["limit"],
            Self::Greeting => &["hello"],
            Self::Fallback => &[],
        }
    }

    /// First intent whose keyword occurs in the query
    pub fn detect(query: &str) -> Self {
        let query = query.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|intent| intent.keywords().iter().any(|k| query.contains(k)))
            .unwrap_or(Self::Fallback)
    }
}

/// Answer a question about the current snapshot
pub fn respond(query: &str, ctx: &ChatContext<'_>) -> String {
    let intent = ChatIntent::detect(query);
    tracing::debug!(?intent, "Chat intent detected");

    match intent {
        ChatIntent::Overspend => overspend_response(ctx),
        ChatIntent::Food => category_response(ctx, "Food"),
        ChatIntent::Travel => category_response(ctx, "Travel"),
        ChatIntent::Spending => spending_response(ctx),
        ChatIntent::Income => income_response(ctx),
        ChatIntent::Savings => "Here are some saving tips for students:\n\n\
            1. Set a monthly savings goal\n\
            2. Track every expense\n\
            3. Use student discounts\n\
            4. Cook meals instead of eating out\n\
            5. Share expenses with roommates\n\n\
            Set spending limits for each category and complete challenges to earn digi points!"
            .to_string(),
        ChatIntent::Budget => "Creating a student budget:\n\n\
            1. List all income sources\n\
            2. Track fixed expenses (rent, utilities)\n\
            3. Set limits for variable expenses (food, entertainment)\n\
            4. Allocate 20% for savings\n\
            5. Review and adjust monthly"
            .to_string(),
        ChatIntent::Categories => categories_response(ctx),
        ChatIntent::Challenges => "Challenges help you build good financial habits! \
            Complete saving challenges to earn digi points and compare your progress \
            on the leaderboard."
            .to_string(),
        ChatIntent::Limits => "Set monthly caps for each category on the Spending Limits page. \
            You'll be alerted when you're approaching or exceeding a limit."
            .to_string(),
        ChatIntent::Greeting => "Hello! How can I help you with your finances today?".to_string(),
        ChatIntent::Fallback => "I can help you understand your spending patterns, suggest \
            savings strategies, and provide budgeting tips. Try asking about your expenses, \
            savings, or budget!"
            .to_string(),
    }
}

fn spending_response(ctx: &ChatContext<'_>) -> String {
    let total = income_expense(ctx.transactions).expense;
    match top_category(ctx.transactions) {
        Some((category, amount)) => format!(
            "You've spent {} in total. Your highest spending category is {} with {}.",
            ctx.config.exact(total),
            humanize_category(&category),
            ctx.config.exact(amount)
        ),
        None => format!("You've spent {} in total.", ctx.config.exact(total)),
    }
}

fn income_response(ctx: &ChatContext<'_>) -> String {
    let totals = income_expense(ctx.transactions);
    if totals.income <= 0.0 {
        return "You haven't recorded any income yet. Add your pocket money or salary to \
            track your savings rate."
            .to_string();
    }
    format!(
        "You've received {} in income and spent {}, leaving {}.",
        ctx.config.exact(totals.income),
        ctx.config.exact(totals.expense),
        ctx.config.exact(totals.income - totals.expense)
    )
}

fn category_response(ctx: &ChatContext<'_>, category: &str) -> String {
    let spent = category_spend(ctx.transactions, category);
    if spent <= 0.0 {
        return format!("You haven't spent anything on {} yet.", category);
    }
    format!("You've spent {} on {}.", ctx.config.exact(spent), category)
}

fn categories_response(ctx: &ChatContext<'_>) -> String {
    let categories = distinct_categories(ctx.transactions);
    if categories.is_empty() {
        return "You don't have any transactions yet.".to_string();
    }
    let names: Vec<String> = categories.iter().map(|c| humanize_category(c)).collect();
    format!(
        "You have transactions in {} categories: {}.",
        names.len(),
        names.join(", ")
    )
}

fn overspend_response(ctx: &ChatContext<'_>) -> String {
    if ctx.limits.is_empty() {
        return "You haven't set any spending limits yet. Set limits to track overspending."
            .to_string();
    }
    let over: Vec<String> = limit_statuses(ctx.transactions, ctx.limits, ctx.config)
        .into_iter()
        .filter(|s| s.over)
        .map(|s| {
            format!(
                "{} (over by {})",
                humanize_category(&s.category),
                ctx.config.whole(s.spent - s.limit)
            )
        })
        .collect();
    if over.is_empty() {
        "You're within all your spending limits. Nice work!".to_string()
    } else {
        format!("You've gone over your limit in: {}.", over.join(", "))
    }
}
