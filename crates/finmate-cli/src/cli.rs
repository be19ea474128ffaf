//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FinMate - Student finance tracking and analytics
#[derive(Parser)]
#[command(name = "finmate")]
#[command(about = "Student finance tracker: spending analytics, limits and challenges", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger snapshot path
    #[arg(long, default_value = "finmate.json", global = true)]
    pub snapshot: PathBuf,

    /// Analytics config file (defaults to the user config, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preferences file (defaults to the user data directory)
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ledger snapshot
    Init {
        /// Opening balance
        #[arg(short, long, default_value = "0")]
        balance: f64,
    },

    /// Record a transaction
    Record {
        /// Amount (non-negative)
        #[arg(short, long)]
        amount: f64,

        /// Transaction type: debit (expense) or credit (income)
        #[arg(short = 't', long = "type", default_value = "debit")]
        kind: String,

        /// Category (e.g. Food, Travel, Bills)
        #[arg(short, long)]
        category: String,

        /// Description shown in history and exports
        #[arg(short, long, default_value = "")]
        description: String,

        /// Payment method
        #[arg(short, long, default_value = "upi")]
        payment_method: String,
    },

    /// List transactions
    Transactions {
        /// Trailing period: weekly, monthly, yearly (all history if omitted)
        #[arg(short, long)]
        period: Option<String>,

        /// Only this category ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Free-text search over description and category
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show or set spending limits
    Limits {
        #[command(subcommand)]
        action: Option<LimitsAction>,
    },

    /// Manage challenges
    Challenges {
        #[command(subcommand)]
        action: Option<ChallengesAction>,
    },

    /// Show balance and digi points
    Balance,

    /// Full analytics report for a period
    Report {
        /// Trailing period: weekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// Insight cards for a period
    Insights {
        /// Trailing period: weekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// Financial health score for a period
    Health {
        /// Trailing period: weekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// This week vs. last week by category
    Weekly,

    /// Export transactions to CSV
    Export {
        /// Trailing period: weekly, monthly, yearly (all history if omitted)
        #[arg(short, long)]
        period: Option<String>,

        /// Output file (defaults to transactions_<millis>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask the finance assistant a question
    Chat {
        /// Question, e.g. "how much did I spend?"
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Subcommand)]
pub enum LimitsAction {
    /// List limits with spending this month
    List,
    /// Create or replace the limit for a category
    Set {
        /// Category name
        category: String,
        /// Monthly cap
        amount: f64,
    },
}

#[derive(Subcommand)]
pub enum ChallengesAction {
    /// List challenges
    List,
    /// Create a challenge
    Add {
        /// What the challenge asks for
        #[arg(short, long)]
        description: String,

        /// Target amount
        #[arg(short, long)]
        target: f64,

        /// Digi points awarded on completion
        #[arg(short, long, default_value = "50")]
        points: u64,
    },
    /// Mark a challenge completed
    Complete {
        /// Challenge ID
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show preferences
    Show,
    /// Change notification toggles
    Notifications {
        /// Alert when approaching or exceeding a spending limit
        #[arg(long)]
        spending_limit_alerts: Option<bool>,

        /// Remind about open challenges
        #[arg(long)]
        challenge_reminders: Option<bool>,

        /// Send a weekly spending summary
        #[arg(long)]
        weekly_summary: Option<bool>,

        /// Offers and promotions
        #[arg(long)]
        offer_notifications: Option<bool>,
    },
    /// Override the category of one transaction
    Override {
        /// Transaction index (as shown by `finmate transactions`)
        index: usize,
        /// New category
        category: String,
    },
}
