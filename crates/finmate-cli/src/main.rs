//! FinMate CLI - Student finance tracker
//!
//! Usage:
//!   finmate init --balance 5000          Create a ledger snapshot
//!   finmate record --amount 120 -c Food  Record a transaction
//!   finmate report --period monthly      Analytics for a period
//!   finmate chat "how much did I spend?" Ask the finance assistant

mod cli;
mod commands;


use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let prefs = cli.prefs.as_deref();
    let now = Utc::now();

    match cli.command {
        Commands::Init { balance } => commands::cmd_init(&cli.snapshot, balance),
        Commands::Record {
            amount,
            kind,
            category,
            description,
            payment_method,
        } => {
            let mut ledger = commands::open_ledger(&cli.snapshot)?;
            let alerts = commands::load_notifications(prefs).spending_limit_alerts;
            commands::cmd_record(
                &mut ledger,
                &config,
                amount,
                &kind,
                &category,
                &description,
                &payment_method,
                now,
                alerts,
            )
        }
        Commands::Transactions {
            period,
            category,
            search,
            limit,
        } => {
            let period = period.as_deref().map(commands::parse_period).transpose()?;
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_transactions_list(
                &view,
                &config,
                period,
                category.as_deref(),
                search.as_deref(),
                limit,
                now,
                cli.json,
            )
        }
        Commands::Limits { action } => match action {
            None | Some(LimitsAction::List) => {
                let view = commands::load_view(&cli.snapshot, prefs)?;
                commands::cmd_limits_list(&view, &config, now, cli.json)
            }
            Some(LimitsAction::Set { category, amount }) => {
                let mut ledger = commands::open_ledger(&cli.snapshot)?;
                commands::cmd_limits_set(&mut ledger, &config, &category, amount)
            }
        },
        Commands::Challenges { action } => match action {
            None | Some(ChallengesAction::List) => {
                let view = commands::load_view(&cli.snapshot, prefs)?;
                commands::cmd_challenges_list(&view, &config, cli.json)
            }
            Some(ChallengesAction::Add {
                description,
                target,
                points,
            }) => {
                let mut ledger = commands::open_ledger(&cli.snapshot)?;
                commands::cmd_challenges_add(&mut ledger, &description, target, points)
            }
            Some(ChallengesAction::Complete { id }) => {
                let mut ledger = commands::open_ledger(&cli.snapshot)?;
                commands::cmd_challenges_complete(&mut ledger, id)
            }
        },
        Commands::Balance => {
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_balance(&view, &config, cli.json)
        }
        Commands::Report { period } => {
            let period = commands::parse_period(&period)?;
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_report(&view, &config, period, now, cli.json)
        }
        Commands::Insights { period } => {
            let period = commands::parse_period(&period)?;
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_insights(&view, &config, period, now, cli.json)
        }
        Commands::Health { period } => {
            let period = commands::parse_period(&period)?;
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_health(&view, &config, period, now, cli.json)
        }
        Commands::Weekly => {
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_weekly(&view, &config, now, cli.json)
        }
        Commands::Export { period, output } => {
            let period = period.as_deref().map(commands::parse_period).transpose()?;
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_export(&view, &config, period, output.as_deref(), now)
        }
        Commands::Chat { query } => {
            let view = commands::load_view(&cli.snapshot, prefs)?;
            commands::cmd_chat(&view, &config, &query.join(" "), cli.json)
        }
        Commands::Prefs { action } => {
            let mut store = commands::open_prefs(prefs)?;
            match action {
                None | Some(PrefsAction::Show) => commands::cmd_prefs_show(&store, cli.json),
                Some(PrefsAction::Notifications {
                    spending_limit_alerts,
                    challenge_reminders,
                    weekly_summary,
                    offer_notifications,
                }) => commands::cmd_prefs_notifications(
                    &mut store,
                    spending_limit_alerts,
                    challenge_reminders,
                    weekly_summary,
                    offer_notifications,
                ),
                Some(PrefsAction::Override { index, category }) => {
                    let ledger = commands::open_ledger(&cli.snapshot)?;
                    commands::cmd_prefs_override(&mut store, &ledger, index, &category)
                }
            }
        }
    }
}
