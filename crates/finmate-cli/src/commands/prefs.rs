//! Preference commands (notification toggles, category overrides)

use anyhow::{bail, Context, Result};
use finmate_core::{
    humanize_category, CategoryOverrides, Ledger, NotificationPreferences, PreferenceStore,
};

use super::print_json;

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

pub fn cmd_prefs_show<S: PreferenceStore>(store: &S, json: bool) -> Result<()> {
    let notifications = NotificationPreferences::load(store);
    let overrides = CategoryOverrides::load(store);

    if json {
        return print_json(&serde_json::json!({
            "notifications": notifications,
            "categoryOverrides": overrides,
        }));
    }

    println!();
    println!("🔔 Notifications");
    println!("   ─────────────────────────────");
    println!(
        "   Spending limit alerts: {}",
        on_off(notifications.spending_limit_alerts)
    );
    println!(
        "   Challenge reminders:   {}",
        on_off(notifications.challenge_reminders)
    );
    println!(
        "   Weekly summary:        {}",
        on_off(notifications.weekly_summary)
    );
    println!(
        "   Offers:                {}",
        on_off(notifications.offer_notifications)
    );

    if !overrides.is_empty() {
        println!();
        println!("🏷️  Category Overrides");
        println!("   ─────────────────────────────");
        for (index, category) in overrides.iter() {
            println!("   [{}] → {}", index, humanize_category(category));
        }
    }

    Ok(())
}

pub fn cmd_prefs_notifications<S: PreferenceStore>(
    store: &mut S,
    spending_limit_alerts: Option<bool>,
    challenge_reminders: Option<bool>,
    weekly_summary: Option<bool>,
    offer_notifications: Option<bool>,
) -> Result<()> {
    let mut prefs = NotificationPreferences::load(store);

    if let Some(v) = spending_limit_alerts {
        prefs.spending_limit_alerts = v;
    }
    if let Some(v) = challenge_reminders {
        prefs.challenge_reminders = v;
    }
    if let Some(v) = weekly_summary {
        prefs.weekly_summary = v;
    }
    if let Some(v) = offer_notifications {
        prefs.offer_notifications = v;
    }

    prefs
        .save(store)
        .context("Failed to save notification preferences")?;
    println!("✅ Notification preferences saved");
    Ok(())
}

pub fn cmd_prefs_override<S: PreferenceStore, L: Ledger>(
    store: &mut S,
    ledger: &L,
    index: usize,
    category: &str,
) -> Result<()> {
    let count = ledger.list_transactions(None)?.len();
    if index >= count {
        bail!(
            "No transaction at index {} ({} transactions recorded)",
            index,
            count
        );
    }
    if category.trim().is_empty() {
        bail!("Category must not be empty");
    }

    let mut overrides = CategoryOverrides::load(store);
    overrides.set(index, category.trim());
    overrides
        .save(store)
        .context("Failed to save category override")?;

    println!(
        "✅ Transaction {} now counts as {}",
        index,
        humanize_category(category.trim())
    );
    Ok(())
}
