//! End-to-end tests: ledger -> filter -> aggregate -> insights/health/export

use chrono::{DateTime, Duration, TimeZone, Utc};

use finmate_core::models::to_timestamp_nanos;
use finmate_core::{
    calculate_health_score, category_totals, export_transactions_csv, filter_by_period,
    generate_insight_cards, income_expense, respond, search, AnalyticsConfig, AnalyticsReport,
    CategoryOverrides, ChatContext, HealthLabel, Ledger, MemoryPreferenceStore, Period, Severity,
    SnapshotLedger, Transaction, TransactionType,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 18, 12, 0, 0).single().unwrap()
}

fn tx(kind: TransactionType, amount: f64, category: &str, days_ago: i64) -> Transaction {
    Transaction::new(
        amount,
        kind,
        category,
        format!("{} entry", category),
        "upi",
        to_timestamp_nanos(now() - Duration::days(days_ago)),
    )
}

/// A month of student spending plus older history
fn seeded_ledger() -> SnapshotLedger {
    let mut ledger = SnapshotLedger::in_memory();
    let entries = [
        tx(TransactionType::Credit, 5000.0, "Income", 1),
        tx(TransactionType::Debit, 800.0, "Travel", 2),
        tx(TransactionType::Debit, 250.0, "Food", 3),
        tx(TransactionType::Debit, 700.0, "Subscriptions", 5),
        tx(TransactionType::Debit, 300.0, "college_expenses", 12),
        tx(TransactionType::Debit, 900.0, "Food", 45),
        tx(TransactionType::Debit, 400.0, "Bills", 200),
    ];
    for entry in entries {
        ledger.record_transaction(entry).unwrap();
    }
    ledger.set_spending_limit("travel", 700.0).unwrap();
    ledger.set_spending_limit("Food", 1000.0).unwrap();
    let id = ledger.create_challenge("Cook at home", 500.0, 40).unwrap();
    ledger.create_challenge("No cabs", 300.0, 20).unwrap();
    ledger.complete_challenge(id).unwrap();
    ledger
}

#[test]
fn test_ledger_state_after_seeding() {
    let ledger = seeded_ledger();
    assert_eq!(ledger.balance().unwrap(), 5000.0 - 3350.0);
    assert_eq!(ledger.digi_points().unwrap(), 40);
    assert_eq!(ledger.list_transactions(Some("FOOD")).unwrap().len(), 2);
}

#[test]
fn test_period_windows_are_nested() {
    let txs = seeded_ledger().list_transactions(None).unwrap();
    let weekly = filter_by_period(&txs, Period::Weekly, now());
    let monthly = filter_by_period(&txs, Period::Monthly, now());
    let yearly = filter_by_period(&txs, Period::Yearly, now());

    assert_eq!((weekly.len(), monthly.len(), yearly.len()), (4, 5, 7));
    assert!(weekly.iter().all(|t| monthly.contains(t)));
    assert!(monthly.iter().all(|t| yearly.contains(t)));
}

#[test]
fn test_category_totals_sum_to_expense() {
    let txs = seeded_ledger().list_transactions(None).unwrap();
    for period in Period::all() {
        let filtered = filter_by_period(&txs, *period, now());
        let sum: f64 = category_totals(&filtered).iter().map(|c| c.amount).sum();
        assert_eq!(sum, income_expense(&filtered).expense, "{}", period);
    }

    let labels: Vec<String> = category_totals(&txs).into_iter().map(|c| c.category).collect();
    assert_eq!(
        labels,
        vec!["Travel", "Food", "Subscriptions", "College Expenses", "Bills"]
    );
}

#[test]
fn test_monthly_insights_end_to_end() {
    let ledger = seeded_ledger();
    let txs = ledger.list_transactions(None).unwrap();
    let limits = ledger.spending_limits().unwrap();
    let config = AnalyticsConfig::default();

    let monthly = filter_by_period(&txs, Period::Monthly, now());
    let cards = generate_insight_cards(&monthly, &limits, Period::Monthly, now(), &config);

    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    // Travel (800) is the top category and over its 700 limit; the previous
    // 30-day window is outside the monthly filter, so no comparison card
    assert_eq!(
        titles,
        vec!["Overspending Alert", "Subscription Check", "Great Savings!"]
    );
    assert_eq!(cards[0].severity, Severity::Warning);
    assert!(cards[0].description.contains("100"));

    // With the yearly list the 45-day-old Food spend feeds month-over-month
    let yearly = filter_by_period(&txs, Period::Yearly, now());
    let cards = generate_insight_cards(&yearly, &limits, Period::Yearly, now(), &config);
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[3].title, "Spending Up");
}

#[test]
fn test_health_score_end_to_end() {
    let ledger = seeded_ledger();
    let txs = ledger.list_transactions(None).unwrap();
    let monthly = filter_by_period(&txs, Period::Monthly, now());

    let score = calculate_health_score(
        &monthly,
        ledger.balance().unwrap(),
        &ledger.spending_limits().unwrap(),
        &ledger.challenges().unwrap(),
        &AnalyticsConfig::default(),
    );
    // savings (5000-2050)/5000 = 59, limits 1/2 = 50, challenges 1/2 = 50
    // 23.6 + 20 + 10 = 53.6
    assert_eq!(score.score, 54);
    assert_eq!(score.label, HealthLabel::Fair);
}

#[test]
fn test_export_after_search() {
    let txs = seeded_ledger().list_transactions(None).unwrap();
    let food = search(&txs, Some("food"), None);
    let csv = export_transactions_csv(&food, &AnalyticsConfig::default()).unwrap();

    let mut rdr = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][3], "250.00");
    assert_eq!(&rows[1][3], "900.00");
    assert!(rows.iter().all(|r| &r[4] == "Food" && &r[5] == "debit"));
}

#[test]
fn test_category_overrides_feed_analytics() {
    let ledger = seeded_ledger();
    let txs = ledger.list_transactions(None).unwrap();

    let mut store = MemoryPreferenceStore::new();
    let mut overrides = CategoryOverrides::default();
    // Reclassify the Travel debit as Food
    overrides.set(1, "Food");
    overrides.save(&mut store).unwrap();

    let adjusted = CategoryOverrides::load(&store).apply(&txs);
    let monthly = filter_by_period(&adjusted, Period::Monthly, now());
    let totals = category_totals(&monthly);
    assert_eq!(totals[0].category, "Food");
    assert_eq!(totals[0].amount, 1050.0);
}

#[test]
fn test_chatbot_over_ledger_snapshot() {
    let ledger = seeded_ledger();
    let txs = ledger.list_transactions(None).unwrap();
    let limits = ledger.spending_limits().unwrap();
    let config = AnalyticsConfig::default();
    let ctx = ChatContext::new(&txs, &limits, &config);

    assert!(respond("How much did I spend?", &ctx).contains("₹3350.00"));
    assert!(respond("did I overspend?", &ctx).contains("Travel (over by ₹100)"));
}

#[test]
fn test_report_from_file_backed_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finmate.json");

    let mut ledger = SnapshotLedger::create(&path, 0.0).unwrap();
    ledger
        .record_transaction(tx(TransactionType::Credit, 2000.0, "Income", 1))
        .unwrap();
    ledger
        .record_transaction(tx(TransactionType::Debit, 500.0, "Food", 1))
        .unwrap();

    let reopened = SnapshotLedger::open(&path).unwrap();
    let report = AnalyticsReport::build(
        &reopened.list_transactions(None).unwrap(),
        &reopened.spending_limits().unwrap(),
        &reopened.challenges().unwrap(),
        reopened.balance().unwrap(),
        Period::Weekly,
        now(),
        &AnalyticsConfig::default(),
    );
    assert_eq!(report.balance, 1500.0);
    assert_eq!(report.transaction_count, 2);
    assert_eq!(report.income_expense.income, 2000.0);
}
