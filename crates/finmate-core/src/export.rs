//! Transaction CSV export
//!
//! Header row: `Date,Time,Name,Amount,Category,Type`. Every data field is
//! double-quoted with embedded quotes doubled, so commas, quotes or newlines
//! in any column cannot break a row. Rows follow input order.

use chrono::{DateTime, Utc};

use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::models::Transaction;

pub const CSV_HEADER: &str = "Date,Time,Name,Amount,Category,Type";

/// Serialize transactions to CSV text
pub fn export_transactions_csv(
    transactions: &[Transaction],
    config: &AnalyticsConfig,
) -> Result<String> {
    let offset = config.offset();

    let mut buf = Vec::with_capacity(64 * (transactions.len() + 1));
    buf.extend_from_slice(CSV_HEADER.as_bytes());
    buf.push(b'\n');

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buf);

    for tx in transactions {
        let local = tx.datetime().with_timezone(&offset);
        wtr.write_record([
            local.format("%-d/%-m/%Y").to_string(),
            local.format("%I:%M %P").to_string(),
            tx.description.clone(),
            format!("{:.2}", tx.amount),
            tx.category.clone(),
            tx.kind.as_str().to_string(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Export(format!("Failed to flush CSV: {}", e)))?;
    tracing::debug!(rows = transactions.len(), "Exported transactions to CSV");
    String::from_utf8(bytes).map_err(|e| Error::Export(format!("Invalid UTF-8 in CSV: {}", e)))
}

/// Download filename for an export made at `now`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("transactions_{}.csv", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{to_timestamp_nanos, TransactionType};
    use chrono::TimeZone;

    fn lunch() -> Transaction {
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).single().unwrap();
        Transaction::new(
            12.5,
            TransactionType::Debit,
            "Food",
            "Lunch \"special\"",
            "qr",
            to_timestamp_nanos(at),
        )
    }

    #[test]
    fn test_header_only_for_empty_input() {
        let csv = export_transactions_csv(&[], &AnalyticsConfig::default()).unwrap();
        assert_eq!(csv, "Date,Time,Name,Amount,Category,Type\n");
    }

    #[test]
    fn test_quotes_description_and_formats_amount() {
        let csv = export_transactions_csv(&[lunch()], &AnalyticsConfig::default()).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.contains(r#""Lunch ""special""""#));
        assert!(row.contains(r#""12.50""#));
        // 09:00 UTC is 14:30 IST
        assert_eq!(
            row,
            r#""15/6/2024","02:30 pm","Lunch ""special""","12.50","Food","debit""#
        );
    }

    #[test]
    fn test_fields_parse_back() {
        let mut tx = lunch();
        tx.category = "Food, Snacks".to_string();
        let csv = export_transactions_csv(&[tx], &AnalyticsConfig::default()).unwrap();

        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["Date", "Time", "Name", "Amount", "Category", "Type"]
        );
        let record = rdr.records().next().unwrap().unwrap();
        assert_eq!(&record[2], "Lunch \"special\"");
        assert_eq!(&record[3], "12.50");
        assert_eq!(&record[4], "Food, Snacks");
    }

    #[test]
    fn test_preserves_input_order_and_offset() {
        let config = AnalyticsConfig {
            utc_offset_minutes: 0,
            ..AnalyticsConfig::default()
        };
        let mut late = lunch();
        late.description = "Dinner".to_string();
        late.timestamp += 12 * 3_600 * 1_000_000_000;

        let csv = export_transactions_csv(&[late, lunch()], &config).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert!(rows[0].starts_with(r#""15/6/2024","09:00 pm","Dinner""#));
        assert!(rows[1].starts_with(r#""15/6/2024","09:00 am","Lunch"#));
    }

    #[test]
    fn test_export_filename() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
        assert_eq!(export_filename(now), "transactions_1700000000000.csv");
    }
}
