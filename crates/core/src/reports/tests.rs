//! Property-based and unit tests for the reports module.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::aggregate;
use super::error::ReportError;
use super::export;
use super::service::ReportService;
use super::types::{
    DateRange, ExportFormat, GroupKey, ReportKind, ReportOutput, ReportRequest, SummaryRow,
    TransactionKind, TransactionRecord,
};

fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).unwrap()
}

fn record(
    amount: Decimal,
    kind: TransactionKind,
    category: &str,
    occurred_on: NaiveDate,
) -> TransactionRecord {
    TransactionRecord {
        amount,
        kind,
        category: category.to_string(),
        occurred_on,
    }
}

/// Arbitrary records drawn from a small category pool so groups collide.
fn arb_records() -> impl Strategy<Value = Vec<TransactionRecord>> {
    let record = (
        1i64..1_000_000,
        any::<bool>(),
        prop::sample::select(vec!["food", "transport", "rent", "salary", "gifts", "other"]),
        0u64..730,
    )
        .prop_map(|(cents, is_expense, category, day_offset)| TransactionRecord {
            amount: Decimal::new(cents, 2),
            kind: if is_expense {
                TransactionKind::Expense
            } else {
                TransactionKind::Income
            },
            category: category.to_string(),
            occurred_on: day(2023, 1, 1) + Days::new(day_offset),
        });

    prop::collection::vec(record, 0..60)
}

fn expected_totals(
    records: &[TransactionRecord],
    kind: TransactionKind,
) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for r in records.iter().filter(|r| r.kind == kind) {
        *totals.entry(r.category.clone()).or_insert(Decimal::ZERO) += r.amount;
    }
    totals
}

proptest! {
    /// Category totals equal the per-category sums of matching-kind inputs,
    /// and the output category set has no extras and no omissions.
    #[test]
    fn test_spending_totals_match_input(records in arb_records()) {
        let expected = expected_totals(&records, TransactionKind::Expense);
        let rows = aggregate::spending_by_category(&records);

        prop_assert_eq!(rows.len(), expected.len());
        for row in &rows {
            let GroupKey::Category(category) = &row.key else {
                return Err(TestCaseError::fail("category report produced a month key"));
            };
            prop_assert_eq!(Some(&row.total), expected.get(category));
        }
    }

    /// Category rows are non-increasing in total, for both category reports.
    #[test]
    fn test_category_rows_sorted_descending(records in arb_records()) {
        for rows in [
            aggregate::spending_by_category(&records),
            aggregate::income_by_category(&records),
        ] {
            for pair in rows.windows(2) {
                prop_assert!(pair[0].total >= pair[1].total);
            }
        }
    }

    /// Equal totals fall back to category-ascending order.
    #[test]
    fn test_category_ties_break_alphabetically(records in arb_records()) {
        let rows = aggregate::spending_by_category(&records);
        for pair in rows.windows(2) {
            if pair[0].total == pair[1].total {
                prop_assert!(pair[0].key < pair[1].key);
            }
        }
    }

    /// Trend rows are non-decreasing in month, and within one month the
    /// expense row precedes the income row.
    #[test]
    fn test_trends_ordered_by_month_then_kind(records in arb_records()) {
        let rows = aggregate::monthly_trends(&records, day(2024, 12, 31), 24);

        let keys: Vec<(NaiveDate, TransactionKind)> = rows
            .iter()
            .map(|row| match row.key {
                GroupKey::Month { month, kind } => Ok((month, kind)),
                GroupKey::Category(_) => Err(TestCaseError::fail("trend report produced a category key")),
            })
            .collect::<Result<_, _>>()?;

        for pair in keys.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Aggregation has no hidden state: repeated calls over the same records
    /// yield identical row sequences.
    #[test]
    fn test_aggregation_is_idempotent(records in arb_records()) {
        prop_assert_eq!(
            aggregate::spending_by_category(&records),
            aggregate::spending_by_category(&records)
        );
        prop_assert_eq!(
            aggregate::income_by_category(&records),
            aggregate::income_by_category(&records)
        );
        prop_assert_eq!(
            aggregate::monthly_trends(&records, day(2024, 6, 15), 12),
            aggregate::monthly_trends(&records, day(2024, 6, 15), 12)
        );
    }

    /// Parsing the tabular export recovers every (group key, total) pair.
    #[test]
    fn test_csv_round_trip(records in arb_records()) {
        let rows = aggregate::spending_by_category(&records);
        let payload = export::csv::export(&rows, "spending_report").unwrap();

        let mut reader = csv::Reader::from_reader(payload.bytes.as_slice());
        prop_assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["Category", "Amount"])
        );

        let parsed: Vec<(String, Decimal)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), Decimal::from_str(&r[1]).unwrap())
            })
            .collect();
        let original: Vec<(String, Decimal)> = rows
            .iter()
            .map(|row| (row.key.to_string(), row.total))
            .collect();

        prop_assert_eq!(parsed, original);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_empty_feed_yields_empty_rows() {
        assert!(aggregate::spending_by_category(&[]).is_empty());
        assert!(aggregate::income_by_category(&[]).is_empty());
        assert!(aggregate::monthly_trends(&[], day(2024, 6, 15), 12).is_empty());
    }

    #[test]
    fn test_spending_by_category_scenario() {
        let records = vec![
            record(dec!(50), TransactionKind::Expense, "food", day(2024, 1, 5)),
            record(dec!(30), TransactionKind::Expense, "food", day(2024, 1, 20)),
            record(dec!(20), TransactionKind::Expense, "transport", day(2024, 1, 10)),
        ];

        let rows = aggregate::spending_by_category(&records);

        assert_eq!(
            rows,
            vec![
                SummaryRow {
                    key: GroupKey::Category("food".to_string()),
                    total: dec!(80),
                },
                SummaryRow {
                    key: GroupKey::Category("transport".to_string()),
                    total: dec!(20),
                },
            ]
        );
    }

    #[test]
    fn test_category_spellings_stay_distinct() {
        let records = vec![
            record(dec!(10), TransactionKind::Expense, "Food", day(2024, 1, 5)),
            record(dec!(15), TransactionKind::Expense, "food", day(2024, 1, 6)),
        ];

        let rows = aggregate::spending_by_category(&records);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_income_ignores_expenses() {
        let records = vec![
            record(dec!(900), TransactionKind::Income, "salary", day(2024, 2, 1)),
            record(dec!(50), TransactionKind::Expense, "food", day(2024, 2, 2)),
        ];

        let rows = aggregate::income_by_category(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, GroupKey::Category("salary".to_string()));
        assert_eq!(rows[0].total, dec!(900));
    }

    #[test]
    fn test_trends_excludes_thirteenth_month() {
        // 13 consecutive months of data ending at the report month.
        let records: Vec<TransactionRecord> = (0..13)
            .map(|i| {
                let month = if i < 7 { 6 + i } else { i - 6 };
                let year = if i < 7 { 2023 } else { 2024 };
                record(
                    dec!(10),
                    TransactionKind::Expense,
                    "food",
                    day(year, month, 15),
                )
            })
            .collect();

        let rows = aggregate::monthly_trends(&records, day(2024, 6, 20), 12);

        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|row| match row.key {
            GroupKey::Month { month, .. } => month >= day(2023, 7, 1),
            GroupKey::Category(_) => false,
        }));
    }

    #[test]
    fn test_trends_groups_month_and_kind() {
        let records = vec![
            record(dec!(40), TransactionKind::Expense, "food", day(2024, 5, 3)),
            record(dec!(60), TransactionKind::Expense, "rent", day(2024, 5, 9)),
            record(dec!(500), TransactionKind::Income, "salary", day(2024, 5, 1)),
            record(dec!(25), TransactionKind::Expense, "food", day(2024, 6, 2)),
        ];

        let rows = aggregate::monthly_trends(&records, day(2024, 6, 15), 12);

        assert_eq!(
            rows,
            vec![
                SummaryRow {
                    key: GroupKey::Month {
                        month: day(2024, 5, 1),
                        kind: TransactionKind::Expense,
                    },
                    total: dec!(100),
                },
                SummaryRow {
                    key: GroupKey::Month {
                        month: day(2024, 5, 1),
                        kind: TransactionKind::Income,
                    },
                    total: dec!(500),
                },
                SummaryRow {
                    key: GroupKey::Month {
                        month: day(2024, 6, 1),
                        kind: TransactionKind::Expense,
                    },
                    total: dec!(25),
                },
            ]
        );
    }

    #[test]
    fn test_trends_window_start() {
        assert_eq!(
            aggregate::trends_window_start(day(2024, 6, 20), 12),
            day(2023, 7, 1)
        );
        assert_eq!(
            aggregate::trends_window_start(day(2024, 6, 20), 1),
            day(2024, 6, 1)
        );
    }

    #[test]
    fn test_report_kind_parsing() {
        assert_eq!("spending".parse::<ReportKind>().unwrap(), ReportKind::Spending);
        assert_eq!("income".parse::<ReportKind>().unwrap(), ReportKind::Income);
        assert_eq!("trends".parse::<ReportKind>().unwrap(), ReportKind::Trends);

        assert!(matches!(
            "bogus".parse::<ReportKind>(),
            Err(ReportError::InvalidReportKind(s)) if s == "bogus"
        ));
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);

        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ReportError::InvalidExportFormat(s)) if s == "xml"
        ));
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::unbounded().validate().is_ok());
        assert!(
            DateRange {
                start: Some(day(2024, 1, 1)),
                end: None,
            }
            .validate()
            .is_ok()
        );
        assert!(
            DateRange {
                start: Some(day(2024, 1, 1)),
                end: Some(day(2024, 1, 1)),
            }
            .validate()
            .is_ok()
        );

        let reversed = DateRange {
            start: Some(day(2024, 2, 1)),
            end: Some(day(2024, 1, 1)),
        };
        assert!(matches!(
            reversed.validate(),
            Err(ReportError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange {
            start: Some(day(2024, 1, 1)),
            end: Some(day(2024, 1, 31)),
        };

        assert!(range.contains(day(2024, 1, 1)));
        assert!(range.contains(day(2024, 1, 31)));
        assert!(!range.contains(day(2023, 12, 31)));
        assert!(!range.contains(day(2024, 2, 1)));
        assert!(DateRange::unbounded().contains(day(1999, 1, 1)));
    }

    #[test]
    fn test_feed_filter_for_category_reports() {
        let range = DateRange {
            start: Some(day(2024, 1, 1)),
            end: Some(day(2024, 3, 31)),
        };
        let request = ReportRequest {
            kind: ReportKind::Spending,
            range: range.clone(),
            export: None,
        };

        let (kind, feed_range) = ReportService::feed_filter(&request, day(2024, 6, 20));
        assert_eq!(kind, Some(TransactionKind::Expense));
        assert_eq!(feed_range, range);
    }

    #[test]
    fn test_feed_filter_for_trends_windows_the_feed() {
        let request = ReportRequest {
            kind: ReportKind::Trends,
            range: DateRange::unbounded(),
            export: None,
        };

        let (kind, feed_range) = ReportService::feed_filter(&request, day(2024, 6, 20));
        assert_eq!(kind, None);
        assert_eq!(feed_range.start, Some(day(2023, 7, 1)));
        assert_eq!(feed_range.end, None);
    }

    #[test]
    fn test_generate_returns_rows_without_export() {
        let records = vec![
            record(dec!(50), TransactionKind::Expense, "food", day(2024, 1, 5)),
        ];
        let request = ReportRequest {
            kind: ReportKind::Spending,
            range: DateRange::unbounded(),
            export: None,
        };

        let output = ReportService::generate(&request, &records, day(2024, 6, 20)).unwrap();
        let ReportOutput::Rows(rows) = output else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_generate_rejects_reversed_range() {
        let request = ReportRequest {
            kind: ReportKind::Spending,
            range: DateRange {
                start: Some(day(2024, 2, 1)),
                end: Some(day(2024, 1, 1)),
            },
            export: Some(ExportFormat::Csv),
        };

        // No payload is produced on error.
        assert!(matches!(
            ReportService::generate(&request, &[], day(2024, 6, 20)),
            Err(ReportError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_generate_csv_export_payload() {
        let records = vec![
            record(dec!(50), TransactionKind::Expense, "food", day(2024, 1, 5)),
            record(dec!(20), TransactionKind::Expense, "transport", day(2024, 1, 10)),
        ];
        let request = ReportRequest {
            kind: ReportKind::Spending,
            range: DateRange::unbounded(),
            export: Some(ExportFormat::Csv),
        };

        let output = ReportService::generate(&request, &records, day(2024, 6, 20)).unwrap();
        let ReportOutput::Export(payload) = output else {
            panic!("expected export payload");
        };

        assert_eq!(payload.filename, "spending_report.csv");
        assert_eq!(payload.content_type, "text/csv");
        assert_eq!(
            String::from_utf8(payload.bytes).unwrap(),
            "Category,Amount\nfood,50\ntransport,20\n"
        );
    }

    #[test]
    fn test_csv_export_of_empty_rows_is_header_only() {
        let payload = export::csv::export(&[], "income_report").unwrap();
        assert_eq!(
            String::from_utf8(payload.bytes).unwrap(),
            "Category,Amount\n"
        );
        assert_eq!(payload.filename, "income_report.csv");
    }

    #[test]
    fn test_pdf_export_produces_valid_document() {
        let records = vec![
            record(dec!(50), TransactionKind::Expense, "food", day(2024, 1, 5)),
        ];
        let request = ReportRequest {
            kind: ReportKind::Trends,
            range: DateRange::unbounded(),
            export: Some(ExportFormat::Pdf),
        };

        let output = ReportService::generate(&request, &records, day(2024, 6, 20)).unwrap();
        let ReportOutput::Export(payload) = output else {
            panic!("expected export payload");
        };

        assert_eq!(payload.filename, "trends_report.pdf");
        assert_eq!(payload.content_type, "application/pdf");
        assert!(payload.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_export_of_empty_rows_is_title_only_page() {
        let payload = export::pdf::export(&[], "spending_report").unwrap();
        assert!(payload.bytes.starts_with(b"%PDF"));
        assert!(!payload.bytes.is_empty());
    }

    #[test]
    fn test_pdf_export_paginates_long_reports() {
        let rows: Vec<SummaryRow> = (0..200)
            .map(|i| SummaryRow {
                key: GroupKey::Category(format!("category-{i:03}")),
                total: Decimal::from(i),
            })
            .collect();

        let long = export::pdf::export(&rows, "spending_report").unwrap();
        let short = export::pdf::export(&rows[..1], "spending_report").unwrap();

        assert!(long.bytes.starts_with(b"%PDF"));
        assert!(long.bytes.len() > short.bytes.len());
    }

    #[rstest::rstest]
    #[case(ReportKind::Spending, "spending_report")]
    #[case(ReportKind::Income, "income_report")]
    #[case(ReportKind::Trends, "trends_report")]
    fn test_filenames_follow_report_kind(#[case] kind: ReportKind, #[case] expected: &str) {
        assert_eq!(kind.filename(), expected);
    }

    #[test]
    fn test_group_key_display() {
        assert_eq!(GroupKey::Category("food".to_string()).to_string(), "food");
        assert_eq!(
            GroupKey::Month {
                month: day(2024, 1, 1),
                kind: TransactionKind::Expense,
            }
            .to_string(),
            "2024-01 expense"
        );
    }
}
