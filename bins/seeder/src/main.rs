//! Database seeder for Moneta development and testing.
//!
//! Creates a demo user with fourteen months of transaction history and a
//! few budgets, so every report kind (including the trailing-months trend
//! window) has data to show. Prints a ready-to-use bearer token when
//! `MONETA__JWT__SECRET` is set.

use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use moneta_db::connect;
use moneta_db::entities::kinds::{BudgetPeriod, TransactionKind};
use moneta_db::repositories::{
    BudgetRepository, CreateBudgetInput, CreateTransactionInput, TransactionRepository,
    UserRepository,
};

const DEMO_EMAIL: &str = "demo@moneta.dev";

/// Monthly expenses seeded for every month of history: (category, cents, day).
const MONTHLY_EXPENSES: &[(&str, i64, u32)] = &[
    ("rent", 95_000, 2),
    ("food", 32_050, 8),
    ("transport", 8_420, 12),
    ("entertainment", 6_000, 18),
    ("shopping", 14_599, 21),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("MONETA__DATABASE__URL"))
        .expect("DATABASE_URL or MONETA__DATABASE__URL must be set");
    let db = connect(&database_url, 5).await?;

    let users = UserRepository::new(db.clone());
    let transactions = TransactionRepository::new(db.clone());
    let budgets = BudgetRepository::new(db.clone());

    if let Some(existing) = users.find_by_email(DEMO_EMAIL).await? {
        println!("Demo user {DEMO_EMAIL} already exists ({}), skipping seed", existing.id);
        print_demo_token(existing.id);
        return Ok(());
    }

    let user = users.create(DEMO_EMAIL, "Demo User").await?;
    println!("Created demo user {DEMO_EMAIL} ({})", user.id);

    let today = Utc::now().date_naive();

    // Fourteen months of history: one month more than the trend window, so
    // the window's lower bound is visible in seeded data.
    let mut seeded = 0u32;
    for months_ago in 0..14u32 {
        let month = today
            .checked_sub_months(Months::new(months_ago))
            .unwrap_or(today);

        transactions
            .create(CreateTransactionInput {
                user_id: user.id,
                amount: Decimal::new(260_000, 2),
                kind: TransactionKind::Income,
                category: "salary".to_string(),
                description: "Monthly salary".to_string(),
                date: day_of(month, 1),
            })
            .await?;
        seeded += 1;

        for &(category, cents, day) in MONTHLY_EXPENSES {
            transactions
                .create(CreateTransactionInput {
                    user_id: user.id,
                    amount: Decimal::new(cents, 2),
                    kind: TransactionKind::Expense,
                    category: category.to_string(),
                    description: String::new(),
                    date: day_of(month, day),
                })
                .await?;
            seeded += 1;
        }
    }
    println!("Seeded {seeded} transactions");

    let month_start = day_of(today, 1);
    let month_end = end_of_month(today);
    for (category, cents, period) in [
        ("food", 40_000, BudgetPeriod::Monthly),
        ("transport", 12_000, BudgetPeriod::Monthly),
        ("entertainment", 30_000, BudgetPeriod::Quarterly),
    ] {
        budgets
            .create(CreateBudgetInput {
                user_id: user.id,
                category: category.to_string(),
                period,
                amount: Decimal::new(cents, 2),
                start_date: month_start,
                end_date: month_end,
            })
            .await?;
    }
    println!("Seeded 3 budgets");

    print_demo_token(user.id);
    Ok(())
}

fn day_of(month: NaiveDate, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(month.year(), month.month(), day).unwrap_or(month)
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    let next_month = day_of(date, 1)
        .checked_add_months(Months::new(1))
        .unwrap_or(date);
    next_month.pred_opt().unwrap_or(date)
}

fn print_demo_token(user_id: uuid::Uuid) {
    if let Ok(secret) = std::env::var("MONETA__JWT__SECRET") {
        let service = moneta_shared::JwtService::new(moneta_shared::JwtConfig {
            secret,
            access_token_expires_minutes: 60,
        });
        match service.generate_access_token(user_id) {
            Ok(token) => println!("Demo bearer token (valid 60 minutes):\n{token}"),
            Err(e) => eprintln!("Failed to generate demo token: {e}"),
        }
    }
}
