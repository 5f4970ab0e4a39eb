mod common;

use common::{RecordingProvider, cash, credit_card, date, expense, income, test_service};
use household_ledger::application::{AppError, HouseholdService};
use chrono::Utc;
use household_ledger::domain::{
    Cash, CreditCard, Expense, ExpenseCategory, ExpensePatch, IdsExhausted, Income, IncomePatch,
    LedgerSnapshot, RecordKind,
};
use household_ledger::io::Exporter;
use household_ledger::storage::{MutationOp, SnapshotProvider};
use tempfile::TempDir;

#[tokio::test]
async fn test_bootstrap_from_sample_household() -> anyhow::Result<()> {
    let service = HouseholdService::bootstrap(SnapshotProvider::fixture()?).await?;
    let summary = service.summary();

    assert_eq!(service.ledger().users().len(), 2);
    assert_eq!(summary.total_income, 10_000_000);
    assert_eq!(summary.total_expenses, 1_400_000);
    assert_eq!(summary.total_credit_card_debt, 3_500_000);
    assert_eq!(summary.total_cash, 850_000);
    assert_eq!(summary.total_debit_spending, 750_000);
    assert_eq!(summary.balance, 4_350_000);

    let labels: Vec<&str> = summary
        .expense_categories
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Groceries", "Bills", "Miscellaneous"]);

    Ok(())
}

#[tokio::test]
async fn test_bootstrap_fails_when_a_fetch_fails() -> anyhow::Result<()> {
    let result = HouseholdService::bootstrap(RecordingProvider::failing()).await;

    match result {
        Err(AppError::Provider(err)) => {
            assert!(err.to_string().contains("expenses table unavailable"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("bootstrap should fail"),
    }

    Ok(())
}

#[tokio::test]
async fn test_new_ids_continue_after_loaded_records() -> anyhow::Result<()> {
    let mut service = HouseholdService::bootstrap(SnapshotProvider::fixture()?).await?;

    let added = service
        .add::<Income>(income(1, 100_000, "Freelance", "2025-01-20"))
        .await?;

    assert_eq!(added.id, 4);
    assert_eq!(service.ledger().total_income(), 10_100_000);

    Ok(())
}

#[tokio::test]
async fn test_add_is_mirrored_to_provider() -> anyhow::Result<()> {
    let mut service = test_service().await?;

    let added = service
        .add::<Expense>(expense(2, ExpenseCategory::Groceries, 500_000, "2025-01-03"))
        .await?;

    let mutations = service.provider().mutations();
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].op, MutationOp::Created);
    assert_eq!(mutations[0].kind, RecordKind::Expense);
    assert_eq!(mutations[0].id, added.id);
    assert_eq!(mutations[0].payload["amount"], 500_000);
    assert_eq!(mutations[0].payload["category"], "groceries");

    Ok(())
}

#[tokio::test]
async fn test_update_is_mirrored_with_patch_only() -> anyhow::Result<()> {
    let mut service = test_service().await?;
    let added = service
        .add::<Income>(income(1, 5_000_000, "Salary", "2025-01-01"))
        .await?;

    let updated = service
        .update::<Income>(
            added.id,
            IncomePatch {
                amount: Some(5_500_000),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.amount, 5_500_000);
    assert_eq!(updated.source, "Salary");
    assert_eq!(updated.created_at, added.created_at);

    let mutations = service.provider().mutations();
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[1].op, MutationOp::Updated);
    assert_eq!(mutations[1].payload, serde_json::json!({ "amount": 5_500_000 }));

    Ok(())
}

#[tokio::test]
async fn test_update_unknown_id_is_not_persisted() -> anyhow::Result<()> {
    let mut service = test_service().await?;
    service
        .add::<Expense>(expense(1, ExpenseCategory::Bills, 300_000, "2025-01-05"))
        .await?;

    let result = service
        .update::<Expense>(
            99,
            ExpensePatch {
                amount: Some(1),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::RecordNotFound {
            kind: RecordKind::Expense,
            id: 99
        })
    ));
    assert_eq!(service.ledger().total_expenses(), 300_000);
    assert_eq!(service.provider().mutations().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_delete_twice() -> anyhow::Result<()> {
    let mut service = test_service().await?;
    let added = service
        .add::<Cash>(cash(1, 500_000, "ATM withdrawal", "2025-01-02"))
        .await?;

    let first = service.delete::<Cash>(added.id).await?;
    let second = service.delete::<Cash>(added.id).await?;

    assert_eq!(first.map(|c| c.id), Some(added.id));
    assert!(second.is_none());
    assert_eq!(service.ledger().total_cash(), 0);

    let deletes: Vec<_> = service
        .provider()
        .mutations()
        .into_iter()
        .filter(|m| m.op == MutationOp::Deleted)
        .collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].payload, serde_json::Value::Null);

    Ok(())
}

#[tokio::test]
async fn test_transaction_rows_resolve_users_and_flag_overdue() -> anyhow::Result<()> {
    let mut service = test_service().await?;
    service
        .add::<CreditCard>(credit_card(1, 1_200_000, "2025-01-01", "2025-01-25"))
        .await?;
    service
        .add::<Income>(income(42, 100_000, "Gift", "2025-01-10"))
        .await?;

    let rows = service.transactions(None, date("2025-02-01"));
    assert_eq!(rows.len(), 2);

    let card = rows.iter().find(|r| r.kind == RecordKind::CreditCard).unwrap();
    assert_eq!(card.user, "Romel Rey");
    assert!(card.overdue);

    let gift = rows.iter().find(|r| r.kind == RecordKind::Income).unwrap();
    assert_eq!(gift.user, "Unknown");
    assert!(!gift.overdue);

    let before_due = service.transactions(Some(RecordKind::CreditCard), date("2025-01-25"));
    assert_eq!(before_due.len(), 1);
    assert!(!before_due[0].overdue);

    Ok(())
}

#[tokio::test]
async fn test_snapshot_file_round_trip() -> anyhow::Result<()> {
    let mut service = test_service().await?;
    service
        .add::<Income>(income(1, 5_000_000, "Salary", "2025-01-01"))
        .await?;
    service
        .add::<Expense>(expense(2, ExpenseCategory::Misc, 150_000, "2025-01-06"))
        .await?;

    let dir = TempDir::new()?;
    let path = dir.path().join("household.json");
    let file = std::fs::File::create(&path)?;
    Exporter::new(service.ledger()).export_snapshot_json(file)?;

    let provider = SnapshotProvider::load(&path).await?;
    assert_eq!(provider.origin(), path.display().to_string());

    let reloaded = HouseholdService::bootstrap(provider).await?;
    assert_eq!(reloaded.ledger().snapshot(), service.ledger().snapshot());
    assert_eq!(reloaded.summary(), service.summary());

    Ok(())
}

#[tokio::test]
async fn test_load_missing_snapshot_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let result = SnapshotProvider::load(dir.path().join("nope.json")).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read snapshot file"));

    Ok(())
}

#[tokio::test]
async fn test_loaded_max_id_blocks_new_records_of_that_kind() -> anyhow::Result<()> {
    let snapshot = LedgerSnapshot {
        incomes: vec![Income {
            id: u64::MAX,
            user_id: 1,
            amount: 5_000_000,
            source: "Salary".into(),
            received_at: date("2025-01-01"),
            created_at: Utc::now(),
        }],
        ..Default::default()
    };
    let provider = RecordingProvider::with_snapshot(snapshot);
    let mut service = HouseholdService::bootstrap(provider).await?;

    let result = service
        .add::<Income>(income(1, 100_000, "Bonus", "2025-01-15"))
        .await;
    assert!(matches!(
        result,
        Err(AppError::IdsExhausted(IdsExhausted {
            kind: RecordKind::Income
        }))
    ));
    assert_eq!(service.ledger().total_income(), 5_000_000);
    assert!(service.provider().mutations().is_empty());

    // Other kinds keep their own counters
    let bill = service
        .add::<Expense>(expense(1, ExpenseCategory::Bills, 300_000, "2025-01-05"))
        .await?;
    assert_eq!(bill.id, 1);

    Ok(())
}

#[tokio::test]
async fn test_single_kind_lists_use_their_own_order() -> anyhow::Result<()> {
    let service = HouseholdService::bootstrap(SnapshotProvider::fixture()?).await?;
    let today = date("2025-01-26");

    let due_dates: Vec<_> = service
        .transactions(Some(RecordKind::CreditCard), today)
        .iter()
        .map(|row| row.date)
        .collect();
    assert_eq!(
        due_dates,
        vec![date("2025-01-25"), date("2025-01-28"), date("2025-02-05")]
    );

    let income_ids: Vec<_> = service
        .transactions(Some(RecordKind::Income), today)
        .iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(income_ids, vec![3, 1, 2]);

    let expense_dates: Vec<_> = service
        .transactions(Some(RecordKind::Expense), today)
        .iter()
        .map(|row| row.date)
        .collect();
    assert_eq!(expense_dates[0], date("2025-01-10"));
    assert_eq!(expense_dates[4], date("2025-01-03"));

    // Cash keeps created_at order: ids 3 (Jan 3), 1 (Jan 2), 2 (Jan 1)
    let cash_ids: Vec<_> = service
        .transactions(Some(RecordKind::Cash), today)
        .iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(cash_ids, vec![3, 1, 2]);

    Ok(())
}
