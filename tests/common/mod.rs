// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use household_ledger::application::HouseholdService;
use household_ledger::domain::{
    Cash, CashDraft, Cents, CreditCard, CreditCardDraft, DebitCard, DebitCardDraft, Expense,
    ExpenseCategory, ExpenseDraft, Income, IncomeDraft, LedgerSnapshot, User, UserId,
};
use household_ledger::storage::{DataProvider, Mutation};

/// Helper to parse a YYYY-MM-DD string
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Provider that serves a fixed snapshot and records every mirrored mutation.
#[derive(Default)]
pub struct RecordingProvider {
    snapshot: LedgerSnapshot,
    fail_fetch: bool,
    mutations: Mutex<Vec<Mutation>>,
}

impl RecordingProvider {
    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    /// Provider whose expense fetch fails.
    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Default::default()
        }
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataProvider for RecordingProvider {
    async fn fetch_users(&self) -> Result<Vec<User>> {
        Ok(self.snapshot.users.clone())
    }

    async fn fetch_incomes(&self) -> Result<Vec<Income>> {
        Ok(self.snapshot.incomes.clone())
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>> {
        if self.fail_fetch {
            anyhow::bail!("expenses table unavailable");
        }
        Ok(self.snapshot.expenses.clone())
    }

    async fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>> {
        Ok(self.snapshot.credit_cards.clone())
    }

    async fn fetch_cash(&self) -> Result<Vec<Cash>> {
        Ok(self.snapshot.cash.clone())
    }

    async fn fetch_debit_cards(&self) -> Result<Vec<DebitCard>> {
        Ok(self.snapshot.debit_cards.clone())
    }

    async fn persist(&self, mutation: &Mutation) -> Result<()> {
        self.mutations.lock().unwrap().push(mutation.clone());
        Ok(())
    }
}

/// Helper to create a service over an empty household with two users
pub async fn test_service() -> Result<HouseholdService<RecordingProvider>> {
    let snapshot = LedgerSnapshot {
        users: vec![
            User::new(1, "Romel Rey", "romel@example.com"),
            User::new(2, "Joy Silva", "joy@example.com"),
        ],
        ..Default::default()
    };
    Ok(HouseholdService::bootstrap(RecordingProvider::with_snapshot(snapshot)).await?)
}

pub fn income(user_id: UserId, amount: Cents, source: &str, received_at: &str) -> IncomeDraft {
    IncomeDraft {
        user_id,
        amount,
        source: source.into(),
        received_at: date(received_at),
    }
}

pub fn expense(
    user_id: UserId,
    category: ExpenseCategory,
    amount: Cents,
    expense_date: &str,
) -> ExpenseDraft {
    ExpenseDraft {
        user_id,
        category,
        description: None,
        amount,
        expense_date: date(expense_date),
    }
}

pub fn credit_card(user_id: UserId, payable_amount: Cents, swipe: &str, due: &str) -> CreditCardDraft {
    CreditCardDraft {
        user_id,
        bank: "BPI".into(),
        card_number: "****-****-****-1234".into(),
        swipe_date: date(swipe),
        due_date: date(due),
        payable_amount,
    }
}

pub fn cash(user_id: UserId, amount: Cents, source: &str, transaction_date: &str) -> CashDraft {
    CashDraft {
        user_id,
        amount,
        source: source.into(),
        description: None,
        transaction_date: date(transaction_date),
    }
}

pub fn debit_card(user_id: UserId, amount: Cents, transaction_date: &str) -> DebitCardDraft {
    DebitCardDraft {
        user_id,
        bank: "BDO".into(),
        card_number: "****-****-****-1111".into(),
        amount,
        description: None,
        transaction_date: date(transaction_date),
    }
}
