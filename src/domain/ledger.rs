use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{
    Cash, Cents, Collection, CreditCard, DebitCard, Expense, ExpenseCategory, IdsExhausted, Income,
    Record, RecordId, RecordNotFound, Transaction, UNKNOWN_USER, User, UserId,
};

/// The full contents of a ledger, as loaded at startup or exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSnapshot {
    pub users: Vec<User>,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub credit_cards: Vec<CreditCard>,
    pub cash: Vec<Cash>,
    pub debit_cards: Vec<DebitCard>,
}

/// In-memory household ledger: five record collections plus the user list.
///
/// Mutations stamp ids and `created_at`; all totals are recomputed from the
/// current records on every call.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    users: Vec<User>,
    pub(super) incomes: Collection<Income>,
    pub(super) expenses: Collection<Expense>,
    pub(super) credit_cards: Collection<CreditCard>,
    pub(super) cash: Collection<Cash>,
    pub(super) debit_cards: Collection<DebitCard>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger hydrated from existing data.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let mut ledger = Self::new();
        ledger.hydrate(snapshot);
        ledger
    }

    /// Replace every collection with the contents of `snapshot`.
    pub fn hydrate(&mut self, snapshot: LedgerSnapshot) {
        self.set_users(snapshot.users);
        self.set_all(snapshot.incomes);
        self.set_all(snapshot.expenses);
        self.set_all(snapshot.credit_cards);
        self.set_all(snapshot.cash);
        self.set_all(snapshot.debit_cards);
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            users: self.users.clone(),
            incomes: self.incomes.records().to_vec(),
            expenses: self.expenses.records().to_vec(),
            credit_cards: self.credit_cards.records().to_vec(),
            cash: self.cash.records().to_vec(),
            debit_cards: self.debit_cards.records().to_vec(),
        }
    }

    // ========================
    // Record operations
    // ========================

    /// Create a record from `draft` with a fresh id and `created_at = now`.
    pub fn add<R: Record>(&mut self, draft: R::Draft) -> Result<R, IdsExhausted> {
        R::collection_mut(self).insert(draft, Utc::now())
    }

    /// Replace the fields present in `patch`. Unknown ids leave the
    /// collection untouched.
    pub fn update<R: Record>(
        &mut self,
        id: RecordId,
        patch: R::Patch,
    ) -> Result<R, RecordNotFound> {
        R::collection_mut(self).update(id, patch)
    }

    /// Remove a record. Returns `None` if there was nothing to remove.
    pub fn delete<R: Record>(&mut self, id: RecordId) -> Option<R> {
        R::collection_mut(self).remove(id)
    }

    pub fn get<R: Record>(&self, id: RecordId) -> Option<&R> {
        R::collection(self).get(id)
    }

    pub fn list<R: Record>(&self) -> &[R] {
        R::collection(self).records()
    }

    pub fn set_all<R: Record>(&mut self, records: Vec<R>) {
        R::collection_mut(self).replace_all(records);
    }

    pub fn incomes(&self) -> &[Income] {
        self.incomes.records()
    }

    pub fn expenses(&self) -> &[Expense] {
        self.expenses.records()
    }

    pub fn credit_cards(&self) -> &[CreditCard] {
        self.credit_cards.records()
    }

    pub fn cash(&self) -> &[Cash] {
        self.cash.records()
    }

    pub fn debit_cards(&self) -> &[DebitCard] {
        self.debit_cards.records()
    }

    // ========================
    // Users
    // ========================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    /// Name of the user, or "Unknown" when the id is not loaded.
    pub fn user_name(&self, user_id: UserId) -> &str {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.as_str())
            .unwrap_or(UNKNOWN_USER)
    }

    // ========================
    // Aggregates
    // ========================

    pub fn total_income(&self) -> Cents {
        self.incomes().iter().map(|r| r.amount).sum()
    }

    pub fn total_expenses(&self) -> Cents {
        self.expenses().iter().map(|r| r.amount).sum()
    }

    pub fn total_credit_card_debt(&self) -> Cents {
        self.credit_cards().iter().map(|r| r.payable_amount).sum()
    }

    pub fn total_cash(&self) -> Cents {
        self.cash().iter().map(|r| r.amount).sum()
    }

    pub fn total_debit_spending(&self) -> Cents {
        self.debit_cards().iter().map(|r| r.amount).sum()
    }

    /// Balance = income - expenses - credit-card debt - debit spending.
    /// Cash is tracked separately and not netted in.
    pub fn balance(&self) -> Cents {
        self.total_income()
            - self.total_expenses()
            - self.total_credit_card_debt()
            - self.total_debit_spending()
    }

    /// Expense totals per category, in order of each category's first
    /// appearance. Categories without any expense are left out.
    pub fn expenses_by_category(&self) -> Vec<(ExpenseCategory, Cents)> {
        let mut totals: Vec<(ExpenseCategory, Cents)> = Vec::new();

        for expense in self.expenses() {
            match totals.iter_mut().find(|(category, _)| *category == expense.category) {
                Some((_, total)) => *total += expense.amount,
                None => totals.push((expense.category, expense.amount)),
            }
        }

        totals
    }

    /// Every record as a tagged transaction, newest `created_at` first.
    /// Ties keep kind order, then id.
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut all: Vec<Transaction> = self
            .incomes()
            .iter()
            .cloned()
            .map(Transaction::Income)
            .chain(self.expenses().iter().cloned().map(Transaction::Expense))
            .chain(self.credit_cards().iter().cloned().map(Transaction::CreditCard))
            .chain(self.cash().iter().cloned().map(Transaction::Cash))
            .chain(self.debit_cards().iter().cloned().map(Transaction::DebitCard))
            .collect();

        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.kind().cmp(&b.kind()))
                .then_with(|| a.id().cmp(&b.id()))
        });
        all
    }
}
