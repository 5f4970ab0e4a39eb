use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Cents, Direction, ExpenseCategory, Ledger, RecordId, RecordKind, Transaction,
};

/// Headline figures for the household, as shown on an overview screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: Cents,
    pub total_expenses: Cents,
    pub total_credit_card_debt: Cents,
    pub total_cash: Cents,
    pub total_debit_spending: Cents,
    pub balance: Cents,
    pub expense_categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: ExpenseCategory,
    pub label: String,
    pub total: Cents,
    /// Share of total expenses, 0-100
    pub percentage: f64,
}

impl FinancialSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let total_expenses = ledger.total_expenses();

        let expense_categories = ledger
            .expenses_by_category()
            .into_iter()
            .map(|(category, total)| CategorySummary {
                category,
                label: category.label().to_string(),
                total,
                percentage: percentage_of(total, total_expenses),
            })
            .collect();

        Self {
            total_income: ledger.total_income(),
            total_expenses,
            total_credit_card_debt: ledger.total_credit_card_debt(),
            total_cash: ledger.total_cash(),
            total_debit_spending: ledger.total_debit_spending(),
            balance: ledger.balance(),
            expense_categories,
        }
    }
}

fn percentage_of(part: Cents, whole: Cents) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// One line of the merged transaction list, with the user resolved to a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub kind: RecordKind,
    pub id: RecordId,
    pub user: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: Cents,
    pub direction: Direction,
    /// Only ever true for credit-card charges past their due date
    pub overdue: bool,
}

impl TransactionRow {
    pub fn new(transaction: &Transaction, ledger: &Ledger, today: NaiveDate) -> Self {
        let overdue = match transaction {
            Transaction::CreditCard(card) => card.is_overdue(today),
            _ => false,
        };

        Self {
            kind: transaction.kind(),
            id: transaction.id(),
            user: ledger.user_name(transaction.user_id()).to_string(),
            date: transaction.date(),
            title: transaction.title(),
            description: transaction.description().map(str::to_string),
            amount_cents: transaction.amount(),
            direction: transaction.direction(),
            overdue,
        }
    }
}

/// Rows for the merged list, or for a single kind.
///
/// The merged list is newest `created_at` first. A single kind is ordered the
/// way its own list reads: incomes and expenses by their date, newest first;
/// credit-card charges by due date, soonest first; cash and debit-card
/// entries keep the `created_at` order. Ties keep `created_at` order.
pub fn transaction_rows(
    ledger: &Ledger,
    kind: Option<RecordKind>,
    today: NaiveDate,
) -> Vec<TransactionRow> {
    let mut rows: Vec<TransactionRow> = ledger
        .transactions()
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind() == k))
        .map(|t| TransactionRow::new(t, ledger, today))
        .collect();

    match kind {
        Some(RecordKind::Income | RecordKind::Expense) => {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
        }
        Some(RecordKind::CreditCard) => rows.sort_by_key(|row| row.date),
        Some(RecordKind::Cash | RecordKind::DebitCard) | None => {}
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CreditCard, CreditCardDraft, Expense, ExpenseDraft, Income, IncomeDraft,
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn dates(rows: &[TransactionRow]) -> Vec<NaiveDate> {
        rows.iter().map(|row| row.date).collect()
    }

    #[test]
    fn test_credit_cards_soonest_due_first() {
        let mut ledger = Ledger::new();
        for due in [NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), day(5)] {
            ledger
                .add::<CreditCard>(CreditCardDraft {
                    user_id: 1,
                    bank: "BPI".into(),
                    card_number: "****-****-****-1234".into(),
                    swipe_date: day(1),
                    due_date: due,
                    payable_amount: 100_000,
                })
                .unwrap();
        }

        let rows = transaction_rows(&ledger, Some(RecordKind::CreditCard), day(10));
        assert_eq!(
            dates(&rows),
            vec![day(5), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()]
        );
        assert!(rows[0].overdue);
        assert!(!rows[1].overdue);
    }

    #[test]
    fn test_incomes_and_expenses_newest_date_first() {
        let mut ledger = Ledger::new();
        for received_at in [day(15), day(1), day(20)] {
            ledger
                .add::<Income>(IncomeDraft {
                    user_id: 1,
                    amount: 100,
                    source: "Salary".into(),
                    received_at,
                })
                .unwrap();
        }
        for expense_date in [day(3), day(8)] {
            ledger
                .add::<Expense>(ExpenseDraft {
                    user_id: 1,
                    category: ExpenseCategory::Bills,
                    description: None,
                    amount: 100,
                    expense_date,
                })
                .unwrap();
        }

        let incomes = transaction_rows(&ledger, Some(RecordKind::Income), day(31));
        assert_eq!(dates(&incomes), vec![day(20), day(15), day(1)]);

        let expenses = transaction_rows(&ledger, Some(RecordKind::Expense), day(31));
        assert_eq!(dates(&expenses), vec![day(8), day(3)]);

        let all = transaction_rows(&ledger, None, day(31));
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_percentages_with_no_expenses() {
        let summary = FinancialSummary::from_ledger(&Ledger::new());
        assert!(summary.expense_categories.is_empty());
        assert_eq!(summary.balance, 0);
    }

    #[test]
    fn test_category_percentages() {
        let mut ledger = Ledger::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        for (category, amount) in [
            (ExpenseCategory::Groceries, 7500),
            (ExpenseCategory::Bills, 2500),
        ] {
            ledger
                .add::<Expense>(ExpenseDraft {
                    user_id: 1,
                    category,
                    description: None,
                    amount,
                    expense_date: date,
                })
                .unwrap();
        }

        let summary = FinancialSummary::from_ledger(&ledger);
        assert_eq!(summary.expense_categories.len(), 2);
        assert_eq!(summary.expense_categories[0].label, "Groceries");
        assert!((summary.expense_categories[0].percentage - 75.0).abs() < f64::EPSILON);
        assert!((summary.expense_categories[1].percentage - 25.0).abs() < f64::EPSILON);
    }
}
