use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{Cash, Cents, CreditCard, DebitCard, Expense, Income, RecordId, RecordKind, UserId};

/// How a transaction moves the household's money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money received (income, cash on hand)
    Inflow,
    /// Money spent (expenses, debit-card purchases)
    Outflow,
    /// Money owed but not yet paid (credit-card charges)
    Owed,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inflow => "inflow",
            Direction::Outflow => "outflow",
            Direction::Owed => "owed",
        }
    }
}

/// Any ledger record, tagged with its kind. Used for the merged
/// "all transactions" view so consumers match on the tag instead of
/// guessing the kind from which fields happen to be present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transaction {
    Income(Income),
    Expense(Expense),
    CreditCard(CreditCard),
    Cash(Cash),
    DebitCard(DebitCard),
}

impl Transaction {
    pub fn kind(&self) -> RecordKind {
        match self {
            Transaction::Income(_) => RecordKind::Income,
            Transaction::Expense(_) => RecordKind::Expense,
            Transaction::CreditCard(_) => RecordKind::CreditCard,
            Transaction::Cash(_) => RecordKind::Cash,
            Transaction::DebitCard(_) => RecordKind::DebitCard,
        }
    }

    pub fn id(&self) -> RecordId {
        match self {
            Transaction::Income(r) => r.id,
            Transaction::Expense(r) => r.id,
            Transaction::CreditCard(r) => r.id,
            Transaction::Cash(r) => r.id,
            Transaction::DebitCard(r) => r.id,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Transaction::Income(r) => r.user_id,
            Transaction::Expense(r) => r.user_id,
            Transaction::CreditCard(r) => r.user_id,
            Transaction::Cash(r) => r.user_id,
            Transaction::DebitCard(r) => r.user_id,
        }
    }

    /// Amount in cents; the payable amount for credit-card charges.
    pub fn amount(&self) -> Cents {
        match self {
            Transaction::Income(r) => r.amount,
            Transaction::Expense(r) => r.amount,
            Transaction::CreditCard(r) => r.payable_amount,
            Transaction::Cash(r) => r.amount,
            Transaction::DebitCard(r) => r.amount,
        }
    }

    /// The calendar date shown for the entry (due date for credit cards).
    pub fn date(&self) -> NaiveDate {
        match self {
            Transaction::Income(r) => r.received_at,
            Transaction::Expense(r) => r.expense_date,
            Transaction::CreditCard(r) => r.due_date,
            Transaction::Cash(r) => r.transaction_date,
            Transaction::DebitCard(r) => r.transaction_date,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Transaction::Income(r) => r.created_at,
            Transaction::Expense(r) => r.created_at,
            Transaction::CreditCard(r) => r.created_at,
            Transaction::Cash(r) => r.created_at,
            Transaction::DebitCard(r) => r.created_at,
        }
    }

    /// Short headline: the source, category label, or bank and card.
    pub fn title(&self) -> String {
        match self {
            Transaction::Income(r) => r.source.clone(),
            Transaction::Expense(r) => r.category.label().to_string(),
            Transaction::CreditCard(r) => format!("{} {}", r.bank, r.card_number),
            Transaction::Cash(r) => r.source.clone(),
            Transaction::DebitCard(r) => format!("{} {}", r.bank, r.card_number),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Transaction::Income(_) | Transaction::CreditCard(_) => None,
            Transaction::Expense(r) => r.description.as_deref(),
            Transaction::Cash(r) => r.description.as_deref(),
            Transaction::DebitCard(r) => r.description.as_deref(),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Transaction::Income(_) | Transaction::Cash(_) => Direction::Inflow,
            Transaction::Expense(_) | Transaction::DebitCard(_) => Direction::Outflow,
            Transaction::CreditCard(_) => Direction::Owed,
        }
    }
}
