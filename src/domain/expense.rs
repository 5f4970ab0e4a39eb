use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::{deserialize_some, patch_field};
use super::{Cents, Collection, Ledger, Record, RecordId, RecordKind, UserId};

/// Closed set of expense categories. Anything else is rejected on parse,
/// both from user text and from deserialized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Groceries,
    Bills,
    CreditCard,
    Misc,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Groceries,
        ExpenseCategory::Bills,
        ExpenseCategory::CreditCard,
        ExpenseCategory::Misc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Groceries => "groceries",
            ExpenseCategory::Bills => "bills",
            ExpenseCategory::CreditCard => "credit_card",
            ExpenseCategory::Misc => "misc",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Groceries => "Groceries",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::CreditCard => "Credit Card",
            ExpenseCategory::Misc => "Miscellaneous",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groceries" => Ok(ExpenseCategory::Groceries),
            "bills" => Ok(ExpenseCategory::Bills),
            "credit_card" => Ok(ExpenseCategory::CreditCard),
            "misc" => Ok(ExpenseCategory::Misc),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown expense category '{}' (expected groceries, bills, credit_card or misc)",
            self.0
        )
    }
}

impl std::error::Error for ParseCategoryError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub user_id: UserId,
    pub category: ExpenseCategory,
    pub description: Option<String>,
    /// Amount in cents
    pub amount: Cents,
    pub expense_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub user_id: UserId,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Cents,
    pub expense_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    /// `Some(None)` clears the description.
    #[serde(
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<NaiveDate>,
}

impl Record for Expense {
    type Draft = ExpenseDraft;
    type Patch = ExpensePatch;

    const KIND: RecordKind = RecordKind::Expense;

    fn from_draft(id: RecordId, created_at: DateTime<Utc>, draft: ExpenseDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            category: draft.category,
            description: draft.description,
            amount: draft.amount,
            expense_date: draft.expense_date,
            created_at,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply(&mut self, patch: ExpensePatch) {
        patch_field(&mut self.user_id, patch.user_id);
        patch_field(&mut self.category, patch.category);
        patch_field(&mut self.description, patch.description);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.expense_date, patch.expense_date);
    }

    fn collection(ledger: &Ledger) -> &Collection<Self> {
        &ledger.expenses
    }

    fn collection_mut(ledger: &mut Ledger) -> &mut Collection<Self> {
        &mut ledger.expenses
    }
}
