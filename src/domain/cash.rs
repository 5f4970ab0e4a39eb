use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::{deserialize_some, patch_field};
use super::{Cents, Collection, Ledger, Record, RecordId, RecordKind, UserId};

/// Sources the CLI accepts for new cash entries. The stored field is free
/// text, so loaded data with other values is kept as-is.
pub const CASH_SOURCES: [&str; 4] = ["withdrawal", "salary_cash", "change", "other"];

/// Cash on hand entering the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cash {
    pub id: RecordId,
    pub user_id: UserId,
    /// Amount in cents
    pub amount: Cents,
    pub source: String,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashDraft {
    pub user_id: UserId,
    pub amount: Cents,
    pub source: String,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
}

impl Record for Cash {
    type Draft = CashDraft;
    type Patch = CashPatch;

    const KIND: RecordKind = RecordKind::Cash;

    fn from_draft(id: RecordId, created_at: DateTime<Utc>, draft: CashDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            amount: draft.amount,
            source: draft.source,
            description: draft.description,
            transaction_date: draft.transaction_date,
            created_at,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply(&mut self, patch: CashPatch) {
        patch_field(&mut self.user_id, patch.user_id);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.source, patch.source);
        patch_field(&mut self.description, patch.description);
        patch_field(&mut self.transaction_date, patch.transaction_date);
    }

    fn collection(ledger: &Ledger) -> &Collection<Self> {
        &ledger.cash
    }

    fn collection_mut(ledger: &mut Ledger) -> &mut Collection<Self> {
        &mut ledger.cash
    }
}
