use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::patch_field;
use super::{Cents, Collection, Ledger, Record, RecordId, RecordKind, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: RecordId,
    pub user_id: UserId,
    /// Amount in cents
    pub amount: Cents,
    /// Free text, e.g. "Salary" or "Bonus"
    pub source: String,
    pub received_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeDraft {
    pub user_id: UserId,
    pub amount: Cents,
    pub source: String,
    pub received_at: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<NaiveDate>,
}

impl Record for Income {
    type Draft = IncomeDraft;
    type Patch = IncomePatch;

    const KIND: RecordKind = RecordKind::Income;

    fn from_draft(id: RecordId, created_at: DateTime<Utc>, draft: IncomeDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            amount: draft.amount,
            source: draft.source,
            received_at: draft.received_at,
            created_at,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply(&mut self, patch: IncomePatch) {
        patch_field(&mut self.user_id, patch.user_id);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.source, patch.source);
        patch_field(&mut self.received_at, patch.received_at);
    }

    fn collection(ledger: &Ledger) -> &Collection<Self> {
        &ledger.incomes
    }

    fn collection_mut(ledger: &mut Ledger) -> &mut Collection<Self> {
        &mut ledger.incomes
    }
}
