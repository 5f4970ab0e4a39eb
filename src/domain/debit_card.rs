use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::{deserialize_some, patch_field};
use super::{Cents, Collection, Ledger, Record, RecordId, RecordKind, UserId};

/// A purchase paid straight from a bank account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebitCard {
    pub id: RecordId,
    pub user_id: UserId,
    pub bank: String,
    pub card_number: String,
    /// Amount in cents
    pub amount: Cents,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebitCardDraft {
    pub user_id: UserId,
    pub bank: String,
    pub card_number: String,
    pub amount: Cents,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebitCardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Cents>,
    #[serde(
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
}

impl Record for DebitCard {
    type Draft = DebitCardDraft;
    type Patch = DebitCardPatch;

    const KIND: RecordKind = RecordKind::DebitCard;

    fn from_draft(id: RecordId, created_at: DateTime<Utc>, draft: DebitCardDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            bank: draft.bank,
            card_number: draft.card_number,
            amount: draft.amount,
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

    fn apply(&mut self, patch: DebitCardPatch) {
        patch_field(&mut self.user_id, patch.user_id);
        patch_field(&mut self.bank, patch.bank);
        patch_field(&mut self.card_number, patch.card_number);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.description, patch.description);
        patch_field(&mut self.transaction_date, patch.transaction_date);
    }

    fn collection(ledger: &Ledger) -> &Collection<Self> {
        &ledger.debit_cards
    }

    fn collection_mut(ledger: &mut Ledger) -> &mut Collection<Self> {
        &mut ledger.debit_cards
    }
}
