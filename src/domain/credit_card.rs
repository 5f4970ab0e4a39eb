use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::patch_field;
use super::{Cents, Collection, Ledger, Record, RecordId, RecordKind, UserId};

/// A credit-card charge still to be paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: RecordId,
    pub user_id: UserId,
    pub bank: String,
    /// Masked display string, e.g. "****-****-****-1234"
    pub card_number: String,
    pub swipe_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Amount owed in cents
    pub payable_amount: Cents,
    pub created_at: DateTime<Utc>,
}

impl CreditCard {
    /// True once the due date is strictly in the past.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }

    /// A charge should not fall due before it was swiped. Not enforced on
    /// write; reports can use this to flag suspicious entries.
    pub fn has_valid_dates(&self) -> bool {
        self.due_date >= self.swipe_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardDraft {
    pub user_id: UserId,
    pub bank: String,
    pub card_number: String,
    pub swipe_date: NaiveDate,
    pub due_date: NaiveDate,
    pub payable_amount: Cents,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditCardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payable_amount: Option<Cents>,
}

impl Record for CreditCard {
    type Draft = CreditCardDraft;
    type Patch = CreditCardPatch;

    const KIND: RecordKind = RecordKind::CreditCard;

    fn from_draft(id: RecordId, created_at: DateTime<Utc>, draft: CreditCardDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            bank: draft.bank,
            card_number: draft.card_number,
            swipe_date: draft.swipe_date,
            due_date: draft.due_date,
            payable_amount: draft.payable_amount,
            created_at,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply(&mut self, patch: CreditCardPatch) {
        patch_field(&mut self.user_id, patch.user_id);
        patch_field(&mut self.bank, patch.bank);
        patch_field(&mut self.card_number, patch.card_number);
        patch_field(&mut self.swipe_date, patch.swipe_date);
        patch_field(&mut self.due_date, patch.due_date);
        patch_field(&mut self.payable_amount, patch.payable_amount);
    }

    fn collection(ledger: &Ledger) -> &Collection<Self> {
        &ledger.credit_cards
    }

    fn collection_mut(ledger: &mut Ledger) -> &mut Collection<Self> {
        &mut ledger.credit_cards
    }
}
