use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    Cash, CreditCard, DebitCard, Expense, Income, Record, RecordId, RecordKind, User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationOp {
    Created,
    Updated,
    Deleted,
}

/// A ledger change to be mirrored into a durable store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation {
    pub op: MutationOp,
    pub kind: RecordKind,
    pub id: RecordId,
    /// The full record for `Created`, the patch for `Updated`, null for `Deleted`.
    pub payload: serde_json::Value,
}

impl Mutation {
    pub fn created<R: Record>(record: &R) -> Result<Self> {
        Ok(Self {
            op: MutationOp::Created,
            kind: R::KIND,
            id: record.id(),
            payload: serde_json::to_value(record).context("Failed to encode created record")?,
        })
    }

    pub fn updated<R: Record>(id: RecordId, patch: &R::Patch) -> Result<Self> {
        Ok(Self {
            op: MutationOp::Updated,
            kind: R::KIND,
            id,
            payload: serde_json::to_value(patch).context("Failed to encode record patch")?,
        })
    }

    pub fn deleted<R: Record>(id: RecordId) -> Self {
        Self {
            op: MutationOp::Deleted,
            kind: R::KIND,
            id,
            payload: serde_json::Value::Null,
        }
    }
}

/// Source of the ledger's initial data and sink for its changes.
///
/// The ledger never talks to storage itself: the service fetches all six
/// collections at startup and mirrors each mutation through `persist`.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>>;
    async fn fetch_incomes(&self) -> Result<Vec<Income>>;
    async fn fetch_expenses(&self) -> Result<Vec<Expense>>;
    async fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>>;
    async fn fetch_cash(&self) -> Result<Vec<Cash>>;
    async fn fetch_debit_cards(&self) -> Result<Vec<DebitCard>>;

    async fn persist(&self, mutation: &Mutation) -> Result<()>;
}
