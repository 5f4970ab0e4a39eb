use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Ledger;

/// Identifier assigned by the ledger. Unique within one collection only.
pub type RecordId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Income,
    Expense,
    CreditCard,
    Cash,
    DebitCard,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Income,
        RecordKind::Expense,
        RecordKind::CreditCard,
        RecordKind::Cash,
        RecordKind::DebitCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
            RecordKind::CreditCard => "credit_card",
            RecordKind::Cash => "cash",
            RecordKind::DebitCard => "debit_card",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown record kind '{}' (expected income, expense, credit_card, cash or debit_card)",
            self.0
        )
    }
}

impl std::error::Error for ParseKindError {}

/// Returned when an update targets an id that is not in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordNotFound {
    pub kind: RecordKind,
    pub id: RecordId,
}

impl fmt::Display for RecordNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} not found", self.kind, self.id)
    }
}

impl std::error::Error for RecordNotFound {}

/// Returned by `add` once a collection has handed out id `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdsExhausted {
    pub kind: RecordKind,
}

impl fmt::Display for IdsExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no {} ids left to assign", self.kind)
    }
}

impl std::error::Error for IdsExhausted {}

/// A ledger record kind.
///
/// `Draft` is the caller-supplied payload for `add` (no id, no `created_at`).
/// `Patch` carries only the fields an `update` should replace; it has no way
/// to express a new id or `created_at`, so both survive every update.
pub trait Record: Clone + Serialize {
    type Draft;
    type Patch: Serialize;

    const KIND: RecordKind;

    fn from_draft(id: RecordId, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;
    fn id(&self) -> RecordId;
    fn created_at(&self) -> DateTime<Utc>;
    fn apply(&mut self, patch: Self::Patch);

    fn collection(ledger: &Ledger) -> &Collection<Self>;
    fn collection_mut(ledger: &mut Ledger) -> &mut Collection<Self>;
}

/// Insertion-ordered records of one kind plus the id counter for that kind.
/// The counter is `None` once every id up to `u64::MAX` has been used.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
    next_id: Option<RecordId>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: Some(1),
        }
    }
}

impl<R: Record> Collection<R> {
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Stamp and append a new record. Ids come from a counter that only moves
    /// forward, so two inserts in the same clock tick never collide.
    pub fn insert(
        &mut self,
        draft: R::Draft,
        created_at: DateTime<Utc>,
    ) -> Result<R, IdsExhausted> {
        let id = self.next_id.ok_or(IdsExhausted { kind: R::KIND })?;
        self.next_id = id.checked_add(1);

        let record = R::from_draft(id, created_at, draft);
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn update(&mut self, id: RecordId, patch: R::Patch) -> Result<R, RecordNotFound> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(RecordNotFound { kind: R::KIND, id })?;
        record.apply(patch);
        Ok(record.clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<R> {
        let position = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(position))
    }

    /// Replace every record. The counter is moved past the highest loaded id
    /// and never backwards, so ids handed out earlier are not reissued.
    pub fn replace_all(&mut self, records: Vec<R>) {
        let after_loaded = match records.iter().map(R::id).max() {
            Some(highest) => highest.checked_add(1),
            None => Some(1),
        };
        self.next_id = match (self.next_id, after_loaded) {
            (Some(current), Some(after_loaded)) => Some(current.max(after_loaded)),
            _ => None,
        };
        self.records = records;
    }
}

/// Replace `slot` when the patch carries a value.
pub(crate) fn patch_field<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Lets a patch tell "field absent" (`None`) apart from "field set to null"
/// (`Some(None)`) for optional attributes such as descriptions.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
