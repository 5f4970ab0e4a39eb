use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};

use crate::domain::{Cash, CreditCard, DebitCard, Expense, Income, LedgerSnapshot, User};

use super::{DataProvider, Mutation};

/// Sample household shipped with the binary.
pub const FIXTURE_HOUSEHOLD: &str = include_str!("fixtures/household.json");

/// Read-only provider backed by an in-memory snapshot.
///
/// Data comes either from the bundled fixture or from a JSON file in the
/// same shape. Mutations are logged and acknowledged but never written back.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    origin: String,
    snapshot: LedgerSnapshot,
}

impl SnapshotProvider {
    pub fn new(origin: impl Into<String>, snapshot: LedgerSnapshot) -> Self {
        Self {
            origin: origin.into(),
            snapshot,
        }
    }

    /// Provider serving the bundled sample household.
    pub fn fixture() -> Result<Self> {
        let snapshot = parse_snapshot(FIXTURE_HOUSEHOLD).context("Invalid bundled fixture")?;
        Ok(Self::new("fixture", snapshot))
    }

    /// Provider serving the snapshot stored in a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
        let snapshot = parse_snapshot(&contents)
            .with_context(|| format!("Invalid snapshot file: {}", path.display()))?;
        Ok(Self::new(path.display().to_string(), snapshot))
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

pub fn parse_snapshot(json: &str) -> Result<LedgerSnapshot> {
    Ok(serde_json::from_str(json)?)
}

#[async_trait]
impl DataProvider for SnapshotProvider {
    async fn fetch_users(&self) -> Result<Vec<User>> {
        info!("Fetching users from {}", self.origin);
        Ok(self.snapshot.users.clone())
    }

    async fn fetch_incomes(&self) -> Result<Vec<Income>> {
        info!("Fetching incomes from {}", self.origin);
        Ok(self.snapshot.incomes.clone())
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>> {
        info!("Fetching expenses from {}", self.origin);
        Ok(self.snapshot.expenses.clone())
    }

    async fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>> {
        info!("Fetching credit cards from {}", self.origin);
        Ok(self.snapshot.credit_cards.clone())
    }

    async fn fetch_cash(&self) -> Result<Vec<Cash>> {
        info!("Fetching cash transactions from {}", self.origin);
        Ok(self.snapshot.cash.clone())
    }

    async fn fetch_debit_cards(&self) -> Result<Vec<DebitCard>> {
        info!("Fetching debit card transactions from {}", self.origin);
        Ok(self.snapshot.debit_cards.clone())
    }

    async fn persist(&self, mutation: &Mutation) -> Result<()> {
        debug!(
            "{:?} {} #{} acknowledged by {} (not written back)",
            mutation.op, mutation.kind, mutation.id, self.origin
        );
        Ok(())
    }
}
