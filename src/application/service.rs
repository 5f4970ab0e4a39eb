use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::domain::{Ledger, LedgerSnapshot, Record, RecordId, RecordKind};
use crate::storage::{DataProvider, Mutation};

use super::{AppError, FinancialSummary, TransactionRow, transaction_rows};

/// Application service tying the in-memory ledger to its data provider.
/// This is the primary interface for any client (CLI, API, UI, etc.).
///
/// Every mutation is applied to the ledger first and then mirrored to the
/// provider. The ledger is the source of truth for all queries.
pub struct HouseholdService<P> {
    ledger: Ledger,
    provider: P,
}

impl<P: DataProvider> HouseholdService<P> {
    pub fn new(ledger: Ledger, provider: P) -> Self {
        Self { ledger, provider }
    }

    /// Fetch all six collections concurrently and hydrate a fresh ledger.
    /// The service is only handed out once every fetch has completed.
    pub async fn bootstrap(provider: P) -> Result<Self, AppError> {
        let (users, incomes, expenses, credit_cards, cash, debit_cards) = tokio::try_join!(
            provider.fetch_users(),
            provider.fetch_incomes(),
            provider.fetch_expenses(),
            provider.fetch_credit_cards(),
            provider.fetch_cash(),
            provider.fetch_debit_cards(),
        )?;

        info!(
            "Loaded {} users, {} incomes, {} expenses, {} credit card charges, {} cash entries, {} debit card transactions",
            users.len(),
            incomes.len(),
            expenses.len(),
            credit_cards.len(),
            cash.len(),
            debit_cards.len()
        );

        let ledger = Ledger::from_snapshot(LedgerSnapshot {
            users,
            incomes,
            expenses,
            credit_cards,
            cash,
            debit_cards,
        });

        Ok(Self::new(ledger, provider))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    // ========================
    // Record operations
    // ========================

    /// Add a record built from `draft` and mirror it to the provider.
    /// Fails with `AppError::IdsExhausted` when the kind has no ids left.
    pub async fn add<R: Record>(&mut self, draft: R::Draft) -> Result<R, AppError> {
        let record = self.ledger.add::<R>(draft)?;
        debug!("Created {} #{}", R::KIND, record.id());

        self.provider.persist(&Mutation::created(&record)?).await?;
        Ok(record)
    }

    /// Apply a partial update. An unknown id yields `AppError::RecordNotFound`
    /// and nothing is sent to the provider.
    pub async fn update<R: Record>(
        &mut self,
        id: RecordId,
        patch: R::Patch,
    ) -> Result<R, AppError> {
        let mutation = Mutation::updated::<R>(id, &patch)?;

        let record = self.ledger.update::<R>(id, patch).inspect_err(|_| {
            warn!("Update of unknown {} #{} ignored", R::KIND, id);
        })?;
        debug!("Updated {} #{}", R::KIND, id);

        self.provider.persist(&mutation).await?;
        Ok(record)
    }

    /// Delete a record. Returns `Ok(None)` when the id was not present,
    /// which is not treated as an error.
    pub async fn delete<R: Record>(&mut self, id: RecordId) -> Result<Option<R>, AppError> {
        let Some(record) = self.ledger.delete::<R>(id) else {
            warn!("Delete of unknown {} #{} ignored", R::KIND, id);
            return Ok(None);
        };
        debug!("Deleted {} #{}", R::KIND, id);

        self.provider.persist(&Mutation::deleted::<R>(id)).await?;
        Ok(Some(record))
    }

    // ========================
    // Queries
    // ========================

    pub fn summary(&self) -> FinancialSummary {
        FinancialSummary::from_ledger(&self.ledger)
    }

    pub fn transactions(&self, kind: Option<RecordKind>, today: NaiveDate) -> Vec<TransactionRow> {
        transaction_rows(&self.ledger, kind, today)
    }
}
