use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use crate::application::{FinancialSummary, transaction_rows};
use crate::domain::{Ledger, LedgerSnapshot, RecordKind};

/// Exporter for converting ledger data to CSV and JSON
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export the merged transaction list (newest first) to CSV.
    pub fn export_transactions_csv<W: Write>(
        &self,
        writer: W,
        kind: Option<RecordKind>,
        today: NaiveDate,
    ) -> Result<usize> {
        let rows = transaction_rows(self.ledger, kind, today);
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "kind",
            "id",
            "user",
            "date",
            "title",
            "description",
            "amount_cents",
            "direction",
            "overdue",
        ])?;

        for row in &rows {
            csv_writer.write_record([
                row.kind.as_str().to_string(),
                row.id.to_string(),
                row.user.clone(),
                row.date.format("%Y-%m-%d").to_string(),
                row.title.clone(),
                row.description.clone().unwrap_or_default(),
                row.amount_cents.to_string(),
                row.direction.as_str().to_string(),
                row.overdue.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(rows.len())
    }

    /// Export the overview figures as pretty-printed JSON.
    pub fn export_summary_json<W: Write>(&self, mut writer: W) -> Result<FinancialSummary> {
        let summary = FinancialSummary::from_ledger(self.ledger);
        serde_json::to_writer_pretty(&mut writer, &summary)?;
        writeln!(writer)?;
        Ok(summary)
    }

    /// Export every collection in the same shape the snapshot provider loads.
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = self.ledger.snapshot();
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        Ok(snapshot)
    }
}
