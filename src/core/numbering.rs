//! Estimate numbering.
//!
//! Estimate numbers come from an injected [`EstimateSequence`] rather than a
//! global counter. The stored implementation keeps its counter in the
//! `sequences` table so numbering carries on across sessions.

use crate::{
    entities::{Sequence, sequence},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Name of the counter that numbers estimates.
pub const ESTIMATE_SEQUENCE: &str = "estimate_number";

/// Source of sequential estimate numbers.
#[allow(async_fn_in_trait)]
pub trait EstimateSequence {
    /// Advances the sequence and returns the new value. The first call on a
    /// fresh sequence returns 1.
    async fn next(&mut self) -> Result<u64>;
}

/// Counter held in memory, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct InMemorySequence {
    last: u64,
}

impl InMemorySequence {
    /// Creates a sequence whose next value is `last + 1`.
    #[must_use]
    pub const fn starting_after(last: u64) -> Self {
        Self { last }
    }
}

impl EstimateSequence for InMemorySequence {
    async fn next(&mut self) -> Result<u64> {
        self.last = self.last.saturating_add(1);
        Ok(self.last)
    }
}

/// Counter persisted in the `sequences` table.
#[derive(Debug, Clone)]
pub struct StoredSequence {
    db: DatabaseConnection,
    name: String,
}

impl StoredSequence {
    /// Binds a named counter to a database connection. The row is created
    /// lazily on the first call to [`EstimateSequence::next`].
    #[must_use]
    pub fn new(db: DatabaseConnection, name: impl Into<String>) -> Self {
        Self {
            db,
            name: name.into(),
        }
    }

    /// Last value handed out, or 0 when the counter has never moved.
    pub async fn current(&self) -> Result<u64> {
        let stored = Sequence::find()
            .filter(sequence::Column::Name.eq(self.name.as_str()))
            .one(&self.db)
            .await?;

        stored.map_or(Ok(0), |row| self.to_counter(row.last_value))
    }

    fn to_counter(&self, value: i64) -> Result<u64> {
        u64::try_from(value).map_err(|_| Error::InvalidSequenceValue {
            key: self.name.clone(),
            value,
        })
    }
}

impl EstimateSequence for StoredSequence {
    #[instrument(skip(self), fields(sequence = %self.name))]
    async fn next(&mut self) -> Result<u64> {
        let txn = self.db.begin().await?;
        let now = Utc::now().naive_utc();

        let existing = Sequence::find()
            .filter(sequence::Column::Name.eq(self.name.as_str()))
            .one(&txn)
            .await?;

        let value = if let Some(row) = existing {
            // Reject a corrupt counter before anything is written; dropping the
            // transaction rolls it back.
            self.to_counter(row.last_value)?;
            let next = row
                .last_value
                .checked_add(1)
                .ok_or_else(|| Error::InvalidSequenceValue {
                    key: self.name.clone(),
                    value: row.last_value,
                })?;
            let mut active_model: sequence::ActiveModel = row.into();
            active_model.last_value = Set(next);
            active_model.updated_at = Set(now);
            active_model.update(&txn).await?;
            next
        } else {
            let new_sequence = sequence::ActiveModel {
                name: Set(self.name.clone()),
                last_value: Set(1),
                updated_at: Set(now),
                ..Default::default()
            };
            new_sequence.insert(&txn).await?;
            1
        };

        txn.commit().await?;

        let value = self.to_counter(value)?;
        info!("Minted {} value {}", self.name, value);
        Ok(value)
    }
}

/// Formats an estimate number as `prefix` plus the value zero-padded to
/// `width` digits, e.g. `PJ-007`. Values wider than `width` are kept whole.
#[must_use]
pub fn format_estimate_number(prefix: &str, width: usize, value: u64) -> String {
    format!("{prefix}{value:0width$}")
}

/// Formats an estimate date as `DD-MM-YYYY`.
#[must_use]
pub fn format_estimate_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Today's date on the local clock, formatted for an estimate.
#[must_use]
pub fn today() -> String {
    format_estimate_date(chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_format_estimate_number() {
        assert_eq!(format_estimate_number("PJ-", 3, 1), "PJ-001");
        assert_eq!(format_estimate_number("PJ-", 3, 42), "PJ-042");
        assert_eq!(format_estimate_number("PJ-", 3, 1234), "PJ-1234");
        assert_eq!(format_estimate_number("", 0, 5), "5");
    }

    #[test]
    fn test_format_estimate_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_estimate_date(date), "05-03-2024");
    }

    #[tokio::test]
    async fn test_in_memory_sequence() -> Result<()> {
        let mut sequence = InMemorySequence::default();
        assert_eq!(sequence.next().await?, 1);
        assert_eq!(sequence.next().await?, 2);

        let mut resumed = InMemorySequence::starting_after(41);
        assert_eq!(resumed.next().await?, 42);
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_sequence_starts_at_one() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let mut sequence = StoredSequence::new(db, ESTIMATE_SEQUENCE);

        assert_eq!(sequence.current().await?, 0);
        assert_eq!(sequence.next().await?, 1);
        assert_eq!(sequence.next().await?, 2);
        assert_eq!(sequence.current().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_sequence_survives_new_handle() -> Result<()> {
        let db = setup_test_db().await?;
        let mut first = StoredSequence::new(db.clone(), ESTIMATE_SEQUENCE);
        first.next().await?;
        first.next().await?;

        let mut second = StoredSequence::new(db.clone(), ESTIMATE_SEQUENCE);
        assert_eq!(second.next().await?, 3);

        // Only one row per counter name
        let count = Sequence::find()
            .filter(sequence::Column::Name.eq(ESTIMATE_SEQUENCE))
            .count(&db)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_sequences_are_independent() -> Result<()> {
        let db = setup_test_db().await?;
        let mut estimates = StoredSequence::new(db.clone(), ESTIMATE_SEQUENCE);
        let mut other = StoredSequence::new(db, "receipt_number");

        estimates.next().await?;
        estimates.next().await?;
        assert_eq!(other.next().await?, 1);
        assert_eq!(estimates.current().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_sequence_rejects_negative_value() -> Result<()> {
        let db = setup_test_db().await?;
        sequence::ActiveModel {
            name: Set("broken".to_string()),
            last_value: Set(-5),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let sequence = StoredSequence::new(db, "broken");
        let result = sequence.current().await;
        assert!(matches!(
            result,
            Err(Error::InvalidSequenceValue { value: -5, .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_sequence_next_leaves_corrupt_counter_untouched() -> Result<()> {
        let db = setup_test_db().await?;
        for (name, last_value) in [("minus_five", -5), ("minus_one", -1)] {
            sequence::ActiveModel {
                name: Set(name.to_string()),
                last_value: Set(last_value),
                updated_at: Set(Utc::now().naive_utc()),
                ..Default::default()
            }
            .insert(&db)
            .await?;

            let mut sequence = StoredSequence::new(db.clone(), name);
            let result = sequence.next().await;
            assert!(matches!(
                result,
                Err(Error::InvalidSequenceValue { value, .. }) if value == last_value
            ));

            let stored = Sequence::find()
                .filter(sequence::Column::Name.eq(name))
                .one(&db)
                .await?
                .unwrap();
            assert_eq!(stored.last_value, last_value);
        }
        Ok(())
    }
}
