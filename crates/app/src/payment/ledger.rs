// Path: crates/app/src/payment/ledger.rs

use learnchain_api::storage::{get_json, set_json};
use learnchain_api::{LocalStorage, StorageKey};
use learnchain_types::chain::{TxHash, Wei};
use learnchain_types::error::StorageError;
use learnchain_types::EntityId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A payment whose enrollment the backend has not recorded yet.
///
/// `unconfirmed` entries were submitted but never seen mined; they block a second
/// payment for the course until their receipt settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEnrollment {
    pub reference: Uuid,
    pub user_id: EntityId,
    pub course_id: EntityId,
    #[serde(default)]
    pub tx_hash: Option<TxHash>,
    /// Decimal wei amount.
    pub amount_wei: String,
    pub created_at_ms: u64,
    #[serde(default)]
    pub unconfirmed: bool,
}

impl PendingEnrollment {
    pub fn new(user_id: &str, course_id: &str, tx_hash: Option<TxHash>, amount: Wei) -> Self {
        let created_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            reference: Uuid::new_v4(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            tx_hash,
            amount_wei: amount.0.to_string(),
            created_at_ms,
            unconfirmed: false,
        }
    }

    /// A submitted payment whose receipt has not been seen.
    pub fn unconfirmed(user_id: &str, course_id: &str, tx_hash: TxHash, amount: Wei) -> Self {
        Self {
            unconfirmed: true,
            ..Self::new(user_id, course_id, Some(tx_hash), amount)
        }
    }
}

/// The persisted list of [`PendingEnrollment`]s, stored under `pendingEnrollments`.
///
/// At most one record exists per user and course; a user never pays twice for an
/// enrollment that is still pending.
#[derive(Clone)]
pub struct PaymentLedger {
    storage: Arc<dyn LocalStorage>,
}

impl PaymentLedger {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    pub async fn pending(&self) -> Result<Vec<PendingEnrollment>, StorageError> {
        Ok(
            get_json::<Vec<PendingEnrollment>>(self.storage.as_ref(), StorageKey::PendingEnrollments)
                .await?
                .unwrap_or_default(),
        )
    }

    pub async fn pending_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<PendingEnrollment>, StorageError> {
        let mut entries = self.pending().await?;
        entries.retain(|p| p.user_id == user_id);
        Ok(entries)
    }

    pub async fn find(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Option<PendingEnrollment>, StorageError> {
        Ok(self
            .pending()
            .await?
            .into_iter()
            .find(|p| p.user_id == user_id && p.course_id == course_id))
    }

    /// Adds `entry`, replacing any record for the same user and course.
    pub async fn record(&self, entry: PendingEnrollment) -> Result<(), StorageError> {
        let mut entries = self.pending().await?;
        entries.retain(|p| !(p.user_id == entry.user_id && p.course_id == entry.course_id));
        tracing::info!(
            target: "payment",
            reference = %entry.reference,
            course = %entry.course_id,
            "recorded pending enrollment"
        );
        entries.push(entry);
        self.save(&entries).await
    }

    /// Marks an unconfirmed entry as mined.
    pub async fn confirm(&self, reference: Uuid) -> Result<(), StorageError> {
        let mut entries = self.pending().await?;
        let Some(entry) = entries.iter_mut().find(|p| p.reference == reference) else {
            return Ok(());
        };
        if !entry.unconfirmed {
            return Ok(());
        }
        entry.unconfirmed = false;
        tracing::info!(target: "payment", %reference, "pending payment confirmed on chain");
        self.save(&entries).await
    }

    pub async fn resolve(&self, reference: Uuid) -> Result<(), StorageError> {
        let mut entries = self.pending().await?;
        let before = entries.len();
        entries.retain(|p| p.reference != reference);
        if entries.len() == before {
            return Ok(());
        }
        tracing::info!(target: "payment", %reference, "resolved pending enrollment");
        self.save(&entries).await
    }

    async fn save(&self, entries: &[PendingEnrollment]) -> Result<(), StorageError> {
        if entries.is_empty() {
            return self.storage.remove(StorageKey::PendingEnrollments).await;
        }
        set_json(self.storage.as_ref(), StorageKey::PendingEnrollments, &entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnchain_api::mock::MemoryStorage;

    #[tokio::test]
    async fn one_record_per_user_and_course() {
        let storage = Arc::new(MemoryStorage::default());
        let ledger = PaymentLedger::new(storage.clone());

        let first = PendingEnrollment::new("u1", "c1", Some("0x1".into()), Wei(10));
        let second = PendingEnrollment::new("u1", "c1", Some("0x2".into()), Wei(10));
        let other = PendingEnrollment::new("u2", "c1", None, Wei(10));
        ledger.record(first).await.unwrap();
        ledger.record(second.clone()).await.unwrap();
        ledger.record(other.clone()).await.unwrap();

        assert_eq!(ledger.pending().await.unwrap().len(), 2);
        assert_eq!(ledger.find("u1", "c1").await.unwrap(), Some(second.clone()));
        assert_eq!(ledger.pending_for_user("u2").await.unwrap(), vec![other.clone()]);

        ledger.resolve(second.reference).await.unwrap();
        ledger.resolve(other.reference).await.unwrap();
        assert!(ledger.pending().await.unwrap().is_empty());
        assert!(storage.snapshot(StorageKey::PendingEnrollments).is_none());
    }

    #[tokio::test]
    async fn confirm_clears_the_unconfirmed_flag() {
        let ledger = PaymentLedger::new(Arc::new(MemoryStorage::default()));
        let entry = PendingEnrollment::unconfirmed("u1", "c1", "0xslow".into(), Wei(10));
        ledger.record(entry.clone()).await.unwrap();

        ledger.confirm(entry.reference).await.unwrap();
        let stored = ledger.find("u1", "c1").await.unwrap().unwrap();
        assert!(!stored.unconfirmed);
        assert_eq!(stored.tx_hash.as_deref(), Some("0xslow"));
    }

    #[test]
    fn older_entries_without_the_flag_read_as_confirmed() {
        let raw = r#"[{"reference":"67e55044-10b1-426f-9247-bb680e5fe0c8","userId":"u1","courseId":"c1","amountWei":"1","createdAtMs":0}]"#;
        let entries: Vec<PendingEnrollment> = serde_json::from_str(raw).unwrap();
        assert!(!entries[0].unconfirmed);
    }

    #[test]
    fn stored_with_camel_case_keys() {
        let entry = PendingEnrollment::new("u1", "c1", None, Wei(1_000_000_000));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["courseId"], "c1");
        assert_eq!(json["amountWei"], "1000000000");
    }
}
