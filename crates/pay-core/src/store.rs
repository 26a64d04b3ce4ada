//! # Pending Authentication Store
//!
//! Correlates a payment initiation with the shopper's return from an
//! out-of-band authentication. The order reference is the key, the gateway's
//! continuation token (`paymentData`) the value.
//!
//! Records are read but never removed by the checkout flow. Each one expires
//! after a TTL and is dropped by [`PaymentDataStore::purge_expired`].

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// A continuation token waiting for the shopper to come back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuthentication {
    pub payment_data: String,
    pub created_at: DateTime<Utc>,
}

/// Keyed store for pending authentications.
///
/// Implementations must be thread-safe (`Send + Sync`). Writes to distinct
/// keys never interfere; concurrent writes to one key are last-write-wins.
pub trait PaymentDataStore: Send + Sync {
    /// Record the continuation token for an order reference.
    fn put(&self, order_ref: &str, payment_data: String);

    /// Look up the continuation token. Expired records read as absent.
    fn get(&self, order_ref: &str) -> Option<String>;

    /// Drop expired records. Returns number purged.
    fn purge_expired(&self) -> usize;

    /// Number of records currently held, expired or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store backed by DashMap. Lost on restart.
pub struct InMemoryPaymentDataStore {
    records: DashMap<String, PendingAuthentication>,
    ttl: Duration,
}

impl InMemoryPaymentDataStore {
    /// Default lifetime of a pending authentication, in seconds
    pub const DEFAULT_TTL_SECS: u64 = 3600;

    pub fn new(ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            records: DashMap::new(),
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
        }
    }

    fn put_at(&self, order_ref: &str, payment_data: String, created_at: DateTime<Utc>) {
        self.records.insert(
            order_ref.to_string(),
            PendingAuthentication {
                payment_data,
                created_at,
            },
        );
    }

    fn is_expired(&self, record: &PendingAuthentication, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(record.created_at) >= self.ttl
    }
}

impl Default for InMemoryPaymentDataStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL_SECS)
    }
}

impl PaymentDataStore for InMemoryPaymentDataStore {
    fn put(&self, order_ref: &str, payment_data: String) {
        self.put_at(order_ref, payment_data, Utc::now());
    }

    fn get(&self, order_ref: &str) -> Option<String> {
        let now = Utc::now();
        self.records
            .get(order_ref)
            .filter(|record| !self.is_expired(record, now))
            .map(|record| record.payment_data.clone())
    }

    fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut purged = 0;
        self.records.retain(|_, record| {
            let keep = !self.is_expired(record, now);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_put_then_get() {
        let store = InMemoryPaymentDataStore::default();
        store.put("order-1", "tok123".into());

        assert_eq!(store.get("order-1").as_deref(), Some("tok123"));
        // Reads do not consume the record
        assert_eq!(store.get("order-1").as_deref(), Some("tok123"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_miss_is_none() {
        let store = InMemoryPaymentDataStore::default();
        assert!(store.get("nope").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let store = InMemoryPaymentDataStore::default();
        store.put("order-1", "first".into());
        store.put("order-1", "second".into());
        assert_eq!(store.get("order-1").as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_expired_record_reads_as_absent() {
        let store = InMemoryPaymentDataStore::new(60);
        store.put_at("old", "stale".into(), Utc::now() - Duration::seconds(120));
        store.put("fresh", "tok".into());

        assert!(store.get("old").is_none());
        assert_eq!(store.get("fresh").as_deref(), Some("tok"));
    }

    #[test]
    fn test_purge_expired() {
        let store = InMemoryPaymentDataStore::new(60);
        store.put_at("a", "1".into(), Utc::now() - Duration::seconds(61));
        store.put_at("b", "2".into(), Utc::now() - Duration::seconds(3600));
        store.put("c", "3".into());

        assert_eq!(store.purge_expired(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("c").as_deref(), Some("3"));
        assert_eq!(store.purge_expired(), 0);
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let store = InMemoryPaymentDataStore::new(u64::MAX);
        store.put("order", "tok".into());
        assert_eq!(store.get("order").as_deref(), Some("tok"));
        assert_eq!(store.purge_expired(), 0);
    }

    #[test]
    fn test_purge_while_writers_insert() {
        let store = Arc::new(InMemoryPaymentDataStore::new(60));
        for i in 0..100 {
            store.put_at(&format!("stale-{i}"), "old".into(), Utc::now() - Duration::seconds(120));
        }

        let writers: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..2_000 {
                        store.put(&format!("live-{t}-{i}"), "tok".into());
                    }
                })
            })
            .collect();

        let mut purged = 0;
        for _ in 0..2_000 {
            purged += store.purge_expired();
        }
        for writer in writers {
            writer.join().unwrap();
        }
        purged += store.purge_expired();

        // Only the stale records are ever removed
        assert_eq!(purged, 100);
        assert_eq!(store.len(), 8 * 2_000);
    }

    #[test]
    fn test_concurrent_puts_do_not_cross_write() {
        let store = Arc::new(InMemoryPaymentDataStore::default());

        let handles: Vec<_> = (0..16)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let key = format!("order-{t}-{i}");
                        store.put(&key, format!("token-{t}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 16 * 200);
        for t in 0..16 {
            for i in 0..200 {
                let key = format!("order-{t}-{i}");
                assert_eq!(store.get(&key), Some(format!("token-{t}-{i}")));
            }
        }
    }
}
