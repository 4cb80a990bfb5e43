use async_trait::async_trait;
use dashmap::DashMap;
use ulid::Ulid;

use crate::model::{OverlapFilter, ReservationRecord};

/// Whatever the backing store surfaces on infrastructure failure, passed
/// through to the caller unchanged.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Read-only counting capability over existing reservations.
///
/// The engine never writes through this trait and never retries a failed
/// query; retry policy belongs to the implementation or its caller. A real
/// backend maps [`OverlapFilter`] onto an indexed query: equality on space,
/// status-set membership, a bounded start-instant range, and the two
/// half-open inequality comparisons.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn count_overlapping(&self, filter: &OverlapFilter) -> Result<u64, StoreError>;
}

/// Dashmap-backed store for tests and embedded callers.
pub struct InMemoryStore {
    reservations: DashMap<Ulid, ReservationRecord>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
        }
    }

    pub fn insert(&self, record: ReservationRecord) {
        self.reservations.insert(record.id, record);
    }

    pub fn remove(&self, id: &Ulid) -> Option<ReservationRecord> {
        self.reservations.remove(id).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn count_overlapping(&self, filter: &OverlapFilter) -> Result<u64, StoreError> {
        let n = self
            .reservations
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count();
        Ok(n as u64)
    }
}
