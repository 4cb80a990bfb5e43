//! The scheduling engine: overlap counting over an external reservation
//! store, plus initial-status assignment.

mod status;

pub use status::{classification_of, resolve_status, NoSubject, SubjectView, CLASSIFICATION_ALIASES};

use tracing::debug;

use crate::error::EngineError;
use crate::model::{
    CivilDate, CivilTime, OverlapFilter, ReservationStatus, SlotRequest, Span, OCCUPYING_STATUSES,
};
use crate::store::ReservationStore;
use crate::tz::TimeZoneConverter;

/// Decision engine over one explicitly passed store handle. Stateless apart
/// from the configured zone; a shared reference is safe across tasks.
///
/// Counting then creating is not atomic here: two concurrent callers can
/// both observe a free slot. Slot uniqueness under concurrency must come
/// from the store (transaction or constraint), not from this engine.
pub struct Scheduler<S: ReservationStore> {
    converter: TimeZoneConverter,
    store: S,
}

impl<S: ReservationStore> Scheduler<S> {
    pub fn new(converter: TimeZoneConverter, store: S) -> Self {
        Self { converter, store }
    }

    pub fn converter(&self) -> &TimeZoneConverter {
        &self.converter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of occupying reservations intersecting the requested slot.
    /// Zero means the slot is free for that space.
    ///
    /// All parsing and range validation happens before the single store
    /// query, so malformed input never reaches the store. Store failures
    /// propagate unchanged.
    pub async fn count_overlaps(&self, request: &SlotRequest) -> Result<u64, EngineError> {
        let day = CivilDate::parse(&request.day)?;
        let start_time = CivilTime::parse(&request.start_time)?;
        let end_time = CivilTime::parse(&request.end_time)?;

        let starts_within = self.converter.day_window(day)?;
        let start = self.converter.to_instant(day, start_time)?;
        let end = self.converter.to_instant(day, end_time)?;
        if end <= start {
            return Err(EngineError::InvalidRange { start, end });
        }

        let filter = OverlapFilter {
            space_id: request.space_id,
            statuses: OCCUPYING_STATUSES.to_vec(),
            exclude_id: request.exclude_id,
            starts_within,
            range: Span::new(start, end),
        };
        debug!(
            space = %request.space_id,
            range_start = start,
            range_end = end,
            window_start = starts_within.start,
            "counting overlaps"
        );
        self.store
            .count_overlapping(&filter)
            .await
            .map_err(EngineError::Store)
    }

    /// True when no occupying reservation intersects the requested slot.
    pub async fn is_free(&self, request: &SlotRequest) -> Result<bool, EngineError> {
        Ok(self.count_overlaps(request).await? == 0)
    }

    /// Delegates to [`resolve_status`], so the engine's whole decision
    /// surface hangs off one handle.
    pub fn resolve_status(&self, actor_role: &str, subject: &dyn SubjectView) -> ReservationStatus {
        status::resolve_status(actor_role, subject)
    }
}
