//! Reservation scheduling engine for a coworking-space booking system.
//!
//! Three cooperating pieces, all pure except for the single store read:
//! civil-to-instant conversion in one fixed IANA zone ([`tz`]), half-open
//! overlap counting against an abstract reservation store ([`engine`]), and
//! initial-status assignment from actor role and subject tier
//! ([`engine::resolve_status`]).
//!
//! The engine is a decision function, not a lock manager: check-then-create
//! atomicity, persistence, and transport all belong to the caller.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;
pub mod tz;

pub use config::Config;
pub use engine::{classification_of, resolve_status, NoSubject, Scheduler, SubjectView};
pub use error::EngineError;
pub use model::{
    CivilDate, CivilTime, Ms, OverlapFilter, ReservationRecord, ReservationStatus, SlotRequest,
    Span, OCCUPYING_STATUSES,
};
pub use store::{InMemoryStore, ReservationStore, StoreError};
pub use tz::{TimeZoneConverter, TzdbCalendar, ZoneCalendar};
