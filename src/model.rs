use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::EngineError;

/// Unix milliseconds — the only absolute time type.
pub type Ms = i64;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }
}

/// Calendar date, parsed from a strict 10-character `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivilDate(pub NaiveDate);

impl CivilDate {
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        if raw.len() != 10 {
            return Err(EngineError::invalid_format("date", raw));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| EngineError::invalid_format("date", raw))
    }

    /// Next calendar day; `None` at the end of the representable range.
    pub fn next(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl std::fmt::Display for CivilDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Wall-clock time of day, parsed from `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivilTime(pub NaiveTime);

impl CivilTime {
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let parsed = match raw.len() {
            5 => NaiveTime::parse_from_str(raw, "%H:%M"),
            8 => NaiveTime::parse_from_str(raw, "%H:%M:%S"),
            _ => return Err(EngineError::invalid_format("time", raw)),
        };
        parsed
            .map(Self)
            .map_err(|_| EngineError::invalid_format("time", raw))
    }

    pub fn midnight() -> Self {
        Self(NaiveTime::MIN)
    }
}

impl std::fmt::Display for CivilTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Active,
    Pending,
    Cancelled,
}

impl ReservationStatus {
    /// ACTIVE and PENDING hold their slot; CANCELLED does not.
    pub fn is_occupying(self) -> bool {
        matches!(self, Self::Active | Self::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses that count toward slot occupancy.
pub const OCCUPYING_STATUSES: [ReservationStatus; 2] =
    [ReservationStatus::Active, ReservationStatus::Pending];

/// An existing reservation as the store sees it. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: Ulid,
    pub space_id: Ulid,
    pub span: Span,
    pub status: ReservationStatus,
}

/// A proposed slot, exactly as the caller supplies it: raw civil strings
/// plus ids. Parsing happens inside the engine so malformed input is rejected
/// in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub space_id: Ulid,
    /// `YYYY-MM-DD` in the configured zone.
    pub day: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    pub end_time: String,
    /// Reservation to ignore while counting (edit flows).
    pub exclude_id: Option<Ulid>,
}

/// The read-only store query built by the overlap counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapFilter {
    pub space_id: Ulid,
    pub statuses: Vec<ReservationStatus>,
    pub exclude_id: Option<Ulid>,
    /// Reservations whose own start falls inside this day window. Anchoring
    /// on the reservation's start keeps midnight-spanning records on the day
    /// they began and keeps the query sargable.
    pub starts_within: Span,
    /// Proposed range, tested with half-open intersection.
    pub range: Span,
}

impl OverlapFilter {
    /// True when `record` satisfies every predicate of the filter.
    pub fn matches(&self, record: &ReservationRecord) -> bool {
        record.space_id == self.space_id
            && self.statuses.contains(&record.status)
            && self.exclude_id != Some(record.id)
            && self.starts_within.contains_instant(record.span.start)
            && record.span.overlaps(&self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let s = Span::new(100, 200);
        assert_eq!(s.duration_ms(), 100);
        assert!(s.contains_instant(100));
        assert!(s.contains_instant(199));
        assert!(!s.contains_instant(200)); // half-open
    }

    #[test]
    fn span_overlap() {
        let a = Span::new(100, 200);
        let b = Span::new(150, 250);
        let c = Span::new(200, 300);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn civil_date_parse() {
        let d = CivilDate::parse("2024-06-01").unwrap();
        assert_eq!(d.to_string(), "2024-06-01");
        assert_eq!(d.next().unwrap().to_string(), "2024-06-02");
    }

    #[test]
    fn civil_date_parse_rejects_malformed() {
        for raw in ["2024-6-1", "2024/06/01", "20240601", "2024-13-01", "2024-02-30", "", "2024-06-01T00"] {
            let err = CivilDate::parse(raw).unwrap_err();
            match err {
                EngineError::InvalidFormat { field, value } => {
                    assert_eq!(field, "date");
                    assert_eq!(value, raw);
                }
                other => panic!("expected InvalidFormat, got {other}"),
            }
        }
    }

    #[test]
    fn civil_time_parse_both_lengths() {
        assert_eq!(CivilTime::parse("09:30").unwrap().to_string(), "09:30:00");
        assert_eq!(CivilTime::parse("09:30:15").unwrap().to_string(), "09:30:15");
    }

    #[test]
    fn civil_time_parse_rejects_malformed() {
        for raw in ["9:30", "24:00", "09:60", "09-30", "", "09:30:15:00"] {
            assert!(matches!(
                CivilTime::parse(raw),
                Err(EngineError::InvalidFormat { field: "time", .. })
            ));
        }
    }

    #[test]
    fn occupying_statuses() {
        assert!(ReservationStatus::Active.is_occupying());
        assert!(ReservationStatus::Pending.is_occupying());
        assert!(!ReservationStatus::Cancelled.is_occupying());
    }

    fn record(space_id: Ulid, start: Ms, end: Ms, status: ReservationStatus) -> ReservationRecord {
        ReservationRecord {
            id: Ulid::new(),
            space_id,
            span: Span::new(start, end),
            status,
        }
    }

    fn filter(space_id: Ulid) -> OverlapFilter {
        OverlapFilter {
            space_id,
            statuses: OCCUPYING_STATUSES.to_vec(),
            exclude_id: None,
            starts_within: Span::new(0, 86_400_000),
            range: Span::new(1_000, 2_000),
        }
    }

    #[test]
    fn filter_matches_occupying_overlap() {
        let space = Ulid::new();
        let f = filter(space);
        assert!(f.matches(&record(space, 1_500, 3_000, ReservationStatus::Active)));
        assert!(f.matches(&record(space, 0, 1_001, ReservationStatus::Pending)));
        assert!(!f.matches(&record(space, 1_500, 3_000, ReservationStatus::Cancelled)));
        assert!(!f.matches(&record(Ulid::new(), 1_500, 3_000, ReservationStatus::Active)));
    }

    #[test]
    fn filter_touching_boundary_is_not_overlap() {
        let space = Ulid::new();
        let f = filter(space);
        assert!(!f.matches(&record(space, 2_000, 3_000, ReservationStatus::Active)));
        assert!(!f.matches(&record(space, 0, 1_000, ReservationStatus::Active)));
    }

    #[test]
    fn filter_excludes_by_id() {
        let space = Ulid::new();
        let r = record(space, 1_500, 3_000, ReservationStatus::Active);
        let mut f = filter(space);
        assert!(f.matches(&r));
        f.exclude_id = Some(r.id);
        assert!(!f.matches(&r));
    }

    #[test]
    fn filter_anchors_on_record_start() {
        let space = Ulid::new();
        let mut f = filter(space);
        f.starts_within = Span::new(0, 1_600);
        // Overlapping but starting outside the day window: filtered out.
        assert!(!f.matches(&record(space, 1_700, 3_000, ReservationStatus::Active)));
        // Start exactly at the window's exclusive end: filtered out.
        assert!(!f.matches(&record(space, 1_600, 3_000, ReservationStatus::Active)));
        assert!(f.matches(&record(space, 1_500, 3_000, ReservationStatus::Active)));
    }

    #[test]
    fn status_serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        let s: ReservationStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(s, ReservationStatus::Cancelled);
    }
}
