use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::EngineError;
use crate::model::{CivilDate, CivilTime, Ms, Span};

/// Renders an absolute instant as civil wall-clock time in one fixed zone.
///
/// The fixed-point conversion in [`TimeZoneConverter`] is written against
/// this trait, so the tz-database facility behind it can be swapped without
/// touching the algorithm.
pub trait ZoneCalendar: Send + Sync {
    /// `None` only when `instant` falls outside the representable calendar.
    fn render(&self, instant: Ms) -> Option<NaiveDateTime>;
}

/// Production calendar backed by the IANA tz database via `chrono-tz`.
#[derive(Debug, Clone, Copy)]
pub struct TzdbCalendar {
    zone: Tz,
}

impl TzdbCalendar {
    pub fn new(zone_id: &str) -> Result<Self, EngineError> {
        zone_id
            .parse::<Tz>()
            .map(|zone| Self { zone })
            .map_err(|_| EngineError::UnknownZone(zone_id.to_string()))
    }

    pub fn zone_id(&self) -> &'static str {
        self.zone.name()
    }
}

impl ZoneCalendar for TzdbCalendar {
    fn render(&self, instant: Ms) -> Option<NaiveDateTime> {
        DateTime::<Utc>::from_timestamp_millis(instant)
            .map(|utc| utc.with_timezone(&self.zone).naive_local())
    }
}

/// Zone offsets shift by at most an hour or two per transition and each
/// correction closes the remaining gap, so three rounds always suffice.
const MAX_CORRECTIONS: usize = 3;

/// Civil ⇄ instant conversion in one fixed configured zone, independent of
/// whatever local zone the host process happens to run under.
///
/// Stateless: identical inputs always yield the identical instant.
#[derive(Debug, Clone, Copy)]
pub struct TimeZoneConverter<C: ZoneCalendar = TzdbCalendar> {
    calendar: C,
}

impl TimeZoneConverter {
    /// Converter for the given IANA zone id.
    pub fn new(zone_id: &str) -> Result<Self, EngineError> {
        Ok(Self {
            calendar: TzdbCalendar::new(zone_id)?,
        })
    }
}

impl<C: ZoneCalendar> TimeZoneConverter<C> {
    pub fn with_calendar(calendar: C) -> Self {
        Self { calendar }
    }

    /// The absolute instant whose civil rendering in the configured zone is
    /// `(date, time)`.
    ///
    /// Seeds with the civil fields reinterpreted as UTC, then corrects the
    /// guess by the signed civil difference, at most [`MAX_CORRECTIONS`]
    /// times. Both DST edge shapes resolve deterministically: for a
    /// fall-back overlap (the same wall clock occurring twice) the seed sits
    /// past the transition, so the iteration settles on the post-transition
    /// instant; a spring-forward gap time (which never occurs on the wall
    /// clock) yields a fixed nearby instant instead of an error.
    pub fn to_instant(&self, date: CivilDate, time: CivilTime) -> Result<Ms, EngineError> {
        let want = date.0.and_time(time.0);
        let mut guess = want.and_utc().timestamp_millis();
        for _ in 0..MAX_CORRECTIONS {
            let rendered = self
                .calendar
                .render(guess)
                .ok_or(EngineError::OutOfRange("civil datetime"))?;
            let diff = want - rendered;
            if diff.is_zero() {
                break;
            }
            guess += diff.num_milliseconds();
        }
        Ok(guess)
    }

    /// Civil rendering of `instant` in the configured zone.
    pub fn render(&self, instant: Ms) -> Result<NaiveDateTime, EngineError> {
        self.calendar
            .render(instant)
            .ok_or(EngineError::OutOfRange("instant"))
    }

    /// Half-open window `[midnight(date), midnight(date + 1))` in the
    /// configured zone. On DST transition days the window is 23 or 25 civil
    /// hours long; next-day midnight itself is excluded.
    pub fn day_window(&self, date: CivilDate) -> Result<Span, EngineError> {
        let next = date.next().ok_or(EngineError::OutOfRange("date"))?;
        let start = self.to_instant(date, CivilTime::midnight())?;
        let end = self.to_instant(next, CivilTime::midnight())?;
        Ok(Span::new(start, end))
    }
}
