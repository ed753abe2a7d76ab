//! Weekly period representation
//!
//! A bordero always covers one Monday-to-Sunday week. The window is closed on
//! both ends: it starts at Monday 00:00:00.000 and ends at Sunday
//! 23:59:59.999 in the UTC offset of the reference instant.

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Week window `[start, end]`, derived from a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekPeriod {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl WeekPeriod {
    /// The week containing `reference`
    ///
    /// `start` is the most recent Monday at or before the reference (its own
    /// Monday if it is one) and `end` is the last millisecond of that week's
    /// Sunday.
    pub fn containing(reference: DateTime<FixedOffset>) -> Self {
        Self::starting_on(reference.date_naive(), *reference.offset())
    }

    /// The week starting on `monday` at midnight in `offset`
    ///
    /// Callers pass a Monday; any other date is first moved back to its week's
    /// Monday. At the edges of the calendar range the window is clamped to the
    /// first or last representable instant.
    pub fn starting_on(monday: NaiveDate, offset: FixedOffset) -> Self {
        let back = u64::from(monday.weekday().num_days_from_monday());
        let monday = monday.checked_sub_days(Days::new(back)).unwrap_or(monday);
        let start_utc = monday
            .and_time(NaiveTime::MIN)
            .checked_sub_signed(offset_duration(offset))
            .unwrap_or(DateTime::<Utc>::MIN_UTC.naive_utc());
        let start = offset.from_utc_datetime(&start_utc);
        let end = start
            .checked_add_signed(Duration::days(7) - Duration::milliseconds(1))
            .unwrap_or_else(|| DateTime::<Utc>::MAX_UTC.with_timezone(&offset));
        Self { start, end }
    }

    /// Shift by `delta_weeks * 7` days, keeping the Monday/Sunday shape
    ///
    /// Returns `None` when the shifted week falls outside the calendar range.
    pub fn advance(&self, delta_weeks: i64) -> Option<Self> {
        let shift = delta_weeks.checked_mul(7).and_then(Duration::try_days)?;
        Some(Self {
            start: self.start.checked_add_signed(shift)?,
            end: self.end.checked_add_signed(shift)?,
        })
    }

    /// The following week
    pub fn next(&self) -> Option<Self> {
        self.advance(1)
    }

    /// The preceding week
    pub fn prev(&self) -> Option<Self> {
        self.advance(-1)
    }

    /// Whether an instant falls inside the window (both ends inclusive)
    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        *instant >= self.start && *instant <= self.end
    }

    /// Monday's calendar date
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Sunday's calendar date
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    pub fn offset(&self) -> FixedOffset {
        *self.start.offset()
    }

    /// Presentation label, e.g. `13/01 — 19/01/2025`
    pub fn label(&self) -> String {
        format!(
            "{} — {}",
            self.start.format("%d/%m"),
            self.end.format("%d/%m/%Y")
        )
    }
}

fn offset_duration(offset: FixedOffset) -> Duration {
    Duration::seconds(i64::from(offset.local_minus_utc()))
}

impl fmt::Display for WeekPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let week = self.start_date().iso_week();
        write!(f, "{:04}-W{:02}", week.year(), week.week())
    }
}

impl Ord for WeekPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start.cmp(&other.start)
    }
}

impl PartialOrd for WeekPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
