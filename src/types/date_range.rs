use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;

/// An inclusive span of wall-clock instants, interpreted in the request's time zone.
///
/// `start > end` is allowed and simply plans to zero requests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole days, from midnight of `start` to midnight of `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use coops::DateRange;
    ///
    /// let april = DateRange::from_dates(
    ///     NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2020, 4, 30).unwrap(),
    /// );
    /// assert_eq!(april.span().num_days(), 29);
    /// ```
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(chrono::NaiveTime::MIN),
            end: end.and_time(chrono::NaiveTime::MIN),
        }
    }

    /// The `days` leading up to the current UTC time, evaluated when called.
    ///
    /// A span reaching past the calendar is clamped to its first (or, for a
    /// negative `days`, last) representable instant.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().naive_utc();
        let start = TimeDelta::try_days(days)
            .and_then(|span| end.checked_sub_signed(span))
            .unwrap_or(if days < 0 {
                NaiveDateTime::MAX
            } else {
                NaiveDateTime::MIN
            });
        Self { start, end }
    }

    pub fn span(&self) -> TimeDelta {
        self.end - self.start
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}
