//! Logical days.
//!
//! Study time is reported per logical day, which starts at 05:00 local time
//! rather than midnight: a session at 02:00 still counts towards the
//! previous calendar date. A logical day runs from `D 05:00:00.000` to
//! `D+1 04:59:59.999`, and `05:00:00.000` itself already belongs to the new
//! day.
//!
//! Every function here is generic over [`chrono::TimeZone`] and computes
//! bounds in the zone of the timestamp it is given. Pass a
//! `DateTime<Local>` to use the host's local time; daylight-saving shifts
//! are resolved by that zone.

use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
    Timelike,
};

use crate::error::ConfigError;

/// The local hour at which a new logical day begins.
pub const RESET_HOUR: u32 = 5;

/// Returns the first instant of the logical day containing `t`.
pub fn day_start<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    DayBoundary::default().day_start(t)
}

/// Returns the last millisecond of the logical day containing `t`.
pub fn day_end<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    DayBoundary::default().day_end(t)
}

/// Returns the calendar date on which the logical day containing `t` began.
pub fn logical_date<Tz: TimeZone>(t: &DateTime<Tz>) -> NaiveDate {
    DayBoundary::default().logical_date(t)
}

/// The rule splitting time into logical days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    reset_hour: u32,
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::new()
    }
}

impl DayBoundary {
    /// The boundary used throughout the app, resetting at [`RESET_HOUR`].
    pub const fn new() -> Self {
        Self {
            reset_hour: RESET_HOUR,
        }
    }

    pub fn with_reset_hour(reset_hour: u32) -> Result<Self, ConfigError> {
        if reset_hour > 23 {
            return Err(ConfigError::InvalidResetHour(reset_hour));
        }
        Ok(Self { reset_hour })
    }

    pub fn reset_hour(&self) -> u32 {
        self.reset_hour
    }

    pub fn logical_date<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> NaiveDate {
        let date = t.date_naive();
        if t.hour() < self.reset_hour {
            date.pred_opt().unwrap_or(date)
        } else {
            date
        }
    }

    pub fn day_start<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> DateTime<Tz> {
        let start = self.start_of(self.logical_date(t));
        resolve_local(t, start)
    }

    /// One millisecond before the next logical day starts, so consecutive
    /// days tile even when a DST fold repeats the last wall-clock hour.
    pub fn day_end<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> DateTime<Tz> {
        let date = self.logical_date(t);
        let next = date.succ_opt().unwrap_or(date);
        let next_start = resolve_local(t, self.start_of(next));
        next_start
            .clone()
            .checked_sub_signed(TimeDelta::milliseconds(1))
            .unwrap_or(next_start)
    }

    fn start_of(&self, date: NaiveDate) -> NaiveDateTime {
        // reset_hour is validated to 0..=23 on construction
        let time = NaiveTime::from_hms_opt(self.reset_hour, 0, 0).unwrap_or_default();
        date.and_time(time)
    }
}

/// Maps a wall time onto an instant in `reference`'s zone.
///
/// Ambiguous wall times (a DST fold) take the earlier instant. Wall times
/// skipped by a DST gap are read with the offset in effect before the gap,
/// which moves them forward by the gap length (02:30 becomes 03:30).
fn resolve_local<Tz: TimeZone>(reference: &DateTime<Tz>, local: NaiveDateTime) -> DateTime<Tz> {
    let tz = reference.timezone();
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before_gap = tz
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix();
            tz.from_utc_datetime(&(local - before_gap))
        }
    }
}

/// The logical day containing some instant.
#[derive(Debug, Clone)]
pub struct LogicalDay<Tz: TimeZone> {
    date: NaiveDate,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    boundary: DayBoundary,
}

impl<Tz: TimeZone> LogicalDay<Tz> {
    /// The logical day containing `t`, under the default boundary.
    pub fn of(t: &DateTime<Tz>) -> Self {
        Self::with_boundary(DayBoundary::default(), t)
    }

    pub fn with_boundary(boundary: DayBoundary, t: &DateTime<Tz>) -> Self {
        Self {
            date: boundary.logical_date(t),
            start: boundary.day_start(t),
            end: boundary.day_end(t),
            boundary,
        }
    }

    /// The calendar date on which this logical day starts.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn contains(&self, t: &DateTime<Tz>) -> bool {
        self.start <= *t && *t <= self.end
    }

    /// The following logical day, or `None` at the end of representable time.
    pub fn next(&self) -> Option<Self> {
        let first = self
            .end
            .clone()
            .checked_add_signed(TimeDelta::milliseconds(1))?;
        Some(Self::with_boundary(self.boundary, &first))
    }

    /// The preceding logical day, or `None` at the start of representable
    /// time.
    pub fn previous(&self) -> Option<Self> {
        let last = self
            .start
            .clone()
            .checked_sub_signed(TimeDelta::milliseconds(1))?;
        Some(Self::with_boundary(self.boundary, &last))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    fn at(
        offset_hours: i32,
        date: (i32, u32, u32),
        time: (u32, u32, u32, u32),
    ) -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let naive = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_milli_opt(time.0, time.1, time.2, time.3)
            .unwrap();
        tz.from_local_datetime(&naive).unwrap()
    }

    #[test_case(
        (2024, 3, 10), (2, 30, 0, 0), (2024, 3, 9), (2024, 3, 10) ;
        "after midnight belongs to yesterday"
    )]
    #[test_case(
        (2024, 3, 10), (4, 59, 59, 999), (2024, 3, 9), (2024, 3, 10) ;
        "last millisecond before reset"
    )]
    #[test_case(
        (2024, 3, 10), (5, 0, 0, 0), (2024, 3, 10), (2024, 3, 11) ;
        "exactly at reset starts new day"
    )]
    #[test_case(
        (2024, 3, 10), (23, 59, 59, 999), (2024, 3, 10), (2024, 3, 11) ;
        "late evening"
    )]
    #[test_case(
        (2024, 1, 1), (0, 0, 0, 0), (2023, 12, 31), (2024, 1, 1) ;
        "new year midnight"
    )]
    #[test_case(
        (2024, 3, 1), (1, 0, 0, 0), (2024, 2, 29), (2024, 3, 1) ;
        "leap day"
    )]
    fn bounds(
        date: (i32, u32, u32),
        time: (u32, u32, u32, u32),
        start: (i32, u32, u32),
        end: (i32, u32, u32),
    ) {
        let t = at(9, date, time);

        assert_eq!(day_start(&t), at(9, start, (5, 0, 0, 0)));
        assert_eq!(day_end(&t), at(9, end, (4, 59, 59, 999)));
        assert_eq!(
            logical_date(&t),
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap()
        );
    }

    #[test]
    fn bounds_keep_the_input_zone() {
        let t = Utc.with_ymd_and_hms(2024, 6, 1, 3, 0, 0).unwrap();
        assert_eq!(
            day_start(&t),
            Utc.with_ymd_and_hms(2024, 5, 31, 5, 0, 0).unwrap()
        );

        // Same instant seen from UTC+9 is 12:00 local, so it is already the
        // 1st's logical day there.
        let tokyo = t.with_timezone(&FixedOffset::east_opt(9 * 3600).unwrap());
        assert_eq!(day_start(&tokyo), at(9, (2024, 6, 1), (5, 0, 0, 0)));
    }

    #[test]
    fn custom_reset_hour() {
        let boundary = DayBoundary::with_reset_hour(0).unwrap();
        let t = at(0, (2024, 3, 10), (0, 0, 0, 0));
        assert_eq!(boundary.day_start(&t), t);
        assert_eq!(boundary.day_end(&t), at(0, (2024, 3, 10), (23, 59, 59, 999)));

        assert!(matches!(
            DayBoundary::with_reset_hour(24),
            Err(ConfigError::InvalidResetHour(24))
        ));
    }

    #[test]
    fn logical_days_chain() {
        let day = LogicalDay::of(&at(1, (2024, 3, 10), (12, 0, 0, 0)));
        assert_eq!(day.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

        let next = day.next().unwrap();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(
            next.start().clone() - day.end().clone(),
            TimeDelta::milliseconds(1)
        );

        let back = next.previous().unwrap();
        assert_eq!(back.start(), day.start());
        assert_eq!(back.end(), day.end());
    }

    proptest! {
        #[test]
        fn start_and_end_contain_t(
            secs in 0i64..4_102_444_800,
            offset_minutes in -720i32..=840,
        ) {
            let tz = FixedOffset::east_opt(offset_minutes * 60).unwrap();
            let t = tz.timestamp_opt(secs, 0).unwrap();
            let day = LogicalDay::of(&t);

            prop_assert!(day.contains(&t));
            prop_assert_eq!(day.start().hour(), RESET_HOUR);
            prop_assert_eq!(
                day.end().clone() - day.start().clone(),
                TimeDelta::days(1) - TimeDelta::milliseconds(1)
            );
            if t.hour() < RESET_HOUR {
                prop_assert_eq!(day.start().date_naive(), t.date_naive().pred_opt().unwrap());
            } else {
                prop_assert_eq!(day.start().date_naive(), t.date_naive());
            }
        }

        #[test]
        fn bounds_are_stable_within_the_day(
            secs in 0i64..4_102_444_800,
            offset_ms in 0i64..86_400_000,
        ) {
            let t = Utc.timestamp_opt(secs, 0).unwrap();
            let day = LogicalDay::of(&t);
            let inside = day.start().clone() + TimeDelta::milliseconds(offset_ms);

            prop_assert_eq!(day_start(&inside), day.start().clone());
            prop_assert_eq!(day_end(&inside), day.end().clone());
            prop_assert_eq!(logical_date(&inside), day.date());
        }
    }
}
