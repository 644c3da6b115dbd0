//! A minimal daylight-saving time zone.
//!
//! Real zones need a database; logical-day tests only need one transition
//! near the date under test, so [`SingleTransitionZone`] switches from one
//! fixed offset to another at a single UTC instant.

use std::fmt;

use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleTransitionZone {
    transition: NaiveDateTime,
    before: FixedOffset,
    after: FixedOffset,
}

impl SingleTransitionZone {
    /// A zone using `before` until the UTC instant `transition`, and `after`
    /// from then on.
    pub fn new(transition: NaiveDateTime, before: FixedOffset, after: FixedOffset) -> Self {
        Self {
            transition,
            before,
            after,
        }
    }

    fn offset_at(&self, utc: &NaiveDateTime) -> ZoneOffset {
        let fixed = if *utc < self.transition {
            self.before
        } else {
            self.after
        };
        ZoneOffset { zone: *self, fixed }
    }
}

/// US Eastern time around the 2024 spring-forward: clocks jump from
/// 02:00 EST to 03:00 EDT on 2024-03-10.
pub fn us_eastern_spring_2024() -> SingleTransitionZone {
    let transition = NaiveDate::from_ymd_opt(2024, 3, 10)
        .and_then(|date| date.and_hms_opt(7, 0, 0))
        .expect("valid transition instant");
    let hours = |h: i32| FixedOffset::west_opt(h * 3600).expect("valid offset");
    SingleTransitionZone::new(transition, hours(5), hours(4))
}

/// US Eastern time around the 2024 fall-back: clocks repeat 01:00 to 02:00
/// on 2024-11-03.
pub fn us_eastern_fall_2024() -> SingleTransitionZone {
    let transition = NaiveDate::from_ymd_opt(2024, 11, 3)
        .and_then(|date| date.and_hms_opt(6, 0, 0))
        .expect("valid transition instant");
    let hours = |h: i32| FixedOffset::west_opt(h * 3600).expect("valid offset");
    SingleTransitionZone::new(transition, hours(4), hours(5))
}

/// The offset of a [`SingleTransitionZone`], carrying its zone so
/// `DateTime::timezone` can recover it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ZoneOffset {
    zone: SingleTransitionZone,
    fixed: FixedOffset,
}

impl fmt::Debug for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.fixed, f)
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fixed, f)
    }
}

impl Offset for ZoneOffset {
    fn fix(&self) -> FixedOffset {
        self.fixed
    }
}

impl TimeZone for SingleTransitionZone {
    type Offset = ZoneOffset;

    fn from_offset(offset: &ZoneOffset) -> Self {
        offset.zone
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<ZoneOffset> {
        self.offset_from_local_datetime(&local.and_time(Default::default()))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<ZoneOffset> {
        let candidates: Vec<ZoneOffset> = [self.before, self.after]
            .into_iter()
            .map(|fixed| ZoneOffset { zone: *self, fixed })
            .filter(|offset| self.offset_at(&(*local - offset.fixed)) == *offset)
            .collect();

        match candidates.as_slice() {
            [] => LocalResult::None,
            [only] => LocalResult::Single(*only),
            [first, second, ..] if first == second => LocalResult::Single(*first),
            [first, second, ..] => {
                // earlier instant first
                if first.fixed.local_minus_utc() > second.fixed.local_minus_utc() {
                    LocalResult::Ambiguous(*first, *second)
                } else {
                    LocalResult::Ambiguous(*second, *first)
                }
            }
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> ZoneOffset {
        self.offset_at(&utc.and_time(Default::default()))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> ZoneOffset {
        self.offset_at(utc)
    }
}
