//! Standard offset and daylight saving detection.
//!
//! The host zone database is reached only through [`UtcOffsetSource`], so a
//! computation can be pinned to any zone (or a plain closure) in tests.

use chrono::{Duration, FixedOffset, Local, NaiveDate, TimeZone};
use log::warn;

/// Supplies the UTC offset, in hours, in effect at local noon of a date.
pub trait UtcOffsetSource {
    fn utc_offset(&self, year: i32, month: u32, day: u32) -> f64;
}

/// The host's local time zone, as seen by [`chrono::Local`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeZone;

impl UtcOffsetSource for SystemTimeZone {
    fn utc_offset(&self, year: i32, month: u32, day: u32) -> f64 {
        let noon = normalized_date(year, month, day).and_then(|date| date.and_hms_opt(12, 0, 0));
        let Some(noon) = noon else {
            warn!("cannot build a local date from {year}-{month}-{day}, assuming UTC");
            return 0.0;
        };
        let offset = match Local.from_local_datetime(&noon).earliest() {
            Some(local) => *local.offset(),
            // noon fell in a transition gap
            None => *Local.from_utc_datetime(&noon).offset(),
        };
        offset.local_minus_utc() as f64 / 3600.0
    }
}

/// Months outside 1..=12 and days past either end of the month roll over
/// into the neighbouring months and years.
fn normalized_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_signed(Duration::days(i64::from(day) - 1))
}

impl UtcOffsetSource for FixedOffset {
    fn utc_offset(&self, _year: i32, _month: u32, _day: u32) -> f64 {
        self.local_minus_utc() as f64 / 3600.0
    }
}

impl<F> UtcOffsetSource for F
where
    F: Fn(i32, u32, u32) -> f64,
{
    fn utc_offset(&self, year: i32, month: u32, day: u32) -> f64 {
        self(year, month, day)
    }
}

/// Standard (non daylight saving) offset for `year`: the smaller of the
/// January and July offsets.
pub fn standard_offset<S: UtcOffsetSource + ?Sized>(source: &S, year: i32) -> f64 {
    let january = source.utc_offset(year, 1, 1);
    let july = source.utc_offset(year, 7, 1);
    january.min(july)
}

/// Whether daylight saving is in effect on the given date.
pub fn is_dst<S: UtcOffsetSource + ?Sized>(source: &S, year: i32, month: u32, day: u32) -> bool {
    source.utc_offset(year, month, day) != standard_offset(source, year)
}
