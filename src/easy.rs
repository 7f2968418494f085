use chrono::Local;

use crate::engine::{CalendarDate, Coordinates, PrayTimes};
use crate::format::TimeFormat;
use crate::method::Method;
use crate::times::TimeSet;

/// One-shot 24h times for a fixed standard `timezone` (hours) without DST.
pub fn times_24h(
    method: Method,
    date: impl Into<CalendarDate>,
    coords: impl Into<Coordinates>,
    timezone: f64,
) -> TimeSet<String> {
    PrayTimes::new(method).get_times(date, coords, Some(timezone), Some(false), TimeFormat::H24)
}

/// Today's 24h times in the host's time zone, daylight saving included.
pub fn today(method: Method, coords: impl Into<Coordinates>) -> TimeSet<String> {
    let date = Local::now().date_naive();
    PrayTimes::new(method).get_times(date, coords, None, None, TimeFormat::H24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INVALID_TIME;

    #[test]
    fn test_easy() {
        let times = times_24h(Method::ISNA, (2024, 6, 21), (43., -80.), -5.);
        assert_eq!(times.sunrise, "04:41");
        assert_eq!(times.dhuhr, "12:22");
        assert_eq!(times.sunset, "20:03");
        assert_eq!(times.isha, "21:51");
    }

    #[test]
    fn today_has_a_noon() {
        let times = today(Method::MWL, (21.42, 39.83));
        assert_ne!(times.dhuhr, INVALID_TIME);
        assert_eq!(times.dhuhr.len(), 5);
    }
}
