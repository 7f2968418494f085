use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use log::{debug, trace, warn};

use crate::astronomy::{julian_date, sun_position};
use crate::error::ParseError;
use crate::format::{format_time, TimeFormat};
use crate::math::{darccos, darccot, dcos, dsin, dtan, fix_hour};
use crate::method::Method;
use crate::settings::{Adjustments, HighLatMethod, MidnightMode, Settings};
use crate::times::{Offsets, TimeId, TimeSet};
use crate::timezone::{is_dst, standard_offset, SystemTimeZone, UtcOffsetSource};

/// Observer position. Elevation is in meters above sea level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
            elevation,
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Coordinates::new(latitude, longitude, 0.0)
    }
}

impl From<(f64, f64, f64)> for Coordinates {
    fn from((latitude, longitude, elevation): (f64, f64, f64)) -> Self {
        Coordinates::new(latitude, longitude, elevation)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Coordinates::new(latitude, longitude, 0.0)
    }
}

impl From<[f64; 3]> for Coordinates {
    fn from([latitude, longitude, elevation]: [f64; 3]) -> Self {
        Coordinates::new(latitude, longitude, elevation)
    }
}

/// A Gregorian calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<(i32, u32, u32)> for CalendarDate {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        CalendarDate { year, month, day }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Prayer times calculator.
///
/// Holds only configuration; everything derived from a date and a location
/// lives in a per call context, so one instance can serve any number of
/// concurrent computations.
#[derive(Clone)]
pub struct PrayTimes {
    method: Method,
    settings: Settings,
    offsets: Offsets,
    num_iterations: usize,
    zone: Arc<dyn UtcOffsetSource + Send + Sync>,
}

impl fmt::Debug for PrayTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrayTimes")
            .field("method", &self.method)
            .field("settings", &self.settings)
            .field("offsets", &self.offsets)
            .field("num_iterations", &self.num_iterations)
            .finish_non_exhaustive()
    }
}

impl Default for PrayTimes {
    fn default() -> Self {
        PrayTimes::new(Method::default())
    }
}

impl PrayTimes {
    pub fn new(method: Method) -> Self {
        PrayTimes {
            method,
            settings: Settings::for_method(method),
            offsets: Offsets::default(),
            num_iterations: 1,
            zone: Arc::new(SystemTimeZone),
        }
    }

    /// Builds a calculator from a method key such as `"ISNA"`. Unknown keys
    /// fall back to MWL.
    pub fn from_key(key: &str) -> Self {
        let method = key.parse().unwrap_or_else(|e: ParseError| {
            warn!("{e}, falling back to {}", Method::MWL);
            Method::MWL
        });
        PrayTimes::new(method)
    }

    /// Replaces the source used to resolve `None` time zones and DST flags.
    pub fn with_time_zone<Z>(mut self, zone: Z) -> Self
    where
        Z: UtcOffsetSource + Send + Sync + 'static,
    {
        self.zone = Arc::new(zone);
        self
    }

    /* set calculation method */
    pub fn set_method(&mut self, method: Method) {
        self.adjust(method.adjustments());
        self.method = method;
    }

    /// Like [`set_method`](Self::set_method) for a textual key; unknown keys
    /// leave the current configuration in place.
    pub fn set_method_key(&mut self, key: &str) {
        match key.parse() {
            Ok(method) => self.set_method(method),
            Err(e) => warn!("{e}, keeping {}", self.method),
        }
    }

    /* set calculating parameters */
    pub fn adjust(&mut self, adjustments: Adjustments) {
        self.settings.apply(&adjustments);
    }

    /// Sets one parameter by its textual key (`"isha"`, `"highLats"` ...).
    ///
    /// Unknown keys are ignored. A value that cannot be decoded is reported
    /// and the previous value is kept.
    pub fn adjust_str(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        match self.settings.apply_str(key, value) {
            Err(ParseError::UnknownSetting(key)) => {
                warn!("ignoring unknown setting `{key}`");
                Ok(())
            }
            other => other,
        }
    }

    /* set time offsets, in minutes */
    pub fn tune<I>(&mut self, offsets: I)
    where
        I: IntoIterator<Item = (TimeId, f64)>,
    {
        for (id, minutes) in offsets {
            self.offsets[id] = minutes;
        }
    }

    /// Like [`tune`](Self::tune) for a textual time key; unknown keys are
    /// ignored.
    pub fn tune_str(&mut self, key: &str, minutes: f64) {
        match key.parse::<TimeId>() {
            Ok(id) => self.offsets[id] = minutes,
            Err(e) => warn!("{e}, offset ignored"),
        }
    }

    /// Number of refinement passes over the sun position; at least one.
    pub fn set_iterations(&mut self, iterations: usize) {
        self.num_iterations = iterations.max(1);
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    pub fn iterations(&self) -> usize {
        self.num_iterations
    }

    /// The built-in method table.
    pub fn defaults() -> impl Iterator<Item = (Method, Adjustments)> {
        Method::ALL.into_iter().map(|m| (m, m.adjustments()))
    }

    /// Times of `date` at `coords`, formatted.
    ///
    /// `timezone` is the standard UTC offset in hours and `dst` whether an
    /// extra hour of daylight saving applies; `None` resolves either from
    /// the configured [`UtcOffsetSource`]. Times the sun never reaches are
    /// rendered as [`INVALID_TIME`](crate::INVALID_TIME).
    pub fn get_times(
        &self,
        date: impl Into<CalendarDate>,
        coords: impl Into<Coordinates>,
        timezone: Option<f64>,
        dst: Option<bool>,
        format: TimeFormat,
    ) -> TimeSet<String> {
        self.compute(date, coords, timezone, dst)
            .map(|time| format_time(time, format))
    }

    /// Same as [`get_times`](Self::get_times) but returns fractional hours
    /// (`NaN` where undefined).
    pub fn compute(
        &self,
        date: impl Into<CalendarDate>,
        coords: impl Into<Coordinates>,
        timezone: Option<f64>,
        dst: Option<bool>,
    ) -> TimeSet<f64> {
        let date = date.into();
        let coords = coords.into();
        let ctx = self.context(date, coords, timezone, dst);
        debug!(
            "{} times for {}-{:02}-{:02} at {:?}, UTC{:+}",
            self.method, date.year, date.month, date.day, coords, ctx.time_zone
        );
        let mut times = ctx.compute_times(self.num_iterations);
        self.tune_times(&mut times);
        times
    }

    fn context(
        &self,
        date: CalendarDate,
        coords: Coordinates,
        timezone: Option<f64>,
        dst: Option<bool>,
    ) -> Context<'_> {
        let CalendarDate { year, month, day } = date;
        let timezone = timezone.unwrap_or_else(|| standard_offset(&*self.zone, year));
        let dst = dst.unwrap_or_else(|| is_dst(&*self.zone, year, month, day));
        Context {
            settings: &self.settings,
            coords,
            time_zone: timezone + if dst { 1.0 } else { 0.0 },
            julian_date: julian_date(year, month, day) - coords.longitude / (15. * 24.),
        }
    }

    /* apply offsets to the times */
    fn tune_times(&self, times: &mut TimeSet<f64>) {
        times.for_each_mut(|id, time| *time += self.offsets[id] / 60.0);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ccw, // before noon
    Cw,
}

/// Everything derived from a single request.
struct Context<'a> {
    settings: &'a Settings,
    coords: Coordinates,
    time_zone: f64,
    julian_date: f64,
}

impl Context<'_> {
    fn compute_times(&self, iterations: usize) -> TimeSet<f64> {
        // default times
        let mut times = TimeSet {
            imsak: 5.,
            fajr: 5.,
            sunrise: 6.,
            dhuhr: 12.,
            asr: 13.,
            sunset: 18.,
            maghrib: 18.,
            isha: 18.,
            midnight: f64::NAN,
        };

        for pass in 0..iterations {
            times = self.compute_prayer_times(&times);
            trace!("pass {pass}: {times:?}");
        }

        self.adjust_times(&mut times);

        let settings = self.settings;
        let morning = match settings.midnight {
            MidnightMode::Jafari => times.fajr,
            MidnightMode::Standard => times.sunrise,
        };
        times.midnight = times.sunset + time_diff(times.sunset, morning) / 2.0;

        times
    }

    /* compute prayer times at given julian date */
    fn compute_prayer_times(&self, times: &TimeSet<f64>) -> TimeSet<f64> {
        let t = day_portion(times);
        let settings = self.settings;
        let rise_set = self.rise_set_angle();

        TimeSet {
            imsak: self.sun_angle_time(settings.imsak.value(), t.imsak, Direction::Ccw),
            fajr: self.sun_angle_time(settings.fajr.value(), t.fajr, Direction::Ccw),
            sunrise: self.sun_angle_time(rise_set, t.sunrise, Direction::Ccw),
            dhuhr: self.mid_day(t.dhuhr),
            asr: self.asr_time(settings.asr.factor(), t.asr),
            sunset: self.sun_angle_time(rise_set, t.sunset, Direction::Cw),
            maghrib: self.sun_angle_time(settings.maghrib.value(), t.maghrib, Direction::Cw),
            isha: self.sun_angle_time(settings.isha.value(), t.isha, Direction::Cw),
            midnight: f64::NAN,
        }
    }

    /* adjust times in a prayer time set */
    fn adjust_times(&self, times: &mut TimeSet<f64>) {
        let settings = self.settings;
        let shift = self.time_zone - self.coords.longitude / 15.0;
        times.for_each_mut(|_, time| *time += shift);

        if settings.high_lats != HighLatMethod::None {
            self.adjust_high_lats(times);
        }

        if let Some(minutes) = settings.imsak.minutes() {
            times.imsak = times.fajr - minutes / 60.0;
        }
        if let Some(minutes) = settings.maghrib.minutes() {
            times.maghrib = times.sunset + minutes / 60.0;
        }
        if let Some(minutes) = settings.isha.minutes() {
            times.isha = times.maghrib + minutes / 60.0;
        }
        times.dhuhr += settings.dhuhr / 60.0;
    }

    /* adjust imsak, fajr, isha and maghrib for locations in higher latitudes */
    fn adjust_high_lats(&self, times: &mut TimeSet<f64>) {
        let settings = self.settings;
        let night = time_diff(times.sunset, times.sunrise); // sunset to sunrise

        times.imsak = self.adjust_hl_time(
            times.imsak,
            times.sunrise,
            settings.imsak.value(),
            night,
            Direction::Ccw,
        );
        times.fajr = self.adjust_hl_time(
            times.fajr,
            times.sunrise,
            settings.fajr.value(),
            night,
            Direction::Ccw,
        );
        times.isha = self.adjust_hl_time(
            times.isha,
            times.sunset,
            settings.isha.value(),
            night,
            Direction::Cw,
        );
        times.maghrib = self.adjust_hl_time(
            times.maghrib,
            times.sunset,
            settings.maghrib.value(),
            night,
            Direction::Cw,
        );
    }

    fn adjust_hl_time(&self, time: f64, base: f64, angle: f64, night: f64, dir: Direction) -> f64 {
        let portion = self.settings.high_lats.night_portion(angle) * night;
        let diff = match dir {
            Direction::Ccw => time_diff(time, base),
            Direction::Cw => time_diff(base, time),
        };
        if time.is_nan() || diff > portion {
            match dir {
                Direction::Ccw => base - portion,
                Direction::Cw => base + portion,
            }
        } else {
            time
        }
    }

    /* compute mid-day (Dhuhr, Zawal) time */
    fn mid_day(&self, t: f64) -> f64 {
        let eqt = sun_position(self.julian_date + t).equation_of_time;
        fix_hour(12. - eqt)
    }

    /* compute the time at which sun reaches a specific angle below horizon */
    fn sun_angle_time(&self, angle: f64, t: f64, dir: Direction) -> f64 {
        let lat = self.coords.latitude;
        let decl = sun_position(self.julian_date + t).declination;
        let noon = self.mid_day(t);
        let v = 1.0 / 15.0
            * darccos((-dsin(angle) - dsin(decl) * dsin(lat)) / (dcos(decl) * dcos(lat)));
        match dir {
            Direction::Ccw => noon - v,
            Direction::Cw => noon + v,
        }
    }

    /* compute the time of Asr */
    fn asr_time(&self, factor: f64, t: f64) -> f64 {
        let decl = sun_position(self.julian_date + t).declination;
        let angle = -darccot(factor + dtan((self.coords.latitude - decl).abs()));
        self.sun_angle_time(angle, t, Direction::Cw)
    }

    /* sun angle for sunset/sunrise, corrected for elevation */
    fn rise_set_angle(&self) -> f64 {
        0.833 + 0.0347 * self.coords.elevation.sqrt()
    }
}

/* convert hours to day portions */
fn day_portion(times: &TimeSet<f64>) -> TimeSet<f64> {
    times.map(|time| time / 24.0)
}

/* compute the difference between two times */
fn time_diff(time1: f64, time2: f64) -> f64 {
    fix_hour(time2 - time1)
}
