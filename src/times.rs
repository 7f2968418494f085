use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::ParseError;

/// Identifies one of the nine computed times of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeId {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
}

impl TimeId {
    pub const ALL: [TimeId; 9] = [
        TimeId::Imsak,
        TimeId::Fajr,
        TimeId::Sunrise,
        TimeId::Dhuhr,
        TimeId::Asr,
        TimeId::Sunset,
        TimeId::Maghrib,
        TimeId::Isha,
        TimeId::Midnight,
    ];

    /// The five obligatory prayers.
    pub const PRAYERS: [TimeId; 5] = [
        TimeId::Fajr,
        TimeId::Dhuhr,
        TimeId::Asr,
        TimeId::Maghrib,
        TimeId::Isha,
    ];

    /// Lowercase key, as used by `tune_str` and `Display`.
    pub fn key(self) -> &'static str {
        match self {
            TimeId::Imsak => "imsak",
            TimeId::Fajr => "fajr",
            TimeId::Sunrise => "sunrise",
            TimeId::Dhuhr => "dhuhr",
            TimeId::Asr => "asr",
            TimeId::Sunset => "sunset",
            TimeId::Maghrib => "maghrib",
            TimeId::Isha => "isha",
            TimeId::Midnight => "midnight",
        }
    }

    /// Display name, e.g. "Fajr".
    pub fn name(self) -> &'static str {
        match self {
            TimeId::Imsak => "Imsak",
            TimeId::Fajr => "Fajr",
            TimeId::Sunrise => "Sunrise",
            TimeId::Dhuhr => "Dhuhr",
            TimeId::Asr => "Asr",
            TimeId::Sunset => "Sunset",
            TimeId::Maghrib => "Maghrib",
            TimeId::Isha => "Isha",
            TimeId::Midnight => "Midnight",
        }
    }
}

impl fmt::Display for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TimeId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| ParseError::UnknownTime(s.to_owned()))
    }
}

/// One value per [`TimeId`]. All nine entries are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSet<T> {
    pub imsak: T,
    pub fajr: T,
    pub sunrise: T,
    pub dhuhr: T,
    pub asr: T,
    pub sunset: T,
    pub maghrib: T,
    pub isha: T,
    pub midnight: T,
}

impl<T> TimeSet<T> {
    pub fn from_fn(mut f: impl FnMut(TimeId) -> T) -> Self {
        TimeSet {
            imsak: f(TimeId::Imsak),
            fajr: f(TimeId::Fajr),
            sunrise: f(TimeId::Sunrise),
            dhuhr: f(TimeId::Dhuhr),
            asr: f(TimeId::Asr),
            sunset: f(TimeId::Sunset),
            maghrib: f(TimeId::Maghrib),
            isha: f(TimeId::Isha),
            midnight: f(TimeId::Midnight),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> TimeSet<U> {
        TimeSet {
            imsak: f(self.imsak),
            fajr: f(self.fajr),
            sunrise: f(self.sunrise),
            dhuhr: f(self.dhuhr),
            asr: f(self.asr),
            sunset: f(self.sunset),
            maghrib: f(self.maghrib),
            isha: f(self.isha),
            midnight: f(self.midnight),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeId, &T)> {
        TimeId::ALL.into_iter().map(move |id| (id, &self[id]))
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(TimeId, &mut T)) {
        for id in TimeId::ALL {
            f(id, &mut self[id]);
        }
    }
}

impl<T> Index<TimeId> for TimeSet<T> {
    type Output = T;

    fn index(&self, id: TimeId) -> &T {
        match id {
            TimeId::Imsak => &self.imsak,
            TimeId::Fajr => &self.fajr,
            TimeId::Sunrise => &self.sunrise,
            TimeId::Dhuhr => &self.dhuhr,
            TimeId::Asr => &self.asr,
            TimeId::Sunset => &self.sunset,
            TimeId::Maghrib => &self.maghrib,
            TimeId::Isha => &self.isha,
            TimeId::Midnight => &self.midnight,
        }
    }
}

impl<T> IndexMut<TimeId> for TimeSet<T> {
    fn index_mut(&mut self, id: TimeId) -> &mut T {
        match id {
            TimeId::Imsak => &mut self.imsak,
            TimeId::Fajr => &mut self.fajr,
            TimeId::Sunrise => &mut self.sunrise,
            TimeId::Dhuhr => &mut self.dhuhr,
            TimeId::Asr => &mut self.asr,
            TimeId::Sunset => &mut self.sunset,
            TimeId::Maghrib => &mut self.maghrib,
            TimeId::Isha => &mut self.isha,
            TimeId::Midnight => &mut self.midnight,
        }
    }
}

/// Per time minute offsets applied after everything else.
pub type Offsets = TimeSet<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_ids() {
        assert_eq!("fajr".parse::<TimeId>(), Ok(TimeId::Fajr));
        assert_eq!("midnight".parse::<TimeId>(), Ok(TimeId::Midnight));
        // keys are exact lowercase ids
        assert!("Midnight".parse::<TimeId>().is_err());
        assert!(" fajr".parse::<TimeId>().is_err());
        assert_eq!(
            "tahajjud".parse::<TimeId>(),
            Err(ParseError::UnknownTime("tahajjud".into()))
        );
    }

    #[test]
    fn prayers_are_the_five_obligatory_times() {
        let keys: Vec<_> = TimeId::PRAYERS.iter().map(|id| id.key()).collect();
        assert_eq!(keys, ["fajr", "dhuhr", "asr", "maghrib", "isha"]);
    }

    #[test]
    fn index_matches_fields() {
        let set = TimeSet::from_fn(|id| id as usize);
        for (i, id) in TimeId::ALL.into_iter().enumerate() {
            assert_eq!(set[id], i);
        }
        assert_eq!(set.isha, 7);
    }

    #[test]
    fn iter_visits_all_nine_in_order() {
        let set = TimeSet::from_fn(TimeId::name);
        let names: Vec<_> = set.iter().map(|(_, name)| *name).collect();
        assert_eq!(
            names,
            [
                "Imsak", "Fajr", "Sunrise", "Dhuhr", "Asr", "Sunset", "Maghrib", "Isha",
                "Midnight"
            ]
        );
    }

    #[test]
    fn default_offsets_are_zero() {
        let offsets = Offsets::default();
        assert!(offsets.iter().all(|(_, v)| *v == 0.0));
    }
}
