use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::settings::{Adjustments, MidnightMode, Param};

// Calculation Methods
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    #[default]
    MWL, // Muslim World League
    ISNA,    // Islamic Society of North America
    Egypt,   // Egyptian General Authority of Survey
    Makkah,  // Umm Al-Qura University, Makkah
    Karachi, // University of Islamic Sciences, Karachi
    Tehran,  // Institute of Geophysics, University of Tehran
    Jafari,  // Shia Ithna-Ashari, Leva Institute, Qum
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::MWL,
        Method::ISNA,
        Method::Egypt,
        Method::Makkah,
        Method::Karachi,
        Method::Tehran,
        Method::Jafari,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Method::MWL => "MWL",
            Method::ISNA => "ISNA",
            Method::Egypt => "Egypt",
            Method::Makkah => "Makkah",
            Method::Karachi => "Karachi",
            Method::Tehran => "Tehran",
            Method::Jafari => "Jafari",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Method::MWL => "Muslim World League",
            Method::ISNA => "Islamic Society of North America (ISNA)",
            Method::Egypt => "Egyptian General Authority of Survey",
            Method::Makkah => "Umm Al-Qura University, Makkah",
            Method::Karachi => "University of Islamic Sciences, Karachi",
            Method::Tehran => "Institute of Geophysics, University of Tehran",
            Method::Jafari => "Shia Ithna-Ashari, Leva Institute, Qum",
        }
    }

    /// The method's parameter table, with the registry defaults
    /// (`maghrib: 0 min`, `midnight: Standard`) filled in where the method
    /// does not set them.
    pub fn adjustments(self) -> Adjustments {
        let (fajr, isha, maghrib, midnight) = match self {
            Method::MWL => (18.0, Param::Angle(17.0), None, None),
            Method::ISNA => (15.0, Param::Angle(15.0), None, None),
            Method::Egypt => (19.5, Param::Angle(17.5), None, None),
            // fajr was 19 degrees before 1430 hijri
            Method::Makkah => (18.5, Param::Minutes(90.0), None, None),
            Method::Karachi => (18.0, Param::Angle(18.0), None, None),
            // isha is not explicitly specified in this method
            Method::Tehran => (
                17.7,
                Param::Angle(14.0),
                Some(Param::Angle(4.5)),
                Some(MidnightMode::Jafari),
            ),
            Method::Jafari => (
                16.0,
                Param::Angle(14.0),
                Some(Param::Angle(4.0)),
                Some(MidnightMode::Jafari),
            ),
        };
        Adjustments {
            fajr: Some(Param::Angle(fajr)),
            isha: Some(isha),
            maghrib: Some(maghrib.unwrap_or(Param::Minutes(0.0))),
            midnight: Some(midnight.unwrap_or_default()),
            ..Default::default()
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| ParseError::UnknownMethod(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn keys_round_trip() {
        for method in Method::ALL {
            assert_eq!(method.key().parse::<Method>(), Ok(method));
        }
        assert_eq!(
            "mwl".parse::<Method>(),
            Err(ParseError::UnknownMethod("mwl".into()))
        );
    }

    #[test]
    fn makkah_isha_is_a_minute_offset() {
        let s = Settings::for_method(Method::Makkah);
        assert_eq!(s.fajr, Param::Angle(18.5));
        assert_eq!(s.isha, Param::Minutes(90.0));
        assert_eq!(s.maghrib, Param::Minutes(0.0));
    }

    #[test]
    fn shia_methods_use_jafari_midnight() {
        for method in [Method::Tehran, Method::Jafari] {
            let s = Settings::for_method(method);
            assert_eq!(s.midnight, MidnightMode::Jafari);
            assert!(matches!(s.maghrib, Param::Angle(_)));
        }
        let tehran = Settings::for_method(Method::Tehran);
        assert_eq!(tehran.fajr, Param::Angle(17.7));
        assert_eq!(tehran.maghrib, Param::Angle(4.5));
    }

    #[test]
    fn every_method_sets_the_registry_defaults() {
        for method in Method::ALL {
            let adj = method.adjustments();
            assert!(adj.maghrib.is_some());
            assert!(adj.midnight.is_some());
            assert!(adj.imsak.is_none());
            assert!(adj.asr.is_none());
        }
    }
}
