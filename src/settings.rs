//! Calculation parameters.
//!
//! Textual values (`"18"`, `"10 min"`, `"Hanafi"` ...) are decoded once here
//! so the engine only ever sees typed parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::method::Method;

/// A sun depression angle or a fixed minute offset from an anchor time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Param {
    /// Degrees below the horizon.
    Angle(f64),
    /// Minutes relative to the anchor time (fajr for imsak, sunset for
    /// maghrib, maghrib for isha).
    Minutes(f64),
}

impl Param {
    /// The bare number, whatever its unit.
    pub fn value(self) -> f64 {
        match self {
            Param::Angle(v) | Param::Minutes(v) => v,
        }
    }

    pub fn minutes(self) -> Option<f64> {
        match self {
            Param::Minutes(m) => Some(m),
            Param::Angle(_) => None,
        }
    }

    fn parse(key: &'static str, value: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidValue {
            key,
            value: value.to_owned(),
        };
        let trimmed = value.trim();
        match trimmed.strip_suffix("min") {
            Some(number) => number
                .trim()
                .parse()
                .map(Param::Minutes)
                .map_err(|_| invalid()),
            None => trimmed.parse().map(Param::Angle).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Angle(a) => write!(f, "{a}"),
            Param::Minutes(m) => write!(f, "{m} min"),
        }
    }
}

/// Shadow length rule for Asr.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsrRule {
    /// Shafi`i, Maliki, Ja`fari, Hanbali: shadow factor 1
    #[default]
    Standard,
    /// Hanafi: shadow factor 2
    Hanafi,
    Factor(f64),
}

impl AsrRule {
    pub fn factor(self) -> f64 {
        match self {
            AsrRule::Standard => 1.0,
            AsrRule::Hanafi => 2.0,
            AsrRule::Factor(f) => f,
        }
    }
}

impl FromStr for AsrRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Standard" => Ok(AsrRule::Standard),
            "Hanafi" => Ok(AsrRule::Hanafi),
            other => other
                .parse()
                .map(AsrRule::Factor)
                .map_err(|_| ParseError::InvalidValue {
                    key: "asr",
                    value: s.to_owned(),
                }),
        }
    }
}

/// How midnight is placed between sunset and the next morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidnightMode {
    /// Mid sunset to sunrise
    #[default]
    Standard,
    /// Mid sunset to fajr
    Jafari,
}

impl FromStr for MidnightMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Standard" => Ok(MidnightMode::Standard),
            "Jafari" => Ok(MidnightMode::Jafari),
            _ => Err(ParseError::InvalidValue {
                key: "midnight",
                value: s.to_owned(),
            }),
        }
    }
}

/// Adjusting methods for higher latitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighLatMethod {
    /// middle of night
    #[default]
    NightMiddle,
    /// angle/60th of night
    AngleBased,
    /// 1/7th of night
    OneSeventh,
    /// No adjustment
    None,
}

impl HighLatMethod {
    /// Fraction of the night allowed between an anchor and the adjusted time.
    pub fn night_portion(self, angle: f64) -> f64 {
        match self {
            HighLatMethod::AngleBased => angle / 60.0,
            HighLatMethod::OneSeventh => 1.0 / 7.0,
            HighLatMethod::NightMiddle | HighLatMethod::None => 1.0 / 2.0,
        }
    }
}

impl FromStr for HighLatMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NightMiddle" => Ok(HighLatMethod::NightMiddle),
            "AngleBased" => Ok(HighLatMethod::AngleBased),
            "OneSeventh" => Ok(HighLatMethod::OneSeventh),
            "None" => Ok(HighLatMethod::None),
            _ => Err(ParseError::InvalidValue {
                key: "highLats",
                value: s.to_owned(),
            }),
        }
    }
}

/// Effective calculation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub imsak: Param,
    pub fajr: Param,
    /// minutes after mid-day for Dhuhr
    pub dhuhr: f64,
    pub asr: AsrRule,
    pub maghrib: Param,
    pub isha: Param,
    pub midnight: MidnightMode,
    pub high_lats: HighLatMethod,
}

impl Settings {
    /// Base defaults with `method`'s parameter table merged in.
    pub fn for_method(method: Method) -> Self {
        let mut settings = Settings {
            imsak: Param::Minutes(10.0),
            fajr: Param::Angle(18.0),
            dhuhr: 0.0,
            asr: AsrRule::Standard,
            maghrib: Param::Minutes(0.0),
            isha: Param::Angle(17.0),
            midnight: MidnightMode::Standard,
            high_lats: HighLatMethod::NightMiddle,
        };
        settings.apply(&method.adjustments());
        settings
    }

    /// Shallow merge: every field set in `adj` overwrites the current value.
    pub fn apply(&mut self, adj: &Adjustments) {
        if let Some(v) = adj.imsak {
            self.imsak = v;
        }
        if let Some(v) = adj.fajr {
            self.fajr = v;
        }
        if let Some(v) = adj.dhuhr {
            self.dhuhr = v;
        }
        if let Some(v) = adj.asr {
            self.asr = v;
        }
        if let Some(v) = adj.maghrib {
            self.maghrib = v;
        }
        if let Some(v) = adj.isha {
            self.isha = v;
        }
        if let Some(v) = adj.midnight {
            self.midnight = v;
        }
        if let Some(v) = adj.high_lats {
            self.high_lats = v;
        }
    }

    /// Sets one parameter from its textual key and value.
    ///
    /// Keys are `imsak`, `fajr`, `dhuhr`, `asr`, `maghrib`, `isha`,
    /// `midnight` and `highLats`. On error the settings are left untouched.
    pub fn apply_str(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        let mut adj = Adjustments::default();
        match key {
            "imsak" => adj.imsak = Some(Param::parse("imsak", value)?),
            "fajr" => adj.fajr = Some(Param::parse("fajr", value)?),
            "dhuhr" => adj.dhuhr = Some(Param::parse("dhuhr", value)?.value()),
            "asr" => adj.asr = Some(value.parse()?),
            "maghrib" => adj.maghrib = Some(Param::parse("maghrib", value)?),
            "isha" => adj.isha = Some(Param::parse("isha", value)?),
            "midnight" => adj.midnight = Some(value.parse()?),
            "highLats" => adj.high_lats = Some(value.parse()?),
            _ => return Err(ParseError::UnknownSetting(key.to_owned())),
        }
        self.apply(&adj);
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::for_method(Method::default())
    }
}

/// A partial [`Settings`]; `None` fields leave the current value alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Adjustments {
    pub imsak: Option<Param>,
    pub fajr: Option<Param>,
    pub dhuhr: Option<f64>,
    pub asr: Option<AsrRule>,
    pub maghrib: Option<Param>,
    pub isha: Option<Param>,
    pub midnight: Option<MidnightMode>,
    pub high_lats: Option<HighLatMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_mwl() {
        let s = Settings::default();
        assert_eq!(s.imsak, Param::Minutes(10.0));
        assert_eq!(s.fajr, Param::Angle(18.0));
        assert_eq!(s.isha, Param::Angle(17.0));
        assert_eq!(s.maghrib, Param::Minutes(0.0));
        assert_eq!(s.dhuhr, 0.0);
        assert_eq!(s.asr, AsrRule::Standard);
        assert_eq!(s.midnight, MidnightMode::Standard);
        assert_eq!(s.high_lats, HighLatMethod::NightMiddle);
    }

    #[test]
    fn parse_param_values() {
        assert_eq!(Param::parse("isha", "90 min"), Ok(Param::Minutes(90.0)));
        assert_eq!(Param::parse("isha", "5min"), Ok(Param::Minutes(5.0)));
        assert_eq!(Param::parse("fajr", " 17.7 "), Ok(Param::Angle(17.7)));
        assert_eq!(
            Param::parse("fajr", "dawn"),
            Err(ParseError::InvalidValue {
                key: "fajr",
                value: "dawn".into()
            })
        );
    }

    #[test]
    fn asr_rules() {
        assert_eq!("Standard".parse::<AsrRule>().map(AsrRule::factor), Ok(1.0));
        assert_eq!("Hanafi".parse::<AsrRule>().map(AsrRule::factor), Ok(2.0));
        assert_eq!("1.5".parse::<AsrRule>(), Ok(AsrRule::Factor(1.5)));
        assert!("Maliki".parse::<AsrRule>().is_err());
    }

    #[test]
    fn apply_str_merges_known_keys() {
        let mut s = Settings::default();
        s.apply_str("isha", "90 min").unwrap();
        s.apply_str("asr", "Hanafi").unwrap();
        s.apply_str("highLats", "OneSeventh").unwrap();
        s.apply_str("dhuhr", "2 min").unwrap();
        s.apply_str("midnight", "Jafari").unwrap();
        assert_eq!(s.isha, Param::Minutes(90.0));
        assert_eq!(s.asr, AsrRule::Hanafi);
        assert_eq!(s.high_lats, HighLatMethod::OneSeventh);
        assert_eq!(s.dhuhr, 2.0);
        assert_eq!(s.midnight, MidnightMode::Jafari);
        // untouched
        assert_eq!(s.fajr, Param::Angle(18.0));
    }

    #[test]
    fn apply_str_rejects_without_side_effects() {
        let mut s = Settings::default();
        let before = s;
        assert_eq!(
            s.apply_str("sunrise", "5"),
            Err(ParseError::UnknownSetting("sunrise".into()))
        );
        assert!(s.apply_str("highLats", "Polar").is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn night_portions() {
        assert_eq!(HighLatMethod::AngleBased.night_portion(18.0), 0.3);
        assert_eq!(HighLatMethod::OneSeventh.night_portion(18.0), 1.0 / 7.0);
        assert_eq!(HighLatMethod::NightMiddle.night_portion(18.0), 0.5);
    }
}
