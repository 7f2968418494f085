use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::math::fix_hour;

/// Rendered in place of a time the sun never reaches.
pub const INVALID_TIME: &str = "-----";

pub const DEFAULT_SUFFIXES: [&str; 2] = ["am", "pm"];

// Time Formats
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeFormat {
    #[default]
    H24, // 24-hour format
    H12,         // 12-hour format
    H12NoSuffix, // 12-hour format with no suffix
    Float,       // floating point number
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeFormat::H24 => "24h",
            TimeFormat::H12 => "12h",
            TimeFormat::H12NoSuffix => "12hNS",
            TimeFormat::Float => "Float",
        })
    }
}

impl FromStr for TimeFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(TimeFormat::H24),
            "12h" => Ok(TimeFormat::H12),
            "12hNS" => Ok(TimeFormat::H12NoSuffix),
            "Float" => Ok(TimeFormat::Float),
            _ => Err(ParseError::InvalidValue {
                key: "format",
                value: s.to_owned(),
            }),
        }
    }
}

/// Converts fractional hours to `format`, with `am`/`pm` suffixes.
pub fn format_time(time: f64, format: TimeFormat) -> String {
    format_time_with_suffixes(time, format, DEFAULT_SUFFIXES)
}

pub fn format_time_with_suffixes(time: f64, format: TimeFormat, suffixes: [&str; 2]) -> String {
    if time.is_nan() {
        return INVALID_TIME.into();
    }
    let (hours, minutes) = match format {
        TimeFormat::Float => return time.to_string(),
        _ => get_float_time_parts(time),
    };
    match format {
        TimeFormat::H12 => {
            let suffix = suffixes[if hours < 12 { 0 } else { 1 }];
            format!("{}:{:02} {}", twelve_hour(hours), minutes, suffix)
        }
        TimeFormat::H12NoSuffix => format!("{}:{:02}", twelve_hour(hours), minutes),
        _ => format!("{:02}:{:02}", hours, minutes),
    }
}

/* convert float hours to 24h format */
pub fn float_time_to_time24(time: f64) -> String {
    format_time(time, TimeFormat::H24)
}

fn twelve_hour(hours: u32) -> u32 {
    (hours + 11) % 12 + 1
}

/* get hours and minutes parts of a float time */
fn get_float_time_parts(time: f64) -> (u32, u32) {
    let time = fix_hour(time + 0.5 / 60.); // add 0.5 minutes to round
    let hours = time.floor();
    let minutes = ((time - hours) * 60.).floor();
    (hours as u32, (minutes as u32).min(59))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_four_hour() {
        assert_eq!(format_time(13.5, TimeFormat::H24), "13:30");
        assert_eq!(format_time(5.05, TimeFormat::H24), "05:03");
        assert_eq!(format_time(0.0, TimeFormat::H24), "00:00");
        assert_eq!(float_time_to_time24(18.75), "18:45");
    }

    #[test]
    fn twelve_hour_with_and_without_suffix() {
        assert_eq!(format_time(13.5, TimeFormat::H12), "1:30 pm");
        assert_eq!(format_time(0.25, TimeFormat::H12), "12:15 am");
        assert_eq!(format_time(12.0, TimeFormat::H12), "12:00 pm");
        assert_eq!(format_time(13.5, TimeFormat::H12NoSuffix), "1:30");
    }

    #[test]
    fn custom_suffixes() {
        assert_eq!(
            format_time_with_suffixes(20.0, TimeFormat::H12, ["AM", "PM"]),
            "8:00 PM"
        );
    }

    #[test]
    fn rounds_to_nearest_minute_and_wraps() {
        assert_eq!(format_time(23.999, TimeFormat::H24), "00:00");
        assert_eq!(format_time(25.0, TimeFormat::H24), "01:00");
        assert_eq!(format_time(-0.5, TimeFormat::H24), "23:30");
        // 10:29:40 rounds up
        assert_eq!(format_time(10.0 + 29.0 / 60.0 + 40.0 / 3600.0, TimeFormat::H24), "10:30");
    }

    #[test]
    fn float_passes_value_through() {
        assert_eq!(format_time(13.5, TimeFormat::Float), "13.5");
        assert_eq!(format_time(25.25, TimeFormat::Float), "25.25");
    }

    #[test]
    fn nan_is_invalid_in_every_format() {
        for format in [
            TimeFormat::H24,
            TimeFormat::H12,
            TimeFormat::H12NoSuffix,
            TimeFormat::Float,
        ] {
            assert_eq!(format_time(f64::NAN, format), INVALID_TIME);
        }
    }

    #[test]
    fn format_names() {
        assert_eq!("12hNS".parse::<TimeFormat>(), Ok(TimeFormat::H12NoSuffix));
        assert_eq!(TimeFormat::Float.to_string(), "Float");
        assert!("24".parse::<TimeFormat>().is_err());
    }
}
