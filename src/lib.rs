/*-------------------------- In the name of God ----------------------------*\

    pray_times (rust)
    Islamic prayer times calculator library
    Based on PrayTimes 2.3 JavaScript library

----------------------------- Copyright Block --------------------------------

Copyright (C) 2007-2011 PrayTimes.org

Based on a JavaScript Code By: Hamid Zarrabi-Zadeh

License: GNU LGPL v3.0

TERMS OF USE:
    Permission is granted to use this code, with or
    without modification, in any website or application
    provided that credit is given to the original work
    with a link back to PrayTimes.org.

This program is distributed in the hope that it will
be useful, but WITHOUT ANY WARRANTY.

PLEASE DO NOT REMOVE THIS COPYRIGHT BLOCK.

------------------------------------------------------------------------------

User's Manual:
http://praytimes.org/manual

Calculating Formulas:
http://praytimes.org/calculation

\*--------------------------------------------------------------------------*/

//! Prayer times for a date, a location and a calculation method.
//!
//! ```
//! use pray_times::{Method, PrayTimes, TimeFormat};
//!
//! let pt = PrayTimes::new(Method::ISNA);
//! let times = pt.get_times(
//!     (2024, 6, 21),
//!     (43.0, -80.0),
//!     Some(-5.0),
//!     Some(false),
//!     TimeFormat::H24,
//! );
//! assert_eq!(times.sunrise, "04:41");
//! ```

pub mod astronomy;
pub mod easy;
mod engine;
mod error;
mod format;
pub mod math;
mod method;
mod settings;
mod times;
pub mod timezone;

pub use engine::{CalendarDate, Coordinates, PrayTimes};
pub use error::ParseError;
pub use format::{
    float_time_to_time24, format_time, format_time_with_suffixes, TimeFormat, DEFAULT_SUFFIXES,
    INVALID_TIME,
};
pub use method::Method;
pub use settings::{Adjustments, AsrRule, HighLatMethod, MidnightMode, Param, Settings};
pub use times::{Offsets, TimeId, TimeSet};
pub use timezone::{SystemTimeZone, UtcOffsetSource};
