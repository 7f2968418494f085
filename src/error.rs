use thiserror::Error;

/// Errors raised while decoding textual configuration.
///
/// The computation itself never fails; unreachable sun angles come back as
/// `NaN` and are formatted as [`INVALID_TIME`](crate::INVALID_TIME).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of the built-in calculation method keys
    #[error("unknown calculation method `{0}`")]
    UnknownMethod(String),

    /// Not one of the nine time ids
    #[error("unknown time `{0}`")]
    UnknownTime(String),

    /// Not a configurable setting
    #[error("unknown setting `{0}`")]
    UnknownSetting(String),

    /// Value could not be read as an angle, a minute offset or a named rule
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: &'static str, value: String },
}
