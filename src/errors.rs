// Define a generic error enum that can be used throughout the cronstead crate
#[derive(Debug)]
pub enum CronError {
    EmptyPattern,
    InvalidDate,
    InvalidTime,
    TimeSearchLimitExceeded,
    InvalidPattern(String),
    IllegalCharacters(String),
    UnknownMacro(String),
    ComponentError(String), // Used for various errors specifically from `CronComponent`
}
impl std::fmt::Display for CronError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CronError::TimeSearchLimitExceeded => {
                write!(f, "Time search limit exceeded.")
            }
            CronError::EmptyPattern => write!(f, "CronPattern cannot be an empty string."),
            CronError::InvalidDate => write!(f, "Encountered an invalid date."),
            CronError::InvalidTime => write!(f, "Encountered an invalid time."),
            CronError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
            CronError::IllegalCharacters(msg) => {
                write!(f, "Pattern contains illegal characters: {}", msg)
            }
            CronError::UnknownMacro(msg) => write!(f, "Unknown macro: {}", msg),
            CronError::ComponentError(msg) => write!(f, "Component error: {}", msg),
        }
    }
}
impl std::error::Error for CronError {}

/// Errors raised while parsing a single field into a [`crate::component::CronComponent`]
/// or a [`crate::year::YearField`].
#[derive(Debug)]
pub enum CronComponentError {
    OutOfBounds(String),
    InvalidSyntax(String),
    StepError(String),
    UnsupportedSpecialBit,
}

impl std::fmt::Display for CronComponentError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CronComponentError::OutOfBounds(msg) => write!(f, "value out of bounds: {}", msg),
            CronComponentError::InvalidSyntax(msg) => write!(f, "invalid syntax: {}", msg),
            CronComponentError::StepError(msg) => write!(f, "invalid step: {}", msg),
            CronComponentError::UnsupportedSpecialBit => {
                write!(f, "this field does not support that modifier")
            }
        }
    }
}

impl std::error::Error for CronComponentError {}

impl From<CronComponentError> for CronError {
    fn from(err: CronComponentError) -> Self {
        CronError::ComponentError(err.to_string())
    }
}
