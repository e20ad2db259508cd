use thiserror::Error;

pub type Result<T> = std::result::Result<T, RevdoorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevdoorError {
    /// The (n, t) pair admits no revolving-door enumeration.
    #[error("invalid parameters n={n}, t={t}: {requirement}")]
    InvalidParameters {
        n: usize,
        t: usize,
        requirement: &'static str,
    },

    /// A `set_state` payload that is not a valid combination.
    #[error("invalid state: {reason}")]
    InvalidState { reason: StateViolation },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateViolation {
    #[error("expected {expected} values, found {found}")]
    Length { expected: usize, found: usize },

    #[error("value {value} at index {index} is not below {bound}")]
    OutOfRange {
        index: usize,
        value: usize,
        bound: usize,
    },

    #[error("value {value} at index {index} repeats the previous value")]
    Duplicate { index: usize, value: usize },

    #[error("value at index {index} is smaller than the previous value")]
    Unordered { index: usize },
}

impl From<StateViolation> for RevdoorError {
    fn from(reason: StateViolation) -> Self {
        RevdoorError::InvalidState { reason }
    }
}
