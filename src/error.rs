use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, AdvisorErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum AdvisorErr {
    /// A raw log record could not be turned into an observation.
    InvalidObservation { line: usize, reason: String },
    /// The labels of the training set span a single class (or none at all).
    DegenerateTrainingSet { ok: usize, err: usize },
    EmptyCandidateSet,
    /// A query argument is non-finite or out of its allowed range.
    InvalidInput { what: &'static str, reason: String },
    /// `recommend` needs exactly one of length and baud rate.
    AmbiguousOrMissingInput {
        length: Option<f64>,
        baudrate: Option<u32>,
    },
    InvalidConfig(String),
    Io(io::Error),
}

impl AdvisorErr {
    pub(crate) fn invalid_input(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            what,
            reason: reason.into(),
        }
    }
}

impl Display for AdvisorErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorErr::InvalidObservation { line, reason } => {
                write!(f, "invalid observation at line {line}: {reason}")
            }
            AdvisorErr::DegenerateTrainingSet { ok, err } => write!(
                f,
                "training set needs both labels to fit, got {ok} OK and {err} ERR observations"
            ),
            AdvisorErr::EmptyCandidateSet => write!(f, "the baud rate candidate set is empty"),
            AdvisorErr::InvalidInput { what, reason } => write!(f, "invalid {what}: {reason}"),
            AdvisorErr::AmbiguousOrMissingInput { length, baudrate } => match (length, baudrate) {
                (Some(l), Some(b)) => write!(
                    f,
                    "expected either a length or a baud rate, got both ({l} m and {b} bps)"
                ),
                _ => write!(f, "expected either a length or a baud rate, got neither"),
            },
            AdvisorErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            AdvisorErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for AdvisorErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AdvisorErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AdvisorErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
