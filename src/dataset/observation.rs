use std::{fmt, str::FromStr};

use crate::{AdvisorErr, Result};

/// Outcome of a single logged transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Err,
}

impl Status {
    /// The binary label used for fitting: `0` for `Ok`, `1` for `Err`.
    pub fn label(self) -> f64 {
        match self {
            Status::Ok => 0.0,
            Status::Err => 1.0,
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "OK" => Ok(Status::Ok),
            "ERR" => Ok(Status::Err),
            other => Err(format!("unknown status {other:?}, expected \"OK\" or \"ERR\"")),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Err => write!(f, "ERR"),
        }
    }
}

/// A labeled transmission: cable length in meters, baud rate in bits per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    length: f64,
    baudrate: u32,
    status: Status,
}

impl Observation {
    /// Creates a new `Observation`.
    ///
    /// # Errors
    /// `InvalidInput` if `length` is negative or non-finite, or `baudrate` is zero.
    pub fn new(length: f64, baudrate: u32, status: Status) -> Result<Self> {
        if !length.is_finite() || length < 0.0 {
            return Err(AdvisorErr::invalid_input(
                "length",
                format!("{length} is not a finite, non-negative number of meters"),
            ));
        }

        if baudrate == 0 {
            return Err(AdvisorErr::invalid_input("baudrate", "must be positive"));
        }

        Ok(Self {
            length,
            baudrate,
            status,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn baudrate(&self) -> u32 {
        self.baudrate
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn label(&self) -> f64 {
        self.status.label()
    }
}
