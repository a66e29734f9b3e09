use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, info};

use super::{Observation, Status, TrainingSet};
use crate::{AdvisorErr, Result};

const FIELDS: usize = 5;

/// Per-status totals of a set of observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub ok: usize,
    pub err: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.ok + self.err
    }
}

/// An ordered, immutable sequence of observations read from a transmission log.
///
/// Each log record has five comma-separated fields and no header:
/// `timestamp,status,sent,length,baudrate`. Only status, length and baud rate
/// survive ingestion.
#[derive(Debug, Clone, Default)]
pub struct ObservationStore {
    observations: Vec<Observation>,
}

impl ObservationStore {
    /// Wraps already validated observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Reads the log at `path`.
    ///
    /// # Errors
    /// `Io` if the file can't be read, `InvalidObservation` on the first bad record.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let store = Self::from_reader(BufReader::new(file))?;

        info!(
            "loaded {} observations from {}",
            store.len(),
            path.display()
        );

        Ok(store)
    }

    /// Parses every record in `reader`. Blank lines are skipped.
    ///
    /// # Errors
    /// `Io` on read failures, `InvalidObservation` on the first bad record.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut observations = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            observations.push(parse_record(&line, i + 1)?);
        }

        debug!("parsed {} records", observations.len());
        Ok(Self { observations })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// Counts the observations of each status.
    pub fn counts(&self) -> StatusCounts {
        self.observations
            .iter()
            .fold(StatusCounts::default(), |mut acc, obs| {
                match obs.status() {
                    Status::Ok => acc.ok += 1,
                    Status::Err => acc.err += 1,
                }
                acc
            })
    }

    /// Builds the feature matrix and label vector of these observations.
    pub fn training_set(&self) -> TrainingSet {
        TrainingSet::from_observations(&self.observations)
    }
}

/// Parses a single `timestamp,status,sent,length,baudrate` record.
///
/// # Arguments
/// * `line` - The raw record.
/// * `line_no` - Its 1-based position in the log, for error reporting.
fn parse_record(line: &str, line_no: usize) -> Result<Observation> {
    let invalid = |reason: String| AdvisorErr::InvalidObservation {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.trim_end_matches('\r').split(',').collect();
    let [_timestamp, status, _sent, length, baudrate] = fields[..] else {
        return Err(invalid(format!(
            "expected {FIELDS} fields, got {}",
            fields.len()
        )));
    };

    let status: Status = status.trim().parse().map_err(invalid)?;

    let length: f64 = length
        .trim()
        .parse()
        .map_err(|_| invalid(format!("length {length:?} is not a number")))?;

    let baudrate: u32 = baudrate
        .trim()
        .parse()
        .map_err(|_| invalid(format!("baud rate {baudrate:?} is not a positive integer")))?;

    Observation::new(length, baudrate, status).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const LOG: &str = "\
2025-01-10 12:00:00,OK,aB3dE5gH7j,1.00,9600
2025-01-10 12:00:01,ERR,Zx9Yw8Vu7T,30.00,230400

2025-01-10 12:00:02,OK,Qw1Er2Ty3U,2.50,19200
";

    #[test]
    fn parses_all_records_and_skips_blank_lines() {
        let store = ObservationStore::from_reader(Cursor::new(LOG)).unwrap();
        assert_eq!(store.len(), 3);

        let first = store.observations()[0];
        assert_eq!(first.length(), 1.0);
        assert_eq!(first.baudrate(), 9600);
        assert_eq!(first.status(), Status::Ok);

        assert_eq!(store.counts(), StatusCounts { ok: 2, err: 1 });
        assert_eq!(store.counts().total(), 3);
    }

    #[test]
    fn unknown_status_is_rejected_with_its_line() {
        let log = "t,OK,x,1.0,9600\nt,MAYBE,x,1.0,9600\n";
        let err = ObservationStore::from_reader(Cursor::new(log)).unwrap_err();
        assert!(
            matches!(err, AdvisorErr::InvalidObservation { line: 2, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        for row in ["t,OK,x,long,9600", "t,OK,x,1.0,fast", "t,OK,x,1.0,-9600"] {
            let err = ObservationStore::from_reader(Cursor::new(row)).unwrap_err();
            assert!(matches!(err, AdvisorErr::InvalidObservation { line: 1, .. }));
        }
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        for row in ["t,OK,x,1.0", "t,OK,x,1.0,9600,extra"] {
            let err = ObservationStore::from_reader(Cursor::new(row)).unwrap_err();
            assert!(matches!(err, AdvisorErr::InvalidObservation { line: 1, .. }));
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for row in ["t,ERR,x,-2.0,9600", "t,OK,x,1.0,0", "t,OK,x,-5.0,0", "t,OK,x,inf,9600"] {
            let err = ObservationStore::from_reader(Cursor::new(row)).unwrap_err();
            assert!(matches!(err, AdvisorErr::InvalidObservation { line: 1, .. }));
        }
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let store = ObservationStore::from_reader(Cursor::new("t,ERR,x,3.5,57600\r\n")).unwrap();
        assert_eq!(store.observations()[0].baudrate(), 57600);
    }
}
