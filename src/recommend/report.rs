use log::info;
use serde::Serialize;

use super::{DEFAULT_BAUD_CANDIDATES, LengthSearch, recommend_baudrate, recommend_max_length};
use crate::{AdvisorErr, Result, arch::ErrorModel};

/// The answer to a single recommendation request.
///
/// Serializes to a flat record with the field names of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recommendation {
    /// A baud rate for a given cable length.
    ByLength {
        input_length: f64,
        recommended_baudrate: u32,
        error_probability: f64,
    },
    /// The longest stable cable for a given baud rate.
    ByBaudrate {
        input_baudrate: u32,
        max_stable_length: f64,
    },
}

/// Dispatches recommendation requests to the matching search.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisor {
    candidates: Vec<u32>,
    search: LengthSearch,
}

impl Default for Advisor {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_BAUD_CANDIDATES.to_vec(),
            search: LengthSearch::default(),
        }
    }
}

impl Advisor {
    /// Creates a new `Advisor`.
    ///
    /// # Arguments
    /// * `candidates` - Baud rates considered when recommending by length, in scan order.
    /// * `search` - The length grid walked when recommending by baud rate.
    pub fn new(candidates: Vec<u32>, search: LengthSearch) -> Self {
        Self { candidates, search }
    }

    pub fn candidates(&self) -> &[u32] {
        &self.candidates
    }

    pub fn search(&self) -> &LengthSearch {
        &self.search
    }

    /// Recommends a baud rate for `length`, or a maximum stable length for `baudrate`.
    ///
    /// # Errors
    /// `AmbiguousOrMissingInput` unless exactly one of `length` and `baudrate` is
    /// given, otherwise whatever the selected search reports.
    pub fn recommend<M>(
        &self,
        model: &M,
        length: Option<f64>,
        baudrate: Option<u32>,
    ) -> Result<Recommendation>
    where
        M: ErrorModel + ?Sized,
    {
        let recommendation = match (length, baudrate) {
            (Some(length), None) => {
                let choice = recommend_baudrate(model, length, &self.candidates)?;
                Recommendation::ByLength {
                    input_length: length,
                    recommended_baudrate: choice.baudrate,
                    error_probability: choice.probability,
                }
            }
            (None, Some(baudrate)) => Recommendation::ByBaudrate {
                input_baudrate: baudrate,
                max_stable_length: recommend_max_length(model, baudrate, &self.search)?,
            },
            (length, baudrate) => {
                return Err(AdvisorErr::AmbiguousOrMissingInput { length, baudrate });
            }
        };

        info!("recommendation: {recommendation:?}");
        Ok(recommendation)
    }
}

/// Runs [`Advisor::recommend`] with the default candidates and length grid.
///
/// # Errors
/// See [`Advisor::recommend`].
pub fn recommend<M>(model: &M, length: Option<f64>, baudrate: Option<u32>) -> Result<Recommendation>
where
    M: ErrorModel + ?Sized,
{
    Advisor::default().recommend(model, length, baudrate)
}
