use std::collections::HashSet;

use serde::Serialize;

use crate::{AdvisorErr, Result, arch::ErrorModel};

/// The baud rates tried when none are configured, in scan order.
pub const DEFAULT_BAUD_CANDIDATES: [u32; 6] = [9600, 19200, 38400, 57600, 115200, 230400];

/// The least error-prone baud rate for some cable length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaudrateChoice {
    pub baudrate: u32,
    pub probability: f64,
}

/// Picks the candidate baud rate with the lowest error probability at `length`.
///
/// Candidates are scanned in order and only a strictly lower probability
/// replaces the current best, so the earliest candidate wins ties.
///
/// # Errors
/// `EmptyCandidateSet` if `candidates` is empty, `InvalidInput` for duplicate
/// or zero candidates and for an invalid `length`.
pub fn recommend_baudrate<M>(model: &M, length: f64, candidates: &[u32]) -> Result<BaudrateChoice>
where
    M: ErrorModel + ?Sized,
{
    if candidates.is_empty() {
        return Err(AdvisorErr::EmptyCandidateSet);
    }

    let mut seen = HashSet::with_capacity(candidates.len());
    if let Some(dup) = candidates.iter().find(|&&b| !seen.insert(b)) {
        return Err(AdvisorErr::invalid_input(
            "baud rate candidates",
            format!("{dup} appears more than once"),
        ));
    }

    let mut best: Option<BaudrateChoice> = None;
    for &baudrate in candidates {
        let probability = model.predict_probability(length, baudrate)?;

        if best.is_none_or(|b| probability < b.probability) {
            best = Some(BaudrateChoice {
                baudrate,
                probability,
            });
        }
    }

    best.ok_or(AdvisorErr::EmptyCandidateSet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::TrainedModel;

    #[test]
    fn picks_the_lowest_probability() {
        // Higher baud rates are safer in this model.
        let model = TrainedModel::from_params([0.1, -1e-4], 0.0).unwrap();
        let choice = recommend_baudrate(&model, 10.0, &DEFAULT_BAUD_CANDIDATES).unwrap();

        assert_eq!(choice.baudrate, 230400);
        assert_eq!(
            choice.probability,
            model.predict_probability(10.0, 230400).unwrap()
        );
    }

    #[test]
    fn result_is_no_worse_than_any_candidate() {
        let model = TrainedModel::from_params([0.2, 3e-5], -6.0).unwrap();
        let choice = recommend_baudrate(&model, 4.0, &DEFAULT_BAUD_CANDIDATES).unwrap();

        assert!(DEFAULT_BAUD_CANDIDATES.contains(&choice.baudrate));
        for b in DEFAULT_BAUD_CANDIDATES {
            assert!(choice.probability <= model.predict_probability(4.0, b).unwrap());
        }
        assert_eq!(choice.baudrate, 9600);
    }

    #[test]
    fn earliest_candidate_wins_ties() {
        let flat = TrainedModel::from_params([0.0, 0.0], -2.0).unwrap();

        let choice = recommend_baudrate(&flat, 5.0, &[19200, 9600, 57600]).unwrap();
        assert_eq!(choice.baudrate, 19200);

        let choice = recommend_baudrate(&flat, 5.0, &[57600, 19200, 9600]).unwrap();
        assert_eq!(choice.baudrate, 57600);
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let model = TrainedModel::from_params([0.0, 0.0], 0.0).unwrap();
        assert!(matches!(
            recommend_baudrate(&model, 1.0, &[]),
            Err(AdvisorErr::EmptyCandidateSet)
        ));
    }

    #[test]
    fn invalid_candidates_and_lengths_are_rejected() {
        let model = TrainedModel::from_params([0.0, 0.0], 0.0).unwrap();
        assert!(matches!(
            recommend_baudrate(&model, 1.0, &[9600, 19200, 9600]),
            Err(AdvisorErr::InvalidInput { .. })
        ));
        assert!(matches!(
            recommend_baudrate(&model, 1.0, &[9600, 0]),
            Err(AdvisorErr::InvalidInput { what: "baudrate", .. })
        ));
        assert!(matches!(
            recommend_baudrate(&model, -3.0, &[9600]),
            Err(AdvisorErr::InvalidInput { what: "length", .. })
        ));
    }
}
