use std::{cell::RefCell, num::NonZeroUsize};

use uart_advisor::{
    AdvisorErr, ErrorModel, TrainedModel,
    recommend::{DEFAULT_BAUD_CANDIDATES, LengthSearch, recommend_baudrate, recommend_max_length},
};

/// Safe up to 2 m, unsafe between 2 m and 3 m, safe again beyond.
struct DipModel;

impl ErrorModel for DipModel {
    fn probability(&self, length: f64, _baudrate: u32) -> f64 {
        if (2.0..3.0).contains(&length) { 0.5 } else { 0.0 }
    }
}

/// Records every length it's queried with.
struct Recording<M> {
    inner: M,
    lengths: RefCell<Vec<f64>>,
}

impl<M: ErrorModel> ErrorModel for Recording<M> {
    fn probability(&self, length: f64, baudrate: u32) -> f64 {
        self.lengths.borrow_mut().push(length);
        self.inner.probability(length, baudrate)
    }
}

/// Probability depends only on the baud rate, through a lookup.
struct ByRate(Vec<(u32, f64)>);

impl ErrorModel for ByRate {
    fn probability(&self, _length: f64, baudrate: u32) -> f64 {
        self.0
            .iter()
            .find(|(b, _)| *b == baudrate)
            .map_or(1.0, |(_, p)| *p)
    }
}

#[test]
fn max_length_search_stops_at_the_first_breach_even_if_it_recovers() {
    let model = Recording {
        inner: DipModel,
        lengths: RefCell::new(Vec::new()),
    };

    let best = recommend_max_length(&model, 9600, &LengthSearch::default()).unwrap();
    assert_eq!(best, 1.5);

    // Nothing past the breach at 2.0 m is evaluated.
    assert_eq!(*model.lengths.borrow(), vec![0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn max_length_search_walks_an_ascending_grid() {
    let model = Recording {
        inner: TrainedModel::from_params([0.0, 0.0], -30.0).unwrap(),
        lengths: RefCell::new(Vec::new()),
    };
    let search = LengthSearch {
        threshold: 0.01,
        step: 1.5,
        max_steps: NonZeroUsize::new(4).unwrap(),
    };

    assert_eq!(recommend_max_length(&model, 19200, &search).unwrap(), 6.0);
    assert_eq!(*model.lengths.borrow(), vec![1.5, 3.0, 4.5, 6.0]);
}

#[test]
fn threshold_is_exclusive() {
    // Exactly at the threshold counts as unstable.
    struct Constant(f64);
    impl ErrorModel for Constant {
        fn probability(&self, _length: f64, _baudrate: u32) -> f64 {
            self.0
        }
    }

    let search = LengthSearch {
        threshold: 0.25,
        ..Default::default()
    };
    assert_eq!(recommend_max_length(&Constant(0.25), 9600, &search).unwrap(), 0.0);
    assert_eq!(
        recommend_max_length(&Constant(0.2499), 9600, &search).unwrap(),
        30.0
    );
}

#[test]
fn baudrate_scan_is_exhaustive_and_keeps_the_first_minimum() {
    let model = ByRate(vec![
        (9600, 0.3),
        (19200, 0.1),
        (38400, 0.2),
        (57600, 0.1),
        (115200, 0.05),
        (230400, 0.05),
    ]);

    let choice = recommend_baudrate(&model, 3.0, &DEFAULT_BAUD_CANDIDATES).unwrap();
    assert_eq!(choice.baudrate, 115200);
    assert_eq!(choice.probability, 0.05);

    let choice = recommend_baudrate(&model, 3.0, &[57600, 38400, 19200]).unwrap();
    assert_eq!(choice.baudrate, 57600);
}

#[test]
fn models_can_be_searched_through_trait_objects() {
    let models: Vec<Box<dyn ErrorModel>> = vec![
        Box::new(DipModel),
        Box::new(TrainedModel::from_params([1.0, 0.0], -10.0).unwrap()),
    ];

    let lengths: Vec<f64> = models
        .iter()
        .map(|m| recommend_max_length(m.as_ref(), 9600, &LengthSearch::default()).unwrap())
        .collect();
    assert_eq!(lengths, vec![1.5, 5.0]);

    assert!(matches!(
        recommend_baudrate(models[0].as_ref(), 1.0, &[]),
        Err(AdvisorErr::EmptyCandidateSet)
    ));
}
