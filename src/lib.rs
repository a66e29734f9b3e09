//! Estimates how likely a UART transmission is to fail from its cable length
//! and baud rate, and recommends communication parameters from that estimate.
//!
//! A [`TrainedModel`] is fitted once from logged observations and then passed
//! explicitly to every query, so any number of models can coexist.

pub mod arch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod recommend;
pub mod training;

pub use arch::{ErrorModel, TrainedModel};
pub use config::AdvisorConfig;
pub use dataset::{Observation, ObservationStore, Status, TrainingSet};
pub use error::{AdvisorErr, Result};
pub use recommend::{Advisor, Recommendation, recommend, recommend_baudrate, recommend_max_length};
pub use training::{LogisticTrainer, fit};
