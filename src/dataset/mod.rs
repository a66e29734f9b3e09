mod observation;
mod store;
mod training_set;

pub use observation::{Observation, Status};
pub use store::{ObservationStore, StatusCounts};
pub use training_set::{NUM_FEATURES, TrainingSet};
