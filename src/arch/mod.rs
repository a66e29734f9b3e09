mod logistic;
mod model;
mod sigmoid;

pub use logistic::TrainedModel;
pub use model::ErrorModel;
pub use sigmoid::{Sigmoid, softplus};
