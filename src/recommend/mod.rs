mod baudrate;
mod length;
mod report;

pub use baudrate::{BaudrateChoice, DEFAULT_BAUD_CANDIDATES, recommend_baudrate};
pub use length::{LengthSearch, recommend_max_length};
pub use report::{Advisor, Recommendation, recommend};
