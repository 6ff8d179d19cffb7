//! Application services.

pub mod responses;
pub mod summary;

pub use responses::{ResponseService, ServiceError};
pub use summary::{summarize, Summary, TrendPoint, Trends};
