pub mod aggregator;
pub mod fetcher;
pub mod processor;

pub use crate::domain::model::FetchOutcome;
pub use crate::domain::ports::{ConfigProvider, NumberSource};
pub use crate::utils::error::Result;
