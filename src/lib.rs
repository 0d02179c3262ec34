pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::{CliConfig, ServiceConfig};
pub use core::aggregator::FanOutAggregator;
pub use core::fetcher::HttpNumberSource;
pub use server::{router, AppState};
pub use utils::error::{AggError, Result, SourceError};
