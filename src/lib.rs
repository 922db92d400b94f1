pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::DominosClient;
pub use app::{dispatch, Command, Invocation};
pub use config::ApiConfig;
pub use utils::error::{ApiError, CommandError, Result};
