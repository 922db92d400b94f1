pub mod address;
pub mod args;
pub mod classifier;
pub mod output;

pub use crate::domain::model::{MenuEntry, MenuGroups};
pub use crate::domain::ports::OrderingApi;
pub use crate::utils::error::Result;
