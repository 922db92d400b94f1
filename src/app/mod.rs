pub mod commands;
pub mod dispatch;

pub use dispatch::{dispatch, Command, Invocation};
