//! Command-line interface module.

mod args;
pub mod optimize;
pub mod serve;

pub use args::{Cli, Commands, OptimizeArgs};
