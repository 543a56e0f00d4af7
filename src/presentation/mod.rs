pub mod bootstrap;
pub mod cli;
pub mod config;

pub use bootstrap::{BootstrapError, build_pipeline};
pub use cli::{Cli, Command};
pub use config::{Environment, Settings};
