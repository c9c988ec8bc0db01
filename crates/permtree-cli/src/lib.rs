//! # permtree-cli
//!
//! Command-line inspector for permtree definition files:
//!
//! - [`cli`]: argument parsing
//! - [`config`]: the TOML definition file and its conversion into stores
//! - [`commands`]: handlers returning printable lines
//! - [`logging`]: reloadable tracing subscriber

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::PermtreeConfig;
