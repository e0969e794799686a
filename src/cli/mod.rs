//! CLI module
//!
//! Command-line interface for the Okta management API.
//!
//! # Commands
//!
//! - `groups list|get|members` - Browse groups and their members
//! - `users list|get` - Browse users
//! - `config show` - Print the resolved configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, ConfigCommand, GroupsCommand, OutputFormat, UsersCommand};
pub use runner::Runner;
