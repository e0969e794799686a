//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Okta management API command-line client
#[derive(Parser, Debug)]
#[command(name = "okta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Extra okta.yaml file, applied over the default locations and environment
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Org URL (overrides config files and environment)
    #[arg(long, global = true)]
    pub org_url: Option<String>,

    /// API token (overrides config files and environment)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group operations
    Groups {
        #[command(subcommand)]
        command: GroupsCommand,
    },

    /// User operations
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupsCommand {
    /// List groups
    List {
        /// Prefix match on the group name
        #[arg(long)]
        q: Option<String>,

        /// Filter expression, e.g. 'type eq "OKTA_GROUP"'
        #[arg(long)]
        filter: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Stop after this many groups
        #[arg(long)]
        max: Option<usize>,
    },

    /// Show one group
    Get {
        /// Group ID
        id: String,
    },

    /// List the members of a group
    Members {
        /// Group ID
        id: String,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Stop after this many users
        #[arg(long)]
        max: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users
    List {
        /// Prefix match on first name, last name and email
        #[arg(long)]
        q: Option<String>,

        /// Filter expression, e.g. 'status eq "ACTIVE"'
        #[arg(long)]
        filter: Option<String>,

        /// Search expression
        #[arg(long)]
        search: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Stop after this many users
        #[arg(long)]
        max: Option<usize>,
    },

    /// Show one user
    Get {
        /// User ID or login
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved configuration with secrets masked
    Show,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_groups_list() {
        let cli = Cli::parse_from([
            "okta", "--format", "pretty", "groups", "list", "--q", "Eng", "--max", "5",
        ]);
        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Groups {
                command: GroupsCommand::List { q, max, limit, .. },
            } => {
                assert_eq!(q.as_deref(), Some("Eng"));
                assert_eq!(max, Some(5));
                assert_eq!(limit, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "okta",
            "users",
            "get",
            "00u1",
            "--org-url",
            "https://dev-1.okta.com",
            "--token",
            "00abc",
        ]);
        assert_eq!(cli.org_url.as_deref(), Some("https://dev-1.okta.com"));
        assert_eq!(cli.token.as_deref(), Some("00abc"));
        assert!(matches!(
            cli.command,
            Commands::Users {
                command: UsersCommand::Get { ref id }
            } if id == "00u1"
        ));
    }
}
