//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ConfigCommand, GroupsCommand, OutputFormat, UsersCommand};
use crate::client::{ListGroupsOptions, ListUsersOptions, OktaClient};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::CollectionClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
    cancel: CancellationToken,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop listing commands when `cancel` fires
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Groups { command } => self.groups(command).await,
            Commands::Users { command } => self.users(command).await,
            Commands::Config {
                command: ConfigCommand::Show,
            } => self.show_config(),
        }
    }

    async fn groups(&self, command: &GroupsCommand) -> Result<()> {
        let groups = self.client()?.groups();
        match command {
            GroupsCommand::List {
                q,
                filter,
                limit,
                max,
            } => {
                let options = ListGroupsOptions {
                    q: q.clone(),
                    filter: filter.clone(),
                    expand: None,
                    limit: *limit,
                };
                self.print_collection(groups.list_groups(options), *max)
                    .await
            }
            GroupsCommand::Get { id } => self.output(&groups.get_group(id).await?),
            GroupsCommand::Members { id, limit, max } => {
                self.print_collection(groups.list_group_users(id, *limit), *max)
                    .await
            }
        }
    }

    async fn users(&self, command: &UsersCommand) -> Result<()> {
        let users = self.client()?.users();
        match command {
            UsersCommand::List {
                q,
                filter,
                search,
                limit,
                max,
            } => {
                let options = ListUsersOptions {
                    q: q.clone(),
                    filter: filter.clone(),
                    search: search.clone(),
                    limit: *limit,
                };
                self.print_collection(users.list_users(options), *max).await
            }
            UsersCommand::Get { id } => self.output(&users.get_user(id).await?),
        }
    }

    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        self.output(&config.redacted())
    }

    /// Resolve configuration: files and environment, then `--config`, then flags
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load()?;

        if let Some(ref path) = self.cli.config {
            if !path.is_file() {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            config.merge_file(path)?;
        }
        if let Some(ref org_url) = self.cli.org_url {
            config = config.with_org_url(org_url.as_str());
        }
        if let Some(ref token) = self.cli.token {
            config = config.with_token(token.as_str());
        }
        Ok(config)
    }

    fn client(&self) -> Result<OktaClient> {
        OktaClient::new(self.load_config()?)
    }

    /// Walk a collection item by item, printing each one
    async fn print_collection<T>(&self, collection: CollectionClient<T>, max: Option<usize>) -> Result<()>
    where
        T: DeserializeOwned + Serialize,
    {
        let mut items = collection.enumerate(self.cancel.clone());
        let mut printed = 0usize;

        while max.map_or(true, |max| printed < max) && items.move_next().await? {
            if let Some(item) = items.current() {
                self.output(item)?;
                printed += 1;
            }
        }

        let pages = items.pages().map_or(0, |p| p.pages_fetched());
        items.dispose();
        debug!("Printed {} items from {} pages", printed, pages);
        Ok(())
    }

    /// Output a document
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}
