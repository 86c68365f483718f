// Resource Trade
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Define the command line parser and interface.

use lazy_static::lazy_static;
use resource_trade_client::*;
use resource_trade_engine::{Config, GameSession, Notice, NoticeKind, RetryPolicy};
use structopt::StructOpt;
use thiserror::Error as ThisError;

mod command;
use command::{market, player, simulate};

/// The type that captures the command line.
#[derive(StructOpt, Clone)]
#[structopt(max_term_width = 80)]
pub struct CommandLine {
    #[structopt(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub async fn run(self) -> Result<(), CommandError> {
        self.command.run().await
    }
}

/// Game module command-line options
#[derive(StructOpt, Clone, Debug)]
pub struct GameOptions {
    /// Address the game module is published at
    #[structopt(
        long,
        default_value = DEVNET_MODULE_ADDRESS,
        env = "RT_MODULE_ADDRESS",
        value_name = "address"
    )]
    pub module_address: AccountAddress,

    /// Name of the game module
    #[structopt(long, default_value = MODULE_NAME, env = "RT_MODULE_NAME", value_name = "name")]
    pub module_name: String,

    /// How often a failed ledger read is attempted before giving up.
    #[structopt(
        long,
        default_value = &READ_ATTEMPTS_DEFAULT,
        env = "RT_READ_ATTEMPTS",
        value_name = "attempts"
    )]
    pub read_attempts: u32,
}

impl GameOptions {
    pub fn config(&self) -> Config {
        Config {
            module: ModuleId::new(self.module_address.clone(), self.module_name.clone()),
            read_retry: RetryPolicy::attempts(self.read_attempts),
        }
    }
}

/// Network-related command-line options
#[derive(StructOpt, Clone, Debug)]
pub struct NetworkOptions {
    /// Base URL of the node REST API
    #[structopt(
        long,
        default_value = NODE_URL_DEFAULT,
        env = "RT_NODE_URL",
        value_name = "url"
    )]
    pub node_url: url::Url,

    #[structopt(flatten)]
    pub game_options: GameOptions,
}

impl NetworkOptions {
    /// Connect to the node and start a session for the configured game module.
    pub async fn session(&self) -> Result<GameSession<Client>, Error> {
        let config = self.game_options.config();
        log::debug!("Connecting to {} for module {}", self.node_url, config.module);
        let client = Client::create_with_executor(
            RemoteNodeConfig::new(self.node_url.clone()),
            config.module.clone(),
        )
        .await?;
        Ok(GameSession::new(client, config))
    }
}

const NODE_URL_DEFAULT: &str = "https://fullnode.devnet.aptoslabs.com/v1";

lazy_static! {
    static ref READ_ATTEMPTS_DEFAULT: String = RetryPolicy::default().max_attempts.to_string();
}

/// The supported [CommandLine] commands.
/// The commands are grouped by domain.
#[derive(StructOpt, Clone)]
pub enum Command {
    Player(player::Command),
    Market(market::Command),
    Simulate(simulate::Simulate),
}

#[async_trait::async_trait(?Send)]
impl CommandT for Command {
    async fn run(&self) -> Result<(), CommandError> {
        match self {
            Command::Player(cmd) => cmd.run().await,
            Command::Market(cmd) => cmd.run().await,
            Command::Simulate(cmd) => cmd.run().await,
        }
    }
}

/// The trait that every command must implement.
#[async_trait::async_trait(?Send)]
pub trait CommandT {
    async fn run(&self) -> Result<(), CommandError>;
}

/// Error returned by [CommandT::run].
///
/// Implements [From] for client and engine errors.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("client error")]
    ClientError(#[from] Error),

    #[error(transparent)]
    SessionError(#[from] resource_trade_engine::Error),

    #[error("account {account} has no player inventory")]
    InventoryNotFound { account: AccountAddress },
}

/// Print and drain the notices queued by `session`.
fn print_notices<C: ClientT + Clone>(session: &GameSession<C>) {
    for Notice { kind, message } in session.take_notices() {
        match kind {
            NoticeKind::Success => println!("✔ {}", message),
            NoticeKind::Failure => println!("✘ {}", message),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_game_options() {
        let options = GameOptions::from_iter_safe(vec!["test"]).unwrap();
        assert_eq!(options.config(), Config::default());
    }
}
