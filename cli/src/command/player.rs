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

//! Define the commands supported by the CLI related to players.

use super::*;

/// Player related commands
#[derive(StructOpt, Clone)]
pub enum Command {
    Show(Show),
}

#[async_trait::async_trait(?Send)]
impl CommandT for Command {
    async fn run(&self) -> Result<(), CommandError> {
        match self {
            Command::Show(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Clone)]
/// Show the inventory of a player.
pub struct Show {
    /// Account address of the player
    account: AccountAddress,

    #[structopt(flatten)]
    network_options: NetworkOptions,
}

#[async_trait::async_trait(?Send)]
impl CommandT for Show {
    async fn run(&self) -> Result<(), CommandError> {
        let session = self.network_options.session().await?;
        let inventory = session
            .refresh_inventory(&self.account)
            .await?
            .ok_or_else(|| CommandError::InventoryNotFound {
                account: self.account.clone(),
            })?;
        print_inventory(&self.account, &inventory);
        Ok(())
    }
}
