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

//! Define the commands supported by the CLI related to the trade offer market.

use super::*;

/// Market related commands
#[derive(StructOpt, Clone)]
pub enum Command {
    List(List),
}

#[async_trait::async_trait(?Send)]
impl CommandT for Command {
    async fn run(&self) -> Result<(), CommandError> {
        match self {
            Command::List(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Clone)]
/// List all open trade offers.
pub struct List {
    #[structopt(flatten)]
    network_options: NetworkOptions,
}

#[async_trait::async_trait(?Send)]
impl CommandT for List {
    async fn run(&self) -> Result<(), CommandError> {
        let session = self.network_options.session().await?;
        let offers = session.refresh_offers().await?;
        print_offers(&offers);
        Ok(())
    }
}
