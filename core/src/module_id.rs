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

use serde::{Deserialize, Serialize};

use crate::AccountAddress;

/// Address the game module is published at on devnet.
pub const DEVNET_MODULE_ADDRESS: &str =
    "0x7ca55747bec5befc784dd92b917e37a4ceb42a1d6693b9fd86422091cbe99907";

/// Name of the ledger module that implements the game.
pub const MODULE_NAME: &str = "resource_manager";

/// Identifies a published ledger module.
///
/// Resource types and entry functions of the module are referred to by their fully qualified
/// name, see [ModuleId::qualify].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModuleId {
    /// Account the module is published under. The shared `GameState` lives here too.
    pub address: AccountAddress,
    pub name: String,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: impl Into<String>) -> Self {
        ModuleId {
            address,
            name: name.into(),
        }
    }

    /// The game module as deployed on devnet.
    pub fn devnet() -> Self {
        let address = DEVNET_MODULE_ADDRESS
            .parse()
            .expect("DEVNET_MODULE_ADDRESS is a valid address");
        ModuleId::new(address, MODULE_NAME)
    }

    /// Returns `<address>::<module>::<item>`.
    ///
    /// ```rust
    /// # use resource_trade_core::ModuleId;
    /// let module = ModuleId::new("0x1".parse().unwrap(), "resource_manager");
    /// assert!(module.qualify("GameState").ends_with("01::resource_manager::GameState"));
    /// ```
    pub fn qualify(&self, item: &str) -> String {
        format!("{}::{}::{}", self.address, self.name, item)
    }
}

impl Default for ModuleId {
    fn default() -> Self {
        ModuleId::devnet()
    }
}

impl core::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}
