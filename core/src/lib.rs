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

//! Primitive types used by the resource trade client.
//!
//! The records in [state] mirror what the `resource_manager` ledger module stores. The structs in
//! [message] are the entry functions a client may call on that module.

pub mod message;
pub use message::{MalformedInput, OfferField};

pub mod state;
pub use state::{GameState, PlayerInventory, TradeOfferRecord};

pub mod u64_string;

mod address;
pub use address::{AccountAddress, AddressError};

mod error;
pub use error::{GameError, TransactionError};

mod module_id;
pub use module_id::{ModuleId, DEVNET_MODULE_ADDRESS, MODULE_NAME};

mod resource_kind;
pub use resource_kind::{ResourceKind, UnknownResource};

/// Seconds since the unix epoch as recorded by the ledger.
pub type Timestamp = u64;
