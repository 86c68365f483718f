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

use resource_trade_client::{message, Message};

/// Kind of a user intent. At most one intent of each kind is in flight.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, derive_more::Display)]
pub enum IntentTag {
    #[display(fmt = "init_player_inventory")]
    InitInventory,
    #[display(fmt = "gather_resources")]
    Gather,
    #[display(fmt = "create_trade_offer")]
    CreateOffer,
}

impl IntentTag {
    pub fn success_notice(self) -> &'static str {
        match self {
            IntentTag::InitInventory => "Player inventory initialized successfully!",
            IntentTag::Gather => "Resources gathered successfully!",
            IntentTag::CreateOffer => "Trade offer created successfully!",
        }
    }

    pub fn failure_notice(self) -> &'static str {
        match self {
            IntentTag::InitInventory => "Failed to initialize player inventory.",
            IntentTag::Gather => "Failed to gather resources.",
            IntentTag::CreateOffer => "Failed to create trade offer.",
        }
    }
}

/// A [Message] the user asks for. Guarded by the pending flag of its [IntentTag].
pub trait Intent: Message {
    const TAG: IntentTag;
}

impl Intent for message::InitPlayerInventory {
    const TAG: IntentTag = IntentTag::InitInventory;
}

impl Intent for message::GatherResources {
    const TAG: IntentTag = IntentTag::Gather;
}

impl Intent for message::CreateTradeOffer {
    const TAG: IntentTag = IntentTag::CreateOffer;
}
