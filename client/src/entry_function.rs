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

//! Provides [Message] trait and implementations for all game module entry functions.
use resource_trade_core::message;
use resource_trade_core::MalformedInput;

/// Entry function calls of the game module that can be submitted as a [crate::Transaction].
pub trait Message: Send + Sync + 'static {
    /// Name of the entry function in the game module.
    const FUNCTION_NAME: &'static str;

    /// Arguments as the node expects them in the payload. Amounts are decimal strings.
    fn arguments(&self) -> Vec<String>;

    /// Check the message before it is submitted.
    fn validate(&self) -> Result<(), MalformedInput> {
        Ok(())
    }
}

impl Message for message::InitPlayerInventory {
    const FUNCTION_NAME: &'static str = "init_player_inventory";

    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Message for message::GatherResources {
    const FUNCTION_NAME: &'static str = "gather_resources";

    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Message for message::CreateTradeOffer {
    const FUNCTION_NAME: &'static str = "create_trade_offer";

    fn arguments(&self) -> Vec<String> {
        vec![
            self.offered_resource.tag().to_string(),
            self.offered_amount.to_string(),
            self.requested_resource.tag().to_string(),
            self.requested_amount.to_string(),
        ]
    }

    fn validate(&self) -> Result<(), MalformedInput> {
        self.validate_amounts()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use resource_trade_core::ResourceKind;

    #[test]
    fn trade_offer_arguments() {
        let offer = message::CreateTradeOffer {
            offered_resource: ResourceKind::Wood,
            offered_amount: 10,
            requested_resource: ResourceKind::Gold,
            requested_amount: 5,
        };
        assert_eq!(offer.arguments(), vec!["wood", "10", "gold", "5"]);
        assert_eq!(offer.validate(), Ok(()));
    }

    #[test]
    fn calls_without_arguments() {
        assert!(message::InitPlayerInventory.arguments().is_empty());
        assert!(message::GatherResources.arguments().is_empty());
    }
}
