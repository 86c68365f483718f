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

//! Entry function calls of the game module.

use crate::ResourceKind;

/// Create the [crate::PlayerInventory] of the sender. Fails if it already exists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InitPlayerInventory;

/// Add freshly gathered resources to the inventory of the sender.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GatherResources;

/// Offer `offered_amount` of `offered_resource` in exchange for `requested_amount` of
/// `requested_resource`. The offer is appended to [crate::GameState::trade_offers].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CreateTradeOffer {
    pub offered_resource: ResourceKind,
    pub offered_amount: u64,
    pub requested_resource: ResourceKind,
    pub requested_amount: u64,
}

impl CreateTradeOffer {
    /// Both amounts must be positive.
    pub fn validate_amounts(&self) -> Result<(), MalformedInput> {
        if self.offered_amount == 0 {
            return Err(MalformedInput::NonPositiveAmount(OfferField::OfferedAmount));
        }
        if self.requested_amount == 0 {
            return Err(MalformedInput::NonPositiveAmount(OfferField::RequestedAmount));
        }
        Ok(())
    }
}

/// Input that must not reach the ledger.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MalformedInput {
    #[error("{0} is required")]
    Missing(OfferField),
    #[error("{0} must be a positive integer")]
    NonPositiveAmount(OfferField),
}

/// The fields of a trade offer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display)]
pub enum OfferField {
    #[display(fmt = "offered resource")]
    OfferedResource,
    #[display(fmt = "offered amount")]
    OfferedAmount,
    #[display(fmt = "requested resource")]
    RequestedResource,
    #[display(fmt = "requested amount")]
    RequestedAmount,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_amounts_are_malformed() {
        let offer = CreateTradeOffer {
            offered_resource: ResourceKind::Wood,
            offered_amount: 0,
            requested_resource: ResourceKind::Gold,
            requested_amount: 5,
        };
        assert_eq!(
            offer.validate_amounts(),
            Err(MalformedInput::NonPositiveAmount(OfferField::OfferedAmount))
        );
        assert_eq!(
            CreateTradeOffer {
                offered_amount: 10,
                requested_amount: 0,
                ..offer
            }
            .validate_amounts(),
            Err(MalformedInput::NonPositiveAmount(OfferField::RequestedAmount))
        );
        assert_eq!(
            CreateTradeOffer {
                offered_amount: 10,
                ..offer
            }
            .validate_amounts(),
            Ok(())
        );
    }

    #[test]
    fn error_messages_name_the_field() {
        assert_eq!(
            MalformedInput::Missing(OfferField::RequestedResource).to_string(),
            "requested resource is required"
        );
    }
}
