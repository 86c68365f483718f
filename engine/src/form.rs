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

use resource_trade_client::message::CreateTradeOffer;
use resource_trade_client::{MalformedInput, OfferField, ResourceKind};

/// Trade offer input as the user enters it. Every field may still be empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TradeOfferForm {
    pub offered_resource: Option<ResourceKind>,
    pub offered_amount: Option<u64>,
    pub requested_resource: Option<ResourceKind>,
    pub requested_amount: Option<u64>,
}

impl TradeOfferForm {
    /// Turn a complete form into a message. Reports the first empty field or non-positive amount.
    pub fn into_message(self) -> Result<CreateTradeOffer, MalformedInput> {
        let message = CreateTradeOffer {
            offered_resource: required(self.offered_resource, OfferField::OfferedResource)?,
            offered_amount: required(self.offered_amount, OfferField::OfferedAmount)?,
            requested_resource: required(self.requested_resource, OfferField::RequestedResource)?,
            requested_amount: required(self.requested_amount, OfferField::RequestedAmount)?,
        };
        message.validate_amounts()?;
        Ok(message)
    }
}

fn required<T>(value: Option<T>, field: OfferField) -> Result<T, MalformedInput> {
    value.ok_or(MalformedInput::Missing(field))
}
