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

//! Derives the market listing from the ledger's [GameState].
use resource_trade_client::{AccountAddress, GameState, ResourceKind};

/// An open trade offer as listed to the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeOffer {
    /// Position in the offer collection of the fetch this offer was projected from. Only valid
    /// until the next fetch.
    pub id: usize,
    pub creator: AccountAddress,
    pub offered_resource: ResourceKind,
    pub offered_amount: u64,
    pub requested_resource: ResourceKind,
    pub requested_amount: u64,
}

impl TradeOffer {
    /// One line summary, for example `Offering 10 wood for 5 gold`.
    pub fn describe(&self) -> String {
        format!(
            "Offering {} {} for {} {}",
            self.offered_amount, self.offered_resource, self.requested_amount, self.requested_resource
        )
    }
}

/// Project the offers of `game_state` in ledger order. No game state means no offers.
pub fn project(game_state: Option<&GameState>) -> Vec<TradeOffer> {
    let records = match game_state {
        Some(game_state) => &game_state.trade_offers,
        None => return Vec::new(),
    };
    records
        .iter()
        .enumerate()
        .map(|(id, record)| TradeOffer {
            id,
            creator: record.creator.clone(),
            offered_resource: record.offered_resource,
            offered_amount: record.offered_amount,
            requested_resource: record.requested_resource,
            requested_amount: record.requested_amount,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use resource_trade_client::TradeOfferRecord;

    fn record(creator: &str, offered_amount: u64) -> TradeOfferRecord {
        TradeOfferRecord {
            creator: creator.parse().unwrap(),
            offered_resource: ResourceKind::Wood,
            offered_amount,
            requested_resource: ResourceKind::Gold,
            requested_amount: 5,
        }
    }

    #[test]
    fn ids_are_positions() {
        let game_state = GameState {
            trade_offers: vec![record("0xa", 10), record("0xb", 3), record("0xa", 1)],
        };
        let offers = project(Some(&game_state));
        assert_eq!(
            offers.iter().map(|offer| offer.id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(offers[1].creator, "0xb".parse().unwrap());
        assert_eq!(offers[2].offered_amount, 1);
    }

    #[test]
    fn projection_is_pure() {
        let game_state = GameState {
            trade_offers: vec![record("0xa", 10), record("0xb", 3)],
        };
        assert_eq!(project(Some(&game_state)), project(Some(&game_state)));
    }

    #[test]
    fn empty_and_absent_collections() {
        assert!(project(None).is_empty());
        assert!(project(Some(&GameState::default())).is_empty());
    }

    #[test]
    fn description() {
        let offers = project(Some(&GameState {
            trade_offers: vec![record("0xa", 10)],
        }));
        assert_eq!(offers[0].describe(), "Offering 10 wood for 5 gold");
    }
}
