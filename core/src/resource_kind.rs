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

use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// The kinds of resources a player can hold and trade.
///
/// On the ledger a resource is identified by its lowercase name, see [ResourceKind::tag].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Wood,
    Stone,
    Gold,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown resource {0:?}, expected one of wood, stone or gold")]
pub struct UnknownResource(pub String);

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Wood, ResourceKind::Stone, ResourceKind::Gold];

    pub fn tag(self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Stone => "stone",
            ResourceKind::Gold => "gold",
        }
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tags_parse_back() {
        for kind in ResourceKind::ALL.iter() {
            assert_eq!(kind.tag().parse::<ResourceKind>(), Ok(*kind));
        }
        assert!("Wood".parse::<ResourceKind>().is_err());
        assert!("iron".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn serde_matches_tag() {
        assert_eq!(
            serde_json::to_string(&ResourceKind::Stone).unwrap(),
            "\"stone\""
        );
        assert_eq!(
            serde_json::from_str::<ResourceKind>("\"gold\"").unwrap(),
            ResourceKind::Gold
        );
    }
}
