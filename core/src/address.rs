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

//! `AccountAddress` type, and its validation tests.
use core::convert::TryFrom;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Number of hex digits in the long form of an address.
const ADDRESS_HEX_LENGTH: usize = 64;

/// Address of a ledger account.
///
/// Addresses are written as `0x` followed by at most 64 hex digits. Leading zeros may be omitted
/// so `0x1` and its zero padded long form denote the same account. An [AccountAddress] always
/// holds the long form with lowercase digits.
///
/// ```rust
/// # use resource_trade_core::AccountAddress;
/// let short: AccountAddress = "0x1".parse().unwrap();
/// let long: AccountAddress = format!("0x{:0>64}", "1").parse().unwrap();
/// assert_eq!(short, long);
/// assert!("1234".parse::<AccountAddress>().is_err());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, derive_more::Display)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address must have between 1 and 64 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("address contains the non-hex character {0:?}")]
    InvalidCharacter(char),
}

impl AccountAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form used in listings, for example `0x7ca5...9907`.
    pub fn short(&self) -> String {
        // The long form is ASCII and always 66 bytes.
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl FromStr for AccountAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;
        if digits.is_empty() || digits.len() > ADDRESS_HEX_LENGTH {
            return Err(AddressError::InvalidLength(digits.len()));
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidCharacter(c));
        }
        Ok(AccountAddress(format!(
            "0x{:0>width$}",
            digits.to_ascii_lowercase(),
            width = ADDRESS_HEX_LENGTH
        )))
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountAddress> for String {
    fn from(address: AccountAddress) -> Self {
        address.0
    }
}
