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

use resource_trade_core::AccountAddress;

use crate::transaction::TxHash;

/// Error that may be returned by any of the [crate::ClientT] methods
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The account does not hold the requested resource
    #[error("Resource {resource_type} not found at {address}")]
    ResourceNotFound {
        address: AccountAddress,
        resource_type: String,
    },

    /// Decoding the received data failed
    #[error("Decoding the received data failed")]
    Json(#[from] serde_json::Error),

    /// Error from the underlying HTTP connection
    #[error("Error from the underlying HTTP connection")]
    Http(#[from] reqwest::Error),

    /// The node answered with an error status
    #[error("Node responded with status {status}: {message}")]
    Node { status: u16, message: String },

    /// The wallet has no connected account
    #[error("Wallet is not connected")]
    WalletNotConnected,

    /// The wallet refused to sign or submit the transaction
    #[error("Wallet rejected the transaction: {0}")]
    WalletRejected(String),

    /// The outcome of a submitted transaction could not be determined
    #[error("Failed to confirm transaction {tx_hash}: {reason}")]
    ConfirmationFailed { tx_hash: TxHash, reason: String },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// True if the error says that the requested resource does not exist.
    ///
    /// Callers use this to tell a missing resource apart from a failed read.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::ResourceNotFound { .. } => true,
            _ => false,
        }
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Other(error)
    }
}

impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error::Other(error.into())
    }
}
