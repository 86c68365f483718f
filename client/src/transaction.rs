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

//! Provides [Transaction] and [TransactionPayload].
use serde::{Deserialize, Serialize};

use resource_trade_core::{AccountAddress, ModuleId};

use crate::entry_function::Message;

/// The hash of a transaction. Uniquely identifies a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct TxHash(pub String);

/// Entry function call as the node expects it in a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "entry_function_payload")]
pub struct TransactionPayload {
    /// Fully qualified name of the entry function, `<address>::<module>::<function>`.
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<String>,
}

/// Unsigned transaction that can be handed to a [crate::Wallet] to sign and submit.
///
/// A transaction includes
/// * the sender account
/// * the entry function call
///
/// Sequence number, gas and expiration are filled in by the wallet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: AccountAddress,
    pub payload: TransactionPayload,
}

impl Transaction {
    /// Create a transaction calling the entry function of `message` in `module`.
    pub fn new<Message_: Message>(
        sender: AccountAddress,
        module: &ModuleId,
        message: &Message_,
    ) -> Self {
        Transaction {
            sender,
            payload: TransactionPayload {
                function: module.qualify(Message_::FUNCTION_NAME),
                type_arguments: Vec::new(),
                arguments: message.arguments(),
            },
        }
    }

    /// Name of the called entry function without the module prefix.
    pub fn function_name(&self) -> &str {
        self.payload
            .function
            .rsplit("::")
            .next()
            .unwrap_or(&self.payload.function)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use resource_trade_core::message;

    #[test]
    fn payload_json() {
        let module = ModuleId::new("0x1".parse().unwrap(), "resource_manager");
        let sender: AccountAddress = "0xa".parse().unwrap();
        let tx = Transaction::new(sender, &module, &message::GatherResources);
        assert_eq!(tx.function_name(), "gather_resources");

        let json = serde_json::to_value(&tx.payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "entry_function_payload",
                "function": format!("{}::resource_manager::gather_resources", module.address),
                "type_arguments": [],
                "arguments": [],
            })
        );
    }
}
