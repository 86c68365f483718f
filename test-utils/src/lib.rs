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

//! Miscellaneous helpers used throughout resource trade tests.

use rand::seq::SliceRandom as _;
use rand::Rng;

use resource_trade_client::*;

/// Submit a transaction and wait for it to be committed.
///
/// Panics if submission or confirmation errors. The transaction itself may have aborted, see
/// [TransactionIncluded::result].
pub async fn submit_ok<Message_: Message>(
    client: &Client,
    wallet: &dyn Wallet,
    message: Message_,
) -> TransactionIncluded {
    client
        .sign_and_submit_message(wallet, message)
        .await
        .unwrap()
        .await
        .unwrap()
}

/// Create a fresh [Emulator] and a [Client] talking to it.
pub fn emulated_client() -> (Client, Emulator) {
    let emulator = Emulator::new();
    (Client::with_emulator(&emulator), emulator)
}

/// Initialize the inventory of a new account on the emulator and set it to `inventory`.
pub async fn account_with_inventory(
    client: &Client,
    emulator: &Emulator,
    inventory: PlayerInventory,
) -> AccountAddress {
    let account = random_account();
    let wallet = emulator.wallet(account.clone());
    let tx_included = submit_ok(client, &wallet, message::InitPlayerInventory).await;
    assert_eq!(tx_included.result, Ok(()));
    emulator.set_inventory(account.clone(), inventory);
    account
}

pub fn random_account() -> AccountAddress {
    let digits: String = (0..64)
        .map(|_| std::char::from_digit(rand::thread_rng().gen_range(0, 16), 16).unwrap_or('0'))
        .collect();
    format!("0x{}", digits).parse().unwrap()
}

pub fn random_resource() -> ResourceKind {
    *ResourceKind::ALL.choose(&mut rand::thread_rng()).unwrap()
}
