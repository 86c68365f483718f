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

//! Test the client against the emulator.

use resource_trade_client::*;
use resource_trade_test_utils::*;

#[async_std::test]
async fn missing_inventory_is_not_found() {
    let _ = env_logger::try_init();
    let (client, _emulator) = emulated_client();
    let account = random_account();

    let error = client.get_player_inventory(&account).await.unwrap_err();
    assert!(error.is_not_found(), "unexpected error {:?}", error);
}

#[async_std::test]
async fn init_and_gather() {
    let _ = env_logger::try_init();
    let (client, emulator) = emulated_client();
    let account = random_account();
    let wallet = emulator.wallet(account.clone());

    let tx_included = submit_ok(&client, &wallet, message::InitPlayerInventory).await;
    assert_eq!(tx_included.result, Ok(()));
    submit_ok(&client, &wallet, message::GatherResources).await;

    let inventory = client.get_player_inventory(&account).await.unwrap();
    assert_eq!(inventory.wood, 10);
    assert_eq!(inventory.stone, 5);
    assert_eq!(inventory.gold, 1);
}

#[async_std::test]
async fn aborted_transaction_is_included_with_error() {
    let _ = env_logger::try_init();
    let (client, emulator) = emulated_client();
    let wallet = emulator.wallet(random_account());

    let tx_included = submit_ok(&client, &wallet, message::GatherResources).await;
    assert_eq!(
        tx_included.result,
        Err(TransactionError::Game(GameError::InventoryMissing))
    );
}

#[async_std::test]
async fn trade_offer_appears_in_game_state() {
    let _ = env_logger::try_init();
    let (client, emulator) = emulated_client();
    let account = random_account();
    let wallet = emulator.wallet(account.clone());
    submit_ok(&client, &wallet, message::InitPlayerInventory).await;
    submit_ok(&client, &wallet, message::GatherResources).await;

    let offer = message::CreateTradeOffer {
        offered_resource: ResourceKind::Stone,
        offered_amount: 3,
        requested_resource: ResourceKind::Wood,
        requested_amount: 7,
    };
    let tx_included = submit_ok(&client, &wallet, offer).await;
    assert_eq!(tx_included.result, Ok(()));

    let game_state = client.get_game_state().await.unwrap();
    assert_eq!(
        game_state.trade_offers,
        vec![TradeOfferRecord {
            creator: account,
            offered_resource: ResourceKind::Stone,
            offered_amount: 3,
            requested_resource: ResourceKind::Wood,
            requested_amount: 7,
        }]
    );
}

#[async_std::test]
async fn offer_beyond_holdings_aborts() {
    let _ = env_logger::try_init();
    let (client, emulator) = emulated_client();
    let wallet = emulator.wallet(random_account());
    submit_ok(&client, &wallet, message::InitPlayerInventory).await;

    let offer = message::CreateTradeOffer {
        offered_resource: random_resource(),
        offered_amount: 1,
        requested_resource: random_resource(),
        requested_amount: 1,
    };
    let tx_included = submit_ok(&client, &wallet, offer).await;
    assert_eq!(
        tx_included.result,
        Err(TransactionError::Game(GameError::InsufficientResources))
    );
    assert!(client.get_game_state().await.unwrap().trade_offers.is_empty());
}

#[async_std::test]
async fn disconnected_wallet_cannot_submit() {
    let _ = env_logger::try_init();
    let (client, emulator) = emulated_client();

    let result = client
        .sign_and_submit_message(&emulator.disconnected_wallet(), message::GatherResources)
        .await;
    match result {
        Err(Error::WalletNotConnected) => {}
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("submission succeeded without account"),
    }
    assert!(emulator.journal().is_empty());
}

#[async_std::test]
async fn confirmation_failure_is_reported() {
    let _ = env_logger::try_init();
    let (client, emulator) = emulated_client();
    let wallet = emulator.wallet(random_account());
    emulator.fail_confirmations(1);

    let tx_included_fut = client
        .sign_and_submit_message(&wallet, message::InitPlayerInventory)
        .await
        .unwrap();
    match tx_included_fut.await {
        Err(Error::ConfirmationFailed { .. }) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn emulator_chain_id() {
    let (client, _emulator) = emulated_client();
    assert_eq!(client.chain_id(), backend::EMULATOR_CHAIN_ID);
}
