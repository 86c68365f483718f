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

//! Run game sessions against the emulator.

use std::time::Duration;

use resource_trade_client::state::PLAYER_INVENTORY;
use resource_trade_client::*;
use resource_trade_engine::{
    Config, Error as EngineError, GameSession, IntentTag, Notice, NoticeKind, RetryPolicy,
    TradeOffer, TradeOfferForm,
};
use resource_trade_test_utils::*;

fn new_session(config: Config) -> (GameSession<Client>, Emulator) {
    let (client, emulator) = emulated_client();
    (GameSession::new(client, config), emulator)
}

fn failures(notices: &[Notice]) -> Vec<&Notice> {
    notices
        .iter()
        .filter(|notice| notice.kind == NoticeKind::Failure)
        .collect()
}

fn wood_for_gold(offered_amount: u64) -> TradeOfferForm {
    TradeOfferForm {
        offered_resource: Some(ResourceKind::Wood),
        offered_amount: Some(offered_amount),
        requested_resource: Some(ResourceKind::Gold),
        requested_amount: Some(5),
    }
}

#[async_std::test]
async fn connect_initializes_missing_inventory_once() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());

    let view = session.connect(&wallet).await.unwrap();
    assert_eq!(view.inventory, Some(PlayerInventory::default()));
    assert_eq!(emulator.submission_count("init_player_inventory"), 1);

    session.connect(&wallet).await.unwrap();
    assert_eq!(emulator.submission_count("init_player_inventory"), 1);
}

#[async_std::test]
async fn concurrent_connects_share_initialization() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());
    emulator.set_read_yields(2);
    emulator.set_confirmation_yields(2);

    let (first, second) = futures::join!(session.connect(&wallet), session.connect(&wallet));
    assert_eq!(first.unwrap().inventory, Some(PlayerInventory::default()));
    assert_eq!(second.unwrap().inventory, Some(PlayerInventory::default()));
    assert_eq!(emulator.submission_count("init_player_inventory"), 1);
    assert_eq!(
        session.take_notices(),
        vec![Notice::success("Player inventory initialized successfully!")]
    );
}

#[async_std::test]
async fn switching_accounts_during_initialization_initializes_both() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let alice = emulator.wallet(random_account());
    let bob_account = random_account();
    let bob = emulator.wallet(bob_account.clone());
    emulator.set_confirmation_yields(3);

    let (alice_connected, bob_connected) =
        futures::join!(session.connect(&alice), session.connect(&bob));
    alice_connected.unwrap();
    let view = bob_connected.unwrap();
    assert_eq!(view.account, Some(bob_account.clone()));
    assert_eq!(view.inventory, Some(PlayerInventory::default()));
    assert_eq!(emulator.inventory(&bob_account), Some(PlayerInventory::default()));
    assert_eq!(emulator.submission_count("init_player_inventory"), 2);
    assert!(failures(&session.take_notices()).is_empty());
}

#[async_std::test]
async fn inventory_missing_after_initialization() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let account = random_account();
    emulator.hide_initialized_inventories(1);

    match session.connect(&emulator.wallet(account.clone())).await {
        Err(EngineError::InventoryMissing(missing)) => assert_eq!(missing, account),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(
        session.take_notices(),
        vec![Notice::success("Player inventory initialized successfully!")]
    );
    assert_eq!(session.view().inventory, None);
}

#[async_std::test]
async fn client_module_is_used_over_configured_module() {
    let _ = env_logger::try_init();
    let config = Config {
        module: ModuleId::new("0x1".parse().unwrap(), "other_module"),
        ..Config::default()
    };
    let (session, emulator) = new_session(config);
    let account = random_account();

    session
        .connect(&emulator.wallet(account.clone()))
        .await
        .unwrap();
    assert!(emulator.journal().contains(&JournalEntry::Read {
        address: account,
        resource_type: emulator.module().qualify(PLAYER_INVENTORY),
    }));
    assert_eq!(emulator.submission_count("init_player_inventory"), 1);
}

#[async_std::test]
async fn existing_inventory_is_loaded_without_submission() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let inventory = PlayerInventory {
        wood: 3,
        stone: 2,
        gold: 1,
        last_gathered: 0,
    };
    let account = account_with_inventory(session.client(), &emulator, inventory.clone()).await;

    let view = session.connect(&emulator.wallet(account)).await.unwrap();
    assert_eq!(view.inventory, Some(inventory));
    assert_eq!(emulator.submission_count("init_player_inventory"), 1);
    assert!(session.take_notices().is_empty());
}

#[async_std::test]
async fn missing_inventory_produces_no_failure_notice() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let account = random_account();

    assert_eq!(session.refresh_inventory(&account).await.unwrap(), None);
    session.connect(&emulator.wallet(account)).await.unwrap();
    assert!(failures(&session.take_notices()).is_empty());
}

#[async_std::test]
async fn read_failure_produces_notice() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    emulator.fail_reads(1);

    match session.connect(&emulator.wallet(random_account())).await {
        Err(EngineError::ReadFailed(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(
        session.take_notices(),
        vec![Notice::failure("Failed to check player inventory.")]
    );
    assert_eq!(session.view().inventory, None);
    assert_eq!(emulator.submission_count("init_player_inventory"), 0);
}

#[async_std::test]
async fn read_retry_recovers_from_transient_failure() {
    let _ = env_logger::try_init();
    let config = Config {
        read_retry: RetryPolicy {
            max_attempts: 2,
            delay: Duration::from_millis(1),
        },
        ..Config::default()
    };
    let (session, emulator) = new_session(config);
    emulator.fail_reads(1);

    session
        .connect(&emulator.wallet(random_account()))
        .await
        .unwrap();
    assert!(failures(&session.take_notices()).is_empty());
}

#[async_std::test]
async fn gather_refreshes_inventory_after_confirmation() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let account = random_account();
    let wallet = emulator.wallet(account.clone());
    session.connect(&wallet).await.unwrap();

    let confirmed = session.gather_resources(&wallet).await.unwrap();
    let inventory = session.view().inventory.clone().unwrap();
    assert_eq!((inventory.wood, inventory.stone, inventory.gold), (10, 5, 1));

    let journal = emulator.journal();
    let confirmation = journal
        .iter()
        .position(|entry| {
            *entry
                == JournalEntry::Confirmed {
                    tx_hash: confirmed.tx_hash.clone(),
                }
        })
        .unwrap();
    let inventory_read = JournalEntry::Read {
        address: account,
        resource_type: emulator.module().qualify(PLAYER_INVENTORY),
    };
    let last_read = journal
        .iter()
        .rposition(|entry| *entry == inventory_read)
        .unwrap();
    assert!(last_read > confirmation);
    assert_eq!(
        session.take_notices().last(),
        Some(&Notice::success("Resources gathered successfully!"))
    );
}

#[async_std::test]
async fn pending_gather_rejects_second_gather() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());
    session.connect(&wallet).await.unwrap();
    emulator.set_confirmation_yields(2);

    let (first, second) = futures::join!(
        session.gather_resources(&wallet),
        session.gather_resources(&wallet)
    );
    assert!(first.is_ok());
    match second {
        Err(EngineError::AlreadyPending(IntentTag::Gather)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(emulator.submission_count("gather_resources"), 1);
    assert!(!session.view().is_pending(IntentTag::Gather));
}

#[async_std::test]
async fn dropping_an_intent_clears_pending() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());
    session.connect(&wallet).await.unwrap();
    emulator.set_confirmation_yields(1);

    let mut gather = Box::pin(session.gather_resources(&wallet));
    assert!(futures::poll!(&mut gather).is_pending());
    assert!(session.view().is_pending(IntentTag::Gather));
    drop(gather);
    assert!(!session.view().is_pending(IntentTag::Gather));

    emulator.set_confirmation_yields(0);
    emulator.advance_clock(1);
    session.gather_resources(&wallet).await.unwrap();
    assert_eq!(emulator.submission_count("gather_resources"), 2);
}

#[async_std::test]
async fn rejected_gather_leaves_state_untouched() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());
    session.connect(&wallet).await.unwrap();
    session.take_notices();
    let before = session.view();
    emulator.reject_submissions(1);

    match session.gather_resources(&wallet).await {
        Err(EngineError::TransactionRejected(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(session.view(), before);
    assert_eq!(
        session.take_notices(),
        vec![Notice::failure("Failed to gather resources.")]
    );
}

#[async_std::test]
async fn unconfirmed_gather_is_reported() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());
    session.connect(&wallet).await.unwrap();
    emulator.fail_confirmations(1);

    match session.gather_resources(&wallet).await {
        Err(EngineError::ConfirmationFailed(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert!(session.view().pending.is_empty());
    assert_eq!(session.view().inventory, Some(PlayerInventory::default()));
}

#[async_std::test]
async fn gather_during_cooldown_fails() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    emulator.set_gather_cooldown(60);
    let wallet = emulator.wallet(random_account());
    session.connect(&wallet).await.unwrap();
    session.gather_resources(&wallet).await.unwrap();

    match session.gather_resources(&wallet).await {
        Err(EngineError::TransactionFailed {
            error: TransactionError::Game(GameError::GatherCooldown),
            ..
        }) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(session.view().inventory.as_ref().unwrap().wood, 10);
}

#[async_std::test]
async fn created_offer_is_listed() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let account = random_account();
    let wallet = emulator.wallet(account.clone());
    session.connect(&wallet).await.unwrap();
    session.gather_resources(&wallet).await.unwrap();

    session
        .create_trade_offer(&wallet, wood_for_gold(10))
        .await
        .unwrap();
    let view = session.view();
    assert_eq!(
        view.offers,
        vec![TradeOffer {
            id: 0,
            creator: account,
            offered_resource: ResourceKind::Wood,
            offered_amount: 10,
            requested_resource: ResourceKind::Gold,
            requested_amount: 5,
        }]
    );
    assert_eq!(view.inventory.as_ref().unwrap().wood, 0);
    assert_eq!(
        session.take_notices().last(),
        Some(&Notice::success("Trade offer created successfully!"))
    );
}

#[async_std::test]
async fn offer_beyond_holdings_fails() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());
    session.connect(&wallet).await.unwrap();

    match session.create_trade_offer(&wallet, wood_for_gold(1)).await {
        Err(EngineError::TransactionFailed {
            error: TransactionError::Game(GameError::InsufficientResources),
            ..
        }) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert!(session.view().offers.is_empty());
}

#[async_std::test]
async fn malformed_offer_is_not_submitted() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.wallet(random_account());
    session.connect(&wallet).await.unwrap();
    session.take_notices();

    match session.create_trade_offer(&wallet, wood_for_gold(0)).await {
        Err(EngineError::MalformedInput(MalformedInput::NonPositiveAmount(
            OfferField::OfferedAmount,
        ))) => {}
        other => panic!("unexpected result {:?}", other),
    }
    let form = TradeOfferForm {
        offered_resource: None,
        ..wood_for_gold(1)
    };
    assert!(session.create_trade_offer(&wallet, form).await.is_err());

    assert_eq!(emulator.submission_count("create_trade_offer"), 0);
    assert!(session.take_notices().is_empty());
}

#[async_std::test]
async fn unpublished_game_state_lists_no_offers() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    emulator.remove_game_state();

    let view = session
        .connect(&emulator.wallet(random_account()))
        .await
        .unwrap();
    assert!(view.offers.is_empty());
    assert!(failures(&session.take_notices()).is_empty());
}

#[async_std::test]
async fn offer_read_failure_produces_notice() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    session
        .connect(&emulator.wallet(random_account()))
        .await
        .unwrap();
    session.take_notices();
    emulator.fail_reads(1);

    assert!(session.refresh_offers().await.is_err());
    assert_eq!(
        session.take_notices(),
        vec![Notice::failure("Failed to fetch trade offers.")]
    );
}

#[async_std::test]
async fn switching_accounts_resets_the_view() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let alice = emulator.wallet(random_account());
    session.connect(&alice).await.unwrap();
    session.gather_resources(&alice).await.unwrap();

    let bob_account = random_account();
    let view = session.connect(&emulator.wallet(bob_account.clone())).await.unwrap();
    assert_eq!(view.account, Some(bob_account));
    assert_eq!(view.inventory, Some(PlayerInventory::default()));

    session.disconnect();
    assert_eq!(session.view().account, None);
    assert_eq!(session.view().inventory, None);
}

#[async_std::test]
async fn disconnected_wallet_is_rejected() {
    let _ = env_logger::try_init();
    let (session, emulator) = new_session(Config::default());
    let wallet = emulator.disconnected_wallet();

    match session.connect(&wallet).await {
        Err(EngineError::WalletNotConnected) => {}
        other => panic!("unexpected result {:?}", other),
    }
    match session.gather_resources(&wallet).await {
        Err(EngineError::WalletNotConnected) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert!(emulator.journal().is_empty());
}
