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

//! Provides [Emulator] backend to run the game module in memory.

use core::fmt::Display;
use core::str::FromStr;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use resource_trade_core::state::{GAME_STATE, PLAYER_INVENTORY};

use crate::backend;
use crate::interface::*;

/// Chain id reported by the emulator. Matches devnet.
pub const EMULATOR_CHAIN_ID: u8 = 4;

/// Ledger time when the emulator starts.
const GENESIS_TIME: Timestamp = 1_700_000_000;

const GATHERED_WOOD: u64 = 10;
const GATHERED_STONE: u64 = 5;
const GATHERED_GOLD: u64 = 1;

/// Category bits the module puts in front of every abort reason (`error::invalid_argument`).
const ABORT_CATEGORY: u64 = 0x1_0000;

/// VM status of a transaction that overflowed an integer.
const ARITHMETIC_ERROR: &str = "ARITHMETIC_ERROR";

/// [backend::Backend] implementation that runs the rules of the game module on in-memory state.
///
/// # Differences with real backend
///
/// * Transactions are executed as soon as the [EmulatorWallet] submits them. Every transaction
///   gets its own ledger version.
///
/// * Time only moves when [Emulator::advance_clock] is called.
///
/// * Reads and confirmations complete immediately unless suspension points are configured with
///   [Emulator::set_read_yields] and [Emulator::set_confirmation_yields].
///
/// * Errors only occur when they are injected, for example with [Emulator::fail_reads].
///
/// All reads, submissions and confirmations are recorded in a journal, see [Emulator::journal].
#[derive(Clone)]
pub struct Emulator {
    module: ModuleId,
    state: Arc<Mutex<EmulatorState>>,
}

/// Mutable state of the emulator.
#[derive(Default)]
struct EmulatorState {
    inventories: HashMap<AccountAddress, PlayerInventory>,
    game_state: Option<GameState>,
    transactions: HashMap<TxHash, backend::CommittedTransaction>,
    version: u64,
    clock: Timestamp,
    gather_cooldown: u64,
    read_yields: usize,
    confirmation_yields: usize,
    failing_reads: usize,
    rejected_submissions: usize,
    failing_confirmations: usize,
    hidden_inits: usize,
    journal: Vec<JournalEntry>,
}

/// Ledger interaction recorded by the [Emulator].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JournalEntry {
    /// A resource read was started.
    Read {
        address: AccountAddress,
        resource_type: String,
    },
    /// A transaction was submitted and executed.
    Submitted {
        tx_hash: TxHash,
        sender: AccountAddress,
        /// Entry function name without the module prefix.
        function: String,
    },
    /// The outcome of a transaction was delivered to a client.
    Confirmed { tx_hash: TxHash },
}

impl Emulator {
    /// Create an emulator for the devnet module with a published, empty [GameState].
    pub fn new() -> Self {
        Self::with_module(ModuleId::default())
    }

    pub fn with_module(module: ModuleId) -> Self {
        Emulator {
            module,
            state: Arc::new(Mutex::new(EmulatorState {
                game_state: Some(GameState::default()),
                clock: GENESIS_TIME,
                ..EmulatorState::default()
            })),
        }
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    /// A wallet connected to `account` that submits to this emulator.
    pub fn wallet(&self, account: AccountAddress) -> EmulatorWallet {
        EmulatorWallet {
            emulator: self.clone(),
            account: Some(account),
        }
    }

    /// A wallet without connected account.
    pub fn disconnected_wallet(&self) -> EmulatorWallet {
        EmulatorWallet {
            emulator: self.clone(),
            account: None,
        }
    }

    /// All interactions in the order they happened.
    pub fn journal(&self) -> Vec<JournalEntry> {
        self.state.lock().journal.clone()
    }

    /// Number of submitted transactions calling `function`.
    pub fn submission_count(&self, function: &str) -> usize {
        self.state
            .lock()
            .journal
            .iter()
            .filter(|entry| match entry {
                JournalEntry::Submitted { function: f, .. } => f == function,
                _ => false,
            })
            .count()
    }

    pub fn inventory(&self, account: &AccountAddress) -> Option<PlayerInventory> {
        self.state.lock().inventories.get(account).cloned()
    }

    /// Overwrite the inventory of `account` without a transaction.
    pub fn set_inventory(&self, account: AccountAddress, inventory: PlayerInventory) {
        self.state.lock().inventories.insert(account, inventory);
    }

    pub fn game_state(&self) -> Option<GameState> {
        self.state.lock().game_state.clone()
    }

    /// Remove the published [GameState] as if the module was never initialized.
    pub fn remove_game_state(&self) {
        self.state.lock().game_state = None;
    }

    /// Suspend every resource read `yields` times before it completes.
    pub fn set_read_yields(&self, yields: usize) {
        self.state.lock().read_yields = yields;
    }

    /// Suspend every confirmation `yields` times before it completes.
    pub fn set_confirmation_yields(&self, yields: usize) {
        self.state.lock().confirmation_yields = yields;
    }

    /// Fail the next `count` resource reads with a node error.
    pub fn fail_reads(&self, count: usize) {
        self.state.lock().failing_reads = count;
    }

    /// Have wallets reject the next `count` submissions.
    pub fn reject_submissions(&self, count: usize) {
        self.state.lock().rejected_submissions = count;
    }

    /// Fail waiting for the next `count` confirmations. The transactions are still executed.
    pub fn fail_confirmations(&self, count: usize) {
        self.state.lock().failing_confirmations = count;
    }

    /// Minimum number of seconds between two gathers of the same player.
    pub fn set_gather_cooldown(&self, seconds: u64) {
        self.state.lock().gather_cooldown = seconds;
    }

    /// Commit the next `count` inventory initializations without creating the inventory.
    pub fn hide_initialized_inventories(&self, count: usize) {
        self.state.lock().hidden_inits = count;
    }

    pub fn advance_clock(&self, seconds: u64) {
        let mut state = self.state.lock();
        state.clock = state.clock.saturating_add(seconds);
    }

    /// Execute the transaction and record its outcome.
    fn submit(&self, transaction: &Transaction) -> Result<TxHash, Error> {
        let mut state = self.state.lock();
        if state.rejected_submissions > 0 {
            state.rejected_submissions -= 1;
            return Err(Error::WalletRejected("User rejected the request".into()));
        }

        let prefix = format!("{}::", self.module);
        let function = transaction
            .payload
            .function
            .strip_prefix(prefix.as_str())
            .ok_or_else(|| {
                Error::from(format!(
                    "Function {} is not part of module {}",
                    transaction.payload.function, self.module
                ))
            })?;
        let outcome = apply(
            &mut state,
            &transaction.sender,
            function,
            &transaction.payload.arguments,
        )?;

        state.version += 1;
        let tx_hash = TxHash(format!("{:#066x}", state.version));
        let (success, vm_status) = match outcome {
            Ok(()) => (true, "Executed successfully".to_string()),
            Err(Failure::Abort(error)) => (false, abort_status(&self.module, error)),
            Err(Failure::Vm(status)) => (false, status.to_string()),
        };
        log::debug!(
            "Emulator executed {} from {}: {}",
            function,
            transaction.sender,
            vm_status
        );
        let committed = backend::CommittedTransaction {
            tx_hash: tx_hash.clone(),
            version: state.version,
            success,
            vm_status,
        };
        state.transactions.insert(tx_hash.clone(), committed);
        state.journal.push(JournalEntry::Submitted {
            tx_hash: tx_hash.clone(),
            sender: transaction.sender.clone(),
            function: function.to_string(),
        });
        Ok(tx_hash)
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl backend::Backend for Emulator {
    async fn fetch_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> Result<Option<serde_json::Value>, Error> {
        let yields = {
            let mut state = self.state.lock();
            state.journal.push(JournalEntry::Read {
                address: address.clone(),
                resource_type: resource_type.to_string(),
            });
            state.read_yields
        };
        yield_times(yields).await;

        let mut state = self.state.lock();
        if state.failing_reads > 0 {
            state.failing_reads -= 1;
            return Err(Error::Node {
                status: 503,
                message: "Emulated read failure".into(),
            });
        }
        let value = if resource_type == self.module.qualify(PLAYER_INVENTORY) {
            state
                .inventories
                .get(address)
                .map(serde_json::to_value)
                .transpose()?
        } else if resource_type == self.module.qualify(GAME_STATE) && *address == self.module.address
        {
            state
                .game_state
                .as_ref()
                .map(serde_json::to_value)
                .transpose()?
        } else {
            None
        };
        Ok(value)
    }

    async fn await_transaction(
        &self,
        tx_hash: &TxHash,
    ) -> Result<backend::CommittedTransaction, Error> {
        let yields = self.state.lock().confirmation_yields;
        yield_times(yields).await;

        let mut state = self.state.lock();
        if state.failing_confirmations > 0 {
            state.failing_confirmations -= 1;
            return Err(Error::ConfirmationFailed {
                tx_hash: tx_hash.clone(),
                reason: "Emulated confirmation timeout".into(),
            });
        }
        let committed = state
            .transactions
            .get(tx_hash)
            .cloned()
            .ok_or_else(|| Error::from(format!("Unknown transaction {}", tx_hash)))?;
        state.journal.push(JournalEntry::Confirmed {
            tx_hash: tx_hash.clone(),
        });
        Ok(committed)
    }

    fn chain_id(&self) -> u8 {
        EMULATOR_CHAIN_ID
    }
}

/// [Wallet] that signs for a single account and submits to an [Emulator].
#[derive(Clone)]
pub struct EmulatorWallet {
    emulator: Emulator,
    account: Option<AccountAddress>,
}

#[async_trait::async_trait]
impl Wallet for EmulatorWallet {
    fn account(&self) -> Option<AccountAddress> {
        self.account.clone()
    }

    async fn sign_and_submit_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<TxHash, Error> {
        let account = self.account.as_ref().ok_or(Error::WalletNotConnected)?;
        if transaction.sender != *account {
            return Err(Error::WalletRejected(format!(
                "Cannot sign for {} with account {}",
                transaction.sender, account
            )));
        }
        self.emulator.submit(transaction)
    }
}

/// Why a committed transaction did not apply.
enum Failure {
    /// The module aborted.
    Abort(GameError),
    /// The VM stopped execution, for example on overflow.
    Vm(&'static str),
}

/// Run an entry function of the game module.
///
/// The outer error means the transaction is invalid and is never committed. The inner error is
/// a module abort. Aborted transactions leave the state untouched.
fn apply(
    state: &mut EmulatorState,
    sender: &AccountAddress,
    function: &str,
    arguments: &[String],
) -> Result<Result<(), Failure>, Error> {
    match function {
        "init_player_inventory" => {
            expect_no_arguments(function, arguments)?;
            if state.inventories.contains_key(sender) {
                return Ok(Err(Failure::Abort(GameError::InventoryAlreadyExists)));
            }
            if state.hidden_inits > 0 {
                state.hidden_inits -= 1;
            } else {
                state
                    .inventories
                    .insert(sender.clone(), PlayerInventory::default());
            }
        }
        "gather_resources" => {
            expect_no_arguments(function, arguments)?;
            let clock = state.clock;
            let cooldown = state.gather_cooldown;
            let inventory = match state.inventories.get_mut(sender) {
                Some(inventory) => inventory,
                None => return Ok(Err(Failure::Abort(GameError::InventoryMissing))),
            };
            if inventory.last_gathered != 0
                && clock < inventory.last_gathered.saturating_add(cooldown)
            {
                return Ok(Err(Failure::Abort(GameError::GatherCooldown)));
            }
            let gathered = (
                inventory.wood.checked_add(GATHERED_WOOD),
                inventory.stone.checked_add(GATHERED_STONE),
                inventory.gold.checked_add(GATHERED_GOLD),
            );
            match gathered {
                (Some(wood), Some(stone), Some(gold)) => {
                    inventory.wood = wood;
                    inventory.stone = stone;
                    inventory.gold = gold;
                }
                _ => return Ok(Err(Failure::Vm(ARITHMETIC_ERROR))),
            }
            inventory.last_gathered = clock;
        }
        "create_trade_offer" => {
            let offer = parse_trade_offer(arguments)?;
            if offer.validate_amounts().is_err() {
                return Ok(Err(Failure::Abort(GameError::InvalidAmount)));
            }
            let inventory = match state.inventories.get_mut(sender) {
                Some(inventory) => inventory,
                None => return Ok(Err(Failure::Abort(GameError::InventoryMissing))),
            };
            let game_state = match state.game_state.as_mut() {
                Some(game_state) => game_state,
                None => return Ok(Err(Failure::Abort(GameError::GameStateMissing))),
            };
            if inventory.amount(offer.offered_resource) < offer.offered_amount {
                return Ok(Err(Failure::Abort(GameError::InsufficientResources)));
            }
            *inventory.amount_mut(offer.offered_resource) -= offer.offered_amount;
            game_state.trade_offers.push(TradeOfferRecord {
                creator: sender.clone(),
                offered_resource: offer.offered_resource,
                offered_amount: offer.offered_amount,
                requested_resource: offer.requested_resource,
                requested_amount: offer.requested_amount,
            });
        }
        _ => return Err(format!("Unknown entry function {}", function).into()),
    }
    Ok(Ok(()))
}

fn expect_no_arguments(function: &str, arguments: &[String]) -> Result<(), Error> {
    if arguments.is_empty() {
        Ok(())
    } else {
        Err(format!("{} takes no arguments, got {}", function, arguments.len()).into())
    }
}

fn parse_trade_offer(arguments: &[String]) -> Result<message::CreateTradeOffer, Error> {
    match arguments {
        [offered_resource, offered_amount, requested_resource, requested_amount] => {
            Ok(message::CreateTradeOffer {
                offered_resource: parse_argument(offered_resource)?,
                offered_amount: parse_argument(offered_amount)?,
                requested_resource: parse_argument(requested_resource)?,
                requested_amount: parse_argument(requested_amount)?,
            })
        }
        _ => Err(format!(
            "create_trade_offer takes 4 arguments, got {}",
            arguments.len()
        )
        .into()),
    }
}

fn parse_argument<T>(value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|error| format!("Invalid argument {:?}: {}", value, error).into())
}

/// `vm_status` of an aborted transaction in the format the node reports.
fn abort_status(module: &ModuleId, error: GameError) -> String {
    format!(
        "Move abort in {}: {}({:#x}): {}",
        module,
        error.constant_name(),
        ABORT_CATEGORY | error.abort_code(),
        error
    )
}

/// Suspend the current task `times` times.
async fn yield_times(times: usize) {
    for _ in 0..times {
        tokio::task::yield_now().await;
    }
}
