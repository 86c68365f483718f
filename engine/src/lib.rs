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

//! Keeps the local view of a player consistent with the ledger.
//!
//! [GameSession] is the entry point. It owns a [Store] with the current [ViewState] and drives
//! all ledger interaction through an [InventoryReconciler] and an [Orchestrator]. Trade offers
//! are derived from the ledger by [projector::project].
//!
//! Every operation queues a [Notice] for the user and returns a [Result]. Ledger failures never
//! panic.

mod config;
mod error;
mod form;
mod intent;
mod orchestrator;
pub mod projector;
mod reconciler;
mod retry;
mod session;
mod single_flight;
mod store;

pub use config::Config;
pub use error::Error;
pub use form::TradeOfferForm;
pub use intent::{Intent, IntentTag};
pub use orchestrator::{Confirmed, Orchestrator};
pub use projector::TradeOffer;
pub use reconciler::InventoryReconciler;
pub use retry::RetryPolicy;
pub use session::GameSession;
pub use single_flight::{Abandoned, SingleFlight};
pub use store::{Notice, NoticeKind, PendingGuard, Store, ViewState};
