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

//! Provides the [Store] that holds the [ViewState] and the queue of [Notice]s.
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

use resource_trade_client::{AccountAddress, PlayerInventory};

use crate::{IntentTag, TradeOffer};

/// Everything the presentation layer shows.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewState {
    pub account: Option<AccountAddress>,
    /// Absent until the inventory of `account` has been read.
    pub inventory: Option<PlayerInventory>,
    pub offers: Vec<TradeOffer>,
    /// Intents that are submitted and not yet settled.
    pub pending: BTreeSet<IntentTag>,
}

impl ViewState {
    pub fn is_pending(&self, tag: IntentTag) -> bool {
        self.pending.contains(&tag)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// User visible feedback about an operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

/// Holds the current [ViewState] snapshot.
///
/// Snapshots are immutable. Every update clones the current snapshot, changes the clone and
/// swaps it in. A reader holding an `Arc<ViewState>` never observes a partial update.
#[derive(Debug, Default)]
pub struct Store {
    view: Mutex<Arc<ViewState>>,
    notices: Mutex<Vec<Notice>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Arc<ViewState> {
        self.view.lock().clone()
    }

    /// Replace the snapshot.
    pub fn replace(&self, view: ViewState) {
        *self.view.lock() = Arc::new(view);
    }

    /// Build the next snapshot from the current one.
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut view = self.view.lock();
        let mut next = ViewState::clone(&view);
        let result = f(&mut next);
        *view = Arc::new(next);
        result
    }

    /// Switch the view to `account`.
    ///
    /// Inventory and offers are cleared if the account changes. Pending intents are kept since
    /// their transactions are still in flight.
    pub fn connect(&self, account: AccountAddress) {
        self.update(|view| {
            if view.account.as_ref() != Some(&account) {
                view.account = Some(account);
                view.inventory = None;
                view.offers.clear();
            }
        })
    }

    pub fn disconnect(&self) {
        self.update(|view| {
            view.account = None;
            view.inventory = None;
            view.offers.clear();
        })
    }

    /// Store the inventory of `account`. Ignored if the view belongs to another account by now.
    pub fn set_inventory(&self, account: &AccountAddress, inventory: PlayerInventory) -> bool {
        self.update(|view| {
            if view.account.as_ref() == Some(account) {
                view.inventory = Some(inventory);
                true
            } else {
                false
            }
        })
    }

    pub fn set_offers(&self, offers: Vec<TradeOffer>) {
        self.update(|view| view.offers = offers)
    }

    /// Mark `tag` as pending until the returned guard is dropped.
    ///
    /// Returns `None` if an intent with the same tag is already pending.
    pub fn begin(self: &Arc<Self>, tag: IntentTag) -> Option<PendingGuard> {
        let mut view = self.view.lock();
        if view.is_pending(tag) {
            return None;
        }
        let mut next = ViewState::clone(&view);
        next.pending.insert(tag);
        *view = Arc::new(next);
        Some(PendingGuard {
            store: Arc::clone(self),
            tag,
        })
    }

    pub fn notify(&self, notice: Notice) {
        log::debug!("{:?}: {}", notice.kind, notice.message);
        self.notices.lock().push(notice);
    }

    /// Remove and return all queued notices in the order they were queued.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }
}

/// Clears the pending flag of an intent when dropped.
#[derive(Debug)]
pub struct PendingGuard {
    store: Arc<Store>,
    tag: IntentTag,
}

impl PendingGuard {
    pub fn tag(&self) -> IntentTag {
        self.tag
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let tag = self.tag;
        self.store.update(|view| {
            view.pending.remove(&tag);
        })
    }
}
