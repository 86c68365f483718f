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

//! Provides [SingleFlight] to share one running operation between concurrent callers.
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

/// The caller that ran the shared operation dropped it before it completed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("the shared operation was dropped before it completed")]
pub struct Abandoned;

type Waiters<K, T> = HashMap<K, Vec<oneshot::Sender<T>>>;

/// Runs at most one operation per key at a time.
///
/// The first caller for a key runs the operation. Callers arriving while it runs wait for it and
/// receive a clone of its output.
pub struct SingleFlight<K: Eq + Hash, T> {
    flights: Mutex<Waiters<K, T>>,
}

impl<K: Eq + Hash + Clone, T: Clone> SingleFlight<K, T> {
    pub fn new() -> Self {
        SingleFlight {
            flights: Mutex::new(HashMap::new()),
        }
    }

    pub fn in_flight(&self, key: &K) -> bool {
        self.flights.lock().contains_key(key)
    }

    /// Run `operation` for `key` or wait for the run that is already in flight.
    ///
    /// Waiters get [Abandoned] if the running caller is dropped before the operation completes.
    pub async fn run<F, Fut>(&self, key: K, operation: F) -> Result<T, Abandoned>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let waiter = {
            let mut flights = self.flights.lock();
            match flights.get_mut(&key) {
                Some(waiters) => {
                    let (sender, receiver) = oneshot::channel();
                    waiters.push(sender);
                    Some(receiver)
                }
                None => {
                    flights.insert(key.clone(), Vec::new());
                    None
                }
            }
        };
        if let Some(receiver) = waiter {
            return receiver.await.map_err(|_| Abandoned);
        }

        let flight = Flight {
            flights: &self.flights,
            key: Some(key),
        };
        let output = operation().await;
        for waiter in flight.land() {
            let _ = waiter.send(output.clone());
        }
        Ok(output)
    }
}

impl<K: Eq + Hash + Clone, T: Clone> Default for SingleFlight<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes the entry of a running operation. Dropping it without [Flight::land] drops all
/// waiting senders.
struct Flight<'a, K: Eq + Hash, T> {
    flights: &'a Mutex<Waiters<K, T>>,
    key: Option<K>,
}

impl<'a, K: Eq + Hash, T> Flight<'a, K, T> {
    fn land(mut self) -> Vec<oneshot::Sender<T>> {
        match self.key.take() {
            Some(key) => self.flights.lock().remove(&key).unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

impl<'a, K: Eq + Hash, T> Drop for Flight<'a, K, T> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.flights.lock().remove(&key);
        }
    }
}
