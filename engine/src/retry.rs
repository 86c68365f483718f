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

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Bounded retry for ledger reads.
///
/// Transactions are never retried. A retried submission could apply twice.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total number of attempts including the first one. `0` behaves like `1`.
    pub max_attempts: u32,
    /// Pause between two attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    /// A single attempt.
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 1,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn attempts(max_attempts: u32) -> Self {
        RetryPolicy {
            max_attempts,
            ..RetryPolicy::default()
        }
    }

    /// Run `operation` until it succeeds, fails with an error that is not `retryable` or the
    /// attempts are used up. Returns the last result.
    pub async fn retry<T, E, F, Fut>(
        &self,
        mut operation: F,
        retryable: impl Fn(&E) -> bool,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Err(error) if attempt < self.max_attempts && retryable(&error) => {
                    log::warn!(
                        "Attempt {} of {} failed: {}",
                        attempt,
                        self.max_attempts,
                        error
                    );
                    async_std::task::sleep(self.delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::from_millis(1),
        }
    }

    #[async_std::test]
    async fn retries_until_success() {
        let calls = Cell::new(0);
        let result = fast(3)
            .retry(
                || {
                    calls.set(calls.get() + 1);
                    let call = calls.get();
                    async move {
                        if call < 3 {
                            Err("unavailable")
                        } else {
                            Ok(call)
                        }
                    }
                },
                |_| true,
            )
            .await;
        assert_eq!(result, Ok(3));
    }

    #[async_std::test]
    async fn stops_at_permanent_errors() {
        let calls = Cell::new(0);
        let result: Result<(), &str> = fast(5)
            .retry(
                || {
                    calls.set(calls.get() + 1);
                    async { Err("not found") }
                },
                |error| *error != "not found",
            )
            .await;
        assert_eq!(result, Err("not found"));
        assert_eq!(calls.get(), 1);
    }

    #[async_std::test]
    async fn default_is_a_single_attempt() {
        let calls = Cell::new(0);
        let result: Result<(), &str> = RetryPolicy::default()
            .retry(
                || {
                    calls.set(calls.get() + 1);
                    async { Err("unavailable") }
                },
                |_| true,
            )
            .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn partial_config() {
        let policy: RetryPolicy = serde_json::from_str(r#"{"max_attempts": 3}"#).unwrap();
        assert_eq!(policy, RetryPolicy::attempts(3));
    }
}
