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

/// Abort reasons of the game module.
///
/// The discriminant is the reason part of the abort code the module raises.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameError {
    InventoryAlreadyExists = 1,
    InventoryMissing,
    InsufficientResources,
    InvalidAmount,
    GatherCooldown,
    GameStateMissing,
}

impl GameError {
    const ALL: [GameError; 6] = [
        GameError::InventoryAlreadyExists,
        GameError::InventoryMissing,
        GameError::InsufficientResources,
        GameError::InvalidAmount,
        GameError::GatherCooldown,
        GameError::GameStateMissing,
    ];

    pub fn abort_code(self) -> u64 {
        self as u64
    }

    /// Look up the error for the reason part of an abort code.
    pub fn from_abort_code(code: u64) -> Option<Self> {
        GameError::ALL
            .iter()
            .copied()
            .find(|error| error.abort_code() == code)
    }

    /// Name of the abort constant in the module source, as it appears in the ledger's `vm_status`.
    pub fn constant_name(self) -> &'static str {
        match self {
            GameError::InventoryAlreadyExists => "EINVENTORY_ALREADY_EXISTS",
            GameError::InventoryMissing => "EINVENTORY_NOT_FOUND",
            GameError::InsufficientResources => "EINSUFFICIENT_RESOURCES",
            GameError::InvalidAmount => "EINVALID_AMOUNT",
            GameError::GatherCooldown => "EGATHER_COOLDOWN",
            GameError::GameStateMissing => "EGAME_STATE_NOT_FOUND",
        }
    }
}

impl From<GameError> for &'static str {
    fn from(error: GameError) -> &'static str {
        match error {
            GameError::InventoryAlreadyExists => "The player inventory is already initialized.",
            GameError::InventoryMissing => "The player inventory does not exist.",
            GameError::InsufficientResources => {
                "The player does not hold enough of the offered resource."
            }
            GameError::InvalidAmount => "Amounts must be positive.",
            GameError::GatherCooldown => "Resources were gathered too recently.",
            GameError::GameStateMissing => "The game state has not been published.",
        }
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str((*self).into())
    }
}

/// Reason a committed transaction did not apply.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TransactionError {
    /// The game module aborted with a known reason.
    #[error("{0}")]
    Game(GameError),

    /// Any other execution failure. Holds the ledger's `vm_status`.
    #[error("transaction failed: {0}")]
    Other(String),
}

/// Only the lower 16 bits of an abort code carry the reason. The upper bits hold the error
/// category.
const ABORT_REASON_MASK: u64 = 0xffff;

impl TransactionError {
    /// Classify the `vm_status` of a failed transaction.
    ///
    /// Move aborts are reported as `Move abort in <module>: <NAME>(0x<code>): <description>` or,
    /// without abort constant names, as `Move abort in <module>: 0x<code>`.
    ///
    /// ```rust
    /// # use resource_trade_core::{GameError, TransactionError};
    /// let status = "Move abort in 0x1::resource_manager: EINSUFFICIENT_RESOURCES(0x10003): ";
    /// assert_eq!(
    ///     TransactionError::from_vm_status(status),
    ///     TransactionError::Game(GameError::InsufficientResources)
    /// );
    /// ```
    pub fn from_vm_status(vm_status: &str) -> Self {
        abort_code(vm_status)
            .and_then(|code| GameError::from_abort_code(code & ABORT_REASON_MASK))
            .map(TransactionError::Game)
            .unwrap_or_else(|| TransactionError::Other(vm_status.to_string()))
    }
}

impl From<GameError> for TransactionError {
    fn from(error: GameError) -> Self {
        TransactionError::Game(error)
    }
}

fn abort_code(vm_status: &str) -> Option<u64> {
    if !vm_status.starts_with("Move abort") {
        return None;
    }
    let hex = match vm_status.find("(0x") {
        Some(start) => {
            let rest = &vm_status[start + 3..];
            &rest[..rest.find(')')?]
        }
        None => {
            let rest = &vm_status[vm_status.rfind(": 0x")? + 4..];
            rest.split_whitespace().next()?
        }
    };
    u64::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn abort_codes_round_trip() {
        for error in GameError::ALL.iter() {
            assert_eq!(GameError::from_abort_code(error.abort_code()), Some(*error));
        }
        assert_eq!(GameError::from_abort_code(0), None);
    }

    #[test]
    fn vm_status_with_constant_name() {
        let status = "Move abort in 0x7ca5::resource_manager: EGATHER_COOLDOWN(0x5): wait";
        assert_eq!(
            TransactionError::from_vm_status(status),
            TransactionError::Game(GameError::GatherCooldown)
        );
    }

    #[test]
    fn vm_status_without_constant_name() {
        let status = "Move abort in 0x7ca5::resource_manager: 0x60001";
        assert_eq!(
            TransactionError::from_vm_status(status),
            TransactionError::Game(GameError::InventoryAlreadyExists)
        );
    }

    #[test]
    fn unknown_failures_keep_the_status() {
        let status = "OUT_OF_GAS";
        assert_eq!(
            TransactionError::from_vm_status(status),
            TransactionError::Other(status.to_string())
        );
        let unknown_abort = "Move abort in 0x1::coin: EINSUFFICIENT_BALANCE(0x10042): ";
        assert_eq!(
            TransactionError::from_vm_status(unknown_abort),
            TransactionError::Other(unknown_abort.to_string())
        );
    }
}
