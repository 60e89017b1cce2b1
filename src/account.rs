// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Guildcoin Authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Per-user economic state.
//!
//! # Example
//!
//! ```
//! use guildcoin::UserAccount;
//!
//! let mut account = UserAccount::new();
//! account.credit(100);
//! assert_eq!(account.balance, 100);
//! ```

use crate::error::EconomyError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Economic state for one user.
///
/// Created lazily on first reference with zero state, mutated by engine
/// operations, and never deleted. The balance cannot go negative: debits are
/// checked before any mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Coin balance.
    pub balance: u64,
    /// Assigned job name; always references a catalog entry when set.
    #[serde(default)]
    pub job: Option<String>,
    /// Last successful work shift; absent means never worked.
    #[serde(default)]
    pub last_work: Option<DateTime<Utc>>,
    /// Last daily claim; absent means never claimed.
    #[serde(default)]
    pub last_daily: Option<DateTime<Utc>>,
    /// Owned item quantities. Every entry is >= 1; a quantity that reaches
    /// zero is removed from the map.
    #[serde(default)]
    pub inventory: BTreeMap<String, u64>,
}

impl UserAccount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds earned coins to the balance.
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.assert_invariants();
    }

    /// Removes coins from the balance, checked against the price.
    pub fn debit(&mut self, price: u64) -> Result<(), EconomyError> {
        if self.balance < price {
            return Err(EconomyError::InsufficientFunds {
                price,
                balance: self.balance,
            });
        }
        self.balance -= price;
        self.assert_invariants();
        Ok(())
    }

    /// Adds one unit of `item` to the inventory.
    pub fn grant_item(&mut self, item: &str) {
        *self.inventory.entry(item.to_string()).or_insert(0) += 1;
        self.assert_invariants();
    }

    /// Removes one unit of `item`, deleting the entry when it reaches zero.
    pub fn take_item(&mut self, item: &str) -> Result<(), EconomyError> {
        match self.inventory.get_mut(item) {
            Some(quantity) if *quantity > 1 => {
                *quantity -= 1;
            }
            Some(_) => {
                self.inventory.remove(item);
            }
            None => return Err(EconomyError::ItemNotOwned(item.to_string())),
        }
        self.assert_invariants();
        Ok(())
    }

    /// Quantity of `item` currently owned.
    pub fn owned(&self, item: &str) -> u64 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.inventory.values().all(|quantity| *quantity >= 1),
            "invariant violated: inventory entry retained at zero quantity"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_has_zero_state() {
        let account = UserAccount::new();
        assert_eq!(account.balance, 0);
        assert!(account.job.is_none());
        assert!(account.last_work.is_none());
        assert!(account.last_daily.is_none());
        assert!(account.inventory.is_empty());
    }

    #[test]
    fn credit_then_debit() {
        let mut account = UserAccount::new();
        account.credit(100);
        account.debit(30).unwrap();
        assert_eq!(account.balance, 70);
    }

    #[test]
    fn debit_over_balance_returns_error_and_leaves_balance() {
        let mut account = UserAccount::new();
        account.credit(50);
        let err = account.debit(100).unwrap_err();
        assert!(matches!(
            err,
            EconomyError::InsufficientFunds {
                price: 100,
                balance: 50
            }
        ));
        assert_eq!(account.balance, 50);
    }

    #[test]
    fn grant_item_accumulates_quantity() {
        let mut account = UserAccount::new();
        account.grant_item("Fishing Rod");
        account.grant_item("Fishing Rod");
        assert_eq!(account.owned("Fishing Rod"), 2);
    }

    #[test]
    fn take_item_removes_entry_at_zero() {
        let mut account = UserAccount::new();
        account.grant_item("Fishing Rod");
        account.take_item("Fishing Rod").unwrap();
        assert_eq!(account.owned("Fishing Rod"), 0);
        // The key is gone, not retained at zero.
        assert!(!account.inventory.contains_key("Fishing Rod"));
    }

    #[test]
    fn take_item_not_owned_returns_error() {
        let mut account = UserAccount::new();
        let err = account.take_item("Crown").unwrap_err();
        assert!(matches!(err, EconomyError::ItemNotOwned(name) if name == "Crown"));
    }
}
