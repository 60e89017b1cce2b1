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

//! Durable user-account store.
//!
//! All reads and mutations are serialized through one `RwLock`: a
//! read-modify-write for one account is atomic with respect to concurrent
//! operations on that account, and the whole-store snapshot write happens
//! under the same write lock, so no two snapshot writes interleave and no
//! snapshot observes a half-applied mutation. Lock hold time is bounded by
//! one mutation plus one snapshot write.
//!
//! Persistence is whole-store snapshot-on-write: every committed mutation
//! rewrites the JSON snapshot via a sibling temp file and an atomic rename.
//! O(total users) per write, which is fine at this scale.

use crate::account::UserAccount;
use crate::base::UserId;
use crate::error::{EconomyError, PersistenceError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Durable mapping from [`UserId`] to [`UserAccount`].
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    inner: RwLock<LedgerData>,
}

#[derive(Debug, Default)]
struct LedgerData {
    accounts: HashMap<UserId, UserAccount>,
    /// First-seen order; drives stable leaderboard tie-breaks and is part of
    /// the durable state.
    order: Vec<UserId>,
}

/// On-disk layout: an ordered record list, so first-seen order survives a
/// round-trip.
#[derive(Deserialize)]
struct SnapshotFile {
    accounts: Vec<AccountRecord>,
}

#[derive(Deserialize)]
struct AccountRecord {
    user: UserId,
    #[serde(flatten)]
    account: UserAccount,
}

#[derive(Serialize)]
struct SnapshotFileRef<'a> {
    accounts: Vec<AccountRecordRef<'a>>,
}

#[derive(Serialize)]
struct AccountRecordRef<'a> {
    user: UserId,
    #[serde(flatten)]
    account: &'a UserAccount,
}

impl LedgerStore {
    /// Opens the store at `path`, loading the snapshot if one exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let mut data = LedgerData::default();
        if path.exists() {
            let raw = fs::read(&path)?;
            let file: SnapshotFile = serde_json::from_slice(&raw)?;
            for record in file.accounts {
                if data.accounts.insert(record.user, record.account).is_none() {
                    data.order.push(record.user);
                }
            }
        }
        Ok(Self {
            path,
            inner: RwLock::new(data),
        })
    }

    /// Returns the account for `user`, creating a zero-state one on first
    /// reference. Never fails: if the creation write cannot be persisted the
    /// failure is logged and the account stays in memory until the next
    /// successful mutation persists it.
    pub fn account(&self, user: UserId) -> UserAccount {
        let mut data = self.inner.write();
        if let Some(existing) = data.accounts.get(&user) {
            return existing.clone();
        }
        data.accounts.insert(user, UserAccount::new());
        data.order.push(user);
        if let Err(err) = self.write_snapshot(&data) {
            warn!(%user, "failed to persist newly created account: {err}");
        }
        UserAccount::new()
    }

    /// Applies `mutator` to the account for `user` and synchronously writes
    /// the snapshot before returning.
    ///
    /// The mutator runs against a working copy: a business failure leaves
    /// the store untouched, and a failed snapshot write rolls back the
    /// in-memory commit and surfaces [`EconomyError::Persistence`] so the
    /// caller can retry without risk of acknowledging lost state.
    pub fn update<T>(
        &self,
        user: UserId,
        mutator: impl FnOnce(&mut UserAccount) -> Result<T, EconomyError>,
    ) -> Result<T, EconomyError> {
        let mut data = self.inner.write();
        let mut working = data.accounts.get(&user).cloned().unwrap_or_default();
        let value = mutator(&mut working)?;
        let previous = data.accounts.insert(user, working);
        if previous.is_none() {
            data.order.push(user);
        }
        if let Err(err) = self.write_snapshot(&data) {
            rollback(&mut data, user, previous);
            return Err(EconomyError::Persistence(err));
        }
        Ok(value)
    }

    /// Applies `mutator` to two distinct accounts as one logical unit, with
    /// the same commit/rollback discipline as [`update`](Self::update).
    pub fn update_pair<T>(
        &self,
        first: UserId,
        second: UserId,
        mutator: impl FnOnce(&mut UserAccount, &mut UserAccount) -> Result<T, EconomyError>,
    ) -> Result<T, EconomyError> {
        debug_assert_ne!(first, second, "update_pair requires distinct accounts");
        let mut data = self.inner.write();
        let mut working_first = data.accounts.get(&first).cloned().unwrap_or_default();
        let mut working_second = data.accounts.get(&second).cloned().unwrap_or_default();
        let value = mutator(&mut working_first, &mut working_second)?;
        let previous_first = data.accounts.insert(first, working_first);
        if previous_first.is_none() {
            data.order.push(first);
        }
        let previous_second = data.accounts.insert(second, working_second);
        if previous_second.is_none() {
            data.order.push(second);
        }
        if let Err(err) = self.write_snapshot(&data) {
            rollback(&mut data, second, previous_second);
            rollback(&mut data, first, previous_first);
            return Err(EconomyError::Persistence(err));
        }
        Ok(value)
    }

    /// Top accounts by descending balance, ties broken by first-seen order.
    pub fn top(&self, limit: usize) -> Vec<(UserId, u64)> {
        let data = self.inner.read();
        let mut entries: Vec<(UserId, u64)> = data
            .order
            .iter()
            .map(|user| (*user, data.accounts[user].balance))
            .collect();
        // Stable sort: equal balances keep first-seen order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
        entries
    }

    /// All accounts in first-seen order.
    pub fn snapshot(&self) -> Vec<(UserId, UserAccount)> {
        let data = self.inner.read();
        data.order
            .iter()
            .map(|user| (*user, data.accounts[user].clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_snapshot(&self, data: &LedgerData) -> Result<(), PersistenceError> {
        let file = SnapshotFileRef {
            accounts: data
                .order
                .iter()
                .map(|user| AccountRecordRef {
                    user: *user,
                    account: &data.accounts[user],
                })
                .collect(),
        };
        let encoded = serde_json::to_vec_pretty(&file)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn rollback(data: &mut LedgerData, user: UserId, previous: Option<UserAccount>) {
    match previous {
        Some(old) => {
            data.accounts.insert(user, old);
        }
        None => {
            data.accounts.remove(&user);
            data.order.retain(|seen| *seen != user);
        }
    }
}
