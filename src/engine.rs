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

//! Economy engine.
//!
//! The [`Engine`] is the central component tying the catalog and the ledger
//! together. It handles job applications, cooldown-gated earning actions,
//! shop purchases, gifts, and leaderboard queries.
//!
//! # Outcomes
//!
//! Every operation returns exactly one typed outcome. Business-rule
//! violations (cooldown, insufficient funds, unknown entity) come back as
//! [`EconomyError`] values for the command surface to render; a losing job
//! roll is an expected [`JobApplication::Rejected`] outcome, not an error.
//!
//! # Thread Safety
//!
//! The engine is `Send + Sync`; operations may be invoked concurrently by
//! many independent callers. Serialization happens inside [`LedgerStore`].

use crate::base::UserId;
use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock, cooldown_remaining};
use crate::dice::{Dice, ThreadDice, draw};
use crate::error::EconomyError;
use crate::ledger::LedgerStore;
use crate::observer::JobObserver;
use chrono::Duration;
use std::collections::BTreeMap;

/// Tunable cooldowns and the job-independent daily reward range.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub work_cooldown: Duration,
    pub daily_cooldown: Duration,
    pub daily_min: u64,
    pub daily_max: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            work_cooldown: Duration::hours(6),
            daily_cooldown: Duration::hours(24),
            daily_min: 100,
            daily_max: 300,
        }
    }
}

/// Outcome of a job application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobApplication {
    /// The roll landed; the job is now assigned.
    Hired(String),
    /// The roll missed. No state changed; the user may apply again.
    Rejected,
}

/// Economy engine over a catalog and a ledger store.
///
/// # Invariants
///
/// - A set `job` always references an existing catalog entry.
/// - Balances never go negative; every debit is checked first.
/// - The first successful job application is sticky until an explicit
///   [`quit_job`](Self::quit_job).
pub struct Engine {
    catalog: Catalog,
    ledger: LedgerStore,
    config: EngineConfig,
    dice: Box<dyn Dice>,
    clock: Box<dyn Clock>,
    observers: Vec<Box<dyn JobObserver>>,
}

impl Engine {
    /// Creates an engine with the default config, system dice, and system
    /// clock.
    pub fn new(catalog: Catalog, ledger: LedgerStore) -> Self {
        Engine {
            catalog,
            ledger,
            config: EngineConfig::default(),
            dice: Box::new(ThreadDice),
            clock: Box::new(SystemClock),
            observers: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Registers an observer notified after durable job changes.
    pub fn with_observer(mut self, observer: impl JobObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Applies for the named job.
    ///
    /// Draws a uniform roll in [0, 1); `roll <= chance` hires. A losing roll
    /// is an expected [`JobApplication::Rejected`] outcome with no state
    /// change.
    ///
    /// # Errors
    ///
    /// - [`EconomyError::AlreadyHasJob`] - the first successful application
    ///   is sticky; quit first.
    /// - [`EconomyError::UnknownJob`] - the title-cased name is not in the
    ///   catalog.
    pub fn apply_for_job(
        &self,
        user: UserId,
        job_name: &str,
    ) -> Result<JobApplication, EconomyError> {
        let (canonical, definition) = self
            .catalog
            .job(job_name)
            .ok_or_else(|| EconomyError::UnknownJob(job_name.to_string()))?;
        let canonical = canonical.to_string();
        let chance = definition.chance;

        let account = self.ledger.account(user);
        if let Some(job) = account.job {
            return Err(EconomyError::AlreadyHasJob(job));
        }
        if !draw(self.dice.roll(), chance) {
            return Ok(JobApplication::Rejected);
        }
        self.ledger.update(user, |account| {
            // Re-checked under the lock: a concurrent application may have
            // landed since the read above.
            if let Some(job) = &account.job {
                return Err(EconomyError::AlreadyHasJob(job.clone()));
            }
            account.job = Some(canonical.clone());
            Ok(())
        })?;
        for observer in &self.observers {
            observer.job_assigned(user, &canonical);
        }
        Ok(JobApplication::Hired(canonical))
    }

    /// Works a shift and returns the coins earned.
    ///
    /// # Errors
    ///
    /// - [`EconomyError::NoJobAssigned`] - no job set.
    /// - [`EconomyError::OnCooldown`] - the work window has not elapsed; no
    ///   mutation.
    pub fn work(&self, user: UserId) -> Result<u64, EconomyError> {
        let now = self.clock.now();
        self.ledger.update(user, |account| {
            let job_name = account.job.clone().ok_or(EconomyError::NoJobAssigned)?;
            let (_, definition) = self
                .catalog
                .job(&job_name)
                .ok_or_else(|| EconomyError::UnknownJob(job_name.clone()))?;
            if let Some(remaining) =
                cooldown_remaining(account.last_work, self.config.work_cooldown, now)
            {
                return Err(EconomyError::OnCooldown(remaining));
            }
            let earned = self.dice.amount(definition.min..=definition.max);
            account.credit(earned);
            account.last_work = Some(now);
            Ok(earned)
        })
    }

    /// Claims the daily reward, independent of job.
    ///
    /// # Errors
    ///
    /// - [`EconomyError::OnCooldown`] - the daily window has not elapsed; no
    ///   mutation.
    pub fn claim_daily(&self, user: UserId) -> Result<u64, EconomyError> {
        let now = self.clock.now();
        self.ledger.update(user, |account| {
            if let Some(remaining) =
                cooldown_remaining(account.last_daily, self.config.daily_cooldown, now)
            {
                return Err(EconomyError::OnCooldown(remaining));
            }
            let earned = self
                .dice
                .amount(self.config.daily_min..=self.config.daily_max);
            account.credit(earned);
            account.last_daily = Some(now);
            Ok(earned)
        })
    }

    /// Buys one unit of the named item and returns the new balance.
    ///
    /// The debit and the inventory increment commit atomically.
    ///
    /// # Errors
    ///
    /// - [`EconomyError::UnknownItem`] - not in the catalog.
    /// - [`EconomyError::InsufficientFunds`] - price exceeds the balance.
    pub fn buy(&self, user: UserId, item_name: &str) -> Result<u64, EconomyError> {
        let item = self
            .catalog
            .item(item_name)
            .ok_or_else(|| EconomyError::UnknownItem(item_name.to_string()))?;
        let price = item.price;
        self.ledger.update(user, |account| {
            account.debit(price)?;
            account.grant_item(item_name);
            Ok(account.balance)
        })
    }

    /// Moves one unit of the named item from `sender` to `recipient`,
    /// persisting both accounts as one logical unit.
    ///
    /// # Errors
    ///
    /// - [`EconomyError::ItemNotOwned`] - the sender owns no such item.
    pub fn gift(
        &self,
        sender: UserId,
        recipient: UserId,
        item_name: &str,
    ) -> Result<(), EconomyError> {
        if sender == recipient {
            // Validated no-op: ownership is checked, nothing moves.
            if self.ledger.account(sender).owned(item_name) == 0 {
                return Err(EconomyError::ItemNotOwned(item_name.to_string()));
            }
            return Ok(());
        }
        self.ledger.update_pair(sender, recipient, |from, to| {
            from.take_item(item_name)?;
            to.grant_item(item_name);
            Ok(())
        })
    }

    /// Quits the current job and returns its name.
    ///
    /// # Errors
    ///
    /// - [`EconomyError::NoJobAssigned`] - nothing to quit.
    pub fn quit_job(&self, user: UserId) -> Result<String, EconomyError> {
        let job = self
            .ledger
            .update(user, |account| {
                account.job.take().ok_or(EconomyError::NoJobAssigned)
            })?;
        for observer in &self.observers {
            observer.job_cleared(user, &job);
        }
        Ok(job)
    }

    /// Top `limit` accounts by descending balance, ties broken by first-seen
    /// order. Read-only.
    pub fn leaderboard(&self, limit: usize) -> Vec<(UserId, u64)> {
        self.ledger.top(limit)
    }

    /// The user's owned items. Read-only apart from lazy account creation.
    pub fn inventory(&self, user: UserId) -> BTreeMap<String, u64> {
        self.ledger.account(user).inventory
    }

    /// The user's coin balance. Read-only apart from lazy account creation.
    pub fn balance(&self, user: UserId) -> u64 {
        self.ledger.account(user).balance
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
