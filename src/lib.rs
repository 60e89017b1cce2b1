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

//! # Guildcoin
//!
//! A per-user virtual economy: balances, job assignment, cooldown-gated
//! earning actions, a purchasable item catalog, per-user inventories, and
//! leaderboard queries.
//!
//! ## Core Components
//!
//! - [`Engine`]: the economy state machine (apply, work, daily, buy, gift,
//!   leaderboard)
//! - [`LedgerStore`]: durable user accounts with snapshot-on-write
//!   persistence
//! - [`Catalog`]: immutable-per-session job and shop item definitions
//! - [`EconomyError`]: named outcomes for the command surface to render
//!
//! ## Example
//!
//! ```
//! use guildcoin::{Catalog, Engine, LedgerStore, UserId};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let ledger = LedgerStore::open(dir.path().join("ledger.json")).unwrap();
//! let engine = Engine::new(Catalog::builtin(), ledger);
//!
//! let earned = engine.claim_daily(UserId(1)).unwrap();
//! assert_eq!(engine.balance(UserId(1)), earned);
//! ```
//!
//! ## Thread Safety
//!
//! The engine is invoked concurrently by many independent callers; the
//! ledger serializes all account reads and mutations so every operation is
//! a single atomic unit from the caller's perspective.

pub mod account;
mod base;
pub mod catalog;
mod clock;
mod dice;
mod engine;
pub mod error;
mod ledger;
mod observer;

pub use account::UserAccount;
pub use base::UserId;
pub use catalog::{Catalog, JobDefinition, ShopItem};
pub use clock::{Clock, SystemClock};
pub use dice::{Dice, ThreadDice, draw};
pub use engine::{Engine, EngineConfig, JobApplication};
pub use error::{CatalogError, EconomyError, PersistenceError};
pub use ledger::LedgerStore;
pub use observer::JobObserver;
