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

//! Error types for economy operations, catalog loading, and persistence.
//!
//! Business-rule violations ([`EconomyError`]) are expected outcomes handed
//! back to the command surface for user-facing rendering. Only
//! [`CatalogError`] (fatal at startup) and [`PersistenceError`] (retryable)
//! are operational errors.

use chrono::Duration;
use thiserror::Error;

/// Economy operation errors.
#[derive(Error, Debug)]
pub enum EconomyError {
    /// Job application names a job that is not in the catalog
    #[error("unknown job: {0}")]
    UnknownJob(String),

    /// Purchase names an item that is not in the catalog
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Work attempted without a job
    #[error("no job assigned")]
    NoJobAssigned,

    /// Job application while already employed
    #[error("already employed as {0}")]
    AlreadyHasJob(String),

    /// Earning action attempted before its cooldown elapsed
    #[error("on cooldown for {}", humanize(.0))]
    OnCooldown(Duration),

    /// Purchase price exceeds the available balance
    #[error("insufficient funds: costs {price}, balance is {balance}")]
    InsufficientFunds { price: u64, balance: u64 },

    /// Gift of an item the sender does not own
    #[error("item not owned: {0}")]
    ItemNotOwned(String),

    /// The durable write failed; the in-memory state was rolled back and the
    /// operation may be retried
    #[error("failed to persist ledger: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Catalog loading errors. Fatal: the economy has no definition of value
/// without a valid catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A catalog entry is structurally valid JSON but violates a constraint
    #[error("invalid catalog entry {entry:?}: {reason}")]
    Invalid { entry: String, reason: String },
}

/// Durable snapshot write/read errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("ledger io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Renders a cooldown remainder as `HhMMmSSs`.
fn humanize(remaining: &Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            EconomyError::UnknownJob("Astronaut".into()).to_string(),
            "unknown job: Astronaut"
        );
        assert_eq!(
            EconomyError::NoJobAssigned.to_string(),
            "no job assigned"
        );
        assert_eq!(
            EconomyError::AlreadyHasJob("Farmer".into()).to_string(),
            "already employed as Farmer"
        );
        assert_eq!(
            EconomyError::InsufficientFunds {
                price: 250,
                balance: 10
            }
            .to_string(),
            "insufficient funds: costs 250, balance is 10"
        );
        assert_eq!(
            EconomyError::ItemNotOwned("Crown".into()).to_string(),
            "item not owned: Crown"
        );
    }

    #[test]
    fn cooldown_display_renders_h_m_s() {
        let err = EconomyError::OnCooldown(Duration::seconds(6 * 3600 - 50));
        assert_eq!(err.to_string(), "on cooldown for 5h59m10s");
    }

    #[test]
    fn cooldown_display_clamps_negative_to_zero() {
        let err = EconomyError::OnCooldown(Duration::seconds(-5));
        assert_eq!(err.to_string(), "on cooldown for 0h00m00s");
    }
}
