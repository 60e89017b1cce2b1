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

//! Wall-clock time source and cooldown arithmetic.
//!
//! Cooldowns compare wall-clock UTC timestamps by duration subtraction.
//! The [`Clock`] seam keeps cooldown logic testable with a manual clock.

use chrono::{DateTime, Duration, Utc};

/// Source of the current wall-clock UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Remaining cooldown, if any: `last + cooldown - now` when positive.
///
/// `None` means the action is allowed, either because it was never performed
/// or because the window has elapsed.
pub(crate) fn cooldown_remaining(
    last: Option<DateTime<Utc>>,
    cooldown: Duration,
    now: DateTime<Utc>,
) -> Option<Duration> {
    let last = last?;
    let remaining = last + cooldown - now;
    (remaining > Duration::zero()).then_some(remaining)
}
