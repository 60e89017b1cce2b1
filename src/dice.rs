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

//! Random draws for job applications and earnings.

use rand::Rng;
use std::ops::RangeInclusive;

/// Whether a uniform roll in [0, 1) lands a job with the given chance.
///
/// A roll exactly at the boundary succeeds: `roll <= chance` is the
/// documented tie-break, so `chance = 0.0` can still hire on a zero roll and
/// `chance = 1.0` always hires.
pub fn draw(roll: f64, chance: f64) -> bool {
    roll <= chance
}

/// Source of random samples for the engine.
///
/// Production uses [`ThreadDice`]; tests substitute deterministic sources.
pub trait Dice: Send + Sync {
    /// A uniform roll in [0, 1).
    fn roll(&self) -> f64;

    /// A uniform integer drawn from the inclusive range.
    fn amount(&self, range: RangeInclusive<u64>) -> u64;
}

/// Dice backed by the thread-local system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDice;

impl Dice for ThreadDice {
    fn roll(&self) -> f64 {
        rand::rng().random()
    }

    fn amount(&self, range: RangeInclusive<u64>) -> u64 {
        rand::rng().random_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_at_boundary_succeeds() {
        assert!(draw(0.3, 0.3));
    }

    #[test]
    fn draw_below_chance_succeeds() {
        assert!(draw(0.1, 0.3));
        assert!(draw(0.0, 0.0));
    }

    #[test]
    fn draw_above_chance_fails() {
        assert!(!draw(0.31, 0.3));
        assert!(!draw(0.5, 0.0));
    }

    #[test]
    fn thread_dice_stays_in_range() {
        let dice = ThreadDice;
        for _ in 0..100 {
            let roll = dice.roll();
            assert!((0.0..1.0).contains(&roll));
            let amount = dice.amount(40..=90);
            assert!((40..=90).contains(&amount));
        }
        assert_eq!(dice.amount(7..=7), 7);
    }
}
