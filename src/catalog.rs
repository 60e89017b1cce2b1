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

//! Job and shop item catalog.
//!
//! Loaded once at startup from `jobs.json` and `shop.json` and read-only
//! afterwards. A missing file is seeded with the built-in defaults and
//! written back so subsequent loads are stable; a malformed file is fatal.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

const JOBS_FILE: &str = "jobs.json";
const SHOP_FILE: &str = "shop.json";

/// A job a user can hold.
///
/// `chance` is the probability in [0, 1] that an application is accepted;
/// `min..=max` is the inclusive coin range earned per shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub chance: f64,
    pub min: u64,
    pub max: u64,
}

/// A purchasable shop item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub price: u64,
    pub description: String,
}

/// Immutable-per-session catalog of jobs and shop items.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    jobs: BTreeMap<String, JobDefinition>,
    shop: BTreeMap<String, ShopItem>,
}

impl Catalog {
    /// Loads the catalog from `dir`, seeding missing files with the built-in
    /// defaults.
    ///
    /// # Errors
    ///
    /// Fails fast with [`CatalogError`] when a file exists but is malformed
    /// or violates an entry constraint (`chance` outside [0, 1], `min > max`,
    /// blank name). This is not recoverable: the economy has no valid
    /// definition of value without the catalog.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let jobs = load_or_seed(&dir.join(JOBS_FILE), default_jobs)?;
        let shop = load_or_seed(&dir.join(SHOP_FILE), default_shop)?;
        let catalog = Catalog { jobs, shop };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in default catalog, used to seed missing files.
    pub fn builtin() -> Self {
        Catalog {
            jobs: default_jobs(),
            shop: default_shop(),
        }
    }

    /// Looks up a job by title-cased name.
    ///
    /// `"head farmer"`, `"HEAD FARMER"` and `"Head Farmer"` all resolve to
    /// the same entry. Returns the canonical name alongside the definition.
    pub fn job(&self, name: &str) -> Option<(&str, &JobDefinition)> {
        let canonical = title_case(name);
        self.jobs
            .get_key_value(canonical.as_str())
            .map(|(key, def)| (key.as_str(), def))
    }

    /// Looks up a shop item by exact name.
    pub fn item(&self, name: &str) -> Option<&ShopItem> {
        self.shop.get(name)
    }

    /// All job definitions, ordered by name.
    pub fn jobs(&self) -> &BTreeMap<String, JobDefinition> {
        &self.jobs
    }

    /// All shop items, ordered by name.
    pub fn shop(&self) -> &BTreeMap<String, ShopItem> {
        &self.shop
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (name, job) in &self.jobs {
            if name.trim().is_empty() {
                return Err(invalid(name, "job name is blank"));
            }
            if !(0.0..=1.0).contains(&job.chance) {
                return Err(invalid(name, "chance must be within [0, 1]"));
            }
            if job.min > job.max {
                return Err(invalid(name, "earning range has min > max"));
            }
        }
        for name in self.shop.keys() {
            if name.trim().is_empty() {
                return Err(invalid(name, "item name is blank"));
            }
        }
        Ok(())
    }
}

/// Title-cases a name for job lookup: first letter of each word uppercased,
/// the rest lowercased.
pub(crate) fn title_case(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn invalid(entry: &str, reason: &str) -> CatalogError {
    CatalogError::Invalid {
        entry: entry.to_string(),
        reason: reason.to_string(),
    }
}

/// Reads a catalog section from `path`, writing the defaults there first if
/// the file does not exist.
fn load_or_seed<T>(
    path: &Path,
    defaults: fn() -> BTreeMap<String, T>,
) -> Result<BTreeMap<String, T>, CatalogError>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    if !path.exists() {
        let seeded = defaults();
        fs::write(path, serde_json::to_vec_pretty(&seeded)?)?;
        info!(path = %path.display(), "seeded default catalog file");
        return Ok(seeded);
    }
    let raw = fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

fn default_jobs() -> BTreeMap<String, JobDefinition> {
    let mut jobs = BTreeMap::new();
    jobs.insert(
        "Farmer".to_string(),
        JobDefinition {
            chance: 0.75,
            min: 40,
            max: 90,
        },
    );
    jobs.insert(
        "Guard".to_string(),
        JobDefinition {
            chance: 0.5,
            min: 60,
            max: 120,
        },
    );
    jobs.insert(
        "Merchant".to_string(),
        JobDefinition {
            chance: 0.3,
            min: 80,
            max: 160,
        },
    );
    jobs.insert(
        "Alchemist".to_string(),
        JobDefinition {
            chance: 0.1,
            min: 150,
            max: 300,
        },
    );
    jobs
}

fn default_shop() -> BTreeMap<String, ShopItem> {
    let mut shop = BTreeMap::new();
    shop.insert(
        "Fishing Rod".to_string(),
        ShopItem {
            price: 250,
            description: "Cast a line down by the river.".to_string(),
        },
    );
    shop.insert(
        "Lucky Charm".to_string(),
        ShopItem {
            price: 500,
            description: "Feels warm to the touch.".to_string(),
        },
    );
    shop.insert(
        "Golden Crown".to_string(),
        ShopItem {
            price: 2500,
            description: "For showing off on the leaderboard.".to_string(),
        },
    );
    shop
}
