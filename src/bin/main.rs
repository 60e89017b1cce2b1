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

use clap::{Parser, Subcommand};
use guildcoin::{Catalog, EconomyError, Engine, JobApplication, LedgerStore, UserId};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process;

/// Guildcoin - virtual economy command surface
///
/// Loads the catalog and ledger from the data directory, runs one economy
/// operation, and prints the outcome. Business-rule outcomes (cooldowns,
/// insufficient funds, unknown entities) are rendered as text, not failures.
#[derive(Parser, Debug)]
#[command(name = "guildcoin")]
#[command(about = "Virtual economy: jobs, coins, shop, leaderboard", long_about = None)]
struct Args {
    /// Directory holding jobs.json, shop.json and ledger.json
    #[arg(long, default_value = ".", value_name = "DIR")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply for a job
    Apply { user: u64, job: String },
    /// Work a shift to earn coins
    Work { user: u64 },
    /// Claim the daily reward
    Daily { user: u64 },
    /// Buy an item from the shop
    Buy { user: u64, item: String },
    /// Gift an owned item to another user
    Gift {
        sender: u64,
        recipient: u64,
        item: String,
    },
    /// Quit the current job
    Quit { user: u64 },
    /// Show a coin balance
    Balance { user: u64 },
    /// Show owned items
    Inventory { user: u64 },
    /// Show the richest users
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List available jobs and their chances
    Jobs,
    /// List shop items
    Shop,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Catalog and ledger failures at startup are fatal; everything after
    // this point is an expected outcome rendered for the user.
    let catalog = match Catalog::load(&args.data_dir) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Error loading catalog: {err}");
            process::exit(1);
        }
    };
    let ledger = match LedgerStore::open(args.data_dir.join("ledger.json")) {
        Ok(ledger) => ledger,
        Err(err) => {
            eprintln!("Error opening ledger: {err}");
            process::exit(1);
        }
    };
    let engine = Engine::new(catalog, ledger);

    match run(&engine, args.command) {
        Ok(message) => println!("{message}"),
        Err(err) => println!("{}", render_error(&err)),
    }
}

fn run(engine: &Engine, command: Command) -> Result<String, EconomyError> {
    match command {
        Command::Apply { user, job } => match engine.apply_for_job(UserId(user), &job)? {
            JobApplication::Hired(name) => Ok(format!("You got the job: {name}!")),
            JobApplication::Rejected => Ok("No job this time. Try again later!".to_string()),
        },
        Command::Work { user } => {
            let earned = engine.work(UserId(user))?;
            Ok(format!("You worked a shift and earned {earned} coins!"))
        }
        Command::Daily { user } => {
            let earned = engine.claim_daily(UserId(user))?;
            Ok(format!("You claimed {earned} coins for your daily reward!"))
        }
        Command::Buy { user, item } => {
            let balance = engine.buy(UserId(user), &item)?;
            Ok(format!("You bought {item}! You have {balance} coins left."))
        }
        Command::Gift {
            sender,
            recipient,
            item,
        } => {
            engine.gift(UserId(sender), UserId(recipient), &item)?;
            Ok(format!("You gifted {item} to {recipient}."))
        }
        Command::Quit { user } => {
            let job = engine.quit_job(UserId(user))?;
            Ok(format!("You quit your job as {job}."))
        }
        Command::Balance { user } => {
            Ok(format!("You have {} coins.", engine.balance(UserId(user))))
        }
        Command::Inventory { user } => {
            let inventory = engine.inventory(UserId(user));
            if inventory.is_empty() {
                return Ok("Your inventory is empty.".to_string());
            }
            let mut message = String::from("Inventory:");
            for (item, quantity) in inventory {
                let _ = write!(message, "\n{item}: {quantity}");
            }
            Ok(message)
        }
        Command::Leaderboard { limit } => {
            let mut message = String::from("Leaderboard:");
            for (rank, (user, balance)) in engine.leaderboard(limit).into_iter().enumerate() {
                let _ = write!(message, "\n{}. {user}: {balance} coins", rank + 1);
            }
            Ok(message)
        }
        Command::Jobs => {
            let mut message = String::from("Available jobs:");
            for (name, job) in engine.catalog().jobs() {
                let _ = write!(
                    message,
                    "\n{name}: {:.0}% ({}-{} coins)",
                    job.chance * 100.0,
                    job.min,
                    job.max
                );
            }
            Ok(message)
        }
        Command::Shop => {
            let mut message = String::from("Shop items:");
            for (name, item) in engine.catalog().shop() {
                let _ = write!(
                    message,
                    "\n{name}: {} coins - {}",
                    item.price, item.description
                );
            }
            Ok(message)
        }
    }
}

/// User-facing phrasing for expected outcomes.
fn render_error(err: &EconomyError) -> String {
    match err {
        EconomyError::AlreadyHasJob(job) => format!("You already have a job as {job}."),
        EconomyError::NoJobAssigned => "You don't have a job! Apply first with `apply`.".to_string(),
        EconomyError::OnCooldown(_) => format!("You are {err}."),
        EconomyError::InsufficientFunds { .. } => "You don't have enough coins.".to_string(),
        EconomyError::UnknownItem(_) => "This item does not exist.".to_string(),
        EconomyError::UnknownJob(name) => format!("There is no job called {name}."),
        EconomyError::ItemNotOwned(item) => format!("You don't own a {item}."),
        EconomyError::Persistence(_) => format!("Something went wrong saving your progress ({err}); please try again."),
    }
}
