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

//! Benchmarks for the economy engine.
//!
//! Run with: cargo bench
//!
//! Every mutation pays for a whole-store snapshot write, so the interesting
//! axis is how operation cost scales with the number of accounts.

use chrono::Duration;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use guildcoin::{Catalog, Engine, EngineConfig, LedgerStore, UserId};
use rayon::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

fn bench_config() -> EngineConfig {
    EngineConfig {
        work_cooldown: Duration::zero(),
        daily_cooldown: Duration::zero(),
        daily_min: 10,
        daily_max: 10,
    }
}

fn engine_with_accounts(dir: &TempDir, accounts: u64) -> Engine {
    let ledger = LedgerStore::open(dir.path().join("ledger.json")).unwrap();
    for user in 0..accounts {
        ledger
            .update(UserId(user), |account| {
                account.credit(user * 10);
                Ok(())
            })
            .unwrap();
    }
    Engine::new(Catalog::builtin(), ledger).with_config(bench_config())
}

fn bench_claim_snapshot_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("claim_with_snapshot_write");

    for accounts in [10, 100, 1_000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(accounts),
            accounts,
            |b, &accounts| {
                let dir = TempDir::new().unwrap();
                let engine = engine_with_accounts(&dir, accounts);
                b.iter(|| {
                    let _ = engine.claim_daily(UserId(1));
                    black_box(&engine);
                })
            },
        );
    }
    group.finish();
}

fn bench_buy(c: &mut Criterion) {
    c.bench_function("buy", |b| {
        let dir = TempDir::new().unwrap();
        let ledger = LedgerStore::open(dir.path().join("ledger.json")).unwrap();
        // A purse deep enough that every iteration takes the success path.
        ledger
            .update(UserId(1), |account| {
                account.credit(1_000_000_000);
                Ok(())
            })
            .unwrap();
        let engine = Engine::new(Catalog::builtin(), ledger).with_config(bench_config());
        b.iter(|| {
            black_box(engine.buy(UserId(1), "Fishing Rod")).unwrap();
        })
    });
}

fn bench_leaderboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("leaderboard");

    for accounts in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*accounts));
        group.bench_with_input(
            BenchmarkId::from_parameter(accounts),
            accounts,
            |b, &accounts| {
                let dir = TempDir::new().unwrap();
                let engine = engine_with_accounts(&dir, accounts);
                b.iter(|| black_box(engine.leaderboard(10)))
            },
        );
    }
    group.finish();
}

fn bench_parallel_claims_different_users(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_claims_different_users");

    for count in [100, 1_000].iter() {
        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let dir = TempDir::new().unwrap();
                let ledger = LedgerStore::open(dir.path().join("ledger.json")).unwrap();
                let engine =
                    Arc::new(Engine::new(Catalog::builtin(), ledger).with_config(bench_config()));

                (0..count).into_par_iter().for_each(|user| {
                    let _ = engine.claim_daily(UserId(user));
                });
                black_box(&engine);
            })
        });
    }
    group.finish();
}

criterion_group!(
    single_threaded,
    bench_claim_snapshot_write,
    bench_buy,
    bench_leaderboard,
);

criterion_group!(multi_threaded, bench_parallel_claims_different_users,);

criterion_main!(single_threaded, multi_threaded);
