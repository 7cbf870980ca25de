//! Execution context integration tests.
//!
//! Drive the cache the way an interpreter does: SLOAD/SSTORE through the
//! context, static sub-calls toggling read-only mode, and a single commit
//! or discard at the end.

mod common;

use std::collections::BTreeMap;

use slotcache::{CacheConfig, ExecutionContext};
use slotcache_primitives::{types::word_to_u64, ZERO_WORD};
use slotcache_statedb::MemDatabase;

use common::*;

// ── Test: successful call commits the net writes ──

#[test]
fn test_successful_call_commits() {
    let mut db = MemDatabase::new();
    let mut ctx = context(&mut db);

    ctx.sstore(&ADDR_A, &slot(1), word(5)).unwrap();
    ctx.sstore(&ADDR_A, &slot(1), word(16)).unwrap();
    assert_eq!(ctx.sload(&ADDR_A, &slot(1)).unwrap(), word(16));

    let (report, _) = ctx.commit().unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(db.writes(), &[(id(ADDR_A, 1), word(16))]);
}

// ── Test: reverted call leaves the database untouched ──

#[test]
fn test_reverted_call_discards() {
    let mut db = seeded_db(&[(ADDR_A, 1, 1)]);
    let before = db.data().clone();

    let mut ctx = context(&mut db);
    ctx.sstore(&ADDR_A, &slot(1), word(2)).unwrap();
    ctx.sstore(&ADDR_B, &slot(1), word(3)).unwrap();
    ctx.discard();

    assert_eq!(db.data(), &before);
    assert!(db.writes().is_empty());
}

// ── Test: rejected write leaves the store exactly as before ──

#[test]
fn test_static_call_rejects_write_without_mutation() {
    let mut db = seeded_db(&[(ADDR_A, 1, 7)]);
    let mut ctx = context(&mut db);
    ctx.sload(&ADDR_A, &slot(1)).unwrap();
    ctx.sstore(&ADDR_A, &slot(2), word(8)).unwrap();

    let before: Vec<_> = [id(ADDR_A, 1), id(ADDR_A, 2), id(ADDR_A, 3)]
        .iter()
        .map(|identity| ctx.cache().entry(identity))
        .collect();
    let len_before = ctx.cache().len();
    let dirty_before = ctx.cache().dirty_identities();

    ctx.set_read_only(true);
    for index in 1..=3 {
        let err = ctx.sstore(&ADDR_A, &slot(index), word(99)).unwrap_err();
        assert!(err.is_write_protection());
        assert_eq!(err.identity(), &id(ADDR_A, index));
    }

    let after: Vec<_> = [id(ADDR_A, 1), id(ADDR_A, 2), id(ADDR_A, 3)]
        .iter()
        .map(|identity| ctx.cache().entry(identity))
        .collect();
    assert_eq!(before, after);
    assert_eq!(ctx.cache().len(), len_before);
    assert_eq!(ctx.cache().dirty_identities(), dirty_before);
}

// ── Test: static sub-call inside a writable call ──

#[test]
fn test_static_subcall_then_resume() {
    let mut db = MemDatabase::new();
    let mut ctx = context(&mut db);

    ctx.sstore(&ADDR_A, &slot(1), word(1)).unwrap();

    ctx.set_read_only(true);
    assert_eq!(ctx.sload(&ADDR_A, &slot(1)).unwrap(), word(1));
    assert!(ctx.sstore(&ADDR_B, &slot(1), word(2)).is_err());
    ctx.set_read_only(false);

    ctx.sstore(&ADDR_A, &slot(2), word(3)).unwrap();
    let (report, _) = ctx.commit().unwrap();
    assert_eq!(report.written, 2);

    assert_eq!(db.storage(&id(ADDR_A, 1)), word(1));
    assert_eq!(db.storage(&id(ADDR_A, 2)), word(3));
    assert_eq!(db.storage(&id(ADDR_B, 1)), ZERO_WORD);
}

// ── Test: read-only contexts never write ──

#[test]
fn test_view_call_commit_writes_nothing() {
    let mut db = seeded_db(&[(ADDR_A, 1, 4)]);
    let mut ctx = context(&mut db).with_read_only(true);
    assert_eq!(ctx.sload(&ADDR_A, &slot(1)).unwrap(), word(4));
    assert_eq!(ctx.sload(&ADDR_A, &slot(2)).unwrap(), ZERO_WORD);

    let (report, _) = ctx.commit().unwrap();
    assert_eq!(report.written, 0);
    assert_eq!(report.skipped, 2);
    assert!(db.writes().is_empty());
}

// ── Test: commit failure is reported to the caller ──

#[test]
fn test_commit_failure_surfaces() {
    let mut db = MemDatabase::new();
    db.reject_writes_to(id(ADDR_A, 1));

    let mut ctx = context(&mut db);
    ctx.sstore(&ADDR_A, &slot(1), word(1)).unwrap();
    let failure = ctx.commit().unwrap_err();
    assert!(failure.error.is_persistence());
    drop(failure);
    assert!(db.is_empty());
}

// ── Test: an owned database survives a failed commit ──

#[test]
fn test_failed_commit_hands_back_owned_database() {
    let mut db = seeded_db(&[(ADDR_A, 5, 50), (ADDR_B, 5, 55)]);
    db.reject_writes_to(id(ADDR_B, 1));

    let mut ctx = ExecutionContext::new(db, CacheConfig::default());
    ctx.sstore(&ADDR_A, &slot(1), word(1)).unwrap();
    ctx.sstore(&ADDR_B, &slot(1), word(2)).unwrap();

    let failure = ctx.commit().unwrap_err();
    assert_eq!(failure.error.identity(), &id(ADDR_B, 1));
    assert_eq!(failure.context.cache().dirty_identities(), vec![id(ADDR_B, 1)]);

    let mut db = failure.into_database();
    let mut expected = BTreeMap::new();
    expected.insert(id(ADDR_A, 1), word(1));
    expected.insert(id(ADDR_A, 5), word(50));
    expected.insert(id(ADDR_B, 5), word(55));
    assert_eq!(db.data(), &expected);
    assert_eq!(db.writes(), &[(id(ADDR_A, 1), word(1))]);

    // The recovered handle is fully usable for the next execution.
    db.accept_writes_to(&id(ADDR_B, 1));
    let mut next = ExecutionContext::new(db, CacheConfig::default());
    next.sstore(&ADDR_B, &slot(1), word(2)).unwrap();
    let (report, db) = next.commit().unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(db.storage(&id(ADDR_B, 1)), word(2));
}

// ── Test: contexts can run on a worker thread ──

#[test]
fn test_context_runs_on_worker_thread() {
    let (log, observer) = recording_observer();
    let mut ctx = ExecutionContext::new(seeded_db(&[(ADDR_A, 1, 3)]), CacheConfig::default());
    ctx.add_observer(observer);

    let db = std::thread::spawn(move || {
        let current = ctx.sload(&ADDR_A, &slot(1)).unwrap();
        ctx.sstore(&ADDR_A, &slot(1), word(word_to_u64(&current).unwrap() + 1)).unwrap();
        let (_, db) = ctx.commit().unwrap();
        db
    })
    .join()
    .unwrap();

    assert_eq!(db.storage(&id(ADDR_A, 1)), word(4));
    assert_eq!(*log.lock().unwrap(), vec![(id(ADDR_A, 1), word(4))]);
}

// ── Test: independent contexts do not share state ──

#[test]
fn test_contexts_are_independent() {
    let mut db_one = MemDatabase::new();
    let mut db_two = MemDatabase::new();

    let mut first = context(&mut db_one);
    let mut second = context(&mut db_two);
    first.sstore(&ADDR_A, &slot(1), word(1)).unwrap();

    assert_eq!(second.sload(&ADDR_A, &slot(1)).unwrap(), ZERO_WORD);
    assert!(second.cache().entry(&id(ADDR_A, 1)).unwrap().persisted_value().is_some());

    first.commit().unwrap();
    second.commit().unwrap();
    assert_eq!(db_one.storage(&id(ADDR_A, 1)), word(1));
    assert!(db_two.writes().is_empty());
}

// ── Test: zero-on-miss contexts ──

#[test]
fn test_zero_on_miss_context() {
    let mut db = seeded_db(&[(ADDR_A, 1, 50)]);
    let mut ctx = ExecutionContext::new(&mut db, CacheConfig::zero_on_miss());
    assert_eq!(ctx.sload(&ADDR_A, &slot(1)).unwrap(), ZERO_WORD);
    ctx.commit().unwrap();
    assert_eq!(db.read_count(), 0);
}

// ── Test: observers registered through the context ──

#[test]
fn test_context_observer() {
    let mut db = MemDatabase::new();
    let (log, observer) = recording_observer();

    let mut ctx = context(&mut db);
    ctx.add_observer(observer);
    ctx.sstore(&ADDR_B, &slot(4), word(40)).unwrap();
    ctx.commit().unwrap();

    assert_eq!(*log.lock().unwrap(), vec![(id(ADDR_B, 4), word(40))]);
}
