//! Integration tests for mincopy
//!
//! These tests drive the real engine against the local disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mincopy_config::{SettingsLoader, SyncConfigBuilder};
use mincopy_sync::{ActivityReporter, CacheLimits, EventRouter, LocalFileSystem, SyncEngine};
use mincopy_tests::test_utils::SyncFixture;
use mincopy_types::{SyncOutcome, WatchEvent};
use proptest::prelude::*;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_add_change_remove_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    fixture.write_source("a.txt", "hello")?;
    fixture.write_source("b.txt", "world")?;
    let mut engine = SyncEngine::new(Arc::new(fixture.config()));

    engine.upsert(Path::new("a.txt")).await?;
    engine.upsert(Path::new("b.txt")).await?;

    assert_eq!(fixture.dest_contents("a.txt").as_deref(), Some(&b"hello"[..]));
    assert_eq!(fixture.dest_contents("b.txt").as_deref(), Some(&b"world"[..]));
    assert_eq!(engine.counters().snapshot().writes, 2);

    fixture.write_source("a.txt", "hello!")?;
    engine.upsert(Path::new("a.txt")).await?;

    assert_eq!(fixture.dest_contents("a.txt").as_deref(), Some(&b"hello!"[..]));
    assert_eq!(fixture.dest_contents("b.txt").as_deref(), Some(&b"world"[..]));
    assert_eq!(engine.counters().snapshot().writes, 3);

    fixture.remove_source("b.txt")?;
    engine.remove(Path::new("b.txt")).await?;

    assert!(fixture.dest_contents("b.txt").is_none());
    assert_eq!(engine.counters().snapshot().deletes, 1);

    Ok(())
}

#[tokio::test]
async fn test_identical_destination_is_not_rewritten() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    fixture.write_source("same.txt", "unchanged")?;
    fixture.write_dest("same.txt", "unchanged")?;
    let before = fs::metadata(fixture.dest.join("same.txt"))?.modified()?;
    let mut engine = SyncEngine::new(Arc::new(fixture.config()));

    let outcome = engine.upsert(Path::new("same.txt")).await?;

    assert_eq!(outcome, SyncOutcome::Unchanged);
    assert_eq!(fs::metadata(fixture.dest.join("same.txt"))?.modified()?, before);
    assert!(engine.counters().snapshot().is_idle());

    Ok(())
}

#[tokio::test]
async fn test_nested_directories_are_created() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    fixture.write_source("deep/er/still/file.bin", [0u8, 159, 146, 150])?;
    let mut engine = SyncEngine::new(Arc::new(fixture.config()));

    let outcome = engine.upsert(Path::new("deep/er/still/file.bin")).await?;

    assert_eq!(outcome, SyncOutcome::Written);
    assert_eq!(
        fixture.dest_contents("deep/er/still/file.bin"),
        Some(vec![0u8, 159, 146, 150])
    );

    Ok(())
}

#[tokio::test]
async fn test_destination_deleted_externally_is_restored() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    fixture.write_source("a.txt", "hello")?;
    let mut engine = SyncEngine::new(Arc::new(fixture.config()));
    engine.upsert(Path::new("a.txt")).await?;

    // Cache still holds "hello" but the file is gone
    fs::remove_file(fixture.dest.join("a.txt"))?;
    let outcome = engine.upsert(Path::new("a.txt")).await?;

    assert_eq!(outcome, SyncOutcome::Written);
    assert_eq!(fixture.dest_contents("a.txt").as_deref(), Some(&b"hello"[..]));

    Ok(())
}

#[tokio::test]
async fn test_remove_missing_destination_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    let mut engine = SyncEngine::new(Arc::new(fixture.config()));

    let outcome = engine.remove(Path::new("never-there.txt")).await?;

    assert_eq!(outcome, SyncOutcome::AlreadyAbsent);
    assert!(engine.counters().snapshot().is_idle());

    Ok(())
}

#[tokio::test]
async fn test_router_keeps_going_after_failures() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    fixture.write_source("one.txt", "1")?;
    fixture.write_source("two.txt", "2")?;
    let engine = SyncEngine::new(Arc::new(fixture.config()));
    let counters = engine.counters();
    let reporter = ActivityReporter::new(counters.clone(), Duration::from_secs(5));
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(WatchEvent::add("one.txt"))?;
    tx.send(WatchEvent::change("vanished.txt"))?;
    tx.send(WatchEvent::add("../escape.txt"))?;
    tx.send(WatchEvent::add("two.txt"))?;
    tx.send(WatchEvent::unlink("one.txt"))?;
    drop(tx);

    let router = EventRouter::new(engine).run(rx).await;

    assert_eq!(router.stats().dispatched, 5);
    assert_eq!(router.stats().failed, 2);
    assert!(fixture.dest_contents("one.txt").is_none());
    assert_eq!(fixture.dest_contents("two.txt").as_deref(), Some(&b"2"[..]));
    assert!(!fixture.temp_dir.path().join("escape.txt").exists());

    let summary = reporter.report_once().ok_or("expected activity")?;
    assert_eq!(summary.to_string(), "2 files written, 1 files unlinked");
    assert!(counters.snapshot().is_idle());

    Ok(())
}

#[tokio::test]
async fn test_configured_run_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    fs::write(
        fixture.temp_dir.path().join("mincopy.toml"),
        "[cache]\nmax_entries = 2\n",
    )?;
    fixture.write_source("x.txt", "x")?;

    let settings = SettingsLoader::load_default_in(fixture.temp_dir.path())?;
    let config = SyncConfigBuilder::new("src", "dst")
        .cwd(fixture.temp_dir.path())
        .globs(Some(r#"["**/*.txt"]"#))
        .build()?;
    assert_eq!(config.source_root, fixture.source);

    let mut engine = SyncEngine::with_file_system(
        Arc::new(config),
        Arc::new(LocalFileSystem::new()),
        CacheLimits::new(settings.cache.max_entries, settings.cache.ttl()),
    );
    engine.upsert(Path::new("x.txt")).await?;

    assert_eq!(engine.reader().cache().limits().max_entries, 2);
    assert_eq!(fixture.dest_contents("x.txt").as_deref(), Some(&b"x"[..]));

    Ok(())
}

#[tokio::test]
async fn test_cache_stays_within_capacity() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = SyncFixture::new()?;
    let mut engine = SyncEngine::with_file_system(
        Arc::new(fixture.config()),
        Arc::new(LocalFileSystem::new()),
        CacheLimits::new(3, Duration::from_secs(60)),
    );

    for i in 0..10 {
        let name = format!("f{}.txt", i);
        fixture.write_source(&name, format!("content {}", i))?;
        engine.upsert(Path::new(&name)).await?;
    }

    assert_eq!(engine.reader().cache().len(), 3);
    assert_eq!(engine.counters().snapshot().writes, 10);

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_upsert_mirrors_bytes_and_is_idempotent(
        first in proptest::collection::vec(any::<u8>(), 0..512),
        second in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let fixture = SyncFixture::new().unwrap();
            let mut engine = SyncEngine::new(Arc::new(fixture.config()));
            let file = Path::new("data.bin");

            fixture.write_source("data.bin", &first).unwrap();
            prop_assert_eq!(engine.upsert(file).await.unwrap(), SyncOutcome::Written);
            prop_assert_eq!(engine.upsert(file).await.unwrap(), SyncOutcome::Unchanged);

            fixture.write_source("data.bin", &second).unwrap();
            let expected = if first == second {
                SyncOutcome::Unchanged
            } else {
                SyncOutcome::Written
            };
            prop_assert_eq!(engine.upsert(file).await.unwrap(), expected);
            prop_assert_eq!(fixture.dest_contents("data.bin"), Some(second.clone()));
            Ok(())
        })?;
    }
}
