//! Integration tests for the TTL cache facade
//!
//! Exercises the public surface end to end: timed expiration with and
//! without reset-on-access, background sweep reclamation, runtime
//! reconfiguration and teardown.

use std::time::Duration;

use tokio::time::sleep;

use ttl_memcache::{CacheConfig, TtlCache};

/// Initializes tracing for test output. Safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_memcache=debug".into()),
        )
        .try_init();
}

fn one_second_cache(reset_on_access: bool) -> TtlCache<String> {
    TtlCache::new(CacheConfig {
        ttl: 1,
        is_reset_on_access: reset_on_access,
        check_interval: 60,
        sweep_chunk_size: 128,
    })
    .unwrap()
}

#[tokio::test]
async fn test_set_then_get_roundtrip() {
    init_tracing();
    let cache = one_second_cache(true);

    cache.set("key1", "value1".to_string()).await.unwrap();
    cache.set("key2", "value2".to_string()).await.unwrap();

    assert_eq!(cache.get("key1").await, Some("value1".to_string()));
    assert_eq!(cache.get("key2").await, Some("value2".to_string()));
    assert_eq!(cache.size().await, 2);

    cache.destroy();
}

#[tokio::test]
async fn test_reset_on_access_extends_lifetime() {
    init_tracing();
    // ttl=1, reset on access: a read at 0.5s restarts the window
    let cache = one_second_cache(true);

    cache.set("k", "v".to_string()).await.unwrap();

    sleep(Duration::from_millis(500)).await;
    assert_eq!(cache.get("k").await, Some("v".to_string()));

    // 1.1s past the resetting read: the extended window has elapsed
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(cache.get("k").await, None);

    cache.destroy();
}

#[tokio::test]
async fn test_reset_on_access_survives_repeated_reads() {
    init_tracing();
    let cache = one_second_cache(true);

    cache.set("k", "v".to_string()).await.unwrap();

    // Reads at intervals shorter than the TTL keep the key alive
    for _ in 0..4 {
        sleep(Duration::from_millis(400)).await;
        assert_eq!(cache.get("k").await, Some("v".to_string()));
    }

    cache.destroy();
}

#[tokio::test]
async fn test_no_reset_expires_despite_midway_read() {
    init_tracing();
    // ttl=1, no reset on access: the window is fixed at set time
    let cache = one_second_cache(false);

    cache.set("k", "v".to_string()).await.unwrap();

    sleep(Duration::from_millis(500)).await;
    assert_eq!(cache.get("k").await, Some("v".to_string()));

    // 1.1s total since set: expired even though it was read midway
    sleep(Duration::from_millis(600)).await;
    assert_eq!(cache.get("k").await, None);

    cache.destroy();
}

#[tokio::test]
async fn test_per_key_ttl_overrides_default() {
    init_tracing();
    let cache = one_second_cache(false);

    cache.set("short", "v1".to_string()).await.unwrap();
    cache
        .set_with("long", "v2".to_string(), Some(5), None)
        .await
        .unwrap();

    sleep(Duration::from_millis(1100)).await;

    assert_eq!(cache.get("short").await, None);
    assert_eq!(cache.get("long").await, Some("v2".to_string()));

    cache.destroy();
}

#[tokio::test]
async fn test_delete_then_set_reuses_container() {
    init_tracing();
    let cache = one_second_cache(true);

    cache.set("k", "v".to_string()).await.unwrap();
    assert!(cache.delete("k").await);
    assert_eq!(cache.get("k").await, None);
    assert_eq!(cache.pool_free_count().await, 1);

    // The next insert recycles the retired container
    cache.set("other", "v2".to_string()).await.unwrap();
    assert_eq!(cache.pool_free_count().await, 0);
    assert_eq!(cache.get("other").await, Some("v2".to_string()));

    cache.destroy();
}

#[tokio::test]
async fn test_clear_empties_cache() {
    init_tracing();
    let cache = one_second_cache(true);

    for i in 0..5 {
        cache
            .set(&format!("key{}", i), format!("value{}", i))
            .await
            .unwrap();
    }
    assert_eq!(cache.size().await, 5);

    cache.clear().await;

    assert_eq!(cache.size().await, 0);
    for i in 0..5 {
        assert_eq!(cache.get(&format!("key{}", i)).await, None);
    }
    assert_eq!(cache.pool_free_count().await, 5);

    cache.destroy();
}

#[tokio::test]
async fn test_sweep_reclaims_unread_entries() {
    init_tracing();
    // Short sweep interval; entries expire and are never read again
    let cache = TtlCache::new(CacheConfig {
        ttl: 1,
        is_reset_on_access: false,
        check_interval: 1,
        sweep_chunk_size: 8,
    })
    .unwrap();

    for i in 0..20 {
        cache
            .set(&format!("key{}", i), "value".to_string())
            .await
            .unwrap();
    }

    // Within roughly one sweep interval past expiry, every container has
    // been physically reclaimed with zero get calls
    sleep(Duration::from_millis(2500)).await;

    assert_eq!(cache.size().await, 0);
    assert_eq!(cache.pool_free_count().await, 20);

    cache.destroy();
}

#[tokio::test]
async fn test_check_interval_reconfiguration() {
    init_tracing();
    let cache = TtlCache::new(CacheConfig {
        ttl: 1,
        is_reset_on_access: false,
        check_interval: 3600,
        sweep_chunk_size: 128,
    })
    .unwrap();

    cache.set("k", "v".to_string()).await.unwrap();

    // With the one-hour interval no pass would run during this test; the
    // new interval must take effect for the next scheduling decision
    cache.set_check_interval(1).unwrap();
    assert_eq!(cache.check_interval(), 1);

    sleep(Duration::from_millis(2500)).await;

    assert_eq!(cache.size().await, 0);
    assert_eq!(cache.pool_free_count().await, 1);

    cache.destroy();
}

#[tokio::test]
async fn test_destroy_stops_sweeping() {
    init_tracing();
    let cache = TtlCache::new(CacheConfig {
        ttl: 1,
        is_reset_on_access: false,
        check_interval: 1,
        sweep_chunk_size: 128,
    })
    .unwrap();

    cache.set("k", "v".to_string()).await.unwrap();
    cache.destroy();
    // Idempotent
    cache.destroy();

    // With the sweeper stopped, the expired entry is never reclaimed: the
    // pool stays empty long after a pass would have run
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(cache.pool_free_count().await, 0);
}

#[tokio::test]
async fn test_stats_snapshot() {
    init_tracing();
    let cache = one_second_cache(true);

    cache.set("k", "v".to_string()).await.unwrap();
    cache.get("k").await;
    cache.get("missing").await;

    let stats = cache.stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.live_entries, 1);
    assert_eq!(stats.hit_rate(), 0.5);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["hits"], 1);

    cache.destroy();
}
