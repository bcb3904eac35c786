//! Tests for query result caching.

use lodge_cache::{
    Freshness, QueryCache, QueryCacheConfig, QueryCacheConfigBuilder, QueryKey, Resource,
};
use serde_json::json;
use std::thread::sleep;
use std::time::Duration;

fn blocks_key(slug: &str) -> QueryKey {
    QueryKey::scoped(Resource::PublishedBlocks, slug)
}

#[test]
fn test_cache_insert_and_get() {
    let mut cache = QueryCache::new(QueryCacheConfig::default());
    let value = json!([{"id": 1}, {"id": 2}]);

    cache.insert(blocks_key("home"), value.clone());

    let entry = cache.get(&blocks_key("home"), Freshness::Public).unwrap();
    assert_eq!(entry.value(), &value);
}

#[test]
fn test_cache_miss() {
    let mut cache = QueryCache::default();
    assert!(cache.get(&blocks_key("home"), Freshness::Public).is_none());
    assert_eq!(cache.stats().misses, 1);
}

#[test]
fn test_keys_are_scoped() {
    let mut cache = QueryCache::default();
    cache.insert(blocks_key("home"), json!("home"));
    cache.insert(blocks_key("suites"), json!("suites"));
    cache.insert(QueryKey::scoped(Resource::PageContent, "home"), json!("page"));

    assert_eq!(cache.get(&blocks_key("home"), Freshness::Public).unwrap().value(), &json!("home"));
    assert_eq!(
        cache.get(&blocks_key("suites"), Freshness::Public).unwrap().value(),
        &json!("suites")
    );
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_admin_reads_use_shorter_window() {
    let config = QueryCacheConfigBuilder::default()
        .public_ttl_secs(60)
        .admin_ttl_secs(1)
        .build()
        .unwrap();
    let mut cache = QueryCache::new(config);
    cache.insert(blocks_key("home"), json!([]));

    assert!(cache.get(&blocks_key("home"), Freshness::Admin).is_some());

    sleep(Duration::from_millis(1100));

    // Too stale for the editor, still fine for visitors.
    assert!(cache.get(&blocks_key("home"), Freshness::Admin).is_none());
    assert!(cache.get(&blocks_key("home"), Freshness::Public).is_some());
}

#[test]
fn test_cache_expiration() {
    let config = QueryCacheConfig::default().with_public_ttl_secs(1);
    let mut cache = QueryCache::new(config);
    cache.insert(blocks_key("home"), json!([]));

    assert!(cache.get(&blocks_key("home"), Freshness::Public).is_some());

    sleep(Duration::from_millis(1100));

    assert!(cache.get(&blocks_key("home"), Freshness::Public).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_invalidate_scope_spans_resources() {
    let mut cache = QueryCache::default();
    cache.insert(blocks_key("home"), json!([]));
    cache.insert(QueryKey::scoped(Resource::PageContent, "home"), json!({}));
    cache.insert(blocks_key("contact"), json!([]));
    cache.insert(QueryKey::global(Resource::Pages), json!([]));

    assert_eq!(cache.invalidate_scope("home"), 2);
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&blocks_key("contact"), Freshness::Public).is_some());
}

#[test]
fn test_invalidate_resource() {
    let mut cache = QueryCache::default();
    cache.insert(QueryKey::scoped(Resource::Testimonials, "featured"), json!([]));
    cache.insert(QueryKey::scoped(Resource::Testimonials, "all"), json!([]));
    cache.insert(QueryKey::global(Resource::Suites), json!([]));

    assert_eq!(cache.invalidate_resource(Resource::Testimonials), 2);
    assert!(cache.invalidate(&QueryKey::global(Resource::Suites)));
    assert!(cache.is_empty());
}

#[test]
fn test_lru_eviction() {
    let config = QueryCacheConfig::default().with_max_size(2);
    let mut cache = QueryCache::new(config);

    cache.insert(blocks_key("a"), json!(1));
    cache.insert(blocks_key("b"), json!(2));

    // Touch "a" so "b" becomes least recently used.
    assert!(cache.get(&blocks_key("a"), Freshness::Public).is_some());

    cache.insert(blocks_key("c"), json!(3));

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&blocks_key("b"), Freshness::Public).is_none());
    assert!(cache.get(&blocks_key("a"), Freshness::Public).is_some());
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn test_disabled_cache() {
    let config = QueryCacheConfig::default().with_enabled(false);
    let mut cache = QueryCache::new(config);

    cache.insert(blocks_key("home"), json!([]));
    assert!(cache.is_empty());
    assert!(cache.get(&blocks_key("home"), Freshness::Public).is_none());
}

#[test]
fn test_cleanup_expired() {
    let config = QueryCacheConfig::default().with_public_ttl_secs(1);
    let mut cache = QueryCache::new(config);
    cache.insert(blocks_key("a"), json!(1));
    cache.insert(blocks_key("b"), json!(2));

    sleep(Duration::from_millis(1100));
    cache.insert(blocks_key("c"), json!(3));

    assert_eq!(cache.cleanup_expired(), 2);
    assert_eq!(cache.len(), 1);
}
