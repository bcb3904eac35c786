//! Cached content queries.

use lodge_cache::{CacheStats, Freshness, QueryCache, QueryCacheConfig, QueryKey, Resource};
use lodge_core::{Block, Media, Page, PageWithBlocks, RenderedPage, SuiteWithMedia, Testimonial};
use lodge_error::{JsonError, LodgeResult};
use lodge_interface::ContentStore;
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

type FlightGate = Arc<tokio::sync::Mutex<()>>;

/// Read side of the content layer.
///
/// Every query goes through the injected [`QueryCache`] under a
/// [`QueryKey`] derived from the resource and slug. Concurrent misses on the
/// same key are coalesced: one caller fetches, the others wait and read the
/// cached result.
///
/// Missing pages are not errors. [`ContentService::page_content`] returns a
/// placeholder page and [`ContentService::published_blocks`] returns an
/// empty list.
///
/// A fetch that overlaps an invalidation returns its result to the caller
/// but does not cache it.
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    cache: Mutex<QueryCache>,
    in_flight: Mutex<HashMap<QueryKey, FlightGate>>,
    generation: AtomicU64,
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("cached", &self.cache.lock().len())
            .field("in_flight", &self.in_flight.lock().len())
            .finish()
    }
}

impl ContentService {
    /// Create a service over a store with a fresh cache.
    pub fn new(store: Arc<dyn ContentStore>, config: QueryCacheConfig) -> Self {
        Self::with_cache(store, QueryCache::new(config))
    }

    /// Create a service over a store with an existing cache.
    pub fn with_cache(store: Arc<dyn ContentStore>, cache: QueryCache) -> Self {
        Self {
            store,
            cache: Mutex::new(cache),
            in_flight: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    /// All pages ordered by priority.
    #[instrument(skip(self))]
    pub async fn pages(&self) -> LodgeResult<Vec<Page>> {
        self.cached(QueryKey::global(Resource::Pages), Freshness::Public, || {
            self.store.list_pages()
        })
        .await
    }

    /// A page with all of its blocks, or a placeholder when the slug is unknown.
    #[instrument(skip(self))]
    pub async fn page_content(&self, slug: &str) -> LodgeResult<PageWithBlocks> {
        self.page_content_with(slug, Freshness::Public).await
    }

    /// [`ContentService::page_content`] with the short admin staleness window.
    #[instrument(skip(self))]
    pub async fn admin_page(&self, slug: &str) -> LodgeResult<PageWithBlocks> {
        self.page_content_with(slug, Freshness::Admin).await
    }

    async fn page_content_with(
        &self,
        slug: &str,
        freshness: Freshness,
    ) -> LodgeResult<PageWithBlocks> {
        let key = QueryKey::scoped(Resource::PageContent, slug);
        self.cached(key, freshness, || async {
            match self.load_page(slug).await? {
                Some(page) => Ok(page),
                None => {
                    debug!(slug, "Page not found, using placeholder");
                    Ok(PageWithBlocks::placeholder(slug))
                }
            }
        })
        .await
    }

    /// Published blocks of a page, ascending by position.
    ///
    /// An unknown slug yields an empty list.
    #[instrument(skip(self))]
    pub async fn published_blocks(&self, slug: &str) -> LodgeResult<Vec<Block>> {
        let key = QueryKey::scoped(Resource::PublishedBlocks, slug);
        self.cached(key, Freshness::Public, || async {
            Ok(self
                .load_page(slug)
                .await?
                .map(|page| page.published_blocks())
                .unwrap_or_default())
        })
        .await
    }

    /// The published content of a page decoded into typed blocks.
    #[instrument(skip(self))]
    pub async fn rendered_page(&self, slug: &str) -> LodgeResult<RenderedPage> {
        let page = self.page_content(slug).await?;
        Ok(RenderedPage::from_page(&page))
    }

    /// Suites by price with their media resolved.
    #[instrument(skip(self))]
    pub async fn suites(&self) -> LodgeResult<Vec<SuiteWithMedia>> {
        self.cached(QueryKey::global(Resource::Suites), Freshness::Public, || async {
            let suites = self.store.list_suites().await?;
            let mut ids: Vec<Uuid> = suites.iter().flat_map(|s| s.images.clone()).collect();
            ids.sort();
            ids.dedup();
            let media = self.store.media_by_ids(&ids).await?;
            Ok(suites
                .into_iter()
                .map(|suite| SuiteWithMedia::resolve(suite, &media))
                .collect())
        })
        .await
    }

    /// Testimonials, optionally only the featured ones.
    ///
    /// Rows with a rating outside 1..=5 are dropped.
    #[instrument(skip(self))]
    pub async fn testimonials(&self, featured_only: bool) -> LodgeResult<Vec<Testimonial>> {
        let scope = if featured_only { "featured" } else { "all" };
        let key = QueryKey::scoped(Resource::Testimonials, scope);
        self.cached(key, Freshness::Public, || async {
            let rows = self.store.list_testimonials(featured_only).await?;
            Ok(rows
                .into_iter()
                .filter(|t| {
                    let valid = t.has_valid_rating();
                    if !valid {
                        warn!(testimonial_id = %t.id, rating = t.rating, "Dropping testimonial with invalid rating");
                    }
                    valid
                })
                .collect())
        })
        .await
    }

    /// The media library, newest first.
    #[instrument(skip(self))]
    pub async fn media(&self) -> LodgeResult<Vec<Media>> {
        self.cached(QueryKey::global(Resource::Media), Freshness::Public, || {
            self.store.list_media()
        })
        .await
    }

    /// Drop every cached result for a slug.
    pub fn invalidate_page(&self, slug: &str) -> usize {
        self.bump_generation();
        self.cache.lock().invalidate_scope(slug)
    }

    /// Drop cached results for the page with this id.
    ///
    /// Falls back to dropping every page-scoped entry when the id is not in
    /// the page list or the page list cannot be read. Never fails, so a
    /// committed write is never reported as an error.
    pub async fn invalidate_page_id(&self, page_id: Uuid) -> usize {
        let slug = match self.pages().await {
            Ok(pages) => pages.into_iter().find(|p| p.id == page_id).map(|p| p.slug),
            Err(e) => {
                warn!(%page_id, error = %e, "Page list unavailable, dropping every cached page");
                None
            }
        };

        let removed = match slug {
            Some(slug) => self.invalidate_page(&slug),
            None => {
                self.bump_generation();
                let mut cache = self.cache.lock();
                cache.invalidate_resource(Resource::PageContent)
                    + cache.invalidate_resource(Resource::PublishedBlocks)
            }
        };
        debug!(%page_id, removed, "Invalidated page");
        removed
    }

    /// Drop every cached result.
    pub fn invalidate_all(&self) {
        self.bump_generation();
        self.cache.lock().clear();
    }

    fn bump_generation(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Remove cache entries past the public staleness window.
    pub fn cleanup_cache(&self) -> usize {
        self.cache.lock().cleanup_expired()
    }

    async fn load_page(&self, slug: &str) -> LodgeResult<Option<PageWithBlocks>> {
        let Some(page) = self.store.page_by_slug(slug).await? else {
            return Ok(None);
        };
        let id = page.id;
        Ok(Some(
            self.store
                .page_with_blocks(id)
                .await?
                .unwrap_or_else(|| PageWithBlocks::new(page, Vec::new())),
        ))
    }

    fn lookup<T: DeserializeOwned>(&self, key: &QueryKey, freshness: Freshness) -> Option<T> {
        let mut cache = self.cache.lock();
        let value = cache.get(key, freshness)?.value().clone();
        match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                cache.invalidate(key);
                None
            }
        }
    }

    fn remember<T: Serialize>(&self, key: QueryKey, data: &T) -> LodgeResult<()> {
        let value = serde_json::to_value(data).map_err(|e| JsonError::new(e.to_string()))?;
        self.cache.lock().insert(key, value);
        Ok(())
    }

    fn gate(&self, key: &QueryKey) -> FlightGate {
        self.in_flight
            .lock()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    fn release(&self, key: &QueryKey, gate: &FlightGate) {
        let mut in_flight = self.in_flight.lock();
        if in_flight.get(key).is_some_and(|g| Arc::ptr_eq(g, gate)) {
            in_flight.remove(key);
        }
    }

    async fn cached<T, F, Fut>(&self, key: QueryKey, freshness: Freshness, fetch: F) -> LodgeResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = LodgeResult<T>>,
    {
        if let Some(data) = self.lookup(&key, freshness) {
            return Ok(data);
        }

        let gate = self.gate(&key);
        let _flight = gate.lock().await;

        // Another caller may have filled the entry while we waited.
        if let Some(data) = self.lookup(&key, freshness) {
            debug!(key = %key, "Served coalesced result");
            return Ok(data);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let result = fetch().await;
        let remembered = match &result {
            Ok(_) if self.generation.load(Ordering::SeqCst) != generation => {
                debug!(key = %key, "Cache invalidated during fetch, not caching result");
                Ok(())
            }
            Ok(data) => self.remember(key.clone(), data),
            Err(e) => {
                warn!(key = %key, error = %e, "Content query failed");
                Ok(())
            }
        };
        self.release(&key, &gate);
        remembered?;
        result
    }
}
