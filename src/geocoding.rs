use crate::aoi::Point;
use crate::Result;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const RESULT_LIMIT: usize = 5;
pub const QUIET_INTERVAL: Duration = Duration::from_millis(300);

/// One candidate place match. Nominatim returns coordinates as strings.
#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct SearchResult {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl SearchResult {
    /// Parsed (lng, lat) for recentering the map view.
    pub fn coords(&self) -> Option<Point> {
        Some([self.lon.parse().ok()?, self.lat.parse().ok()?])
    }
}

pub trait SearchBackend: Send + Sync + 'static {
    fn search(&self, query: &str) -> BoxFuture<'static, Vec<SearchResult>>;
}

/// Read-only client for a Nominatim-style place lookup service. It never
/// touches the AOI store.
#[derive(Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        GeocodingClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Looks up up to [`RESULT_LIMIT`] candidates for the query. Network and
    /// decode failures are swallowed, a failed lookup just yields no results.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.request(query).await {
            Ok(results) => {
                debug!(query, count = results.len(), "Geocoding lookup finished");
                results
            }
            Err(e) => {
                warn!(query, error = e.to_string(), "Geocoding lookup failed");
                Vec::new()
            }
        }
    }

    async fn request(&self, query: &str) -> Result<Vec<SearchResult>> {
        let limit = RESULT_LIMIT.to_string();
        Ok(self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBackend for GeocodingClient {
    fn search(&self, query: &str) -> BoxFuture<'static, Vec<SearchResult>> {
        let this = self.clone();
        let query = query.to_string();
        Box::pin(async move { this.search(&query).await })
    }
}

/// Debounces search queries with a fixed quiet interval.
///
/// Each submission bumps a generation counter. A task only runs its lookup
/// if its generation is still current once the quiet interval has passed,
/// and only publishes into the results holder if it is still current after
/// the lookup returns. Late responses from superseded queries are dropped,
/// so the holder always reflects the latest submitted query.
pub struct SearchDebouncer {
    backend: Arc<dyn SearchBackend>,
    quiet_interval: Duration,
    generation: Arc<AtomicU64>,
    results: Arc<Mutex<Vec<SearchResult>>>,
}

impl SearchDebouncer {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self::with_quiet_interval(backend, QUIET_INTERVAL)
    }

    pub fn with_quiet_interval(backend: Arc<dyn SearchBackend>, quiet_interval: Duration) -> Self {
        SearchDebouncer {
            backend,
            quiet_interval,
            generation: Arc::new(AtomicU64::new(0)),
            results: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Schedules a lookup for the query after the quiet interval. Must be
    /// called from within a tokio runtime.
    pub fn submit(&self, query: impl Into<String>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let backend = self.backend.clone();
        let current = self.generation.clone();
        let results = self.results.clone();
        let quiet_interval = self.quiet_interval;
        let query = query.into();
        tokio::spawn(async move {
            sleep(quiet_interval).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            let response = backend.search(&query).await;
            // A newer query may have landed while this one was in flight
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            *results.lock().unwrap() = response;
        });
    }

    pub fn results(&self) -> Vec<SearchResult> {
        self.results.lock().unwrap().clone()
    }
}
