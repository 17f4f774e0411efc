use crate::agent::{UserAgent, agent_for_request, random_user_agent};
use crate::cache::ResponseCache;
use crate::error::{Result, ScanError};
use crate::links::{extract_feed_links, extract_html_links};
use crate::result::{DiscoveredLink, FetchedResponse};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};
use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

pub type RequestCallback = Arc<dyn Fn(&str) + Send + Sync>;
pub type LinkCallback = Arc<dyn Fn(&Crawler, DiscoveredLink) + Send + Sync>;
pub type ResponseCallback = Arc<dyn Fn(&FetchedResponse) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&str, &ScanError) + Send + Sync>;

/// Fetch policy. Everything the engine enforces on its own.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of fetches in flight.
    pub parallelism: usize,
    /// Minimum gap between two requests to the same host.
    pub delay: Duration,
    /// Hosts the delay applies to, e.g. `*example.com`. `None` means every host.
    pub domain_glob: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub timeout: Duration,
    pub proxy: Option<String>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    pub user_agent: UserAgent,
    pub headers: Vec<(String, String)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallelism: 20,
            delay: Duration::from_secs(0),
            domain_glob: None,
            cache_dir: None,
            timeout: Duration::from_secs(10),
            proxy: None,
            insecure: false,
            user_agent: UserAgent::default(),
            headers: Vec::new(),
        }
    }
}

pub struct CrawlerBuilder {
    config: EngineConfig,
    request_callback: Option<RequestCallback>,
    link_callback: Option<LinkCallback>,
    response_callback: Option<ResponseCallback>,
    error_callback: Option<ErrorCallback>,
}

impl CrawlerBuilder {
    pub fn with_request_callback(mut self, callback: RequestCallback) -> Self {
        self.request_callback = Some(callback);
        self
    }

    pub fn with_link_callback(mut self, callback: LinkCallback) -> Self {
        self.link_callback = Some(callback);
        self
    }

    pub fn with_response_callback(mut self, callback: ResponseCallback) -> Self {
        self.response_callback = Some(callback);
        self
    }

    pub fn with_error_callback(mut self, callback: ErrorCallback) -> Self {
        self.error_callback = Some(callback);
        self
    }

    pub fn build(self) -> Result<Crawler> {
        let config = self.config;

        let mut client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(config.insecure);

        if let Some(ref proxy) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| ScanError::InvalidProxy(format!("{}: {}", proxy, e)))?;
            client = client.proxy(proxy);
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|_| ScanError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value.trim())
                .map_err(|_| ScanError::InvalidHeader(format!("{}: {}", name, value)))?;
            headers.insert(header_name, header_value);
        }

        let cache = config.cache_dir.clone().map(ResponseCache::new);
        let permits = Semaphore::new(config.parallelism.max(1));

        Ok(Crawler {
            inner: Arc::new(Inner {
                client: client.build()?,
                headers,
                fixed_agent: random_user_agent(),
                cache,
                permits,
                visited: StdMutex::new(HashSet::new()),
                next_slot: StdMutex::new(HashMap::new()),
                pending: AtomicUsize::new(0),
                idle: Notify::new(),
                closed: AtomicBool::new(false),
                request_callback: self.request_callback,
                link_callback: self.link_callback,
                response_callback: self.response_callback,
                error_callback: self.error_callback,
                config,
            }),
        })
    }
}

struct Inner {
    client: Client,
    config: EngineConfig,
    headers: HeaderMap,
    fixed_agent: &'static str,
    cache: Option<ResponseCache>,
    permits: Semaphore,
    visited: StdMutex<HashSet<String>>,
    next_slot: StdMutex<HashMap<String, Instant>>,
    pending: AtomicUsize,
    idle: Notify,
    closed: AtomicBool,
    request_callback: Option<RequestCallback>,
    link_callback: Option<LinkCallback>,
    response_callback: Option<ResponseCallback>,
    error_callback: Option<ErrorCallback>,
}

/// Decrements the outstanding-work counter even if a callback panics.
struct PendingGuard(Arc<Inner>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.0.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Asynchronous fetch engine. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct Crawler {
    inner: Arc<Inner>,
}

impl Crawler {
    pub fn builder(config: EngineConfig) -> CrawlerBuilder {
        CrawlerBuilder {
            config,
            request_callback: None,
            link_callback: None,
            response_callback: None,
            error_callback: None,
        }
    }

    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Queues `url` for fetching. Must be called from within a tokio runtime.
    ///
    /// Returns `AlreadyVisited` for a URL seen before in this run and `Closed`
    /// once [`Crawler::close`] has been called. Fetch failures are reported
    /// later through the error callback.
    pub fn visit(&self, url: &str) -> Result<()> {
        if self.is_closed() {
            return Err(ScanError::Closed(url.to_string()));
        }

        let mut parsed =
            Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScanError::InvalidUrl(format!(
                "unsupported scheme in {}",
                url
            )));
        }
        parsed.set_fragment(None);
        let key = parsed.to_string();

        if !lock(&self.inner.visited).insert(key.clone()) {
            return Err(ScanError::AlreadyVisited(key));
        }

        self.inner.pending.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.clone();
        tokio::spawn(async move {
            let guard = PendingGuard(inner);
            Self::fetch_and_dispatch(&guard.0, key).await;
        });

        Ok(())
    }

    /// Stops admitting new URLs. Every fetch already admitted, running or
    /// still waiting for a permit, runs to completion.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            info!("Crawler closed, draining in-flight requests");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Resolves once every queued and in-flight fetch, including the ones they
    /// spawn, has completed.
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.inner.pending.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    pub fn visited_count(&self) -> usize {
        lock(&self.inner.visited).len()
    }

    async fn fetch_and_dispatch(inner: &Arc<Inner>, url: String) {
        let _permit = match inner.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => return,
        };

        Self::wait_for_slot(inner, &url).await;

        if let Some(ref callback) = inner.request_callback {
            callback(&url);
        }

        let response = match Self::fetch(inner, &url).await {
            Ok(response) => response,
            Err(e) => {
                Self::report_error(inner, &url, &e);
                return;
            }
        };

        // 2xx below 203 only, everything else is an error page
        if response.status_code >= 203 {
            let e = ScanError::HttpStatus {
                url: url.clone(),
                status: response.status_code,
            };
            Self::report_error(inner, &url, &e);
            return;
        }

        if response.url != url {
            debug!("{} redirected to {}", url, response.url);
            lock(&inner.visited).insert(response.url.clone());
        }

        if let Some(ref callback) = inner.response_callback {
            callback(&response);
        }

        let links = if response.is_html() {
            extract_html_links(&response.body, &response.url)
        } else if response.is_xml() {
            extract_feed_links(&response.body, &response.url)
        } else {
            Vec::new()
        };

        if let Some(ref callback) = inner.link_callback {
            debug!("{} links found on {}", links.len(), url);
            let crawler = Crawler {
                inner: inner.clone(),
            };
            for link in links {
                callback(&crawler, link);
            }
        }
    }

    async fn fetch(inner: &Inner, url: &str) -> Result<FetchedResponse> {
        if let Some(ref cache) = inner.cache
            && let Some(hit) = cache.load(url).await
        {
            debug!("Cache hit for {}", url);
            return Ok(hit);
        }

        debug!("Fetching {}", url);

        let agent = agent_for_request(&inner.config.user_agent, inner.fixed_agent);
        let start = Instant::now();
        let response = inner
            .client
            .get(url)
            .header(USER_AGENT, agent)
            .headers(inner.headers.clone())
            .send()
            .await?;
        let response_time = start.elapsed();
        let mut final_url = response.url().clone();
        final_url.set_fragment(None);

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let content_length = response.content_length();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let bytes = response.bytes().await?;

        let mut result = FetchedResponse::new(final_url.to_string());
        result.status_code = status_code;
        result.content_type = content_type;
        result.content_length = content_length.or(Some(bytes.len() as u64));
        result.headers = headers;
        result.body_bytes = bytes.len();
        result.body = String::from_utf8_lossy(&bytes).into_owned();
        result.response_time = response_time;

        if let Some(ref cache) = inner.cache
            && let Err(e) = cache.store(url, &result).await
        {
            debug!("Could not cache {}: {}", url, e);
        }

        Ok(result)
    }

    /// Enforces the per-host delay by reserving the next free slot for the host.
    async fn wait_for_slot(inner: &Inner, url: &str) {
        let delay = inner.config.delay;
        if delay.is_zero() {
            return;
        }

        let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
            Some(host) => host,
            None => return,
        };
        if let Some(ref glob) = inner.config.domain_glob
            && !glob_matches(glob, &host)
        {
            return;
        }

        let wait = {
            let mut slots = lock(&inner.next_slot);
            let now = Instant::now();
            let slot = slots
                .get(&host)
                .copied()
                .filter(|t| *t > now)
                .unwrap_or(now);
            slots.insert(host, slot + delay);
            slot - now
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    fn report_error(inner: &Inner, url: &str, error: &ScanError) {
        match inner.error_callback {
            Some(ref callback) => callback(url, error),
            None => debug!("Crawl error for {}: {}", url, error),
        }
    }
}

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Shell-style matching where `*` stands for any run of characters.
pub fn glob_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
