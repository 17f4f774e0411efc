use crate::data::ScanReport;
use crate::results::{Aggregator, CrawlResults};
use crate::scan::{ScanOptions, Scanner};
use crate::scope::{Admission, Target};
use crate::url::{UrlError, absolute_url};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, info, warn};
use trawl_scanner::{
    Crawler, DiscoveredLink, EngineConfig, FetchedResponse, ScanError, UserAgent,
};

pub const CACHE_DIR: &str = ".trawl_cache";

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("The URL provided is not built in a proper way: {input} ({source})")]
    InvalidTarget {
        input: String,
        #[source]
        source: UrlError,
    },

    #[error("Could not start the crawler: {0}")]
    Engine(#[from] ScanError),
}

/// Options for one crawl run against a single target.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub target: String,
    /// Follow every subdomain of the target's registrable domain.
    pub intensive: bool,
    pub ignore: Vec<String>,
    pub concurrency: usize,
    pub delay: Duration,
    pub timeout: Duration,
    pub cache: bool,
    pub cache_dir: PathBuf,
    pub proxy: Option<String>,
    pub insecure: bool,
    pub user_agent: UserAgent,
    pub headers: Vec<(String, String)>,
    pub scan: ScanOptions,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            target: String::new(),
            intensive: false,
            ignore: Vec::new(),
            concurrency: 20,
            delay: Duration::from_secs(0),
            timeout: Duration::from_secs(10),
            cache: false,
            cache_dir: PathBuf::from(CACHE_DIR),
            proxy: None,
            insecure: false,
            user_agent: UserAgent::default(),
            headers: Vec::new(),
            scan: ScanOptions::default(),
        }
    }
}

/// Called with every URL just before it is fetched
pub type CrawlRequestCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Called once per scanned response
pub type ResponseEventCallback = Arc<dyn Fn(ResponseEvent) + Send + Sync>;

/// One JSON-lines record.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEvent {
    pub url: String,
    pub method: String,
    pub status_code: u16,
    pub words: usize,
    pub lines: usize,
    pub content_type: Option<String>,
    pub content_length: usize,
    pub headers: Vec<(String, String)>,
    pub from_cache: bool,
    pub matches: ScanReport,
}

impl ResponseEvent {
    pub fn new(response: &FetchedResponse, matches: ScanReport) -> Self {
        Self {
            url: response.url.clone(),
            method: "GET".to_string(),
            status_code: response.status_code,
            words: response.body.split_whitespace().count(),
            lines: response.body.lines().count(),
            content_type: response.content_type.clone(),
            content_length: response.body_bytes,
            headers: response.headers.clone(),
            from_cache: response.from_cache,
            matches,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Running,
    /// No new links are admitted; in-flight fetches finish.
    Draining,
    /// The operator asked twice. The process should exit now.
    Forced,
}

impl CrawlState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => CrawlState::Running,
            1 => CrawlState::Draining,
            _ => CrawlState::Forced,
        }
    }
}

/// Two-stage stop request shared between the interrupt handler and a crawl.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    state: Arc<AtomicU8>,
    changed: Arc<Notify>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CrawlState {
        CrawlState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.state() == CrawlState::Running
    }

    /// Advances Running -> Draining -> Forced and returns the new state.
    pub fn interrupt(&self) -> CrawlState {
        let previous = self
            .state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| Some((s + 1).min(2)))
            .unwrap_or(2);
        self.changed.notify_waiters();
        CrawlState::from_u8((previous + 1).min(2))
    }

    /// Resolves once a stop has been requested.
    pub async fn stopped(&self) {
        loop {
            let notified = self.changed.notified();
            if !self.is_running() {
                return;
            }
            notified.await;
        }
    }

    /// Listens for Ctrl+C. The first press drains, the second exits with status 1.
    pub fn listen_for_interrupts(&self, announce: bool) -> tokio::task::JoinHandle<()> {
        let signal = self.clone();
        tokio::spawn(async move {
            loop {
                if tokio::signal::ctrl_c().await.is_err() {
                    warn!("Could not listen for interrupts");
                    return;
                }
                match signal.interrupt() {
                    CrawlState::Forced => std::process::exit(1),
                    _ => {
                        if announce {
                            eprintln!("\rCTRL+C pressed: Exiting");
                        }
                    }
                }
            }
        })
    }
}

fn engine_config(options: &CrawlOptions, target: &Target) -> EngineConfig {
    EngineConfig {
        parallelism: options.concurrency.max(1),
        delay: options.delay,
        domain_glob: Some(format!("*{}", target.host)),
        cache_dir: options.cache.then(|| options.cache_dir.clone()),
        timeout: options.timeout,
        proxy: options.proxy.clone(),
        insecure: options.insecure,
        user_agent: options.user_agent.clone(),
        headers: options.headers.clone(),
    }
}

/// Scope decision for one discovered link. Visits it when admitted.
fn follow_link(
    crawler: &Crawler,
    link: &DiscoveredLink,
    target: &Target,
    aggregator: &Aggregator,
    stop: &StopSignal,
) {
    let raw = link.raw.trim();
    if raw.is_empty() || raw.starts_with('#') || !stop.is_running() {
        return;
    }

    let Some(resolved) = link.absolute_url() else {
        debug!("Could not resolve {:?} against {}", raw, link.page_url);
        return;
    };
    if !resolved.starts_with("http://") && !resolved.starts_with("https://") {
        return;
    }
    let url = absolute_url(&target.protocol, &target.host, &resolved);

    match target.admits(&url) {
        Admission::Admitted => match crawler.visit(&url) {
            Ok(()) => aggregator.record_visit(url),
            Err(e) if e.is_already_visited() || e.is_closed() => {}
            Err(e) => debug!("{}", e),
        },
        Admission::Unresolvable(e) => debug!("{}: {}", e, url),
        Admission::Ignored | Admission::OutOfScope => {}
    }
}

/// Execute a crawl with the given options and return the deduplicated results.
///
/// The run stops admitting links once `stop` leaves the running state, and
/// returns when every queued and in-flight fetch has finished.
pub async fn execute_crawl(
    options: CrawlOptions,
    stop: StopSignal,
    request_callback: Option<CrawlRequestCallback>,
    response_callback: Option<ResponseEventCallback>,
) -> Result<CrawlResults, CrawlError> {
    let target = Target::resolve(&options.target, options.intensive, options.ignore.clone())
        .map_err(|source| CrawlError::InvalidTarget {
            input: options.target.clone(),
            source,
        })?;
    let target = Arc::new(target);

    info!(
        "Crawling {} (host {}, intensive: {})",
        target.root_url(),
        target.host,
        target.intensive
    );

    let scanner = Arc::new(Scanner::new(&options.scan));
    let aggregator = Arc::new(Aggregator::new());

    let mut builder = Crawler::builder(engine_config(&options, &target));

    if let Some(cb) = request_callback {
        builder = builder.with_request_callback(cb);
    }

    {
        let target = target.clone();
        let aggregator = aggregator.clone();
        let stop = stop.clone();
        builder = builder.with_link_callback(Arc::new(
            move |crawler: &Crawler, link: DiscoveredLink| {
                follow_link(crawler, &link, &target, &aggregator, &stop);
            },
        ));
    }

    {
        let scanner = scanner.clone();
        let aggregator = aggregator.clone();
        builder = builder.with_response_callback(Arc::new(move |response: &FetchedResponse| {
            let report = scanner.scan(&response.url, &response.body, response.body_bytes);
            if let Some(ref cb) = response_callback {
                cb(ResponseEvent::new(response, report.clone()));
            }
            aggregator.absorb(report);
        }));
    }

    builder = builder.with_error_callback(Arc::new(|url: &str, e: &ScanError| {
        debug!("{}: {}", url, e);
    }));

    let crawler = builder.build()?;

    for url in target.well_known_urls() {
        if let Err(e) = crawler.visit(&url)
            && !e.is_already_visited()
        {
            debug!("{}", e);
        }
    }

    let root = target.root_url();
    aggregator.record_visit(root.clone());
    if let Err(e) = crawler.visit(&root)
        && !e.is_already_visited()
    {
        debug!("{}", e);
    }

    let watcher = {
        let crawler = crawler.clone();
        let stop = stop.clone();
        tokio::spawn(async move {
            stop.stopped().await;
            crawler.close();
        })
    };

    crawler.wait().await;
    watcher.abort();

    let results = aggregator.finish();
    info!(
        "Finished {}: {} URLs, {} findings",
        target.root_url(),
        results.visited.len(),
        results.findings_count()
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_two_stages() {
        let stop = StopSignal::new();
        assert_eq!(stop.state(), CrawlState::Running);
        assert_eq!(stop.interrupt(), CrawlState::Draining);
        assert!(!stop.is_running());
        assert_eq!(stop.interrupt(), CrawlState::Forced);
        assert_eq!(stop.interrupt(), CrawlState::Forced);
    }

    #[tokio::test]
    async fn test_stopped_resolves_after_interrupt() {
        let stop = StopSignal::new();
        let waiter = {
            let stop = stop.clone();
            tokio::spawn(async move { stop.stopped().await })
        };
        tokio::task::yield_now().await;
        stop.interrupt();
        waiter.await.unwrap();
    }

    #[test]
    fn test_engine_config_from_options() {
        let options = CrawlOptions {
            target: "https://example.com/app".to_string(),
            cache: true,
            concurrency: 0,
            ..Default::default()
        };
        let target = Target::resolve(&options.target, false, vec![]).unwrap();
        let config = engine_config(&options, &target);
        assert_eq!(config.parallelism, 1);
        assert_eq!(config.domain_glob.as_deref(), Some("*example.com"));
        assert_eq!(config.cache_dir, Some(PathBuf::from(CACHE_DIR)));
    }

    #[test]
    fn test_response_event_counts() {
        let mut response = FetchedResponse::new("http://example.com/".to_string());
        response.status_code = 200;
        response.body = "one two\nthree".to_string();
        response.body_bytes = response.body.len();
        let event = ResponseEvent::new(&response, ScanReport::default());
        assert_eq!(event.words, 3);
        assert_eq!(event.lines, 2);
        assert_eq!(event.content_length, 13);
        assert_eq!(event.method, "GET");
    }

    #[test]
    fn test_response_event_json_shape() {
        let mut response = FetchedResponse::new("http://example.com/a.js".to_string());
        response.status_code = 200;
        let report = ScanReport {
            secrets: vec![crate::data::SecretMatch {
                secret: crate::signatures::Secret::custom("tok_[a-z]+"),
                url: response.url.clone(),
                matched: "tok_abc".to_string(),
            }],
            ..Default::default()
        };

        let value = serde_json::to_value(ResponseEvent::new(&response, report)).unwrap();
        assert_eq!(value["status_code"], 200);
        assert_eq!(value["matches"]["secrets"][0]["match"], "tok_abc");
        assert!(value["matches"]["endpoint"].is_null());
    }
}
