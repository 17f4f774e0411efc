use crate::data::{
    EndpointMatch, ErrorMatch, FileTypeMatch, InfoMatch, MatchKey, ScanReport, SecretMatch,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Everything a crawl run produced, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResults {
    pub visited: Vec<String>,
    pub secrets: Vec<SecretMatch>,
    pub endpoints: Vec<EndpointMatch>,
    pub filetypes: Vec<FileTypeMatch>,
    pub errors: Vec<ErrorMatch>,
    pub infos: Vec<InfoMatch>,
}

impl CrawlResults {
    pub fn findings_count(&self) -> usize {
        self.secrets.len()
            + self.endpoints.len()
            + self.filetypes.len()
            + self.errors.len()
            + self.infos.len()
    }

    /// Appends another run's results. Used when several targets are crawled in turn.
    pub fn extend(&mut self, other: CrawlResults) {
        self.visited.extend(other.visited);
        self.secrets.extend(other.secrets);
        self.endpoints.extend(other.endpoints);
        self.filetypes.extend(other.filetypes);
        self.errors.extend(other.errors);
        self.infos.extend(other.infos);
    }
}

/// Keeps the first record for each (match text, URL) pair.
pub fn deduplicate<T: MatchKey>(records: Vec<T>) -> Vec<T> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert((r.match_text().to_string(), r.url().to_string())))
        .collect()
}

fn deduplicate_urls(urls: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    urls.into_iter().filter(|u| seen.insert(u.clone())).collect()
}

/// Shared sink for the per-response path. The lock is held for a push only.
#[derive(Debug, Default)]
pub struct Aggregator {
    results: Mutex<CrawlResults>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CrawlResults> {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_visit(&self, url: String) {
        self.lock().visited.push(url);
    }

    pub fn absorb(&self, report: ScanReport) {
        let mut results = self.lock();
        results.secrets.extend(report.secrets);
        results.endpoints.extend(report.endpoint);
        results.filetypes.extend(report.filetype);
        results.errors.extend(report.errors);
        results.infos.extend(report.infos);
    }

    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }

    /// Takes the collected results and deduplicates every category.
    pub fn finish(&self) -> CrawlResults {
        let results = std::mem::take(&mut *self.lock());
        CrawlResults {
            visited: deduplicate_urls(results.visited),
            secrets: deduplicate(results.secrets),
            endpoints: deduplicate(results.endpoints),
            filetypes: deduplicate(results.filetypes),
            errors: deduplicate(results.errors),
            infos: deduplicate(results.infos),
        }
    }
}
