// On-disk response cache, one JSON file per URL

use crate::error::{Result, ScanError};
use crate::result::FetchedResponse;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct CachedEntry {
    url: String,
    status_code: u16,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
    body: String,
    #[serde(default)]
    body_bytes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<first two hex chars>/<sha256 of url>`
    pub fn path_for(&self, url: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        self.dir.join(&digest[..2]).join(digest)
    }

    pub async fn load(&self, url: &str) -> Option<FetchedResponse> {
        let path = self.path_for(url);
        let raw = tokio::fs::read(&path).await.ok()?;
        match serde_json::from_slice::<CachedEntry>(&raw) {
            Ok(entry) => Some(FetchedResponse {
                url: entry.url,
                status_code: entry.status_code,
                content_type: entry.content_type,
                content_length: Some(entry.body.len() as u64),
                headers: entry.headers,
                body_bytes: entry.body_bytes.unwrap_or(entry.body.len()),
                body: entry.body,
                response_time: Duration::from_secs(0),
                from_cache: true,
            }),
            Err(e) => {
                debug!("Ignoring unreadable cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Stores `response` under the requested `url`, which may differ from
    /// `response.url` after a redirect. Server errors are never cached.
    pub async fn store(&self, url: &str, response: &FetchedResponse) -> Result<()> {
        if response.status_code >= 500 {
            return Ok(());
        }

        let path = self.path_for(url);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let entry = CachedEntry {
            url: response.url.clone(),
            status_code: response.status_code,
            content_type: response.content_type.clone(),
            headers: response.headers.clone(),
            body: response.body.clone(),
            body_bytes: Some(response.body_bytes),
        };
        let raw = serde_json::to_vec(&entry).map_err(|e| ScanError::CacheError(e.to_string()))?;
        tokio::fs::write(&path, raw).await?;
        Ok(())
    }
}
