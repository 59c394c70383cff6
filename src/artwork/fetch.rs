use std::path::PathBuf;
use std::time::Duration;

use ureq::Agent;

use super::ArtworkError;

/// Retrieves the raw bytes behind an artwork source identifier.
pub trait ArtworkFetcher {
    fn fetch(&self, source_id: &str) -> Result<Vec<u8>, ArtworkError>;
}

/// Blocking fetcher for `http(s)://` art URLs, with `file://` and plain paths read from disk.
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    /// `timeout` of `None` leaves the request unbounded.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder()
            .user_agent(user_agent)
            .timeout_global(timeout)
            .http_status_as_error(true)
            .build();

        Self {
            agent: Agent::new_with_config(config),
        }
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, ArtworkError> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ArtworkError::fetch(url, e))?;

        response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ArtworkError::fetch(url, e))
    }
}

impl ArtworkFetcher for HttpFetcher {
    fn fetch(&self, source_id: &str) -> Result<Vec<u8>, ArtworkError> {
        match local_path(source_id) {
            Some(path) => std::fs::read(&path).map_err(|e| ArtworkError::fetch(source_id, e)),
            None => self.fetch_remote(source_id),
        }
    }
}

/// Resolve `file://` URLs and absolute paths to a filesystem path.
fn local_path(source_id: &str) -> Option<PathBuf> {
    if let Some(rest) = source_id.strip_prefix("file://") {
        // file://localhost/path and file:///path are both valid
        let rest = rest.strip_prefix("localhost").unwrap_or(rest);
        return Some(PathBuf::from(percent_decode(rest)));
    }
    if source_id.starts_with('/') {
        return Some(PathBuf::from(source_id));
    }
    None
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(byte) = input
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        {
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}
