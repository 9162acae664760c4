//! URL verification — bounded, concurrent, fail-safe.
//!
//! The provider asserts that its source URLs exist; many are hallucinated.
//! Every source is pre-marked invalid, then a bounded worker pool issues HEAD
//! probes that can only upgrade a source to valid. A global deadline caps
//! total wall time: whatever has not resolved when it passes stays invalid.
//! Unverified never means valid.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use sourcetrace_common::Source;
use tracing::{debug, warn};

pub const DEFAULT_PER_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Many sites answer automated existence checks with 403 while the page is
/// perfectly reachable in a browser. Counting 403 as valid keeps those
/// legitimate sources verified, at the cost of occasionally "verifying" a
/// page we could not actually read. Overridable per deployment.
pub const TREAT_403_AS_VALID: bool = true;

const PROBE_USER_AGENT: &str = "sourcetrace-verify/0.1 (reachability check)";

#[derive(Debug, Clone)]
pub struct VerifyPolicy {
    pub per_request_timeout: Duration,
    pub concurrency: usize,
    pub treat_403_as_valid: bool,
}

impl Default for VerifyPolicy {
    fn default() -> Self {
        Self {
            per_request_timeout: DEFAULT_PER_REQUEST_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            treat_403_as_valid: TREAT_403_AS_VALID,
        }
    }
}

pub struct UrlVerifier {
    client: reqwest::Client,
    policy: VerifyPolicy,
}

impl Default for UrlVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlVerifier {
    pub fn new() -> Self {
        Self::with_policy(VerifyPolicy::default())
    }

    pub fn with_policy(policy: VerifyPolicy) -> Self {
        let client = reqwest::Client::builder()
            .timeout(policy.per_request_timeout)
            .user_agent(PROBE_USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, policy }
    }

    /// Probe every source URL, writing `url_valid` in place.
    ///
    /// Each probe owns exactly one source's slot; results are applied as they
    /// complete, so probes finished before the deadline are kept even when
    /// the budget expires mid-flight.
    pub async fn verify_all(&self, sources: &mut [Source], budget: Duration) {
        for source in sources.iter_mut() {
            source.url_valid = Some(false);
        }

        let jobs: Vec<(usize, String)> = sources
            .iter()
            .enumerate()
            .filter(|(_, s)| is_well_formed_url(&s.url))
            .map(|(i, s)| (i, s.url.clone()))
            .collect();
        if jobs.is_empty() {
            return;
        }

        let total = jobs.len();
        let deadline = tokio::time::Instant::now() + budget;
        let mut results = stream::iter(jobs.into_iter().map(|(index, url)| async move {
            (index, self.probe(&url).await)
        }))
        .buffer_unordered(self.policy.concurrency);

        let mut probed = 0usize;
        loop {
            match tokio::time::timeout_at(deadline, results.next()).await {
                Ok(Some((index, valid))) => {
                    sources[index].url_valid = Some(valid);
                    probed += 1;
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        probed,
                        total,
                        budget_secs = budget.as_secs(),
                        "Verification budget expired, remaining sources stay unverified"
                    );
                    break;
                }
            }
        }
    }

    async fn probe(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let valid = (200..400).contains(&status)
                    || (status == 403 && self.policy.treat_403_as_valid);
                debug!(url, status, valid, "URL probe completed");
                valid
            }
            Err(e) => {
                debug!(url, error = %e, "URL probe failed");
                false
            }
        }
    }
}

/// Basic `scheme://host.tld` shape check. Anything failing this is marked
/// invalid without spending a network call on it.
pub fn is_well_formed_url(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }
    match url::Url::parse(raw) {
        Ok(parsed) => {
            (parsed.scheme() == "http" || parsed.scheme() == "https")
                && parsed
                    .host_str()
                    .map(|host| host.contains('.'))
                    .unwrap_or(false)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcetrace_common::SourceTier;
    use std::time::Instant;

    fn source(url: &str) -> Source {
        Source {
            outlet_name: "Outlet".to_string(),
            url: url.to_string(),
            url_valid: None,
            publish_date: None,
            political_lean: None,
            source_type: SourceTier::Secondary,
            category: None,
            image_url: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn url_shape_check() {
        assert!(is_well_formed_url("https://example.com/a"));
        assert!(is_well_formed_url("http://news.example.co.uk"));
        assert!(is_well_formed_url(" https://example.com "));
        assert!(!is_well_formed_url(""));
        assert!(!is_well_formed_url("not a url"));
        assert!(!is_well_formed_url("ftp://example.com"));
        assert!(!is_well_formed_url("https://localhost/x"));
        assert!(!is_well_formed_url("example.com"));
    }

    #[tokio::test]
    async fn malformed_urls_marked_invalid_without_probing() {
        let mut sources = vec![source(""), source("no scheme"), source("ftp://x.y")];
        let verifier = UrlVerifier::new();
        let started = Instant::now();
        verifier
            .verify_all(&mut sources, Duration::from_secs(10))
            .await;
        // No probeable URL: returns immediately, everything fail-safe false.
        assert!(started.elapsed() < Duration::from_secs(1));
        for s in &sources {
            assert_eq!(s.url_valid, Some(false));
        }
    }

    #[tokio::test]
    async fn budget_expiry_leaves_pending_sources_invalid() {
        // A listener that accepts connections but never answers: every probe
        // hangs until its own timeout, and the global budget cuts them off.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _hold = tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                if let Ok((socket, _)) = listener.accept().await {
                    held.push(socket);
                }
            }
        });

        let mut sources: Vec<Source> = (0..4)
            .map(|i| source(&format!("http://127.0.0.1:{}/s{i}", addr.port())))
            .collect();

        let verifier = UrlVerifier::with_policy(VerifyPolicy {
            per_request_timeout: Duration::from_secs(5),
            concurrency: 2,
            treat_403_as_valid: true,
        });

        let started = Instant::now();
        verifier
            .verify_all(&mut sources, Duration::from_millis(300))
            .await;

        assert!(started.elapsed() < Duration::from_secs(3));
        for s in &sources {
            assert_eq!(s.url_valid, Some(false), "pending probe must stay invalid");
        }
    }

    #[tokio::test]
    async fn forbidden_status_follows_policy() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = socket.read(&mut buf).await;
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 403 Forbidden\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                        )
                        .await;
                });
            }
        });

        let url = format!("http://127.0.0.1:{}/", addr.port());

        let lenient = UrlVerifier::new();
        let mut sources = vec![source(&url)];
        lenient
            .verify_all(&mut sources, Duration::from_secs(5))
            .await;
        assert_eq!(sources[0].url_valid, Some(true));

        let strict = UrlVerifier::with_policy(VerifyPolicy {
            treat_403_as_valid: false,
            ..VerifyPolicy::default()
        });
        let mut sources = vec![source(&url)];
        strict
            .verify_all(&mut sources, Duration::from_secs(5))
            .await;
        assert_eq!(sources[0].url_valid, Some(false));
    }

    #[tokio::test]
    async fn unreachable_host_is_invalid() {
        // Port from a listener we immediately drop: connection refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut sources = vec![source(&format!("http://127.0.0.1:{}/", addr.port()))];
        let verifier = UrlVerifier::new();
        verifier
            .verify_all(&mut sources, Duration::from_secs(5))
            .await;
        assert_eq!(sources[0].url_valid, Some(false));
    }
}
