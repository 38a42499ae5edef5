//! JSON fetching over HTTP
//!
//! Redirects are followed by hand so the chain can be bounded and checked
//! for cycles; `reqwest`'s own redirect handling is disabled.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header::LOCATION, redirect::Policy};
use serde_json::Value;

use crate::{Error, Result};

/// Source of JSON documents by URL.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch `url` and parse the response body as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// `JsonFetcher` backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_redirects: usize,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher following at most `max_redirects` hops, with
    /// `timeout` applied to every request.
    pub fn new(max_redirects: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .connect_timeout(timeout)
            .user_agent(concat!("datasync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network {
                url: String::new(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            max_redirects,
            timeout,
        })
    }

    fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::Network {
            url: url.to_string(),
            message: format!("Invalid URL: {}", e),
        })
    }

    fn map_request_error(&self, url: &Url, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                stage: format!("request to {}", url),
                after: self.timeout,
            }
        } else {
            Error::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Statuses treated as "fetch again at `Location`".
fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let start = Self::parse_url(url)?;
        let mut current = start.clone();
        let mut visited = HashSet::from([current.to_string()]);
        let mut hops = 0usize;

        loop {
            let response = self
                .client
                .get(current.clone())
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| self.map_request_error(&current, e))?;

            let status = response.status();

            if is_redirect(status) {
                let redirect_error = |reason: String| Error::Http {
                    url: current.to_string(),
                    status: status.as_u16(),
                    reason,
                };
                let location = match response.headers().get(LOCATION) {
                    None => {
                        return Err(redirect_error("redirect without Location header".to_string()));
                    }
                    Some(value) => value.to_str().map_err(|_| {
                        redirect_error(format!("redirect with invalid Location header {:?}", value))
                    })?,
                };

                let next = current.join(location).map_err(|e| Error::Network {
                    url: current.to_string(),
                    message: format!("Invalid redirect target {:?}: {}", location, e),
                })?;

                hops += 1;
                if hops > self.max_redirects {
                    return Err(Error::RedirectLimit {
                        url: start.to_string(),
                        max: self.max_redirects,
                    });
                }
                if !visited.insert(next.to_string()) {
                    return Err(Error::RedirectLoop {
                        url: next.to_string(),
                    });
                }

                tracing::debug!(from = %current, to = %next, status = status.as_u16(), "Following redirect");
                current = next;
                continue;
            }

            if status != StatusCode::OK {
                return Err(Error::Http {
                    url: current.to_string(),
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| self.map_request_error(&current, e))?;

            return serde_json::from_str(&body).map_err(|e| Error::InvalidJson {
                url: current.to_string(),
                message: e.to_string(),
            });
        }
    }
}
