// src/system/http.rs

use crate::constants::RELEASE;
use std::io::Read;
use thiserror::Error;

/// Why a GET failed.
#[derive(Error, Debug)]
pub enum HttpError {
    /// HTTP 404.
    #[error("GET {0}: not found (HTTP 404)")]
    NotFound(String),
    /// Any other non-success status.
    #[error("GET {url}: server responded with HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned.
        status: u16,
    },
    /// No response at all (DNS, TLS, connection).
    #[error("GET {url}: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error text.
        message: String,
    },
    /// The response arrived but its body could not be read.
    #[error("GET {url}: failed to read response body")]
    Body {
        /// Requested URL.
        url: String,
        /// The read error.
        #[source]
        source: std::io::Error,
    },
}

/// Blocking HTTP GET. A missing resource must surface as [`HttpError::NotFound`].
pub trait HttpClient {
    /// GETs `url` as a JSON API request and returns the body as text.
    fn get_text(&self, url: &str) -> Result<String, HttpError>;
    /// GETs `url` and returns the raw body.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, HttpError>;
}

/// [`HttpClient`] backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl Default for UreqClient {
    fn default() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&format!("boilerpl8/{}", RELEASE))
            .build();
        Self { agent }
    }
}

impl UreqClient {
    fn call(&self, url: &str, accept: &str) -> Result<ureq::Response, HttpError> {
        log::debug!("GET {} (accept: {})", url, accept);
        self.agent
            .get(url)
            .set("Accept", accept)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(404, _) => HttpError::NotFound(url.to_string()),
                ureq::Error::Status(status, _) => HttpError::Status {
                    url: url.to_string(),
                    status,
                },
                ureq::Error::Transport(t) => HttpError::Transport {
                    url: url.to_string(),
                    message: t.to_string(),
                },
            })
    }
}

impl HttpClient for UreqClient {
    fn get_text(&self, url: &str) -> Result<String, HttpError> {
        self.call(url, "application/vnd.github+json")?
            .into_string()
            .map_err(|source| HttpError::Body {
                url: url.to_string(),
                source,
            })
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let mut content = Vec::new();
        self.call(url, "*/*")?
            .into_reader()
            .read_to_end(&mut content)
            .map_err(|source| HttpError::Body {
                url: url.to_string(),
                source,
            })?;
        Ok(content)
    }
}
