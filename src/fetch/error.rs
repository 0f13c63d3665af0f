// src/fetch/error.rs
// =============================================================================
// Transport errors for page fetching.
//
// Every variant means the same thing to the crawler: the page is abandoned
// (nothing saved, no links followed) and the crawl moves on. The variants only
// exist so the log line says *why*.
// =============================================================================

use thiserror::Error;

/// Why a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Could not resolve hostname
    #[error("could not resolve hostname for {url}")]
    Dns { url: String },

    /// Connection refused, reset, unreachable host, ...
    #[error("connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    /// Redirect loop or too many hops
    #[error("too many redirects for {url}")]
    TooManyRedirects { url: String },

    /// Final response (after redirects) was not 2xx
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Anything else reqwest can fail with (bad body encoding, TLS, ...)
    #[error("error fetching {url}: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// Sorts a reqwest error into one of our variants
    ///
    /// The checks run in the same order link-checkers usually use:
    /// timeout first, then redirects, then connection problems.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let url = url.to_string();
        let error_string = error.to_string();

        if error.is_timeout() {
            FetchError::Timeout { url }
        } else if error.is_redirect() {
            FetchError::TooManyRedirects { url }
        } else if error.is_connect() {
            // reqwest folds DNS failures into connect errors
            if error_string.contains("dns") {
                FetchError::Dns { url }
            } else {
                FetchError::Connect {
                    url,
                    message: error_string,
                }
            }
        } else if let Some(status) = error.status() {
            FetchError::Status {
                url,
                status: status.as_u16(),
            }
        } else {
            FetchError::Other {
                url,
                message: error_string,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_url_and_code() {
        let err = FetchError::Status {
            url: "https://ex.com/docs".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 for https://ex.com/docs");
    }
}
