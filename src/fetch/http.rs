// src/fetch/http.rs
// =============================================================================
// The real page fetcher.
//
// Key functionality:
// - One reqwest Client reused for every request (connection pooling)
// - Per-request timeout from the CLI config
// - Follows up to 10 redirects, then checks the final status
// - Turns reqwest failures into FetchError variants
// - Decodes the body using, in order: the Content-Type charset, a
//   <meta charset> near the top of the page, then UTF-8
// =============================================================================

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use super::{FetchError, Fetcher};

const MAX_REDIRECTS: usize = 10;

/// How far into the body a <meta charset> is looked for
const META_SNIFF_BYTES: usize = 1024;

// Matches both <meta charset="x"> and
// <meta http-equiv="Content-Type" content="text/html; charset=x">
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_.:\-]+)"#)
        .expect("META_CHARSET regex is valid")
});

/// Fetches pages over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the client with the given per-request timeout
    ///
    /// Fails only if reqwest cannot initialise its TLS backend.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Read the header before bytes() consumes the response
        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_param)
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(decode_body(&bytes, header_charset.as_deref()))
    }
}

// The charset parameter of a Content-Type value, e.g. "text/html; charset=utf-8"
fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(|c| c == '"' || c == '\''))
        } else {
            None
        }
    })
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

/// Decodes a page body to a String; a byte-order mark overrides everything,
/// unknown labels fall through to the next source
fn decode_body(bytes: &[u8], header_charset: Option<&str>) -> String {
    let encoding = header_charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!(encoding = used.name(), "page had bytes invalid in its encoding");
    }
    text.into_owned()
}
