//! Single HTTP GET of the source page.
//!
//! Uses the curl crate (libcurl easy handle) with redirects disabled and a
//! fixed `User-Agent`. Only a 200 response body is collected; any other
//! status aborts the transfer as soon as the body starts.

mod classify;
mod parse;

use crate::error::{LexError, Result};
use classify::{classify_transfer_error, TransferState};
use std::cell::Cell;
use std::time::Duration;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// The only body encoding accepted.
pub const ENCODING: &str = "utf-8";

/// Timeouts for the single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Limit for DNS + TCP (+ TLS) setup.
    pub connect_timeout: Duration,
    /// Limit for the whole transfer, headers and body included.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(300),
        }
    }
}

/// A 200 response. Lives only until its body has been parsed.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body decoded as UTF-8. Invalid bytes are a parse failure, not lossy.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body).map_err(|e| {
            tracing::debug!(error = %e, encoding = ENCODING, "response body is not valid UTF-8");
            LexError::Parse
        })
    }
}

/// Fetch `url` with a single GET.
///
/// Blocks the current thread; call from `spawn_blocking` if used from async
/// code. The curl handle (and its connection) is dropped before returning.
pub fn fetch(url: &str, opts: &FetchOptions) -> Result<RawResponse> {
    let parsed = url::Url::parse(url).map_err(|e| {
        tracing::debug!(%url, error = %e, "invalid URL");
        LexError::Network
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        tracing::debug!(%url, scheme = parsed.scheme(), "unsupported URL scheme");
        return Err(LexError::Network);
    }

    let mut easy = curl::easy::Easy::new();
    easy.url(parsed.as_str()).map_err(setup_failed)?;
    easy.get(true).map_err(setup_failed)?;
    easy.follow_location(false).map_err(setup_failed)?;
    easy.useragent(USER_AGENT).map_err(setup_failed)?;
    easy.connect_timeout(opts.connect_timeout).map_err(setup_failed)?;
    easy.timeout(opts.timeout).map_err(setup_failed)?;

    tracing::debug!(url = %parsed, "GET");

    let status: Cell<Option<u32>> = Cell::new(None);
    let headers_done = Cell::new(false);
    let mut body = Vec::new();

    let outcome = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|line| {
                if let Some(code) = parse::parse_status_line(line) {
                    // 1xx interim responses are followed by another status line.
                    status.set(Some(code));
                    headers_done.set(false);
                } else if parse::is_header_terminator(line) {
                    headers_done.set(true);
                }
                true
            })
            .map_err(setup_failed)?;
        transfer
            .write_function(|data| {
                if status.get() != Some(200) {
                    // Returning a short count aborts the transfer.
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(setup_failed)?;
        transfer.perform()
    };

    let state = TransferState {
        status: status.get(),
        headers_done: headers_done.get(),
    };
    if let Err(e) = outcome {
        let err = classify_transfer_error(&e, state);
        tracing::debug!(url = %parsed, curl_error = %e, ?state, "fetch failed: {}", err);
        return Err(err);
    }

    let code = easy.response_code().map_err(|e| {
        tracing::debug!(error = %e, "no response code");
        LexError::Network
    })?;
    if code != 200 {
        return Err(LexError::InvalidResponse(code));
    }

    tracing::debug!(status = code, bytes = body.len(), "response received");
    Ok(RawResponse { status: code, body })
}

fn setup_failed(e: curl::Error) -> LexError {
    tracing::debug!(error = %e, "curl handle setup failed");
    LexError::Network
}
