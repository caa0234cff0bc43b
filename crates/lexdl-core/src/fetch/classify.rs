//! Map a failed libcurl transfer onto the pipeline's error taxonomy.

use crate::error::LexError;

/// What the header callback had seen when the transfer stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TransferState {
    /// Status code of the last status line received.
    pub status: Option<u32>,
    /// The blank line ending the final header block was received.
    pub headers_done: bool,
}

/// Classify a curl error given how far the response got.
///
/// A non-200 status wins over the curl error: the write callback aborts such
/// transfers on purpose, which curl reports as a write error.
pub(crate) fn classify_transfer_error(e: &curl::Error, state: TransferState) -> LexError {
    if let Some(code) = state.status.filter(|&c| c >= 200 && c != 200) {
        return LexError::InvalidResponse(code);
    }
    if e.is_operation_timedout() && state.headers_done {
        return LexError::ReadTimeout;
    }
    tracing::debug!(error = %e, curl_code = e.code(), "download failed");
    LexError::Network
}
