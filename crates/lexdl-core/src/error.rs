//! Terminal error type for the fetch → extract → write pipeline.
//!
//! The `Display` text of each variant is the message the CLI prints before
//! exiting; scripts may match on it, so the wording is fixed. Low-level causes
//! are logged where the failure is classified and not carried in the message.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    /// Connection could not be established, the URL was rejected, or the
    /// transfer dropped before any response headers arrived.
    #[error("Error while downloading content")]
    Network,

    /// Server answered with anything other than 200 (redirects included).
    #[error("Invalid HTTP response: {0}")]
    InvalidResponse(u32),

    /// Headers arrived but the body did not finish within the timeout.
    #[error("Timeout while reading content")]
    ReadTimeout,

    /// Body could not be turned into a document tree.
    #[error("Error while parsing content")]
    Parse,

    /// The content path matched zero or several nodes. Both cases share one
    /// message.
    #[error("Multiple results while parsing the content")]
    SelectionAmbiguity { matches: usize },

    /// Cancelled by the user (Ctrl-C) or by runtime shutdown.
    #[error("Interrupted")]
    Interrupted,

    #[error("Error while writing content to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LexError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LexError::Interrupted => 130,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LexError>;
