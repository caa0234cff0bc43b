//! Persisting the extracted fragment.
//!
//! An explicit path is created or truncated. Otherwise a fresh
//! `{unix_timestamp}_{random}.html` file is created exclusively in the target
//! directory (tempfile's `O_EXCL` create, then kept), so an existing file is
//! never reused or overwritten.

use crate::error::{LexError, Result};
use crate::extract::Fragment;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Suffix of auto-named output files.
pub const SUFFIX: &str = ".html";

/// Where the fragment goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Exactly this path; an existing file is truncated.
    Path(PathBuf),
    /// A new, auto-named file in this directory.
    AutoNamed(PathBuf),
}

impl Destination {
    /// Auto-named file in the current working directory.
    pub fn auto_in_cwd() -> Result<Self> {
        let dir = std::env::current_dir().map_err(|source| LexError::Write {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Destination::AutoNamed(dir))
    }
}

/// Write `fragment` as UTF-8 bytes and return the path written.
/// The file is flushed and closed before this returns.
pub fn write_fragment(fragment: &Fragment, dest: &Destination) -> Result<PathBuf> {
    let bytes = fragment.as_str().as_bytes();
    let path = match dest {
        Destination::Path(path) => {
            write_to_path(path, bytes).map_err(|source| LexError::Write {
                path: path.clone(),
                source,
            })?;
            path.clone()
        }
        Destination::AutoNamed(dir) => write_auto_named(dir, bytes, SystemTime::now())?,
    };
    tracing::info!(path = %path.display(), bytes = bytes.len(), "content written");
    Ok(path)
}

fn write_to_path(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}

fn write_auto_named(dir: &Path, bytes: &[u8], now: SystemTime) -> Result<PathBuf> {
    let prefix = timestamp_prefix(now);
    let mut named = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(SUFFIX)
        .tempfile_in(dir)
        .map_err(|source| LexError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

    let written = named.write_all(bytes).and_then(|()| named.flush());
    if let Err(source) = written {
        return Err(LexError::Write {
            path: named.path().to_path_buf(),
            source,
        });
    }

    let (file, path) = named.keep().map_err(|e| LexError::Write {
        path: e.file.path().to_path_buf(),
        source: e.error,
    })?;
    drop(file);
    Ok(path)
}

/// `"{secs}_"` for `now`; a clock before the epoch yields `"0_"`.
fn timestamp_prefix(now: SystemTime) -> String {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{secs}_")
}
