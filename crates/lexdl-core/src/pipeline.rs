//! Fetch → parse → extract → write, strictly in sequence.
//!
//! Both blocking phases (the libcurl transfer, then parse/extract/write) run
//! on tokio's blocking pool; the caller's task only awaits them.

use crate::error::{LexError, Result};
use crate::extract::{self, Layout};
use crate::fetch::{self, FetchOptions, RawResponse};
use crate::output::{self, Destination};
use std::fmt;
use std::path::PathBuf;
use tokio::task::JoinError;

/// One invocation of the tool.
#[derive(Debug, Clone)]
pub struct Job {
    pub url: String,
    pub layout: Layout,
    /// Explicit output path; `None` auto-names a file in the working directory.
    pub output: Option<PathBuf>,
    pub fetch: FetchOptions,
}

impl Job {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            layout: Layout::default(),
            output: None,
            fetch: FetchOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Fetching,
    Parsing,
    Writing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Writing => "writing",
            Stage::Done => "done",
        })
    }
}

fn enter(stage: Stage) {
    tracing::debug!(%stage, "pipeline stage");
}

/// Run the whole job and return the path of the written file.
pub async fn run(job: Job) -> Result<PathBuf> {
    let Job {
        url,
        layout,
        output,
        fetch: opts,
    } = job;

    enter(Stage::Fetching);
    let response = join(tokio::task::spawn_blocking(move || fetch::fetch(&url, &opts)).await)??;

    let path = join(
        tokio::task::spawn_blocking(move || {
            let dest = match output {
                Some(path) => Destination::Path(path),
                None => Destination::auto_in_cwd()?,
            };
            process(response, layout, &dest)
        })
        .await,
    )??;

    enter(Stage::Done);
    Ok(path)
}

/// Parse, extract and write an already fetched response. Blocking.
pub fn process(response: RawResponse, layout: Layout, dest: &Destination) -> Result<PathBuf> {
    enter(Stage::Parsing);
    let fragment = extract::extract(response.text()?, layout)?;
    drop(response);

    enter(Stage::Writing);
    output::write_fragment(&fragment, dest)
}

/// Unwrap a blocking task's result; a panic in the task is re-raised here.
fn join<T>(res: std::result::Result<T, JoinError>) -> Result<T> {
    match res {
        Ok(value) => Ok(value),
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            tracing::debug!(error = %e, "blocking task cancelled");
            Err(LexError::Interrupted)
        }
    }
}
