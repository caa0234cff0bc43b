//! CLI for lex-dl.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use lexdl_core::extract::Layout;
use lexdl_core::pipeline::{self, Job};
use lexdl_core::LexError;
use std::path::PathBuf;

/// Save the law text of a Lex.bg page as an HTML fragment.
#[derive(Debug, Parser)]
#[command(name = "lex-dl", version)]
#[command(about = "Save the law text of a Lex BG page", long_about = None)]
pub struct Cli {
    /// Lex BG page url.
    pub url: String,

    /// Write to this file instead of `<timestamp>_<random>.html` in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Page layout the content is cut from.
    #[arg(long, value_enum, default_value_t = LayoutArg::Page)]
    pub layout: LayoutArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Content box directly under the left column.
    Page,
    /// Inner `boxi boxinb` box.
    Nested,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Page => Layout::Page,
            LayoutArg::Nested => Layout::Nested,
        }
    }
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        tracing::debug!(?cli, "parsed arguments");
        cli.run().await?;
        Ok(())
    }

    pub fn into_job(self) -> Job {
        let mut job = Job::new(self.url);
        job.layout = self.layout.into();
        job.output = self.output;
        job
    }

    /// Run the pipeline, abandoning it if Ctrl-C arrives first.
    pub async fn run(self) -> Result<PathBuf, LexError> {
        let job = self.into_job();
        tokio::select! {
            res = pipeline::run(job) => res,
            Ok(()) = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                Err(LexError::Interrupted)
            }
        }
    }
}

/// Exit code for an error returned by `run_from_args`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<LexError>().map_or(1, LexError::exit_code)
}

#[cfg(test)]
mod tests;
