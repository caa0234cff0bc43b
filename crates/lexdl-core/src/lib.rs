//! Core of `lex-dl`: fetch one Lex.bg page, cut out the law text, save it.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod pipeline;

pub use error::{LexError, Result};
