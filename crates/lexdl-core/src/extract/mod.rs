//! Content extraction: parse, select the content node, strip boilerplate.
//!
//! Parsing uses `scraper` (html5ever), which recovers from malformed markup
//! and leaves element ids exactly as written. Pruning detaches matching
//! descendants in the parsed arena, then only the content node is
//! serialized; the rest of the document is dropped with the tree.

mod layout;

pub use layout::Layout;

use crate::error::{LexError, Result};
use scraper::{ElementRef, Html, Selector};

/// Serialized content node: outer HTML with the node itself as root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    html: String,
    removed: usize,
}

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Number of nodes detached while pruning.
    pub fn removed(&self) -> usize {
        self.removed
    }
}

/// Parse `html`, select the single content node for `layout` and strip the
/// layout's boilerplate from it.
pub fn extract(html: &str, layout: Layout) -> Result<Fragment> {
    let mut doc = parse(html)?;
    let root = content_node(&doc, layout)?.id();

    let mut removed = 0;
    for rule in layout.removal_selectors() {
        let selector = compile(rule)?;
        let ids: Vec<_> = match doc.tree.get(root).and_then(ElementRef::wrap) {
            Some(content) => content.select(&selector).map(|e| e.id()).collect(),
            None => Vec::new(),
        };
        // Matches nested inside an earlier match go with it; detaching
        // them again is harmless.
        for id in &ids {
            if let Some(mut node) = doc.tree.get_mut(*id) {
                node.detach();
            }
        }
        if !ids.is_empty() {
            tracing::debug!(rule, count = ids.len(), "removed nodes");
        }
        removed += ids.len();
    }

    let html = doc
        .tree
        .get(root)
        .and_then(ElementRef::wrap)
        .map(|content| content.html())
        .ok_or(LexError::Parse)?;
    tracing::debug!(%layout, removed, bytes = html.len(), "content extracted");
    Ok(Fragment { html, removed })
}

fn parse(html: &str) -> Result<Html> {
    if html.trim().is_empty() {
        tracing::debug!("document is empty");
        return Err(LexError::Parse);
    }
    let doc = Html::parse_document(html);
    if !doc.errors.is_empty() {
        tracing::debug!(count = doc.errors.len(), "recovered from markup errors");
    }
    Ok(doc)
}

/// The one element matching the layout's content path.
fn content_node(doc: &Html, layout: Layout) -> Result<ElementRef<'_>> {
    let selector = compile(layout.content_selector())?;
    let mut matches = doc.select(&selector);
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only),
        (first, _) => {
            let count = match first {
                None => 0,
                Some(_) => 2 + matches.count(),
            };
            tracing::debug!(%layout, matches = count, "content path is not unique");
            Err(LexError::SelectionAmbiguity { matches: count })
        }
    }
}

fn compile(rule: &str) -> Result<Selector> {
    Selector::parse(rule).map_err(|e| {
        tracing::error!(rule, error = ?e, "invalid built-in selector");
        LexError::Parse
    })
}
