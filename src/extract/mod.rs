//! The extraction pipeline.
//!
//! This module turns a parsed document into a [`PageContext`]:
//! - Noise classification (`filter`)
//! - Accessible-name recovery (`label`)
//! - Locator generation (`selector`)
//! - Inventory collection (`collect`)
//!
//! The pipeline is a pure, synchronous transform. Every invocation builds
//! its context from scratch and hands ownership to the caller; nothing is
//! cached between calls.
//!
//! # Example
//!
//! ```
//! use pagegist::extract::extract_context;
//!
//! let html = r#"<h1>Welcome</h1><button aria-label="Sign in">Go</button>"#;
//! let context = extract_context(html, "https://example.com/");
//!
//! assert_eq!(context.sections[0].text, "Welcome");
//! assert_eq!(context.interactive[0].label, "Sign in");
//! ```

mod collect;
mod filter;
mod label;
mod selector;

pub use collect::{Inventories, collect_elements};
pub use filter::NoiseFilter;
pub use label::{LabelIndex, resolve_label};
pub use selector::resolve_selector;

use crate::context::PageContext;
use crate::dom::{self, Document, NodeId};

/// Extraction tuning knobs.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Identifier substrings marking the host's own injected UI. Elements
    /// whose id contains one of these are treated as noise everywhere.
    /// Empty by default; the engine has no baked-in host knowledge.
    pub reserved_markers: Vec<String>,
}

/// Extract a structured context from an HTML string.
pub fn extract_context(html: &str, url: &str) -> PageContext {
    extract_context_with(html, url, &ExtractOptions::default())
}

/// Extract with explicit options.
pub fn extract_context_with(html: &str, url: &str, options: &ExtractOptions) -> PageContext {
    let dom = dom::parse_html(html);
    extract_from_dom(&dom, url, options)
}

/// Extract from raw bytes, sniffing the character encoding first.
pub fn extract_context_bytes(html: &[u8], url: &str, options: &ExtractOptions) -> PageContext {
    let dom = dom::parse_html_bytes(html);
    extract_from_dom(&dom, url, options)
}

fn extract_from_dom(dom: &Document, url: &str, options: &ExtractOptions) -> PageContext {
    let filter = NoiseFilter::new(options);
    let labels = LabelIndex::build(dom);

    let content = crate::render::render_content(dom, url, &filter, &labels);
    let inventories = collect_elements(dom, url, &filter, &labels);

    PageContext {
        url: url.to_string(),
        title: dom.title(),
        content,
        sections: inventories.sections,
        interactive: inventories.interactive,
        forms: inventories.forms,
        inline_links: inventories.inline_links,
    }
}

/// Subtree text in the manner of `textContent`, with structural noise tags
/// skipped and whitespace collapsed.
pub(crate) fn visible_text(dom: &Document, node: NodeId) -> String {
    let mut out = String::new();
    append_text(dom, node, &mut out);
    crate::util::collapse_whitespace(&out)
}

fn append_text(dom: &Document, node: NodeId, out: &mut String) {
    if let Some(text) = dom.text_content(node) {
        out.push_str(text);
        return;
    }
    if let Some(name) = dom.element_name(node) {
        if filter::NOISE_TAGS.contains(&name.as_ref()) {
            return;
        }
    }
    for child in dom.children(node) {
        append_text(dom, child, out);
    }
}
