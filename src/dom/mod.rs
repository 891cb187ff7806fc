//! HTML parsing into an arena-backed document tree.
//!
//! This module turns raw HTML into a [`Document`]: a flat arena of nodes
//! with parent/child/sibling links, plus CSS selector matching over it.
//! Everything downstream (filtering, labeling, rendering, collection)
//! walks this tree.
//!
//! # Example
//!
//! ```
//! use pagegist::dom::parse_html;
//!
//! let dom = parse_html("<html><body><p>Hello, World!</p></body></html>");
//! let p = dom.find_by_tag("p").unwrap();
//! assert_eq!(dom.element_name(p).map(|n| n.as_ref()), Some("p"));
//! ```

mod arena;
mod element_ref;
mod tree_sink;

pub use arena::{Attribute, Document, Node, NodeData, NodeId};
pub use element_ref::{ElementRef, PagegistSelectors, parse_selector, selector_matches};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DomSink;

/// Parse an HTML string into a [`Document`].
///
/// Parsing never fails: html5ever recovers from malformed markup the same
/// way browsers do, so even garbage input yields a (possibly minimal) tree.
pub fn parse_html(html: &str) -> Document {
    let sink = DomSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}

/// Parse raw HTML bytes, sniffing the character encoding first.
///
/// Checks for a `<meta charset>` declaration in the head, then falls back
/// to UTF-8 with Windows-1252 as a last resort.
pub fn parse_html_bytes(html: &[u8]) -> Document {
    // Extract encoding from meta charset declaration if present
    let hint_encoding = crate::util::extract_meta_charset(html);

    // Decode with proper encoding support
    let html_str = crate::util::decode_text(html, hint_encoding);

    parse_html(&html_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_html_bytes_utf8() {
        let dom = parse_html_bytes("<p>caf\u{e9}</p>".as_bytes());
        let p = dom.find_by_tag("p").unwrap();
        let text: String = dom.children(p).filter_map(|c| dom.text_content(c)).collect();
        assert_eq!(text, "caf\u{e9}");
    }

    #[test]
    fn test_parse_html_bytes_meta_charset() {
        let mut html: Vec<u8> = b"<meta charset=\"windows-1252\"><p>caf".to_vec();
        html.push(0xE9);
        html.extend_from_slice(b"</p>");

        let dom = parse_html_bytes(&html);
        let p = dom.find_by_tag("p").unwrap();
        let text: String = dom.children(p).filter_map(|c| dom.text_content(c)).collect();
        assert_eq!(text, "caf\u{e9}");
    }
}
