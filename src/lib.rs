//! # pagegist
//!
//! A fast, lightweight engine that turns raw HTML into a structured,
//! model-ready description of a page.
//!
//! ## Features
//!
//! - Filters script/style/hidden noise before any text is read
//! - Renders readable page text with heading, list, and table markers
//! - Collects sections, interactive controls, forms, and inline links,
//!   each with a stable CSS selector
//! - Resolves human-readable labels from ARIA, associated `<label>`s,
//!   placeholders, and nested graphics
//! - Formats everything into one deterministic text document and splits
//!   oversized output into newline-aligned chunks
//!
//! ## Quick Start
//!
//! ```
//! use pagegist::{FormatOptions, extract_context, format_context};
//!
//! let html = r#"<html><head><title>Store</title></head><body>
//!   <h1>Welcome</h1>
//!   <button aria-label="Add to cart">🛒</button>
//! </body></html>"#;
//!
//! let context = extract_context(html, "https://shop.example/");
//! assert_eq!(context.title, "Store");
//! assert_eq!(context.interactive[0].label, "Add to cart");
//!
//! let text = format_context(&context, &FormatOptions::default());
//! assert!(text.contains("PAGE SECTIONS"));
//! ```
//!
//! ## Chunking for Transport
//!
//! Formatted contexts can exceed what a downstream model call accepts.
//! [`chunk_text`] splits on newline boundaries so no chunk ends mid-line:
//!
//! ```
//! use pagegist::{FormatOptions, chunk_text, extract_context, format_context};
//!
//! let context = extract_context("<p>hello</p>", "https://example.com/");
//! let text = format_context(&context, &FormatOptions::default());
//! let chunks = chunk_text(&text, 12_000);
//! assert_eq!(chunks.len(), 1);
//! ```

pub mod chunk;
pub mod context;
pub mod dom;
pub mod error;
pub mod extract;
pub mod render;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use chunk::chunk_text;
pub use context::{
    CommandPayload, FormatOptions, PageContext, PayloadConfig, assemble_payload, format_context,
};
pub use dom::{Document, parse_html};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, extract_context, extract_context_bytes, extract_context_with};
