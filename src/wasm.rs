//! WASM bindings for in-browser page extraction.
//!
//! This module exposes the extraction pipeline to JavaScript via wasm-bindgen,
//! for hosts (extensions, workers) that hold the page HTML and want the
//! formatted context without a native dependency.

use wasm_bindgen::prelude::*;

use crate::chunk::chunk_text;
use crate::context::{FormatOptions, format_context};
use crate::extract::{ExtractOptions, extract_context, extract_context_with};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Extract and format the context of a page.
///
/// Takes raw HTML and the page URL, returns the formatted text document.
#[wasm_bindgen]
pub fn extract(html: &str, url: &str) -> String {
    let context = extract_context(html, url);
    format_context(&context, &FormatOptions::default())
}

/// Extract and format, treating elements whose id contains one of `markers`
/// as noise.
///
/// Hosts that inject their own UI into the page pass their id markers here so
/// the injected widgets never show up in their own context.
#[wasm_bindgen]
pub fn extract_with_markers(html: &str, url: &str, markers: Vec<String>) -> String {
    let options = ExtractOptions {
        reserved_markers: markers.clone(),
    };
    let context = extract_context_with(html, url, &options);
    let format_options = FormatOptions {
        include_links: true,
        reserved_markers: markers,
    };
    format_context(&context, &format_options)
}

/// Extract, format, and split into chunks of at most `max_chars` characters.
///
/// Chunks break on newline boundaries, so each one holds whole lines.
#[wasm_bindgen]
pub fn extract_chunks(html: &str, url: &str, max_chars: usize) -> Vec<String> {
    let text = extract(html, url);
    chunk_text(&text, max_chars)
}
