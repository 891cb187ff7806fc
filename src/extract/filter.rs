//! Structural noise classification.
//!
//! One predicate decides what counts as noise, and both the renderer and the
//! collector consult it, so the two views never disagree about what was
//! dropped.

use crate::dom::{Document, NodeId};

use super::ExtractOptions;

/// Tags that never contribute readable content.
pub(crate) const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "frame", "svg", "canvas", "video",
    "audio", "object", "embed", "link", "meta", "base", "head",
];

/// Classifies elements and subtrees as structurally irrelevant.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    reserved_markers: Vec<String>,
}

impl NoiseFilter {
    pub fn new(options: &ExtractOptions) -> Self {
        Self {
            reserved_markers: options.reserved_markers.clone(),
        }
    }

    /// Test a single element. Walkers that prune subtrees call this at each
    /// element; text nodes are only ever excluded via their ancestors.
    pub fn is_excluded(&self, dom: &Document, id: NodeId) -> bool {
        let Some(name) = dom.element_name(id) else {
            return false;
        };

        if NOISE_TAGS.contains(&name.as_ref()) {
            return true;
        }

        if let Some(elem_id) = dom.element_id(id) {
            if self.reserved_markers.iter().any(|m| elem_id.contains(m)) {
                return true;
            }
        }

        if dom.has_attr(id, "hidden") {
            return true;
        }

        if let Some(style) = dom.get_attr(id, "style") {
            if style_hides(style) {
                return true;
            }
        }

        dom.get_attr(id, "aria-hidden") == Some("true")
    }

    /// Point query: is this node excluded directly or through any ancestor?
    pub fn is_excluded_with_ancestors(&self, dom: &Document, id: NodeId) -> bool {
        if self.is_excluded(dom, id) {
            return true;
        }
        dom.ancestors(id).any(|a| self.is_excluded(dom, a))
    }
}

/// Check an inline style attribute for hiding declarations.
fn style_hides(style: &str) -> bool {
    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let mut value = value.trim().to_ascii_lowercase();
        if let Some(stripped) = value.strip_suffix("!important") {
            value = stripped.trim_end().to_string();
        }
        let hidden = match property.as_str() {
            "display" => value == "none",
            "visibility" => value == "hidden",
            "opacity" => value == "0" || value == "0.0",
            _ => false,
        };
        if hidden {
            return true;
        }
    }
    false
}
