//! Accessible-name recovery.
//!
//! Interactive elements frequently ship without a usable label: icon buttons,
//! bare inputs, divs with click handlers. This resolver tries a fixed chain
//! of sources, from explicit accessibility attributes down to last-resort
//! `value`/`name` attributes, and reports absence rather than inventing one.

use std::collections::HashMap;

use crate::dom::{Document, NodeId};
use crate::util::truncate_chars;

use super::visible_text;

/// Labels longer than this are cut at a character boundary.
const LABEL_CAP: usize = 120;

/// Attributes that carry test/automation identifiers, tried in order.
const TEST_ID_ATTRS: &[&str] = &["data-testid", "data-test-id", "data-test", "data-cy"];

/// Precomputed `label[for]` associations for a document.
///
/// Built in one pass so the resolver stays a pure function of its arguments.
/// The first label claiming a target wins, matching how browsers associate
/// duplicated `for` attributes.
#[derive(Debug, Default)]
pub struct LabelIndex {
    by_target: HashMap<String, NodeId>,
}

impl LabelIndex {
    pub fn build(dom: &Document) -> Self {
        let mut by_target = HashMap::new();
        for node in dom.descendants(dom.document()) {
            if dom.is_tag(node, "label") {
                if let Some(target) = dom.get_attr(node, "for") {
                    if !target.is_empty() {
                        by_target.entry(target.to_string()).or_insert(node);
                    }
                }
            }
        }
        Self { by_target }
    }

    fn label_for(&self, id: &str) -> Option<NodeId> {
        self.by_target.get(id).copied()
    }
}

/// Resolve the best available human-readable label for an element.
///
/// Priority, first non-empty trimmed source wins, capped at 120 characters:
/// `aria-label`, `aria-labelledby`, `aria-describedby`, `placeholder`,
/// `title`, `alt`, an associated `<label for>`, an enclosing `<label>`, a
/// nested image alt or accessible name (links/buttons only), test ids,
/// visible text, `value`, `name`. Returns `None` when every source is empty;
/// callers skip such elements when building the interactive inventory.
pub fn resolve_label(dom: &Document, labels: &LabelIndex, node: NodeId) -> Option<String> {
    if !dom.is_element(node) {
        return None;
    }

    if let Some(label) = attr_label(dom, node, "aria-label") {
        return Some(label);
    }
    for reference_attr in ["aria-labelledby", "aria-describedby"] {
        if let Some(refs) = dom.get_attr(node, reference_attr) {
            if let Some(label) = referenced_text(dom, refs) {
                return Some(label);
            }
        }
    }
    for attr in ["placeholder", "title", "alt"] {
        if let Some(label) = attr_label(dom, node, attr) {
            return Some(label);
        }
    }

    if let Some(id) = dom.element_id(node) {
        if let Some(label_node) = labels.label_for(id) {
            if let Some(label) = accept(&visible_text(dom, label_node)) {
                return Some(label);
            }
        }
    }
    if let Some(enclosing) = enclosing_label(dom, node) {
        if let Some(label) = accept(&visible_text(dom, enclosing)) {
            return Some(label);
        }
    }

    if is_button_like(dom, node) {
        if let Some(label) = nested_graphic_label(dom, node) {
            return Some(label);
        }
    }

    for attr in TEST_ID_ATTRS {
        if let Some(label) = attr_label(dom, node, attr) {
            return Some(label);
        }
    }

    if let Some(label) = accept(&visible_text(dom, node)) {
        return Some(label);
    }

    for attr in ["value", "name"] {
        if let Some(label) = attr_label(dom, node, attr) {
            return Some(label);
        }
    }

    None
}

/// Trimmed, capped, non-empty or nothing.
fn accept(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(truncate_chars(trimmed, LABEL_CAP).to_string())
    }
}

fn attr_label(dom: &Document, node: NodeId, attr: &str) -> Option<String> {
    dom.get_attr(node, attr).and_then(accept)
}

/// Join the visible text of whitespace-separated id references.
fn referenced_text(dom: &Document, refs: &str) -> Option<String> {
    let parts: Vec<String> = refs
        .split_whitespace()
        .filter_map(|id| dom.get_by_id(id))
        .map(|target| visible_text(dom, target))
        .filter(|text| !text.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        accept(&parts.join(" "))
    }
}

fn enclosing_label(dom: &Document, node: NodeId) -> Option<NodeId> {
    dom.ancestors(node).find(|&a| dom.is_tag(a, "label"))
}

fn is_button_like(dom: &Document, node: NodeId) -> bool {
    if dom.is_tag(node, "a") || dom.is_tag(node, "button") {
        return true;
    }
    matches!(dom.get_attr(node, "role"), Some("button") | Some("link"))
}

/// Icon buttons: look inside for an image alt or a labeled descendant.
fn nested_graphic_label(dom: &Document, node: NodeId) -> Option<String> {
    for descendant in dom.descendants(node).skip(1) {
        if dom.is_tag(descendant, "img") {
            if let Some(label) = attr_label(dom, descendant, "alt") {
                return Some(label);
            }
        }
    }
    for descendant in dom.descendants(node).skip(1) {
        if let Some(label) = attr_label(dom, descendant, "aria-label") {
            return Some(label);
        }
    }
    None
}
