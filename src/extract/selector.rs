//! Locator expression generation.
//!
//! Produces a best-effort, human-readable CSS path for any node in the tree.
//! The path re-resolves to the originating element on the same tree via
//! [`Document::select`], except under duplicated markup with no
//! distinguishing id/class, which is an accepted limitation.

use crate::dom::{Document, NodeId};

/// How many classes a path segment will carry at most.
const MAX_SEGMENT_CLASSES: usize = 2;

/// Build a locator expression for a node.
///
/// An own id wins immediately (`#id`), then a `name` attribute
/// (`[name="…"]`), then an ancestor walk toward `<body>` emitting
/// `tag[.class…][:nth-of-type(k)]` segments, stopping early at the first
/// ancestor with an id. Non-element nodes resolve through their nearest
/// element ancestor; a detached node yields an empty string.
pub fn resolve_selector(dom: &Document, node: NodeId) -> String {
    let Some(element) = nearest_element(dom, node) else {
        return String::new();
    };

    if let Some(id) = dom.element_id(element) {
        return format!("#{id}");
    }
    if let Some(name) = dom.get_attr(element, "name") {
        if !name.is_empty() {
            return format!("[name=\"{}\"]", escape_attr_value(name));
        }
    }

    let mut segments = Vec::new();
    let mut current = element;
    while dom.is_element(current) && !dom.is_tag(current, "body") {
        if let Some(id) = dom.element_id(current) {
            segments.push(format!("#{id}"));
            break;
        }
        segments.push(segment_for(dom, current));
        match dom.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    segments.reverse();
    segments.join(" > ")
}

/// One path segment: `tag[.class…][:nth-of-type(k)]`.
fn segment_for(dom: &Document, element: NodeId) -> String {
    let tag = dom
        .element_name(element)
        .map(|n| n.as_ref().to_string())
        .unwrap_or_default();

    let mut segment = tag.clone();
    for class in dom
        .element_classes(element)
        .iter()
        .filter(|c| is_css_identifier(c))
        .take(MAX_SEGMENT_CLASSES)
    {
        segment.push('.');
        segment.push_str(class);
    }

    if let Some(parent) = dom.parent(element) {
        let same_tag: Vec<NodeId> = dom
            .children(parent)
            .filter(|&c| dom.is_element(c) && dom.is_tag(c, &tag))
            .collect();
        if same_tag.len() > 1 {
            let position = same_tag.iter().position(|&c| c == element).unwrap_or(0) + 1;
            segment.push_str(&format!(":nth-of-type({position})"));
        }
    }

    segment
}

/// Walk up from a non-element node (text, comment) to its owning element.
fn nearest_element(dom: &Document, node: NodeId) -> Option<NodeId> {
    if dom.is_element(node) {
        return Some(node);
    }
    dom.ancestors(node).find(|&a| dom.is_element(a))
}

/// Only idents that survive a CSS parser round-trip are worth emitting.
fn is_css_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn escape_attr_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
