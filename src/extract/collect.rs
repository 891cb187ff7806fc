//! Element inventory collection.
//!
//! One pre-order pass over the filtered tree gathers four parallel
//! inventories: section headings/landmarks, labeled interactive controls,
//! forms with their visible fields, and links that appear inside running
//! text. Excluded subtrees are pruned at the walk, so nothing inside them
//! can reach any inventory.

use std::collections::BTreeMap;

use crate::context::{
    ControlKind, FieldEntry, FormEntry, InlineLinkEntry, InputControl, InteractiveEntry,
    LinkControl, SectionEntry, SelectControl, SelectOption, TextareaControl,
};
use crate::dom::{Document, NodeId};
use crate::util::{resolve_url, truncate_chars};

use super::filter::NoiseFilter;
use super::label::{LabelIndex, resolve_label};
use super::selector::resolve_selector;
use super::visible_text;

// ============================================================================
// Classification Tables
// ============================================================================

const SECTION_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "main", "article", "section", "header",
];

const LANDMARK_ROLES: &[&str] = &[
    "banner", "navigation", "main", "region", "contentinfo", "search",
];

const INTERACTIVE_TAGS: &[&str] = &["button", "textarea", "select", "summary"];

const INTERACTIVE_ROLES: &[&str] = &[
    "button", "link", "tab", "menuitem", "checkbox", "radio", "switch", "textbox", "searchbox",
    "combobox", "listbox", "option", "slider", "spinbutton",
];

const FIELD_TAGS: &[&str] = &["input", "textarea", "select", "button"];

/// Parents whose anchors count as part of running text.
const LINK_PARENT_TAGS: &[&str] = &[
    "p", "li", "td", "th", "span", "div", "article", "section", "blockquote", "dd", "dt",
];

/// Attributes surfaced through dedicated fields, never repeated in `extra`.
const IDENTITY_ATTRS: &[&str] = &["id", "class", "style", "role", "name"];

const SECTION_TEXT_CAP: usize = 120;
const LINK_TEXT_CAP: usize = 120;
const SNIPPET_CAP: usize = 200;

// ============================================================================
// Public Types
// ============================================================================

/// The four parallel inventories produced by one collection pass.
#[derive(Debug, Default)]
pub struct Inventories {
    pub sections: Vec<SectionEntry>,
    pub interactive: Vec<InteractiveEntry>,
    pub forms: Vec<FormEntry>,
    pub inline_links: Vec<InlineLinkEntry>,
}

/// Collect all inventories from the tree under `body`, in document order.
///
/// Relative hrefs are resolved against `base_url`; a failed resolution keeps
/// the original string rather than failing the collection.
pub fn collect_elements(
    dom: &Document,
    base_url: &str,
    filter: &NoiseFilter,
    labels: &LabelIndex,
) -> Inventories {
    let mut inventories = Inventories::default();
    let root = dom.body().unwrap_or_else(|| dom.document());

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if dom.is_element(node) && node != root {
            if filter.is_excluded(dom, node) {
                continue;
            }
            visit_element(dom, base_url, filter, labels, node, &mut inventories);
        }
        push_children(dom, node, &mut stack);
    }

    inventories
}

// ============================================================================
// Collection Pass
// ============================================================================

fn visit_element(
    dom: &Document,
    base_url: &str,
    filter: &NoiseFilter,
    labels: &LabelIndex,
    node: NodeId,
    inventories: &mut Inventories,
) {
    if is_section_like(dom, node) {
        let text = visible_text(dom, node);
        if !text.is_empty() {
            inventories.sections.push(SectionEntry {
                tag: tag_of(dom, node),
                text: truncate_chars(&text, SECTION_TEXT_CAP).to_string(),
                selector: resolve_selector(dom, node),
                id: attr_of(dom, node, "id"),
                classes: dom.element_classes(node).to_vec(),
                role: attr_of(dom, node, "role"),
            });
        }
    }

    if is_interactive(dom, node) {
        if let Some(label) = resolve_label(dom, labels, node) {
            inventories
                .interactive
                .push(build_interactive(dom, base_url, node, label));
        }
    }

    if dom.is_tag(node, "form") {
        inventories.forms.push(FormEntry {
            selector: resolve_selector(dom, node),
            id: attr_of(dom, node, "id"),
            name: attr_of(dom, node, "name"),
            classes: dom.element_classes(node).to_vec(),
            action: attr_of(dom, node, "action"),
            method: attr_of(dom, node, "method")
                .map(|m| m.to_ascii_lowercase())
                .unwrap_or_else(|| "get".to_string()),
            fields: collect_fields(dom, filter, labels, node),
        });
    }

    if dom.is_tag(node, "a") && dom.has_attr(node, "href") {
        let text = visible_text(dom, node);
        if !text.is_empty() && has_text_parent(dom, node) {
            let parent_text = dom
                .parent(node)
                .map(|p| visible_text(dom, p))
                .unwrap_or_default();
            inventories.inline_links.push(InlineLinkEntry {
                text: truncate_chars(&text, LINK_TEXT_CAP).to_string(),
                href: resolve_url(base_url, dom.get_attr(node, "href").unwrap_or_default()),
                selector: resolve_selector(dom, node),
                id: attr_of(dom, node, "id"),
                classes: dom.element_classes(node).to_vec(),
                snippet: truncate_chars(&parent_text, SNIPPET_CAP).to_string(),
            });
        }
    }
}

/// Form fields: every control descendant except hidden-type inputs, with
/// excluded subtrees pruned the same way as the main pass.
fn collect_fields(
    dom: &Document,
    filter: &NoiseFilter,
    labels: &LabelIndex,
    form: NodeId,
) -> Vec<FieldEntry> {
    let mut fields = Vec::new();
    let mut stack = Vec::new();
    push_children(dom, form, &mut stack);

    while let Some(node) = stack.pop() {
        if dom.is_element(node) {
            if filter.is_excluded(dom, node) {
                continue;
            }
            let tag = tag_of(dom, node);
            if FIELD_TAGS.contains(&tag.as_str()) {
                let field_type = attr_of(dom, node, "type").map(|t| t.to_ascii_lowercase());
                let hidden = tag == "input" && field_type.as_deref() == Some("hidden");
                if !hidden {
                    fields.push(FieldEntry {
                        tag,
                        field_type,
                        name: attr_of(dom, node, "name"),
                        label: resolve_label(dom, labels, node),
                        selector: resolve_selector(dom, node),
                        required: dom.has_attr(node, "required"),
                    });
                }
            }
        }
        push_children(dom, node, &mut stack);
    }

    fields
}

fn push_children(dom: &Document, node: NodeId, stack: &mut Vec<NodeId>) {
    let children: Vec<NodeId> = dom.children(node).collect();
    for &child in children.iter().rev() {
        stack.push(child);
    }
}

// ============================================================================
// Classification
// ============================================================================

fn is_section_like(dom: &Document, node: NodeId) -> bool {
    let tag = tag_of(dom, node);
    if SECTION_TAGS.contains(&tag.as_str()) {
        return true;
    }
    dom.get_attr(node, "role")
        .is_some_and(|role| LANDMARK_ROLES.contains(&role))
}

fn is_interactive(dom: &Document, node: NodeId) -> bool {
    let tag = tag_of(dom, node);
    if INTERACTIVE_TAGS.contains(&tag.as_str()) {
        return true;
    }
    if tag == "a" && dom.has_attr(node, "href") {
        return true;
    }
    if tag == "input" {
        let input_type = dom
            .get_attr(node, "type")
            .map(|t| t.to_ascii_lowercase());
        return input_type.as_deref() != Some("hidden");
    }
    if let Some(role) = dom.get_attr(node, "role") {
        if INTERACTIVE_ROLES.contains(&role) {
            return true;
        }
    }
    dom.has_attr(node, "onclick")
        || dom.has_attr(node, "tabindex")
        || dom.has_attr(node, "contenteditable")
}

fn has_text_parent(dom: &Document, node: NodeId) -> bool {
    dom.parent(node)
        .is_some_and(|p| LINK_PARENT_TAGS.contains(&tag_of(dom, p).as_str()))
}

// ============================================================================
// State Capture
// ============================================================================

fn build_interactive(
    dom: &Document,
    base_url: &str,
    node: NodeId,
    label: String,
) -> InteractiveEntry {
    let control = control_kind(dom, base_url, node);
    let (aria, data, extra) = attribute_maps(dom, node, consumed_attrs(&control));

    InteractiveEntry {
        tag: tag_of(dom, node),
        label,
        selector: resolve_selector(dom, node),
        id: attr_of(dom, node, "id"),
        name: attr_of(dom, node, "name"),
        classes: dom.element_classes(node).to_vec(),
        role: attr_of(dom, node, "role"),
        control,
        aria,
        data,
        extra,
    }
}

fn control_kind(dom: &Document, base_url: &str, node: NodeId) -> ControlKind {
    match tag_of(dom, node).as_str() {
        "button" => ControlKind::Button {
            button_type: attr_of(dom, node, "type").map(|t| t.to_ascii_lowercase()),
            value: attr_of(dom, node, "value"),
            disabled: dom.has_attr(node, "disabled"),
        },
        "input" => {
            let input_type = attr_of(dom, node, "type")
                .map(|t| t.to_ascii_lowercase())
                .unwrap_or_else(|| "text".to_string());
            let toggle = input_type == "checkbox" || input_type == "radio";
            ControlKind::Input(InputControl {
                checked: toggle.then(|| dom.has_attr(node, "checked")),
                input_type,
                placeholder: attr_of(dom, node, "placeholder"),
                value: attr_of(dom, node, "value"),
                required: dom.has_attr(node, "required"),
                disabled: dom.has_attr(node, "disabled"),
                readonly: dom.has_attr(node, "readonly"),
                min: attr_of(dom, node, "min"),
                max: attr_of(dom, node, "max"),
                step: attr_of(dom, node, "step"),
                pattern: attr_of(dom, node, "pattern"),
                maxlength: attr_of(dom, node, "maxlength"),
                autocomplete: attr_of(dom, node, "autocomplete"),
            })
        }
        "select" => ControlKind::Select(SelectControl {
            multiple: dom.has_attr(node, "multiple"),
            disabled: dom.has_attr(node, "disabled"),
            required: dom.has_attr(node, "required"),
            options: collect_options(dom, node),
        }),
        "textarea" => ControlKind::Textarea(TextareaControl {
            placeholder: attr_of(dom, node, "placeholder"),
            value: Some(visible_text(dom, node)).filter(|v| !v.is_empty()),
            required: dom.has_attr(node, "required"),
            disabled: dom.has_attr(node, "disabled"),
            readonly: dom.has_attr(node, "readonly"),
            rows: attr_of(dom, node, "rows"),
        }),
        "a" if dom.has_attr(node, "href") => ControlKind::Link(LinkControl {
            href: resolve_url(base_url, dom.get_attr(node, "href").unwrap_or_default()),
            target: attr_of(dom, node, "target"),
            rel: attr_of(dom, node, "rel"),
            download: attr_of(dom, node, "download"),
        }),
        _ => ControlKind::Widget,
    }
}

fn collect_options(dom: &Document, select: NodeId) -> Vec<SelectOption> {
    dom.descendants(select)
        .skip(1)
        .filter(|&n| dom.is_tag(n, "option"))
        .map(|option| {
            let text = visible_text(dom, option);
            SelectOption {
                value: attr_of(dom, option, "value").unwrap_or_else(|| text.clone()),
                text,
                selected: dom.has_attr(option, "selected"),
                disabled: dom.has_attr(option, "disabled"),
            }
        })
        .collect()
}

/// Split the raw attribute list into the aria/data side maps and the
/// remaining `extra` map, skipping identity attributes and everything the
/// control kind already captured.
fn attribute_maps(
    dom: &Document,
    node: NodeId,
    consumed: &[&str],
) -> (
    BTreeMap<String, String>,
    BTreeMap<String, String>,
    BTreeMap<String, String>,
) {
    let mut aria = BTreeMap::new();
    let mut data = BTreeMap::new();
    let mut extra = BTreeMap::new();

    for attr in dom.element_attrs(node) {
        let key = attr.name.local.as_ref();
        if key.starts_with("aria-") {
            aria.insert(key.to_string(), attr.value.clone());
        } else if key.starts_with("data-") {
            data.insert(key.to_string(), attr.value.clone());
        } else if !IDENTITY_ATTRS.contains(&key) && !consumed.contains(&key) {
            extra.insert(key.to_string(), attr.value.clone());
        }
    }

    (aria, data, extra)
}

fn consumed_attrs(control: &ControlKind) -> &'static [&'static str] {
    match control {
        ControlKind::Button { .. } => &["type", "value", "disabled"],
        ControlKind::Input(_) => &[
            "type",
            "placeholder",
            "value",
            "checked",
            "required",
            "disabled",
            "readonly",
            "min",
            "max",
            "step",
            "pattern",
            "maxlength",
            "autocomplete",
        ],
        ControlKind::Select(_) => &["multiple", "disabled", "required"],
        ControlKind::Textarea(_) => &["placeholder", "required", "disabled", "readonly", "rows"],
        ControlKind::Link(_) => &["href", "target", "rel", "download"],
        ControlKind::Widget => &[],
    }
}

fn tag_of(dom: &Document, node: NodeId) -> String {
    dom.element_name(node)
        .map(|n| n.as_ref().to_string())
        .unwrap_or_default()
}

fn attr_of(dom: &Document, node: NodeId, name: &str) -> Option<String> {
    dom.get_attr(node, name)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::extract::ExtractOptions;

    fn collect(html: &str) -> Inventories {
        collect_with_base(html, "https://example.com/page")
    }

    fn collect_with_base(html: &str, base_url: &str) -> Inventories {
        let dom = parse_html(html);
        let options = ExtractOptions::default();
        let filter = NoiseFilter::new(&options);
        let labels = LabelIndex::build(&dom);
        collect_elements(&dom, base_url, &filter, &labels)
    }

    #[test]
    fn test_sections_from_headings_and_landmarks() {
        let inv = collect(
            r#"<h1>Store</h1><nav role="navigation">Browse</nav><h5>Not collected</h5>"#,
        );
        assert_eq!(inv.sections.len(), 2);
        assert_eq!(inv.sections[0].tag, "h1");
        assert_eq!(inv.sections[0].text, "Store");
        assert_eq!(inv.sections[1].tag, "nav");
        assert_eq!(inv.sections[1].role.as_deref(), Some("navigation"));
    }

    #[test]
    fn test_empty_heading_skipped() {
        let inv = collect("<h2>   </h2><h2>Real</h2>");
        assert_eq!(inv.sections.len(), 1);
        assert_eq!(inv.sections[0].text, "Real");
    }

    #[test]
    fn test_labeled_button_collected() {
        let inv = collect("<button>Add to cart</button>");
        assert_eq!(inv.interactive.len(), 1);
        let entry = &inv.interactive[0];
        assert_eq!(entry.tag, "button");
        assert_eq!(entry.label, "Add to cart");
        assert!(matches!(entry.control, ControlKind::Button { .. }));
    }

    #[test]
    fn test_unlabeled_control_skipped() {
        let inv = collect(r#"<input type="text">"#);
        assert!(inv.interactive.is_empty());
    }

    #[test]
    fn test_hidden_input_not_interactive() {
        let inv = collect(r#"<input type="hidden" name="csrf" value="x">"#);
        assert!(inv.interactive.is_empty());
    }

    #[test]
    fn test_checkbox_always_has_checked_state() {
        let inv = collect(
            r#"<label>On <input type="checkbox" checked></label>
               <label>Off <input type="radio"></label>"#,
        );
        assert_eq!(inv.interactive.len(), 2);
        for entry in &inv.interactive {
            let ControlKind::Input(input) = &entry.control else {
                panic!("expected input control");
            };
            assert!(input.checked.is_some());
        }
        let ControlKind::Input(first) = &inv.interactive[0].control else {
            unreachable!()
        };
        assert_eq!(first.checked, Some(true));
    }

    #[test]
    fn test_select_options() {
        let inv = collect(
            r#"<select aria-label="Size">
                 <option value="a">A</option>
                 <option value="b" selected>B</option>
               </select>"#,
        );
        let ControlKind::Select(select) = &inv.interactive[0].control else {
            panic!("expected select control");
        };
        assert_eq!(select.options.len(), 2);
        assert!(!select.options[0].selected);
        assert!(select.options[1].selected);
        assert!(select.options.iter().all(|o| !o.disabled));
        assert_eq!(select.options[1].value, "b");
        assert_eq!(select.options[1].text, "B");
    }

    #[test]
    fn test_option_value_falls_back_to_text() {
        let inv = collect(r#"<select aria-label="Color"><option>Red</option></select>"#);
        let ControlKind::Select(select) = &inv.interactive[0].control else {
            panic!("expected select control");
        };
        assert_eq!(select.options[0].value, "Red");
    }

    #[test]
    fn test_role_widget_collected() {
        let inv = collect(r#"<div role="button" aria-label="Open menu"></div>"#);
        assert_eq!(inv.interactive.len(), 1);
        assert_eq!(inv.interactive[0].control, ControlKind::Widget);
        assert_eq!(inv.interactive[0].role.as_deref(), Some("button"));
    }

    #[test]
    fn test_form_fields_exclude_hidden() {
        let inv = collect(
            r#"<form action="/search" method="POST">
                 <input type="hidden" name="csrf" value="x">
                 <input type="text" name="q" placeholder="Search">
               </form>"#,
        );
        assert_eq!(inv.forms.len(), 1);
        let form = &inv.forms[0];
        assert_eq!(form.action.as_deref(), Some("/search"));
        assert_eq!(form.method, "post");
        assert_eq!(form.fields.len(), 1);
        assert_eq!(form.fields[0].name.as_deref(), Some("q"));
    }

    #[test]
    fn test_form_method_defaults_to_get() {
        let inv = collect(r#"<form><input type="text" name="a"></form>"#);
        assert_eq!(inv.forms[0].method, "get");
        assert!(inv.forms[0].action.is_none());
    }

    #[test]
    fn test_inline_link_with_snippet() {
        let inv = collect(
            r#"<p>Read our <a href="/terms">terms of service</a> before signup.</p>"#,
        );
        assert_eq!(inv.inline_links.len(), 1);
        let link = &inv.inline_links[0];
        assert_eq!(link.text, "terms of service");
        assert_eq!(link.href, "https://example.com/terms");
        assert_eq!(link.snippet, "Read our terms of service before signup.");
    }

    #[test]
    fn test_link_outside_text_parent_not_inline() {
        let inv = collect(r#"<nav><a href="/home">Home</a></nav>"#);
        assert!(inv.inline_links.is_empty());
        // Still interactive
        assert_eq!(inv.interactive.len(), 1);
    }

    #[test]
    fn test_unresolvable_base_keeps_href() {
        let inv = collect_with_base(r#"<p><a href="/a">go</a></p>"#, "");
        assert_eq!(inv.inline_links[0].href, "/a");
    }

    #[test]
    fn test_excluded_subtree_reaches_no_inventory() {
        let inv = collect(
            r#"<div hidden>
                 <h1>Ghost</h1>
                 <button>Ghost button</button>
                 <form><input type="text" name="g"></form>
                 <p><a href="/g">ghost link</a></p>
               </div>
               <h1>Visible</h1>"#,
        );
        assert_eq!(inv.sections.len(), 1);
        assert_eq!(inv.sections[0].text, "Visible");
        assert!(inv.interactive.is_empty());
        assert!(inv.forms.is_empty());
        assert!(inv.inline_links.is_empty());
    }

    #[test]
    fn test_aria_data_extra_maps() {
        let inv = collect(
            r#"<button aria-label="Save" aria-pressed="false" data-action="save" rel="nofollow">x</button>"#,
        );
        let entry = &inv.interactive[0];
        assert_eq!(entry.aria.get("aria-label").map(String::as_str), Some("Save"));
        assert_eq!(
            entry.aria.get("aria-pressed").map(String::as_str),
            Some("false")
        );
        assert_eq!(
            entry.data.get("data-action").map(String::as_str),
            Some("save")
        );
        assert_eq!(entry.extra.get("rel").map(String::as_str), Some("nofollow"));
    }

    #[test]
    fn test_document_order() {
        let inv = collect("<h2>First</h2><h2>Second</h2><h2>Third</h2>");
        let texts: Vec<&str> = inv.sections.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }
}
