//! Context → ordered text document.
//!
//! Assembles the rendered content and the four inventories into one
//! fixed-order document with underlined section headers. A second,
//! presentation-level filter runs here: it only affects what is shown,
//! never what was collected. Formatting is deterministic; the same context
//! and options always produce byte-identical output.

use std::collections::HashSet;
use std::fmt::Write;

use super::{ControlKind, FormEntry, InlineLinkEntry, InteractiveEntry, PageContext, SectionEntry};

/// Roles that still count as a real control on a span.
const BUTTON_LIKE_ROLES: &[&str] = &[
    "button", "link", "tab", "menuitem", "checkbox", "radio", "switch",
];

/// Options recognized by the formatter.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// When false, URL/href/target/rel/download fields are suppressed
    /// throughout. Used when the output goes to a remote service that
    /// should not act on raw navigation targets.
    pub include_links: bool,
    /// Entries whose selector still references one of these markers are
    /// dropped from the visual output.
    pub reserved_markers: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_links: true,
            reserved_markers: Vec::new(),
        }
    }
}

/// Format a page context as an ordered text document.
///
/// Section order is fixed: page header, rendered content, sections,
/// interactive elements, inline links, forms. Every block except the header
/// is omitted entirely when empty.
pub fn format_context(context: &PageContext, options: &FormatOptions) -> String {
    let mut blocks = Vec::new();

    let mut head = header("PAGE CONTEXT", '=');
    if options.include_links {
        let _ = write!(head, "\nURL: {}", context.url);
    }
    let _ = write!(head, "\nTitle: {}", context.title);
    blocks.push(head);

    if !context.content.is_empty() {
        blocks.push(format!(
            "{}\n{}",
            header("PAGE CONTENT", '-'),
            context.content
        ));
    }

    let sections: Vec<String> = context
        .sections
        .iter()
        .filter(|section| keep_section(section, options))
        .map(format_section)
        .collect();
    if !sections.is_empty() {
        blocks.push(format!(
            "{}\n{}",
            header("PAGE SECTIONS", '-'),
            sections.join("\n")
        ));
    }

    let visible: Vec<&InteractiveEntry> = context
        .interactive
        .iter()
        .filter(|entry| keep_interactive(entry, options))
        .collect();
    let shown: HashSet<&str> = visible.iter().map(|entry| entry.selector.as_str()).collect();
    if !visible.is_empty() {
        let lines: Vec<String> = visible
            .iter()
            .map(|entry| format_interactive(entry, options))
            .collect();
        blocks.push(format!(
            "{}\n{}",
            header("INTERACTIVE ELEMENTS", '-'),
            lines.join("\n")
        ));
    }

    let links: Vec<String> = context
        .inline_links
        .iter()
        .filter(|link| {
            !shown.contains(link.selector.as_str())
                && !selector_reserved(&link.selector, options)
        })
        .map(|link| format_inline_link(link, options))
        .collect();
    if !links.is_empty() {
        blocks.push(format!(
            "{}\n{}",
            header("INLINE LINKS", '-'),
            links.join("\n\n")
        ));
    }

    let forms: Vec<String> = context
        .forms
        .iter()
        .filter(|form| !selector_reserved(&form.selector, options))
        .map(format_form)
        .collect();
    if !forms.is_empty() {
        blocks.push(format!("{}\n{}", header("FORMS", '-'), forms.join("\n\n")));
    }

    blocks.join("\n\n")
}

fn header(title: &str, underline: char) -> String {
    format!("{title}\n{}", underline.to_string().repeat(title.len()))
}

// ============================================================================
// Presentation Filter
// ============================================================================

fn keep_section(section: &SectionEntry, options: &FormatOptions) -> bool {
    !is_presentational(section.role.as_deref()) && !selector_reserved(&section.selector, options)
}

fn keep_interactive(entry: &InteractiveEntry, options: &FormatOptions) -> bool {
    if is_presentational(entry.role.as_deref()) {
        return false;
    }
    if is_noise_label(&entry.label) {
        return false;
    }
    if entry.tag == "span" && !has_button_like_role(entry.role.as_deref()) {
        return false;
    }
    !selector_reserved(&entry.selector, options)
}

fn is_presentational(role: Option<&str>) -> bool {
    matches!(role, Some("presentation") | Some("none"))
}

/// Lone digits and whitespace are pagination debris, not labels.
fn is_noise_label(label: &str) -> bool {
    let trimmed = label.trim();
    trimmed.is_empty()
        || (trimmed.chars().count() == 1
            && trimmed.chars().next().is_some_and(|c| c.is_ascii_digit()))
}

fn has_button_like_role(role: Option<&str>) -> bool {
    role.is_some_and(|r| BUTTON_LIKE_ROLES.contains(&r))
}

fn selector_reserved(selector: &str, options: &FormatOptions) -> bool {
    options
        .reserved_markers
        .iter()
        .any(|marker| selector.contains(marker))
}

// ============================================================================
// Entry Rendering
// ============================================================================

fn format_section(section: &SectionEntry) -> String {
    format!(
        "[{}] \"{}\" → {}",
        section.tag, section.text, section.selector
    )
}

/// One interactive entry: a head line plus indented fields in fixed order.
///
/// The order (identity, link targets, state, maps, leftover attributes,
/// options last) is part of the output contract; golden-output diffing
/// depends on it.
fn format_interactive(entry: &InteractiveEntry, options: &FormatOptions) -> String {
    let suffix = kind_suffix(entry)
        .map(|kind| format!("[{kind}]"))
        .unwrap_or_default();
    let mut out = format!(
        "[{}{suffix}] \"{}\" → {}",
        entry.tag, entry.label, entry.selector
    );

    for (key, value) in entry_fields(entry, options) {
        let _ = write!(out, "\n  {key}: {value}");
    }
    out
}

/// Head-line kind marker: the input/button type when known, else the role.
fn kind_suffix(entry: &InteractiveEntry) -> Option<String> {
    match &entry.control {
        ControlKind::Input(input) => Some(input.input_type.clone()),
        ControlKind::Button {
            button_type: Some(button_type),
            ..
        } => Some(button_type.clone()),
        _ => entry.role.clone(),
    }
}

fn entry_fields(entry: &InteractiveEntry, options: &FormatOptions) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut push = |key: &str, value: String| fields.push((key.to_string(), value));

    if let Some(id) = &entry.id {
        push("id", id.clone());
    }
    if let Some(name) = &entry.name {
        push("name", name.clone());
    }
    if !entry.classes.is_empty() {
        push("classes", entry.classes.join(" "));
    }

    if options.include_links {
        if let ControlKind::Link(link) = &entry.control {
            push("href", link.href.clone());
            if let Some(target) = &link.target {
                push("target", target.clone());
            }
            if let Some(rel) = &link.rel {
                push("rel", rel.clone());
            }
            if let Some(download) = &link.download {
                push("download", download.clone());
            }
        }
    }

    match &entry.control {
        ControlKind::Button {
            value, disabled, ..
        } => {
            if let Some(value) = value {
                push("value", value.clone());
            }
            if *disabled {
                push("disabled", "true".to_string());
            }
        }
        ControlKind::Input(input) => {
            if let Some(placeholder) = &input.placeholder {
                push("placeholder", placeholder.clone());
            }
            if let Some(value) = &input.value {
                push("value", value.clone());
            }
            if let Some(checked) = input.checked {
                push("checked", checked.to_string());
            }
            if input.required {
                push("required", "true".to_string());
            }
            if input.disabled {
                push("disabled", "true".to_string());
            }
            if input.readonly {
                push("readonly", "true".to_string());
            }
            if let Some(min) = &input.min {
                push("min", min.clone());
            }
            if let Some(max) = &input.max {
                push("max", max.clone());
            }
            if let Some(step) = &input.step {
                push("step", step.clone());
            }
            if let Some(pattern) = &input.pattern {
                push("pattern", pattern.clone());
            }
            if let Some(maxlength) = &input.maxlength {
                push("maxlength", maxlength.clone());
            }
            if let Some(autocomplete) = &input.autocomplete {
                push("autocomplete", autocomplete.clone());
            }
        }
        ControlKind::Select(select) => {
            if select.required {
                push("required", "true".to_string());
            }
            if select.disabled {
                push("disabled", "true".to_string());
            }
            if select.multiple {
                push("multiple", "true".to_string());
            }
        }
        ControlKind::Textarea(textarea) => {
            if let Some(placeholder) = &textarea.placeholder {
                push("placeholder", placeholder.clone());
            }
            if let Some(value) = &textarea.value {
                push("value", value.clone());
            }
            if textarea.required {
                push("required", "true".to_string());
            }
            if textarea.disabled {
                push("disabled", "true".to_string());
            }
            if textarea.readonly {
                push("readonly", "true".to_string());
            }
            if let Some(rows) = &textarea.rows {
                push("rows", rows.clone());
            }
        }
        ControlKind::Link(_) | ControlKind::Widget => {}
    }

    if let Some(form) = entry.extra.get("form") {
        push("form", form.clone());
    }
    for (key, value) in &entry.aria {
        push(key, value.clone());
    }
    for (key, value) in &entry.data {
        push(key, value.clone());
    }
    for (key, value) in &entry.extra {
        if key == "form" {
            continue;
        }
        if !options.include_links && matches!(key.as_str(), "href" | "target" | "rel" | "download")
        {
            continue;
        }
        push(key, value.clone());
    }

    if let ControlKind::Select(select) = &entry.control {
        if !select.options.is_empty() {
            let rendered: Vec<String> = select
                .options
                .iter()
                .map(|option| {
                    let mut text = format!("\"{}\" ({})", option.text, option.value);
                    if option.selected {
                        text.push_str(" [selected]");
                    }
                    if option.disabled {
                        text.push_str(" [disabled]");
                    }
                    text
                })
                .collect();
            push("options", rendered.join(", "));
        }
    }

    fields
}

fn format_inline_link(link: &InlineLinkEntry, options: &FormatOptions) -> String {
    let head = if options.include_links {
        format!("\"{}\" → {}", link.text, link.href)
    } else {
        format!("\"{}\"", link.text)
    };
    format!(
        "{head}\n  selector: {}\n  context: \"{}\"",
        link.selector, link.snippet
    )
}

fn format_form(form: &FormEntry) -> String {
    let meta = match &form.action {
        Some(action) => format!("(action: {action}, method: {})", form.method),
        None => format!("(method: {})", form.method),
    };
    let mut out = format!("Form → {} {meta}", form.selector);

    for field in &form.fields {
        let type_suffix = field
            .field_type
            .as_ref()
            .map(|field_type| format!("[{field_type}]"))
            .unwrap_or_default();
        let label = field
            .label
            .as_deref()
            .or(field.name.as_deref())
            .unwrap_or("unlabeled");
        let required = if field.required { " (required)" } else { "" };
        let _ = write!(
            out,
            "\n  [{}{type_suffix}] \"{label}\" → {}{required}",
            field.tag, field.selector
        );
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{FieldEntry, InputControl, LinkControl, SelectControl, SelectOption};
    use std::collections::BTreeMap;

    fn empty_context() -> PageContext {
        PageContext {
            url: "https://example.com/".to_string(),
            title: "Test".to_string(),
            content: String::new(),
            sections: Vec::new(),
            interactive: Vec::new(),
            forms: Vec::new(),
            inline_links: Vec::new(),
        }
    }

    fn entry(tag: &str, label: &str, selector: &str, control: ControlKind) -> InteractiveEntry {
        InteractiveEntry {
            tag: tag.to_string(),
            label: label.to_string(),
            selector: selector.to_string(),
            id: None,
            name: None,
            classes: Vec::new(),
            role: None,
            control,
            aria: BTreeMap::new(),
            data: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    fn button(label: &str, selector: &str) -> InteractiveEntry {
        entry(
            "button",
            label,
            selector,
            ControlKind::Button {
                button_type: None,
                value: None,
                disabled: false,
            },
        )
    }

    #[test]
    fn test_header_block_always_present() {
        let out = format_context(&empty_context(), &FormatOptions::default());
        assert_eq!(
            out,
            "PAGE CONTEXT\n============\nURL: https://example.com/\nTitle: Test"
        );
    }

    #[test]
    fn test_empty_blocks_omitted() {
        let out = format_context(&empty_context(), &FormatOptions::default());
        assert!(!out.contains("PAGE SECTIONS"));
        assert!(!out.contains("INTERACTIVE ELEMENTS"));
        assert!(!out.contains("INLINE LINKS"));
        assert!(!out.contains("FORMS"));
    }

    #[test]
    fn test_url_suppressed_without_links() {
        let options = FormatOptions {
            include_links: false,
            ..FormatOptions::default()
        };
        let out = format_context(&empty_context(), &options);
        assert_eq!(out, "PAGE CONTEXT\n============\nTitle: Test");
    }

    #[test]
    fn test_section_line_shape() {
        let mut context = empty_context();
        context.sections.push(SectionEntry {
            tag: "h1".to_string(),
            text: "Welcome".to_string(),
            selector: "h1".to_string(),
            id: None,
            classes: Vec::new(),
            role: None,
        });
        let out = format_context(&context, &FormatOptions::default());
        assert!(out.contains("PAGE SECTIONS\n-------------\n[h1] \"Welcome\" → h1"));
    }

    #[test]
    fn test_interactive_field_order() {
        let mut e = entry(
            "input",
            "Quantity",
            "#qty",
            ControlKind::Input(InputControl {
                input_type: "number".to_string(),
                placeholder: Some("0".to_string()),
                value: Some("2".to_string()),
                checked: None,
                required: true,
                disabled: false,
                readonly: false,
                min: Some("1".to_string()),
                max: Some("9".to_string()),
                step: None,
                pattern: None,
                maxlength: None,
                autocomplete: None,
            }),
        );
        e.id = Some("qty".to_string());
        e.name = Some("quantity".to_string());
        e.aria
            .insert("aria-live".to_string(), "polite".to_string());
        e.data
            .insert("data-sku".to_string(), "B-17".to_string());

        let mut context = empty_context();
        context.interactive.push(e);
        let out = format_context(&context, &FormatOptions::default());

        let expected = "[input[number]] \"Quantity\" → #qty\n  id: qty\n  name: quantity\n  placeholder: 0\n  value: 2\n  required: true\n  min: 1\n  max: 9\n  aria-live: polite\n  data-sku: B-17";
        assert!(out.contains(expected), "got:\n{out}");
    }

    #[test]
    fn test_checkbox_checked_always_shown() {
        let unchecked = entry(
            "input",
            "Subscribe",
            "#sub",
            ControlKind::Input(InputControl {
                input_type: "checkbox".to_string(),
                checked: Some(false),
                ..InputControl::default()
            }),
        );
        let mut context = empty_context();
        context.interactive.push(unchecked);
        let out = format_context(&context, &FormatOptions::default());
        assert!(out.contains("  checked: false"));
    }

    #[test]
    fn test_select_options_last() {
        let select = entry(
            "select",
            "Size",
            "#size",
            ControlKind::Select(SelectControl {
                multiple: false,
                disabled: false,
                required: false,
                options: vec![
                    SelectOption {
                        value: "a".to_string(),
                        text: "A".to_string(),
                        selected: false,
                        disabled: false,
                    },
                    SelectOption {
                        value: "b".to_string(),
                        text: "B".to_string(),
                        selected: true,
                        disabled: false,
                    },
                ],
            }),
        );
        let mut context = empty_context();
        context.interactive.push(select);
        let out = format_context(&context, &FormatOptions::default());
        assert!(out.contains("  options: \"A\" (a), \"B\" (b) [selected]"));
    }

    #[test]
    fn test_link_entry_href_fields() {
        let link = entry(
            "a",
            "Docs",
            "#docs",
            ControlKind::Link(LinkControl {
                href: "https://example.com/docs".to_string(),
                target: Some("_blank".to_string()),
                rel: None,
                download: None,
            }),
        );
        let mut context = empty_context();
        context.interactive.push(link.clone());

        let with = format_context(&context, &FormatOptions::default());
        assert!(with.contains("  href: https://example.com/docs"));
        assert!(with.contains("  target: _blank"));

        let without = format_context(
            &context,
            &FormatOptions {
                include_links: false,
                ..FormatOptions::default()
            },
        );
        assert!(!without.contains("href"));
        assert!(!without.contains("_blank"));
    }

    #[test]
    fn test_lone_digit_label_dropped() {
        let mut context = empty_context();
        context.interactive.push(button("3", "#page-3"));
        context.interactive.push(button("Next", "#next"));
        let out = format_context(&context, &FormatOptions::default());
        assert!(!out.contains("\"3\""));
        assert!(out.contains("\"Next\""));
    }

    #[test]
    fn test_span_without_role_dropped() {
        let mut context = empty_context();
        context.interactive.push(entry(
            "span",
            "decorative",
            "span.x",
            ControlKind::Widget,
        ));
        let mut real = entry("span", "Toggle", "span.y", ControlKind::Widget);
        real.role = Some("button".to_string());
        context.interactive.push(real);

        let out = format_context(&context, &FormatOptions::default());
        assert!(!out.contains("decorative"));
        assert!(out.contains("Toggle"));
    }

    #[test]
    fn test_presentational_section_dropped() {
        let mut context = empty_context();
        context.sections.push(SectionEntry {
            tag: "section".to_string(),
            text: "Chrome".to_string(),
            selector: "section".to_string(),
            id: None,
            classes: Vec::new(),
            role: Some("presentation".to_string()),
        });
        let out = format_context(&context, &FormatOptions::default());
        assert!(!out.contains("PAGE SECTIONS"));
    }

    #[test]
    fn test_reserved_selector_dropped() {
        let mut context = empty_context();
        context.interactive.push(button("Ghost", "#myext-button"));
        let options = FormatOptions {
            reserved_markers: vec!["myext".to_string()],
            ..FormatOptions::default()
        };
        let out = format_context(&context, &options);
        assert!(!out.contains("Ghost"));
    }

    #[test]
    fn test_inline_link_deduplicated() {
        let mut context = empty_context();
        context.interactive.push(entry(
            "a",
            "Pricing",
            "#pricing-link",
            ControlKind::Link(LinkControl {
                href: "https://example.com/pricing".to_string(),
                ..LinkControl::default()
            }),
        ));
        context.inline_links.push(InlineLinkEntry {
            text: "Pricing".to_string(),
            href: "https://example.com/pricing".to_string(),
            selector: "#pricing-link".to_string(),
            id: Some("pricing-link".to_string()),
            classes: Vec::new(),
            snippet: "See our Pricing page.".to_string(),
        });
        let out = format_context(&context, &FormatOptions::default());
        assert!(!out.contains("INLINE LINKS"));
    }

    #[test]
    fn test_inline_link_shape() {
        let mut context = empty_context();
        context.inline_links.push(InlineLinkEntry {
            text: "terms".to_string(),
            href: "https://example.com/terms".to_string(),
            selector: "p > a".to_string(),
            id: None,
            classes: Vec::new(),
            snippet: "Read the terms first.".to_string(),
        });
        let out = format_context(&context, &FormatOptions::default());
        assert!(out.contains(
            "\"terms\" → https://example.com/terms\n  selector: p > a\n  context: \"Read the terms first.\""
        ));
    }

    #[test]
    fn test_form_shape() {
        let mut context = empty_context();
        context.forms.push(FormEntry {
            selector: "#search".to_string(),
            id: Some("search".to_string()),
            name: None,
            classes: Vec::new(),
            action: Some("/find".to_string()),
            method: "get".to_string(),
            fields: vec![FieldEntry {
                tag: "input".to_string(),
                field_type: Some("text".to_string()),
                name: Some("q".to_string()),
                label: None,
                selector: "[name=\"q\"]".to_string(),
                required: true,
            }],
        });
        let out = format_context(&context, &FormatOptions::default());
        assert!(out.contains(
            "Form → #search (action: /find, method: get)\n  [input[text]] \"q\" → [name=\"q\"] (required)"
        ));
    }

    #[test]
    fn test_form_without_action() {
        let mut context = empty_context();
        context.forms.push(FormEntry {
            selector: "form".to_string(),
            id: None,
            name: None,
            classes: Vec::new(),
            action: None,
            method: "get".to_string(),
            fields: Vec::new(),
        });
        let out = format_context(&context, &FormatOptions::default());
        assert!(out.contains("Form → form (method: get)"));
    }

    #[test]
    fn test_idempotent() {
        let mut context = empty_context();
        context.interactive.push(button("Go", "#go"));
        let options = FormatOptions::default();
        assert_eq!(
            format_context(&context, &options),
            format_context(&context, &options)
        );
    }
}
