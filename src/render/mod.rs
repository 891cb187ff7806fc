//! Filtered tree → readable text.
//!
//! Pure rendering logic that compresses a page into one text block. Tags
//! with no rendered content vanish entirely, which is what makes the output
//! compact: empty wrappers, hidden subtrees, and noise tags all collapse to
//! nothing. No I/O happens here.

mod tags;

pub use tags::{TagFormat, format_for};

use crate::dom::{Document, NodeId};
use crate::extract::{LabelIndex, NoiseFilter, resolve_label, visible_text};
use crate::util::{collapse_whitespace, resolve_url};

/// Render the document body to a single readable text block.
pub fn render_content(
    dom: &Document,
    base_url: &str,
    filter: &NoiseFilter,
    labels: &LabelIndex,
) -> String {
    let Some(body) = dom.body() else {
        return String::new();
    };
    cleanup(&render_node(dom, base_url, filter, labels, body))
}

/// Post-order recursive render of one node.
fn render_node(
    dom: &Document,
    base_url: &str,
    filter: &NoiseFilter,
    labels: &LabelIndex,
    node: NodeId,
) -> String {
    if let Some(text) = dom.text_content(node) {
        return collapse_whitespace(text);
    }
    if !dom.is_element(node) || filter.is_excluded(dom, node) {
        return String::new();
    }

    let tag = dom
        .element_name(node)
        .map(|n| n.as_ref().to_string())
        .unwrap_or_default();
    let format = format_for(&tag);

    // Controls render from element state, not child text
    if format == TagFormat::Control {
        return render_control(dom, labels, node, &tag);
    }

    let rendered: Vec<String> = dom
        .children(node)
        .map(|child| render_node(dom, base_url, filter, labels, child))
        .filter(|text| !text.is_empty())
        .collect();
    let text = rendered.join(" ");
    if text.is_empty() {
        return String::new();
    }

    if format == TagFormat::Link {
        return render_link(dom, base_url, node, &text);
    }
    format.apply(&text)
}

// ============================================================================
// Element-Aware Rules
// ============================================================================

/// Bracketed control summaries: `[Input: label = value]`, `[x] label`, etc.
/// Hidden inputs produce nothing.
fn render_control(dom: &Document, labels: &LabelIndex, node: NodeId, tag: &str) -> String {
    match tag {
        "input" => {
            let input_type = dom
                .get_attr(node, "type")
                .map(|t| t.to_ascii_lowercase())
                .unwrap_or_else(|| "text".to_string());
            if input_type == "hidden" {
                return String::new();
            }
            let label = resolve_label(dom, labels, node).unwrap_or_else(|| input_type.clone());
            if input_type == "checkbox" || input_type == "radio" {
                let glyph = if dom.has_attr(node, "checked") { "x" } else { " " };
                return format!("[{glyph}] {label}");
            }
            match dom.get_attr(node, "value").filter(|v| !v.is_empty()) {
                Some(value) => format!("[Input: {label} = {value}]"),
                None => format!("[Input: {label}]"),
            }
        }
        "select" => {
            let label = resolve_label(dom, labels, node).unwrap_or_else(|| tag.to_string());
            let selected = dom
                .descendants(node)
                .skip(1)
                .find(|&option| dom.is_tag(option, "option") && dom.has_attr(option, "selected"))
                .map(|option| visible_text(dom, option))
                .filter(|text| !text.is_empty());
            match selected {
                Some(choice) => format!("[Select: {label} = {choice}]"),
                None => format!("[Select: {label}]"),
            }
        }
        "textarea" => {
            let label = resolve_label(dom, labels, node).unwrap_or_else(|| tag.to_string());
            let value = visible_text(dom, node);
            if value.is_empty() {
                format!("[Textarea: {label}]")
            } else {
                format!("[Textarea: {label} = {value}]")
            }
        }
        // button
        _ => {
            let label = resolve_label(dom, labels, node).unwrap_or_else(|| tag.to_string());
            format!("[Button: {label}]")
        }
    }
}

/// `text (absolute-url)`, except bare fragments which stay text-only.
fn render_link(dom: &Document, base_url: &str, node: NodeId, text: &str) -> String {
    let href = dom.get_attr(node, "href").unwrap_or_default();
    if href.is_empty() || href.starts_with('#') {
        return text.to_string();
    }
    format!("{text} ({})", resolve_url(base_url, href))
}

// ============================================================================
// Cleanup
// ============================================================================

/// Collapse 3+ consecutive newlines to 2 and runs of spaces to one, then
/// trim the ends.
fn cleanup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut newlines = 0usize;
    let mut spaces = 0usize;
    for ch in raw.chars() {
        match ch {
            '\n' => {
                newlines += 1;
                spaces = 0;
                if newlines <= 2 {
                    out.push('\n');
                }
            }
            ' ' => {
                spaces += 1;
                newlines = 0;
                if spaces <= 1 {
                    out.push(' ');
                }
            }
            _ => {
                newlines = 0;
                spaces = 0;
                out.push(ch);
            }
        }
    }
    out.trim().to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::extract::ExtractOptions;

    fn render(html: &str) -> String {
        render_with_base(html, "https://example.com/")
    }

    fn render_with_base(html: &str, base_url: &str) -> String {
        let dom = parse_html(html);
        let options = ExtractOptions::default();
        let filter = NoiseFilter::new(&options);
        let labels = LabelIndex::build(&dom);
        render_content(&dom, base_url, &filter, &labels)
    }

    #[test]
    fn test_heading_and_paragraph() {
        let out = render("<h1>Title</h1><p>Body text.</p>");
        assert_eq!(out, "# Title\n \nBody text.");
    }

    #[test]
    fn test_list_items() {
        let out = render("<ul><li>one</li><li>two</li></ul>");
        assert!(out.contains("- one"));
        assert!(out.contains("- two"));
    }

    #[test]
    fn test_empty_tags_vanish() {
        let out = render("<div></div><span>   </span><p></p><section><div></div></section>");
        assert_eq!(out, "");
    }

    #[test]
    fn test_excluded_subtree_vanishes() {
        let out = render("<div hidden><h1>Ghost</h1></div><p>Real</p>");
        assert_eq!(out, "Real");
    }

    #[test]
    fn test_script_text_never_rendered() {
        let out = render("<p>before</p><script>var secret = 1;</script><p>after</p>");
        assert!(!out.contains("secret"));
    }

    #[test]
    fn test_inline_emphasis() {
        let out = render("<p>This is <em>fine</em> and <strong>bold</strong>.</p>");
        assert_eq!(out, "This is *fine* and **bold** .");
    }

    #[test]
    fn test_link_with_resolved_url() {
        let out = render(r#"<p><a href="/next">Next page</a></p>"#);
        assert!(out.contains("Next page (https://example.com/next)"));
    }

    #[test]
    fn test_fragment_link_stays_text() {
        let out = render(r##"<p><a href="#top">Back to top</a></p>"##);
        assert_eq!(out, "Back to top");
    }

    #[test]
    fn test_hidden_input_suppressed() {
        let out = render(r#"<form><input type="hidden" name="csrf" value="tok"></form>"#);
        assert_eq!(out, "");
        assert!(!out.contains("tok"));
    }

    #[test]
    fn test_text_input_summary() {
        let out = render(r#"<input aria-label="City" value="Lisbon">"#);
        assert_eq!(out, "[Input: City = Lisbon]");
    }

    #[test]
    fn test_unlabeled_input_falls_back_to_type() {
        let out = render(r#"<input type="email">"#);
        assert_eq!(out, "[Input: email]");
    }

    #[test]
    fn test_checkbox_glyphs() {
        let out = render(
            r#"<label>Yes <input type="checkbox" checked></label>
               <label>No <input type="checkbox"></label>"#,
        );
        assert!(out.contains("[x] Yes"));
        assert!(out.contains("[ ] No"));
    }

    #[test]
    fn test_select_shows_selected_option() {
        let out = render(
            r#"<select aria-label="Size"><option>S</option><option selected>M</option></select>"#,
        );
        assert_eq!(out, "[Select: Size = M]");
    }

    #[test]
    fn test_button_summary() {
        let out = render("<button>Place order</button>");
        assert_eq!(out, "[Button: Place order]");
    }

    #[test]
    fn test_table_rendering() {
        let out = render(
            "<table><tr><th>Name</th><th>Qty</th></tr><tr><td>Bolt</td><td>4</td></tr></table>",
        );
        assert!(out.contains("| Name | Qty |"));
        assert!(out.contains("| Bolt | 4 |"));
    }

    #[test]
    fn test_pre_fenced() {
        let out = render("<pre>let x = 1;</pre>");
        assert_eq!(out, "```\nlet x = 1;\n```");
    }

    #[test]
    fn test_cleanup_collapses_newlines() {
        assert_eq!(cleanup("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(cleanup("a    b"), "a b");
        assert_eq!(cleanup("  x  "), "x");
    }

    #[test]
    fn test_no_body_renders_empty() {
        let dom = crate::dom::Document::new();
        let options = ExtractOptions::default();
        let filter = NoiseFilter::new(&options);
        let labels = LabelIndex::build(&dom);
        assert_eq!(render_content(&dom, "", &filter, &labels), "");
    }
}
