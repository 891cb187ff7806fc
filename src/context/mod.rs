//! Structured page context model.
//!
//! This module contains:
//! - The extraction result (`PageContext`) and its inventories
//! - Per-kind control state (`ControlKind` and friends)
//! - The text formatter that turns a context into one ordered document
//! - Payload assembly for the command service wire shape

mod format;
mod payload;

pub use format::{FormatOptions, format_context};
pub use payload::{CommandPayload, PayloadConfig, assemble_payload};

use std::collections::BTreeMap;

// ============================================================================
// Page Context
// ============================================================================

/// Everything extracted from a single page.
///
/// Built fresh on every extraction call and owned by the caller; nothing in
/// the pipeline caches or mutates one after construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct PageContext {
    pub url: String,
    pub title: String,
    /// Rendered readable text of the whole page.
    pub content: String,
    pub sections: Vec<SectionEntry>,
    pub interactive: Vec<InteractiveEntry>,
    pub forms: Vec<FormEntry>,
    pub inline_links: Vec<InlineLinkEntry>,
}

/// A heading or landmark element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct SectionEntry {
    pub tag: String,
    /// Visible text, capped at 120 characters.
    pub text: String,
    pub selector: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub classes: Vec<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub role: Option<String>,
}

// ============================================================================
// Interactive Elements
// ============================================================================

/// An interactive control that resolved a non-empty label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct InteractiveEntry {
    pub tag: String,
    pub label: String,
    pub selector: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub classes: Vec<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub role: Option<String>,
    pub control: ControlKind,
    /// All `aria-*` attributes, verbatim.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    pub aria: BTreeMap<String, String>,
    /// All `data-*` attributes, verbatim.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    pub data: BTreeMap<String, String>,
    /// Remaining attributes not captured elsewhere.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    pub extra: BTreeMap<String, String>,
}

/// Kind-specific state for an interactive element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ControlKind {
    Button {
        #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
        button_type: Option<String>,
        #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
        value: Option<String>,
        disabled: bool,
    },
    Input(InputControl),
    Select(SelectControl),
    Textarea(TextareaControl),
    Link(LinkControl),
    /// Role/handler-only elements: interactive ARIA roles, click handlers,
    /// tab stops, editable regions.
    Widget,
}

/// State captured from an `<input>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct InputControl {
    /// The `type` attribute, defaulting to `text`.
    pub input_type: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub placeholder: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    /// Always `Some` for checkbox/radio, `None` for every other type.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub checked: Option<bool>,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub min: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub max: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub step: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub pattern: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub maxlength: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub autocomplete: Option<String>,
}

/// State captured from a `<select>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct SelectControl {
    pub multiple: bool,
    pub disabled: bool,
    pub required: bool,
    pub options: Vec<SelectOption>,
}

/// One `<option>` inside a select.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
    pub disabled: bool,
}

/// State captured from a `<textarea>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TextareaControl {
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub placeholder: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub rows: Option<String>,
}

/// State captured from an `<a href>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct LinkControl {
    /// Resolved absolute URL, or the original string when resolution fails.
    pub href: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub target: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub rel: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub download: Option<String>,
}

// ============================================================================
// Forms and Links
// ============================================================================

/// A `<form>` element and its visible fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct FormEntry {
    pub selector: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub classes: Vec<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub action: Option<String>,
    /// The `method` attribute, defaulting to `get`.
    pub method: String,
    pub fields: Vec<FieldEntry>,
}

/// One visible field inside a form. Hidden-type inputs never appear here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct FieldEntry {
    pub tag: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub field_type: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
    pub selector: String,
    pub required: bool,
}

/// An anchor that appears inside running text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct InlineLinkEntry {
    /// Link text, capped at 120 characters.
    pub text: String,
    /// Resolved absolute URL, or the original string when resolution fails.
    pub href: String,
    pub selector: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub classes: Vec<String>,
    /// Up to 200 characters of the parent's visible text, for disambiguation.
    pub snippet: String,
}
