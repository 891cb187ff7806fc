//! Tag formatting rules.
//!
//! One table maps a tag name to the wrapper applied around its rendered
//! child text, so every rule is data and testable on its own instead of
//! living in one large branch.

/// The wrapper a tag applies to its rendered child text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {
    /// Markdown-style heading prefix, level 1-4.
    Heading(u8),
    /// Standalone block surrounded by newlines.
    Block,
    /// List item with a dash marker.
    Bullet,
    /// Quoted block.
    Quote,
    /// Inline marker on both sides (emphasis, strong).
    Inline(&'static str),
    /// Inline code span.
    Code,
    /// Fenced code block.
    Fence,
    /// Table cell with a trailing pipe.
    Cell,
    /// Table row on its own line.
    Row,
    /// Form control summarized as bracketed text; needs element state, so
    /// the renderer handles it out of band.
    Control,
    /// Anchor rendered with its resolved target; handled out of band.
    Link,
    /// Child text passes through unchanged.
    Pass,
}

/// Look up the formatting rule for a tag. Unknown tags pass through.
pub fn format_for(tag: &str) -> TagFormat {
    match tag {
        "h1" => TagFormat::Heading(1),
        "h2" => TagFormat::Heading(2),
        "h3" => TagFormat::Heading(3),
        "h4" => TagFormat::Heading(4),
        "p" | "ul" | "ol" | "dl" | "table" | "details" => TagFormat::Block,
        "li" => TagFormat::Bullet,
        "blockquote" => TagFormat::Quote,
        "em" | "i" => TagFormat::Inline("*"),
        "strong" | "b" => TagFormat::Inline("**"),
        "code" => TagFormat::Code,
        "pre" => TagFormat::Fence,
        "td" | "th" => TagFormat::Cell,
        "tr" => TagFormat::Row,
        "input" | "select" | "textarea" | "button" => TagFormat::Control,
        "a" => TagFormat::Link,
        _ => TagFormat::Pass,
    }
}

impl TagFormat {
    /// Apply the wrapper to non-empty child text.
    ///
    /// `Control` and `Link` pass through here; the renderer substitutes
    /// their element-aware output before this point.
    pub fn apply(&self, text: &str) -> String {
        match self {
            TagFormat::Heading(level) => {
                format!("\n{} {text}\n", "#".repeat(usize::from(*level)))
            }
            TagFormat::Block => format!("\n{text}\n"),
            TagFormat::Bullet => format!("\n- {text}"),
            TagFormat::Quote => format!("\n> {text}\n"),
            TagFormat::Inline(marker) => format!("{marker}{text}{marker}"),
            TagFormat::Code => format!("`{text}`"),
            TagFormat::Fence => format!("\n```\n{text}\n```\n"),
            TagFormat::Cell => format!("{text} |"),
            TagFormat::Row => format!("\n| {text}\n"),
            TagFormat::Pass | TagFormat::Control | TagFormat::Link => text.to_string(),
        }
    }
}
