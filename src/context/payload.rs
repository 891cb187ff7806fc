//! Wire payload for the command service.
//!
//! The service accepts `{ transcript, html }`; the `html` field carries the
//! formatted page context, not raw markup. Assembly keeps the field inside a
//! character budget, splitting on chunk boundaries first so that whatever
//! survives the cut is whole lines.

use crate::chunk::chunk_text;
use crate::util::truncate_chars;

/// Request body for the `/command` endpoint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct CommandPayload {
    /// The user's spoken or typed command, verbatim.
    pub transcript: String,
    /// Formatted page context, bounded by the configured budget.
    pub html: String,
}

/// Budget and separator for payload assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadConfig {
    /// Upper bound on the `html` field, in characters.
    pub max_chars: usize,
    /// Marker inserted between chunks when the context spans several.
    pub separator: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            max_chars: 12_000,
            separator: "\n\n=== CHUNK BREAK ===\n\n".to_string(),
        }
    }
}

/// Assemble a command payload from a transcript and a formatted context.
///
/// The context is chunked at the configured budget, the chunks are joined
/// with the separator, and the result is hard-truncated back to the budget.
/// A context that already fits passes through trimmed and unbroken.
pub fn assemble_payload(
    transcript: &str,
    formatted: &str,
    config: &PayloadConfig,
) -> CommandPayload {
    let chunks = chunk_text(formatted, config.max_chars);
    let joined = chunks.join(&config.separator);
    CommandPayload {
        transcript: transcript.to_string(),
        html: truncate_chars(&joined, config.max_chars).to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
