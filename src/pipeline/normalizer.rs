use tracing::{debug, warn};

use crate::constants::{PDF_METADATA_MARKER, PDF_PARSING_ERROR_REASON, SHORT_DOCUMENT_CHARS};
use crate::types::ExtractionResult;

/// Whitespace-collapsed document text, scoped to a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prepare a raw document for matching, or short-circuit when the text is only
/// PDF viewer metadata.
pub fn normalize_document(document: &str) -> Result<NormalizedText, ExtractionResult> {
    let text = NormalizedText(collapse_whitespace(document));
    let len = text.char_len();
    debug!("Processing document of length {} chars", len);

    if text.as_str().contains(PDF_METADATA_MARKER) && len < SHORT_DOCUMENT_CHARS {
        warn!("Found PDF metadata instead of content");
        return Err(ExtractionResult::UnknownReason(
            PDF_PARSING_ERROR_REASON.to_string(),
        ));
    }

    Ok(text)
}
