//! Fenced code block extraction
//!
//! Turns free-text model output into a `(language, code)` pair. Only the
//! first fenced block counts; later blocks are discarded on purpose so that
//! chat-style responses with appended examples stay deterministic.

use regex::Regex;

/// Substrings that mark unfenced text as python source
const PYTHON_MARKERS: [&str; 3] = ["def ", "import ", "print("];

/// A snippet recovered from model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCode {
    pub language: String,
    pub code: String,
}

/// Extracts the first fenced code block from free text
pub struct CodeExtractor {
    fence: Regex,
}

impl CodeExtractor {
    pub fn new() -> Self {
        Self {
            // Opening fence with optional language tag, non-greedy body,
            // closing fence. (?s) lets the body span newlines.
            fence: Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("invalid fence pattern"),
        }
    }

    /// Extract a snippet from `text`, if any.
    ///
    /// A fenced block wins; a missing language tag defaults to python. With
    /// no fence present, the whole text is treated as python when it contains
    /// one of the python marker substrings. Anything else is not code.
    pub fn extract(&self, text: &str) -> Option<ExtractedCode> {
        if let Some(caps) = self.fence.captures(text) {
            let language = caps.get(1).map(|m| m.as_str()).unwrap_or("python");
            let code = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            return Some(ExtractedCode {
                language: language.to_string(),
                code: code.trim().to_string(),
            });
        }

        if PYTHON_MARKERS.iter().any(|marker| text.contains(marker)) {
            return Some(ExtractedCode {
                language: "python".to_string(),
                code: text.trim().to_string(),
            });
        }

        None
    }
}

impl Default for CodeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
