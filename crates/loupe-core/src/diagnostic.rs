//! Diagnostic type emitted by rules.

use serde::Serialize;

use crate::rules::Severity;

/// One finding reported by a rule.
///
/// Positions are 1-based line/column pairs; `start_offset`/`width` carry the
/// flagged node's raw byte range for hosts that work in offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    pub start_offset: usize,
    pub width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            file: file.into(),
            line,
            column,
            end_line: None,
            end_column: None,
            start_offset: 0,
            width: 0,
            suggestion: None,
        }
    }

    pub fn with_end(mut self, line: usize, column: usize) -> Self {
        self.end_line = Some(line);
        self.end_column = Some(column);
        self
    }

    pub fn with_offsets(mut self, start_offset: usize, width: usize) -> Self {
        self.start_offset = start_offset;
        self.width = width;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
