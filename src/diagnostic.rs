use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const DIAG_UNRECOGNIZED_SHAPE: &str = "MARK001";
pub const DIAG_ATTRIBUTE_CONFLICT: &str = "MARK002";
pub const DIAG_NO_TAGGABLE_ROOT: &str = "MARK003";
pub const DIAG_PARSE_FAILED: &str = "MARK004";

fn get_hint(code: &str) -> &'static str {
    match code {
        DIAG_UNRECOGNIZED_SHAPE => {
            "Only statically declared functions, arrows, classes and compositions are tagged."
        }
        DIAG_ATTRIBUTE_CONFLICT => {
            "Remove the hand-written marker attribute; the transform assigns it."
        }
        DIAG_NO_TAGGABLE_ROOT => {
            "Components rendering a fragment with several children have no single root to tag."
        }
        DIAG_PARSE_FAILED => "The module was left untouched.",
        _ => "",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// 1-based line and column of a byte offset.
    pub fn from_offset(source: &str, offset: u32) -> Self {
        let offset = (offset as usize).min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() as u32 + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() as u32 + 1,
            None => before.chars().count() as u32 + 1,
        };
        SourceLocation { line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformDiagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub hint: String,
    pub file: String,
    pub location: SourceLocation,
}

impl TransformDiagnostic {
    pub fn new(
        code: &str,
        severity: Severity,
        message: impl Into<String>,
        file: &str,
        location: SourceLocation,
    ) -> Self {
        TransformDiagnostic {
            code: code.to_string(),
            severity,
            message: message.into(),
            hint: get_hint(code).to_string(),
            file: file.to_string(),
            location,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
