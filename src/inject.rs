//! Marker injector.
//!
//! Rewrites a module so each classified component puts the marker attribute on
//! its rendered root, and appends the registration calls that run when the
//! module is evaluated. Rewrites are span-based text edits, so everything the
//! transform does not touch is preserved byte for byte.

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use serde::Serialize;

use crate::classify::{
    classify_program, source_type, Classification, ModuleClassification, SkipReason,
};
use crate::config::TransformOptions;
use crate::diagnostic::{
    Severity, SourceLocation, TransformDiagnostic, DIAG_ATTRIBUTE_CONFLICT,
    DIAG_NO_TAGGABLE_ROOT, DIAG_PARSE_FAILED, DIAG_UNRECOGNIZED_SHAPE,
};
use crate::marker::derive_marker;
use crate::registry::MarkerAssignment;

/// Runtime export called once per tagged declaration as
/// `registerMarker(Component, marker)` while the module evaluates.
const RUNTIME_REGISTER_EXPORT: &str = "registerMarker";

/// Runtime export wrapping a component passed by reference to a
/// higher-order call: `markComponent(Inner, marker)` must return a component
/// that renders `Inner` and appends `marker` as an extra whitespace-separated
/// token to the marker attribute of `Inner`'s root, keeping `Inner`'s own
/// token. Selectors match either token with `~=`.
const RUNTIME_MARK_EXPORT: &str = "markComponent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

impl Edit {
    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        Edit {
            start: at,
            end: at,
            text: text.into(),
        }
    }

    pub fn replace(start: u32, end: u32, text: impl Into<String>) -> Self {
        Edit {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Applies edits back to front. Insertions at the same offset keep the order
/// in which they were pushed.
pub(crate) fn apply_edits(source: &str, edits: Vec<Edit>) -> String {
    let mut ordered: Vec<(usize, Edit)> = edits.into_iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| b.start.cmp(&a.start).then(ib.cmp(ia)));

    let mut result = source.to_string();
    for (_, edit) in ordered {
        result.replace_range((edit.start as usize)..(edit.end as usize), &edit.text);
    }
    result
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    pub changed: bool,
    pub classification: ModuleClassification,
    pub assignments: Vec<MarkerAssignment>,
    pub diagnostics: Vec<TransformDiagnostic>,
}

impl TransformOutput {
    pub fn warnings(&self) -> impl Iterator<Item = &TransformDiagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn marker_for(&self, binding: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.binding == binding)
            .map(|a| a.marker.as_str())
    }
}

/// Transforms one module. Never fails: unparsable input comes back unchanged
/// with a warning so the surrounding build decides what to do with it.
pub fn transform_module(source: &str, module_path: &str, options: &TransformOptions) -> TransformOutput {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type()).parse();

    if !ret.errors.is_empty() {
        let parse_errors: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        tracing::warn!(
            module = module_path,
            errors = parse_errors.len(),
            "module did not parse, leaving it untagged"
        );
        let diagnostic = TransformDiagnostic::new(
            DIAG_PARSE_FAILED,
            Severity::Warning,
            format!("could not parse module: {}", parse_errors.join("; ")),
            module_path,
            SourceLocation { line: 1, column: 1 },
        );
        return TransformOutput {
            code: source.to_string(),
            changed: false,
            classification: ModuleClassification {
                module_path: module_path.to_string(),
                parse_errors,
                ..Default::default()
            },
            assignments: Vec::new(),
            diagnostics: vec![diagnostic],
        };
    }

    let classification = classify_program(&ret.program, source, module_path, options);
    let diagnostics = skip_diagnostics(&classification, module_path);

    if !options.is_enabled() {
        return TransformOutput {
            code: source.to_string(),
            changed: false,
            classification,
            assignments: Vec::new(),
            diagnostics,
        };
    }

    let mut edits = Vec::new();
    let mut assignments = Vec::new();
    let mut uses_mark_helper = false;

    for decl in classification.components() {
        let marker = derive_marker(module_path, &decl.binding);
        let attribute = format!(" {}=\"{}\"", options.attribute_name, marker);

        for &at in &decl.plan.roots.inserts {
            edits.push(Edit::insert(at, attribute.clone()));
        }
        if let Some((start, end)) = decl.plan.wrapped_reference {
            let reference = &source[start as usize..end as usize];
            edits.push(Edit::replace(
                start,
                end,
                format!("{}({}, \"{}\")", options.mark_helper, reference, marker),
            ));
            uses_mark_helper = true;
        }
        edits.extend(decl.plan.alias_edits.iter().cloned());

        assignments.push(MarkerAssignment {
            module: module_path.to_string(),
            binding: decl.binding.clone(),
            marker,
        });
    }

    if assignments.is_empty() {
        return TransformOutput {
            code: source.to_string(),
            changed: false,
            classification,
            assignments,
            diagnostics,
        };
    }

    edits.push(Edit::insert(
        source.len() as u32,
        registration_block(options, &assignments, uses_mark_helper),
    ));

    TransformOutput {
        code: apply_edits(source, edits),
        changed: true,
        classification,
        assignments,
        diagnostics,
    }
}

/// Import of the runtime helpers plus one registration call per component.
/// Module evaluation runs these before any importer reads an export.
fn registration_block(
    options: &TransformOptions,
    assignments: &[MarkerAssignment],
    uses_mark_helper: bool,
) -> String {
    let mut imports = vec![format!("{} as {}", RUNTIME_REGISTER_EXPORT, options.register_helper)];
    if uses_mark_helper {
        imports.push(format!("{} as {}", RUNTIME_MARK_EXPORT, options.mark_helper));
    }

    let mut block = format!(
        "\nimport {{ {} }} from {:?};\n",
        imports.join(", "),
        options.runtime_module
    );
    for assignment in assignments {
        block.push_str(&format!(
            "{}({}, \"{}\");\n",
            options.register_helper, assignment.binding, assignment.marker
        ));
    }
    block
}

fn skip_diagnostics(classification: &ModuleClassification, module_path: &str) -> Vec<TransformDiagnostic> {
    let mut diagnostics = Vec::new();
    for decl in &classification.declarations {
        let Classification::Unsupported(skip) = decl else {
            continue;
        };
        let (code, severity, message) = match skip.reason {
            SkipReason::UnrecognizedShape => (
                DIAG_UNRECOGNIZED_SHAPE,
                Severity::Note,
                format!("`{}` is not a recognizable component declaration", skip.binding),
            ),
            SkipReason::AttributeConflict => (
                DIAG_ATTRIBUTE_CONFLICT,
                Severity::Warning,
                format!(
                    "`{}` already sets the reserved marker attribute; it was not tagged",
                    skip.binding
                ),
            ),
            SkipReason::NoTaggableRoot => (
                DIAG_NO_TAGGABLE_ROOT,
                Severity::Note,
                format!("`{}` renders no single root element to tag", skip.binding),
            ),
        };

        if severity == Severity::Warning {
            tracing::warn!(
                module = module_path,
                line = skip.location.line,
                column = skip.location.column,
                "{}",
                message
            );
        } else {
            tracing::debug!(module = module_path, binding = %skip.binding, "{}", message);
        }

        diagnostics.push(TransformDiagnostic::new(
            code,
            severity,
            message,
            module_path,
            skip.location.clone(),
        ));
    }
    diagnostics
}

/// JSON bridge for the JavaScript build pipeline. Options are the plugin
/// options object; `null` selects the defaults.
#[cfg(feature = "napi")]
#[napi]
pub fn transform_module_native(
    source: String,
    module_path: String,
    options_json: Option<String>,
) -> napi::Result<String> {
    let options = match options_json {
        Some(json) => TransformOptions::from_json(&json)
            .map_err(|e| napi::Error::from_reason(e.to_string()))?,
        None => TransformOptions::default(),
    };
    let output = transform_module(&source, &module_path, &options);
    serde_json::to_string(&output).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_edits_reverse_order() {
        let edits = vec![
            Edit::insert(0, "<"),
            Edit::replace(1, 2, "B"),
            Edit::insert(3, ">"),
        ];
        assert_eq!(apply_edits("abc", edits), "<aBc>");
    }

    #[test]
    fn test_apply_edits_same_offset_keeps_push_order() {
        let edits = vec![Edit::insert(1, "1"), Edit::insert(1, "2")];
        assert_eq!(apply_edits("ab", edits), "a12b");
    }

    #[test]
    fn test_registration_block() {
        let options = TransformOptions::default();
        let assignments = vec![MarkerAssignment {
            module: "App.jsx".to_string(),
            binding: "App".to_string(),
            marker: "App-00000000".to_string(),
        }];
        let block = registration_block(&options, &assignments, false);
        assert_eq!(
            block,
            "\nimport { registerMarker as __registerMarker } from \"component-locator/runtime\";\n__registerMarker(App, \"App-00000000\");\n"
        );
    }

    #[test]
    fn test_untouched_module_is_unchanged() {
        let source = "export const answer = 42;\n";
        let output = transform_module(source, "answer.js", &TransformOptions::default());
        assert!(!output.changed);
        assert_eq!(output.code, source);
        assert!(output.assignments.is_empty());
    }
}
