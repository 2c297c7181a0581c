//! # Component Locator
//!
//! Compile-time component tagging plus a runtime selector resolver, so UI tests
//! can find a specific rendered component instance without hand-written test ids.
//!
//! ## Invariants
//!
//! 1. **One marker per declaration**: every recognized component declaration is
//!    assigned exactly one marker, derived from `module_path#binding`. Reloading
//!    a module re-derives the same value.
//!
//! 2. **Markers are unique**: the registry refuses a second marker for a known
//!    component and refuses a marker already owned by another component.
//!
//! 3. **Authored markup is preserved**: the marker attribute is inserted after
//!    author attributes and spreads. Nothing else in the module changes.
//!
//! 4. **Transparent wrappers never carry markers**: a fragment passes the marker
//!    to its single child, or tags nothing when it groups several.
//!
//! 5. **Selectors honor nesting order**: `select(A, B)` matches `B` instances
//!    rendered anywhere inside an `A` instance, never the reverse.
//!
//! 6. **Disabled tagging is total**: source is returned unchanged, nothing is
//!    registered, and every `select` fails as unresolved.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod classify;
mod config;
mod diagnostic;
mod error;
mod inject;
mod loader;
mod marker;
mod registry;
mod roots;
mod select;
mod tree;

#[cfg(test)]
mod transform_tests;

pub use classify::{
    classify_module, Classification, ComponentDeclaration, ComponentKind, DeclarationShape,
    ExportBinding, ModuleClassification, SkipReason, UnsupportedDeclaration,
    DEFAULT_EXPORT_ALIAS,
};
pub use config::{
    BuildEnv, Tagging, TransformOptions, DEFAULT_ATTRIBUTE_NAME, DEFAULT_MARK_HELPER,
    DEFAULT_REGISTER_HELPER, DEFAULT_RUNTIME_MODULE,
};
pub use diagnostic::*;
pub use error::{ConfigError, RegistryError, SelectError};
pub use inject::{transform_module, TransformOutput};
pub use loader::{evaluate_module, LoadedModule, ModuleLoader};
pub use marker::derive_marker;
pub use registry::{ComponentRef, IdentityRegistry, MarkerAssignment};
pub use select::{select, select_template, Selector, TemplatePart};
pub use tree::{attributes, find_chain, has_marker, tag_name, RenderedNode, RenderedTree};

#[cfg(feature = "napi")]
pub use inject::transform_module_native;

#[cfg(feature = "napi")]
#[napi]
pub fn compile_bridge() -> String {
    "Component Locator Native Bridge Connected".to_string()
}
