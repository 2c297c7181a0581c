//! Error types for registration, selection and configuration.
//!
//! Compile-time problems that must not stop a build are reported as
//! [`crate::diagnostic::TransformDiagnostic`] values instead.

use thiserror::Error;

use crate::registry::ComponentRef;

/// Registry invariant violations. These point at a classifier or injector bug
/// and must abort module loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("component {component} is already registered with marker \"{existing}\", refusing \"{attempted}\"")]
    ConflictingMarker {
        component: ComponentRef,
        existing: String,
        attempted: String,
    },

    #[error("marker \"{marker}\" already belongs to {owner}, refusing it for {attempted}")]
    MarkerTaken {
        marker: String,
        owner: ComponentRef,
        attempted: ComponentRef,
    },

    #[error("registry renders markers as \"{registry}\" but the module was tagged with \"{module}\"")]
    AttributeMismatch { registry: String, module: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("cannot select component {component} (position {position}): no marker registered. Is tagging enabled and was its module loaded?")]
    Unresolved {
        component: ComponentRef,
        position: usize,
    },

    #[error("selector chain is empty")]
    EmptyChain,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid transform options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid marker attribute name \"{0}\"")]
    InvalidAttributeName(String),

    #[error("invalid runtime helper name \"{0}\"")]
    InvalidHelperName(String),

    #[error("runtime module must not be empty")]
    EmptyRuntimeModule,
}
