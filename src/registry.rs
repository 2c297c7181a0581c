//! Identity registry: component reference → marker value.
//!
//! The registry is owned by whoever drives module loading and is passed
//! explicitly to the loader (write) and to `select` (read). A fresh registry
//! per test process gives isolation without any reset hooks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ATTRIBUTE_NAME;
use crate::error::RegistryError;

/// Identity of a component value: the module that declares it and the local
/// binding the declaration evaluates to.
///
/// Export names are deliberately not part of the key, so `export default Foo`
/// and `export { Foo as Bar }` resolve to the same reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentRef {
    module: Arc<str>,
    binding: Arc<str>,
}

impl ComponentRef {
    pub fn new(module: impl Into<Arc<str>>, binding: impl Into<Arc<str>>) -> Self {
        ComponentRef {
            module: module.into(),
            binding: binding.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.module, self.binding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerAssignment {
    pub module: String,
    pub binding: String,
    pub marker: String,
}

impl MarkerAssignment {
    pub fn component(&self) -> ComponentRef {
        ComponentRef::new(self.module.as_str(), self.binding.as_str())
    }
}

/// Marker table for one process. Also fixes the attribute name markers are
/// rendered under, so selectors and injected markup agree.
#[derive(Debug)]
pub struct IdentityRegistry {
    attribute_name: String,
    markers: HashMap<ComponentRef, String>,
    owners: HashMap<String, ComponentRef>,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::with_attribute_name(DEFAULT_ATTRIBUTE_NAME)
    }
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute_name(attribute_name: impl Into<String>) -> Self {
        IdentityRegistry {
            attribute_name: attribute_name.into(),
            markers: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Records `marker` for `component`.
    ///
    /// Re-registering the same pair is a no-op. A different marker for a known
    /// component, or a marker already owned by another component, is an error.
    pub fn register(
        &mut self,
        component: ComponentRef,
        marker: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let marker = marker.into();

        if let Some(existing) = self.markers.get(&component) {
            if *existing == marker {
                return Ok(());
            }
            return Err(RegistryError::ConflictingMarker {
                component,
                existing: existing.clone(),
                attempted: marker,
            });
        }

        if let Some(owner) = self.owners.get(&marker) {
            return Err(RegistryError::MarkerTaken {
                marker,
                owner: owner.clone(),
                attempted: component,
            });
        }

        tracing::trace!(component = %component, marker = %marker, "registered marker");
        self.owners.insert(marker.clone(), component.clone());
        self.markers.insert(component, marker);
        Ok(())
    }

    pub fn register_assignment(&mut self, assignment: &MarkerAssignment) -> Result<(), RegistryError> {
        self.register(assignment.component(), assignment.marker.as_str())
    }

    pub fn lookup(&self, component: &ComponentRef) -> Option<&str> {
        self.markers.get(component).map(String::as_str)
    }

    pub fn reference_for(&self, marker: &str) -> Option<&ComponentRef> {
        self.owners.get(marker)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentRef, &str)> {
        self.markers.iter().map(|(k, v)| (k, v.as_str()))
    }
}
