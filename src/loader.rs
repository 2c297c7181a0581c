//! Module loading: the host side of module evaluation.
//!
//! Loading a module transforms it once, then performs what evaluating the
//! emitted registration calls does at runtime: every assignment lands in the
//! caller's registry before any export of the module is handed out.

use std::collections::HashMap;

use crate::config::TransformOptions;
use crate::diagnostic::TransformDiagnostic;
use crate::error::RegistryError;
use crate::inject::{transform_module, TransformOutput};
use crate::registry::{ComponentRef, IdentityRegistry};

#[derive(Debug, Clone)]
pub struct LoadedModule {
    path: String,
    exports: HashMap<String, ComponentRef>,
    output: TransformOutput,
}

impl LoadedModule {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reference bound to an export name. Every name resolving to the same
    /// local declaration yields an equal reference.
    pub fn export(&self, name: &str) -> Option<&ComponentRef> {
        self.exports.get(name)
    }

    pub fn default_export(&self) -> Option<&ComponentRef> {
        self.export("default")
    }

    /// Reference to a top-level component by local binding, exported or not.
    pub fn component(&self, binding: &str) -> Option<ComponentRef> {
        self.output
            .classification
            .get(binding)
            .map(|_| ComponentRef::new(self.path.as_str(), binding))
    }

    pub fn code(&self) -> &str {
        &self.output.code
    }

    pub fn output(&self) -> &TransformOutput {
        &self.output
    }

    pub fn diagnostics(&self) -> &[TransformDiagnostic] {
        &self.output.diagnostics
    }
}

/// Registers a transformed module's assignments, in declaration order.
pub fn evaluate_module(
    registry: &mut IdentityRegistry,
    output: &TransformOutput,
) -> Result<(), RegistryError> {
    for assignment in &output.assignments {
        registry.register_assignment(assignment)?;
    }
    Ok(())
}

/// Loads each module path at most once, like a host module system.
#[derive(Debug, Default)]
pub struct ModuleLoader {
    options: TransformOptions,
    modules: HashMap<String, LoadedModule>,
}

impl ModuleLoader {
    pub fn new(options: TransformOptions) -> Self {
        ModuleLoader {
            options,
            modules: HashMap::new(),
        }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Returns the cached module if `path` was loaded before.
    pub fn load(
        &mut self,
        registry: &mut IdentityRegistry,
        path: &str,
        source: &str,
    ) -> Result<&LoadedModule, RegistryError> {
        if !self.modules.contains_key(path) {
            let module = self.evaluate(registry, path, source)?;
            self.modules.insert(path.to_string(), module);
        }
        Ok(&self.modules[path])
    }

    /// Transforms and evaluates `path` again, replacing the cached module.
    /// Markers are derived from the declaration, so a reload re-registers the
    /// same values.
    pub fn reload(
        &mut self,
        registry: &mut IdentityRegistry,
        path: &str,
        source: &str,
    ) -> Result<&LoadedModule, RegistryError> {
        let module = self.evaluate(registry, path, source)?;
        self.modules.insert(path.to_string(), module);
        Ok(&self.modules[path])
    }

    pub fn get(&self, path: &str) -> Option<&LoadedModule> {
        self.modules.get(path)
    }

    fn evaluate(
        &self,
        registry: &mut IdentityRegistry,
        path: &str,
        source: &str,
    ) -> Result<LoadedModule, RegistryError> {
        if registry.attribute_name() != self.options.attribute_name {
            return Err(RegistryError::AttributeMismatch {
                registry: registry.attribute_name().to_string(),
                module: self.options.attribute_name.clone(),
            });
        }

        let output = transform_module(source, path, &self.options);
        evaluate_module(registry, &output)?;

        let exports = output
            .classification
            .exports
            .iter()
            .map(|e| (e.exported.clone(), ComponentRef::new(path, e.local.as_str())))
            .collect();

        tracing::debug!(
            module = path,
            components = output.assignments.len(),
            "module loaded"
        );

        Ok(LoadedModule {
            path: path.to_string(),
            exports,
            output,
        })
    }
}
