//! Transform configuration.
//!
//! Options are an explicit struct handed to the classifier and injector. The
//! caller picks the environment preset; nothing here reads ambient state.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Attribute carrying the marker on rendered root nodes.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "data-component-marker";

/// Module the emitted registration helpers are imported from.
pub const DEFAULT_RUNTIME_MODULE: &str = "component-locator/runtime";

pub const DEFAULT_REGISTER_HELPER: &str = "__registerMarker";
pub const DEFAULT_MARK_HELPER: &str = "__markComponent";

lazy_static! {
    static ref ATTRIBUTE_NAME_RE: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_-]*$").unwrap();
    static ref JS_IDENT_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tagging {
    #[default]
    Enabled,
    Disabled,
}

/// Build environment a preset is chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEnv {
    Development,
    Test,
    Production,
}

impl BuildEnv {
    /// Maps a `NODE_ENV`-style name. Unknown names are treated as development.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => BuildEnv::Production,
            "test" | "testing" => BuildEnv::Test,
            _ => BuildEnv::Development,
        }
    }

    pub fn tagging(self) -> Tagging {
        match self {
            BuildEnv::Development | BuildEnv::Test => Tagging::Enabled,
            BuildEnv::Production => Tagging::Disabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    pub tagging: Tagging,
    pub attribute_name: String,
    pub runtime_module: String,
    pub register_helper: String,
    pub mark_helper: String,
    /// Superclass names (bare or `React.`-qualified) that make a class a component.
    pub component_bases: Vec<String>,
    /// JSX element names treated as transparent grouping wrappers.
    pub transparent_wrappers: Vec<String>,
    /// Higher-order functions allowed to wrap an imported component by reference.
    pub composition_wrappers: Vec<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            tagging: Tagging::Enabled,
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            register_helper: DEFAULT_REGISTER_HELPER.to_string(),
            mark_helper: DEFAULT_MARK_HELPER.to_string(),
            component_bases: vec!["Component".to_string(), "PureComponent".to_string()],
            transparent_wrappers: vec!["Fragment".to_string(), "React.Fragment".to_string()],
            composition_wrappers: [
                "connect",
                "memo",
                "forwardRef",
                "withRouter",
                "withTheme",
                "withStyles",
                "observer",
                "inject",
                "compose",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        }
    }
}

impl TransformOptions {
    pub fn for_env(env: BuildEnv) -> Self {
        TransformOptions {
            tagging: env.tagging(),
            ..Default::default()
        }
    }

    /// Parses plugin options. Missing keys fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: TransformOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ATTRIBUTE_NAME_RE.is_match(&self.attribute_name) {
            return Err(ConfigError::InvalidAttributeName(
                self.attribute_name.clone(),
            ));
        }
        for helper in [&self.register_helper, &self.mark_helper] {
            if !JS_IDENT_RE.is_match(helper) {
                return Err(ConfigError::InvalidHelperName(helper.clone()));
            }
        }
        if self.runtime_module.trim().is_empty() {
            return Err(ConfigError::EmptyRuntimeModule);
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.tagging == Tagging::Enabled
    }

    pub(crate) fn is_component_base(&self, name: &str) -> bool {
        self.component_bases.iter().any(|b| b == name)
    }

    pub(crate) fn is_transparent_wrapper(&self, name: &str) -> bool {
        self.transparent_wrappers.iter().any(|w| w == name)
    }

    /// Matches `memo` and `React.memo` alike.
    pub(crate) fn is_composition_wrapper(&self, callee: &str) -> bool {
        let property = callee.rsplit('.').next().unwrap_or(callee);
        self.composition_wrappers
            .iter()
            .any(|w| w == callee || w == property)
    }
}
