//! # DAG Steps
//!
//! Step descriptors consumed by the testmachinery engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a config element is handed to the step container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    /// Exposed as an environment variable
    Env,
    /// Mounted as a file
    File,
}

/// Typed key/value pair attached to a step definition
///
/// Order within a list matters: the engine lets later entries shadow earlier
/// entries with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigElement {
    #[serde(rename = "type")]
    pub config_type: ConfigType,
    pub name: String,
    pub value: String,
}

impl ConfigElement {
    /// Environment variable element
    pub fn env(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            config_type: ConfigType::Env,
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Reference to the test definition a step runs, plus its configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    /// Name of the test definition
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<ConfigElement>,
}

/// Named unit of work in a testflow
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DagStep {
    pub name: String,
    pub definition: StepDefinition,
    /// Steps that must finish before this one starts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Mount the artifacts of every previous step instead of only the direct dependencies
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_global_artifacts: bool,
    /// Step whose artifacts are mounted; empty means the direct dependencies
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub artifacts_from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl DagStep {
    /// Value of the last config element with the given name
    ///
    /// Mirrors the engine's shadowing rule.
    pub fn config_value(&self, name: &str) -> Option<&str> {
        self.definition
            .config
            .iter()
            .rev()
            .find(|element| element.name == name)
            .map(|element| element.value.as_str())
    }
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde skip_serializing_if passes a reference"
)]
fn is_false(value: &bool) -> bool {
    !*value
}
