//! # Create-Shoot Steps
//!
//! Renders the generator and create steps that provision a shoot on one cloud
//! provider.
//!
//! The generator step writes the provider-specific controlplane and
//! infrastructure configs to the shared artifact directory; the create step
//! picks them up together with the shoot settings and creates the shoot.

use crate::constants::{
    CONFIG_ALLOW_PRIVILEGED_CONTAINERS, CONFIG_CLOUDPROFILE, CONFIG_CLOUDPROVIDER,
    CONFIG_CONTROLPLANE_PROVIDER_PATH, CONFIG_CONTROLPLANE_PROVIDER_PATH_NAME,
    CONFIG_INFRASTRUCTURE_PROVIDER_PATH, CONFIG_INFRASTRUCTURE_PROVIDER_PATH_NAME,
    CONFIG_K8S_VERSION, CONFIG_PROJECT_NAMESPACE, CONFIG_PROVIDER_TYPE, CONFIG_REGION,
    CONFIG_SECRET_BINDING, CONFIG_SEED, CONFIG_SEED_VALUE, CONFIG_SHOOT_ANNOTATIONS,
    CONFIG_SHOOT_NAME, CONFIG_ZONE, CREATE_SHOOT_DEFINITION, DEFAULT_CREATE_SHOOT_STEP_PREFIX,
    GENERATOR_DEFINITION_PREFIX, GENERATOR_STEP_SUFFIX,
};
use crate::crd::{ConfigElement, DagStep, StepDefinition};
use crate::error::{Result, TemplateError};
use crate::provider::{CloudProvider, ProviderProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Shoot settings shared by every provider
///
/// Can be loaded from YAML:
///
/// ```yaml
/// shootName: it-shoot
/// namespace: garden-it
/// k8sVersion: "1.30.2"
/// allowPrivilegedContainers: true
/// shootAnnotations:
///   owner: ci
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateShootConfig {
    pub shoot_name: String,
    /// Garden project namespace
    pub namespace: String,
    pub k8s_version: String,
    /// Left out of the rendered config entirely when unset
    pub allow_privileged_containers: Option<bool>,
    pub shoot_annotations: BTreeMap<String, String>,
}

/// Explicitly given shoot settings that take precedence over a loaded config
///
/// `None` keeps the loaded value. Annotations are merged key by key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShootOverrides {
    pub shoot_name: Option<String>,
    pub namespace: Option<String>,
    pub k8s_version: Option<String>,
    pub allow_privileged_containers: Option<bool>,
    pub shoot_annotations: Vec<(String, String)>,
}

impl CreateShootConfig {
    /// Apply explicitly given settings on top of this config
    pub fn apply_overrides(&mut self, overrides: ShootOverrides) {
        if let Some(shoot_name) = overrides.shoot_name {
            self.shoot_name = shoot_name;
        }
        if let Some(namespace) = overrides.namespace {
            self.namespace = namespace;
        }
        if let Some(k8s_version) = overrides.k8s_version {
            self.k8s_version = k8s_version;
        }
        if overrides.allow_privileged_containers.is_some() {
            self.allow_privileged_containers = overrides.allow_privileged_containers;
        }
        self.shoot_annotations.extend(overrides.shoot_annotations);
    }

    /// Check that the settings every create step needs are present
    ///
    /// # Errors
    ///
    /// [`TemplateError::MissingShootSetting`] naming the first empty setting.
    pub fn ensure_complete(&self) -> Result<()> {
        let required = [
            ("shootName", &self.shoot_name),
            ("namespace", &self.namespace),
            ("k8sVersion", &self.k8s_version),
        ];
        match required.into_iter().find(|(_, value)| value.is_empty()) {
            Some((setting, _)) => Err(TemplateError::MissingShootSetting(setting)),
            None => Ok(()),
        }
    }
}

/// Parse a `key=value` shoot annotation
///
/// # Errors
///
/// Fails when there is no `=` or the key is empty.
pub fn parse_annotation(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Render the generator and create steps for a shoot on `cloudprovider`
///
/// An empty `name` falls back to `create-shoot-<provider>`. The generator step
/// depends on `dependencies`; the create step depends only on the generator.
///
/// Returns `[generator, create]` and the create step's name, which callers use
/// as the dependency of any follow-up step.
///
/// # Errors
///
/// [`TemplateError::UnsupportedProvider`] if the provider has no template.
pub fn step_create_shoot(
    cloudprovider: CloudProvider,
    name: &str,
    dependencies: &[String],
    cfg: &CreateShootConfig,
) -> Result<(Vec<DagStep>, String)> {
    let Some(profile) = cloudprovider.profile() else {
        warn!(provider = %cloudprovider, "No create-shoot template for cloud provider");
        return Err(TemplateError::UnsupportedProvider(cloudprovider));
    };

    let name = if name.is_empty() {
        default_step_name(cloudprovider)
    } else {
        name.to_string()
    };

    let generator = generator_step(profile, &name, dependencies);

    let mut config = default_shoot_config(cfg);
    config.extend(provider_shoot_config(profile));

    let create = DagStep {
        name: name.clone(),
        definition: StepDefinition {
            name: CREATE_SHOOT_DEFINITION.to_string(),
            config,
        },
        depends_on: vec![generator.name.clone()],
        use_global_artifacts: false,
        artifacts_from: String::new(),
        annotations: None,
    };

    debug!(
        provider = %cloudprovider,
        step = %name,
        generator = %generator.name,
        "Rendered create-shoot steps"
    );

    Ok((vec![generator, create], name))
}

/// `create-shoot-<provider>`
pub fn default_step_name(cloudprovider: CloudProvider) -> String {
    format!("{DEFAULT_CREATE_SHOOT_STEP_PREFIX}-{cloudprovider}")
}

/// Name of the generator step feeding the create step `name`
pub fn generator_step_name(name: &str) -> String {
    format!("{name}{GENERATOR_STEP_SUFFIX}")
}

/// Shoot settings every create step carries, before the provider entries
pub fn default_shoot_config(cfg: &CreateShootConfig) -> Vec<ConfigElement> {
    let mut config = vec![
        ConfigElement::env(CONFIG_SHOOT_NAME, &cfg.shoot_name),
        ConfigElement::env(CONFIG_PROJECT_NAMESPACE, &cfg.namespace),
        ConfigElement::env(CONFIG_K8S_VERSION, &cfg.k8s_version),
        ConfigElement::env(CONFIG_SEED, CONFIG_SEED_VALUE),
        ConfigElement::env(
            CONFIG_SHOOT_ANNOTATIONS,
            marshal_annotations(&cfg.shoot_annotations),
        ),
    ];

    if let Some(allowed) = cfg.allow_privileged_containers {
        config.push(ConfigElement::env(
            CONFIG_ALLOW_PRIVILEGED_CONTAINERS,
            allowed.to_string(),
        ));
    }

    config
}

/// Output locations every provider generator writes to
fn default_provider_config() -> Vec<ConfigElement> {
    vec![
        ConfigElement::env(
            CONFIG_CONTROLPLANE_PROVIDER_PATH_NAME,
            CONFIG_CONTROLPLANE_PROVIDER_PATH,
        ),
        ConfigElement::env(
            CONFIG_INFRASTRUCTURE_PROVIDER_PATH_NAME,
            CONFIG_INFRASTRUCTURE_PROVIDER_PATH,
        ),
    ]
}

fn generator_step(profile: &ProviderProfile, name: &str, dependencies: &[String]) -> DagStep {
    let mut config = default_provider_config();
    if let Some(zone) = profile.zone {
        config.push(ConfigElement::env(CONFIG_ZONE, zone));
    }

    DagStep {
        name: generator_step_name(name),
        definition: StepDefinition {
            name: format!("{GENERATOR_DEFINITION_PREFIX}-{}", profile.provider),
            config,
        },
        depends_on: dependencies.to_vec(),
        use_global_artifacts: false,
        artifacts_from: String::new(),
        annotations: None,
    }
}

/// Provider entries appended to the create step's config
fn provider_shoot_config(profile: &ProviderProfile) -> Vec<ConfigElement> {
    let mut config = vec![
        ConfigElement::env(CONFIG_CLOUDPROVIDER, profile.provider_type),
        ConfigElement::env(CONFIG_PROVIDER_TYPE, profile.provider_type),
        ConfigElement::env(CONFIG_CLOUDPROFILE, profile.cloudprofile),
        ConfigElement::env(CONFIG_SECRET_BINDING, profile.secret_binding),
        ConfigElement::env(CONFIG_REGION, profile.region),
    ];
    if let Some(zone) = profile.zone {
        config.push(ConfigElement::env(CONFIG_ZONE, zone));
    }
    config
}

/// `key=value` pairs joined by `,`, ordered by key
pub fn marshal_annotations(annotations: &BTreeMap<String, String>) -> String {
    annotations
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}
