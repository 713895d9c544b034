//! # Testflow Assembly
//!
//! Collects rendered steps into an ordered testflow, checks that the DAG
//! references resolve, and wraps the result in a [`Testrun`].

use crate::config::OutputFormat;
use crate::constants::DEFAULT_TESTRUN_GENERATE_NAME;
use crate::crd::{DagStep, Testrun, TestrunSpec};
use crate::error::{Result, TemplateError};
use crate::provider::CloudProvider;
use crate::templates::{step_create_shoot, CreateShootConfig};
use anyhow::Context;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ordered list of steps making up one testflow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Testflow {
    steps: Vec<DagStep>,
}

impl Testflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: DagStep) {
        self.steps.push(step);
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = DagStep>) {
        self.steps.extend(steps);
    }

    pub fn steps(&self) -> &[DagStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render the create-shoot steps for `cloudprovider` and append them
    ///
    /// Returns the name of the create step so follow-up steps can depend on it.
    /// Nothing is appended on error.
    ///
    /// # Errors
    ///
    /// Propagates [`TemplateError::UnsupportedProvider`] from the template.
    pub fn add_create_shoot(
        &mut self,
        cloudprovider: CloudProvider,
        name: &str,
        dependencies: &[String],
        cfg: &CreateShootConfig,
    ) -> Result<String> {
        let (steps, name) = step_create_shoot(cloudprovider, name, dependencies, cfg)?;
        self.extend(steps);
        Ok(name)
    }

    /// Check that the steps form a DAG the engine can schedule
    ///
    /// Step names must be unique, every dependency must resolve, and the
    /// dependencies must not form a cycle. A dependency resolves if it names a
    /// step of this flow or one of `external`, the steps that live outside
    /// this flow.
    ///
    /// # Errors
    ///
    /// [`TemplateError::DuplicateStep`], [`TemplateError::UnknownDependency`] or
    /// [`TemplateError::CyclicDependency`] for the first offending step.
    pub fn validate(&self, external: &[String]) -> Result<()> {
        let mut names = HashSet::with_capacity(self.steps.len());
        for step in &self.steps {
            if !names.insert(step.name.as_str()) {
                return Err(TemplateError::DuplicateStep(step.name.clone()));
            }
        }

        for step in &self.steps {
            for dependency in &step.depends_on {
                let known = names.contains(dependency.as_str())
                    || external.iter().any(|e| e == dependency);
                if !known {
                    return Err(TemplateError::UnknownDependency {
                        step: step.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        if let Some(step) = self.find_cycle() {
            return Err(TemplateError::CyclicDependency {
                step: step.to_string(),
            });
        }

        debug!(steps = self.steps.len(), "Testflow validated");
        Ok(())
    }

    /// Depth-first search over in-flow dependencies
    ///
    /// Returns a step that lies on a cycle, if any.
    fn find_cycle(&self) -> Option<&str> {
        let index: HashMap<&str, &DagStep> = self
            .steps
            .iter()
            .map(|step| (step.name.as_str(), step))
            .collect();
        let mut state = HashMap::with_capacity(index.len());

        self.steps
            .iter()
            .find_map(|step| visit(step.name.as_str(), &index, &mut state))
    }

    /// Wrap the flow in a Testrun
    ///
    /// `name` is used as `generateName` when it ends in `-`, as the fixed name
    /// otherwise. A blank name falls back to the default `generateName`.
    pub fn into_testrun(
        self,
        name: &str,
        namespace: &str,
        ttl_seconds_after_finished: Option<i32>,
    ) -> Testrun {
        let name = match name.trim() {
            "" => DEFAULT_TESTRUN_GENERATE_NAME,
            trimmed => trimmed,
        };
        let (fixed_name, generate_name) = if name.ends_with('-') {
            (None, Some(name.to_string()))
        } else {
            (Some(name.to_string()), None)
        };

        Testrun {
            metadata: ObjectMeta {
                name: fixed_name,
                generate_name,
                namespace: Some(namespace.to_string()),
                ..ObjectMeta::default()
            },
            spec: TestrunSpec {
                testflow: self.steps,
                on_exit: Vec::new(),
                ttl_seconds_after_finished,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

fn visit<'a>(
    name: &'a str,
    index: &HashMap<&'a str, &'a DagStep>,
    state: &mut HashMap<&'a str, VisitState>,
) -> Option<&'a str> {
    match state.get(name) {
        Some(VisitState::Done) => return None,
        Some(VisitState::InProgress) => return Some(name),
        None => {}
    }
    state.insert(name, VisitState::InProgress);

    if let Some(&step) = index.get(name) {
        for dependency in &step.depends_on {
            // External dependencies cannot close a cycle inside this flow
            if !index.contains_key(dependency.as_str()) {
                continue;
            }
            if let Some(on_cycle) = visit(dependency.as_str(), index, state) {
                return Some(on_cycle);
            }
        }
    }

    state.insert(name, VisitState::Done);
    None
}

/// Serialise a Testrun manifest
///
/// # Errors
///
/// Fails if the manifest cannot be serialised.
pub fn render_manifest(testrun: &Testrun, format: OutputFormat) -> anyhow::Result<String> {
    let manifest = match format {
        OutputFormat::Yaml => serde_yaml::to_string(testrun)
            .context("Failed to serialize Testrun to YAML")?,
        OutputFormat::Json => serde_json::to_string_pretty(testrun)
            .context("Failed to serialize Testrun to JSON")?,
    };
    Ok(manifest)
}
