//! # Testrun
//!
//! The custom resource the rendered steps are delivered in.

use super::step::DagStep;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Testrun Custom Resource Definition
///
/// Only the fields this renderer fills are modelled; the engine owns the rest.
///
/// # Example
///
/// ```yaml
/// apiVersion: testmachinery.sapcloud.io/v1beta1
/// kind: Testrun
/// metadata:
///   generateName: create-shoot-
///   namespace: default
/// spec:
///   testflow:
///   - name: create-shoot-aws-gen
///     definition:
///       name: gen-provider-aws
///   - name: create-shoot-aws
///     definition:
///       name: create-shoot
///     dependsOn:
///     - create-shoot-aws-gen
/// ```
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "Testrun",
    group = "testmachinery.sapcloud.io",
    version = "v1beta1",
    namespaced,
    shortname = "tr",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct TestrunSpec {
    /// Steps executed as a DAG
    #[serde(default)]
    pub testflow: Vec<DagStep>,
    /// Steps executed after the testflow finished, regardless of its outcome
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_exit: Vec<DagStep>,
    /// Seconds after completion before the Testrun is garbage collected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds_after_finished: Option<i32>,
}
