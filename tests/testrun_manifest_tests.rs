//! # Testrun Manifest Tests
//!
//! Verifies the shape of rendered Testrun manifests and shoot config loading.

use testrun_renderer::config::OutputFormat;
use testrun_renderer::prelude::*;
use testrun_renderer::testflow::render_manifest;

fn rendered_testrun(provider: CloudProvider) -> Testrun {
    let cfg = CreateShootConfig {
        shoot_name: "it-shoot".to_string(),
        namespace: "garden-it".to_string(),
        k8s_version: "1.30.2".to_string(),
        allow_privileged_containers: Some(true),
        ..CreateShootConfig::default()
    };
    let dependencies = vec!["install-gardener".to_string()];

    let mut flow = Testflow::new();
    flow.add_create_shoot(provider, "", &dependencies, &cfg)
        .expect("Should render create-shoot steps");
    flow.validate(&dependencies).expect("Should be a valid testflow");
    flow.into_testrun("create-shoot-", "default", Some(3600))
}

#[test]
fn test_json_manifest_shape() {
    let testrun = rendered_testrun(CloudProvider::Gcp);
    let json: serde_json::Value =
        serde_json::from_str(&render_manifest(&testrun, OutputFormat::Json).unwrap()).unwrap();

    assert_eq!(json["apiVersion"], "testmachinery.sapcloud.io/v1beta1");
    assert_eq!(json["kind"], "Testrun");
    assert_eq!(json["metadata"]["generateName"], "create-shoot-");
    assert_eq!(json["metadata"]["namespace"], "default");
    assert_eq!(json["spec"]["ttlSecondsAfterFinished"], 3600);
    assert!(json["spec"].get("onExit").is_none());

    let testflow = json["spec"]["testflow"].as_array().unwrap();
    assert_eq!(testflow.len(), 2);
    assert_eq!(testflow[0]["name"], "create-shoot-gcp-gen");
    assert_eq!(testflow[0]["definition"]["name"], "gen-provider-gcp");
    assert_eq!(testflow[0]["dependsOn"], serde_json::json!(["install-gardener"]));
    assert_eq!(testflow[1]["dependsOn"], serde_json::json!(["create-shoot-gcp-gen"]));
    assert!(testflow[1].get("useGlobalArtifacts").is_none());
    assert!(testflow[1].get("artifactsFrom").is_none());

    let config = testflow[1]["definition"]["config"].as_array().unwrap();
    assert!(config.iter().any(|e| e
        == &serde_json::json!({
            "type": "env",
            "name": "ALLOW_PRIVILEGED_CONTAINERS",
            "value": "true"
        })));
}

#[test]
fn test_yaml_manifest_round_trips() {
    let testrun = rendered_testrun(CloudProvider::Aws);
    let yaml = render_manifest(&testrun, OutputFormat::Yaml).unwrap();
    assert!(yaml.contains("kind: Testrun"));

    let parsed: Testrun = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed.spec, testrun.spec);
}

#[test]
fn test_chained_create_shoots_validate() {
    let cfg = CreateShootConfig {
        shoot_name: "s".to_string(),
        namespace: "garden-it".to_string(),
        k8s_version: "1.30.2".to_string(),
        ..CreateShootConfig::default()
    };

    let mut flow = Testflow::new();
    let first = flow
        .add_create_shoot(CloudProvider::Aws, "", &[], &cfg)
        .unwrap();
    let second = flow
        .add_create_shoot(CloudProvider::Azure, "", &[first.clone()], &cfg)
        .unwrap();

    assert_eq!(second, "create-shoot-azure");
    assert_eq!(flow.steps().len(), 4);
    assert_eq!(flow.steps()[2].depends_on, vec![first]);
    assert_eq!(flow.validate(&[]), Ok(()));
}

#[test]
fn test_same_provider_twice_is_a_duplicate() {
    let cfg = CreateShootConfig::default();
    let mut flow = Testflow::new();
    flow.add_create_shoot(CloudProvider::Gcp, "", &[], &cfg).unwrap();
    flow.add_create_shoot(CloudProvider::Gcp, "", &[], &cfg).unwrap();
    assert_eq!(
        flow.validate(&[]),
        Err(TemplateError::DuplicateStep("create-shoot-gcp-gen".to_string()))
    );
}

#[test]
fn test_external_dependency_must_be_declared() {
    let mut flow = Testflow::new();
    flow.add_create_shoot(
        CloudProvider::Aws,
        "",
        &["install-gardener".to_string()],
        &CreateShootConfig::default(),
    )
    .unwrap();
    assert!(matches!(
        flow.validate(&[]),
        Err(TemplateError::UnknownDependency { .. })
    ));
}

#[test]
fn test_shoot_config_from_partial_yaml() {
    let yaml = r#"
shootName: it-shoot
k8sVersion: "1.30"
allowPrivilegedContainers: false
shootAnnotations:
  owner: ci
"#;
    let cfg: CreateShootConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.shoot_name, "it-shoot");
    assert_eq!(cfg.namespace, "");
    assert_eq!(cfg.k8s_version, "1.30");
    assert_eq!(cfg.allow_privileged_containers, Some(false));
    assert_eq!(cfg.shoot_annotations.get("owner").map(String::as_str), Some("ci"));
}

#[test]
fn test_shoot_config_without_flag_stays_unset() {
    let cfg: CreateShootConfig = serde_yaml::from_str("shootName: a\n").unwrap();
    assert_eq!(cfg.allow_privileged_containers, None);
}
