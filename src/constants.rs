//! # Constants
//!
//! Names and fixed values of the configuration elements handed to the
//! create-shoot and provider generator steps.
//!
//! The step images read these as environment variables, so the names are part
//! of the contract with the test definitions and must not change.

/// Name of the shoot to create
pub const CONFIG_SHOOT_NAME: &str = "SHOOT_NAME";

/// Garden project namespace the shoot lives in
pub const CONFIG_PROJECT_NAMESPACE: &str = "PROJECT_NAMESPACE";

/// Kubernetes version of the shoot
pub const CONFIG_K8S_VERSION: &str = "K8S_VERSION";

/// Seed the shoot is scheduled on
pub const CONFIG_SEED: &str = "SEED";

/// Seed every rendered shoot is pinned to
pub const CONFIG_SEED_VALUE: &str = "aws";

/// Shoot annotations, marshalled as `key=value` pairs joined by `,`
pub const CONFIG_SHOOT_ANNOTATIONS: &str = "SHOOT_ANNOTATIONS";

/// Whether privileged containers are allowed in the shoot
/// Only emitted when explicitly configured
pub const CONFIG_ALLOW_PRIVILEGED_CONTAINERS: &str = "ALLOW_PRIVILEGED_CONTAINERS";

pub const CONFIG_CLOUDPROVIDER: &str = "CLOUDPROVIDER";
pub const CONFIG_PROVIDER_TYPE: &str = "PROVIDER_TYPE";
pub const CONFIG_CLOUDPROFILE: &str = "CLOUDPROFILE";
pub const CONFIG_SECRET_BINDING: &str = "SECRET_BINDING";
pub const CONFIG_REGION: &str = "REGION";
pub const CONFIG_ZONE: &str = "ZONE";

/// Environment variable pointing the generator at its controlplane output file
pub const CONFIG_CONTROLPLANE_PROVIDER_PATH_NAME: &str = "CONTROLPLANE_PROVIDER_CONFIG_FILEPATH";

/// Shared location the generator writes the controlplane provider config to
pub const CONFIG_CONTROLPLANE_PROVIDER_PATH: &str = "/tmp/tm/shared/generators/controlplane.yaml";

/// Environment variable pointing the generator at its infrastructure output file
pub const CONFIG_INFRASTRUCTURE_PROVIDER_PATH_NAME: &str =
    "INFRASTRUCTURE_PROVIDER_CONFIG_FILEPATH";

/// Shared location the generator writes the infrastructure provider config to
pub const CONFIG_INFRASTRUCTURE_PROVIDER_PATH: &str = "/tmp/tm/shared/generators/infra.yaml";

/// Test definition that creates the shoot
pub const CREATE_SHOOT_DEFINITION: &str = "create-shoot";

/// Prefix of the per-provider generator test definitions (`gen-provider-<provider>`)
pub const GENERATOR_DEFINITION_PREFIX: &str = "gen-provider";

/// Suffix appended to a create step's name to derive its generator step's name
pub const GENERATOR_STEP_SUFFIX: &str = "-gen";

/// Prefix of the default create step name (`create-shoot-<provider>`)
pub const DEFAULT_CREATE_SHOOT_STEP_PREFIX: &str = "create-shoot";

/// Default namespace Testrun manifests are rendered into
pub const DEFAULT_TESTRUN_NAMESPACE: &str = "default";

/// Default `generateName` prefix for rendered Testruns
pub const DEFAULT_TESTRUN_GENERATE_NAME: &str = "create-shoot-";
