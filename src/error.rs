//! Error types for step rendering and testflow assembly

use crate::provider::CloudProvider;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The provider is known but has no create-shoot template
    #[error("unsupported cloudprovider {0}")]
    UnsupportedProvider(CloudProvider),

    /// The string does not name any cloud provider
    #[error("unknown cloudprovider '{0}' (expected one of: aws, gcp, azure, alicloud, openstack, packet)")]
    UnknownProvider(String),

    /// Two steps in one testflow share a name
    #[error("duplicate step name '{0}' in testflow")]
    DuplicateStep(String),

    /// A step depends on a step that is neither in the testflow nor declared external
    #[error("step '{step}' depends on unknown step '{dependency}'")]
    UnknownDependency { step: String, dependency: String },

    /// The step is part of a dependency cycle
    #[error("step '{step}' is part of a dependency cycle")]
    CyclicDependency { step: String },

    /// A required shoot setting is empty after merging file and flags
    #[error("shoot setting '{0}' is required")]
    MissingShootSetting(&'static str),
}

pub type Result<T, E = TemplateError> = std::result::Result<T, E>;
