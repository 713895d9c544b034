//! # Cloud Providers
//!
//! Provider identifiers and the literal topology tables used to render
//! create-shoot steps.
//!
//! Each supported provider owns exactly one [`ProviderProfile`]; the step
//! templates are a single generic routine over that table.

use crate::error::TemplateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cloud provider identifier
///
/// Only AWS, GCP, and Azure carry a create-shoot template. The remaining
/// providers are valid identifiers that the templates reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Gcp,
    Azure,
    Alicloud,
    Openstack,
    Packet,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 6] = [
        CloudProvider::Aws,
        CloudProvider::Gcp,
        CloudProvider::Azure,
        CloudProvider::Alicloud,
        CloudProvider::Openstack,
        CloudProvider::Packet,
    ];

    /// Lowercase identifier as used in step and definition names
    pub fn as_str(self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Azure => "azure",
            CloudProvider::Alicloud => "alicloud",
            CloudProvider::Openstack => "openstack",
            CloudProvider::Packet => "packet",
        }
    }

    /// Literal topology table for this provider
    ///
    /// Returns `None` for providers without a create-shoot template.
    pub fn profile(self) -> Option<&'static ProviderProfile> {
        match self {
            CloudProvider::Aws => Some(&AWS_PROFILE),
            CloudProvider::Gcp => Some(&GCP_PROFILE),
            CloudProvider::Azure => Some(&AZURE_PROFILE),
            CloudProvider::Alicloud | CloudProvider::Openstack | CloudProvider::Packet => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self.profile().is_some()
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudProvider {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        CloudProvider::ALL
            .into_iter()
            .find(|provider| provider.as_str() == normalized)
            .ok_or_else(|| TemplateError::UnknownProvider(s.to_string()))
    }
}

/// Fixed credential and topology values for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider: CloudProvider,
    /// Value of both `CLOUDPROVIDER` and `PROVIDER_TYPE`
    pub provider_type: &'static str,
    pub cloudprofile: &'static str,
    pub secret_binding: &'static str,
    pub region: &'static str,
    /// Not every provider pins a zone
    pub zone: Option<&'static str>,
}

pub const AWS_PROFILE: ProviderProfile = ProviderProfile {
    provider: CloudProvider::Aws,
    provider_type: "aws",
    cloudprofile: "aws",
    secret_binding: "core-aws-aws",
    region: "eu-west-1",
    zone: Some("eu-west-1b"),
};

pub const GCP_PROFILE: ProviderProfile = ProviderProfile {
    provider: CloudProvider::Gcp,
    provider_type: "gcp",
    cloudprofile: "gcp",
    secret_binding: "core-gcp-gcp",
    region: "europe-west1",
    zone: Some("europe-west1-b"),
};

pub const AZURE_PROFILE: ProviderProfile = ProviderProfile {
    provider: CloudProvider::Azure,
    provider_type: "azure",
    cloudprofile: "azure",
    secret_binding: "core-azure-azure",
    region: "westeurope",
    zone: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_case_insensitive() {
        assert_eq!("aws".parse::<CloudProvider>(), Ok(CloudProvider::Aws));
        assert_eq!(" GCP ".parse::<CloudProvider>(), Ok(CloudProvider::Gcp));
        assert_eq!("Azure".parse::<CloudProvider>(), Ok(CloudProvider::Azure));
        assert_eq!(
            "openstack".parse::<CloudProvider>(),
            Ok(CloudProvider::Openstack)
        );
    }

    #[test]
    fn test_parse_unknown_provider() {
        let err = "digitalocean".parse::<CloudProvider>().unwrap_err();
        assert_eq!(err, TemplateError::UnknownProvider("digitalocean".into()));
    }

    #[test]
    fn test_display_matches_serde() {
        for provider in CloudProvider::ALL {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{provider}\""));
        }
    }

    #[test]
    fn test_only_three_providers_have_templates() {
        let supported: Vec<_> = CloudProvider::ALL
            .into_iter()
            .filter(|p| p.is_supported())
            .collect();
        assert_eq!(
            supported,
            vec![CloudProvider::Aws, CloudProvider::Gcp, CloudProvider::Azure]
        );
    }

    #[test]
    fn test_profiles_belong_to_their_provider() {
        for provider in CloudProvider::ALL {
            if let Some(profile) = provider.profile() {
                assert_eq!(profile.provider, provider);
                assert_eq!(profile.provider_type, provider.as_str());
            }
        }
    }
}
