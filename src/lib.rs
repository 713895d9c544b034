//! Testrun Renderer Library
//!
//! Renders the provider-specific steps that create a Gardener shoot for
//! integration tests, and the Testrun manifest that carries them.
//!
//! ```rust
//! use testrun_renderer::prelude::*;
//!
//! let cfg = CreateShootConfig {
//!     shoot_name: "it-shoot".into(),
//!     namespace: "garden-it".into(),
//!     k8s_version: "1.30.2".into(),
//!     ..CreateShootConfig::default()
//! };
//! let (steps, name) = step_create_shoot(CloudProvider::Gcp, "", &[], &cfg).unwrap();
//! assert_eq!(name, "create-shoot-gcp");
//! assert_eq!(steps[1].depends_on, vec!["create-shoot-gcp-gen".to_string()]);
//! ```

pub mod config;
pub mod constants;
pub mod crd;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod provider;
pub mod templates;
pub mod testflow;
