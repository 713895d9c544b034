//! Prelude module for convenient imports
//!
//! ```rust
//! use testrun_renderer::prelude::*;
//! ```

pub use crate::crd::{ConfigElement, ConfigType, DagStep, StepDefinition, Testrun, TestrunSpec};
pub use crate::error::TemplateError;
pub use crate::provider::{CloudProvider, ProviderProfile};
pub use crate::templates::{step_create_shoot, CreateShootConfig};
pub use crate::testflow::Testflow;
