//! # Custom Resource Definitions
//!
//! Step descriptors and the Testrun resource that carries them.
//!
//! ## Module Structure
//!
//! - `step.rs` - DAG steps, step definitions and config elements
//! - `testrun.rs` - Testrun custom resource

mod step;
mod testrun;

// Re-export all public types
pub use step::{ConfigElement, ConfigType, DagStep, StepDefinition};
pub use testrun::{Testrun, TestrunSpec};
