//! # Step Templates
//!
//! Builders that render ready-to-schedule DAG steps.

pub mod shoot;

pub use shoot::{
    default_shoot_config, default_step_name, generator_step_name, marshal_annotations,
    parse_annotation, step_create_shoot, CreateShootConfig, ShootOverrides,
};
