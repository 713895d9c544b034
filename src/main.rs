//! # Testrun Renderer
//!
//! Renders a Testrun manifest with the steps that create a shoot on AWS, GCP,
//! or Azure.
//!
//! ## Usage
//!
//! ```bash
//! # Render the create-shoot steps for GCP as YAML
//! testrun-renderer render --provider gcp --shoot-name it-shoot \
//!     --namespace garden-it --k8s-version 1.30.2
//!
//! # Load shoot settings from a file and chain after an existing step
//! testrun-renderer render --provider aws --shoot-config shoot.yaml \
//!     --depends-on install-gardener --output json
//!
//! # Print the Testrun CRD
//! testrun-renderer crd
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kube::core::CustomResourceExt;
use std::path::PathBuf;
use testrun_renderer::config::{OutputFormat, RendererConfig};
use testrun_renderer::crd::Testrun;
use testrun_renderer::provider::CloudProvider;
use testrun_renderer::templates::{parse_annotation, CreateShootConfig, ShootOverrides};
use testrun_renderer::testflow::{render_manifest, Testflow};
use tracing::info;

/// Testrun renderer for cloud test environments
#[derive(Parser)]
#[command(
    name = "testrun-renderer",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"),
    about = "Renders create-shoot steps and Testrun manifests",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (overrides LOG_LEVEL; RUST_LOG still wins)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Testrun with the create-shoot steps for one provider
    Render(RenderArgs),
    /// Print the Testrun CustomResourceDefinition as YAML
    Crd,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Cloud provider (aws, gcp, azure)
    #[arg(short, long)]
    provider: CloudProvider,

    /// Name of the create step (defaults to create-shoot-<provider>)
    #[arg(long, default_value = "")]
    name: String,

    /// Upstream step the generator step depends on (repeatable)
    #[arg(long = "depends-on", value_name = "STEP")]
    depends_on: Vec<String>,

    /// YAML file with shoot settings; flags below override its values
    #[arg(long, value_name = "FILE")]
    shoot_config: Option<PathBuf>,

    #[arg(long)]
    shoot_name: Option<String>,

    /// Garden project namespace of the shoot
    #[arg(long)]
    namespace: Option<String>,

    #[arg(long)]
    k8s_version: Option<String>,

    /// Allow privileged containers; omitted from the step config when not given
    #[arg(
        long,
        value_name = "BOOL",
        action = clap::ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    allow_privileged_containers: Option<bool>,

    /// Shoot annotation as key=value (repeatable)
    #[arg(long = "annotation", value_name = "KEY=VALUE", value_parser = parse_annotation)]
    annotations: Vec<(String, String)>,

    /// Output format (overrides OUTPUT_FORMAT)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Testrun name; a trailing '-' renders it as generateName (overrides TESTRUN_NAME)
    #[arg(long)]
    testrun_name: Option<String>,

    /// Namespace of the Testrun (overrides TESTRUN_NAMESPACE)
    #[arg(long)]
    testrun_namespace: Option<String>,

    /// Seconds before a finished Testrun is garbage collected (overrides TESTRUN_TTL_SECONDS)
    #[arg(long)]
    ttl_seconds: Option<i32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RendererConfig::from_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    testrun_renderer::logging::init(&config)?;

    info!(
        "testrun-renderer {} (git {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_GIT_HASH"),
        env!("BUILD_DATETIME")
    );

    match cli.command {
        Commands::Render(args) => render_command(&args, config),
        Commands::Crd => crd_command(),
    }
}

fn render_command(args: &RenderArgs, mut config: RendererConfig) -> Result<()> {
    if let Some(output) = args.output {
        config.output_format = output;
    }
    if let Some(name) = &args.testrun_name {
        config.testrun_name.clone_from(name);
    }
    if let Some(namespace) = &args.testrun_namespace {
        config.testrun_namespace.clone_from(namespace);
    }
    if args.ttl_seconds.is_some() {
        config.testrun_ttl_seconds = args.ttl_seconds;
    }

    let shoot = shoot_config(args)?;

    let mut flow = Testflow::new();
    let create_step = flow
        .add_create_shoot(args.provider, &args.name, &args.depends_on, &shoot)
        .with_context(|| format!("Failed to render create-shoot steps for {}", args.provider))?;
    flow.validate(&args.depends_on)
        .context("Rendered testflow is invalid")?;

    info!(
        provider = %args.provider,
        step = %create_step,
        shoot = %shoot.shoot_name,
        "Rendered create-shoot testflow"
    );

    let testrun = flow.into_testrun(
        &config.testrun_name,
        &config.testrun_namespace,
        config.testrun_ttl_seconds,
    );
    print!("{}", render_manifest(&testrun, config.output_format)?);
    if config.output_format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn crd_command() -> Result<()> {
    let crd = serde_yaml::to_string(&Testrun::crd()).context("Failed to serialize Testrun CRD")?;
    print!("{crd}");
    Ok(())
}

/// Merge the optional shoot config file with the command-line flags
fn shoot_config(args: &RenderArgs) -> Result<CreateShootConfig> {
    let mut shoot = match &args.shoot_config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read shoot config {}", path.display()))?;
            serde_yaml::from_str::<CreateShootConfig>(&contents)
                .with_context(|| format!("Failed to parse shoot config {}", path.display()))?
        }
        None => CreateShootConfig::default(),
    };

    shoot.apply_overrides(ShootOverrides {
        shoot_name: args.shoot_name.clone(),
        namespace: args.namespace.clone(),
        k8s_version: args.k8s_version.clone(),
        allow_privileged_containers: args.allow_privileged_containers,
        shoot_annotations: args.annotations.clone(),
    });
    shoot
        .ensure_complete()
        .context("Set it with a flag or in --shoot-config")?;

    Ok(shoot)
}
