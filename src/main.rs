use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use decs_lookup::controller::{self, ControllerConfig};
use decs_lookup::lookups::{image, resgroup};
use decs_lookup::{CatalogClient, HttpTransport, LookupRegistry, MatchPolicy, ResourceState, Resolver};

/// Resolve a single DECS catalogue object from filter criteria.
#[derive(Debug, Parser)]
#[command(name = "decs-lookup", version)]
struct Cli {
    /// Controller config as JSON; falls back to DECS_* environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail when more than one record matches instead of taking the first.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    lookup: Lookup,
}

#[derive(Debug, Subcommand)]
enum Lookup {
    /// OS image by name, optionally narrowed by pool, SEP, tenant or resource group.
    Image {
        #[arg(long)]
        name: String,
        #[arg(long)]
        pool: Option<String>,
        #[arg(long)]
        sep_id: Option<i64>,
        #[arg(long)]
        tenant_id: Option<i64>,
        #[arg(long)]
        rgid: Option<i64>,
    },
    /// Resource group by name, optionally within a tenant.
    Resgroup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        tenant_id: Option<i64>,
    },
}

impl Lookup {
    /// Registry type name plus the raw criteria object the data source expects.
    fn into_request(self) -> (&'static str, Value) {
        match self {
            Lookup::Image {
                name,
                pool,
                sep_id,
                tenant_id,
                rgid,
            } => (
                image::TYPE_NAME,
                json!({"name": name, "pool": pool, "sep_id": sep_id, "tenant_id": tenant_id, "rgid": rgid}),
            ),
            Lookup::Resgroup { name, tenant_id } => {
                (resgroup::TYPE_NAME, json!({"name": name, "tenant_id": tenant_id}))
            }
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ControllerConfig> {
    match path {
        Some(path) => controller::load_from_file(path)
            .with_context(|| format!("load controller config from {}", path.display())),
        None => controller::load_from_env().context("load controller config from environment"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let catalog = CatalogClient::new(HttpTransport::new(&config)?);

    let policy = if cli.strict {
        MatchPolicy::Strict
    } else {
        MatchPolicy::FirstMatch
    };
    let registry = LookupRegistry::with_defaults(Resolver::new(policy));

    let (type_name, criteria) = cli.lookup.into_request();
    let mut state = ResourceState::new();
    registry
        .read(type_name, &criteria, &catalog, &mut state)
        .await
        .with_context(|| format!("{type_name} lookup failed"))?;

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
