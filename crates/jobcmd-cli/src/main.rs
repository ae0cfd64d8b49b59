use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing::info_span;
use tracing_subscriber::EnvFilter;

use jobcmd_catalog_sqlite::SqliteCatalog;
use jobcmd_core::{properties_by_name, ExecutionContext, Property, Resource, ResourceType};
use jobcmd_engine::{CommandBuilder, Config};

#[derive(Parser)]
#[command(name = "jobcmd", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config and create the resource catalog
    Init,

    /// Build the submit command for one task attempt and print it
    Build {
        /// File holding the JSON task parameters
        #[arg(long)]
        payload: String,
        #[arg(long, default_value = "default")]
        queue: String,
        #[arg(long, default_value = "SPARK")]
        task_type: String,
        /// JSON list of {"prop", "value"} entries
        #[arg(long)]
        local_params: Option<String>,
        #[arg(long)]
        global_params: Option<String>,
        /// Supplementary parameters from a parent workflow
        #[arg(long)]
        params: Option<String>,
        /// e.g. "2024-03-10 02:00:00"
        #[arg(long)]
        schedule_time: Option<String>,
        #[arg(long)]
        task_instance_id: Option<String>,
    },

    /// Register a resource in the catalog
    ResourceAdd {
        #[arg(long)]
        id: i32,
        #[arg(long)]
        full_name: String,
        #[arg(long, default_value_t = false)]
        udf: bool,
    },

    /// List catalog resources
    ResourceList,
}

fn read_properties(path: &str) -> anyhow::Result<BTreeMap<String, Property>> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let props: Vec<Property> = serde_json::from_str(&s).with_context(|| format!("parse {}", path))?;
    Ok(properties_by_name(&props))
}

fn open_catalog(config: &Config) -> anyhow::Result<SqliteCatalog> {
    SqliteCatalog::open(&config.catalog_db_path())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let root = std::env::current_dir()?;
    let config_path = Config::config_path(&root);
    let config = Config::load_or_default(&config_path)?;

    match cli.cmd {
        Command::Init => {
            if !config_path.exists() {
                config.save_to(&config_path)?;
            }
            open_catalog(&config)?;
            println!("Initialized jobcmd in {}", root.display());
        }
        Command::Build {
            payload,
            queue,
            task_type,
            local_params,
            global_params,
            params,
            schedule_time,
            task_instance_id,
        } => {
            let task_params =
                std::fs::read_to_string(Path::new(&payload)).with_context(|| format!("read {}", payload))?;
            let mut ctx = ExecutionContext::new(task_params, queue);
            ctx.task_type = task_type;
            ctx.task_instance_id = task_instance_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            if let Some(p) = local_params {
                ctx.local_params = read_properties(&p)?;
            }
            if let Some(p) = global_params {
                ctx.global_params = read_properties(&p)?;
            }
            if let Some(p) = params {
                ctx.params_map = Some(read_properties(&p)?);
            }
            if let Some(t) = schedule_time {
                let at = NaiveDateTime::parse_from_str(&t, "%Y-%m-%d %H:%M:%S")
                    .with_context(|| format!("bad schedule time {:?}", t))?;
                ctx.schedule_time = Some(at);
            }

            let _span = info_span!("task_attempt", id = %ctx.task_instance_id).entered();
            let catalog = open_catalog(&config)?;
            let builder = CommandBuilder::new(Arc::new(catalog), config);
            let command = builder.build(&ctx)?;
            println!("{}", command);
        }
        Command::ResourceAdd { id, full_name, udf } => {
            let catalog = open_catalog(&config)?;
            let kind = if udf { ResourceType::Udf } else { ResourceType::File };
            catalog.insert_resource(&Resource { id, full_name: full_name.clone(), kind }, jobcmd_catalog_sqlite::now_unix())?;
            println!("Added resource {} {}", id, full_name);
        }
        Command::ResourceList => {
            let catalog = open_catalog(&config)?;
            let resources = catalog.list_resources()?;
            println!("Resources: {}", resources.len());
            for r in resources {
                println!("- {} [{}] {}", r.id, r.kind.as_str(), r.full_name);
            }
        }
    }

    Ok(())
}
