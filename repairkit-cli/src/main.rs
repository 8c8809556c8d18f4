mod explain;
mod quote;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use repairkit_config::{
    ConfigSnapshot, OpenCategoryRegistry, StaticCategoryRegistry, discover_config, load_config,
};
use repairkit_core::{EngineBuilder, PermissionSet};
use repairkit_types::Item;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "repairkit",
    version,
    about = "Validate repair configs and quote repair costs."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate a config, then print a summary.
    Check(CheckArgs),
    /// Quote repair costs for every actor in an inventory file.
    Quote(QuoteArgs),
    /// Show how an item is matched against each cost exception.
    Explain(ExplainArgs),
}

#[derive(Debug, clap::Args)]
struct ConfigArgs {
    /// Path to a config file (default: <root>/repairkit.toml).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Directory searched for repairkit.toml when --config is not given.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Known category names. If omitted, any well-formed name is accepted.
    #[arg(long = "category")]
    categories: Vec<String>,
}

#[derive(Debug, Parser)]
struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct QuoteArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// JSON file mapping actor names to their slots.
    #[arg(long)]
    inventory: Utf8PathBuf,

    /// Only quote this actor.
    #[arg(long)]
    actor: Option<String>,

    /// Permissions granted to every quoted actor (e.g. repairkit.bypass.cost).
    #[arg(long = "grant")]
    grants: Vec<String>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// JSON file holding a single item.
    #[arg(long)]
    item: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Quote(args) => cmd_quote(args),
        Command::Explain(args) => cmd_explain(args),
    }
}

fn load_snapshot(args: &ConfigArgs) -> anyhow::Result<ConfigSnapshot> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => discover_config(&args.root)
            .with_context(|| format!("no repairkit.toml found in {}", args.root))?,
    };
    debug!("loading config from {}", path);

    let raw = load_config(&path).with_context(|| format!("load {}", path))?;
    let validated = if args.categories.is_empty() {
        ConfigSnapshot::load(&raw, &OpenCategoryRegistry)
    } else {
        let registry = StaticCategoryRegistry::from_names(&args.categories);
        ConfigSnapshot::load(&raw, &registry)
    };
    validated.with_context(|| format!("validate {}", path))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Utf8Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.config)?;

    match args.format {
        OutputFormat::Text => {
            println!("config OK");
            println!("  default cost:          {:.2}", snapshot.default_cost);
            println!(
                "  durability multiplier: {:.2}",
                snapshot.durability_multiplier
            );
            println!(
                "  cooldowns:             hand {}s, all {}s",
                snapshot.hand_cooldown.as_secs(),
                snapshot.all_cooldown.as_secs()
            );
            println!(
                "  economy:               {}",
                if snapshot.economy_enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            println!(
                "  cost exceptions:       {}",
                snapshot.cost_exceptions.len()
            );
            for (index, exception) in snapshot.cost_exceptions.iter().enumerate() {
                println!(
                    "    [{}] {} -> {:.2} ({})",
                    index, exception.label, exception.cost, exception.template.category
                );
            }
            println!("  excluded categories:   {}", snapshot.exclusions.len());
            let mut exclusions: Vec<_> = snapshot.exclusions.iter().collect();
            exclusions.sort_by(|a, b| a.0.cmp(b.0));
            for (category, variants) in exclusions {
                let list: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
                println!("    {} [{}]", category, list.join(", "));
            }
        }
        OutputFormat::Json => {
            let exceptions: Vec<_> = snapshot
                .cost_exceptions
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "label": e.label,
                        "category": e.template.category,
                        "cost": e.cost,
                    })
                })
                .collect();
            let summary = serde_json::json!({
                "default_cost": snapshot.default_cost,
                "durability_multiplier": snapshot.durability_multiplier,
                "cooldown": {
                    "hand": snapshot.hand_cooldown.as_secs(),
                    "all": snapshot.all_cooldown.as_secs(),
                },
                "economy": snapshot.economy_enabled,
                "cost_exceptions": exceptions,
                "excluded_categories": snapshot.exclusions.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn cmd_quote(args: QuoteArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.config)?;
    let file: quote::InventoryFile = read_json(&args.inventory)?;
    let (actors, inventory) = quote::into_slot_inventory(file);

    let selected: Vec<_> = match &args.actor {
        Some(name) => {
            let found: Vec<_> = actors.iter().filter(|(n, _)| n == name).collect();
            if found.is_empty() {
                anyhow::bail!("actor '{}' not found in {}", name, args.inventory);
            }
            found
        }
        None => actors.iter().collect(),
    };

    let permissions = Arc::new(PermissionSet::new());
    for (_, id) in &selected {
        for grant in &args.grants {
            permissions.grant(*id, grant.clone());
        }
    }
    let engine = EngineBuilder::new(snapshot)
        .permissions(permissions)
        .build();

    let quotes: Vec<_> = selected
        .iter()
        .map(|(name, id)| quote::quote_actor(&engine, &inventory, name, id))
        .collect();

    match args.format {
        OutputFormat::Text => print!("{}", quote::render_text(&quotes)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&quotes)?),
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.config)?;
    let item: Item = read_json(&args.item)?;

    let rows = explain::explain_item(&snapshot, &item);
    match args.format {
        OutputFormat::Text => print!("{}", explain::render_text(&snapshot, &item, &rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
