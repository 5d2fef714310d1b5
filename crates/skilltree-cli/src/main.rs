//! CLI binary for the skill tree engine: render, resolve, check, and inspect
//! trick-set documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skilltree_core::config::TreeConfig;
use skilltree_core::model::{CompletionRecord, Orientation};
use skilltree_core::schema::{self, TrickSet};
use skilltree_engine::completion::CompletionTracker;
use skilltree_engine::resolver::Resolver;
use skilltree_engine::tree::SkillTree;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skilltree", about = "Skill tree prerequisite graph engine")]
struct Cli {
    /// Project root holding skilltree.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the render-ready tree for a trick-set file
    Render {
        /// Path to the trick-set JSON document
        file: PathBuf,

        /// Layout orientation: horizontal, vertical
        #[arg(short, long, default_value = "horizontal")]
        orientation: String,

        /// Restrict to a single category id
        #[arg(long)]
        category: Option<String>,

        /// JSON file of completion records for the current user
        #[arg(long)]
        completed: Option<PathBuf>,
    },

    /// Resolve a single raw prerequisite reference
    Resolve {
        /// Path to the trick-set JSON document
        file: PathBuf,

        /// Raw reference text (id, name, or near-miss)
        raw: String,
    },

    /// Report unresolved prerequisite references (non-zero exit if any)
    Check {
        /// Path to the trick-set JSON document
        file: PathBuf,
    },

    /// Show trick-set statistics
    Info {
        /// Path to the trick-set JSON document
        file: PathBuf,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = TreeConfig::load(&project_root)?;

    match cli.command {
        Commands::Render {
            file,
            orientation,
            category,
            completed,
        } => cmd_render(&file, &orientation, category, completed.as_deref(), config),
        Commands::Resolve { file, raw } => cmd_resolve(&file, &raw, &config),
        Commands::Check { file } => cmd_check(&file, config),
        Commands::Info { file } => cmd_info(&file, config),
    }
}

fn load_set(path: &Path) -> Result<TrickSet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trick set from {}", path.display()))?;
    schema::from_json(&json)
}

fn parse_orientation(raw: &str) -> Result<Orientation> {
    match raw {
        "horizontal" => Ok(Orientation::Horizontal),
        "vertical" => Ok(Orientation::Vertical),
        other => anyhow::bail!("unknown orientation '{other}' (expected horizontal or vertical)"),
    }
}

fn load_completed_ids(path: &Path) -> Result<Vec<String>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read completion records from {}", path.display()))?;
    let records: Vec<CompletionRecord> =
        serde_json::from_str(&json).context("failed to deserialize completion records")?;
    Ok(records
        .into_iter()
        .filter(|r| r.completed)
        .map(|r| r.entity_id)
        .collect())
}

fn cmd_render(
    file: &Path,
    orientation: &str,
    category: Option<String>,
    completed: Option<&Path>,
    config: TreeConfig,
) -> Result<()> {
    let set = load_set(file)?;
    let orientation = parse_orientation(orientation)?;

    let tracker = match completed {
        Some(path) => CompletionTracker::from_ids(load_completed_ids(path)?),
        None => CompletionTracker::new(),
    };

    let mut tree = SkillTree::new(config, orientation).with_tracker(tracker);
    tree.set_entities(set.tricks);
    tree.set_category(category);

    let rendered = tree.render();
    println!("{}", serde_json::to_string_pretty(rendered)?);
    Ok(())
}

fn cmd_resolve(file: &Path, raw: &str, config: &TreeConfig) -> Result<()> {
    let set = load_set(file)?;
    let resolver = Resolver::new(&set.tricks, config.resolver.clone());
    let resolved = resolver.resolve(raw);
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn cmd_check(file: &Path, config: TreeConfig) -> Result<()> {
    let set = load_set(file)?;
    let graph = skilltree_engine::builder::build(&set.tricks, &config.resolver);

    if graph.diagnostics.is_empty() {
        println!(
            "ok: {} tricks, {} prerequisite edges, no unresolved references",
            graph.nodes.len(),
            graph.edges.len()
        );
        return Ok(());
    }

    for diagnostic in &graph.diagnostics {
        match diagnostic.distance {
            Some(d) => println!(
                "unresolved: {:40} (in {}, nearest candidate at distance {})",
                diagnostic.raw, diagnostic.entity_id, d
            ),
            None => println!(
                "unresolved: {:40} (in {})",
                diagnostic.raw, diagnostic.entity_id
            ),
        }
    }
    anyhow::bail!(
        "{} unresolved prerequisite reference(s)",
        graph.diagnostics.len()
    )
}

fn cmd_info(file: &Path, config: TreeConfig) -> Result<()> {
    let set = load_set(file)?;
    let graph = skilltree_engine::builder::build(&set.tricks, &config.resolver);
    let node_ids = graph.node_ids();
    let placements = skilltree_layout::layout(
        &node_ids,
        &graph.edges,
        Orientation::Horizontal,
        &config.layout,
    );
    let depth = placements.values().map(|p| p.rank).max().map_or(0, |r| r + 1);

    let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
    for node in &graph.nodes {
        *per_category.entry(node.entity.category_id.as_str()).or_insert(0) += 1;
    }

    println!("Tricks:      {}", graph.nodes.len());
    println!("Edges:       {}", graph.edges.len());
    println!("Unresolved:  {}", graph.diagnostics.len());
    println!("Rank depth:  {depth}");
    println!("Fetched at:  {}", set.fetched_at);
    println!("Categories:");
    for (category, count) in &per_category {
        println!("  {category:20} {count}");
    }
    Ok(())
}
