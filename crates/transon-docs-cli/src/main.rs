use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use transon_docs::outline::{outline, render_text};
use transon_docs::{DocumentationTree, PlaygroundBuffers, Slug, SlugIndex, ViewerConfig};

#[derive(Parser)]
#[command(name = "transon-docs")]
#[command(about = "Inspect Transon documentation payloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Viewer config (TOML); defaults are used when the file is missing
    #[arg(long, global = true, default_value = "viewer/Viewer.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every example slug in document order
    Slugs {
        /// Path to the exported documentation payload (JSON)
        payload: PathBuf,
    },
    /// Report examples whose slugs collide
    Check {
        /// Path to the exported documentation payload (JSON)
        payload: PathBuf,
    },
    /// Print the rule outline
    Outline {
        /// Path to the exported documentation payload (JSON)
        payload: PathBuf,
        /// Mark this example as active
        #[arg(long)]
        active: Option<String>,
    },
    /// Print the buffers a playground is seeded with
    Seed {
        /// Path to the exported documentation payload (JSON)
        payload: PathBuf,
        /// Example slug, e.g. `attr-AttrSimpleFixedName`
        slug: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Slugs { payload } => {
            let tree = load_tree(&payload)?;
            for slug in SlugIndex::build(&tree).slugs() {
                println!("{slug}");
            }
        }

        Commands::Check { payload } => {
            let tree = load_tree(&payload)?;
            let index = SlugIndex::build(&tree);
            let duplicates = index.duplicates();
            if !duplicates.is_empty() {
                for slug in &duplicates {
                    eprintln!("duplicate slug: {slug}");
                }
                bail!(
                    "{} of {} slugs are not unique",
                    duplicates.len(),
                    index.len()
                );
            }
            println!(
                "{}: {} rules, {} examples, all slugs unique",
                payload.display(),
                tree.rules.len(),
                index.len()
            );
        }

        Commands::Outline { payload, active } => {
            let tree = load_tree(&payload)?;
            let active = active.map(Slug::from);
            print!("{}", render_text(&outline(&tree), active.as_ref()));
        }

        Commands::Seed { payload, slug } => {
            let config = ViewerConfig::load(&cli.config)
                .with_context(|| format!("Invalid config {}", cli.config.display()))?;
            let tree = load_tree(&payload)?;
            let slug = Slug::from(slug);
            let Some(example) = SlugIndex::build(&tree).get(&tree, &slug) else {
                bail!("No example has the slug '{slug}'");
            };
            let buffers = PlaygroundBuffers::seed(example, config.text);
            println!("# input\n{}\n", buffers.input_text);
            println!("# template\n{}\n", buffers.template_text);
            println!("# result\n{}", buffers.result_text);
        }
    }

    Ok(())
}

fn load_tree(path: &Path) -> Result<DocumentationTree> {
    let payload = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let tree = DocumentationTree::from_json(&payload)
        .with_context(|| format!("Invalid documentation payload {}", path.display()))?;
    log::info!(
        "Loaded {} rules with {} examples from {}",
        tree.rules.len(),
        tree.example_count(),
        path.display()
    );
    Ok(tree)
}
