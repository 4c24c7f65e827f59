use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docsite::{CollectionLoader, CollectionRegistry, SiteConfig};
use eyre::Result;
use tracing::info;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Documentation site configuration and content validation")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration and every content entry
    Check {
        /// Override content directory path
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// List registered content collections and their schemas
    Collections,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = SiteConfig::load_with_env(&cli.config)?;
    info!("Loaded configuration: {}", cli.config.display());

    let registry = CollectionRegistry::builtin();

    match cli.command.unwrap_or(Commands::Check { content: None }) {
        Commands::Check { content } => {
            let content_dir = content.unwrap_or_else(|| config.content_dir.clone());
            info!("Checking content in {}", content_dir.display());

            let loader = CollectionLoader::new(&registry);
            let report = loader.load(&content_dir)?;

            for failure in &report.failures {
                eprintln!("{}: {}", failure.path.display(), failure.error);
            }

            if !report.is_clean() {
                eyre::bail!(
                    "{} of {} entries failed validation",
                    report.failures.len(),
                    report.entry_count() + report.failures.len()
                );
            }

            println!(
                "{} entries across {} collections are valid",
                report.entry_count(),
                report.collections.len()
            );
        }
        Commands::Collections => {
            for name in registry.collection_names() {
                match registry.get(name) {
                    Some(docsite::CollectionSchema::Delegated) => {
                        println!("{name}: delegated to the theme plugin");
                    }
                    Some(docsite::CollectionSchema::Record(fields)) => {
                        println!("{name}:");
                        for field in fields {
                            let req = if field.required { "required" } else { "optional" };
                            println!("  {}: {} ({req})", field.name, field.kind);
                        }
                    }
                    None => unreachable!("name came from the registry"),
                }
            }
        }
    }

    Ok(())
}
