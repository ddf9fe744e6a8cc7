//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A small static site generator for a personal site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog entry
    New {
        /// Title of the new entry
        title: String,

        /// Create the entry as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Generate the static site
    #[command(alias = "b")]
    Build,

    /// Validate the content corpus and report every problem
    Check,

    /// List site content (entry, page, tag, category)
    List {
        #[arg(default_value = "entry")]
        r#type: String,
    },

    /// Remove the output directory
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            folio::commands::init::run(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, draft } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::new::run(&site, &title, draft)?;
        }

        Commands::Build => {
            let site = folio::Folio::new(&base_dir)?;
            site.build()?;
            println!("Built successfully!");
        }

        Commands::Check => {
            let site = folio::Folio::new(&base_dir)?;
            site.check()?;
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
