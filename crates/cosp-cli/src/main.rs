mod clipboard;
mod commands;
mod sniff;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cosp")]
#[command(about = "Tencent COS image upload and listing tool")]
#[command(version)]
struct Cli {
    /// Path to the cosp config directory (default: ~/.cosp)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,

    /// Upload a local image file
    Upload {
        /// Path to the image to upload
        path: PathBuf,
    },

    /// Upload the clipboard content (image or SVG)
    Paste,

    /// List objects in the bucket, with ordinals for later reference
    List {
        /// Maximum number of objects per page
        #[arg(long, short = 'n', default_value_t = 20)]
        max_keys: i32,

        /// Only list keys starting with this prefix
        #[arg(long, short = 'p')]
        prefix: Option<String>,

        /// Object key, or an ordinal printed by a previous `list`
        #[arg(long, short = 'm')]
        marker: Option<String>,
    },

    /// Delete objects by key
    Delete {
        /// Object keys to delete
        #[arg(required = true)]
        keys: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cosp=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => cosp_core::config::CospConfig::default_base_dir()?,
    };

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Init => commands::init::run(&base_dir),
        Commands::Upload { ref path } => rt.block_on(commands::upload::run(path, &base_dir)),
        Commands::Paste => rt.block_on(commands::paste::run(&base_dir)),
        Commands::List {
            max_keys,
            ref prefix,
            ref marker,
        } => rt.block_on(commands::list::run(
            &base_dir,
            max_keys,
            prefix.as_deref(),
            marker.as_deref(),
        )),
        Commands::Delete { ref keys, yes } => {
            rt.block_on(commands::delete::run(&base_dir, keys, yes))
        }
    }
}
