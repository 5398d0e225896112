// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "bucketfs")]
struct Cli {
    /// Store configuration file (YAML)
    #[arg(long, global = true, env = "BUCKETFS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the directory tree under a prefix
    Ls {
        /// Key prefix to list (default: whole bucket)
        #[arg(default_value = "")]
        prefix: String,
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find files and directories whose name contains a string
    Search {
        prefix: String,
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Move or rename an object
    Mv { from: String, to: String },
    /// Create an empty directory
    Mkdir { path: String },
    /// Upload local files
    Put {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Destination directory in the bucket
        #[arg(long, default_value = "")]
        dir: String,
        /// Content type for every file (guessed from the extension otherwise)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Delete an object
    Rm { key: String },
    /// Download an object
    Get {
        key: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = common::load_config(cli.config.as_deref())?;
    let fm = common::open_manager(&config)?;

    match &cli.command {
        Commands::Ls { prefix, json } => commands::list_command(&fm, prefix, *json, out).await,
        Commands::Search {
            prefix,
            query,
            json,
        } => commands::search_command(&fm, prefix, query, *json, out).await,
        Commands::Mv { from, to } => commands::mv_command(&fm, from, to, out).await,
        Commands::Mkdir { path } => commands::mkdir_command(&fm, path, out).await,
        Commands::Put {
            files,
            dir,
            content_type,
        } => commands::put_command(&fm, files, dir, content_type.as_deref(), out).await,
        Commands::Rm { key } => commands::rm_command(&fm, key).await,
        Commands::Get { key, output } => {
            commands::get_command(&fm, key, output.as_deref(), out).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out).await?;
    out.flush()?;
    Ok(())
}
