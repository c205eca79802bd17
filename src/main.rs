mod error;
mod fetch;
mod parser;
mod settings;
mod site;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::fetch::ContentSource;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "mdsite", about = "Render markdown-subset content into HTML fragments")]
struct Cli {
    /// Config file (default: ./mdsite.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the content root (directory or http(s) base URL)
    #[arg(short, long, global = true)]
    root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate documents to HTML fragments
    Render {
        /// Document paths, relative to the content root
        #[arg(required = true)]
        paths: Vec<String>,
        /// Write <stem>.html files here instead of printing
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Split a listing document into project records
    Projects {
        /// Listing path (default: the configured projects document)
        path: Option<String>,
        /// Print records as JSON instead of card markup
        #[arg(long)]
        json: bool,
    },
    /// Write the about and projects regions
    Build {
        #[arg(short, long, default_value = "public")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(root) = cli.root {
        settings.root = root;
    }
    let source = ContentSource::from_root(&settings.root, settings.timeout())?;

    match cli.command {
        Commands::Render { paths, out } => {
            let rendered = site::render_many(Arc::new(source), &paths, &settings).await;
            match out {
                Some(dir) => {
                    tokio::fs::create_dir_all(&dir)
                        .await
                        .with_context(|| format!("Failed to create {}", dir.display()))?;
                    for (path, html) in paths.iter().zip(&rendered) {
                        let file = site::output_path(&dir, path);
                        site::write_region(&file, html).await?;
                        println!("{} -> {}", path, file.display());
                    }
                }
                None => {
                    for html in &rendered {
                        println!("{}", html);
                    }
                }
            }
        }
        Commands::Projects { path, json } => {
            let path = path.unwrap_or_else(|| settings.projects.clone());
            if json {
                // A missing listing is an empty list on the JSON surface
                let records = match site::load_projects(&source, &path, &settings.extract_options()).await {
                    Ok(records) => records,
                    Err(e) => {
                        tracing::warn!("Not found: {}", e);
                        Vec::new()
                    }
                };
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("{}", site::projects_region(&source, &path, &settings).await);
            }
        }
        Commands::Build { out } => {
            let written = site::build(&source, &settings, &out).await?;
            println!("About:    {}", written.about.display());
            println!("Projects: {}", written.projects.display());
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
