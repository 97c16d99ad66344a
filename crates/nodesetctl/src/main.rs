use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nodesetctl::cmd_formats;
use nodesetctl::cmd_resolve;
use nodesetctl::cmd_show;

#[derive(Parser, Debug)]
#[command(name = "nodesetctl", version, about = "Resolve nodesetxml inventories")]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Output JSON where applicable
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Resolve every node of a document (`-` reads stdin)
    Resolve {
        input: PathBuf,
        /// Only print nodes carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Print the resolved attributes and tags of one node
    Show {
        input: PathBuf,
        #[arg(long)]
        name: String,
    },
    /// List supported document formats
    Formats,
}

fn main() -> Result<()> {
    let Cli { verbose, json, cmd } = Cli::parse();

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cmd {
        Cmd::Resolve { input, tag } => cmd_resolve::run(&input, tag.as_deref(), json)?,
        Cmd::Show { input, name } => cmd_show::run(&input, &name, json)?,
        Cmd::Formats => cmd_formats::run(json)?,
    };

    Ok(())
}
