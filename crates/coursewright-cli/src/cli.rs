use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Browse a course outline, or inspect and edit HTML lesson bodies.
#[derive(Debug, Parser)]
#[command(author, version, about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Content directory to browse. Defaults to `content_path` from the
    /// config file.
    pub content_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the blocks of an HTML body with their ids and types.
    Blocks(BodyArgs),
    /// Print an HTML body in canonical form.
    Normalize(BodyArgs),
    /// Print the category forest and course outline.
    Tree {
        /// Content directory. Defaults to the configured one.
        content_path: Option<PathBuf>,
    },
    /// Insert a block into an HTML body and write it back.
    NewBlock(NewBlockArgs),
}

#[derive(Debug, Args)]
pub struct BodyArgs {
    /// HTML body file.
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct NewBlockArgs {
    /// HTML body file. Created if missing.
    pub file: PathBuf,

    /// Block type: paragraph, heading1..3, quote, code, image, list,
    /// ordered-list or divider.
    pub kind: String,

    /// Id of the block to insert after. Appends when omitted.
    #[arg(long)]
    pub after: Option<String>,
}
