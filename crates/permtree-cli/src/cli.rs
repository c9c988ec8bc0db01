//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// permtree - inspect merged permission trees
#[derive(Parser, Debug)]
#[command(name = "permtree", version)]
#[command(about = "Inspect merged permission trees from a definition file", long_about = None)]
pub struct Cli {
    /// Definition file path (defaults to ./permtree.toml)
    #[arg(short, long, env = "PERMTREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the variant strings of the merged groups
    Variants {
        /// Only this group
        #[arg(long)]
        group: Option<String>,
        /// Sort every tree by key before printing
        #[arg(long)]
        sorted: bool,
    },

    /// Print the variant strings of all static permissions
    Statics {
        /// Sort every tree by key before printing
        #[arg(long)]
        sorted: bool,
    },

    /// Look up a static permission by dot-separated path
    Lookup {
        /// Path such as `docs.get`
        path: String,
    },

    /// Find the node with influence on a path inside a group
    Active {
        /// Group name
        group: String,
        /// Path such as `docs.read`
        path: String,
    },

    /// Assemble a naming scheme given as a JSON object
    Scheme {
        /// Base prefix
        prefix: String,
        /// JSON object, e.g. '{"readFiles": ""}'
        json: String,
    },
}

impl Command {
    /// Returns `true` if the command reads the definition file.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Command::Scheme { .. })
    }
}
