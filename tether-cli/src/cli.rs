use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tether")]
#[command(about = "Lay out a tree of containers and print the resulting frames", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out a JSON scene file
    Layout {
        /// Path to the scene file
        scene: PathBuf,

        /// Reject negative sizes instead of clamping them
        #[arg(long)]
        strict: bool,

        /// Print frames as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Lay out the built-in sample window
    Demo {
        /// Print frames as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
}
