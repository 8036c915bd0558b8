//! Tether - command-line driver for the layout engine.
//!
//! Reads a JSON scene (or builds the sample window), lays it out and prints
//! the resulting frames.

mod cli;
mod demo;
mod logging;
mod print;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use tether_layout::{LayoutEngine, LayoutTree, NodeId};

use crate::cli::{Args, Command};
use crate::logging::setup_logging;
use crate::scene::Scene;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    match args.command {
        Command::Layout { scene, strict, json } => {
            let loaded = Scene::load(&scene)?;
            let mut config = loaded.engine;
            config.strict_geometry |= strict;

            let (mut tree, root) = loaded.build().context("Failed to build scene")?;
            tracing::info!("Laying out {} ({} elements)", scene.display(), tree.len());
            LayoutEngine::new(config)
                .layout(&mut tree, root)
                .context("Layout failed")?;
            emit(&tree, root, json)
        }
        Command::Demo { json } => {
            let (mut tree, root) = demo::build()?;
            LayoutEngine::default()
                .layout(&mut tree, root)
                .context("Layout failed")?;
            emit(&tree, root, json)
        }
    }
}

fn emit(tree: &LayoutTree, root: NodeId, json: bool) -> Result<()> {
    let out = if json {
        print::render_json(tree, root)?
    } else {
        print::render_tree(tree, root)?
    };
    // render_tree already ends with a newline
    print!("{out}");
    if json {
        println!();
    }
    Ok(())
}
