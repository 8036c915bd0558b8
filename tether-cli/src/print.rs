use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;
use tether_layout::{ContainerKind, LayoutTree, NodeId};

#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    id: &'a str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

fn label(tree: &LayoutTree, node: NodeId) -> Result<&'static str> {
    let element = tree.element(node)?;
    Ok(match element.container().map(|c| c.kind()) {
        None => "Element",
        Some(ContainerKind::Flow(_)) => "FlowContainer",
        Some(ContainerKind::Grid(_)) => "GridContainer",
        Some(ContainerKind::Flex(_)) => "FlexContainer",
        Some(ContainerKind::Absolute) => "AbsoluteContainer",
        Some(ContainerKind::Anchor) => "AnchorContainer",
    })
}

/// One line per element, children indented two spaces under their parent.
pub fn render_tree(tree: &LayoutTree, root: NodeId) -> Result<String> {
    let mut out = String::new();
    render_node(tree, root, 0, &mut out)?;
    Ok(out)
}

fn render_node(tree: &LayoutTree, node: NodeId, depth: usize, out: &mut String) -> Result<()> {
    let element = tree.element(node)?;
    writeln!(
        out,
        "{:indent$}{}(id={}, frame={})",
        "",
        label(tree, node)?,
        element.id(),
        element.frame(),
        indent = depth * 2
    )?;
    for &child in tree.children(node)? {
        render_node(tree, child, depth + 1, out)?;
    }
    Ok(())
}

/// Pre-order list of `{id, x, y, width, height}` objects.
pub fn render_json(tree: &LayoutTree, root: NodeId) -> Result<String> {
    let mut records = Vec::new();
    for node in tree.pre_order(root)? {
        let element = tree.element(node)?;
        let frame = element.frame();
        records.push(FrameRecord {
            id: element.id().as_str(),
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
        });
    }
    Ok(serde_json::to_string_pretty(&records)?)
}
