//! JSON scene files.
//!
//! A scene is an engine config plus one root node; nodes nest through
//! `children`. Constraint targets name element ids and are resolved once the
//! whole tree exists, so a constraint may name an element defined later in
//! the file (the engine still rejects it if that element is laid out later).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tether_layout::{
    Anchor, ContainerKind, EngineConfig, FlexItem, GridPlacement, LayoutTree, NodeId, Rect,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub engine: EngineConfig,
    pub root: NodeSpec,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub id: Option<String>,
    #[serde(default)]
    pub frame: Rect,
    pub visible: Option<bool>,
    /// Present for containers only.
    pub layout: Option<ContainerKind>,
    /// Cell within a grid parent.
    pub grid: Option<GridPlacement>,
    /// Item properties within a flex parent.
    pub flex: Option<FlexItem>,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintSpec {
    pub anchor: Anchor,
    /// Element id; omitted for a constant.
    pub target: Option<String>,
    /// Defaults to `anchor`.
    pub target_anchor: Option<Anchor>,
    #[serde(default)]
    pub constant: f32,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid scene {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Create every node, then attach constraints.
    pub fn build(&self) -> Result<(LayoutTree, NodeId)> {
        let mut tree = LayoutTree::new();
        let mut pending = Vec::new();
        let root = build_node(&mut tree, &self.root, None, &mut pending)?;

        for (node, spec) in pending {
            let target = match &spec.target {
                Some(name) => {
                    let target = tree.lookup(name).ok_or_else(|| {
                        anyhow!(
                            "constraint {}.{} targets unknown element {name}",
                            tree.id_of(node).map(|id| id.to_string()).unwrap_or_default(),
                            spec.anchor
                        )
                    })?;
                    Some((target, spec.target_anchor.unwrap_or(spec.anchor)))
                }
                None => None,
            };
            tree.add_constraint(node, spec.anchor, target, spec.constant)?;
        }

        Ok((tree, root))
    }
}

fn build_node<'a>(
    tree: &mut LayoutTree,
    spec: &'a NodeSpec,
    parent: Option<NodeId>,
    pending: &mut Vec<(NodeId, &'a ConstraintSpec)>,
) -> Result<NodeId> {
    let id = spec.id.as_deref();
    let node = match spec.layout {
        Some(kind) => tree.create_container(id, spec.frame, kind),
        None => {
            if !spec.children.is_empty() {
                return Err(anyhow!(
                    "element {} has children but no layout",
                    id.unwrap_or("<unnamed>")
                ));
            }
            tree.create_element(id, spec.frame)
        }
    }
    .with_context(|| format!("Failed to create element {}", id.unwrap_or("<unnamed>")))?;

    if let Some(visible) = spec.visible {
        tree.set_visible(node, visible)?;
    }

    if let Some(parent) = parent {
        match (spec.grid, spec.flex) {
            (Some(_), Some(_)) => {
                return Err(anyhow!(
                    "element {} has both grid and flex properties",
                    tree.id_of(node)?
                ));
            }
            (Some(placement), None) => tree.add_grid_child(parent, node, placement)?,
            (None, Some(item)) => tree.add_flex_child(parent, node, item)?,
            (None, None) => tree.add_child(parent, node)?,
        };
    }

    pending.extend(spec.constraints.iter().map(|c| (node, c)));

    for child in &spec.children {
        build_node(tree, child, Some(node), pending)?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tether_layout::{ErrorKind, LayoutEngine, LayoutError};

    const CENTERED: &str = r#"{
        "root": {
            "id": "stage",
            "frame": [0, 0, 200, 100],
            "layout": { "type": "absolute" },
            "children": [
                {
                    "id": "badge",
                    "frame": [0, 0, 50, 20],
                    "constraints": [
                        { "anchor": "center_x", "target": "stage" },
                        { "anchor": "top", "target": "stage", "constant": 8 }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn builds_and_lays_out_a_scene() {
        let scene = Scene::parse(CENTERED).unwrap();
        let (mut tree, root) = scene.build().unwrap();
        LayoutEngine::new(scene.engine).layout(&mut tree, root).unwrap();

        let badge = tree.lookup("badge").unwrap();
        assert_eq!(tree.frame(badge).unwrap(), Rect::new(75.0, 8.0, 50.0, 20.0));
    }

    #[test]
    fn container_params_and_hints_parse() {
        let scene = Scene::parse(
            r#"{
                "engine": { "strict_geometry": true },
                "root": {
                    "id": "grid",
                    "frame": [0, 0, 320, 0],
                    "layout": { "type": "grid", "columns": 3, "column_gap": 10, "row_height": 40 },
                    "children": [
                        { "id": "wide", "grid": { "column": 1, "column_span": 2 } }
                    ]
                }
            }"#,
        )
        .unwrap();
        assert!(scene.engine.strict_geometry);

        let (mut tree, root) = scene.build().unwrap();
        LayoutEngine::new(scene.engine).layout(&mut tree, root).unwrap();

        let wide = tree.lookup("wide").unwrap();
        assert_eq!(tree.frame(wide).unwrap(), Rect::new(110.0, 0.0, 210.0, 40.0));
    }

    #[test]
    fn forward_reference_reaches_the_engine() {
        let scene = Scene::parse(
            r#"{
                "root": {
                    "id": "root",
                    "frame": [0, 0, 100, 100],
                    "layout": { "type": "anchor" },
                    "children": [
                        {
                            "id": "early",
                            "constraints": [
                                { "anchor": "left", "target": "late", "target_anchor": "right" }
                            ]
                        },
                        { "id": "late", "frame": [10, 0, 10, 10] }
                    ]
                }
            }"#,
        )
        .unwrap();
        let (mut tree, root) = scene.build().unwrap();

        let err = LayoutEngine::default().layout(&mut tree, root).unwrap_err();
        assert!(matches!(err, LayoutError::UnvisitedTarget { .. }));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn unknown_target_is_reported() {
        let scene = Scene::parse(
            r#"{
                "root": {
                    "id": "lonely",
                    "constraints": [{ "anchor": "top", "target": "ghost" }]
                }
            }"#,
        )
        .unwrap();
        let err = scene.build().unwrap_err();
        assert!(err.to_string().contains("ghost"), "{err}");
    }

    #[test]
    fn leaf_with_children_is_rejected() {
        let scene = Scene::parse(r#"{ "root": { "id": "leaf", "children": [{}] } }"#).unwrap();
        assert!(scene.build().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Scene::parse(r#"{ "root": { "idd": "typo" } }"#).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CENTERED.as_bytes()).unwrap();

        let scene = Scene::load(file.path()).unwrap();
        assert_eq!(scene.root.children.len(), 1);

        let missing = file.path().with_extension("missing");
        let err = Scene::load(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read scene"), "{err}");
    }
}
