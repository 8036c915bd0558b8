//! Element and container records stored in the layout arena.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::anchor::{Anchor, Constraint};
use crate::error::LayoutError;
use crate::id::{ElementId, NodeId};
use crate::layout::{FlexItem, FlexLayout, FlowLayout, GridLayout, GridPlacement};
use crate::primitives::Rect;

/// Which layout algorithm a container runs before constraints are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContainerKind {
    Flow(FlowLayout),
    Grid(GridLayout),
    Flex(FlexLayout),
    /// Children are positioned manually or by constraints.
    Absolute,
    /// Like `Absolute`; pairs with the anchor-to-parent helpers.
    Anchor,
}

impl ContainerKind {
    /// Short lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Flow(_) => "flow",
            ContainerKind::Grid(_) => "grid",
            ContainerKind::Flex(_) => "flex",
            ContainerKind::Absolute => "absolute",
            ContainerKind::Anchor => "anchor",
        }
    }

    /// Whether this kind positions its children on its own.
    pub fn has_algorithm(&self) -> bool {
        matches!(
            self,
            ContainerKind::Flow(_) | ContainerKind::Grid(_) | ContainerKind::Flex(_)
        )
    }

    /// Check the container parameters.
    pub fn validate(&self) -> Result<(), LayoutError> {
        match self {
            ContainerKind::Flow(flow) => flow.validate(),
            ContainerKind::Grid(grid) => grid.validate(),
            ContainerKind::Flex(flex) => flex.validate(),
            ContainerKind::Absolute | ContainerKind::Anchor => Ok(()),
        }
    }

    pub(crate) fn flow_mut(&mut self) -> Option<&mut FlowLayout> {
        match self {
            ContainerKind::Flow(flow) => Some(flow),
            _ => None,
        }
    }

    pub(crate) fn grid_mut(&mut self) -> Option<&mut GridLayout> {
        match self {
            ContainerKind::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    pub(crate) fn flex_mut(&mut self) -> Option<&mut FlexLayout> {
        match self {
            ContainerKind::Flex(flex) => Some(flex),
            _ => None,
        }
    }

    /// Placement data a child gets when attached without an explicit hint.
    pub(crate) fn default_hint(&self) -> Option<LayoutHint> {
        match self {
            ContainerKind::Grid(_) => Some(LayoutHint::Grid(GridPlacement::default())),
            ContainerKind::Flex(_) => Some(LayoutHint::Flex(FlexItem::default())),
            _ => None,
        }
    }
}

/// Per-child placement data owned by the child, typed by parent kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutHint {
    Grid(GridPlacement),
    Flex(FlexItem),
}

/// Container payload of an element.
#[derive(Debug, Clone)]
pub struct Container {
    pub(crate) kind: ContainerKind,
    pub(crate) children: Vec<NodeId>,
}

impl Container {
    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A positionable node.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) frame: Rect,
    pub(crate) constraints: IndexMap<Anchor, Constraint>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) visible: bool,
    pub(crate) container: Option<Container>,
    pub(crate) hint: Option<LayoutHint>,
}

impl Element {
    pub(crate) fn new(id: ElementId, frame: Rect, container: Option<Container>) -> Self {
        Self {
            id,
            frame,
            constraints: IndexMap::new(),
            parent: None,
            visible: true,
            container,
            hint: None,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    pub fn hint(&self) -> Option<&LayoutHint> {
        self.hint.as_ref()
    }

    /// Constraints in the order they were first added.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    pub fn constraint(&self, anchor: Anchor) -> Option<&Constraint> {
        self.constraints.get(&anchor)
    }

    pub(crate) fn grid_placement(&self) -> GridPlacement {
        match self.hint {
            Some(LayoutHint::Grid(placement)) => placement,
            _ => GridPlacement::default(),
        }
    }

    pub(crate) fn flex_item(&self) -> FlexItem {
        match self.hint {
            Some(LayoutHint::Flex(item)) => item,
            _ => FlexItem::default(),
        }
    }
}
