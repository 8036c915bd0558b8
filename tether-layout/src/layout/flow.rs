//! Flow container - sequential stacking along one axis.
//!
//! Children keep their own sizes and are placed one after another, separated
//! by `spacing`. The container then sizes itself to fit: the main axis is the
//! distance covered, the cross axis is the largest child.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, non_negative};
use crate::id::NodeId;
use crate::primitives::{Point, Size};
use crate::tree::LayoutTree;

/// Stacking direction of a flow container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    Horizontal,
    #[default]
    Vertical,
}

/// Flow container parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowLayout {
    pub direction: FlowDirection,
    /// Space inserted between consecutive children.
    pub spacing: f32,
}

impl FlowLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        non_negative("spacing", self.spacing)
    }
}

pub(crate) fn layout_flow(
    tree: &mut LayoutTree,
    container: NodeId,
    flow: &FlowLayout,
) -> Result<(), LayoutError> {
    let children = tree.children(container)?.to_vec();
    let horizontal = flow.direction == FlowDirection::Horizontal;

    let mut cursor = Point::ORIGIN;
    let mut cross = 0.0f32;

    for (i, &child) in children.iter().enumerate() {
        if i > 0 {
            if horizontal {
                cursor.x += flow.spacing;
            } else {
                cursor.y += flow.spacing;
            }
        }

        tree.set_origin(child, cursor)?;

        let size = tree.frame(child)?.size();
        if horizontal {
            cursor.x += size.width;
            cross = cross.max(size.height);
        } else {
            cursor.y += size.height;
            cross = cross.max(size.width);
        }
    }

    let size = if horizontal {
        Size::new(cursor.x, cross)
    } else {
        Size::new(cross, cursor.y)
    };
    tree.set_extent(container, size)
}
