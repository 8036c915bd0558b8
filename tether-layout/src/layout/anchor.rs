//! Helpers for children of absolute and anchor containers.
//!
//! These containers have no algorithm of their own; their children are
//! placed by constraints that read the parent's frame.

use crate::anchor::{Anchor, Constraint};
use crate::element::ContainerKind;
use crate::error::LayoutError;
use crate::id::NodeId;
use crate::tree::LayoutTree;

impl LayoutTree {
    /// Bind each `(child_anchor, parent_anchor)` pair with `padding` as the
    /// constant. The padding is added as-is, so pass a negative value to
    /// inset from the right or bottom edge.
    pub fn anchor_to_parent(
        &mut self,
        child: NodeId,
        pairs: &[(Anchor, Anchor)],
        padding: f32,
    ) -> Result<Vec<Constraint>, LayoutError> {
        let parent = self.constraint_parent(child)?;
        pairs
            .iter()
            .map(|&(child_anchor, parent_anchor)| {
                self.add_constraint(child, child_anchor, Some((parent, parent_anchor)), padding)
            })
            .collect()
    }

    /// Center `child` on both axes of its parent.
    pub fn center_in_parent(&mut self, child: NodeId) -> Result<(), LayoutError> {
        let parent = self.constraint_parent(child)?;
        self.add_constraint(child, Anchor::CenterX, Some((parent, Anchor::CenterX)), 0.0)?;
        self.add_constraint(child, Anchor::CenterY, Some((parent, Anchor::CenterY)), 0.0)?;
        Ok(())
    }

    /// Parent of `child`, which must be an absolute or anchor container.
    fn constraint_parent(&self, child: NodeId) -> Result<NodeId, LayoutError> {
        let element = self.element(child)?;
        let Some(parent) = element.parent() else {
            return Err(LayoutError::InvalidPlacement {
                element: element.id().clone(),
                reason: "element is not attached to a container".to_string(),
            });
        };
        match self.kind(parent)? {
            ContainerKind::Absolute | ContainerKind::Anchor => Ok(parent),
            other => Err(LayoutError::WrongContainerKind {
                element: self.id_of(parent)?.clone(),
                expected: "absolute or anchor",
                actual: other.name(),
            }),
        }
    }
}
