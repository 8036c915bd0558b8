//! Layout error types.

use thiserror::Error;

use crate::anchor::Anchor;
use crate::id::{ElementId, NodeId};

/// Broad class of a [`LayoutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tree or a reference inside it is malformed.
    Structural,
    /// A container parameter is out of range.
    Configuration,
    /// A frame ended up with a negative extent in strict mode.
    DegenerateGeometry,
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("element {0} is not a container")]
    NotAContainer(ElementId),

    #[error("element {element} is a {actual} container, expected {expected}")]
    WrongContainerKind {
        element: ElementId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("element {child} is not a child of {parent}")]
    NotAChild { parent: ElementId, child: ElementId },

    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: ElementId, child: ElementId },

    #[error("constraint {source_id}.{anchor} targets {target} outside the subtree being laid out")]
    UnreachableTarget {
        source_id: ElementId,
        anchor: Anchor,
        target: ElementId,
    },

    #[error("constraint {source_id}.{anchor} targets {target}, which has not been laid out yet")]
    UnvisitedTarget {
        source_id: ElementId,
        anchor: Anchor,
        target: ElementId,
    },

    #[error("invalid grid placement for {element}: {reason}")]
    InvalidPlacement { element: ElementId, reason: String },

    #[error("grid needs at least one column, got {0}")]
    InvalidColumns(usize),

    #[error("{field} must be a non-negative number, got {value}")]
    NegativeValue { field: &'static str, value: f32 },

    #[error("flex grow must be non-negative, got {0}")]
    NegativeFlexGrow(f32),

    #[error("element {element} has degenerate frame {width}x{height}")]
    DegenerateGeometry {
        element: ElementId,
        width: f32,
        height: f32,
    },
}

impl LayoutError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LayoutError::UnknownNode(_)
            | LayoutError::DuplicateId(_)
            | LayoutError::NotAContainer(_)
            | LayoutError::WrongContainerKind { .. }
            | LayoutError::NotAChild { .. }
            | LayoutError::WouldCycle { .. }
            | LayoutError::UnreachableTarget { .. }
            | LayoutError::UnvisitedTarget { .. }
            | LayoutError::InvalidPlacement { .. } => ErrorKind::Structural,
            LayoutError::InvalidColumns(_)
            | LayoutError::NegativeValue { .. }
            | LayoutError::NegativeFlexGrow(_) => ErrorKind::Configuration,
            LayoutError::DegenerateGeometry { .. } => ErrorKind::DegenerateGeometry,
        }
    }
}

/// Check that a spacing-like parameter is a finite, non-negative number.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::NegativeValue { field, value })
    }
}
