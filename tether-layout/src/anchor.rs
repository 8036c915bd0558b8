//! Anchors and constraints.
//!
//! An [`Anchor`] names one edge, center line or extent of a frame. A
//! [`Constraint`] binds an anchor of its source element either to an absolute
//! value or to an anchor of another element plus a constant offset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::id::NodeId;
use crate::primitives::Rect;
use crate::tree::LayoutTree;

/// Symbolic reference to part of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Left,
    Right,
    Top,
    Bottom,
    CenterX,
    CenterY,
    Width,
    Height,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::Left,
        Anchor::Right,
        Anchor::Top,
        Anchor::Bottom,
        Anchor::CenterX,
        Anchor::CenterY,
        Anchor::Width,
        Anchor::Height,
    ];

    /// Read the value this anchor refers to from a frame.
    pub fn read(self, frame: &Rect) -> f32 {
        match self {
            Anchor::Left => frame.left(),
            Anchor::Right => frame.right(),
            Anchor::Top => frame.top(),
            Anchor::Bottom => frame.bottom(),
            Anchor::CenterX => frame.center().x,
            Anchor::CenterY => frame.center().y,
            Anchor::Width => frame.width,
            Anchor::Height => frame.height,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::CenterX => "center_x",
            Anchor::CenterY => "center_y",
            Anchor::Width => "width",
            Anchor::Height => "height",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The element anchor a constraint reads from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorTarget {
    pub node: NodeId,
    pub anchor: Anchor,
}

/// A rule setting one anchor of `source`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub source: NodeId,
    pub source_anchor: Anchor,
    /// `None` makes the constraint absolute: it resolves to `constant`.
    pub target: Option<AnchorTarget>,
    pub constant: f32,
}

impl Constraint {
    /// Resolve against the target's current frame.
    pub fn resolve(&self, tree: &LayoutTree) -> Result<f32, LayoutError> {
        match self.target {
            None => Ok(self.constant),
            Some(target) => {
                let frame = tree.frame(target.node)?;
                Ok(target.anchor.read(&frame) + self.constant)
            }
        }
    }
}
