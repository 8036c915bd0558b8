//! Flex container - flexbox-style distribution along a main axis.
//!
//! Three passes over the children, all axis-agnostic:
//!
//! 1. **Base sizing**: each child starts from its `basis`, or its current
//!    main-axis size when it has none.
//! 2. **Grow**: space left on the main axis is shared among growing children
//!    in proportion to their `grow` factors.
//! 3. **Positioning**: `justify_content` picks the start offset and the gap
//!    actually used between children; `align_items` / `align_self` place each
//!    child on the cross axis.
//!
//! The gap used in pass 3 is computed per call. The stored `gap` is never
//! modified, so running the layout twice gives the same frames.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, non_negative};
use crate::id::NodeId;
use crate::primitives::Rect;
use crate::tree::LayoutTree;

/// Main axis of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    /// Main axis is horizontal.
    #[default]
    Row,
    /// Main axis is vertical.
    Column,
}

/// Distribution of free space on the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    /// Pack children at the start.
    #[default]
    Start,
    /// Center children.
    Center,
    /// Pack children at the end.
    End,
    /// First and last child touch the edges, equal space between the rest.
    SpaceBetween,
    /// Equal space around each child (half-size at the edges).
    SpaceAround,
    /// Equal space between children and at both edges.
    SpaceEvenly,
}

/// Placement on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    #[default]
    Start,
    Center,
    End,
    /// Force the child's cross size to the container's.
    Stretch,
}

/// Per-child flex properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexItem {
    pub grow: f32,
    /// Recorded for completeness; children are never shrunk.
    pub shrink: f32,
    pub basis: Option<f32>,
    pub align_self: Option<AlignItems>,
}

impl Default for FlexItem {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: None,
            align_self: None,
        }
    }
}

impl FlexItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grow(mut self, grow: f32) -> Self {
        self.grow = grow;
        self
    }

    pub fn shrink(mut self, shrink: f32) -> Self {
        self.shrink = shrink;
        self
    }

    pub fn basis(mut self, basis: f32) -> Self {
        self.basis = Some(basis);
        self
    }

    pub fn align_self(mut self, align: AlignItems) -> Self {
        self.align_self = Some(align);
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.grow.is_finite() && self.grow >= 0.0) {
            return Err(LayoutError::NegativeFlexGrow(self.grow));
        }
        non_negative("flex_shrink", self.shrink)?;
        if let Some(basis) = self.basis {
            non_negative("flex_basis", basis)?;
        }
        Ok(())
    }
}

/// Flex container parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexLayout {
    pub direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub gap: f32,
}

impl FlexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn justify(mut self, justify: JustifyContent) -> Self {
        self.justify_content = justify;
        self
    }

    pub fn align(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        non_negative("gap", self.gap)
    }

    /// Start offset and effective gap for `count` children whose sizes and
    /// nominal gaps add up to `used` on a main axis of length `main`.
    fn justify_offsets(&self, main: f32, used: f32, count: usize) -> (f32, f32) {
        let free = main - used;
        let n = count as f32;
        match self.justify_content {
            JustifyContent::Start => (0.0, self.gap),
            JustifyContent::End => (free, self.gap),
            JustifyContent::Center => (free / 2.0, self.gap),
            JustifyContent::SpaceBetween if count > 1 => (0.0, self.gap + free / (n - 1.0)),
            JustifyContent::SpaceBetween => (0.0, self.gap),
            JustifyContent::SpaceAround if count > 0 => {
                let per_item = free / n;
                (per_item / 2.0, self.gap + per_item)
            }
            JustifyContent::SpaceEvenly if count > 0 => {
                let per_gap = free / (n + 1.0);
                (per_gap, self.gap + per_gap)
            }
            JustifyContent::SpaceAround | JustifyContent::SpaceEvenly => (0.0, self.gap),
        }
    }
}

struct FlexChild {
    node: NodeId,
    item: FlexItem,
    main: f32,
    cross: f32,
}

pub(crate) fn layout_flex(
    tree: &mut LayoutTree,
    container: NodeId,
    flex: &FlexLayout,
) -> Result<(), LayoutError> {
    let children = tree.children(container)?.to_vec();
    if children.is_empty() {
        return Ok(());
    }

    let is_row = flex.direction == FlexDirection::Row;
    let frame = tree.frame(container)?;
    let (main_size, cross_size) = if is_row {
        (frame.width, frame.height)
    } else {
        (frame.height, frame.width)
    };

    // =====================================================================
    // Pass 1: base sizes
    // =====================================================================
    let mut items = Vec::with_capacity(children.len());
    for &node in &children {
        let element = tree.element(node)?;
        let item = element.flex_item();
        item.validate()?;
        let child = element.frame();
        let (current_main, current_cross) = if is_row {
            (child.width, child.height)
        } else {
            (child.height, child.width)
        };
        items.push(FlexChild {
            node,
            item,
            main: item.basis.unwrap_or(current_main),
            cross: current_cross,
        });
    }

    let gaps = flex.gap * (items.len() as f32 - 1.0);
    let total_used: f32 = items.iter().map(|c| c.main).sum::<f32>() + gaps;
    let total_grow: f32 = items
        .iter()
        .filter(|c| c.item.grow > 0.0)
        .map(|c| c.item.grow)
        .sum();

    // =====================================================================
    // Pass 2: grow
    // =====================================================================
    let remaining = (main_size - total_used).max(0.0);
    if total_grow > 0.0 && remaining > 0.0 {
        let unit = remaining / total_grow;
        for child in items.iter_mut().filter(|c| c.item.grow > 0.0) {
            child.main += child.item.grow * unit;
        }
    }

    // =====================================================================
    // Pass 3: position
    // =====================================================================
    let total: f32 = items.iter().map(|c| c.main).sum::<f32>() + gaps;
    let (mut offset, effective_gap) = flex.justify_offsets(main_size, total, items.len());

    tracing::trace!(
        "flex {}: main {} used {} grow {} gap {}",
        tree.id_of(container)?,
        main_size,
        total,
        total_grow,
        effective_gap
    );

    for child in &items {
        let align = child.item.align_self.unwrap_or(flex.align_items);
        let (cross_pos, cross_extent) = match align {
            AlignItems::Start => (0.0, child.cross),
            AlignItems::End => (cross_size - child.cross, child.cross),
            AlignItems::Center => ((cross_size - child.cross) / 2.0, child.cross),
            AlignItems::Stretch => (0.0, cross_size),
        };

        let rect = if is_row {
            Rect::new(offset, cross_pos, child.main, cross_extent)
        } else {
            Rect::new(cross_pos, offset, cross_extent, child.main)
        };
        tree.set_frame(child.node, rect)?;

        offset += child.main + effective_gap;
    }

    Ok(())
}
