//! Container layout algorithms.
//!
//! Each container kind runs at most one algorithm per pass, before any
//! constraint is resolved:
//!
//! ```text
//! Flow     -> stack children along one axis, then size the container to fit
//! Grid     -> place children in explicit cells of a fixed column grid
//! Flex     -> distribute main-axis space, justify, align on the cross axis
//! Absolute -> nothing (constraints or manual positions)
//! Anchor   -> nothing (constraints, see the anchor helpers)
//! ```
//!
//! Algorithms write child frames in the container's local space: the first
//! child of a flow sits at `(0, 0)` whatever the container's own origin.

pub mod anchor;
pub mod flex;
pub mod flow;
pub mod grid;

pub use flex::{AlignItems, FlexDirection, FlexItem, FlexLayout, JustifyContent};
pub use flow::{FlowDirection, FlowLayout};
pub use grid::{GridLayout, GridPlacement};

use crate::element::ContainerKind;
use crate::error::LayoutError;
use crate::id::NodeId;
use crate::tree::LayoutTree;

/// Run the algorithm of `container`'s kind over its direct children.
///
/// Parameters are re-validated first since they can be edited between
/// passes. Absolute and anchor containers are left untouched.
pub fn perform_layout(tree: &mut LayoutTree, container: NodeId) -> Result<(), LayoutError> {
    let kind = *tree.kind(container)?;
    kind.validate()?;

    tracing::trace!(
        "perform_layout {} ({})",
        tree.id_of(container)?,
        kind.name()
    );

    match kind {
        ContainerKind::Flow(flow) => flow::layout_flow(tree, container, &flow),
        ContainerKind::Grid(grid) => grid::layout_grid(tree, container, &grid),
        ContainerKind::Flex(flex) => flex::layout_flex(tree, container, &flex),
        ContainerKind::Absolute | ContainerKind::Anchor => Ok(()),
    }
}
