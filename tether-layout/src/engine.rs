//! Full-tree layout orchestration.
//!
//! # Algorithm
//!
//! 1. **Layout pass** (pre-order): every container runs its own algorithm,
//!    then its child containers are visited, whatever the parent's kind.
//! 2. **Constraint pass** (pre-order): constraints are resolved from the root
//!    down, so they see the results of every algorithm but never the other
//!    way round.
//! 3. **Geometry check**: negative extents are clamped to zero, or rejected in
//!    strict mode.
//!
//! A failed call leaves frames partially updated; callers should discard the
//! tree's geometry rather than reuse it.

use crate::config::EngineConfig;
use crate::error::LayoutError;
use crate::id::NodeId;
use crate::layout::perform_layout;
use crate::tree::LayoutTree;

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: EngineConfig,
}

impl LayoutEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lay out the subtree rooted at `root`, mutating frames in place.
    ///
    /// Repeating the call on an unmodified tree gives the same frames unless
    /// a flow or inferred-row grid sits inside another container with an
    /// algorithm. Parents run first, so they see the size such a child had
    /// before it re-sized itself; the second call then sees the new size.
    pub fn layout(&self, tree: &mut LayoutTree, root: NodeId) -> Result<(), LayoutError> {
        tracing::debug!("layout pass from {}", tree.id_of(root)?);
        let laid_out = Self::layout_pass(tree, root)?;

        tracing::debug!(
            "constraint pass from {} ({} containers laid out)",
            tree.id_of(root)?,
            laid_out
        );
        tree.apply_constraints(root)?;

        self.check_geometry(tree, root)
    }

    /// Returns the number of containers whose algorithm ran.
    fn layout_pass(tree: &mut LayoutTree, node: NodeId) -> Result<usize, LayoutError> {
        let Some(container) = tree.element(node)?.container() else {
            return Ok(0);
        };

        let mut laid_out = 0;
        if container.kind().has_algorithm() {
            perform_layout(tree, node)?;
            laid_out += 1;
        }

        let children = tree.children(node)?.to_vec();
        for child in children {
            laid_out += Self::layout_pass(tree, child)?;
        }
        Ok(laid_out)
    }

    fn check_geometry(&self, tree: &mut LayoutTree, root: NodeId) -> Result<(), LayoutError> {
        for node in tree.pre_order(root)? {
            let element = tree.element(node)?;
            let frame = element.frame();
            if !frame.is_degenerate() {
                continue;
            }

            if self.config.strict_geometry {
                return Err(LayoutError::DegenerateGeometry {
                    element: element.id().clone(),
                    width: frame.width,
                    height: frame.height,
                });
            }

            tracing::debug!("clamping degenerate frame of {}: {}", element.id(), frame);
            tree.set_size(node, frame.width.max(0.0), frame.height.max(0.0))?;
        }
        Ok(())
    }
}
