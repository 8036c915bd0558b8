//! The layout arena.
//!
//! `LayoutTree` owns every element. Parent/child links are `NodeId` handles:
//! a container's `children` list is the owning side, the child's `parent` is
//! a plain back-reference. Detached nodes stay in the arena and can be
//! attached again.

use std::collections::HashMap;

use crate::anchor::{Anchor, AnchorTarget, Constraint};
use crate::element::{Container, ContainerKind, Element, LayoutHint};
use crate::error::LayoutError;
use crate::id::{ElementId, IdGenerator, NodeId};
use crate::layout::{
    AlignItems, FlexDirection, FlexItem, FlexLayout, FlowDirection, FlowLayout, GridLayout,
    GridPlacement, JustifyContent,
};
use crate::primitives::{Point, Rect, Size};

#[derive(Debug, Default)]
pub struct LayoutTree {
    nodes: Vec<Element>,
    by_id: HashMap<ElementId, NodeId>,
    ids: IdGenerator,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =====================================================================
    // Creation
    // =====================================================================

    /// Create a detached leaf element. A missing id is generated.
    pub fn create_element(&mut self, id: Option<&str>, frame: Rect) -> Result<NodeId, LayoutError> {
        self.insert(id, frame, None)
    }

    /// Create a detached container after validating its parameters.
    pub fn create_container(
        &mut self,
        id: Option<&str>,
        frame: Rect,
        kind: ContainerKind,
    ) -> Result<NodeId, LayoutError> {
        kind.validate()?;
        let container = Container {
            kind,
            children: Vec::new(),
        };
        self.insert(id, frame, Some(container))
    }

    fn insert(
        &mut self,
        id: Option<&str>,
        frame: Rect,
        container: Option<Container>,
    ) -> Result<NodeId, LayoutError> {
        let id = match id {
            Some(id) => {
                let id = ElementId::from(id);
                if self.by_id.contains_key(&id) {
                    return Err(LayoutError::DuplicateId(id));
                }
                id
            }
            None => loop {
                let id = self.ids.next_id();
                if !self.by_id.contains_key(&id) {
                    break id;
                }
            },
        };

        let node = NodeId(self.nodes.len());
        self.by_id.insert(id.clone(), node);
        self.nodes.push(Element::new(id, frame, container));
        Ok(node)
    }

    // =====================================================================
    // Access
    // =====================================================================

    pub fn element(&self, node: NodeId) -> Result<&Element, LayoutError> {
        self.nodes.get(node.0).ok_or(LayoutError::UnknownNode(node))
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> Result<&mut Element, LayoutError> {
        self.nodes.get_mut(node.0).ok_or(LayoutError::UnknownNode(node))
    }

    pub fn frame(&self, node: NodeId) -> Result<Rect, LayoutError> {
        Ok(self.element(node)?.frame)
    }

    pub fn id_of(&self, node: NodeId) -> Result<&ElementId, LayoutError> {
        Ok(&self.element(node)?.id)
    }

    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.element(node)?.parent)
    }

    /// Children of `node` in insertion order; empty for leaf elements.
    pub fn children(&self, node: NodeId) -> Result<&[NodeId], LayoutError> {
        Ok(self
            .element(node)?
            .container
            .as_ref()
            .map(|c| c.children.as_slice())
            .unwrap_or(&[]))
    }

    pub fn kind(&self, node: NodeId) -> Result<&ContainerKind, LayoutError> {
        let element = self.element(node)?;
        element
            .container
            .as_ref()
            .map(|c| &c.kind)
            .ok_or_else(|| LayoutError::NotAContainer(element.id.clone()))
    }

    fn container_mut(&mut self, node: NodeId) -> Result<&mut Container, LayoutError> {
        let element = self.element_mut(node)?;
        match element.container.as_mut() {
            Some(container) => Ok(container),
            None => Err(LayoutError::NotAContainer(element.id.clone())),
        }
    }

    /// Look up an element anywhere in the arena.
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Depth-first search of the subtree rooted at `root`, `root` included.
    pub fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        let element = self.nodes.get(root.0)?;
        if element.id == id {
            return Some(root);
        }
        let container = element.container.as_ref()?;
        container
            .children
            .iter()
            .find_map(|&child| self.find_by_id(child, id))
    }

    /// Nodes of the subtree rooted at `root`, parents before children.
    pub fn pre_order(&self, root: NodeId) -> Result<Vec<NodeId>, LayoutError> {
        self.element(root)?;
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            order.push(node);
            if let Some(container) = &self.nodes[node.0].container {
                stack.extend(container.children.iter().rev());
            }
        }
        Ok(order)
    }

    // =====================================================================
    // Structure
    // =====================================================================

    /// Attach `child` to `parent` with the parent's default placement.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, LayoutError> {
        let hint = self.kind(parent)?.default_hint();
        self.attach(parent, child, hint)
    }

    /// Attach `child` to a grid container at an explicit cell.
    pub fn add_grid_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        placement: GridPlacement,
    ) -> Result<NodeId, LayoutError> {
        self.expect_kind(parent, "grid", |k| matches!(k, ContainerKind::Grid(_)))?;
        let element = self.element(child)?;
        if let Err(reason) = placement.validate() {
            return Err(LayoutError::InvalidPlacement {
                element: element.id.clone(),
                reason,
            });
        }
        self.attach(parent, child, Some(LayoutHint::Grid(placement)))
    }

    /// Attach `child` to a flex container with explicit flex properties.
    pub fn add_flex_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        item: FlexItem,
    ) -> Result<NodeId, LayoutError> {
        self.expect_kind(parent, "flex", |k| matches!(k, ContainerKind::Flex(_)))?;
        self.element(child)?;
        item.validate()?;
        self.attach(parent, child, Some(LayoutHint::Flex(item)))
    }

    fn attach(
        &mut self,
        parent: NodeId,
        child: NodeId,
        hint: Option<LayoutHint>,
    ) -> Result<NodeId, LayoutError> {
        self.kind(parent)?;
        self.element(child)?;

        // Refuse to hang a node below itself.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(LayoutError::WouldCycle {
                    parent: self.nodes[parent.0].id.clone(),
                    child: self.nodes[child.0].id.clone(),
                });
            }
            cursor = self.nodes[node.0].parent;
        }

        if let Some(old_parent) = self.nodes[child.0].parent {
            self.detach(old_parent, child);
        }

        self.container_mut(parent)?.children.push(child);
        let element = &mut self.nodes[child.0];
        element.parent = Some(parent);
        element.hint = hint;
        Ok(child)
    }

    /// Detach `child` from `parent`. The node stays in the arena.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.kind(parent)?;
        if self.element(child)?.parent != Some(parent) {
            return Err(LayoutError::NotAChild {
                parent: self.nodes[parent.0].id.clone(),
                child: self.nodes[child.0].id.clone(),
            });
        }
        self.detach(parent, child);
        Ok(())
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(container) = self.nodes[parent.0].container.as_mut() {
            container.children.retain(|&c| c != child);
        }
        let element = &mut self.nodes[child.0];
        element.parent = None;
        element.hint = None;
    }

    fn expect_kind(
        &self,
        node: NodeId,
        expected: &'static str,
        matches: impl Fn(&ContainerKind) -> bool,
    ) -> Result<&ContainerKind, LayoutError> {
        let kind = self.kind(node)?;
        if matches(kind) {
            Ok(kind)
        } else {
            Err(LayoutError::WrongContainerKind {
                element: self.nodes[node.0].id.clone(),
                expected,
                actual: kind.name(),
            })
        }
    }

    // =====================================================================
    // Frames
    // =====================================================================

    pub fn set_position(&mut self, node: NodeId, x: f32, y: f32) -> Result<(), LayoutError> {
        let frame = &mut self.element_mut(node)?.frame;
        frame.x = x;
        frame.y = y;
        Ok(())
    }

    pub fn set_size(&mut self, node: NodeId, width: f32, height: f32) -> Result<(), LayoutError> {
        let frame = &mut self.element_mut(node)?.frame;
        frame.width = width;
        frame.height = height;
        Ok(())
    }

    pub fn set_origin(&mut self, node: NodeId, origin: Point) -> Result<(), LayoutError> {
        self.set_position(node, origin.x, origin.y)
    }

    pub fn set_extent(&mut self, node: NodeId, size: Size) -> Result<(), LayoutError> {
        self.set_size(node, size.width, size.height)
    }

    pub fn set_frame(&mut self, node: NodeId, frame: Rect) -> Result<(), LayoutError> {
        self.element_mut(node)?.frame = frame;
        Ok(())
    }

    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<(), LayoutError> {
        self.element_mut(node)?.visible = visible;
        Ok(())
    }

    // =====================================================================
    // Container parameters
    // =====================================================================

    /// Edit a flow container's parameters; rejected edits leave it unchanged.
    pub fn configure_flow(
        &mut self,
        node: NodeId,
        edit: impl FnOnce(&mut FlowLayout),
    ) -> Result<(), LayoutError> {
        self.configure(node, "flow", ContainerKind::flow_mut, edit)
    }

    /// Edit a grid container's parameters; rejected edits leave it unchanged.
    pub fn configure_grid(
        &mut self,
        node: NodeId,
        edit: impl FnOnce(&mut GridLayout),
    ) -> Result<(), LayoutError> {
        self.configure(node, "grid", ContainerKind::grid_mut, edit)
    }

    /// Edit a flex container's parameters; rejected edits leave it unchanged.
    pub fn configure_flex(
        &mut self,
        node: NodeId,
        edit: impl FnOnce(&mut FlexLayout),
    ) -> Result<(), LayoutError> {
        self.configure(node, "flex", ContainerKind::flex_mut, edit)
    }

    fn configure<T>(
        &mut self,
        node: NodeId,
        expected: &'static str,
        select: impl Fn(&mut ContainerKind) -> Option<&mut T>,
        edit: impl FnOnce(&mut T),
    ) -> Result<(), LayoutError> {
        let element = self.element(node)?;
        let Some(container) = element.container.as_ref() else {
            return Err(LayoutError::NotAContainer(element.id.clone()));
        };
        let mut candidate = container.kind;
        let Some(params) = select(&mut candidate) else {
            return Err(LayoutError::WrongContainerKind {
                element: element.id.clone(),
                expected,
                actual: container.kind.name(),
            });
        };
        edit(params);
        candidate.validate()?;
        self.container_mut(node)?.kind = candidate;
        Ok(())
    }

    /// Replace the placement of a child already attached to a grid.
    pub fn set_grid_placement(
        &mut self,
        child: NodeId,
        placement: GridPlacement,
    ) -> Result<(), LayoutError> {
        let element = self.element(child)?;
        if !matches!(element.hint, Some(LayoutHint::Grid(_))) {
            return Err(LayoutError::InvalidPlacement {
                element: element.id.clone(),
                reason: "element is not placed in a grid".to_string(),
            });
        }
        placement
            .validate()
            .map_err(|reason| LayoutError::InvalidPlacement {
                element: element.id.clone(),
                reason,
            })?;
        self.nodes[child.0].hint = Some(LayoutHint::Grid(placement));
        Ok(())
    }

    /// Replace the flex properties of a child already attached to a flex container.
    pub fn set_flex_item(&mut self, child: NodeId, item: FlexItem) -> Result<(), LayoutError> {
        item.validate()?;
        let element = self.element_mut(child)?;
        if !matches!(element.hint, Some(LayoutHint::Flex(_))) {
            return Err(LayoutError::WrongContainerKind {
                element: element.id.clone(),
                expected: "flex",
                actual: "non-flex",
            });
        }
        element.hint = Some(LayoutHint::Flex(item));
        Ok(())
    }

    pub fn set_flow_direction(
        &mut self,
        node: NodeId,
        direction: FlowDirection,
    ) -> Result<(), LayoutError> {
        self.configure_flow(node, |flow| flow.direction = direction)
    }

    pub fn set_spacing(&mut self, node: NodeId, spacing: f32) -> Result<(), LayoutError> {
        self.configure_flow(node, |flow| flow.spacing = spacing)
    }

    pub fn set_columns(&mut self, node: NodeId, columns: usize) -> Result<(), LayoutError> {
        self.configure_grid(node, |grid| grid.columns = columns)
    }

    /// `None` switches the grid back to inferred row heights.
    pub fn set_row_height(
        &mut self,
        node: NodeId,
        row_height: Option<f32>,
    ) -> Result<(), LayoutError> {
        self.configure_grid(node, |grid| grid.row_height = row_height)
    }

    pub fn set_column_gap(&mut self, node: NodeId, gap: f32) -> Result<(), LayoutError> {
        self.configure_grid(node, |grid| grid.column_gap = gap)
    }

    pub fn set_row_gap(&mut self, node: NodeId, gap: f32) -> Result<(), LayoutError> {
        self.configure_grid(node, |grid| grid.row_gap = gap)
    }

    pub fn set_direction(
        &mut self,
        node: NodeId,
        direction: FlexDirection,
    ) -> Result<(), LayoutError> {
        self.configure_flex(node, |flex| flex.direction = direction)
    }

    pub fn set_justify_content(
        &mut self,
        node: NodeId,
        justify: JustifyContent,
    ) -> Result<(), LayoutError> {
        self.configure_flex(node, |flex| flex.justify_content = justify)
    }

    pub fn set_align_items(&mut self, node: NodeId, align: AlignItems) -> Result<(), LayoutError> {
        self.configure_flex(node, |flex| flex.align_items = align)
    }

    pub fn set_gap(&mut self, node: NodeId, gap: f32) -> Result<(), LayoutError> {
        self.configure_flex(node, |flex| flex.gap = gap)
    }

    // =====================================================================
    // Constraints
    // =====================================================================

    /// Store the constraint for `anchor`, replacing any earlier one.
    ///
    /// `target` of `None` pins the anchor to `constant`.
    pub fn add_constraint(
        &mut self,
        source: NodeId,
        anchor: Anchor,
        target: Option<(NodeId, Anchor)>,
        constant: f32,
    ) -> Result<Constraint, LayoutError> {
        if let Some((target_node, _)) = target {
            self.element(target_node)?;
        }
        let constraint = Constraint {
            source,
            source_anchor: anchor,
            target: target.map(|(node, anchor)| AnchorTarget { node, anchor }),
            constant,
        };
        self.element_mut(source)?
            .constraints
            .insert(anchor, constraint);
        Ok(constraint)
    }

    pub fn remove_constraint(
        &mut self,
        source: NodeId,
        anchor: Anchor,
    ) -> Result<Option<Constraint>, LayoutError> {
        Ok(self.element_mut(source)?.constraints.shift_remove(&anchor))
    }

    /// Resolve constraints for `root` and then every descendant, pre-order.
    ///
    /// A constraint may only read nodes of this subtree that were already
    /// resolved (ancestors, earlier siblings and their subtrees, or the
    /// element itself). Anything else is a structural error.
    pub fn apply_constraints(&mut self, root: NodeId) -> Result<(), LayoutError> {
        let order = self.pre_order(root)?;
        let position: HashMap<NodeId, usize> =
            order.iter().enumerate().map(|(i, &node)| (node, i)).collect();

        for (visit, &node) in order.iter().enumerate() {
            let element = &self.nodes[node.0];
            for constraint in element.constraints.values() {
                let Some(target) = constraint.target else {
                    continue;
                };
                match position.get(&target.node) {
                    None => {
                        return Err(LayoutError::UnreachableTarget {
                            source_id: element.id.clone(),
                            anchor: constraint.source_anchor,
                            target: self.id_of(target.node)?.clone(),
                        });
                    }
                    Some(&target_visit) if target_visit > visit => {
                        return Err(LayoutError::UnvisitedTarget {
                            source_id: element.id.clone(),
                            anchor: constraint.source_anchor,
                            target: self.nodes[target.node.0].id.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
            self.apply_own_constraints(node)?;
        }
        Ok(())
    }

    /// Resolve one element's constraints against the frame it has on entry.
    ///
    /// Per axis only the first of `start > center > end` applies; size
    /// constraints are independent of position.
    fn apply_own_constraints(&mut self, node: NodeId) -> Result<(), LayoutError> {
        let element = self.element(node)?;
        if element.constraints.is_empty() {
            return Ok(());
        }
        let mut frame = element.frame;

        if let Some(left) = self.resolve_slot(element, Anchor::Left)? {
            frame.x = left;
        } else if let Some(center_x) = self.resolve_slot(element, Anchor::CenterX)? {
            frame.x = center_x - element.frame.width / 2.0;
        } else if let Some(right) = self.resolve_slot(element, Anchor::Right)? {
            frame.x = right - element.frame.width;
        }

        if let Some(top) = self.resolve_slot(element, Anchor::Top)? {
            frame.y = top;
        } else if let Some(center_y) = self.resolve_slot(element, Anchor::CenterY)? {
            frame.y = center_y - element.frame.height / 2.0;
        } else if let Some(bottom) = self.resolve_slot(element, Anchor::Bottom)? {
            frame.y = bottom - element.frame.height;
        }

        if let Some(width) = self.resolve_slot(element, Anchor::Width)? {
            frame.width = width;
        }
        if let Some(height) = self.resolve_slot(element, Anchor::Height)? {
            frame.height = height;
        }

        self.nodes[node.0].frame = frame;
        Ok(())
    }

    fn resolve_slot(&self, element: &Element, anchor: Anchor) -> Result<Option<f32>, LayoutError> {
        element
            .constraints
            .get(&anchor)
            .map(|c| c.resolve(self))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn absolute(tree: &mut LayoutTree, id: &str, frame: Rect) -> NodeId {
        tree.create_container(Some(id), frame, ContainerKind::Absolute).unwrap()
    }

    #[test]
    fn generated_ids_skip_taken_labels() {
        let mut tree = LayoutTree::new();
        tree.create_element(Some("element_1"), Rect::ZERO).unwrap();
        let node = tree.create_element(None, Rect::ZERO).unwrap();
        assert_eq!(tree.id_of(node).unwrap(), "element_2");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut tree = LayoutTree::new();
        tree.create_element(Some("logo"), Rect::ZERO).unwrap();
        let err = tree.create_element(Some("logo"), Rect::ZERO).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn add_child_sets_parent_and_keeps_order() {
        let mut tree = LayoutTree::new();
        let root = absolute(&mut tree, "root", Rect::ZERO);
        let a = tree.create_element(Some("a"), Rect::ZERO).unwrap();
        let b = tree.create_element(Some("b"), Rect::ZERO).unwrap();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[a, b]);
        assert_eq!(tree.parent(a).unwrap(), Some(root));
        assert_eq!(tree.parent(root).unwrap(), None);
    }

    #[test]
    fn re_adding_detaches_from_previous_parent() {
        let mut tree = LayoutTree::new();
        let first = absolute(&mut tree, "first", Rect::ZERO);
        let second = absolute(&mut tree, "second", Rect::ZERO);
        let child = tree.create_element(Some("child"), Rect::ZERO).unwrap();

        tree.add_child(first, child).unwrap();
        tree.add_child(second, child).unwrap();

        assert!(tree.children(first).unwrap().is_empty());
        assert_eq!(tree.children(second).unwrap(), &[child]);
        assert_eq!(tree.parent(child).unwrap(), Some(second));
    }

    #[test]
    fn leaf_cannot_take_children() {
        let mut tree = LayoutTree::new();
        let leaf = tree.create_element(Some("leaf"), Rect::ZERO).unwrap();
        let other = tree.create_element(Some("other"), Rect::ZERO).unwrap();
        let err = tree.add_child(leaf, other).unwrap_err();
        assert!(matches!(err, LayoutError::NotAContainer(_)));
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = LayoutTree::new();
        let outer = absolute(&mut tree, "outer", Rect::ZERO);
        let inner = absolute(&mut tree, "inner", Rect::ZERO);
        tree.add_child(outer, inner).unwrap();

        assert!(matches!(
            tree.add_child(inner, outer).unwrap_err(),
            LayoutError::WouldCycle { .. }
        ));
        assert!(matches!(
            tree.add_child(inner, inner).unwrap_err(),
            LayoutError::WouldCycle { .. }
        ));
    }

    #[test]
    fn remove_child_requires_membership() {
        let mut tree = LayoutTree::new();
        let root = absolute(&mut tree, "root", Rect::ZERO);
        let child = tree.create_element(Some("child"), Rect::ZERO).unwrap();
        assert!(matches!(
            tree.remove_child(root, child).unwrap_err(),
            LayoutError::NotAChild { .. }
        ));

        tree.add_child(root, child).unwrap();
        tree.remove_child(root, child).unwrap();
        assert!(tree.children(root).unwrap().is_empty());
        assert_eq!(tree.parent(child).unwrap(), None);
    }

    #[test]
    fn find_by_id_searches_depth_first() {
        let mut tree = LayoutTree::new();
        let root = absolute(&mut tree, "root", Rect::ZERO);
        let panel = absolute(&mut tree, "panel", Rect::ZERO);
        let button = tree.create_element(Some("button"), Rect::ZERO).unwrap();
        let stray = tree.create_element(Some("stray"), Rect::ZERO).unwrap();
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, button).unwrap();

        assert_eq!(tree.find_by_id(root, "root"), Some(root));
        assert_eq!(tree.find_by_id(root, "button"), Some(button));
        assert_eq!(tree.find_by_id(panel, "button"), Some(button));
        assert_eq!(tree.find_by_id(root, "stray"), None);
        assert_eq!(tree.lookup("stray"), Some(stray));
    }

    #[test]
    fn pre_order_visits_parents_first() {
        let mut tree = LayoutTree::new();
        let root = absolute(&mut tree, "root", Rect::ZERO);
        let a = absolute(&mut tree, "a", Rect::ZERO);
        let a1 = tree.create_element(Some("a1"), Rect::ZERO).unwrap();
        let b = tree.create_element(Some("b"), Rect::ZERO).unwrap();
        tree.add_child(root, a).unwrap();
        tree.add_child(a, a1).unwrap();
        tree.add_child(root, b).unwrap();

        assert_eq!(tree.pre_order(root).unwrap(), vec![root, a, a1, b]);
    }

    #[test]
    fn later_constraint_replaces_earlier_for_same_anchor() {
        let mut tree = LayoutTree::new();
        let node = tree.create_element(Some("node"), Rect::ZERO).unwrap();
        tree.add_constraint(node, Anchor::Left, None, 10.0).unwrap();
        tree.add_constraint(node, Anchor::Left, None, 25.0).unwrap();

        let element = tree.element(node).unwrap();
        assert_eq!(element.constraints().count(), 1);
        assert_eq!(element.constraint(Anchor::Left).unwrap().constant, 25.0);
    }

    #[test]
    fn horizontal_priority_prefers_left() {
        let mut tree = LayoutTree::new();
        let node = tree.create_element(Some("node"), Rect::new(0.0, 0.0, 40.0, 10.0)).unwrap();
        tree.add_constraint(node, Anchor::Right, None, 100.0).unwrap();
        tree.add_constraint(node, Anchor::CenterX, None, 50.0).unwrap();
        tree.apply_constraints(node).unwrap();
        assert_eq!(tree.frame(node).unwrap().x, 30.0);

        tree.add_constraint(node, Anchor::Left, None, 5.0).unwrap();
        tree.apply_constraints(node).unwrap();
        assert_eq!(tree.frame(node).unwrap().x, 5.0);
    }

    #[test]
    fn vertical_priority_prefers_top() {
        let mut tree = LayoutTree::new();
        let node = tree.create_element(Some("node"), Rect::new(0.0, 0.0, 40.0, 10.0)).unwrap();
        tree.add_constraint(node, Anchor::Bottom, None, 100.0).unwrap();
        tree.add_constraint(node, Anchor::CenterY, None, 50.0).unwrap();
        tree.apply_constraints(node).unwrap();
        assert_eq!(tree.frame(node).unwrap().y, 45.0);

        tree.add_constraint(node, Anchor::Top, None, 5.0).unwrap();
        tree.apply_constraints(node).unwrap();
        assert_eq!(tree.frame(node).unwrap().y, 5.0);
    }

    #[test]
    fn bottom_and_size_constraints() {
        let mut tree = LayoutTree::new();
        let node = tree.create_element(Some("node"), Rect::new(0.0, 0.0, 40.0, 10.0)).unwrap();
        tree.add_constraint(node, Anchor::Bottom, None, 100.0).unwrap();
        tree.add_constraint(node, Anchor::Width, None, 64.0).unwrap();
        tree.apply_constraints(node).unwrap();

        assert_eq!(tree.frame(node).unwrap(), Rect::new(0.0, 90.0, 64.0, 10.0));
    }

    #[test]
    fn constraint_to_later_sibling_is_rejected() {
        let mut tree = LayoutTree::new();
        let root = absolute(&mut tree, "root", Rect::new(0.0, 0.0, 100.0, 100.0));
        let first = tree.create_element(Some("first"), Rect::ZERO).unwrap();
        let second = tree.create_element(Some("second"), Rect::new(30.0, 0.0, 10.0, 10.0)).unwrap();
        tree.add_child(root, first).unwrap();
        tree.add_child(root, second).unwrap();
        tree.add_constraint(first, Anchor::Left, Some((second, Anchor::Right)), 0.0).unwrap();

        let err = tree.apply_constraints(root).unwrap_err();
        assert!(matches!(err, LayoutError::UnvisitedTarget { .. }));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn constraint_to_earlier_sibling_resolves() {
        let mut tree = LayoutTree::new();
        let root = absolute(&mut tree, "root", Rect::new(0.0, 0.0, 100.0, 100.0));
        let first = tree.create_element(Some("first"), Rect::new(10.0, 0.0, 30.0, 10.0)).unwrap();
        let second = tree.create_element(Some("second"), Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.add_child(root, first).unwrap();
        tree.add_child(root, second).unwrap();
        tree.add_constraint(second, Anchor::Left, Some((first, Anchor::Right)), 4.0).unwrap();

        tree.apply_constraints(root).unwrap();
        assert_eq!(tree.frame(second).unwrap().x, 44.0);
    }

    #[test]
    fn constraint_outside_subtree_is_rejected() {
        let mut tree = LayoutTree::new();
        let root = absolute(&mut tree, "root", Rect::ZERO);
        let child = tree.create_element(Some("child"), Rect::ZERO).unwrap();
        let outsider = tree.create_element(Some("outsider"), Rect::ZERO).unwrap();
        tree.add_child(root, child).unwrap();
        tree.add_constraint(child, Anchor::Top, Some((outsider, Anchor::Bottom)), 0.0).unwrap();

        assert!(matches!(
            tree.apply_constraints(root).unwrap_err(),
            LayoutError::UnreachableTarget { .. }
        ));
    }

    #[test]
    fn unknown_target_is_rejected_eagerly() {
        let mut tree = LayoutTree::new();
        let node = tree.create_element(None, Rect::ZERO).unwrap();
        let err = tree
            .add_constraint(node, Anchor::Left, Some((NodeId(99), Anchor::Left)), 0.0)
            .unwrap_err();
        assert!(matches!(err, LayoutError::UnknownNode(_)));
    }

    #[test]
    fn configure_validates_before_committing() {
        let mut tree = LayoutTree::new();
        let kind = ContainerKind::Grid(GridLayout::new().columns(3));
        let grid = tree.create_container(Some("grid"), Rect::ZERO, kind).unwrap();

        let err = tree.configure_grid(grid, |g| g.columns = 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        match tree.kind(grid).unwrap() {
            ContainerKind::Grid(g) => assert_eq!(g.columns, 3),
            other => panic!("expected grid, got {other:?}"),
        }

        let err = tree.configure_flex(grid, |f| f.gap = 4.0).unwrap_err();
        assert!(matches!(err, LayoutError::WrongContainerKind { .. }));
    }

    #[test]
    fn named_setters_edit_one_parameter() {
        let mut tree = LayoutTree::new();
        let flex = tree
            .create_container(Some("flex"), Rect::ZERO, ContainerKind::Flex(FlexLayout::new()))
            .unwrap();
        tree.set_direction(flex, FlexDirection::Column).unwrap();
        tree.set_justify_content(flex, JustifyContent::SpaceEvenly).unwrap();
        tree.set_align_items(flex, AlignItems::Stretch).unwrap();
        tree.set_gap(flex, 6.0).unwrap();
        assert_eq!(
            tree.kind(flex).unwrap(),
            &ContainerKind::Flex(
                FlexLayout::new()
                    .direction(FlexDirection::Column)
                    .justify(JustifyContent::SpaceEvenly)
                    .align(AlignItems::Stretch)
                    .gap(6.0)
            )
        );
        assert_eq!(tree.set_gap(flex, -1.0).unwrap_err().kind(), ErrorKind::Configuration);

        let flow = tree
            .create_container(Some("flow"), Rect::ZERO, ContainerKind::Flow(FlowLayout::new()))
            .unwrap();
        tree.set_flow_direction(flow, FlowDirection::Horizontal).unwrap();
        tree.set_spacing(flow, 3.0).unwrap();
        assert_eq!(
            tree.kind(flow).unwrap(),
            &ContainerKind::Flow(
                FlowLayout::new()
                    .direction(FlowDirection::Horizontal)
                    .spacing(3.0)
            )
        );
        assert!(matches!(
            tree.set_columns(flow, 4).unwrap_err(),
            LayoutError::WrongContainerKind { .. }
        ));

        let grid = tree
            .create_container(Some("grid"), Rect::ZERO, ContainerKind::Grid(GridLayout::new()))
            .unwrap();
        tree.set_columns(grid, 4).unwrap();
        tree.set_row_height(grid, Some(30.0)).unwrap();
        tree.set_column_gap(grid, 2.0).unwrap();
        tree.set_row_gap(grid, 0.0).unwrap();
        assert_eq!(
            tree.kind(grid).unwrap(),
            &ContainerKind::Grid(
                GridLayout::new()
                    .columns(4)
                    .row_height(30.0)
                    .column_gap(2.0)
                    .row_gap(0.0)
            )
        );
        assert!(matches!(
            tree.set_columns(grid, 0).unwrap_err(),
            LayoutError::InvalidColumns(0)
        ));
    }

    #[test]
    fn grid_hint_must_match_parent_kind() {
        let mut tree = LayoutTree::new();
        let flex = tree
            .create_container(Some("flex"), Rect::ZERO, ContainerKind::Flex(FlexLayout::new()))
            .unwrap();
        let child = tree.create_element(Some("child"), Rect::ZERO).unwrap();
        let err = tree.add_grid_child(flex, child, GridPlacement::at(0, 0)).unwrap_err();
        assert!(matches!(err, LayoutError::WrongContainerKind { .. }));
    }

    #[test]
    fn negative_grid_cell_is_structural() {
        let mut tree = LayoutTree::new();
        let grid = tree
            .create_container(Some("grid"), Rect::ZERO, ContainerKind::Grid(GridLayout::new()))
            .unwrap();
        let child = tree.create_element(Some("child"), Rect::ZERO).unwrap();
        let err = tree.add_grid_child(grid, child, GridPlacement::at(-1, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(tree.children(grid).unwrap().is_empty());
    }

    #[test]
    fn negative_flex_grow_is_configuration() {
        let mut tree = LayoutTree::new();
        let flex = tree
            .create_container(Some("flex"), Rect::ZERO, ContainerKind::Flex(FlexLayout::new()))
            .unwrap();
        let child = tree.create_element(Some("child"), Rect::ZERO).unwrap();
        let err = tree
            .add_flex_child(flex, child, FlexItem::new().grow(-1.0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
