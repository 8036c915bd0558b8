//! Built-in sample window: a header with logo and navigation, a content row
//! with a sidebar and a card grid, a footer, and a toast pinned above the
//! bottom edge by constraints.

use anyhow::Result;
use tether_layout::{
    AlignItems, Anchor, ContainerKind, FlexDirection, FlexItem, FlexLayout, GridLayout,
    GridPlacement, JustifyContent, LayoutTree, NodeId, Rect,
};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

fn sized(width: f32, height: f32) -> Rect {
    Rect::new(0.0, 0.0, width, height)
}

pub fn build() -> Result<(LayoutTree, NodeId)> {
    let mut tree = LayoutTree::new();

    let window =
        tree.create_container(Some("window"), sized(WIDTH, HEIGHT), ContainerKind::Absolute)?;
    let main_layout = tree.create_container(
        Some("main_layout"),
        sized(WIDTH, HEIGHT),
        ContainerKind::Flex(
            FlexLayout::new()
                .direction(FlexDirection::Column)
                .align(AlignItems::Stretch),
        ),
    )?;
    tree.add_child(window, main_layout)?;

    // Header: logo on the left, navigation pushed to the right.
    let header = tree.create_container(
        Some("header"),
        sized(WIDTH, 60.0),
        ContainerKind::Flex(
            FlexLayout::new()
                .justify(JustifyContent::SpaceBetween)
                .align(AlignItems::Center),
        ),
    )?;
    tree.add_child(main_layout, header)?;

    let logo = tree.create_element(Some("logo"), sized(100.0, 40.0))?;
    tree.add_child(header, logo)?;

    let nav = tree.create_container(
        Some("nav"),
        sized(400.0, 40.0),
        ContainerKind::Flex(
            FlexLayout::new()
                .justify(JustifyContent::End)
                .align(AlignItems::Center)
                .gap(20.0),
        ),
    )?;
    tree.add_child(header, nav)?;
    for i in 0..3 {
        let id = format!("nav_item_{i}");
        let item = tree.create_element(Some(id.as_str()), sized(80.0, 30.0))?;
        tree.add_child(nav, item)?;
    }

    // Content: fixed sidebar, grid takes the rest.
    let content = tree.create_container(
        Some("content_area"),
        Rect::ZERO,
        ContainerKind::Flex(FlexLayout::new().align(AlignItems::Stretch).gap(20.0)),
    )?;
    tree.add_flex_child(main_layout, content, FlexItem::new().grow(1.0))?;

    let sidebar = tree.create_container(
        Some("sidebar"),
        sized(200.0, 0.0),
        ContainerKind::Flex(
            FlexLayout::new()
                .direction(FlexDirection::Column)
                .align(AlignItems::Stretch)
                .gap(10.0),
        ),
    )?;
    tree.add_flex_child(content, sidebar, FlexItem::new().shrink(0.0))?;
    for i in 0..4 {
        let id = format!("menu_item_{i}");
        let item = tree.create_element(Some(id.as_str()), sized(200.0, 40.0))?;
        tree.add_child(sidebar, item)?;
    }

    let cards = tree.create_container(
        Some("main_content"),
        sized(580.0, 0.0),
        ContainerKind::Grid(GridLayout::new().columns(3).gap(20.0)),
    )?;
    tree.add_flex_child(content, cards, FlexItem::new().grow(1.0))?;
    for i in 0..6 {
        let id = format!("card_{i}");
        let card = tree.create_element(Some(id.as_str()), sized(180.0, 200.0))?;
        tree.add_grid_child(cards, card, GridPlacement::at(i % 3, i / 3))?;
    }

    let footer = tree.create_container(
        Some("footer"),
        sized(WIDTH, 50.0),
        ContainerKind::Flex(
            FlexLayout::new()
                .justify(JustifyContent::SpaceBetween)
                .align(AlignItems::Center),
        ),
    )?;
    tree.add_child(main_layout, footer)?;
    for id in ["footer_left", "footer_right"] {
        let part = tree.create_element(Some(id), sized(200.0, 30.0))?;
        tree.add_child(footer, part)?;
    }

    let toast = tree.create_element(Some("toast"), sized(240.0, 40.0))?;
    tree.add_child(window, toast)?;
    tree.anchor_to_parent(toast, &[(Anchor::Bottom, Anchor::Bottom)], -70.0)?;
    tree.anchor_to_parent(toast, &[(Anchor::CenterX, Anchor::CenterX)], 0.0)?;

    Ok((tree, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_layout::LayoutEngine;

    fn laid_out() -> (LayoutTree, NodeId) {
        let (mut tree, window) = build().unwrap();
        LayoutEngine::default().layout(&mut tree, window).unwrap();
        (tree, window)
    }

    fn frame(tree: &LayoutTree, root: NodeId, id: &str) -> Rect {
        let node = tree.find_by_id(root, id).unwrap();
        tree.frame(node).unwrap()
    }

    #[test]
    fn sections_stack_down_the_window() {
        let (tree, window) = laid_out();
        assert_eq!(frame(&tree, window, "header"), Rect::new(0.0, 0.0, 800.0, 60.0));
        assert_eq!(frame(&tree, window, "content_area"), Rect::new(0.0, 60.0, 800.0, 490.0));
        assert_eq!(frame(&tree, window, "footer"), Rect::new(0.0, 550.0, 800.0, 50.0));
    }

    #[test]
    fn header_and_footer_spread_their_children() {
        let (tree, window) = laid_out();
        assert_eq!(frame(&tree, window, "logo"), Rect::new(0.0, 10.0, 100.0, 40.0));
        assert_eq!(frame(&tree, window, "nav"), Rect::new(400.0, 10.0, 400.0, 40.0));
        // 3 * 80 + 2 * 20 = 280 of 400, packed to the end.
        assert_eq!(frame(&tree, window, "nav_item_0").x, 120.0);
        assert_eq!(frame(&tree, window, "nav_item_2"), Rect::new(320.0, 5.0, 80.0, 30.0));
        assert_eq!(frame(&tree, window, "footer_right"), Rect::new(600.0, 10.0, 200.0, 30.0));
    }

    #[test]
    fn content_row_splits_into_sidebar_and_grid() {
        let (tree, window) = laid_out();
        assert_eq!(frame(&tree, window, "sidebar"), Rect::new(0.0, 0.0, 200.0, 490.0));
        assert_eq!(frame(&tree, window, "menu_item_3"), Rect::new(0.0, 150.0, 200.0, 40.0));

        let grid = frame(&tree, window, "main_content");
        assert_eq!(grid.x, 220.0);
        assert_eq!(grid.width, 580.0);
        assert_eq!(grid.height, 420.0);
        assert_eq!(frame(&tree, window, "card_4"), Rect::new(200.0, 220.0, 180.0, 200.0));
    }

    #[test]
    fn toast_is_pinned_by_constraints() {
        let (tree, window) = laid_out();
        assert_eq!(frame(&tree, window, "toast"), Rect::new(280.0, 490.0, 240.0, 40.0));
    }
}
