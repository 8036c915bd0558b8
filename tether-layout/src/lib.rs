//! Tether: constraint-and-flow layout engine
//!
//! Tether computes rectangular frames for a tree of UI elements. Containers
//! arrange their children with one of three algorithms (flow, grid, flex) or
//! leave them to anchor constraints, which bind one edge, center or extent of
//! an element to another element's.
//!
//! # Architecture
//!
//! Elements live in a [`LayoutTree`] arena and are addressed by [`NodeId`].
//! A [`LayoutEngine`] runs two passes over a subtree: every container's
//! algorithm first, then every constraint in pre-order. Constraints may only
//! point at elements already visited in that order, which is checked before
//! any frame moves.
//!
//! # Usage
//!
//! ```
//! use tether_layout::{Anchor, ContainerKind, LayoutEngine, LayoutTree, Rect};
//!
//! let mut tree = LayoutTree::new();
//! let stage = tree
//!     .create_container(Some("stage"), Rect::new(0.0, 0.0, 200.0, 100.0), ContainerKind::Anchor)
//!     .unwrap();
//! let badge = tree.create_element(Some("badge"), Rect::new(0.0, 0.0, 50.0, 20.0)).unwrap();
//! tree.add_child(stage, badge).unwrap();
//! tree.add_constraint(badge, Anchor::CenterX, Some((stage, Anchor::CenterX)), 0.0).unwrap();
//!
//! LayoutEngine::default().layout(&mut tree, stage).unwrap();
//! assert_eq!(tree.frame(badge).unwrap().x, 75.0);
//! ```

// Geometry and identity
pub mod id;
pub mod primitives;

// Element model
pub mod anchor;
pub mod element;
pub mod tree;

// Algorithms and orchestration
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;

pub use anchor::{Anchor, AnchorTarget, Constraint};
pub use config::EngineConfig;
pub use element::{Container, ContainerKind, Element, LayoutHint};
pub use engine::LayoutEngine;
pub use error::{ErrorKind, LayoutError};
pub use id::{ElementId, NodeId};
pub use layout::{
    AlignItems, FlexDirection, FlexItem, FlexLayout, FlowDirection, FlowLayout, GridLayout,
    GridPlacement, JustifyContent, perform_layout,
};
pub use primitives::{Point, Rect, Size};
pub use tree::LayoutTree;
