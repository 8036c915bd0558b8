//! Grid container - fixed columns, explicit cells.
//!
//! Every child names its cell (`column`, `row`) and span when it is added;
//! nothing wraps automatically. Columns share the container width equally
//! after gaps. Rows either have a fixed height or take the height of their
//! tallest child, in which case the container height is recomputed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, non_negative};
use crate::id::NodeId;
use crate::primitives::Rect;
use crate::tree::LayoutTree;

/// Cell of a grid child. Spans default to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPlacement {
    pub column: i32,
    pub row: i32,
    pub column_span: u32,
    pub row_span: u32,
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self {
            column: 0,
            row: 0,
            column_span: 1,
            row_span: 1,
        }
    }
}

impl GridPlacement {
    /// Single cell at `(column, row)`.
    pub fn at(column: i32, row: i32) -> Self {
        Self {
            column,
            row,
            ..Self::default()
        }
    }

    pub fn span(mut self, column_span: u32, row_span: u32) -> Self {
        self.column_span = column_span;
        self.row_span = row_span;
        self
    }

    /// Check the cell, returning a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.column < 0 || self.row < 0 {
            return Err(format!(
                "cell ({}, {}) has a negative coordinate",
                self.column, self.row
            ));
        }
        if self.column_span == 0 || self.row_span == 0 {
            return Err(format!(
                "span {}x{} must be at least 1x1",
                self.column_span, self.row_span
            ));
        }
        Ok(())
    }

    fn first_row(&self) -> u64 {
        self.row as u64
    }

    /// One past the last row covered.
    fn end_row(&self) -> u64 {
        self.first_row() + u64::from(self.row_span)
    }

    fn end_column(&self) -> u64 {
        self.column as u64 + u64::from(self.column_span)
    }
}

/// Grid container parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub columns: usize,
    /// Fixed row height; `None` sizes each row to its tallest child.
    pub row_height: Option<f32>,
    pub column_gap: f32,
    pub row_gap: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 12,
            row_height: None,
            column_gap: 10.0,
            row_gap: 10.0,
        }
    }
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn row_height(mut self, row_height: f32) -> Self {
        self.row_height = Some(row_height);
        self
    }

    pub fn column_gap(mut self, gap: f32) -> Self {
        self.column_gap = gap;
        self
    }

    pub fn row_gap(mut self, gap: f32) -> Self {
        self.row_gap = gap;
        self
    }

    /// Set both gaps at once.
    pub fn gap(self, gap: f32) -> Self {
        self.column_gap(gap).row_gap(gap)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns < 1 {
            return Err(LayoutError::InvalidColumns(self.columns));
        }
        non_negative("column_gap", self.column_gap)?;
        non_negative("row_gap", self.row_gap)?;
        if let Some(row_height) = self.row_height {
            non_negative("row_height", row_height)?;
        }
        Ok(())
    }

    /// Width of one column for a container of the given width.
    pub fn column_width(&self, container_width: f32) -> f32 {
        let columns = self.columns as f32;
        (container_width - self.column_gap * (columns - 1.0)) / columns
    }

    /// Extent of `span` tracks of size `track`, including the gaps between them.
    fn spanned(track: f32, span: u32, gap: f32) -> f32 {
        track * span as f32 + gap * (span as f32 - 1.0)
    }
}

struct Cell {
    node: NodeId,
    placement: GridPlacement,
    height: f32,
}

/// Inferred row heights, stored as runs of rows that share one height.
///
/// Only rows where a child starts or ends begin a new run, so the cost
/// follows the number of children rather than the highest row index.
struct RowRuns {
    /// First row of each run, ascending, starting at 0.
    starts: Vec<u64>,
    /// Summed height of every row before the run.
    tops: Vec<f32>,
    /// Height of each row inside the run.
    heights: Vec<f32>,
}

impl RowRuns {
    fn measure(cells: &[Cell]) -> Self {
        let mut events = Vec::with_capacity(cells.len() * 2);
        for cell in cells {
            // Also maps -0.0 and NaN to 0.0, keeping the bit order below valid.
            let height = if cell.height > 0.0 { cell.height } else { 0.0 };
            events.push((cell.placement.first_row(), height, true));
            events.push((cell.placement.end_row(), height, false));
        }
        events.sort_by_key(|&(row, _, _)| row);

        let mut runs = Self {
            starts: vec![0],
            tops: vec![0.0],
            heights: vec![0.0],
        };
        // Heights of the children covering the current row, keyed by their
        // bits; non-negative floats order the same way as their bits.
        let mut covering: BTreeMap<u32, usize> = BTreeMap::new();
        let mut i = 0;
        while i < events.len() {
            let row = events[i].0;
            while let Some(&(at, height, opens)) = events.get(i) {
                if at != row {
                    break;
                }
                let key = height.to_bits();
                if opens {
                    *covering.entry(key).or_insert(0) += 1;
                } else if let Some(count) = covering.get_mut(&key) {
                    *count -= 1;
                    if *count == 0 {
                        covering.remove(&key);
                    }
                }
                i += 1;
            }

            let tallest = covering
                .last_key_value()
                .map_or(0.0, |(&bits, _)| f32::from_bits(bits));
            let top = runs.top(row);
            if runs.starts.last() == Some(&row) {
                if let Some(last) = runs.heights.last_mut() {
                    *last = tallest;
                }
            } else {
                runs.starts.push(row);
                runs.tops.push(top);
                runs.heights.push(tallest);
            }
        }
        runs
    }

    /// Summed height of every row before `row`, gaps excluded.
    fn top(&self, row: u64) -> f32 {
        let run = self.starts.partition_point(|&start| start <= row).saturating_sub(1);
        self.tops[run] + self.heights[run] * (row - self.starts[run]) as f32
    }
}

pub(crate) fn layout_grid(
    tree: &mut LayoutTree,
    container: NodeId,
    grid: &GridLayout,
) -> Result<(), LayoutError> {
    let children = tree.children(container)?.to_vec();
    if children.is_empty() {
        return Ok(());
    }

    let frame = tree.frame(container)?;
    let column_width = grid.column_width(frame.width);

    let mut cells = Vec::with_capacity(children.len());
    for &node in &children {
        let element = tree.element(node)?;
        let placement = element.grid_placement();
        if let Err(reason) = placement.validate() {
            return Err(LayoutError::InvalidPlacement {
                element: element.id().clone(),
                reason,
            });
        }
        if placement.end_column() > grid.columns as u64 {
            tracing::warn!(
                "grid child {} spills past column {} of {}",
                element.id(),
                grid.columns,
                tree.id_of(container)?
            );
        }
        let height = match grid.row_height {
            Some(row_height) => GridLayout::spanned(row_height, placement.row_span, grid.row_gap),
            None => element.frame().height,
        };
        cells.push(Cell {
            node,
            placement,
            height,
        });
    }

    // Inferred rows are measured before any child is placed so that children
    // sharing a row share its offset.
    let runs = match grid.row_height {
        Some(_) => None,
        None => Some(RowRuns::measure(&cells)),
    };
    let row_top = |row: u64| {
        let above = match &runs {
            Some(runs) => runs.top(row),
            None => row as f32 * grid.row_height.unwrap_or(0.0),
        };
        above + row as f32 * grid.row_gap
    };

    for cell in &cells {
        let p = cell.placement;
        let column = p.column as f32;
        let rect = Rect::new(
            column * column_width + column * grid.column_gap,
            row_top(p.first_row()),
            GridLayout::spanned(column_width, p.column_span, grid.column_gap),
            cell.height,
        );
        tree.set_frame(cell.node, rect)?;
    }

    if let Some(runs) = &runs {
        let max_row = cells
            .iter()
            .map(|c| c.placement.end_row())
            .max()
            .unwrap_or(0);
        let height = runs.top(max_row) + grid.row_gap * (max_row as f32 - 1.0);
        tree.set_size(container, frame.width, height)?;
    }
    Ok(())
}
