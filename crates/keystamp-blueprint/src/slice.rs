//! Slice stacks: layered ASCII-art templates.
//!
//! A stack is an ordered list of layers, each an ordered list of rows, each
//! row a string with one character per cell. Rows may differ in length; any
//! column past the end of a row reads as blank.

use serde::{Deserialize, Serialize};

use crate::legend::BLANK;

/// Index of one cell in slice-local space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SliceIndex {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
}

impl SliceIndex {
    pub const fn new(layer: usize, row: usize, column: usize) -> Self {
        Self { layer, row, column }
    }
}

/// An owned, layered template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceStack {
    layers: Vec<Vec<String>>,
}

impl SliceStack {
    pub fn new(layers: Vec<Vec<String>>) -> Self {
        Self { layers }
    }

    /// Build a stack from borrowed layer literals.
    pub fn from_layers<L, R>(layers: L) -> Self
    where
        L: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            layers: layers
                .into_iter()
                .map(|rows| rows.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Build a single-layer stack.
    pub fn flat<R>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            layers: vec![rows.into_iter().map(Into::into).collect()],
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_flat(&self) -> bool {
        self.layers.len() <= 1
    }

    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    pub fn row(&self, layer: usize, row: usize) -> Option<&str> {
        self.layers.get(layer)?.get(row).map(String::as_str)
    }

    pub(crate) fn row_mut(&mut self, layer: usize, row: usize) -> Option<&mut String> {
        self.layers.get_mut(layer)?.get_mut(row)
    }

    /// Character at an index; blank when the index is past any bound.
    pub fn cell(&self, index: SliceIndex) -> char {
        self.row(index.layer, index.row)
            .and_then(|r| r.chars().nth(index.column))
            .unwrap_or(BLANK)
    }

    /// Every authored cell, blanks included, in stamping order:
    /// layer outermost, then row, then column.
    pub fn cells(&self) -> impl Iterator<Item = (SliceIndex, char)> + '_ {
        self.layers.iter().enumerate().flat_map(|(layer, rows)| {
            rows.iter().enumerate().flat_map(move |(row, text)| {
                text.chars()
                    .enumerate()
                    .map(move |(column, ch)| (SliceIndex::new(layer, row, column), ch))
            })
        })
    }

    /// Number of non-blank cells.
    pub fn filled_count(&self) -> usize {
        self.cells().filter(|(_, ch)| *ch != BLANK).count()
    }
}
