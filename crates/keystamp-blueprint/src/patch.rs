//! Positional template patches.
//!
//! A patch overwrites characters in one row of a slice stack starting at a
//! column. Patches are applied to a fresh copy of a template; the base stack
//! is never touched, so a patch never observes another unit's edits.

use serde::{Deserialize, Serialize};

use crate::error::{BlueprintError, Result};
use crate::legend::BLANK;
use crate::slice::SliceStack;

/// A single substring replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
    pub text: String,
}

impl Patch {
    pub fn new(layer: usize, row: usize, column: usize, text: impl Into<String>) -> Self {
        Self {
            layer,
            row,
            column,
            text: text.into(),
        }
    }

    /// Blank `width` cells starting at `column`.
    pub fn blank(layer: usize, row: usize, column: usize, width: usize) -> Self {
        Self::new(layer, row, column, BLANK.to_string().repeat(width))
    }
}

/// Return `row` with `text` written over it starting at `column`.
///
/// Short rows are padded with blanks up to the write position.
pub fn replace_at(row: &str, column: usize, text: &str) -> String {
    let mut cells: Vec<char> = row.chars().collect();
    let replacement: Vec<char> = text.chars().collect();
    let end = column + replacement.len();
    if cells.len() < end {
        cells.resize(end, BLANK);
    }
    cells[column..end].copy_from_slice(&replacement);
    cells.into_iter().collect()
}

impl SliceStack {
    /// Copy this stack and apply `patches` to the copy, in order.
    pub fn patched(&self, patches: &[Patch]) -> Result<SliceStack> {
        let mut copy = self.clone();
        for patch in patches {
            let row = copy
                .row_mut(patch.layer, patch.row)
                .ok_or(BlueprintError::PatchOutOfRange {
                    layer: patch.layer,
                    row: patch.row,
                })?;
            *row = replace_at(row, patch.column, &patch.text);
        }
        Ok(copy)
    }
}
