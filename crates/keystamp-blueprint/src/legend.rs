//! Character legends: the per-call mapping from slice characters to cells.

use std::collections::BTreeMap;

use crate::cell::CellDescriptor;
use crate::error::{BlueprintError, Result};

/// The character that always means "no cell".
pub const BLANK: char = ' ';

/// Maps single characters to cell descriptors for one stamping call.
///
/// Legends are cheap and meant to be rebuilt per call whenever labels depend
/// on call parameters (bit numbers, weights).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    cells: BTreeMap<char, CellDescriptor>,
}

impl Legend {
    /// Create an empty legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a legend from `(char, descriptor)` pairs.
    pub fn from_pairs<I, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, C)>,
        C: Into<CellDescriptor>,
    {
        let mut legend = Self::new();
        for (ch, cell) in pairs {
            legend.insert(ch, cell)?;
        }
        Ok(legend)
    }

    /// Add or replace an entry. The blank character is rejected.
    pub fn insert(&mut self, ch: char, cell: impl Into<CellDescriptor>) -> Result<()> {
        if ch == BLANK {
            return Err(BlueprintError::ReservedCharacter);
        }
        self.cells.insert(ch, cell.into());
        Ok(())
    }

    /// Look up a character.
    ///
    /// Returns `Ok(None)` for the blank character and
    /// [`BlueprintError::UnmappedCharacter`] (with zeroed coordinates) for
    /// anything else that is missing; the stamper fills in the real position.
    pub fn resolve(&self, ch: char) -> Result<Option<&CellDescriptor>> {
        if ch == BLANK {
            return Ok(None);
        }
        self.cells
            .get(&ch)
            .map(Some)
            .ok_or(BlueprintError::UnmappedCharacter {
                ch,
                layer: 0,
                row: 0,
                column: 0,
            })
    }

    pub fn get(&self, ch: char) -> Option<&CellDescriptor> {
        self.cells.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        ch == BLANK || self.cells.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &CellDescriptor)> {
        self.cells.iter().map(|(ch, cell)| (*ch, cell))
    }
}
