//! Orientation codes: mapping slice-local indices into host space.
//!
//! A code is two or three characters drawn from `xXyYzZ`. The letter picks
//! the absolute axis, the case picks the direction (uppercase: increasing
//! slice index moves toward +axis; lowercase: toward -axis) and the position
//! picks which slice axis is being mapped:
//!
//! | code length | char 1 | char 2 | char 3 |
//! |-------------|--------|--------|--------|
//! | 3           | layer  | row    | column |
//! | 2           | column | row    |   -    |
//!
//! Two-character codes have no layer axis and only accept single-layer
//! stacks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::BlockPos;
use crate::error::{BlueprintError, Result};
use crate::slice::{SliceIndex, SliceStack};

/// An absolute host axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn unit(self) -> BlockPos {
        match self {
            Axis::X => BlockPos::new(1, 0, 0),
            Axis::Y => BlockPos::new(0, 1, 0),
            Axis::Z => BlockPos::new(0, 0, 1),
        }
    }

    fn component(self, pos: BlockPos) -> i32 {
        match self {
            Axis::X => pos.x,
            Axis::Y => pos.y,
            Axis::Z => pos.z,
        }
    }
}

/// One slice axis projected onto a signed absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap {
    pub axis: Axis,
    /// `1` or `-1`.
    pub sign: i32,
}

impl AxisMap {
    fn parse(ch: char) -> Option<Self> {
        let axis = match ch.to_ascii_lowercase() {
            'x' => Axis::X,
            'y' => Axis::Y,
            'z' => Axis::Z,
            _ => return None,
        };
        let sign = if ch.is_ascii_uppercase() { 1 } else { -1 };
        Some(Self { axis, sign })
    }

    fn step(self, index: usize) -> BlockPos {
        let unit = self.axis.unit();
        let n = self.sign * index as i32;
        BlockPos::new(unit.x * n, unit.y * n, unit.z * n)
    }
}

/// A parsed, validated orientation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Orientation {
    code: String,
    layer: Option<AxisMap>,
    row: AxisMap,
    column: AxisMap,
}

impl Orientation {
    /// Parse and validate a code such as `"xZy"` or `"Zy"`.
    pub fn parse(code: &str) -> Result<Self> {
        let invalid = |detail: &str| BlueprintError::InvalidOrientation {
            code: code.to_string(),
            detail: detail.to_string(),
        };

        let maps = code
            .chars()
            .map(|ch| AxisMap::parse(ch).ok_or_else(|| invalid("letters must be x, y or z")))
            .collect::<Result<Vec<_>>>()?;

        let (layer, row, column) = match maps.as_slice() {
            [layer, row, column] => (Some(*layer), *row, *column),
            [column, row] => (None, *row, *column),
            _ => return Err(invalid("expected 2 or 3 characters")),
        };

        for (i, a) in maps.iter().enumerate() {
            if maps[i + 1..].iter().any(|b| b.axis == a.axis) {
                return Err(invalid("an absolute axis is used twice"));
            }
        }

        Ok(Self {
            code: code.to_string(),
            layer,
            row,
            column,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn layer(&self) -> Option<AxisMap> {
        self.layer
    }

    pub fn row(&self) -> AxisMap {
        self.row
    }

    pub fn column(&self) -> AxisMap {
        self.column
    }

    /// Reject stacks this code cannot place (multi-layer under a 2-char code).
    pub fn check_stack(&self, stack: &SliceStack) -> Result<()> {
        if self.layer.is_none() && !stack.is_flat() {
            return Err(BlueprintError::LayerAxisUnmapped {
                code: self.code.clone(),
                layers: stack.layer_count(),
            });
        }
        Ok(())
    }

    /// Origin-relative offset of a slice index.
    pub fn offset(&self, index: SliceIndex) -> BlockPos {
        let layer = self
            .layer
            .map(|m| m.step(index.layer))
            .unwrap_or(BlockPos::ORIGIN);
        layer + self.row.step(index.row) + self.column.step(index.column)
    }

    /// Absolute position of a slice index stamped at `origin`.
    pub fn map(&self, origin: BlockPos, index: SliceIndex) -> BlockPos {
        origin + self.offset(index)
    }

    /// Recover the slice index that maps to `pos`, if any.
    pub fn unmap(&self, origin: BlockPos, pos: BlockPos) -> Option<SliceIndex> {
        let delta = BlockPos::new(pos.x - origin.x, pos.y - origin.y, pos.z - origin.z);
        let along = |m: AxisMap| -> Option<usize> {
            usize::try_from(m.sign * m.axis.component(delta)).ok()
        };

        let row = along(self.row)?;
        let column = along(self.column)?;
        let layer = match self.layer {
            Some(m) => along(m)?,
            None => {
                let free = [Axis::X, Axis::Y, Axis::Z]
                    .into_iter()
                    .find(|a| *a != self.row.axis && *a != self.column.axis)?;
                if free.component(delta) != 0 {
                    return None;
                }
                0
            }
        };
        Some(SliceIndex::new(layer, row, column))
    }
}

impl FromStr for Orientation {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Orientation {
    type Error = BlueprintError;

    fn try_from(code: String) -> Result<Self> {
        Self::parse(&code)
    }
}

impl From<Orientation> for String {
    fn from(o: Orientation) -> String {
        o.code
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
