//! Cell descriptors and absolute block positions.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// An absolute position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Shift this position by the given deltas.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl Add for BlockPos {
    type Output = BlockPos;

    fn add(self, rhs: BlockPos) -> BlockPos {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Size of an axis-aligned box in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// An opaque cell descriptor understood by the host placement primitive.
///
/// The text before the first `|` names the material (with any block state in
/// brackets); the `|`-separated remainder is label payload, e.g. sign lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellDescriptor(String);

impl CellDescriptor {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The full descriptor text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Material part, without label payload.
    pub fn material(&self) -> &str {
        match self.0.split_once('|') {
            Some((material, _)) => material,
            None => &self.0,
        }
    }

    /// Label lines. Empty lines are kept so positional sign text survives.
    pub fn labels(&self) -> Vec<&str> {
        match self.0.split_once('|') {
            Some((_, rest)) => rest.split('|').collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for CellDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellDescriptor {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CellDescriptor {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
