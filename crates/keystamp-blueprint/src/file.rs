//! Blueprint files (`.blueprint.toml`).
//!
//! A blueprint file describes one stamping call:
//!
//! ```toml
//! orientation = "Zy"
//! origin = [10, 13, 3]
//! rows = ["   /", "   L", "ix||", "----"]
//!
//! [legend]
//! "/" = "lever[face=floor,facing=north]"
//! "L" = "lamp"
//! "i" = "torch s"
//! "x" = "cell block"
//! "|" = "wire ns"
//! "-" = "data slab"
//! ```
//!
//! Multi-layer stacks use `layers = [[...], [...]]` instead of `rows`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cell::BlockPos;
use crate::error::{BlueprintError, Result};
use crate::legend::Legend;
use crate::orient::Orientation;
use crate::slice::SliceStack;
use crate::stamp::Blueprint;

/// Raw, deserialized form of a blueprint file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintFile {
    /// Orientation code.
    pub orientation: Orientation,
    /// Anchor position `[x, y, z]`.
    #[serde(default)]
    pub origin: [i32; 3],
    /// Layered slices.
    #[serde(default)]
    pub layers: Option<Vec<Vec<String>>>,
    /// Shorthand for a single layer.
    #[serde(default)]
    pub rows: Option<Vec<String>>,
    /// Single-character keys to cell descriptors.
    #[serde(default)]
    pub legend: BTreeMap<String, String>,
}

impl BlueprintFile {
    /// Parse a blueprint file from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parse a blueprint file from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Validate and convert into a stampable [`Blueprint`].
    pub fn into_blueprint(self) -> Result<Blueprint> {
        let stack = match (self.layers, self.rows) {
            (Some(layers), None) => SliceStack::new(layers),
            (None, Some(rows)) => SliceStack::flat(rows),
            _ => return Err(BlueprintError::MissingSlices),
        };

        let mut legend = Legend::new();
        for (key, cell) in self.legend {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => legend.insert(ch, cell)?,
                _ => return Err(BlueprintError::InvalidLegendKey { key }),
            }
        }

        let [x, y, z] = self.origin;
        Ok(Blueprint {
            legend,
            stack,
            origin: BlockPos::new(x, y, z),
            orientation: self.orientation,
        })
    }
}

/// Load a blueprint file and convert it in one step.
pub fn load_blueprint(path: &Path) -> Result<Blueprint> {
    BlueprintFile::load(path)?.into_blueprint()
}
