//! Host placement primitives and an in-memory recording host.
//!
//! The engine never owns a world. It drives a [`CellHost`], which places
//! single cells, fills boxes and draws frames. [`PlacementLog`] is the
//! reference host: it records every call in order and keeps a last-write-wins
//! view of the resulting cells.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::{BlockPos, CellDescriptor, Extent};
use crate::digest::{plan_digest, PlanDigest};

/// A host primitive failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("host {operation} failed: {message}")]
pub struct HostError {
    /// Primitive name (`place`, `fill`, `frame`, `material`, `bus`).
    pub operation: String,
    pub message: String,
}

impl HostError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Side-effecting primitives supplied by the host environment.
pub trait CellHost {
    /// Place one cell. Placing the same cell at the same position again must
    /// be a no-op, not an error.
    fn place_cell(&mut self, cell: &CellDescriptor, pos: BlockPos) -> Result<(), HostError>;

    /// Fill an axis-aligned box.
    fn fill_volume(
        &mut self,
        cell: &CellDescriptor,
        origin: BlockPos,
        size: Extent,
    ) -> Result<(), HostError>;

    /// Draw the twelve edges of an axis-aligned box.
    fn draw_frame(
        &mut self,
        cell: &CellDescriptor,
        origin: BlockPos,
        size: Extent,
    ) -> Result<(), HostError>;

    /// Resolve a named material (e.g. `"frame"`) into a placeable cell.
    fn material(&self, name: &str) -> Result<CellDescriptor, HostError>;
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum HostOp {
    Place {
        pos: BlockPos,
        cell: CellDescriptor,
    },
    Fill {
        origin: BlockPos,
        size: Extent,
        cell: CellDescriptor,
    },
    Frame {
        origin: BlockPos,
        size: Extent,
        cell: CellDescriptor,
    },
}

impl HostOp {
    /// One-line command rendering, e.g. `place 3 15 6 wire ns`.
    pub fn to_command(&self) -> String {
        match self {
            HostOp::Place { pos, cell } => format!("place {pos} {cell}"),
            HostOp::Fill { origin, size, cell } => format!(
                "fill {origin} {} {} {} {cell}",
                size.width, size.height, size.depth
            ),
            HostOp::Frame { origin, size, cell } => format!(
                "frame {origin} {} {} {} {cell}",
                size.width, size.height, size.depth
            ),
        }
    }
}

/// Recording host. Keeps the call sequence and the resulting cell map.
#[derive(Debug, Clone, Default)]
pub struct PlacementLog {
    ops: Vec<HostOp>,
    world: BTreeMap<BlockPos, CellDescriptor>,
    materials: BTreeMap<String, CellDescriptor>,
    fail_after: Option<usize>,
}

impl PlacementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a material name to a specific descriptor. Unmapped names resolve
    /// to a descriptor with the same text.
    pub fn with_material(mut self, name: &str, cell: impl Into<CellDescriptor>) -> Self {
        self.materials.insert(name.to_string(), cell.into());
        self
    }

    /// Make every host call after the first `calls` recorded ones fail.
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<HostOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Single-cell placements in call order.
    pub fn placements(&self) -> impl Iterator<Item = (BlockPos, &CellDescriptor)> {
        self.ops.iter().filter_map(|op| match op {
            HostOp::Place { pos, cell } => Some((*pos, cell)),
            _ => None,
        })
    }

    /// The cell currently at `pos`, after last-write-wins resolution.
    pub fn cell_at(&self, pos: BlockPos) -> Option<&CellDescriptor> {
        self.world.get(&pos)
    }

    /// Number of distinct occupied positions.
    pub fn occupied(&self) -> usize {
        self.world.len()
    }

    /// SHA-256 over the recorded call sequence.
    pub fn digest(&self) -> crate::error::Result<PlanDigest> {
        plan_digest(&self.ops)
    }

    fn admit(&self, operation: &str) -> Result<(), HostError> {
        match self.fail_after {
            Some(limit) if self.ops.len() >= limit => Err(HostError::new(
                operation,
                format!("host refused call {} (limit {limit})", self.ops.len() + 1),
            )),
            _ => Ok(()),
        }
    }

    fn write_box(&mut self, cell: &CellDescriptor, origin: BlockPos, size: Extent, hollow: bool) {
        let (w, h, d) = (size.width as i32, size.height as i32, size.depth as i32);
        for ix in 0..w {
            for iy in 0..h {
                for iz in 0..d {
                    let edges = [(ix, w), (iy, h), (iz, d)]
                        .into_iter()
                        .filter(|&(i, n)| i == 0 || i == n - 1)
                        .count();
                    if hollow && edges < 2 {
                        continue;
                    }
                    self.world.insert(origin.offset(ix, iy, iz), cell.clone());
                }
            }
        }
    }
}

impl CellHost for PlacementLog {
    fn place_cell(&mut self, cell: &CellDescriptor, pos: BlockPos) -> Result<(), HostError> {
        if self.world.get(&pos) == Some(cell) {
            return Ok(());
        }
        self.admit("place")?;
        self.world.insert(pos, cell.clone());
        self.ops.push(HostOp::Place {
            pos,
            cell: cell.clone(),
        });
        Ok(())
    }

    fn fill_volume(
        &mut self,
        cell: &CellDescriptor,
        origin: BlockPos,
        size: Extent,
    ) -> Result<(), HostError> {
        self.admit("fill")?;
        self.write_box(cell, origin, size, false);
        self.ops.push(HostOp::Fill {
            origin,
            size,
            cell: cell.clone(),
        });
        Ok(())
    }

    fn draw_frame(
        &mut self,
        cell: &CellDescriptor,
        origin: BlockPos,
        size: Extent,
    ) -> Result<(), HostError> {
        self.admit("frame")?;
        self.write_box(cell, origin, size, true);
        self.ops.push(HostOp::Frame {
            origin,
            size,
            cell: cell.clone(),
        });
        Ok(())
    }

    fn material(&self, name: &str) -> Result<CellDescriptor, HostError> {
        Ok(self
            .materials
            .get(name)
            .cloned()
            .unwrap_or_else(|| CellDescriptor::new(name)))
    }
}
