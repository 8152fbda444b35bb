//! The blueprint stamper.
//!
//! Stamping walks a slice stack in a fixed order (layer, then row, then
//! column), resolves every non-blank character through the legend, maps its
//! index through the orientation and hands the result to the host. All
//! resolution happens before the first host call, so a missing legend entry
//! places nothing. Positions are not checked for collisions; when two cells
//! land on the same position the later one in iteration order wins.

use log::debug;
use serde::Serialize;

use crate::cell::{BlockPos, CellDescriptor};
use crate::error::{BlueprintError, Result};
use crate::host::CellHost;
use crate::legend::Legend;
use crate::orient::Orientation;
use crate::slice::{SliceIndex, SliceStack};

/// One resolved cell, ready for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub index: SliceIndex,
    pub pos: BlockPos,
    pub cell: CellDescriptor,
}

/// Resolve a stack into its ordered placements without touching a host.
pub fn plan(
    legend: &Legend,
    stack: &SliceStack,
    origin: BlockPos,
    orientation: &Orientation,
) -> Result<Vec<Placement>> {
    orientation.check_stack(stack)?;

    let mut placements = Vec::new();
    for (index, ch) in stack.cells() {
        let cell = legend.resolve(ch).map_err(|err| match err {
            BlueprintError::UnmappedCharacter { ch, .. } => BlueprintError::UnmappedCharacter {
                ch,
                layer: index.layer,
                row: index.row,
                column: index.column,
            },
            other => other,
        })?;
        if let Some(cell) = cell {
            placements.push(Placement {
                index,
                pos: orientation.map(origin, index),
                cell: cell.clone(),
            });
        }
    }
    Ok(placements)
}

/// Stamp a stack into the host. Returns the number of cells handed over.
pub fn stamp<H: CellHost + ?Sized>(
    legend: &Legend,
    stack: &SliceStack,
    origin: BlockPos,
    orientation: &Orientation,
    host: &mut H,
) -> Result<usize> {
    let placements = plan(legend, stack, origin, orientation)?;
    debug!(
        "stamping {} cells at {origin} ({orientation})",
        placements.len()
    );
    for placement in &placements {
        host.place_cell(&placement.cell, placement.pos)?;
    }
    Ok(placements.len())
}

/// Everything one stamping call needs, bundled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub legend: Legend,
    pub stack: SliceStack,
    pub origin: BlockPos,
    pub orientation: Orientation,
}

impl Blueprint {
    pub fn plan(&self) -> Result<Vec<Placement>> {
        plan(&self.legend, &self.stack, self.origin, &self.orientation)
    }

    pub fn stamp<H: CellHost + ?Sized>(&self, host: &mut H) -> Result<usize> {
        stamp(&self.legend, &self.stack, self.origin, &self.orientation, host)
    }
}
