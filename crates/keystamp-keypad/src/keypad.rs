//! Keypad module builder.
//!
//! Drives the blueprint stamper over the panel, the repeated bit units and
//! the side signs, then asks the bus router for the two bus branches.

use log::{debug, info};

use keystamp_blueprint::{
    stamp, BlockPos, CellDescriptor, CellHost, Extent, Legend, Orientation, SliceStack,
};

use crate::bus::{keypad_branch_offset, BranchSpec, BusRouter};
use crate::config::{KeypadConfig, KeypadLayout};
use crate::counter::{counter_legend, counter_template, COUNTER_ORIENTATION};
use crate::error::{KeypadError, Result};
use crate::panel::{lever_legend, lever_template, panel_cell, PanelCell, LEVER_ORIENTATION};
use crate::report::{KeypadReport, UnitReport};
use crate::unit::{input_template, register_template, units, BitUnit};

/// Orientation of both bit units: layers toward -x, rows along +z, columns down.
pub const UNIT_ORIENTATION: &str = "xZy";

// Vertical drop below the panel row and z-offset of each stamped part.
const INPUT_DROP: i32 = 6;
const INPUT_Z: i32 = 6;
const REGISTER_DROP: i32 = 8;
const REGISTER_Z: i32 = 10;
const LEVER_DROP: i32 = 2;
const LEVER_Z_SHIFT: i32 = 3;
const SIGN_DROP: i32 = 3;
const SIGN_Z: i32 = 9;

/// Bus branches start this many columns in from the module's right edge.
const BRANCH_INSET: i32 = 6;

const SIGN_TEXT: &str = "||Instruction|Register";

fn orientation(code: &str) -> Result<Orientation> {
    Orientation::parse(code).map_err(KeypadError::blueprint("orientation"))
}

/// Lowest cell a part reaches below the panel row, counted in cells.
fn reach(stack: &SliceStack, code: &str, drop: i32) -> Result<i32> {
    let o = orientation(code)?;
    let lowest = stack
        .cells()
        .map(|(index, _)| o.offset(index).y)
        .min()
        .unwrap_or(0);
    Ok(drop - lowest)
}

/// Smallest bus height that keeps every stamped part at or above y = 0.
pub fn min_bus_height() -> Result<u32> {
    let deepest = [
        reach(&input_template(), UNIT_ORIENTATION, INPUT_DROP)?,
        reach(&register_template(), UNIT_ORIENTATION, REGISTER_DROP)?,
        reach(&lever_template(), LEVER_ORIENTATION, LEVER_DROP)?,
        SIGN_DROP,
    ]
    .into_iter()
    .max()
    .unwrap_or(0);
    Ok(deepest as u32 + 1)
}

/// A keypad module placed on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    layout: KeypadLayout,
}

impl Keypad {
    pub fn new(layout: KeypadLayout) -> Self {
        Self { layout }
    }

    /// Validate `config` and claim the module's bus slot.
    pub fn allocate<R: BusRouter + ?Sized>(config: &KeypadConfig, router: &mut R) -> Result<Self> {
        Ok(Self::new(KeypadLayout::allocate(config, router)?))
    }

    pub fn layout(&self) -> &KeypadLayout {
        &self.layout
    }

    fn volume(&self) -> (BlockPos, Extent) {
        let l = &self.layout;
        (
            BlockPos::new(l.x, 0, 0),
            Extent::new(l.width, l.bus_height, l.depth),
        )
    }

    /// Fill the module volume with air.
    pub fn clear<H: CellHost + ?Sized>(&self, host: &mut H) -> Result<()> {
        let (origin, size) = self.volume();
        debug!("clearing keypad volume at {origin}");
        host.fill_volume(&CellDescriptor::new("air"), origin, size)?;
        Ok(())
    }

    /// Draw the hollow module frame. Does nothing when the frame is disabled.
    pub fn frame<H: CellHost + ?Sized>(&self, host: &mut H) -> Result<()> {
        if !self.layout.frame {
            return Ok(());
        }
        let (origin, size) = self.volume();
        let material = host.material("frame")?;
        host.draw_frame(&material, origin, size)?;
        Ok(())
    }

    /// Build the panel, bit units, signs and bus branches.
    pub fn build<H, R>(&self, host: &mut H, router: &mut R) -> Result<KeypadReport>
    where
        H: CellHost + ?Sized,
        R: BusRouter + ?Sized,
    {
        info!("Building the keypad");
        let mut report = KeypadReport::new(&self.layout);

        self.build_panel(host, &mut report)?;

        for unit in units(self.layout.bits) {
            report.units.push(self.build_unit(host, unit)?);
        }

        self.build_signs(host, &mut report)?;
        self.build_branches(router, &mut report)?;

        info!(
            "keypad built: {} units, {} cells",
            report.units.len(),
            report.total_cells()
        );
        Ok(report)
    }

    fn build_panel<H: CellHost + ?Sized>(&self, host: &mut H, report: &mut KeypadReport) -> Result<()> {
        let l = &self.layout;
        let y = l.top();
        for iz in 0..l.depth {
            for ix in 0..l.width {
                let xx = l.x + ix as i32;
                let zz = iz as i32;
                match panel_cell(l, ix, iz) {
                    PanelCell::Opening => report.openings += 1,
                    PanelCell::Lever => {
                        let origin = BlockPos::new(xx, y - LEVER_DROP, zz + LEVER_Z_SHIFT);
                        let legend = lever_legend().map_err(KeypadError::blueprint("lever"))?;
                        report.lever_cells += stamp(
                            &legend,
                            &lever_template(),
                            origin,
                            &orientation(LEVER_ORIENTATION)?,
                            host,
                        )
                        .map_err(KeypadError::blueprint("lever"))?;
                    }
                    PanelCell::Floor(cell) => {
                        host.place_cell(&cell, BlockPos::new(xx, y, zz))?;
                        report.panel_cells += 1;
                    }
                    PanelCell::Bare => {}
                }
            }
        }
        Ok(())
    }

    fn build_unit<H: CellHost + ?Sized>(&self, host: &mut H, unit: BitUnit) -> Result<UnitReport> {
        let l = &self.layout;
        let y = l.top();
        let xx = unit.x_offset(l.x);
        let o = orientation(UNIT_ORIENTATION)?;
        debug!(
            "bit unit {}: tib={} x={} booster={} edge={} first={}",
            unit.bit(),
            unit.tib(),
            xx,
            unit.has_booster(),
            unit.is_edge(),
            unit.is_first()
        );

        let part = format!("input unit for bit {}", unit.bit());
        let input_cells = stamp(
            &unit.input_legend().map_err(KeypadError::blueprint(part.clone()))?,
            &unit.input_stack().map_err(KeypadError::blueprint(part.clone()))?,
            BlockPos::new(xx, y - INPUT_DROP, INPUT_Z),
            &o,
            host,
        )
        .map_err(KeypadError::blueprint(part))?;

        let part = format!("register unit for bit {}", unit.bit());
        let register_cells = stamp(
            &unit.register_legend().map_err(KeypadError::blueprint(part.clone()))?,
            &unit.register_stack().map_err(KeypadError::blueprint(part.clone()))?,
            BlockPos::new(xx, y - REGISTER_DROP, REGISTER_Z),
            &o,
            host,
        )
        .map_err(KeypadError::blueprint(part))?;

        Ok(UnitReport::new(unit, xx, input_cells, register_cells))
    }

    fn build_signs<H: CellHost + ?Sized>(&self, host: &mut H, report: &mut KeypadReport) -> Result<()> {
        let l = &self.layout;
        let y = l.top() - SIGN_DROP;
        let signs = [
            ("west", l.x),
            ("east", l.x + l.unit_span() as i32),
        ];
        for (facing, x) in signs {
            let cell = CellDescriptor::new(format!("birch_wall_sign[facing={facing}]{SIGN_TEXT}"));
            host.place_cell(&cell, BlockPos::new(x, y, SIGN_Z))?;
            report.signs += 1;
        }
        Ok(())
    }

    fn build_branches<R: BusRouter + ?Sized>(&self, router: &mut R, report: &mut KeypadReport) -> Result<()> {
        let l = &self.layout;
        let x = l.x + l.width as i32 - BRANCH_INSET;
        let data = BranchSpec {
            x,
            vertical: false,
            dual_direction: true,
            glyphs: "><".into(),
            bits: l.bits,
        };
        let instruction = BranchSpec {
            dual_direction: false,
            glyphs: "<".into(),
            ..data.clone()
        };
        for spec in [data, instruction] {
            debug!("bus branch at x={} glyphs={:?}", spec.x, spec.glyphs);
            router.build_branch(&spec, &keypad_branch_offset)?;
            report.branches += 1;
        }
        Ok(())
    }
}

/// Stamp the cycle counter at `origin`.
pub fn build_cycle_counter<H: CellHost + ?Sized>(host: &mut H, origin: BlockPos) -> Result<usize> {
    info!("Building the cycle counter at {origin}");
    let legend: Legend = counter_legend().map_err(KeypadError::blueprint("cycle counter"))?;
    let placed = stamp(
        &legend,
        &counter_template(),
        origin,
        &orientation(COUNTER_ORIENTATION)?,
        host,
    )
    .map_err(KeypadError::blueprint("cycle counter"))?;
    Ok(placed)
}
