//! Keypad build report.

use std::fmt;

use serde::Serialize;

use crate::config::KeypadLayout;
use crate::unit::BitUnit;

/// What one bit unit stamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    pub bit: u32,
    pub tib: u32,
    /// Column of the unit's first layer.
    pub x: i32,
    pub booster: bool,
    pub edge_cut: bool,
    pub first_bit: bool,
    pub input_cells: usize,
    pub register_cells: usize,
}

impl UnitReport {
    pub fn new(unit: BitUnit, x: i32, input_cells: usize, register_cells: usize) -> Self {
        Self {
            bit: unit.bit(),
            tib: unit.tib(),
            x,
            booster: unit.has_booster(),
            edge_cut: unit.is_edge(),
            first_bit: unit.is_first(),
            input_cells,
            register_cells,
        }
    }
}

/// Summary of a keypad build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypadReport {
    pub layout: KeypadLayout,
    /// Per-unit results, in build order (highest `tib` first).
    pub units: Vec<UnitReport>,
    pub panel_cells: usize,
    /// Panel positions left open over the bit lines.
    pub openings: usize,
    pub lever_cells: usize,
    pub signs: usize,
    pub branches: usize,
}

impl KeypadReport {
    pub fn new(layout: &KeypadLayout) -> Self {
        Self {
            layout: *layout,
            units: Vec::new(),
            panel_cells: 0,
            openings: 0,
            lever_cells: 0,
            signs: 0,
            branches: 0,
        }
    }

    /// Every cell placement requested during the build.
    pub fn total_cells(&self) -> usize {
        self.panel_cells
            + self.lever_cells
            + self.signs
            + self
                .units
                .iter()
                .map(|u| u.input_cells + u.register_cells)
                .sum::<usize>()
    }

    pub fn boosted_bits(&self) -> Vec<u32> {
        self.units.iter().filter(|u| u.booster).map(|u| u.bit).collect()
    }
}

impl fmt::Display for KeypadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = &self.layout;
        writeln!(f, "=== Keypad Report ===")?;
        writeln!(f, "Bus: {} bits, height {}", l.bits, l.bus_height)?;
        writeln!(
            f,
            "Module: x={} width={} depth={}",
            l.x, l.width, l.depth
        )?;
        writeln!(f)?;

        writeln!(f, "--- Panel ---")?;
        writeln!(
            f,
            "  Floor: {} cells ({})",
            self.panel_cells,
            if l.decor {
                "decorated"
            } else if l.frame {
                "plain"
            } else {
                "none"
            }
        )?;
        writeln!(f, "  Openings: {}", self.openings)?;
        writeln!(f, "  Lever unit: {} cells", self.lever_cells)?;

        writeln!(f)?;
        writeln!(f, "--- Bit Units ({}) ---", self.units.len())?;
        for u in &self.units {
            let mut flags = Vec::new();
            if u.booster {
                flags.push("booster");
            }
            if u.edge_cut {
                flags.push("edge cut");
            }
            if u.first_bit {
                flags.push("first bit");
            }
            writeln!(
                f,
                "  Bit {:>2} (tib {:>2}) x={}: input {}, register {}{}",
                u.bit,
                u.tib,
                u.x,
                u.input_cells,
                u.register_cells,
                if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                }
            )?;
        }

        writeln!(f)?;
        writeln!(f, "--- Bus ---")?;
        writeln!(f, "  Signs: {}", self.signs)?;
        writeln!(f, "  Branches: {}", self.branches)?;

        writeln!(f)?;
        writeln!(f, "Total cells: {}", self.total_cells())?;
        Ok(())
    }
}
