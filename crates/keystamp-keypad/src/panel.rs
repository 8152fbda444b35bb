//! Panel floor and the manual-input lever.
//!
//! The panel covers the whole module footprint on the top bus row. Openings
//! are left over each bit line's lamp, sign and lever (rows 2..=4 of the unit
//! span) and one cell is given over to the manual-input lever unit.

use keystamp_blueprint::{CellDescriptor, Legend, SliceStack};

use crate::config::KeypadLayout;

/// Panel rows (z) that stay open over the bit lines.
const OPENING_ROWS: [u32; 3] = [2, 3, 4];

/// Panel rows carrying accent lines in the decorated floor.
const ACCENT_ROWS: [u32; 3] = [2, 4, 8];

/// Panel row holding the manual-input lever.
pub const LEVER_ROW: u32 = 3;

/// Orientation of the lever unit: columns along +z, rows down.
pub const LEVER_ORIENTATION: &str = "Zy";

/// What the panel holds at one (ix, iz) position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCell {
    /// Left open over a lamp/lever column.
    Opening,
    /// Anchor of the manual-input lever unit.
    Lever,
    /// A floor cell.
    Floor(CellDescriptor),
    /// Nothing at all (no decoration, no frame).
    Bare,
}

/// Decide the panel content at module-relative column `ix`, row `iz`.
pub fn panel_cell(layout: &KeypadLayout, ix: u32, iz: u32) -> PanelCell {
    if ix < layout.unit_span() {
        if OPENING_ROWS.contains(&iz) && matches!(ix % 6, 2 | 4) {
            return PanelCell::Opening;
        }
    } else if iz == LEVER_ROW && ix == layout.width - 3 {
        return PanelCell::Lever;
    }

    if layout.decor {
        let border = ix == 0 || ix == layout.width - 1 || iz == 0 || iz == layout.depth - 1;
        let line = ACCENT_ROWS.contains(&iz)
            && ix > 2
            && ix < layout.width - 1
            && (ix / 3) % 4 != 0
            && ix % 12 != 11;
        PanelCell::Floor(CellDescriptor::new(format!(
            "wood {} {}",
            if border { "block" } else { "slab" },
            if line || border { "b" } else { "a" }
        )))
    } else if layout.frame {
        PanelCell::Floor(CellDescriptor::new("frame"))
    } else {
        PanelCell::Bare
    }
}

/// Manual-input lever unit: lever over lamp over torch and wiring.
pub fn lever_template() -> SliceStack {
    SliceStack::flat(["   /", "   L", "ix||", "----"])
}

pub fn lever_legend() -> keystamp_blueprint::Result<Legend> {
    Legend::from_pairs([
        ('|', "wire ns"),
        ('~', "wire ew"),
        ('i', "torch s"),
        ('/', "lever[face=floor,facing=north]"),
        ('L', "lamp"),
        ('=', "data block"),
        ('-', "data slab"),
        ('x', "cell block"),
    ])
}
