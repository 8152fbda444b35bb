//! Repeated bit units.
//!
//! Each unit covers a pair of bus bit lines and is built twice over: once as
//! the manual-input unit (levers, lamps, weight signs) and once as the
//! instruction-register unit (storage cells and control lines). Units are
//! identical apart from three position-dependent patches:
//!
//! - **edge cut** on the unit nearest the bus end (`tib == 0`): the signal
//!   lines stop at the module boundary instead of running past it;
//! - **booster** on every fourth bit (`bit > 0 && bit % 4 == 0`): a repeater
//!   on each signal line to refresh the signal over the distance;
//! - **first bit** (`bit == 0`): an extra vertical connector in the register.

use keystamp_blueprint::{Legend, Patch, SliceStack};
use serde::Serialize;

/// Manual-input unit: 8 layers of 6 rows.
const INPUT_TEMPLATE: [[&str; 6]; 8] = [
    ["      ", "      ", " / /  ", "      ", "      ", "      "],
    ["      ", "      ", " x x  ", " s S  ", " L L  ", "      "],
    ["~~~~~~", "  |   ", " |^|  ", " c~c  ", " x x  ", " | |  "],
    ["------", "  -   ", " ---  ", " x-x  ", " v v  ", " = =  "],
    ["      ", " | |  ", " | |  ", " | |  ", " = =  ", "      "],
    ["      ", " - -  ", " - -  ", " - -  ", "      ", "      "],
    ["      ", "      ", "      ", "      ", "      ", "      "],
    ["      ", "      ", "      ", "      ", "      ", "      "],
];

/// Instruction-register unit: 5 short layers above 4 long ones.
const REGISTER_UPPER: [[&str; 5]; 5] = [
    ["      ", "      ", " L L  ", "      ", "      "],
    ["      ", " | |  ", " x x  ", "      ", "      "],
    [" | |  ", " = =  ", "      ", "      ", "      "],
    ["~= =~ ", "x   x ", "v<~>v ", "|| || ", " c~c  "],
    ["=   = ", "|   | ", "--=-- ", "-- -- ", " -=-  "],
];

const REGISTER_LOWER: [[&str; 11]; 4] = [
    [
        "      ", "+   + ", "| i | ", "|   | ", "| i | ", "|   | ", "|| || ", "      ", "      ",
        "      ", "      ",
    ],
    [
        "      ", "  |   ", "_ = _ ", "_   _ ", "_ = _ ", "_ | _ ", "_+ +_ ", " | |  ", "      ",
        "      ", "      ",
    ],
    [
        "~~~~~~", "  =   ", "      ", "      ", "      ", "  =   ", "~~~~~~", " + +  ", " | |  ",
        " | |  ", " ^ ^  ",
    ],
    [
        "------", "      ", "      ", "      ", "      ", "      ", "------", "      ", " _ _  ",
        " _ _  ", " _ _  ",
    ],
];

/// Signal-line rows of the manual-input unit as (layer, row).
const INPUT_SIGNAL_ROWS: [(usize, usize); 2] = [(2, 0), (3, 0)];

/// Signal-line rows of the register unit as (layer, row): two control lines,
/// each a wire layer over a slab layer.
const REGISTER_SIGNAL_ROWS: [(usize, usize); 4] = [(7, 0), (8, 0), (7, 6), (8, 6)];

/// Column where boosters are inserted on a signal line.
const BOOSTER_COLUMN: usize = 5;

/// Horizontal pitch of one bit line in columns.
pub const BIT_PITCH: i32 = 3;

/// One pair of bus bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitUnit {
    bit: u32,
    bits: u32,
}

/// Every unit of a bus, lowest bit first (highest `tib` first).
pub fn units(bits: u32) -> impl Iterator<Item = BitUnit> {
    (0..bits)
        .step_by(2)
        .filter_map(move |bit| BitUnit::new(bit, bits))
}

impl BitUnit {
    /// Unit for the pair starting at `bit`. `None` unless `bit` is even and
    /// the whole pair fits in a `bits`-wide bus.
    pub fn new(bit: u32, bits: u32) -> Option<Self> {
        let fits = bit.checked_add(2).is_some_and(|end| end <= bits);
        (bit % 2 == 0 && fits).then_some(Self { bit, bits })
    }

    pub fn bit(&self) -> u32 {
        self.bit
    }

    /// Translated bit index: distance from the high end of the bus.
    pub fn tib(&self) -> u32 {
        self.bits - self.bit - 2
    }

    /// Column of the unit's first cell for a module starting at `module_x`.
    pub fn x_offset(&self, module_x: i32) -> i32 {
        module_x + self.tib() as i32 * BIT_PITCH + 1
    }

    pub fn is_edge(&self) -> bool {
        self.tib() == 0
    }

    pub fn has_booster(&self) -> bool {
        self.bit > 0 && self.bit % 4 == 0
    }

    pub fn is_first(&self) -> bool {
        self.bit == 0
    }

    /// Value of the lower line's bit (`2^bit`).
    pub fn low_weight(&self) -> u64 {
        1u64 << self.bit
    }

    /// Value of the upper line's bit (`2^(bit+1)`).
    pub fn high_weight(&self) -> u64 {
        1u64 << (self.bit + 1)
    }

    /// Sign text for the upper line, e.g. `["Bit 4", "[+8]"]` for bit 2.
    pub fn high_label(&self) -> [String; 2] {
        [
            format!("Bit {}", self.bit + 2),
            format!("[+{}]", self.high_weight()),
        ]
    }

    /// Sign text for the lower line, e.g. `["Bit 3", "[+4]"]` for bit 2.
    pub fn low_label(&self) -> [String; 2] {
        [
            format!("Bit {}", self.bit + 1),
            format!("[+{}]", self.low_weight()),
        ]
    }

    pub fn input_patches(&self) -> Vec<Patch> {
        let mut patches = Vec::new();
        if self.is_edge() {
            for (layer, row) in INPUT_SIGNAL_ROWS {
                patches.push(Patch::blank(layer, row, 0, 2));
            }
        }
        if self.has_booster() {
            let (layer, row) = INPUT_SIGNAL_ROWS[0];
            patches.push(Patch::new(layer, row, BOOSTER_COLUMN, "<"));
        }
        patches
    }

    pub fn register_patches(&self) -> Vec<Patch> {
        let mut patches = Vec::new();
        if self.is_first() {
            patches.push(Patch::new(7, 9, 3, "^"));
            patches.push(Patch::new(6, 10, 3, "|"));
            patches.push(Patch::new(7, 10, 3, "+"));
            patches.push(Patch::blank(8, 10, 3, 1));
        }
        if self.is_edge() {
            for (layer, row) in REGISTER_SIGNAL_ROWS {
                patches.push(Patch::blank(layer, row, 0, 2));
            }
        }
        if self.has_booster() {
            for (layer, row) in REGISTER_SIGNAL_ROWS.into_iter().filter(|(l, _)| *l == 7) {
                patches.push(Patch::new(layer, row, BOOSTER_COLUMN, "<"));
            }
        }
        patches
    }

    /// Patched manual-input stack for this unit.
    pub fn input_stack(&self) -> keystamp_blueprint::Result<SliceStack> {
        input_template().patched(&self.input_patches())
    }

    /// Patched instruction-register stack for this unit.
    pub fn register_stack(&self) -> keystamp_blueprint::Result<SliceStack> {
        register_template().patched(&self.register_patches())
    }

    pub fn input_legend(&self) -> keystamp_blueprint::Result<Legend> {
        let [high_bit, high_value] = self.high_label();
        let [low_bit, low_value] = self.low_label();
        Legend::from_pairs([
            ('|', "wire ns".to_string()),
            ('~', "wire ew".to_string()),
            ('v', "repeat n".to_string()),
            ('^', "repeat s".to_string()),
            ('<', "repeat e".to_string()),
            ('c', "compars s".to_string()),
            ('/', "lever[face=floor,facing=north]".to_string()),
            ('L', "lamp".to_string()),
            ('=', "data block".to_string()),
            ('-', "data slab".to_string()),
            ('x', "cell block".to_string()),
            (
                's',
                format!("birch_wall_sign[facing=south]|{high_bit}|{high_value}"),
            ),
            (
                'S',
                format!("birch_wall_sign[facing=south]|{low_bit}|{low_value}"),
            ),
        ])
    }

    pub fn register_legend(&self) -> keystamp_blueprint::Result<Legend> {
        register_legend()
    }
}

/// Unpatched manual-input template.
pub fn input_template() -> SliceStack {
    SliceStack::from_layers(INPUT_TEMPLATE)
}

/// Unpatched instruction-register template.
pub fn register_template() -> SliceStack {
    let upper = REGISTER_UPPER.iter().map(|l| l.to_vec());
    let lower = REGISTER_LOWER.iter().map(|l| l.to_vec());
    SliceStack::from_layers(upper.chain(lower))
}

/// Register legend; labels do not depend on the bit.
pub fn register_legend() -> keystamp_blueprint::Result<Legend> {
    Legend::from_pairs([
        ('|', "wire ns"),
        ('~', "wire ew"),
        ('i', "torch"),
        ('/', "torch n"),
        ('v', "repeat n"),
        ('^', "repeat s"),
        ('<', "repeat e"),
        ('>', "repeat w"),
        ('c', "compars n"),
        ('L', "lamp"),
        ('=', "data block"),
        ('-', "data slab"),
        ('x', "cell block"),
        ('+', "inst block"),
        ('_', "inst slab"),
    ])
}
