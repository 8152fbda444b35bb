//! Parametric keypad module generator.
//!
//! Builds the keypad section of a bus-based computer from fixed ASCII-art
//! templates, stamped through the blueprint engine:
//!
//! 1. **Layout:** validate the [`KeypadConfig`] and claim a bus slot
//! 2. **Clear / frame:** optional fill of the module volume, hollow frame
//! 3. **Panel:** floor over the module with openings for lamps and levers
//! 4. **Bit units:** one input unit and one register unit per pair of bits
//! 5. **Bus:** side signs and the data/instruction branches
//!
//! The cycle counter template ships with the crate but is only stamped on
//! request ([`build_cycle_counter`]).

pub mod bus;
pub mod config;
pub mod counter;
pub mod error;
pub mod keypad;
pub mod panel;
pub mod report;
pub mod unit;

pub use bus::{keypad_branch_offset, Allocation, BranchSpec, BusRouter, SequentialRouter, WiredBranch};
pub use config::{KeypadConfig, KeypadLayout, KEYPAD_DEPTH, MAX_BITS, MAX_BUS_HEIGHT};
pub use counter::{counter_legend, counter_template, COUNTER_ORIENTATION};
pub use error::{KeypadError, Result};
pub use keypad::{build_cycle_counter, min_bus_height, Keypad, UNIT_ORIENTATION};
pub use panel::{lever_legend, lever_template, panel_cell, PanelCell};
pub use report::{KeypadReport, UnitReport};
pub use unit::{units, BitUnit};
