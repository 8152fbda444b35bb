//! Keypad configuration and derived layout.
//!
//! [`KeypadConfig`] is what a user sets; [`KeypadLayout`] is computed from it
//! once (module width, depth and bus x-offset) and then threaded read-only
//! through every build step.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bus::BusRouter;
use crate::error::{KeypadError, Result};
use crate::keypad::min_bus_height;

/// Fixed module depth along z.
pub const KEYPAD_DEPTH: u32 = 18;

/// Widest supported bus; bit weights must fit in a `u64`.
pub const MAX_BITS: u32 = 64;

/// Tallest supported bus; the panel row must be a valid `i32` coordinate.
pub const MAX_BUS_HEIGHT: u32 = i32::MAX as u32;

/// User-facing keypad settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadConfig {
    /// Data bus width in bits. Even, at least 2.
    pub bits: u32,
    /// Bus height in cells; the panel sits on the top row.
    pub bus_height: u32,
    /// Decorative wood floor instead of a plain frame floor.
    pub decor: bool,
    /// Draw the module frame (and plain floor when `decor` is off).
    pub frame: bool,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            bits: 8,
            bus_height: 16,
            decor: true,
            frame: true,
        }
    }
}

impl KeypadConfig {
    /// Check the configuration against the fixed template geometry.
    pub fn validate(&self) -> Result<()> {
        if self.bits < 2 {
            return Err(KeypadError::config(format!(
                "bus width {} is too small (minimum 2 bits)",
                self.bits
            )));
        }
        if self.bits % 2 != 0 {
            return Err(KeypadError::config(format!(
                "bus width {} is not even",
                self.bits
            )));
        }
        if self.bits > MAX_BITS {
            return Err(KeypadError::config(format!(
                "bus width {} exceeds the maximum of {MAX_BITS} bits",
                self.bits
            )));
        }
        let required = min_bus_height()?;
        if self.bus_height < required {
            return Err(KeypadError::config(format!(
                "bus height {} is too small for the keypad templates (need at least {required})",
                self.bus_height
            )));
        }
        if self.bus_height > MAX_BUS_HEIGHT {
            return Err(KeypadError::config(format!(
                "bus height {} exceeds the maximum of {MAX_BUS_HEIGHT}",
                self.bus_height
            )));
        }
        Ok(())
    }

    /// Module width along x: three columns per bit plus margins.
    pub fn width(&self) -> u32 {
        self.bits * 3 + 4
    }
}

/// Validated configuration plus the derived module footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeypadLayout {
    pub bits: u32,
    pub bus_height: u32,
    pub decor: bool,
    pub frame: bool,
    pub width: u32,
    pub depth: u32,
    /// Module x-offset handed out by the bus router.
    pub x: i32,
}

impl KeypadLayout {
    /// Validate `config` and claim a bus slot for the module.
    pub fn allocate<R: BusRouter + ?Sized>(config: &KeypadConfig, router: &mut R) -> Result<Self> {
        config.validate()?;
        let x = router.allocate_offset(config.width(), false)?;
        Ok(Self::place(config, x))
    }

    /// Validate `config` and place the module at a fixed x-offset.
    pub fn at(config: &KeypadConfig, x: i32) -> Result<Self> {
        config.validate()?;
        Ok(Self::place(config, x))
    }

    fn place(config: &KeypadConfig, x: i32) -> Self {
        let layout = Self {
            bits: config.bits,
            bus_height: config.bus_height,
            decor: config.decor,
            frame: config.frame,
            width: config.width(),
            depth: KEYPAD_DEPTH,
            x,
        };
        debug!(
            "keypad layout: x={} width={} depth={} bits={}",
            layout.x, layout.width, layout.depth, layout.bits
        );
        layout
    }

    /// Panel row (top of the bus).
    pub fn top(&self) -> i32 {
        self.bus_height as i32 - 1
    }

    /// Columns covered by the repeated bit units.
    pub fn unit_span(&self) -> u32 {
        self.bits * 3
    }
}
