//! `keystamp layout`: show the computed module footprint and unit table.

use std::fmt;

use anyhow::{Context, Result};
use keystamp_keypad::{units, KeypadConfig, KeypadLayout, SequentialRouter};
use serde::Serialize;

use crate::commands::OutputFormat;
use crate::manifest::KeystampManifest;

#[derive(Debug, Serialize)]
struct UnitRow {
    bit: u32,
    tib: u32,
    x: i32,
    booster: bool,
    edge_cut: bool,
    first_bit: bool,
    labels: [[String; 2]; 2],
}

#[derive(Debug, Serialize)]
struct LayoutView {
    layout: KeypadLayout,
    units: Vec<UnitRow>,
}

pub fn run(
    manifest: Option<&KeystampManifest>,
    bits: Option<u32>,
    height: Option<u32>,
    format: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::resolve(format, manifest.and_then(|m| m.default_format()))?;
    let view = compute(manifest, bits, height)?;
    match format {
        OutputFormat::Text => print!("{view}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&view).context("serializing layout")?
        ),
    }
    Ok(())
}

fn compute(
    manifest: Option<&KeystampManifest>,
    bits: Option<u32>,
    height: Option<u32>,
) -> Result<LayoutView> {
    let base = manifest
        .map(KeystampManifest::keypad_config)
        .unwrap_or_default();
    let config = KeypadConfig {
        bits: bits.unwrap_or(base.bits),
        bus_height: height.unwrap_or(base.bus_height),
        ..base
    };
    let bus = manifest.map(|m| m.bus.clone()).unwrap_or_default();
    let mut router = SequentialRouter::new(bus.start, bus.gap);
    let layout = KeypadLayout::allocate(&config, &mut router)?;

    let units = units(layout.bits)
        .map(|u| UnitRow {
            bit: u.bit(),
            tib: u.tib(),
            x: u.x_offset(layout.x),
            booster: u.has_booster(),
            edge_cut: u.is_edge(),
            first_bit: u.is_first(),
            labels: [u.high_label(), u.low_label()],
        })
        .collect();
    Ok(LayoutView { layout, units })
}

impl fmt::Display for LayoutView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = &self.layout;
        writeln!(f, "=== Keypad Layout ===")?;
        writeln!(f, "Bus: {} bits, height {}", l.bits, l.bus_height)?;
        writeln!(f, "Module: x={} width={} depth={}", l.x, l.width, l.depth)?;
        writeln!(f)?;
        writeln!(f, "--- Units ---")?;
        writeln!(f, "  {:>3} {:>3} {:>5}  flags", "bit", "tib", "x")?;
        for u in &self.units {
            let mut flags = Vec::new();
            if u.booster {
                flags.push("booster");
            }
            if u.edge_cut {
                flags.push("edge-cut");
            }
            if u.first_bit {
                flags.push("first-bit");
            }
            let [high, low] = &u.labels;
            writeln!(
                f,
                "  {:>3} {:>3} {:>5}  {}  {} {} / {} {}",
                u.bit,
                u.tib,
                u.x,
                if flags.is_empty() {
                    "-".to_string()
                } else {
                    flags.join(",")
                },
                high[0],
                high[1],
                low[0],
                low[1],
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_bit_table() {
        let view = compute(None, Some(4), None).unwrap();
        assert_eq!(view.layout.width, 16);
        assert_eq!(view.units.len(), 2);
        assert_eq!(view.units[0].tib, 2);
        assert_eq!(view.units[0].x, 7);
        assert_eq!(view.units[1].labels[0], ["Bit 4".to_string(), "[+8]".to_string()]);

        let text = view.to_string();
        assert!(text.contains("Keypad Layout"));
        assert!(text.contains("first-bit"));
        assert!(text.contains("edge-cut"));
    }

    #[test]
    fn manifest_start_offsets_module() {
        let manifest: KeystampManifest =
            toml::from_str("[project]\nname = \"p\"\n[bus]\nstart = 12\n").unwrap();
        let view = compute(Some(&manifest), None, None).unwrap();
        assert_eq!(view.layout.x, 12);
        assert_eq!(view.units.last().unwrap().x, 13);
    }

    #[test]
    fn short_bus_rejected() {
        assert!(compute(None, None, Some(10)).is_err());
    }
}
