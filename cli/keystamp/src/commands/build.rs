//! `keystamp build`: generate a keypad module and render the host calls.

use std::path::Path;

use anyhow::{bail, Context, Result};
use keystamp_blueprint::{BlockPos, PlacementLog};
use keystamp_keypad::{build_cycle_counter, Keypad, KeypadConfig, KeypadReport, SequentialRouter};
use log::info;

use crate::commands::{emit, render_ops, OutputFormat};
use crate::manifest::KeystampManifest;

/// Command-line options for a build. `None` falls back to the manifest.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub bits: Option<u32>,
    pub height: Option<u32>,
    pub no_decor: bool,
    pub no_frame: bool,
    pub clear: bool,
    pub cycle_counter: Option<String>,
    pub format: Option<String>,
    pub digest: bool,
    pub output: Option<String>,
}

/// Result of a build: the report plus everything the host recorded.
pub struct BuildOutput {
    pub report: KeypadReport,
    pub log: PlacementLog,
    pub router: SequentialRouter,
}

/// Run the build and write its output.
pub fn run(
    project_dir: &Path,
    manifest: Option<&KeystampManifest>,
    options: &BuildOptions,
) -> Result<()> {
    let format = OutputFormat::resolve(
        options.format.as_deref(),
        manifest.and_then(|m| m.default_format()),
    )?;
    let output = generate(manifest, options)?;

    if options.digest {
        println!("digest: {}", output.log.digest()?);
        return Ok(());
    }

    let rendered = render_ops(output.log.ops(), format)?;
    match &options.output {
        Some(file) => {
            let path = project_dir.join(file);
            emit(&rendered, Some(&path))?;
            print!("{}", output.report);
        }
        None => {
            emit(&rendered, None)?;
            eprint!("{}", output.report);
        }
    }
    Ok(())
}

/// Resolve settings, then clear, frame and build the keypad against a recording host.
pub fn generate(manifest: Option<&KeystampManifest>, options: &BuildOptions) -> Result<BuildOutput> {
    let config = resolve_config(manifest, options);
    let bus = manifest.map(|m| m.bus.clone()).unwrap_or_default();
    let counter = options
        .cycle_counter
        .as_deref()
        .map(parse_origin)
        .transpose()?;

    let mut router = SequentialRouter::new(bus.start, bus.gap);
    let mut log = PlacementLog::new();

    let keypad = Keypad::allocate(&config, &mut router).context("laying out the keypad")?;
    if options.clear {
        keypad.clear(&mut log).context("clearing the keypad volume")?;
    }
    keypad.frame(&mut log).context("drawing the keypad frame")?;
    let report = keypad
        .build(&mut log, &mut router)
        .context("building the keypad")?;

    if let Some(origin) = counter {
        let placed = build_cycle_counter(&mut log, origin).context("building the cycle counter")?;
        info!("cycle counter: {placed} cells");
    }

    Ok(BuildOutput {
        report,
        log,
        router,
    })
}

fn resolve_config(manifest: Option<&KeystampManifest>, options: &BuildOptions) -> KeypadConfig {
    let base = manifest
        .map(KeystampManifest::keypad_config)
        .unwrap_or_default();
    KeypadConfig {
        bits: options.bits.unwrap_or(base.bits),
        bus_height: options.height.unwrap_or(base.bus_height),
        decor: base.decor && !options.no_decor,
        frame: base.frame && !options.no_frame,
    }
}

/// Parse an `X,Y,Z` position.
pub fn parse_origin(s: &str) -> Result<BlockPos> {
    let parts = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<i32>()
                .with_context(|| format!("invalid coordinate '{p}' in '{s}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(BlockPos::new(*x, *y, *z)),
        _ => bail!("expected X,Y,Z but got '{s}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystamp_blueprint::HostOp;

    #[test]
    fn default_build_without_manifest() {
        let out = generate(None, &BuildOptions::default()).unwrap();
        assert_eq!(out.report.layout.bits, 8);
        assert_eq!(out.report.units.len(), 4);
        assert!(matches!(out.log.ops()[0], HostOp::Frame { .. }));
        assert_eq!(out.router.branches().len(), 2);
    }

    #[test]
    fn flags_override_manifest() {
        let manifest: KeystampManifest = toml::from_str(
            "[project]\nname = \"p\"\n[bus]\nbits = 16\nstart = 40\n[keypad]\ndecor = true\n",
        )
        .unwrap();
        let options = BuildOptions {
            bits: Some(4),
            no_decor: true,
            no_frame: true,
            ..BuildOptions::default()
        };
        let out = generate(Some(&manifest), &options).unwrap();
        assert_eq!(out.report.layout.bits, 4);
        assert_eq!(out.report.layout.x, 40);
        assert!(!out.report.layout.decor);
        assert_eq!(out.report.panel_cells, 0);
        assert!(out
            .log
            .ops()
            .iter()
            .all(|op| matches!(op, HostOp::Place { .. })));
    }

    #[test]
    fn clear_comes_first() {
        let options = BuildOptions {
            clear: true,
            ..BuildOptions::default()
        };
        let out = generate(None, &options).unwrap();
        assert!(matches!(out.log.ops()[0], HostOp::Fill { .. }));
        assert!(matches!(out.log.ops()[1], HostOp::Frame { .. }));
    }

    #[test]
    fn odd_bits_fail_before_placing() {
        let options = BuildOptions {
            bits: Some(5),
            ..BuildOptions::default()
        };
        let err = generate(None, &options).err().unwrap();
        assert!(format!("{err:#}").contains("not even"));
    }

    #[test]
    fn out_of_range_bus_settings_fail() {
        let tall = BuildOptions {
            height: Some(3_000_000_000),
            ..BuildOptions::default()
        };
        let err = generate(None, &tall).err().unwrap();
        assert!(format!("{err:#}").contains("exceeds the maximum"));

        let manifest: KeystampManifest =
            toml::from_str("[project]\nname = \"p\"\n[bus]\ngap = 4294967295\n").unwrap();
        let err = generate(Some(&manifest), &BuildOptions::default()).err().unwrap();
        assert!(format!("{err:#}").contains("out of range"));
    }

    #[test]
    fn cycle_counter_on_request() {
        let plain = generate(None, &BuildOptions::default()).unwrap();
        let options = BuildOptions {
            cycle_counter: Some("24, 9, 16".into()),
            ..BuildOptions::default()
        };
        let with_counter = generate(None, &options).unwrap();
        assert!(with_counter.log.len() > plain.log.len());
        assert_ne!(
            with_counter.log.digest().unwrap(),
            plain.log.digest().unwrap()
        );
    }

    #[test]
    fn parse_origin_forms() {
        assert_eq!(parse_origin("1,2,3").unwrap(), BlockPos::new(1, 2, 3));
        assert_eq!(parse_origin("-4, 0 ,7").unwrap(), BlockPos::new(-4, 0, 7));
        assert!(parse_origin("1,2").is_err());
        assert!(parse_origin("a,b,c").is_err());
    }

    #[test]
    fn output_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions {
            bits: Some(2),
            format: Some("json".into()),
            output: Some("keypad.json".into()),
            ..BuildOptions::default()
        };
        run(dir.path(), None, &options).unwrap();
        let written = std::fs::read_to_string(dir.path().join("keypad.json")).unwrap();
        let ops: Vec<HostOp> = serde_json::from_str(&written).unwrap();
        assert!(!ops.is_empty());
    }
}
