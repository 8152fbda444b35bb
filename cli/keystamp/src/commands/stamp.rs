//! `keystamp stamp`: stamp blueprint files against a recording host.

use std::path::Path;

use anyhow::{bail, Context, Result};
use keystamp_blueprint::{load_blueprint, PlacementLog};

use crate::commands::build::parse_origin;
use crate::commands::{emit, render_ops, OutputFormat};
use crate::manifest::KeystampManifest;

/// Stamp each file in order into one host, then render the recorded calls.
pub fn run(
    project_dir: &Path,
    manifest: Option<&KeystampManifest>,
    files: &[String],
    origin: Option<&str>,
    format: Option<&str>,
    digest: bool,
    output: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::resolve(format, manifest.and_then(|m| m.default_format()))?;
    let log = stamp_files(project_dir, files, origin)?;

    if digest {
        println!("digest: {}", log.digest()?);
        return Ok(());
    }

    let rendered = render_ops(log.ops(), format)?;
    let path = output.map(|file| project_dir.join(file));
    emit(&rendered, path.as_deref())?;
    eprintln!(
        "Stamped {} file(s): {} calls, {} cells occupied",
        files.len(),
        log.len(),
        log.occupied()
    );
    Ok(())
}

pub(crate) fn stamp_files(
    project_dir: &Path,
    files: &[String],
    origin: Option<&str>,
) -> Result<PlacementLog> {
    if files.is_empty() {
        bail!("no blueprint files given");
    }
    let origin = origin.map(parse_origin).transpose()?;

    let mut log = PlacementLog::new();
    for file in files {
        let path = project_dir.join(file);
        let mut blueprint =
            load_blueprint(&path).with_context(|| format!("loading {}", path.display()))?;
        if let Some(origin) = origin {
            blueprint.origin = origin;
        }
        let placed = blueprint
            .stamp(&mut log)
            .with_context(|| format!("stamping {}", path.display()))?;
        log::info!("{}: {placed} cells", path.display());
    }
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystamp_blueprint::BlockPos;

    const WIRE: &str = r#"
orientation = "Xy"
origin = [0, 5, 0]
rows = ["L", "|"]

[legend]
"L" = "lamp"
"|" = "wire ns"
"#;

    const OVERLAP: &str = r#"
orientation = "Xy"
origin = [0, 4, 0]
rows = ["="]

[legend]
"=" = "data block"
"#;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wire.blueprint.toml"), WIRE).unwrap();
        std::fs::write(dir.path().join("overlap.blueprint.toml"), OVERLAP).unwrap();
        dir
    }

    #[test]
    fn stamps_in_order_last_write_wins() {
        let dir = project();
        let files = vec![
            "wire.blueprint.toml".to_string(),
            "overlap.blueprint.toml".to_string(),
        ];
        let log = stamp_files(dir.path(), &files, None).unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.occupied(), 2);
        assert_eq!(
            log.cell_at(BlockPos::new(0, 4, 0)).unwrap().as_str(),
            "data block"
        );
    }

    #[test]
    fn origin_override() {
        let dir = project();
        let files = vec!["wire.blueprint.toml".to_string()];
        let log = stamp_files(dir.path(), &files, Some("10,20,30")).unwrap();
        assert_eq!(
            log.cell_at(BlockPos::new(10, 20, 30)).unwrap().as_str(),
            "lamp"
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = project();
        let files = vec!["nope.blueprint.toml".to_string()];
        let err = stamp_files(dir.path(), &files, None).unwrap_err();
        assert!(format!("{err:#}").contains("nope.blueprint.toml"));
    }

    #[test]
    fn unmapped_character_places_nothing() {
        let dir = project();
        std::fs::write(
            dir.path().join("bad.blueprint.toml"),
            "orientation = \"Xy\"\nrows = [\"L?\"]\n\n[legend]\n\"L\" = \"lamp\"\n",
        )
        .unwrap();
        let files = vec!["bad.blueprint.toml".to_string()];
        let err = stamp_files(dir.path(), &files, None).unwrap_err();
        assert!(format!("{err:#}").contains("stamping"));
    }

    #[test]
    fn no_files_is_an_error() {
        let dir = project();
        assert!(stamp_files(dir.path(), &[], None).is_err());
    }
}
