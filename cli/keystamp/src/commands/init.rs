//! `keystamp init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{KeystampManifest, MANIFEST_FILE};

/// Sample blueprint: the manual-input lever unit.
const SAMPLE_BLUEPRINT: &str = r#"# Manual-input lever: columns run along +z, rows run down.
orientation = "Zy"
origin = [0, 13, 6]
rows = ["   /", "   L", "ix||", "----"]

[legend]
"|" = "wire ns"
"i" = "torch s"
"/" = "lever[face=floor,facing=north]"
"L" = "lamp"
"-" = "data slab"
"x" = "cell block"
"#;

/// Create a new keystamp project in directory `name` relative to cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("blueprints"))
        .context("creating blueprints/ directory")?;
    fs::create_dir_all(project_dir.join("out")).context("creating out/ directory")?;

    fs::write(
        project_dir.join(MANIFEST_FILE),
        KeystampManifest::template(name),
    )
    .context("writing keystamp.toml")?;

    fs::write(
        project_dir.join("blueprints").join("lever.blueprint.toml"),
        SAMPLE_BLUEPRINT,
    )
    .context("writing blueprints/lever.blueprint.toml")?;

    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/blueprints/lever.blueprint.toml");
    println!("  {name}/out/");
    println!("  {name}/.gitignore");

    Ok(())
}
