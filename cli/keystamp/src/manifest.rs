//! `keystamp.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use keystamp_keypad::KeypadConfig;

pub const MANIFEST_FILE: &str = "keystamp.toml";

/// The top-level manifest structure for a keystamp project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystampManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub keypad: KeypadSection,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Shared bus section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    #[serde(default = "default_bits")]
    pub bits: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// First column handed out by the bus router.
    #[serde(default)]
    pub start: i32,
    /// Spacing between allocated modules.
    #[serde(default = "default_gap")]
    pub gap: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            bits: default_bits(),
            height: default_height(),
            start: 0,
            gap: default_gap(),
        }
    }
}

fn default_bits() -> u32 {
    KeypadConfig::default().bits
}

fn default_height() -> u32 {
    KeypadConfig::default().bus_height
}

fn default_gap() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// Keypad module toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypadSection {
    #[serde(default = "default_true")]
    pub decor: bool,
    #[serde(default = "default_true")]
    pub frame: bool,
}

impl Default for KeypadSection {
    fn default() -> Self {
        Self {
            decor: true,
            frame: true,
        }
    }
}

/// Output section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,
}

impl KeystampManifest {
    /// Search upward from `start_dir` for a `keystamp.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: KeystampManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing keystamp.toml")
    }

    /// Keypad settings as configured, before command-line overrides.
    pub fn keypad_config(&self) -> KeypadConfig {
        KeypadConfig {
            bits: self.bus.bits,
            bus_height: self.bus.height,
            decor: self.keypad.decor,
            frame: self.keypad.frame,
        }
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Generate the default template for `keystamp init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"

[bus]
bits = 8
height = 16
start = 0
gap = 1

[keypad]
decor = true
frame = true

[output]
format = "text"
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[project]
name = "computer"
description = "8-bit build"

[bus]
bits = 16
height = 20
start = 4
gap = 2

[keypad]
decor = false
frame = true

[output]
format = "json"
"#;
        let manifest = KeystampManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.project.name, "computer");
        assert_eq!(manifest.bus.start, 4);
        assert_eq!(manifest.bus.gap, 2);
        assert_eq!(manifest.default_format(), Some("json"));

        let config = manifest.keypad_config();
        assert_eq!(config.bits, 16);
        assert_eq!(config.bus_height, 20);
        assert!(!config.decor);
        assert!(config.frame);
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = KeystampManifest::from_str("[project]\nname = \"minimal\"\n").unwrap();
        assert_eq!(manifest.keypad_config(), KeypadConfig::default());
        assert_eq!(manifest.bus.gap, 1);
        assert!(manifest.default_format().is_none());
    }

    #[test]
    fn partial_sections_take_defaults() {
        let manifest = KeystampManifest::from_str(
            "[project]\nname = \"p\"\n\n[bus]\nbits = 4\n\n[keypad]\ndecor = false\n",
        )
        .unwrap();
        let config = manifest.keypad_config();
        assert_eq!(config.bits, 4);
        assert_eq!(config.bus_height, 16);
        assert!(config.frame);
    }

    #[test]
    fn reject_invalid_toml() {
        let bad = "this is not valid toml [[[";
        assert!(KeystampManifest::from_str(bad).is_err());
    }

    #[test]
    fn template_is_valid_toml() {
        let template = KeystampManifest::template("test-project");
        let manifest = KeystampManifest::from_str(&template).unwrap();
        assert_eq!(manifest.project.name, "test-project");
        assert_eq!(manifest.keypad_config(), KeypadConfig::default());
        assert_eq!(manifest.default_format(), Some("text"));
    }

    #[test]
    fn find_and_load_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[project]\nname = \"here\"\n").unwrap();

        let (manifest, found_dir) = KeystampManifest::find_and_load(dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(manifest.project.name, "here");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[project]\nname = \"parent\"\n").unwrap();

        let nested = dir.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = KeystampManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.project.name, "parent");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn find_and_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[project]\n").unwrap();
        let err = KeystampManifest::find_and_load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
