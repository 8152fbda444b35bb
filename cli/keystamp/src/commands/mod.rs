pub mod build;
pub mod init;
pub mod layout;
pub mod stamp;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use keystamp_blueprint::HostOp;

/// How recorded host calls are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One host command per line.
    Text,
    /// A JSON array of host ops.
    Json,
}

impl OutputFormat {
    /// Pick the format from the command line, then the manifest, defaulting to text.
    pub fn resolve(flag: Option<&str>, manifest: Option<&str>) -> Result<Self> {
        match flag.or(manifest).unwrap_or("text") {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown output format '{other}' (expected text or json)"),
        }
    }
}

/// Render host ops in `format`.
pub fn render_ops(ops: &[HostOp], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for op in ops {
                out.push_str(&op.to_command());
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(ops).context("serializing host ops")?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Write rendered ops to `output`, or to stdout when no file is given.
pub fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
