//! keystamp CLI: generate keypad modules and stamp blueprint files.

mod commands;
mod logger;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use commands::build::BuildOptions;
use manifest::KeystampManifest;

#[derive(Parser)]
#[command(name = "keystamp", version, about = "Blueprint stamping and keypad generation")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new keystamp project
    Init {
        /// Project name
        name: String,
    },
    /// Generate a keypad module and print the host calls
    Build {
        /// Bus width in bits (even, at least 2)
        #[arg(long)]
        bits: Option<u32>,
        /// Bus height in cells
        #[arg(long)]
        height: Option<u32>,
        /// Plain floor instead of the decorated one
        #[arg(long)]
        no_decor: bool,
        /// Skip the module frame
        #[arg(long)]
        no_frame: bool,
        /// Fill the module volume with air first
        #[arg(long)]
        clear: bool,
        /// Also stamp the cycle counter at X,Y,Z
        #[arg(long, value_name = "X,Y,Z")]
        cycle_counter: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
        /// Print only the digest of the recorded host calls
        #[arg(long)]
        digest: bool,
        /// Write the host calls to a file instead of stdout
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Stamp one or more blueprint files, in order
    Stamp {
        /// Blueprint files (.blueprint.toml)
        #[arg(required = true)]
        files: Vec<String>,
        /// Override the origin of every file
        #[arg(long, value_name = "X,Y,Z")]
        origin: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
        /// Print only the digest of the recorded host calls
        #[arg(long)]
        digest: bool,
        /// Write the host calls to a file instead of stdout
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Show the computed keypad layout and bit-unit table
    Layout {
        /// Bus width in bits
        #[arg(long)]
        bits: Option<u32>,
        /// Bus height in cells
        #[arg(long)]
        height: Option<u32>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Build {
            bits,
            height,
            no_decor,
            no_frame,
            clear,
            cycle_counter,
            format,
            digest,
            output,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let options = BuildOptions {
                bits,
                height,
                no_decor,
                no_frame,
                clear,
                cycle_counter,
                format,
                digest,
                output,
            };
            commands::build::run(&project_dir, manifest.as_ref(), &options)
        }

        Commands::Stamp {
            files,
            origin,
            format,
            digest,
            output,
        } => {
            // Blueprint paths are relative to where the user is, not the project root.
            let (manifest, _) = load_manifest_optional(&cwd)?;
            commands::stamp::run(
                &cwd,
                manifest.as_ref(),
                &files,
                origin.as_deref(),
                format.as_deref(),
                digest,
                output.as_deref(),
            )
        }

        Commands::Layout {
            bits,
            height,
            format,
        } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            commands::layout::run(manifest.as_ref(), bits, height, format.as_deref())
        }
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<KeystampManifest>, Option<PathBuf>)> {
    match KeystampManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use keystamp_blueprint::PlacementLog;

    /// Full workflow: init → build → stamp the sample blueprint on top.
    #[test]
    fn init_build_stamp_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("workflow-test");

        commands::init::create_project(&project_path, "workflow-test").unwrap();

        let (manifest, project_dir) = load_manifest_optional(&project_path).unwrap();
        assert_eq!(project_dir.as_deref(), Some(project_path.as_path()));
        let manifest = manifest.unwrap();

        let options = BuildOptions {
            output: Some("out/keypad.txt".into()),
            ..BuildOptions::default()
        };
        commands::build::run(&project_path, Some(&manifest), &options).unwrap();
        let text = std::fs::read_to_string(project_path.join("out/keypad.txt")).unwrap();
        assert!(text.lines().next().unwrap().starts_with("frame 0 0 0 28 16 18"));
        assert!(text.lines().any(|l| l.starts_with("place ")));

        let files = vec!["blueprints/lever.blueprint.toml".to_string()];
        let log: PlacementLog =
            commands::stamp::stamp_files(&project_path, &files, None).unwrap();
        assert_eq!(log.len(), 10);
    }

    #[test]
    fn cli_parses_build_flags() {
        let cli = Cli::try_parse_from([
            "keystamp",
            "-vv",
            "build",
            "--bits",
            "4",
            "--no-decor",
            "--cycle-counter",
            "1,2,3",
            "--digest",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Build {
                bits,
                no_decor,
                cycle_counter,
                digest,
                ..
            } => {
                assert_eq!(bits, Some(4));
                assert!(no_decor);
                assert_eq!(cycle_counter.as_deref(), Some("1,2,3"));
                assert!(digest);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn stamp_requires_a_file() {
        assert!(Cli::try_parse_from(["keystamp", "stamp"]).is_err());
    }
}
