//! CLI entry point for the repo-local architecture lint.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use architecture_lint::{ArchitectureLintError, lint_frontend_sources};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unable to locate the workspace root (a Cargo.toml declaring [workspace])")]
    WorkspaceRoot,
    #[error(transparent)]
    Lint(#[from] ArchitectureLintError),
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing useful remains to do if stderr itself is gone.
            drop(writeln!(io::stderr().lock(), "{err}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let root = workspace_root().ok_or(CliError::WorkspaceRoot)?;
    lint_frontend_sources(&root.join("frontend"))?;
    Ok(())
}

/// Try `CARGO_WORKSPACE_DIR`, then the working directory, then this crate's
/// manifest directory, walking up from each.
fn workspace_root() -> Option<PathBuf> {
    let candidates = [
        env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|start| find_workspace_root(&start))
}

fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| declares_workspace(&dir.join("Cargo.toml")))
        .map(Path::to_path_buf)
}

fn declares_workspace(manifest: &Path) -> bool {
    fs::read_to_string(manifest).is_ok_and(|contents| contents.contains("[workspace]"))
}
