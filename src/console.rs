//! Handling the lightbench CLI
//!
//! This module handles the command line parsing of the `lightbench` binary.
use crate::error::{LbError, LbResult};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Command line arguments for the lightbench application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// file path of the bench description (YAML)
    pub file_path: PathBuf,
    /// file path of the CSV output. Defaults to the bench file path with the extension `csv`.
    pub output_path: PathBuf,
    /// trace the rays on all available cores
    pub parallel: bool,
}

/// Raw command line arguments as parsed by `clap`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// file path of the bench description (`.yaml` or `.yml`)
    #[arg(short, long)]
    file: String,

    /// file path of the CSV file receiving the ray paths
    #[arg(short, long)]
    output: Option<String>,

    /// trace rays in parallel
    #[arg(short, long, default_value_t = false)]
    parallel: bool,
}

/// Checks if the passed file path is a valid bench file.
fn file_path_is_valid(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

impl TryFrom<PartialArgs> for Args {
    type Error = LbError;

    fn try_from(part_args: PartialArgs) -> LbResult<Self> {
        let file_path = PathBuf::from(&part_args.file);
        if !file_path_is_valid(&file_path) {
            return Err(LbError::Console(format!(
                "{} is not a valid bench file",
                file_path.display()
            )));
        }
        let output_path = part_args.output.map_or_else(
            || file_path.with_extension("csv"),
            PathBuf::from,
        );
        if output_path
            .parent()
            .is_some_and(|dir| !dir.as_os_str().is_empty() && !dir.is_dir())
        {
            return Err(LbError::Console(format!(
                "output directory of {} does not exist",
                output_path.display()
            )));
        }
        Ok(Self {
            file_path,
            output_path,
            parallel: part_args.parallel,
        })
    }
}
