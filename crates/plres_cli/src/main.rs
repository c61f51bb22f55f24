use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use plres::Params;

mod case;

use case::{run_all, Format};

/// Decides KB ⊨ α by propositional resolution for a batch of input files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Directory holding input01.txt, input02.txt, ...
    #[arg(short, long, default_value = "input")]
    pub(crate) input: PathBuf,

    /// Directory receiving output01.txt, output02.txt, ...
    #[arg(short, long, default_value = "output")]
    pub(crate) output: PathBuf,

    /// Number of test cases to process
    #[arg(short = 'n', long, default_value_t = 5)]
    pub(crate) cases: usize,

    /// Give up on a case after this many saturation rounds
    #[arg(long)]
    pub(crate) max_rounds: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub(crate) format: Format,
}

impl Args {
    pub(crate) fn params(&self) -> Params {
        Params {
            max_rounds: self.max_rounds,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = fs::create_dir_all(&args.output) {
        error!("{}: {e}", args.output.display());
        return ExitCode::FAILURE;
    }

    if run_all(&args) > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
