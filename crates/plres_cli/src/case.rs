use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info};
use plres::parse::{parse_input, ParseErr};
use plres::report::{render_rounds, Report};
use plres::{resolution_with, session, Params, ResErr};

use crate::Args;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub(crate) enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug)]
pub(crate) enum CliErr {
    Io(PathBuf, io::Error),
    Parse(PathBuf, ParseErr),
    Resolution(PathBuf, ResErr),
    Json(serde_json::Error),
}

impl From<serde_json::Error> for CliErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for CliErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliErr::Io(p, e) => write!(f, "{}: {e}", p.display()),
            CliErr::Parse(p, e) => write!(f, "{}: {e}", p.display()),
            CliErr::Resolution(p, e) => write!(f, "{}: {e}", p.display()),
            CliErr::Json(e) => write!(f, "Could not serialize report: {e}"),
        }
    }
}

impl std::error::Error for CliErr {}

pub(crate) type CliResult<T> = Result<T, CliErr>;

/// `input01.txt` / `output01.txt` style names; at least two digits.
pub(crate) fn case_file(prefix: &str, i: usize) -> String {
    format!("{prefix}{i:02}.txt")
}

/// Reads one input file, runs the refutation and writes the result.
/// Returns whether the query is entailed.
pub(crate) fn run_case(
    input: &Path,
    output: &Path,
    params: &Params,
    format: Format,
) -> CliResult<bool> {
    let text = fs::read_to_string(input).map_err(|e| CliErr::Io(input.to_path_buf(), e))?;

    session(|| {
        let (alpha, kb) =
            parse_input(&text).map_err(|e| CliErr::Parse(input.to_path_buf(), e))?;
        info!(
            "{}: query '{}' against {} clauses",
            input.display(),
            alpha,
            kb.size()
        );

        let res = resolution_with(&kb, &alpha, params)
            .map_err(|e| CliErr::Resolution(input.to_path_buf(), e))?;

        let rendered = match format {
            Format::Text => render_rounds(&res),
            Format::Json => serde_json::to_string_pretty(&Report::from(&res))?,
        };
        fs::write(output, rendered).map_err(|e| CliErr::Io(output.to_path_buf(), e))?;

        info!(
            "{}: {} after {} rounds, {} clauses derived",
            output.display(),
            if res.entailed { "YES" } else { "NO" },
            res.num_rounds(),
            res.num_derived()
        );
        Ok(res.entailed)
    })
}

/// Runs cases `1..=args.cases`. A failing case is logged and skipped.
/// Returns the number of failed cases.
pub(crate) fn run_all(args: &Args) -> usize {
    let params = args.params();
    let mut failed = 0;

    for i in 1..=args.cases {
        let input = args.input.join(case_file("input", i));
        let output = args.output.join(case_file("output", i));

        if let Err(e) = run_case(&input, &output, &params, args.format) {
            error!("{e}");
            failed += 1;
        }
    }

    info!("{} of {} cases done", args.cases - failed, args.cases);
    failed
}
